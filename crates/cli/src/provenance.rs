use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact: subcommand, its parameters, and the files it read.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input<P: AsRef<Path>>(mut self, input: P) -> Self {
        self.inputs.push(input.as_ref().to_string_lossy().into_owned());
        self
    }
}

/// Provenance block shared by sidecars and `toric report`.
pub fn header() -> Value {
    json!({
        "code_rev": current_git_rev(),
        "toric_version": toric::VERSION,
    })
}

/// Write `<artifact stem>.provenance.json` next to `artifact`.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = sidecar_path(artifact);
    if let Some(parent) = sidecar.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let mut doc = header();
    doc["callsite"] = json!({ "file": callsite.file(), "line": callsite.line() });
    doc["command"] = json!(payload.command);
    doc["params"] = payload.params;
    doc["inputs"] = json!(payload.inputs);
    doc["outputs"] = json!([artifact.to_string_lossy()]);
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_path_replaces_extension() {
        let derived = sidecar_path(Path::new("/tmp/out/f1.json"));
        assert_eq!(derived, Path::new("/tmp/out/f1.provenance.json"));
    }

    #[test]
    fn write_sidecar_records_command_and_files() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("bundle.json");
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new("proj", json!({"verify": false})).with_input("in.json");
        let path = write_sidecar(&artifact, payload).unwrap();
        assert!(path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["command"], "proj");
        assert_eq!(parsed["inputs"][0], "in.json");
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["toric_version"], toric::VERSION);
        assert!(parsed["callsite"]["line"].is_u64());
    }
}
