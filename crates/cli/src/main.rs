use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use toric::{projectivization_with, BundleCfg, ToricDivisor};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod provenance;
mod schema;

use schema::{FanDoc, ProjDoc, Summand};

#[derive(Parser)]
#[command(name = "toric")]
#[command(about = "Projective bundles over toric varieties")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Projectivize the direct sum in --input and write the fan to --out
    Proj {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Check that every ray lifts the same way in every maximal cone
        #[arg(long)]
        verify: bool,
    },
    /// Print the base variety and summands of an input document
    Show {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Proj { input, out, verify } => proj(&input, &out, verify).map(|_| ()),
        Action::Show { input } => show(&input),
        Action::Report => report(),
    }
}

/// Returns the written fan document.
fn proj(input: &Path, out: &Path, verify: bool) -> Result<FanDoc> {
    tracing::info!(input = %input.display(), out = %out.display(), verify, "proj");
    let doc = ProjDoc::load(input)?;
    let (base, summands) = doc.build()?;
    let cfg = BundleCfg {
        verify_cone_independence: verify,
    };
    let variety = projectivization_with(&summands, cfg).context("projectivization failed")?;
    tracing::info!(
        base_dim = base.dim(),
        summands = summands.len(),
        dim = variety.dim(),
        rays = variety.n_rays(),
        cones = variety.n_maximal_cones(),
        smooth = variety.is_smooth(),
        "projectivized"
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let fan = FanDoc::from_variety(&variety);
    std::fs::write(out, serde_json::to_vec_pretty(&fan)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(
        "proj",
        json!({
            "verify": verify,
            "base": doc.base,
            "summands": doc.summands,
        }),
    )
    .with_input(input);
    let sidecar = provenance::write_sidecar(out, payload)?;
    tracing::info!(sidecar = %sidecar.display(), "wrote provenance");
    Ok(fan)
}

fn show(input: &Path) -> Result<()> {
    let doc = ProjDoc::load(input)?;
    let (base, summands) = doc.build()?;
    tracing::info!(
        dim = base.dim(),
        rays = base.n_rays(),
        cones = base.n_maximal_cones(),
        smooth = base.is_smooth(),
        "base"
    );
    print!("{base}");
    for (i, s) in summands.iter().enumerate() {
        let d: ToricDivisor = toric::BundleSummand::to_divisor(s)?;
        let kind = match s {
            Summand::Divisor(_) => "divisor",
            Summand::LineBundle(_) => "line bundle",
        };
        let coeffs: Vec<String> = d.coefficients().iter().map(|c| c.to_string()).collect();
        let class = match d.class() {
            Ok(c) => c.iter().map(|q| q.to_string()).collect::<Vec<_>>().join(", "),
            Err(e) => format!("n/a ({e})"),
        };
        println!("  summand {i} ({kind}): [{}], class [{class}]", coeffs.join(", "));
    }
    Ok(())
}

fn report() -> Result<()> {
    let mut obj = provenance::header();
    obj["params"] = json!({});
    obj["outputs"] = json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn proj_writes_fan_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("f2.json");
        fs::write(
            &input,
            r#"{"base": {"projective_space": 1},
                "summands": [{"line_bundle": [0]}, {"line_bundle": [2]}]}"#,
        )
        .unwrap();
        let out = dir.path().join("nested").join("f2.fan.json");
        let fan = proj(&input, &out, true).unwrap();
        assert_eq!(fan.dim, 2);

        let written: FanDoc = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(written, fan);
        assert_eq!(written.rays[0], vec![schema::Coord::Int(1), schema::Coord::Int(2)]);
        assert!(dir.path().join("nested").join("f2.fan.provenance.json").exists());
    }

    #[test]
    fn proj_surfaces_verification_failure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("wpp.json");
        fs::write(
            &input,
            r#"{"base": {"fan": {"dim": 2, "rays": [[1, 0], [0, 1], [-1, -2]],
                                 "max_cones": [[0, 1], [1, 2], [0, 2]]}},
                "summands": [{"divisor": [0, 0, 0]}, {"divisor": [1, 0, 0]}]}"#,
        )
        .unwrap();
        let out = dir.path().join("wpp.fan.json");
        assert!(proj(&input, &out, false).is_ok());
        let err = proj(&input, &out, true).unwrap_err();
        assert!(format!("{err:#}").contains("depends on the maximal cone"));
    }

    #[test]
    fn proj_reports_empty_direct_sum() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.json");
        fs::write(&input, r#"{"base": {"projective_space": 2}, "summands": []}"#).unwrap();
        let out = dir.path().join("empty.fan.json");
        let err = proj(&input, &out, false).unwrap_err();
        assert!(format!("{err:#}").contains("empty direct sum"));
        assert!(!out.exists());
    }

    #[test]
    fn show_accepts_single_summand() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("f1.json");
        fs::write(
            &input,
            r#"{"base": {"hirzebruch": 1}, "summands": [{"divisor": [1, 0, "1/2", 0]}]}"#,
        )
        .unwrap();
        assert!(show(&input).is_ok());
    }
}
