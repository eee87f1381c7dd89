//! JSON documents read and written by the `toric` binary.
//!
//! Input (`proj`, `show`):
//! ```json
//! { "base": {"projective_space": 1},
//!   "summands": [ {"divisor": [0, 0]}, {"line_bundle": [2]} ] }
//! ```
//! `base` is one of `projective_space`, `affine_space`, `hirzebruch` or
//! `fan: {dim, rays, max_cones}`. Coordinates are JSON integers or strings
//! such as `"1/2"`.
//!
//! Output: the fan of the result as `{dim, rays, max_cones}`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use toric::api::{
    BundleSummand, NormalToricVariety, QVec, ToricDivisor, ToricError, ToricLineBundle,
};

/// Exact coordinate: a JSON integer, or a string `"p"` / `"p/q"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Int(i64),
    Str(String),
}

impl Coord {
    pub fn to_rational(&self) -> Result<BigRational> {
        match self {
            Coord::Int(i) => Ok(BigRational::from_integer(BigInt::from(*i))),
            Coord::Str(s) => s
                .trim()
                .parse::<BigRational>()
                .with_context(|| format!("invalid rational {s:?}")),
        }
    }

    /// Integers that fit in `i64` stay numbers; everything else becomes a string.
    pub fn from_rational(q: &BigRational) -> Self {
        if q.is_integer() {
            if let Some(i) = q.to_integer().to_i64() {
                return Coord::Int(i);
            }
        }
        Coord::Str(q.to_string())
    }
}

fn to_rationals(coords: &[Coord]) -> Result<Vec<BigRational>> {
    coords.iter().map(Coord::to_rational).collect()
}

/// Explicit fan: rays and maximal cones as ray-index lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanDoc {
    pub dim: usize,
    pub rays: Vec<Vec<Coord>>,
    pub max_cones: Vec<Vec<usize>>,
}

impl FanDoc {
    pub fn from_variety(x: &NormalToricVariety) -> Self {
        let fan = x.fan();
        Self {
            dim: fan.dim(),
            rays: fan
                .rays()
                .iter()
                .map(|r| r.iter().map(Coord::from_rational).collect())
                .collect(),
            max_cones: fan
                .maximal_cones()
                .iter()
                .map(|c| c.iter().copied().collect())
                .collect(),
        }
    }

    fn build(&self) -> Result<NormalToricVariety> {
        let rays = self
            .rays
            .iter()
            .map(|r| Ok(QVec::from_vec(to_rationals(r)?)))
            .collect::<Result<Vec<_>>>()?;
        let cones = self
            .max_cones
            .iter()
            .map(|c| c.iter().copied().collect())
            .collect();
        NormalToricVariety::from_rays_and_cones(self.dim, rays, cones).context("invalid base fan")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDoc {
    ProjectiveSpace(usize),
    AffineSpace(usize),
    Hirzebruch(i64),
    Fan(FanDoc),
}

impl BaseDoc {
    pub fn build(&self) -> Result<NormalToricVariety> {
        Ok(match self {
            BaseDoc::ProjectiveSpace(d) => NormalToricVariety::projective_space(*d),
            BaseDoc::AffineSpace(d) => NormalToricVariety::affine_space(*d),
            BaseDoc::Hirzebruch(r) => NormalToricVariety::hirzebruch(*r),
            BaseDoc::Fan(f) => f.build()?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummandDoc {
    /// One coefficient per base ray.
    Divisor(Vec<Coord>),
    /// Class-group coordinates; must be integers.
    LineBundle(Vec<Coord>),
}

/// A parsed summand: either representation feeds the same engine.
#[derive(Clone, Debug)]
pub enum Summand {
    Divisor(ToricDivisor),
    LineBundle(ToricLineBundle),
}

impl BundleSummand for Summand {
    fn base(&self) -> &Arc<NormalToricVariety> {
        match self {
            Summand::Divisor(d) => d.base(),
            Summand::LineBundle(l) => l.base(),
        }
    }

    fn to_divisor(&self) -> Result<ToricDivisor, ToricError> {
        match self {
            Summand::Divisor(d) => d.to_divisor(),
            Summand::LineBundle(l) => l.to_divisor(),
        }
    }
}

impl SummandDoc {
    fn build(&self, base: &Arc<NormalToricVariety>) -> Result<Summand> {
        match self {
            SummandDoc::Divisor(a) => Ok(Summand::Divisor(ToricDivisor::new(
                base.clone(),
                to_rationals(a)?,
            )?)),
            SummandDoc::LineBundle(c) => {
                let class = to_rationals(c)?
                    .into_iter()
                    .map(|q| {
                        q.is_integer()
                            .then(|| q.to_integer())
                            .ok_or_else(|| anyhow!("class entry {q} is not an integer"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Summand::LineBundle(ToricLineBundle::new(base.clone(), class)?))
            }
        }
    }
}

/// Input document of `proj` and `show`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjDoc {
    pub base: BaseDoc,
    #[serde(default)]
    pub summands: Vec<SummandDoc>,
}

impl ProjDoc {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    /// Base variety (shared by every summand) and the parsed summands.
    pub fn build(&self) -> Result<(Arc<NormalToricVariety>, Vec<Summand>)> {
        let base = Arc::new(self.base.build()?);
        let summands = self
            .summands
            .iter()
            .enumerate()
            .map(|(i, s)| s.build(&base).with_context(|| format!("summand {i}")))
            .collect::<Result<Vec<_>>>()?;
        Ok((base, summands))
    }
}
