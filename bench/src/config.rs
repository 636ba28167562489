//! Run settings for the bench driver.
//!
//! Each setting has a name, a description, a default and bounds, and can be
//! set through an environment variable (or a `.env` file). Positional
//! command-line arguments win over the environment.

use anyhow::{bail, Context, Result};

pub struct IntSetting {
    pub env: &'static str,
    pub description: &'static str,
    pub default: u64,
    pub min: u64,
    pub max: u64,
}

pub struct BoolSetting {
    pub env: &'static str,
    pub description: &'static str,
    pub default: bool,
}

pub const VERTICES: IntSetting = IntSetting {
    env: "DENSEGRAPH_VERTICES",
    description: "Vertex count of the largest generated graph",
    default: 100_000,
    min: 2,
    max: 50_000_000,
};

pub const EDGE_FACTOR: IntSetting = IntSetting {
    env: "DENSEGRAPH_EDGE_FACTOR",
    description: "Edges per vertex in generated graphs",
    default: 4,
    min: 1,
    max: 64,
};

pub const SEED: IntSetting = IntSetting {
    env: "DENSEGRAPH_SEED",
    description: "Seed for the generators' random source",
    default: 42,
    min: 0,
    max: u64::MAX,
};

pub const CERTIFY: BoolSetting = BoolSetting {
    env: "DENSEGRAPH_CERTIFY",
    description: "Cross-check every Eulerian result against the reference check",
    default: true,
};

/// Largest `vertices * edge_factor` a run may request.
pub const MAX_EDGES: u64 = 100_000_000;

pub const ALL_INT: [&IntSetting; 3] = [&VERTICES, &EDGE_FACTOR, &SEED];

impl IntSetting {
    /// Explicit value > environment > default, then bounds-checked.
    fn resolve(&self, explicit: Option<&str>, env: &dyn Fn(&str) -> Option<String>) -> Result<u64> {
        let raw = match explicit {
            Some(s) => Some(s.to_string()),
            None => env(self.env).filter(|s| !s.is_empty()),
        };
        let value = match raw {
            Some(s) => s
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{}: '{}' is not a non-negative integer", self.env, s))?,
            None => self.default,
        };
        if value < self.min || value > self.max {
            bail!(
                "{} must be between {} and {}, got {}",
                self.env,
                self.min,
                self.max,
                value
            );
        }
        Ok(value)
    }
}

impl BoolSetting {
    fn resolve(&self, env: &dyn Fn(&str) -> Option<String>) -> Result<bool> {
        match env(self.env).filter(|s| !s.is_empty()) {
            None => Ok(self.default),
            Some(s) => match s.trim().to_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => Ok(true),
                "0" | "false" | "off" | "no" => Ok(false),
                other => bail!("{}: '{}' is not a boolean", self.env, other),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub vertices: usize,
    pub edge_factor: usize,
    pub seed: u64,
    pub certify: bool,
    pub json: bool,
}

impl Config {
    pub fn from_env(vertices_arg: Option<&str>, json: bool) -> Result<Self> {
        Self::load(vertices_arg, json, &|key| std::env::var(key).ok())
    }

    fn load(
        vertices_arg: Option<&str>,
        json: bool,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let vertices = VERTICES.resolve(vertices_arg, env)?;
        let edge_factor = EDGE_FACTOR.resolve(None, env)?;
        let edges = vertices.saturating_mul(edge_factor);
        if edges > MAX_EDGES {
            bail!(
                "{} x {} requests {} edges, more than the limit of {}",
                VERTICES.env,
                EDGE_FACTOR.env,
                edges,
                MAX_EDGES
            );
        }
        Ok(Self {
            vertices: vertices as usize,
            edge_factor: edge_factor as usize,
            seed: SEED.resolve(None, env)?,
            certify: CERTIFY.resolve(env)?,
            json,
        })
    }
}

/// One line per setting, for `help`.
pub fn describe() -> Vec<String> {
    let mut lines: Vec<String> = ALL_INT
        .iter()
        .map(|s| format!("  {:<24} {} (default {})", s.env, s.description, s.default))
        .collect();
    lines.push(format!(
        "  {:<24} {} (default {})",
        CERTIFY.env, CERTIFY.description, CERTIFY.default
    ));
    lines.push(format!(
        "  vertices x edge factor may not exceed {} edges",
        MAX_EDGES
    ));
    lines
}
