use anyhow::{Result, bail};
use bingo_game::{BoardDetails, race_seed};

pub const DEFAULT_SEED: u64 = 1337;

/// A seed plus the token it came from, when that was not a plain number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub label: Option<String>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self { seed, label: None }
    }

    /// `1337`, or `4521... (game)` for keyword seeds.
    #[must_use]
    pub fn describe(&self) -> String {
        match &self.label {
            Some(label) => format!("{} ({label})", self.seed),
            None => self.seed.to_string(),
        }
    }
}

/// Resolve CLI seed tokens.
///
/// Accepts integers (negative values use their magnitude) and the keyword
/// `game`, which expands to the board's own race seed. Duplicates are dropped.
pub fn resolve_seed_inputs(tokens: &[String], details: &BoardDetails) -> Result<Vec<SeedInfo>> {
    let mut seeds: Vec<SeedInfo> = Vec::new();

    for token in tokens {
        let info = if token.eq_ignore_ascii_case("game") {
            SeedInfo {
                seed: race_seed(details),
                label: Some("game".to_string()),
            }
        } else if let Ok(value) = token.parse::<i64>() {
            SeedInfo::from_numeric(value.unsigned_abs())
        } else if let Ok(value) = token.parse::<u64>() {
            SeedInfo::from_numeric(value)
        } else {
            bail!("Unrecognized seed token: {token}");
        };

        if !seeds.iter().any(|s| s.seed == info.seed) {
            seeds.push(info);
        }
    }

    if seeds.is_empty() {
        seeds.push(SeedInfo::from_numeric(DEFAULT_SEED));
    }
    Ok(seeds)
}
