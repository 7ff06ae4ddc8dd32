use anyhow::{Context, Result};
use bingo_game::{BingoConfig, GameDetails, WomRawMembership};
use std::path::{Path, PathBuf};

use crate::common::read_text;

const GAME_FILE: &str = "sample_game.json";
const ROSTER_FILE: &str = "wom_group.json";
const CONFIG_FILE: &str = "config.json";

/// Fixture data every scenario runs against.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub game: GameDetails,
    pub memberships: Vec<WomRawMembership>,
    pub config: BingoConfig,
}

impl TesterAssets {
    pub fn assets_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
    }

    /// Load fixtures, falling back to the bundled assets for any path not given.
    pub fn load(
        game: Option<&Path>,
        roster: Option<&Path>,
        config: Option<&Path>,
    ) -> Result<Self> {
        let root = Self::assets_root();
        let game_path = game.map_or_else(|| root.join(GAME_FILE), Path::to_path_buf);
        let roster_path = roster.map_or_else(|| root.join(ROSTER_FILE), Path::to_path_buf);
        let config_path = config.map_or_else(|| root.join(CONFIG_FILE), Path::to_path_buf);

        let game = GameDetails::from_json(&read_text(&game_path)?)
            .with_context(|| format!("parsing game {}", game_path.display()))?;
        let memberships = WomRawMembership::list_from_json(&read_text(&roster_path)?)
            .with_context(|| format!("parsing roster {}", roster_path.display()))?;
        let config = BingoConfig::from_json(&read_text(&config_path)?)
            .with_context(|| format!("parsing config {}", config_path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", config_path.display()))?;

        log::debug!(
            "loaded {} ({}x{} board, {} teams), {} memberships",
            game_path.display(),
            game.details.board_size,
            game.details.board_size,
            game.details.team_count,
            memberships.len()
        );

        Ok(Self {
            game,
            memberships,
            config,
        })
    }

    pub fn load_default() -> Result<Self> {
        Self::load(None, None, None)
    }
}
