//! Static tile content and per-team tile progress.
use serde::{Deserialize, Serialize};

/// A challenge square on the board. Immutable once the game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub image: String,
    pub name: String,
    pub description: String,
    pub points: u32,
}

impl Tile {
    #[must_use]
    pub fn positioned(&self, row: usize, column: usize) -> PositionedTile {
        PositionedTile {
            tile: self.clone(),
            row,
            column,
        }
    }
}

/// A tile carrying its own grid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionedTile {
    #[serde(flatten)]
    pub tile: Tile,
    pub row: usize,
    pub column: usize,
}

/// One team's progress on one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamTile {
    pub completed: bool,
    /// Signed point adjustment; partial credit when the tile is not completed.
    #[serde(default)]
    pub custom_value: i64,
    /// Evidence reference, empty until something is submitted.
    #[serde(default)]
    pub screenshot: String,
}

impl TeamTile {
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_submission(&self) -> bool {
        !self.screenshot.is_empty()
    }

    #[must_use]
    pub const fn is_partial(&self) -> bool {
        !self.completed && self.custom_value != 0
    }

    /// Whether a team has done anything with this tile yet.
    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.completed || self.custom_value != 0 || self.has_submission()
    }

    #[must_use]
    pub fn score(&self, tile: &Tile) -> i64 {
        let base = if self.completed {
            i64::from(tile.points)
        } else {
            0
        };
        base.saturating_add(self.custom_value)
    }
}

/// A tile definition joined with one team's progress on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTile {
    #[serde(flatten)]
    pub tile: Tile,
    #[serde(flatten)]
    pub progress: TeamTile,
}

impl FullTile {
    #[must_use]
    pub fn new(tile: &Tile, progress: &TeamTile) -> Self {
        Self {
            tile: tile.clone(),
            progress: progress.clone(),
        }
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.progress.score(&self.tile)
    }
}
