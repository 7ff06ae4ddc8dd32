//! Board configuration and grid addressing.
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Square grid stored row-major.
pub type Grid<T> = Vec<Vec<T>>;

/// Game mode code carried on the wire as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "u32", into = "u32")]
pub enum GameType {
    /// Teams complete arbitrary tiles on the grid.
    #[default]
    Bingo,
    /// Teams roll and advance linearly across the tiles.
    TileRace,
    /// Codes this model does not know, kept so they survive a round trip.
    Other(u32),
}

impl GameType {
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Bingo => 0,
            Self::TileRace => 1,
            Self::Other(code) => code,
        }
    }

    #[must_use]
    pub const fn is_race(self) -> bool {
        matches!(self, Self::TileRace)
    }
}

impl From<u32> for GameType {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Bingo,
            1 => Self::TileRace,
            other => Self::Other(other),
        }
    }
}

impl From<GameType> for u32 {
    fn from(game_type: GameType) -> Self {
        game_type.code()
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bingo => write!(f, "bingo"),
            Self::TileRace => write!(f, "tile_race"),
            Self::Other(code) => write!(f, "type_{code}"),
        }
    }
}

/// A competing team and the display names on its roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl Team {
    #[must_use]
    pub fn has_member(&self, display_name: &str) -> bool {
        self.members
            .iter()
            .any(|member| member.eq_ignore_ascii_case(display_name))
    }
}

/// Game configuration: schedule, mode, grid size and teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetails {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub game_type: GameType,
    pub board_size: usize,
    pub team_count: usize,
    pub teams: Vec<Team>,
}

impl BoardDetails {
    /// Number of tiles on the board.
    #[must_use]
    pub const fn tile_count(&self) -> usize {
        self.board_size.saturating_mul(self.board_size)
    }

    /// Linear index of the last tile, the finish line in race mode.
    #[must_use]
    pub const fn final_tile(&self) -> usize {
        self.tile_count().saturating_sub(1)
    }

    #[must_use]
    pub fn team_index(&self, name: &str) -> Option<usize> {
        self.teams.iter().position(|team| team.name == name)
    }

    #[must_use]
    pub fn team_name(&self, team: usize) -> Option<&str> {
        self.teams.get(team).map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Whether `now` falls inside the half-open `[start, end)` window.
    #[must_use]
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now < self.end_time
    }
}

/// Linear tile number for a grid position, `None` when off the board.
#[must_use]
pub const fn tile_number(row: usize, column: usize, size: usize) -> Option<usize> {
    if row >= size || column >= size {
        return None;
    }
    match row.checked_mul(size) {
        Some(base) => base.checked_add(column),
        None => None,
    }
}

/// Grid position `(row, column)` for a linear tile number.
#[must_use]
pub const fn tile_position(tile_number: usize, size: usize) -> Option<(usize, usize)> {
    if size == 0 || tile_number >= size.saturating_mul(size) {
        return None;
    }
    Some((tile_number / size, tile_number % size))
}

/// Whether `grid` is exactly `size × size`.
#[must_use]
pub fn grid_matches<T>(grid: &Grid<T>, size: usize) -> bool {
    grid.len() == size && grid.iter().all(|row| row.len() == size)
}
