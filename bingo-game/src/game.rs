//! Root aggregate for a loaded game session.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{BoardDetails, Grid, tile_position};
use crate::members::MembersStorage;
use crate::team_board::{TeamBoard, assign_standings};
use crate::tile::{FullTile, PositionedTile, Tile};
use crate::validation::{ValidationError, validate_details, validate_grid, validate_team_index};

/// Errors raised by the once-per-session attach operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0} already loaded for this session")]
    AlreadyAttached(&'static str),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A game's configuration, static board and the data that arrives later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetails {
    pub details: BoardDetails,
    pub board: Grid<Tile>,
    /// Roster snapshot; `None` until loaded.
    #[serde(default)]
    pub user_data: Option<MembersStorage>,
    /// Per-team progress; `None` until loaded.
    #[serde(default)]
    pub team_boards: Option<Vec<TeamBoard>>,
}

/// One row of the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub team: usize,
    pub name: String,
    pub points: i64,
    pub standing: u32,
    pub completed: usize,
}

impl GameDetails {
    /// # Errors
    ///
    /// Returns an error if the details or the board shape are inconsistent.
    pub fn new(details: BoardDetails, board: Grid<Tile>) -> Result<Self, ValidationError> {
        let game = Self {
            details,
            board,
            user_data: None,
            team_boards: None,
        };
        game.validate()?;
        Ok(game)
    }

    /// Parse a game from JSON. The result is not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a game.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every structural invariant of the currently loaded state.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_details(&self.details)?;
        validate_grid("board", &self.board, self.details.board_size)?;
        if let Some(boards) = &self.team_boards {
            self.validate_team_boards(boards)?;
        }
        Ok(())
    }

    fn validate_team_boards(&self, boards: &[TeamBoard]) -> Result<(), ValidationError> {
        let mut seen = HashSet::with_capacity(boards.len());
        for board in boards {
            validate_team_index(board.team, self.details.team_count)?;
            if !seen.insert(board.team) {
                return Err(ValidationError::DuplicateTeamBoard(board.team));
            }
            validate_grid("team board", &board.board, self.details.board_size)?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn tile_count(&self) -> usize {
        self.details.tile_count()
    }

    #[must_use]
    pub fn tile(&self, row: usize, column: usize) -> Option<&Tile> {
        self.board.get(row).and_then(|cells| cells.get(column))
    }

    #[must_use]
    pub fn tile_at(&self, tile_number: usize) -> Option<&Tile> {
        let (row, column) = tile_position(tile_number, self.details.board_size)?;
        self.tile(row, column)
    }

    /// Every tile with its coordinates, in linear order.
    #[must_use]
    pub fn positioned_tiles(&self) -> Vec<PositionedTile> {
        self.board
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(move |(column, tile)| tile.positioned(row, column))
            })
            .collect()
    }

    #[must_use]
    pub fn team_board(&self, team: usize) -> Option<&TeamBoard> {
        self.team_boards
            .as_ref()?
            .iter()
            .find(|board| board.team == team)
    }

    #[must_use]
    pub fn full_tile(&self, team: usize, row: usize, column: usize) -> Option<FullTile> {
        let tile = self.tile(row, column)?;
        let progress = self.team_board(team)?.tile(row, column)?;
        Some(FullTile::new(tile, progress))
    }

    /// Attach team progress. Boards are checked against the game, sorted by
    /// team, and their points and standings recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error if boards were already attached or do not fit the game.
    pub fn attach_team_boards(&mut self, mut boards: Vec<TeamBoard>) -> Result<(), SessionError> {
        if self.team_boards.is_some() {
            return Err(SessionError::AlreadyAttached("team boards"));
        }
        self.validate_team_boards(&boards)?;
        boards.sort_by_key(|board| board.team);
        self.team_boards = Some(boards);
        self.recompute_scores();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if a roster snapshot was already attached.
    pub fn attach_user_data(&mut self, storage: MembersStorage) -> Result<(), SessionError> {
        if self.user_data.is_some() {
            return Err(SessionError::AlreadyAttached("user data"));
        }
        self.user_data = Some(storage);
        Ok(())
    }

    pub fn recompute_scores(&mut self) {
        if let Some(boards) = self.team_boards.as_mut() {
            for board in boards.iter_mut() {
                board.recompute_points(&self.board);
            }
            assign_standings(boards);
        }
    }

    /// Scoreboard ordered by standing, then team index. Empty until team
    /// boards are attached.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        let mut rows: Vec<LeaderboardRow> = self
            .team_boards
            .iter()
            .flatten()
            .map(|board| LeaderboardRow {
                team: board.team,
                name: self
                    .details
                    .team_name(board.team)
                    .unwrap_or_default()
                    .to_string(),
                points: board.points,
                standing: board.standing,
                completed: board.completed_count(),
            })
            .collect();
        rows.sort_by_key(|row| (row.standing, row.team));
        rows
    }
}
