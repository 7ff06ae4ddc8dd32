//! Structural invariants shared by the board, team boards and race snapshots.
use std::collections::HashSet;

use thiserror::Error;

use crate::board::{BoardDetails, Grid};

/// Errors raised when a loaded game violates a structural invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("board size must be at least 1")]
    EmptyBoard,
    #[error("team count must be at least 1")]
    NoTeams,
    #[error("team count {declared} does not match {actual} listed teams")]
    TeamCountMismatch { declared: usize, actual: usize },
    #[error("team name '{0}' is used more than once")]
    DuplicateTeamName(String),
    #[error("game ends before it starts")]
    EndBeforeStart,
    #[error("{grid} has {actual} rows, expected {expected}")]
    GridRows {
        grid: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{grid} row {row} has {actual} columns, expected {expected}")]
    GridColumns {
        grid: &'static str,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("team index {team} out of range for {team_count} teams")]
    TeamOutOfRange { team: usize, team_count: usize },
    #[error("team {0} has more than one board")]
    DuplicateTeamBoard(usize),
    #[error("race tracks {actual} teams, expected {expected}")]
    RaceTeamCount { expected: usize, actual: usize },
    #[error("tile {tile} out of range for {tile_count} tiles")]
    TileOutOfRange { tile: usize, tile_count: usize },
}

/// Check the configuration block on its own.
///
/// # Errors
///
/// Returns the first invariant the details violate.
pub fn validate_details(details: &BoardDetails) -> Result<(), ValidationError> {
    if details.board_size == 0 {
        return Err(ValidationError::EmptyBoard);
    }
    if details.team_count == 0 {
        return Err(ValidationError::NoTeams);
    }
    if details.teams.len() != details.team_count {
        return Err(ValidationError::TeamCountMismatch {
            declared: details.team_count,
            actual: details.teams.len(),
        });
    }
    if details.end_time < details.start_time {
        return Err(ValidationError::EndBeforeStart);
    }
    let mut seen = HashSet::with_capacity(details.teams.len());
    for team in &details.teams {
        if !seen.insert(team.name.as_str()) {
            return Err(ValidationError::DuplicateTeamName(team.name.clone()));
        }
    }
    Ok(())
}

/// Check that `grid` is `size × size`.
///
/// # Errors
///
/// Returns [`ValidationError::GridRows`] or [`ValidationError::GridColumns`]
/// naming `label` as the offending grid.
pub fn validate_grid<T>(
    label: &'static str,
    grid: &Grid<T>,
    size: usize,
) -> Result<(), ValidationError> {
    if grid.len() != size {
        return Err(ValidationError::GridRows {
            grid: label,
            expected: size,
            actual: grid.len(),
        });
    }
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != size {
            return Err(ValidationError::GridColumns {
                grid: label,
                row,
                expected: size,
                actual: cells.len(),
            });
        }
    }
    Ok(())
}

/// Check a team index against the configured team count.
///
/// # Errors
///
/// Returns [`ValidationError::TeamOutOfRange`] when `team` is not a valid index.
pub const fn validate_team_index(team: usize, team_count: usize) -> Result<(), ValidationError> {
    if team < team_count {
        Ok(())
    } else {
        Err(ValidationError::TeamOutOfRange { team, team_count })
    }
}
