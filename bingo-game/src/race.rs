//! Race mode: teams roll and advance along the linear tile order.
use std::hash::Hasher;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use twox_hash::XxHash64;

use crate::board::BoardDetails;
use crate::constants::RACE_SEED_DOMAIN;
use crate::numbers::{roll_to_usize, signed_delta};
use crate::validation::ValidationError;

/// Team indices sharing a tile. Rarely more than a handful.
pub type TeamsOnTile = SmallVec<[usize; 4]>;

/// Errors raised when a turn cannot be applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RaceError {
    #[error("race already has a winner")]
    Finished,
    #[error("expected {expected} rolls, got {actual}")]
    RollCount { expected: usize, actual: usize },
    #[error("team {team} rolled zero")]
    ZeroRoll { team: usize },
    #[error("team {team} is on tile {position}, past the final tile {final_tile}")]
    PastFinish {
        team: usize,
        position: usize,
        final_tile: usize,
    },
}

/// What happened to one team during the latest turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRaceMovement {
    pub team: usize,
    pub roll: u32,
    pub new_tile: usize,
    pub win: bool,
    /// Tiles actually moved; less than `roll` when clamped at the finish.
    pub tile_movement: i64,
}

/// Race snapshot: where every team stands and the latest turn's moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRaceStandings {
    /// Linear tile index per team; the vector index is the team id.
    pub team_positions: Vec<usize>,
    #[serde(default)]
    pub movements: Vec<TileRaceMovement>,
}

impl TileRaceStandings {
    #[must_use]
    pub fn new(team_count: usize) -> Self {
        Self {
            team_positions: vec![0; team_count],
            movements: Vec::new(),
        }
    }

    /// # Errors
    ///
    /// Returns the first position or movement that does not fit the game.
    pub fn validate(&self, team_count: usize, tile_count: usize) -> Result<(), ValidationError> {
        if self.team_positions.len() != team_count {
            return Err(ValidationError::RaceTeamCount {
                expected: team_count,
                actual: self.team_positions.len(),
            });
        }
        let tiles = self
            .team_positions
            .iter()
            .chain(self.movements.iter().map(|m| &m.new_tile));
        for &tile in tiles {
            if tile >= tile_count {
                return Err(ValidationError::TileOutOfRange { tile, tile_count });
            }
        }
        for movement in &self.movements {
            crate::validation::validate_team_index(movement.team, self.team_positions.len())?;
        }
        Ok(())
    }

    /// Apply one roll per team, in team order.
    ///
    /// # Errors
    ///
    /// Returns an error if the race is over, the roll count is wrong, a roll
    /// is zero, or a team already stands past `final_tile`.
    pub fn take_turn(
        &mut self,
        rolls: &[u32],
        final_tile: usize,
    ) -> Result<&[TileRaceMovement], RaceError> {
        if self.is_finished() {
            return Err(RaceError::Finished);
        }
        if rolls.len() != self.team_positions.len() {
            return Err(RaceError::RollCount {
                expected: self.team_positions.len(),
                actual: rolls.len(),
            });
        }
        if let Some(team) = rolls.iter().position(|&roll| roll == 0) {
            return Err(RaceError::ZeroRoll { team });
        }
        if let Some((team, &position)) = self
            .team_positions
            .iter()
            .enumerate()
            .find(|&(_, &position)| position > final_tile)
        {
            return Err(RaceError::PastFinish {
                team,
                position,
                final_tile,
            });
        }

        self.movements = rolls
            .iter()
            .zip(self.team_positions.iter_mut())
            .enumerate()
            .map(|(team, (&roll, position))| {
                let from = *position;
                let to = from.saturating_add(roll_to_usize(roll)).min(final_tile);
                *position = to;
                TileRaceMovement {
                    team,
                    roll,
                    new_tile: to,
                    win: to == final_tile,
                    tile_movement: signed_delta(from, to),
                }
            })
            .collect();
        Ok(&self.movements)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.movements.iter().any(|m| m.win)
    }

    #[must_use]
    pub fn winners(&self) -> Vec<usize> {
        self.movements
            .iter()
            .filter(|m| m.win)
            .map(|m| m.team)
            .collect()
    }

    /// Teams currently on `tile`, in ascending order.
    #[must_use]
    pub fn teams_on(&self, tile: usize) -> TeamsOnTile {
        self.team_positions
            .iter()
            .enumerate()
            .filter(|&(_, &position)| position == tile)
            .map(|(team, _)| team)
            .collect()
    }

    /// Furthest team; the lowest index wins ties.
    #[must_use]
    pub fn leader(&self) -> Option<usize> {
        let furthest = self.team_positions.iter().max()?;
        self.team_positions.iter().position(|p| p == furthest)
    }
}

/// Seeded die so a race can be replayed.
#[derive(Debug, Clone)]
pub struct RaceDice {
    rng: ChaCha20Rng,
    sides: u32,
}

impl RaceDice {
    #[must_use]
    pub fn new(seed: u64, sides: u32) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            sides: sides.max(1),
        }
    }

    #[must_use]
    pub const fn sides(&self) -> u32 {
        self.sides
    }

    pub fn roll(&mut self) -> u32 {
        self.rng.gen_range(1..=self.sides)
    }

    pub fn roll_all(&mut self, team_count: usize) -> Vec<u32> {
        (0..team_count).map(|_| self.roll()).collect()
    }
}

/// Stable seed for a game's race, derived from its start time and team names.
#[must_use]
pub fn race_seed(details: &BoardDetails) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(RACE_SEED_DOMAIN);
    hasher.write(&details.start_time.timestamp_millis().to_le_bytes());
    for team in &details.teams {
        hasher.write(team.name.as_bytes());
        hasher.write(&[0xA5]);
    }
    hasher.finish()
}
