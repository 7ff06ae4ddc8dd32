//! Bingo Game Model
//!
//! Platform-agnostic game state for team bingo boards and tile races.
//! This crate provides the board model, scoring, inspection and race logic
//! without UI or platform-specific dependencies.

pub mod board;
pub mod config;
pub mod constants;
pub mod game;
pub mod inspect;
pub mod members;
pub mod numbers;
pub mod race;
pub mod team_board;
pub mod tile;
pub mod validation;
pub mod wom;

use anyhow::Context;
use chrono::{DateTime, Utc};

// Re-export commonly used types
pub use board::{BoardDetails, GameType, Grid, Team, grid_matches, tile_number, tile_position};
pub use config::{BingoConfig, ConfigError, RaceConfig, RosterCachePolicy};
pub use game::{GameDetails, LeaderboardRow, SessionError};
pub use inspect::{InspectData, TeamTileCompletion};
pub use members::{Member, MembersStorage};
pub use race::{
    RaceDice, RaceError, TeamsOnTile, TileRaceMovement, TileRaceStandings, race_seed,
};
pub use team_board::{TeamBoard, assign_standings};
pub use tile::{FullTile, PositionedTile, TeamTile, Tile};
pub use validation::ValidationError;
pub use wom::{WomRawMembership, WomRawPlayer};

/// Trait for abstracting the external roster provider
/// Platform-specific implementations should provide this
pub trait RosterSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the group's current memberships
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be reached or answers garbage.
    fn fetch_memberships(&self) -> Result<Vec<WomRawMembership>, Self::Error>;
}

/// Trait for abstracting save/load operations
/// Platform-specific implementations should provide this
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save game state
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be saved.
    fn save_game(&self, save_name: &str, game: &GameDetails) -> Result<(), Self::Error>;

    /// Load game state
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<GameDetails>, Self::Error>;

    /// Delete saved game
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_game(&self, save_name: &str) -> Result<(), Self::Error>;

    /// Persist the cached roster snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save_roster(&self, roster: &MembersStorage) -> Result<(), Self::Error>;

    /// Load the cached roster snapshot, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    fn load_roster(&self) -> Result<Option<MembersStorage>, Self::Error>;
}

/// Main engine tying the model to a roster provider and a storage backend
pub struct BingoEngine<R, S>
where
    R: RosterSource,
    S: GameStorage,
{
    roster_source: R,
    storage: S,
    config: BingoConfig,
}

impl<R, S> BingoEngine<R, S>
where
    R: RosterSource,
    S: GameStorage,
{
    /// Create a new engine with the provided roster source, storage and config
    pub const fn new(roster_source: R, storage: S, config: BingoConfig) -> Self {
        Self {
            roster_source,
            storage,
            config,
        }
    }

    pub const fn config(&self) -> &BingoConfig {
        &self.config
    }

    /// Save a game
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be saved.
    pub fn save_game(&self, save_name: &str, game: &GameDetails) -> Result<(), S::Error> {
        self.storage.save_game(save_name, game)
    }

    /// Load a game and check its invariants
    ///
    /// # Errors
    ///
    /// Returns an error if the game cannot be loaded or fails validation.
    pub fn load_game(&self, save_name: &str) -> anyhow::Result<Option<GameDetails>> {
        let Some(game) = self
            .storage
            .load_game(save_name)
            .with_context(|| format!("loading game '{save_name}'"))?
        else {
            return Ok(None);
        };
        game.validate()
            .with_context(|| format!("game '{save_name}' is invalid"))?;
        Ok(Some(game))
    }

    /// Delete a saved game
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_game(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_game(save_name)
    }

    /// Roster snapshot, served from the cache while it is fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be read or written, or the
    /// provider fails when a refresh is needed.
    pub fn load_roster(&self, now: DateTime<Utc>) -> anyhow::Result<MembersStorage> {
        let cached = self
            .storage
            .load_roster()
            .context("reading cached roster")?;
        if let Some(roster) = cached {
            if !roster.is_stale(now, &self.config.roster) {
                log::debug!(
                    "roster cache hit: {} members, updated {}",
                    roster.len(),
                    roster.updated
                );
                return Ok(roster);
            }
            log::debug!("roster cache stale (updated {})", roster.updated);
        }

        let raw = self
            .roster_source
            .fetch_memberships()
            .context("fetching roster memberships")?;
        let roster = MembersStorage::from_wom(&raw, now);
        self.storage
            .save_roster(&roster)
            .context("caching roster")?;
        log::info!("roster refreshed: {} members", roster.len());
        Ok(roster)
    }

    /// Load the roster and attach it to `game`.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be loaded or the game already has one.
    pub fn populate_user_data(
        &self,
        game: &mut GameDetails,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        if game.user_data.is_some() {
            return Err(SessionError::AlreadyAttached("user data").into());
        }
        let roster = self.load_roster(now)?;
        game.attach_user_data(roster)?;
        Ok(())
    }

    /// Fresh race standings and the game's seeded dice.
    #[must_use]
    pub fn start_race(&self, game: &GameDetails) -> (TileRaceStandings, RaceDice) {
        let seed = race_seed(&game.details);
        log::debug!(
            "starting race for {} teams (seed {seed:#x})",
            game.details.team_count
        );
        (
            TileRaceStandings::new(game.details.team_count),
            RaceDice::new(seed, self.config.race.die_sides),
        )
    }
}
