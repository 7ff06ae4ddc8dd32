//! Centralized tuning constants for bingo game logic.
//!
//! Defaults here are what a [`crate::BingoConfig`] falls back to when a JSON
//! config leaves a field out.

// Race mode ----------------------------------------------------------------
pub const DEFAULT_DIE_SIDES: u32 = 6;
pub const DEFAULT_MAX_RACE_TURNS: u32 = 500;
pub(crate) const RACE_SEED_DOMAIN: &[u8] = b"BINGO-RACE-";

// Roster -------------------------------------------------------------------
pub const DEFAULT_ROSTER_MAX_AGE_MINUTES: i64 = 360;
pub(crate) const DEFAULT_MEMBER_ROLE: &str = "member";
