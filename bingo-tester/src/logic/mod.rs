pub mod assets;
pub mod reports;
pub mod seeds;
pub mod tester;

pub use assets::TesterAssets;
pub use seeds::{SeedInfo, resolve_seed_inputs};
pub use tester::*;
