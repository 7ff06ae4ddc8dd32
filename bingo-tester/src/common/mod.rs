pub mod scenario;
pub mod util;

pub use util::{read_text, split_csv};
