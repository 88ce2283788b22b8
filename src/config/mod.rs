pub mod settings;

pub use settings::{parse_commitment, Settings};
