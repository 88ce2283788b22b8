pub mod cleaner;
pub mod config;
pub mod rpc;
pub mod submit;
pub mod tx;
pub mod utils;
pub mod wallet;

pub use cleaner::{CleanReport, Cleaner};
