//! CEP lookup module - two provider adapters raced against each other

pub mod error;
pub mod fetch;
pub mod parse;
pub mod race;
pub mod types;
pub mod utils;

pub use error::{LookupError, RaceError};
pub use race::{Draining, Race};
pub use types::*;
