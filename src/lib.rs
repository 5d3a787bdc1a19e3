//! CEP race library: configuration plus the lookup adapters and their coordinator

pub mod config;
pub mod lookup;

pub use config::Config;
