pub mod config;
pub mod error;
pub mod types;

pub use config::CompilerConfig;
pub use error::{Diagnostic, MapError, Result};
pub use types::{Point, TerritoryId};
