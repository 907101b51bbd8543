//! Path data handling: rounding, normalization, icon fitting

pub mod icon;
pub mod number;
pub mod path;

pub use icon::icon_path;
pub use number::{format_number, round_literal, round_value};
pub use path::{normalize_path, normalize_source, PathError, PathSource};
