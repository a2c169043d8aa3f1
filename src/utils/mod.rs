//! Small helpers shared by the CLI driver.

pub mod path;
mod plural;

pub use plural::{plural_count, plural_s};
