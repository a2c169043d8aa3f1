//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! indent = 2              # Spaces per nesting level
//! line_ending = "crlf"    # "crlf" or "lf"
//! bom = true              # Prefix written files with a UTF-8 BOM
//! ```

use serde::{Deserialize, Serialize};

use crate::project::LineEnding;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub indent: usize,
    pub line_ending: LineEnding,
    pub bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            line_ending: LineEnding::Crlf,
            bom: true,
        }
    }
}
