//! Configuration section definitions.
//!
//! Each module corresponds to a section in `pkgref.toml`:
//!
//! | Module      | TOML Section   | Purpose                                  |
//! |-------------|----------------|------------------------------------------|
//! | `project`   | `[project]`    | Namespace, SDK and framework markers     |
//! | `rules`     | `[rules]`      | Pruning markers, extensions, denylists   |
//! | `discovery` | `[discovery]`  | Project extension and manifest file name |
//! | `output`    | `[output]`     | Indentation, line endings, BOM           |

mod discovery;
mod output;
mod project;
mod rules;

pub use discovery::DiscoveryConfig;
pub use output::OutputConfig;
pub use project::ProjectConfig;
pub use rules::RulesConfig;
