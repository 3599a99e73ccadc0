//! DFD Behavior Linter
//!
//! Runs the behavior validator and refactorer over a project file, a JSON
//! description of a label-type catalog plus the output ports of a diagram:
//!
//! ```json
//! {
//!   "catalog": [{ "id": "t1", "name": "Sensitivity", "values": [{ "id": "v1", "text": "High" }] }],
//!   "ports": [{ "name": "process.out", "inputs": ["personal", null], "behavior": "forward personal" }]
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod project;
pub mod report;

pub use commands::{check, rename_input, rename_labels, CheckOutcome, RenameOutcome};
pub use config::LintConfig;
pub use project::{PortSpec, Project};
pub use report::{render_json, render_text, PortReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
