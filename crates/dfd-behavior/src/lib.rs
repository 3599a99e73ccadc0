//! DFD Behavior Analysis
//!
//! Validation and rename refactoring of the behavior text attached to DFD
//! output ports.
//!
//! # Overview
//!
//! - **BehaviorValidator**: checks `forward` / `set` statements against the
//!   port's available inputs and the label-type catalog, returning
//!   [`Diagnostic`]s with exact column spans
//! - **BehaviorRefactorer**: rewrites behavior text after label type, label
//!   value or input renames
//! - **propagate**: applies both to a [`dfd_model::DataFlowGraph`]
//!
//! # Example
//!
//! ```rust
//! use dfd_behavior::{BehaviorRefactorer, BehaviorValidator, StaticContext};
//! use dfd_model::{AvailableInputs, LabelType, LabelTypeCatalog};
//!
//! let catalog = LabelTypeCatalog::from_types(vec![
//!     LabelType::new("Sensitivity").with_value("High"),
//! ])
//! .unwrap();
//! let context = StaticContext::new(AvailableInputs::from_names(["a"]), Some(&catalog));
//!
//! let validator = BehaviorValidator::new();
//! let text = "set Sensitivity.High = a.Sensitivity.High";
//! assert!(validator.validate(text, &context).unwrap().is_empty());
//!
//! let renamed = BehaviorRefactorer::new().apply_input_rename(text, "a", "b");
//! assert_eq!(renamed, "set Sensitivity.High = b.Sensitivity.High");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod error;
pub mod propagate;
pub mod refactor;
mod scan;
pub mod validator;

// Re-exports
pub use config::{CatalogPolicy, ValidatorConfig};
pub use context::{GraphContext, PortContext, StaticContext};
pub use diagnostic::{Diagnostic, DiagnosticKind, StatementKind};
pub use error::{BehaviorError, BehaviorResult};
pub use propagate::{propagate_input_rename, propagate_label_renames};
pub use refactor::{BehaviorRefactorer, BehaviorUpdate};
pub use validator::BehaviorValidator;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for behavior analysis
    pub use crate::{
        BehaviorError, BehaviorRefactorer, BehaviorValidator, Diagnostic, DiagnosticKind, GraphContext,
        PortContext, StaticContext, ValidatorConfig,
    };
    pub use dfd_model::{AvailableInputs, InputRename, LabelRenames, LabelTypeCatalog};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
