//! # doclint Test Utilities
//!
//! Shared test infrastructure for the doclint crates.

// Test utilities are less strict than production code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//!
//! ## Quick Start
//!
//! ```ignore
//! use doclint_test_utils::{documentation_before, position_of};
//!
//! let source = "/// <summary>S.</summary>\npublic class C { }\n";
//! let comment = documentation_before(source, "public class");
//! let name = position_of(source, "C {");
//! ```
//!
//! ## Modules
//!
//! - [`assertions`] - Snapshot formatting for diagnostics
//! - [`locate`] - Source positions from needles
//! - [`fixtures`] - Common source fixtures

pub mod assertions;
pub mod fixtures;
pub mod locate;

pub use assertions::{format_diagnostic_messages, format_diagnostics};
pub use fixtures::documentation_before;
pub use locate::{nth_position_of, position_of};

// Re-export insta for snapshot testing
pub use insta;
