//! Consistency checks over a [`Model`](ddd_diagram_core::semantic::Model).
//!
//! The [`Validator`] runs the fourteen rules of the [`rules`] module in
//! catalogue order and collects their findings into a [`ValidationReport`].
//! Data problems never abort validation; they only become [`Issue`]s.
//!
//! # Example
//!
//! ```
//! use ddd_diagram::semantic::{Model, Node};
//! use ddd_diagram::validate::{IssueCode, Validator};
//!
//! let mut model = Model::new("Sales");
//! model.add_node(Node::new("1".into()).with_name("Order"));
//!
//! let report = Validator::new().validate(&model);
//! assert!(!report.valid());
//! assert_eq!(report.issues()[0].code(), IssueCode::MissingDddType);
//! ```

mod code;
mod engine;
mod issue;
mod report;
pub mod rules;
mod severity;

pub use code::{IssueCode, RuleId};
pub use engine::Validator;
pub use issue::Issue;
pub use report::{Summary, ValidationReport};
pub use rules::Rule;
pub use severity::Severity;
