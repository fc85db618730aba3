//! Semantic diagram model types.
//!
//! This module contains the typed domain-modeling graph built from the raw
//! cells of one diagram page. The graph is read-only once built: validation
//! rules only ever see it through `&Model`.
//!
//! # Pipeline Position
//!
//! ```text
//! draw.io XML
//!     ↓ reader
//! Raw cells (cell::Cell)
//!     ↓ normalize + build
//! Semantic Model (these types) - tagged nodes and edges
//!     ↓ validate
//! Validation Report
//! ```
//!
//! # Organization
//!
//! - [`element`] - Graph elements: [`Node`], [`Edge`]
//! - [`model`] - The graph itself: [`Model`], [`ModelStats`]

pub mod element;
pub mod model;

pub use element::*;
pub use model::*;
