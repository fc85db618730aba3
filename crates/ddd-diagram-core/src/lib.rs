//! DDD Diagram Core Types and Definitions
//!
//! This crate provides the foundational types shared by the parser, the
//! validator and the command-line tool. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Cells**: Raw attributed cells as read from a diagram file ([`cell`] module)
//! - **Properties**: Normalized property bags with a closed value type ([`property`] module)
//! - **Vocabulary**: The modeling tags understood by the rules ([`vocabulary`] module)
//! - **Semantic**: Typed nodes, edges and the graph model ([`semantic`] module)

pub mod cell;
pub mod identifier;
pub mod property;
pub mod semantic;
pub mod vocabulary;
