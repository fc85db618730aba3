//! Rule identifiers and issue codes.
//!
//! Rules are organized in three phases:
//! - `R1`-`R3` - Basic correctness of individual nodes
//! - `R4`-`R10` - Relationship typing
//! - `R11`-`R14` - Domain-driven design constraints across the graph
//!
//! Every issue code belongs to exactly one rule and has a fixed severity.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::validate::Severity;

/// Identifier of one validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
}

impl RuleId {
    /// Every rule, in the order the engine runs them.
    pub const ALL: [RuleId; 14] = [
        RuleId::R1,
        RuleId::R2,
        RuleId::R3,
        RuleId::R4,
        RuleId::R5,
        RuleId::R6,
        RuleId::R7,
        RuleId::R8,
        RuleId::R9,
        RuleId::R10,
        RuleId::R11,
        RuleId::R12,
        RuleId::R13,
        RuleId::R14,
    ];

    /// Returns the rule id as a string (e.g., "R11").
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::R1 => "R1",
            RuleId::R2 => "R2",
            RuleId::R3 => "R3",
            RuleId::R4 => "R4",
            RuleId::R5 => "R5",
            RuleId::R6 => "R6",
            RuleId::R7 => "R7",
            RuleId::R8 => "R8",
            RuleId::R9 => "R9",
            RuleId::R10 => "R10",
            RuleId::R11 => "R11",
            RuleId::R12 => "R12",
            RuleId::R13 => "R13",
            RuleId::R14 => "R14",
        }
    }

    /// Returns a short description of what the rule checks.
    pub fn description(&self) -> &'static str {
        match self {
            RuleId::R1 => "every node has a type and a name",
            RuleId::R2 => "names are unique within their scope",
            RuleId::R3 => "required properties are present for each node type",
            RuleId::R4 => "every edge has a relation type",
            RuleId::R5 => "composition goes from an aggregate to an entity or value object",
            RuleId::R6 => "events are published by aggregates",
            RuleId::R7 => "events are consumed by services",
            RuleId::R8 => "repositories are accessed by services",
            RuleId::R9 => "integrations target external systems",
            RuleId::R10 => "uses targets an aggregate, service or repository",
            RuleId::R11 => "entities and value objects belong to an aggregate",
            RuleId::R12 => "aggregates belong to an existing bounded context",
            RuleId::R13 => "events belong to a context and have a single publisher",
            RuleId::R14 => "relationships respect bounded context boundaries",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RuleId {
    type Err = String;

    /// Parses `"R9"`; matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RuleId::ALL
            .into_iter()
            .find(|rule| rule.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown rule `{wanted}` (expected R1 to R14)"))
    }
}

/// Stable code of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    // =========================================================================
    // Basic correctness (R1-R3)
    // =========================================================================
    /// A node has no `ddd_type`.
    MissingDddType,
    /// A node has no `ddd_name`.
    MissingDddName,
    /// Two bounded contexts share a name.
    DuplicateBoundedContext,
    /// Two aggregates share a name within one bounded context.
    DuplicateAggregate,
    /// Two services share a name within one bounded context.
    DuplicateService,
    /// Two domain events share a name within one bounded context.
    DuplicateEvent,
    /// A property required for the node's type is missing or empty.
    MissingRequiredProperty,

    // =========================================================================
    // Relationship typing (R4-R10)
    // =========================================================================
    /// An edge has no `relation_type`.
    MissingRelationType,
    InvalidCompositionSource,
    InvalidCompositionTarget,
    InvalidPublishesSource,
    InvalidPublishesTarget,
    InvalidConsumesSource,
    InvalidConsumesTarget,
    InvalidRepositoryAccessSource,
    InvalidRepositoryAccessTarget,
    InvalidIntegrationTarget,
    /// Integration from something other than an application service or context.
    UnusualIntegrationSource,
    /// `uses` pointing at a value object or domain event.
    IllegalUsesTarget,
    /// `uses` pointing at something outside the recommended targets.
    UnusualUsesTarget,

    // =========================================================================
    // Domain constraints (R11-R14)
    // =========================================================================
    /// Neither an `aggregate` property nor an inbound composition.
    MissingAggregateOwnership,
    /// The `aggregate` property names no existing aggregate root.
    InvalidAggregateReference,
    /// `aggregate` property present, inbound composition missing.
    MissingCompositionEdge,
    /// Inbound composition present, `aggregate` property missing.
    MissingAggregateProperty,
    /// The `aggregate` property and the composing aggregate disagree.
    AggregateMismatch,
    /// An aggregate root without a `bounded_context`.
    AggregateMissingBoundedContext,
    /// An aggregate root naming a bounded context that does not exist.
    AggregateInvalidBoundedContext,
    /// A domain event without a `bounded_context`.
    EventMissingBoundedContext,
    /// A domain event naming a bounded context that does not exist.
    EventInvalidBoundedContext,
    /// No aggregate root publishes the event.
    EventNotPublished,
    /// More than one aggregate root publishes the event.
    MultipleEventPublishers,
    CrossContextComposition,
    CrossContextUses,
    CrossContextEvent,
    CrossContextRepository,
}

impl IssueCode {
    /// Returns the stable code string (e.g., "R1_MISSING_DDD_TYPE").
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::MissingDddType => "R1_MISSING_DDD_TYPE",
            IssueCode::MissingDddName => "R1_MISSING_DDD_NAME",
            IssueCode::DuplicateBoundedContext => "R2_DUPLICATE_BOUNDED_CONTEXT",
            IssueCode::DuplicateAggregate => "R2_DUPLICATE_AGGREGATE",
            IssueCode::DuplicateService => "R2_DUPLICATE_SERVICE",
            IssueCode::DuplicateEvent => "R2_DUPLICATE_EVENT",
            IssueCode::MissingRequiredProperty => "R3_MISSING_REQUIRED_PROPERTY",
            IssueCode::MissingRelationType => "R4_MISSING_RELATION_TYPE",
            IssueCode::InvalidCompositionSource => "R5_INVALID_COMPOSITION_SOURCE",
            IssueCode::InvalidCompositionTarget => "R5_INVALID_COMPOSITION_TARGET",
            IssueCode::InvalidPublishesSource => "R6_INVALID_PUBLISHES_SOURCE",
            IssueCode::InvalidPublishesTarget => "R6_INVALID_PUBLISHES_TARGET",
            IssueCode::InvalidConsumesSource => "R7_INVALID_CONSUMES_SOURCE",
            IssueCode::InvalidConsumesTarget => "R7_INVALID_CONSUMES_TARGET",
            IssueCode::InvalidRepositoryAccessSource => "R8_INVALID_REPOSITORY_ACCESS_SOURCE",
            IssueCode::InvalidRepositoryAccessTarget => "R8_INVALID_REPOSITORY_ACCESS_TARGET",
            IssueCode::InvalidIntegrationTarget => "R9_INVALID_INTEGRATION_TARGET",
            IssueCode::UnusualIntegrationSource => "R9_UNUSUAL_INTEGRATION_SOURCE",
            IssueCode::IllegalUsesTarget => "R10_ILLEGAL_USES_TARGET",
            IssueCode::UnusualUsesTarget => "R10_UNUSUAL_USES_TARGET",
            IssueCode::MissingAggregateOwnership => "R11_MISSING_AGGREGATE_OWNERSHIP",
            IssueCode::InvalidAggregateReference => "R11_INVALID_AGGREGATE_REFERENCE",
            IssueCode::MissingCompositionEdge => "R11_MISSING_COMPOSITION_EDGE",
            IssueCode::MissingAggregateProperty => "R11_MISSING_AGGREGATE_PROPERTY",
            IssueCode::AggregateMismatch => "R11_AGGREGATE_MISMATCH",
            IssueCode::AggregateMissingBoundedContext => "R12_MISSING_BOUNDED_CONTEXT",
            IssueCode::AggregateInvalidBoundedContext => "R12_INVALID_BOUNDED_CONTEXT",
            IssueCode::EventMissingBoundedContext => "R13_MISSING_BOUNDED_CONTEXT",
            IssueCode::EventInvalidBoundedContext => "R13_INVALID_BOUNDED_CONTEXT",
            IssueCode::EventNotPublished => "R13_EVENT_NOT_PUBLISHED",
            IssueCode::MultipleEventPublishers => "R13_MULTIPLE_EVENT_PUBLISHERS",
            IssueCode::CrossContextComposition => "R14_CROSS_CONTEXT_COMPOSITION",
            IssueCode::CrossContextUses => "R14_CROSS_CONTEXT_USES",
            IssueCode::CrossContextEvent => "R14_CROSS_CONTEXT_EVENT",
            IssueCode::CrossContextRepository => "R14_CROSS_CONTEXT_REPOSITORY",
        }
    }

    /// Returns the rule this code belongs to.
    pub fn rule(&self) -> RuleId {
        match self {
            IssueCode::MissingDddType | IssueCode::MissingDddName => RuleId::R1,
            IssueCode::DuplicateBoundedContext
            | IssueCode::DuplicateAggregate
            | IssueCode::DuplicateService
            | IssueCode::DuplicateEvent => RuleId::R2,
            IssueCode::MissingRequiredProperty => RuleId::R3,
            IssueCode::MissingRelationType => RuleId::R4,
            IssueCode::InvalidCompositionSource | IssueCode::InvalidCompositionTarget => RuleId::R5,
            IssueCode::InvalidPublishesSource | IssueCode::InvalidPublishesTarget => RuleId::R6,
            IssueCode::InvalidConsumesSource | IssueCode::InvalidConsumesTarget => RuleId::R7,
            IssueCode::InvalidRepositoryAccessSource | IssueCode::InvalidRepositoryAccessTarget => {
                RuleId::R8
            }
            IssueCode::InvalidIntegrationTarget | IssueCode::UnusualIntegrationSource => RuleId::R9,
            IssueCode::IllegalUsesTarget | IssueCode::UnusualUsesTarget => RuleId::R10,
            IssueCode::MissingAggregateOwnership
            | IssueCode::InvalidAggregateReference
            | IssueCode::MissingCompositionEdge
            | IssueCode::MissingAggregateProperty
            | IssueCode::AggregateMismatch => RuleId::R11,
            IssueCode::AggregateMissingBoundedContext | IssueCode::AggregateInvalidBoundedContext => {
                RuleId::R12
            }
            IssueCode::EventMissingBoundedContext
            | IssueCode::EventInvalidBoundedContext
            | IssueCode::EventNotPublished
            | IssueCode::MultipleEventPublishers => RuleId::R13,
            IssueCode::CrossContextComposition
            | IssueCode::CrossContextUses
            | IssueCode::CrossContextEvent
            | IssueCode::CrossContextRepository => RuleId::R14,
        }
    }

    /// Returns the fixed severity of issues with this code.
    pub fn severity(&self) -> Severity {
        match self {
            IssueCode::UnusualIntegrationSource
            | IssueCode::UnusualUsesTarget
            | IssueCode::MissingCompositionEdge
            | IssueCode::MissingAggregateProperty
            | IssueCode::AggregateMismatch
            | IssueCode::EventNotPublished
            | IssueCode::CrossContextUses
            | IssueCode::CrossContextEvent => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for IssueCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_id_from_str() {
        assert_eq!("R9".parse::<RuleId>(), Ok(RuleId::R9));
        assert_eq!(" r14 ".parse::<RuleId>(), Ok(RuleId::R14));
        assert!("R15".parse::<RuleId>().is_err());
        assert!("9".parse::<RuleId>().is_err());
    }

    #[test]
    fn test_rule_ids_are_ordered() {
        let mut sorted = RuleId::ALL;
        sorted.sort();
        assert_eq!(sorted, RuleId::ALL);
    }

    #[test]
    fn test_code_prefix_matches_rule() {
        let codes = [
            IssueCode::MissingDddName,
            IssueCode::DuplicateService,
            IssueCode::InvalidRepositoryAccessTarget,
            IssueCode::UnusualUsesTarget,
            IssueCode::AggregateInvalidBoundedContext,
            IssueCode::EventNotPublished,
            IssueCode::CrossContextRepository,
        ];
        for code in codes {
            let prefix = format!("{}_", code.rule());
            assert!(code.as_str().starts_with(&prefix), "{code}");
        }
    }

    #[test]
    fn test_severity_per_code() {
        assert_eq!(IssueCode::MissingDddType.severity(), Severity::Error);
        assert_eq!(IssueCode::UnusualIntegrationSource.severity(), Severity::Warning);
        assert_eq!(IssueCode::MultipleEventPublishers.severity(), Severity::Error);
        assert_eq!(IssueCode::CrossContextEvent.severity(), Severity::Warning);
        assert_eq!(IssueCode::CrossContextComposition.severity(), Severity::Error);
    }

    #[test]
    fn test_display() {
        assert_eq!(IssueCode::AggregateMismatch.to_string(), "R11_AGGREGATE_MISMATCH");
        assert_eq!(RuleId::R12.to_string(), "R12");
    }
}
