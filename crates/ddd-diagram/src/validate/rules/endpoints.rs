//! R5 to R9: endpoint typing per relation.
//!
//! Each of these rules looks at the edges of one relation type and checks the
//! type of the source and target nodes against a short list of allowed types.
//! They share one table-driven implementation, [`EndpointRule`], with one
//! constructor per rule.
//!
//! Edges whose endpoints do not resolve are skipped.

use ddd_diagram_core::{
    semantic::{Edge, Model, Node},
    vocabulary::{DddType, RelationType},
};

use crate::validate::{
    Issue, IssueCode, Rule, RuleId, ValidationReport,
    rules::{endpoints, type_of},
};

/// Which end of an edge a check applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Source,
    Target,
}

impl End {
    fn pick<'a>(self, source: &'a Node, target: &'a Node) -> &'a Node {
        match self {
            End::Source => source,
            End::Target => target,
        }
    }
}

/// One endpoint constraint.
#[derive(Debug, Clone, Copy)]
struct EndpointCheck {
    end: End,
    allowed: &'static [DddType],
    code: IssueCode,
    /// Message text before `, found '<type>'`.
    expectation: &'static str,
}

impl EndpointCheck {
    const fn new(
        end: End,
        allowed: &'static [DddType],
        code: IssueCode,
        expectation: &'static str,
    ) -> Self {
        Self {
            end,
            allowed,
            code,
            expectation,
        }
    }

    fn check(&self, edge: &Edge, source: &Node, target: &Node, model: &Model) -> Option<Issue> {
        let node = self.end.pick(source, target);
        if node.kind().is_some_and(|kind| self.allowed.contains(&kind)) {
            return None;
        }

        let message = format!("{}, found '{}'", self.expectation, type_of(node));
        Some(Issue::new(self.code, message).for_edge(edge, model))
    }
}

const SERVICES: &[DddType] = &[DddType::ApplicationService, DddType::DomainService];

const COMPOSITION: &[EndpointCheck] = &[
    EndpointCheck::new(
        End::Source,
        &[DddType::AggregateRoot],
        IssueCode::InvalidCompositionSource,
        "Composition source must be aggregate_root",
    ),
    EndpointCheck::new(
        End::Target,
        &[DddType::Entity, DddType::ValueObject],
        IssueCode::InvalidCompositionTarget,
        "Composition target must be entity or value_object",
    ),
];

const PUBLISHES_EVENT: &[EndpointCheck] = &[
    EndpointCheck::new(
        End::Source,
        &[DddType::AggregateRoot],
        IssueCode::InvalidPublishesSource,
        "Publishes event source must be aggregate_root",
    ),
    EndpointCheck::new(
        End::Target,
        &[DddType::DomainEvent],
        IssueCode::InvalidPublishesTarget,
        "Publishes event target must be domain_event",
    ),
];

const CONSUMES_EVENT: &[EndpointCheck] = &[
    EndpointCheck::new(
        End::Source,
        &[DddType::DomainEvent],
        IssueCode::InvalidConsumesSource,
        "Consumes event source must be domain_event",
    ),
    EndpointCheck::new(
        End::Target,
        SERVICES,
        IssueCode::InvalidConsumesTarget,
        "Consumes event target must be application_service or domain_service",
    ),
];

const REPOSITORY_ACCESS: &[EndpointCheck] = &[
    EndpointCheck::new(
        End::Source,
        SERVICES,
        IssueCode::InvalidRepositoryAccessSource,
        "Repository access source must be application_service or domain_service",
    ),
    EndpointCheck::new(
        End::Target,
        &[DddType::Repository],
        IssueCode::InvalidRepositoryAccessTarget,
        "Repository access target must be repository",
    ),
];

// The target is checked first; the source check only warns.
const INTEGRATION: &[EndpointCheck] = &[
    EndpointCheck::new(
        End::Target,
        &[DddType::ExternalSystem],
        IssueCode::InvalidIntegrationTarget,
        "Integration target must be external_system",
    ),
    EndpointCheck::new(
        End::Source,
        &[DddType::ApplicationService, DddType::BoundedContext],
        IssueCode::UnusualIntegrationSource,
        "Integration source is typically application_service or bounded_context",
    ),
];

/// Checks the endpoint types of every edge with a given relation type.
#[derive(Debug, Clone, Copy)]
pub struct EndpointRule {
    id: RuleId,
    relation: RelationType,
    checks: &'static [EndpointCheck],
}

impl EndpointRule {
    /// R5: composition goes from an aggregate root to an entity or value object.
    pub fn composition() -> Self {
        Self {
            id: RuleId::R5,
            relation: RelationType::Composition,
            checks: COMPOSITION,
        }
    }

    /// R6: an aggregate root publishes a domain event.
    pub fn publishes_event() -> Self {
        Self {
            id: RuleId::R6,
            relation: RelationType::PublishesEvent,
            checks: PUBLISHES_EVENT,
        }
    }

    /// R7: a domain event is consumed by a service.
    pub fn consumes_event() -> Self {
        Self {
            id: RuleId::R7,
            relation: RelationType::ConsumesEvent,
            checks: CONSUMES_EVENT,
        }
    }

    /// R8: a service accesses a repository.
    pub fn repository_access() -> Self {
        Self {
            id: RuleId::R8,
            relation: RelationType::RepositoryAccess,
            checks: REPOSITORY_ACCESS,
        }
    }

    /// R9: integration targets an external system.
    ///
    /// An unusual source only produces a warning.
    pub fn integration() -> Self {
        Self {
            id: RuleId::R9,
            relation: RelationType::Integration,
            checks: INTEGRATION,
        }
    }
}

impl Rule for EndpointRule {
    fn id(&self) -> RuleId {
        self.id
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        for edge in model.edges_by_type(self.relation) {
            let Some((source, target)) = endpoints(model, edge) else {
                continue;
            };

            report.extend(
                self.checks
                    .iter()
                    .filter_map(|check| check.check(edge, source, target, model)),
            );
        }
    }
}
