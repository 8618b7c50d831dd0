//! The ordered rule set. Each rule is a pure function from a graph view to the
//! violations it finds.

use super::error::Violation;
use crate::analysis::GraphView;
use typing::check_endpoint_types;

pub(crate) mod endpoints;
pub(crate) mod functional;
pub(crate) mod membership;
pub(crate) mod typing;

/// The cross-referential rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Every edge's source and target exist in the node mapping.
    EdgeEndpointsExist,
    /// Every process, product and elementary flow `belongs_to` a project or product system.
    MembershipClosure,
    /// Every process touches at least one functional technosphere edge.
    FunctionalCoverage,
    /// Biosphere edges link a process and an elementary flow, either way round.
    BiosphereEndpoints,
    /// Weighting edges run from a weighting to a normalization or impact category.
    WeightingEndpoints,
    /// Normalization edges run from an elementary flow to a normalization.
    NormalizationEndpoints,
    /// Characterization edges run from an elementary flow to an impact category.
    CharacterizationEndpoints,
    /// Technosphere edges declare `functional` explicitly.
    FunctionalityDeclared,
    /// Technosphere edges link a process and a product, either way round.
    TechnosphereEndpoints,
}

impl Rule {
    pub const ALL: [Rule; 9] = [
        Rule::EdgeEndpointsExist,
        Rule::MembershipClosure,
        Rule::FunctionalCoverage,
        Rule::BiosphereEndpoints,
        Rule::WeightingEndpoints,
        Rule::NormalizationEndpoints,
        Rule::CharacterizationEndpoints,
        Rule::FunctionalityDeclared,
        Rule::TechnosphereEndpoints,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::EdgeEndpointsExist => "edge_endpoints_exist",
            Rule::MembershipClosure => "membership_closure",
            Rule::FunctionalCoverage => "functional_coverage",
            Rule::BiosphereEndpoints => "biosphere_endpoints",
            Rule::WeightingEndpoints => "weighting_endpoints",
            Rule::NormalizationEndpoints => "normalization_endpoints",
            Rule::CharacterizationEndpoints => "characterization_endpoints",
            Rule::FunctionalityDeclared => "functionality_declared",
            Rule::TechnosphereEndpoints => "technosphere_endpoints",
        }
    }

    pub(crate) fn check(self, view: &GraphView<'_>) -> Vec<Violation> {
        match self {
            Rule::EdgeEndpointsExist => endpoints::check_endpoints_exist(view),
            Rule::MembershipClosure => membership::check_membership(view),
            Rule::FunctionalCoverage => functional::check_functional_coverage(view),
            Rule::BiosphereEndpoints => check_endpoint_types(view, &typing::BIOSPHERE),
            Rule::WeightingEndpoints => check_endpoint_types(view, &typing::WEIGHTING),
            Rule::NormalizationEndpoints => check_endpoint_types(view, &typing::NORMALIZATION),
            Rule::CharacterizationEndpoints => {
                check_endpoint_types(view, &typing::CHARACTERIZATION)
            }
            Rule::FunctionalityDeclared => functional::check_functionality_declared(view),
            Rule::TechnosphereEndpoints => check_endpoint_types(view, &typing::TECHNOSPHERE),
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
