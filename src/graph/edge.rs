//! Defines the `Edge` variants: qualitative membership links and quantitative flows.

use super::attrs::{Comment, DataSource};
use super::fields::{DumpOptions, Dumper, EntityError, FieldReader, JsonMap, OpenFields, Real, Tag};
use super::identifier::Identifier;
use crate::schema::EdgeKind;
use std::fmt;

/// Attributes every edge carries. Endpoints are plain identifiers, resolved
/// through the graph's node mapping only at validation time.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeHeader {
    pub edge_type: String,
    pub source: Identifier,
    pub target: Identifier,
    pub comment: Option<Comment>,
    pub references: Option<Vec<DataSource>>,
    pub tags: Option<JsonMap>,
    pub properties: Option<JsonMap>,
    pub open: OpenFields,
}

impl EdgeHeader {
    fn read(r: &mut FieldReader, tag: Tag) -> Option<Self> {
        let edge_type = r.tag("edge_type", tag);
        let source = r.required("source");
        let target = r.required("target");
        let comment = r.optional("comment");
        let references = r.optional("references");
        let tags = r.optional("tags");
        let properties = r.optional("properties");
        Some(Self {
            edge_type: edge_type?,
            source: source?,
            target: target?,
            comment: comment?,
            references: references?,
            tags: tags?,
            properties: properties?,
            open: OpenFields::default(),
        })
    }

    fn attach(mut self, open: OpenFields) -> Self {
        self.open = open;
        self
    }

    fn dumper<'a>(&'a self, opts: &'a DumpOptions) -> Dumper<'a> {
        let mut d = Dumper::new(&self.open, opts);
        d.tag("edge_type", &self.edge_type)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("comment", &self.comment)
            .field("references", &self.references)
            .field("tags", &self.tags)
            .field("properties", &self.properties);
        d
    }
}

/// Optional uncertainty distribution of an amount. The fields are independent
/// and not checked against each other here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Uncertainty {
    pub uncertainty_type: Option<i64>,
    pub loc: Option<Real>,
    pub scale: Option<Real>,
    pub shape: Option<Real>,
    pub minimum: Option<Real>,
    pub maximum: Option<Real>,
    pub negative: Option<bool>,
}

impl Uncertainty {
    fn read(r: &mut FieldReader) -> Option<Self> {
        let uncertainty_type = r.optional("uncertainty_type");
        let loc = r.optional("loc");
        let scale = r.optional("scale");
        let shape = r.optional("shape");
        let minimum = r.optional("minimum");
        let maximum = r.optional("maximum");
        let negative = r.optional("negative");
        Some(Self {
            uncertainty_type: uncertainty_type?,
            loc: loc?,
            scale: scale?,
            shape: shape?,
            minimum: minimum?,
            maximum: maximum?,
            negative: negative?,
        })
    }

    fn dump_into(&self, d: &mut Dumper<'_>) {
        d.field("uncertainty_type", &self.uncertainty_type)
            .field("loc", &self.loc)
            .field("scale", &self.scale)
            .field("shape", &self.shape)
            .field("minimum", &self.minimum)
            .field("maximum", &self.maximum)
            .field("negative", &self.negative);
    }
}

/// A structural relationship such as `belongs_to`: the source is a member of
/// the target. Also used for edges of custom types.
#[derive(Debug, Clone, PartialEq)]
pub struct QualitativeEdge {
    pub header: EdgeHeader,
}

impl QualitativeEdge {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        Self::read("QualitativeEdge", fields, Tag::Fixed("belongs_to"))
    }

    fn read(entity: &'static str, fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new(entity, fields);
        let header = EdgeHeader::read(&mut r, tag);
        r.finish(|open| Some(Self { header: header?.attach(open) }))
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        self.header.dumper(opts).finish()
    }
}

/// A flow between two nodes, with an amount and an optional uncertainty.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitativeEdge {
    pub header: EdgeHeader,
    pub amount: Real,
    pub uncertainty: Uncertainty,
}

impl QuantitativeEdge {
    fn read_parts(r: &mut FieldReader, tag: Tag) -> Option<Self> {
        let header = EdgeHeader::read(r, tag);
        let amount = r.required("amount");
        let uncertainty = Uncertainty::read(r);
        Some(Self { header: header?, amount: amount?, uncertainty: uncertainty? })
    }

    fn read(entity: &'static str, fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new(entity, fields);
        let flow = Self::read_parts(&mut r, tag);
        r.finish(|open| flow.map(|f| f.attach(open)))
    }

    /// Biosphere flows may never declare `functional`, not even as `false`.
    fn read_biosphere(fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new(EdgeKind::Biosphere.entity_name(), fields);
        r.forbid("functional", "biosphere edges can never be functional");
        let flow = Self::read_parts(&mut r, tag);
        r.finish(|open| flow.map(|f| f.attach(open)))
    }

    fn attach(mut self, open: OpenFields) -> Self {
        self.header.open = open;
        self
    }

    fn dumper<'a>(&'a self, opts: &'a DumpOptions) -> Dumper<'a> {
        let mut d = self.header.dumper(opts);
        d.field("amount", &self.amount);
        self.uncertainty.dump_into(&mut d);
        d
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        self.dumper(opts).finish()
    }
}

/// A flow between a process and a product. `functional` marks the process's
/// reference output; it has no implicit default.
#[derive(Debug, Clone, PartialEq)]
pub struct TechnosphereEdge {
    pub flow: QuantitativeEdge,
    pub functional: Option<bool>,
}

impl TechnosphereEdge {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        Self::read(fields, Tag::Fixed("technosphere"))
    }

    fn read(fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new(EdgeKind::Technosphere.entity_name(), fields);
        let flow = QuantitativeEdge::read_parts(&mut r, tag);
        let functional = r.non_null("functional");
        r.finish(|open| Some(Self { flow: flow?.attach(open), functional: functional? }))
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.flow.dumper(opts);
        d.field("functional", &self.functional);
        d.finish()
    }
}

/// A characterization factor linking an elementary flow to an impact category,
/// optionally regionalized.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterizationEdge {
    pub flow: QuantitativeEdge,
    pub location: Option<String>,
}

impl CharacterizationEdge {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        Self::read(fields, Tag::Fixed("characterization"))
    }

    fn read(fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new(EdgeKind::Characterization.entity_name(), fields);
        let flow = QuantitativeEdge::read_parts(&mut r, tag);
        let location = r.optional("location");
        r.finish(|open| Some(Self { flow: flow?.attach(open), location: location? }))
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.flow.dumper(opts);
        d.field("location", &self.location);
        d.finish()
    }
}

/// A typed edge of the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    BelongsTo(QualitativeEdge),
    Technosphere(TechnosphereEdge),
    Biosphere(QuantitativeEdge),
    Characterization(CharacterizationEdge),
    Normalization(QuantitativeEdge),
    Weighting(QuantitativeEdge),
    Generic(QualitativeEdge),
}

impl Edge {
    /// Builds `kind` from an untyped field mapping, checking `edge_type`
    /// against the variant's canonical tag (and defaulting it when absent).
    pub fn from_fields(kind: EdgeKind, fields: JsonMap) -> Result<Self, EntityError> {
        Self::build(kind, fields, kind.tag().map_or(Tag::Dispatched, Tag::Fixed))
    }

    pub(crate) fn dispatched(kind: EdgeKind, fields: JsonMap) -> Result<Self, EntityError> {
        Self::build(kind, fields, Tag::Dispatched)
    }

    fn build(kind: EdgeKind, fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let entity = kind.entity_name();
        match kind {
            EdgeKind::BelongsTo => QualitativeEdge::read(entity, fields, tag).map(Edge::BelongsTo),
            EdgeKind::Technosphere => TechnosphereEdge::read(fields, tag).map(Edge::Technosphere),
            EdgeKind::Biosphere => {
                QuantitativeEdge::read_biosphere(fields, tag).map(Edge::Biosphere)
            }
            EdgeKind::Characterization => {
                CharacterizationEdge::read(fields, tag).map(Edge::Characterization)
            }
            EdgeKind::Normalization => {
                QuantitativeEdge::read(entity, fields, tag).map(Edge::Normalization)
            }
            EdgeKind::Weighting => QuantitativeEdge::read(entity, fields, tag).map(Edge::Weighting),
            EdgeKind::Generic => {
                QualitativeEdge::read(entity, fields, Tag::Dispatched).map(Edge::Generic)
            }
        }
    }

    pub fn kind(&self) -> EdgeKind {
        match self {
            Edge::BelongsTo(_) => EdgeKind::BelongsTo,
            Edge::Technosphere(_) => EdgeKind::Technosphere,
            Edge::Biosphere(_) => EdgeKind::Biosphere,
            Edge::Characterization(_) => EdgeKind::Characterization,
            Edge::Normalization(_) => EdgeKind::Normalization,
            Edge::Weighting(_) => EdgeKind::Weighting,
            Edge::Generic(_) => EdgeKind::Generic,
        }
    }

    pub fn header(&self) -> &EdgeHeader {
        match self {
            Edge::BelongsTo(e) | Edge::Generic(e) => &e.header,
            Edge::Technosphere(e) => &e.flow.header,
            Edge::Characterization(e) => &e.flow.header,
            Edge::Biosphere(e) | Edge::Normalization(e) | Edge::Weighting(e) => &e.header,
        }
    }

    pub fn source(&self) -> &Identifier {
        &self.header().source
    }

    pub fn target(&self) -> &Identifier {
        &self.header().target
    }

    pub fn edge_type(&self) -> &str {
        &self.header().edge_type
    }

    /// The quantitative part, if this is a flow.
    pub fn flow(&self) -> Option<&QuantitativeEdge> {
        match self {
            Edge::Technosphere(e) => Some(&e.flow),
            Edge::Characterization(e) => Some(&e.flow),
            Edge::Biosphere(e) | Edge::Normalization(e) | Edge::Weighting(e) => Some(e),
            Edge::BelongsTo(_) | Edge::Generic(_) => None,
        }
    }

    pub fn amount(&self) -> Option<f64> {
        self.flow().map(|f| f.amount.value())
    }

    /// The declared functionality of a technosphere edge. `None` for every
    /// other variant, and for technosphere edges that left it undeclared.
    pub fn functional(&self) -> Option<bool> {
        match self {
            Edge::Technosphere(e) => e.functional,
            _ => None,
        }
    }

    pub fn extra(&self) -> &JsonMap {
        &self.header().open.extra
    }

    pub fn dump(&self, opts: &DumpOptions) -> JsonMap {
        match self {
            Edge::BelongsTo(e) | Edge::Generic(e) => e.dump(opts),
            Edge::Technosphere(e) => e.dump(opts),
            Edge::Characterization(e) => e.dump(opts),
            Edge::Biosphere(e) | Edge::Normalization(e) | Edge::Weighting(e) => e.dump(opts),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} edge {} -> {}", self.edge_type(), self.source(), self.target())
    }
}
