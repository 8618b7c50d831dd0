//! Defines the `Node` variants of an LCA graph: organizational collections,
//! inventory objects, and impact assessment metadata.

use super::attrs::{Comment, DataSource};
use super::fields::{DumpOptions, Dumper, EntityError, FieldReader, JsonMap, OpenFields, Tag};
use crate::schema::NodeKind;

/// Attributes every node carries, whatever its variant.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeHeader {
    /// The tag the node was declared with. Usually the variant's canonical tag,
    /// but may be a registered alias or a custom type.
    pub node_type: String,
    /// A single string, or something more structured.
    pub comment: Option<Comment>,
    pub tags: Option<JsonMap>,
    pub open: OpenFields,
}

impl NodeHeader {
    fn read(r: &mut FieldReader, tag: Tag) -> Option<Self> {
        let node_type = r.tag("node_type", tag);
        let comment = r.optional("comment");
        let tags = r.optional("tags");
        Some(Self {
            node_type: node_type?,
            comment: comment?,
            tags: tags?,
            open: OpenFields::default(),
        })
    }

    fn attach(mut self, open: OpenFields) -> Self {
        self.open = open;
        self
    }

    fn dumper<'a>(&'a self, opts: &'a DumpOptions) -> Dumper<'a> {
        let mut d = Dumper::new(&self.open, opts);
        d.tag("node_type", &self.node_type)
            .field("comment", &self.comment)
            .field("tags", &self.tags);
        d
    }
}

/// Optional attributes shared by processes, products and elementary flows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryAttrs {
    pub references: Option<Vec<DataSource>>,
    /// Quantitative properties, possibly nested like `{"a": {"amount": 7}}`.
    pub properties: Option<JsonMap>,
}

impl InventoryAttrs {
    fn read(r: &mut FieldReader) -> Option<Self> {
        let references = r.optional("references");
        let properties = r.optional("properties");
        Some(Self { references: references?, properties: properties? })
    }

    fn dump_into(&self, d: &mut Dumper<'_>) {
        d.field("references", &self.references).field("properties", &self.properties);
    }
}

/// A set of product systems and impact assessment methods making up an
/// assessment project. Projects may link to other projects.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub header: NodeHeader,
    pub name: String,
    pub license: Option<String>,
}

impl Project {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        Self::read(fields, Tag::Fixed("project"))
    }

    fn read(fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new("Project", fields);
        let header = NodeHeader::read(&mut r, tag);
        let name = r.required("name");
        let license = r.optional("license");
        r.finish(|open| Some(Self { header: header?.attach(open), name: name?, license: license? }))
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.header.dumper(opts);
        d.field("name", &self.name).field("license", &self.license);
        d.finish()
    }
}

/// A licensed collection: a product system (a set of unit processes modelling
/// the life cycle of a product) or an impact assessment method (a set of impact
/// categories, normalizations and weightings).
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub header: NodeHeader,
    pub name: String,
    pub license: String,
    pub references: Option<Vec<DataSource>>,
}

impl Collection {
    fn read(entity: &'static str, fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new(entity, fields);
        let header = NodeHeader::read(&mut r, tag);
        let name = r.required("name");
        let license = r.required("license");
        let references = r.optional("references");
        r.finish(|open| {
            Some(Self {
                header: header?.attach(open),
                name: name?,
                license: license?,
                references: references?,
            })
        })
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.header.dumper(opts);
        d.field("name", &self.name)
            .field("license", &self.license)
            .field("references", &self.references);
        d.finish()
    }
}

/// The smallest element for which inputs and outputs are quantified. A process
/// may have several functional edges and still be a single process.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    pub header: NodeHeader,
    pub name: String,
    pub location: String,
    pub inventory: InventoryAttrs,
}

impl Process {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        Self::read(fields, Tag::Fixed("process"))
    }

    fn read(fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new("Process", fields);
        let header = NodeHeader::read(&mut r, tag);
        let name = r.required("name");
        let location = r.required("location");
        let inventory = InventoryAttrs::read(&mut r);
        r.finish(|open| {
            Some(Self {
                header: header?.attach(open),
                name: name?,
                location: location?,
                inventory: inventory?,
            })
        })
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.header.dumper(opts);
        d.field("name", &self.name).field("location", &self.location);
        self.inventory.dump_into(&mut d);
        d.finish()
    }
}

/// Any good or service. The unit is the default for every edge consuming or
/// producing the product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub header: NodeHeader,
    pub name: String,
    pub unit: String,
    pub location: Option<String>,
    pub inventory: InventoryAttrs,
}

impl Product {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        Self::read(fields, Tag::Fixed("product"))
    }

    fn read(fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new("Product", fields);
        let header = NodeHeader::read(&mut r, tag);
        let name = r.required("name");
        let unit = r.required("unit");
        let location = r.optional("location");
        let inventory = InventoryAttrs::read(&mut r);
        r.finish(|open| {
            Some(Self {
                header: header?.attach(open),
                name: name?,
                unit: unit?,
                location: location?,
                inventory: inventory?,
            })
        })
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.header.dumper(opts);
        d.field("name", &self.name).field("unit", &self.unit).field("location", &self.location);
        self.inventory.dump_into(&mut d);
        d.finish()
    }
}

/// A flow drawn from or released to the environment without human
/// transformation: a substance situated in a context such as `["air"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementaryFlow {
    pub header: NodeHeader,
    pub name: String,
    pub unit: String,
    pub context: Vec<String>,
    pub location: Option<String>,
    pub inventory: InventoryAttrs,
}

impl ElementaryFlow {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        Self::read(fields, Tag::Fixed("elementary_flow"))
    }

    fn read(fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new("ElementaryFlow", fields);
        let header = NodeHeader::read(&mut r, tag);
        let name = r.required("name");
        let unit = r.required("unit");
        let context = r.required("context");
        let location = r.optional("location");
        let inventory = InventoryAttrs::read(&mut r);
        r.finish(|open| {
            Some(Self {
                header: header?.attach(open),
                name: name?,
                unit: unit?,
                context: context?,
                location: location?,
                inventory: inventory?,
            })
        })
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.header.dumper(opts);
        d.field("name", &self.name)
            .field("unit", &self.unit)
            .field("context", &self.context)
            .field("location", &self.location);
        self.inventory.dump_into(&mut d);
        d.finish()
    }
}

/// Metadata for an impact category, a normalization set or a weighting set.
/// The name is a compound label such as `["IPCC", "100 years"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactNode {
    pub header: NodeHeader,
    pub name: Vec<String>,
    pub unit: String,
}

impl ImpactNode {
    fn read(entity: &'static str, fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let mut r = FieldReader::new(entity, fields);
        let header = NodeHeader::read(&mut r, tag);
        let name = r.required("name");
        let unit = r.required("unit");
        r.finish(|open| Some(Self { header: header?.attach(open), name: name?, unit: unit? }))
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.header.dumper(opts);
        d.field("name", &self.name).field("unit", &self.unit);
        d.finish()
    }
}

/// A node of a custom or unknown type, held only to the shared contract.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericNode {
    pub header: NodeHeader,
    pub name: String,
}

impl GenericNode {
    pub fn from_fields(fields: JsonMap) -> Result<Self, EntityError> {
        let mut r = FieldReader::new("Node", fields);
        let header = NodeHeader::read(&mut r, Tag::Dispatched);
        let name = r.required("name");
        r.finish(|open| Some(Self { header: header?.attach(open), name: name? }))
    }

    fn dump(&self, opts: &DumpOptions) -> JsonMap {
        let mut d = self.header.dumper(opts);
        d.field("name", &self.name);
        d.finish()
    }
}

/// A borrowed view of a node's name, which is plain text for most variants and
/// a compound label for impact metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeName<'a> {
    Text(&'a str),
    Compound(&'a [String]),
}

/// A typed node of the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Project(Project),
    ProductSystem(Collection),
    Process(Process),
    Product(Product),
    ElementaryFlow(ElementaryFlow),
    ImpactAssessmentMethod(Collection),
    ImpactCategory(ImpactNode),
    Normalization(ImpactNode),
    Weighting(ImpactNode),
    Generic(GenericNode),
}

impl Node {
    /// Builds `kind` from an untyped field mapping, checking `node_type`
    /// against the variant's canonical tag (and defaulting it when absent).
    pub fn from_fields(kind: NodeKind, fields: JsonMap) -> Result<Self, EntityError> {
        Self::build(kind, fields, kind.tag().map_or(Tag::Dispatched, Tag::Fixed))
    }

    /// Builds `kind` for a tag the registry already dispatched, so aliases are accepted.
    pub(crate) fn dispatched(kind: NodeKind, fields: JsonMap) -> Result<Self, EntityError> {
        Self::build(kind, fields, Tag::Dispatched)
    }

    fn build(kind: NodeKind, fields: JsonMap, tag: Tag) -> Result<Self, EntityError> {
        let entity = kind.entity_name();
        match kind {
            NodeKind::Project => Project::read(fields, tag).map(Node::Project),
            NodeKind::ProductSystem => {
                Collection::read(entity, fields, tag).map(Node::ProductSystem)
            }
            NodeKind::Process => Process::read(fields, tag).map(Node::Process),
            NodeKind::Product => Product::read(fields, tag).map(Node::Product),
            NodeKind::ElementaryFlow => ElementaryFlow::read(fields, tag).map(Node::ElementaryFlow),
            NodeKind::ImpactAssessmentMethod => {
                Collection::read(entity, fields, tag).map(Node::ImpactAssessmentMethod)
            }
            NodeKind::ImpactCategory => {
                ImpactNode::read(entity, fields, tag).map(Node::ImpactCategory)
            }
            NodeKind::Normalization => {
                ImpactNode::read(entity, fields, tag).map(Node::Normalization)
            }
            NodeKind::Weighting => ImpactNode::read(entity, fields, tag).map(Node::Weighting),
            NodeKind::Generic => GenericNode::from_fields(fields).map(Node::Generic),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Project(_) => NodeKind::Project,
            Node::ProductSystem(_) => NodeKind::ProductSystem,
            Node::Process(_) => NodeKind::Process,
            Node::Product(_) => NodeKind::Product,
            Node::ElementaryFlow(_) => NodeKind::ElementaryFlow,
            Node::ImpactAssessmentMethod(_) => NodeKind::ImpactAssessmentMethod,
            Node::ImpactCategory(_) => NodeKind::ImpactCategory,
            Node::Normalization(_) => NodeKind::Normalization,
            Node::Weighting(_) => NodeKind::Weighting,
            Node::Generic(_) => NodeKind::Generic,
        }
    }

    pub fn header(&self) -> &NodeHeader {
        match self {
            Node::Project(n) => &n.header,
            Node::ProductSystem(n) | Node::ImpactAssessmentMethod(n) => &n.header,
            Node::Process(n) => &n.header,
            Node::Product(n) => &n.header,
            Node::ElementaryFlow(n) => &n.header,
            Node::ImpactCategory(n) | Node::Normalization(n) | Node::Weighting(n) => &n.header,
            Node::Generic(n) => &n.header,
        }
    }

    pub fn node_type(&self) -> &str {
        &self.header().node_type
    }

    pub fn name(&self) -> NodeName<'_> {
        match self {
            Node::Project(n) => NodeName::Text(&n.name),
            Node::ProductSystem(n) | Node::ImpactAssessmentMethod(n) => NodeName::Text(&n.name),
            Node::Process(n) => NodeName::Text(&n.name),
            Node::Product(n) => NodeName::Text(&n.name),
            Node::ElementaryFlow(n) => NodeName::Text(&n.name),
            Node::ImpactCategory(n) | Node::Normalization(n) | Node::Weighting(n) => {
                NodeName::Compound(&n.name)
            }
            Node::Generic(n) => NodeName::Text(&n.name),
        }
    }

    /// The name as a single display string; compound names are joined with `" / "`.
    pub fn label(&self) -> String {
        match self.name() {
            NodeName::Text(s) => s.to_string(),
            NodeName::Compound(parts) => parts.join(" / "),
        }
    }

    /// Undeclared fields carried through from the input.
    pub fn extra(&self) -> &JsonMap {
        &self.header().open.extra
    }

    pub fn dump(&self, opts: &DumpOptions) -> JsonMap {
        match self {
            Node::Project(n) => n.dump(opts),
            Node::ProductSystem(n) | Node::ImpactAssessmentMethod(n) => n.dump(opts),
            Node::Process(n) => n.dump(opts),
            Node::Product(n) => n.dump(opts),
            Node::ElementaryFlow(n) => n.dump(opts),
            Node::ImpactCategory(n) | Node::Normalization(n) | Node::Weighting(n) => n.dump(opts),
            Node::Generic(n) => n.dump(opts),
        }
    }
}
