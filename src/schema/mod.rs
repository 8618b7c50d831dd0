//! Type dispatch: which concrete variant a tagged entity is built as.
pub mod kinds;
pub mod registry;

pub use kinds::{EdgeKind, NodeKind};
pub use registry::Registry;
