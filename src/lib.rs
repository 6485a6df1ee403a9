//! Xmlfill - Document Template Filler
//!
//! Fills XML document templates, such as the content of an OpenDocument
//! text file, with data. A template holds `{{Name}}` placeholders within its
//! paragraphs, and `{{#Name}}` ... `{{/Name}}` block markers in paragraphs of
//! their own. Blocks are repeated once per item of the list they name.
//!
//! ```
//! use serde_json::json;
//! use xmlfill::{fill, odf, Element, Node};
//!
//! let document: Node = Element::new(odf::office("text"))
//!     .with_child(Element::new(odf::text("p")).with_text("{{#List}}"))
//!     .with_child(Element::new(odf::text("p")).with_text("Item {{this}}"))
//!     .with_child(Element::new(odf::text("p")).with_text("{{/List}}"))
//!     .into();
//! let filled = fill(&document, &json!({"List": [1, 2]})).unwrap();
//!
//! assert_eq!(filled.children().len(), 2);
//! assert_eq!(filled.text_content(), "Item 1Item 2");
//! ```
mod engine;
mod log;
mod pipe;
mod region;
mod render;
mod scan;
mod store;
mod syntax;
mod tree;
pub mod xml;

pub use engine::Filler;
pub use log::{Error, Kind, Pointer, Visual};
pub use region::Region;
pub use render::fill;
pub use store::{Scope, Store, THIS};
pub use syntax::{Builder, Marker};
pub use tree::{
    assert_tree_eq, compare, odf, Attribute, Attributes, Element, Mismatch, Node, QualifiedName,
    Snapshot,
};
