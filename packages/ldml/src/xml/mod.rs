//! XML building blocks: canonical order table, arena tree, parsing,
//! serialization and read helpers for parsed documents.

mod order;
mod parse;
mod serialize;
mod tree;
mod utils;

pub use order::CanonicalOrderTable;
pub use parse::parse_tree;
pub use serialize::to_xml_string;
pub use tree::{ElementTemplate, NodeId, NodeRef, QName, XmlTree};
pub use utils::{
    element_children, find_by_path, find_child, find_child_with_attribute, find_children,
    get_attribute, get_tag_name, get_text, has_tag, non_blank_text,
};
