//! In-process model of the page the widget lives in.
//!
//! - [`SelectElement`]: the native selection control whose entries carry
//!   the authoritative `selected` flags
//! - [`Document`]: element lookup, `<label for>` elements, forms and the
//!   page-level click stream
//! - [`ViewTree`]: the arena holding the widget's rendered nodes

mod control;
mod document;
mod tree;

pub use control::{
    ControlChild, ControlEntry, ControlEvent, EntryKey, EventOrigin, OptGroup, OptionEntry,
    SelectElement, dataset_key,
};
pub use document::{ClickTarget, Document, Element};
pub use tree::{NodeId, ViewNode, ViewTree};
