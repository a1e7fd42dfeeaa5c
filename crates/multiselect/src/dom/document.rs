//! The page hosting selection controls.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use multiselect_core::Signal;
use multiselect_core::logging::targets;
use parking_lot::RwLock;

use super::control::{ControlEvent, SelectElement};
use super::tree::NodeId;
use crate::error::{Error, Result};
use crate::widget::WidgetId;

/// An element registered in a [`Document`].
#[derive(Debug, Clone)]
pub enum Element {
    /// A selection control.
    Select(Arc<SelectElement>),
    /// Any other element, known only by its tag.
    Other {
        /// Element tag, e.g. `"input"`.
        tag: String,
    },
}

impl Element {
    /// The element tag.
    pub fn tag(&self) -> &str {
        match self {
            Element::Select(_) => "select",
            Element::Other { tag } => tag,
        }
    }
}

/// Where a page-level click landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    /// A node rendered by a widget.
    Node {
        /// The widget owning the view tree.
        widget: WidgetId,
        /// The clicked node.
        node: NodeId,
    },
    /// A `<label for=...>`.
    Label {
        /// The `for` attribute.
        for_id: String,
    },
    /// An element registered in the document (e.g. a control itself).
    Element {
        /// The element id.
        id: String,
    },
    /// Anywhere else on the page.
    Elsewhere,
}

/// Element registry, labels, forms and the page-level click stream.
#[derive(Debug, Default)]
pub struct Document {
    elements: RwLock<BTreeMap<String, Element>>,
    labels: RwLock<BTreeSet<String>>,
    /// Every click on the page, delivered to all listeners.
    pub clicks: Signal<ClickTarget>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a selection control under its id, returning the shared
    /// handle.
    pub fn insert_select(&self, control: SelectElement) -> Arc<SelectElement> {
        let control = Arc::new(control);
        self.elements
            .write()
            .insert(control.id().to_string(), Element::Select(control.clone()));
        control
    }

    /// Register a non-select element.
    pub fn insert_element(&self, id: impl Into<String>, tag: impl Into<String>) {
        self.elements
            .write()
            .insert(id.into(), Element::Other { tag: tag.into() });
    }

    /// Look up an element by `"#id"` or bare `"id"`.
    pub fn get(&self, key: &str) -> Option<Element> {
        let id = key.strip_prefix('#').unwrap_or(key);
        self.elements.read().get(id).cloned()
    }

    /// Look up a selection control, failing when the key is unknown or
    /// names another kind of element.
    pub fn query_select(&self, key: &str) -> Result<Arc<SelectElement>> {
        match self.get(key) {
            Some(Element::Select(control)) => Ok(control),
            Some(other) => Err(Error::not_a_select(key, other.tag())),
            None => Err(Error::not_found(key)),
        }
    }

    /// Register a `<label for=for_id>`.
    pub fn add_label(&self, for_id: impl Into<String>) {
        self.labels.write().insert(for_id.into());
    }

    /// Whether a label points at `for_id`.
    pub fn has_label_for(&self, for_id: &str) -> bool {
        self.labels.read().contains(for_id)
    }

    /// Deliver a click to every listener.
    pub fn click(&self, target: ClickTarget) {
        tracing::trace!(target: targets::CONTROL, ?target, "document click");
        self.clicks.emit(target);
    }

    /// Reset a form: every control belonging to `form_id` returns to its
    /// native default flags and receives [`ControlEvent::FormReset`].
    ///
    /// Returns the number of controls reset.
    pub fn reset_form(&self, form_id: &str) -> usize {
        let controls: Vec<Arc<SelectElement>> = self
            .elements
            .read()
            .values()
            .filter_map(|element| match element {
                Element::Select(control) if control.form().as_deref() == Some(form_id) => {
                    Some(control.clone())
                }
                _ => None,
            })
            .collect();

        for control in &controls {
            control.reset_to_defaults();
            control.dispatch_event(ControlEvent::FormReset);
        }
        tracing::debug!(target: targets::CONTROL, form = form_id, count = controls.len(), "form reset");
        controls.len()
    }
}
