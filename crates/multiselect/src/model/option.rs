//! The option entity.

use crate::dom::{ControlEntry, NodeId, ViewTree};
use crate::render::{MultiSelectRenderer, OptionContext};

/// One selectable item.
///
/// The option does not store its selection state: [`is_selected`],
/// [`select`] and [`unselect`] read and write the mirrored control entry
/// directly, so the two can never disagree. No policy is applied here;
/// cardinality rules live in the engine.
///
/// [`is_selected`]: MultiSelectOption::is_selected
/// [`select`]: MultiSelectOption::select
/// [`unselect`]: MultiSelectOption::unselect
#[derive(Debug, Clone)]
pub struct MultiSelectOption {
    entry: ControlEntry,
    value: String,
    label: String,
    html: Option<String>,
    default_value: bool,
    rendered: Option<NodeId>,
    chip: Option<NodeId>,
}

impl MultiSelectOption {
    /// Create an option backed by `entry`, taking value, label and rich
    /// label from the control entry. The entry's current selection becomes
    /// the option's default.
    pub fn new(entry: ControlEntry) -> Self {
        let snapshot = entry.snapshot().unwrap_or_default();
        Self {
            entry,
            value: snapshot.value,
            label: snapshot.label,
            html: snapshot.html,
            default_value: snapshot.selected,
            rendered: None,
            chip: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_html(mut self, html: Option<String>) -> Self {
        self.html = html;
        self
    }

    pub fn with_default_value(mut self, default_value: bool) -> Self {
        self.default_value = default_value;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// What the option row and its chip show: the rich label, else the
    /// label, else the value.
    pub fn display_content(&self) -> &str {
        match self.html.as_deref() {
            Some(html) if !html.is_empty() => html,
            _ if !self.label.is_empty() => &self.label,
            _ => &self.value,
        }
    }

    /// The control entry this option mirrors.
    pub fn entry(&self) -> &ControlEntry {
        &self.entry
    }

    pub fn is_selected(&self) -> bool {
        self.entry.is_selected()
    }

    pub fn select(&self) {
        self.entry.set_selected(true);
    }

    pub fn unselect(&self) {
        self.entry.set_selected(false);
    }

    /// Whether the option is part of the default selection restored by
    /// reset.
    pub fn is_default_value(&self) -> bool {
        self.default_value
    }

    pub fn set_default_value(&mut self, default_value: bool) {
        self.default_value = default_value;
    }

    /// Build the option row and remember its handle.
    pub fn render(
        &mut self,
        tree: &mut ViewTree,
        renderer: &dyn MultiSelectRenderer,
        show_checkbox: bool,
    ) -> NodeId {
        let node = renderer.render_option(
            tree,
            &OptionContext {
                value: &self.value,
                content: self.display_content(),
                selected: self.is_selected(),
                show_checkbox,
            },
        );
        self.rendered = Some(node);
        node
    }

    /// The rendered row, once [`render`](Self::render) ran.
    pub fn rendered(&self) -> Option<NodeId> {
        self.rendered
    }

    pub(crate) fn chip(&self) -> Option<NodeId> {
        self.chip
    }

    pub(crate) fn set_chip(&mut self, chip: NodeId) {
        self.chip = Some(chip);
    }

    pub(crate) fn take_chip(&mut self) -> Option<NodeId> {
        self.chip.take()
    }
}
