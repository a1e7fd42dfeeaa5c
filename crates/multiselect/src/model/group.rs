//! The group entity.

use crate::dom::{NodeId, ViewTree};
use crate::render::MultiSelectRenderer;

use super::MultiSelectOption;

/// An ordered collection of options with a label.
///
/// Insertion order is render order and iteration order. Every widget has
/// exactly one *ungrouped* bucket (see [`MultiSelectGroup::ungrouped`])
/// holding the options that sit outside any `<optgroup>`.
#[derive(Debug, Clone, Default)]
pub struct MultiSelectGroup {
    label: String,
    html: Option<String>,
    values: Vec<MultiSelectOption>,
    ungrouped: bool,
    rendered: Option<NodeId>,
}

impl MultiSelectGroup {
    /// Create an empty labelled group.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Create the ungrouped bucket.
    pub fn ungrouped() -> Self {
        Self {
            ungrouped: true,
            ..Default::default()
        }
    }

    pub fn with_html(mut self, html: Option<String>) -> Self {
        self.html = html;
        self
    }

    pub fn with_values(mut self, values: impl IntoIterator<Item = MultiSelectOption>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    pub fn is_ungrouped(&self) -> bool {
        self.ungrouped
    }

    /// Options in insertion order.
    pub fn values(&self) -> &[MultiSelectOption] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [MultiSelectOption] {
        &mut self.values
    }

    pub fn add_value(&mut self, option: MultiSelectOption) {
        self.values.push(option);
    }

    /// Remove the option with `value`. Does nothing when absent.
    pub fn remove_value(&mut self, value: &str) -> Option<MultiSelectOption> {
        let index = self.values.iter().position(|option| option.value() == value)?;
        Some(self.values.remove(index))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build the group container with one row per option.
    ///
    /// Returns `None` for an empty group; nothing is created in that case.
    pub fn render(
        &mut self,
        tree: &mut ViewTree,
        renderer: &dyn MultiSelectRenderer,
        show_checkbox: bool,
    ) -> Option<NodeId> {
        if self.values.is_empty() {
            return None;
        }

        let label = if self.ungrouped {
            None
        } else {
            Some(self.html.as_deref().unwrap_or(&self.label))
        };
        let fragment = renderer.render_group(tree, label);

        for option in &mut self.values {
            let row = option.render(tree, renderer, show_checkbox);
            tree.append_child(fragment.list, row);
        }

        self.rendered = Some(fragment.container);
        self.rendered
    }

    /// The rendered container, once [`render`](Self::render) produced one.
    pub fn rendered(&self) -> Option<NodeId> {
        self.rendered
    }
}
