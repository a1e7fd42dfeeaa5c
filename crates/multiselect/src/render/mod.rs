//! Fragment construction for the widget's view.
//!
//! A [`MultiSelectRenderer`] builds the nodes of the dropdown inside a
//! [`ViewTree`]: the root and header, group containers, option rows,
//! header chips, the placeholder and the count summary. The engine owns the
//! tree and decides *when* fragments are created, attached and removed;
//! the renderer only decides *what* they look like.
//!
//! [`DefaultRenderer`] produces the stock markup using the class names in
//! [`classes`].

use multiselect_core::logging::targets;

use crate::config::Translations;
use crate::dom::{NodeId, ViewTree};

/// Class names used by the stock markup.
pub mod classes {
    pub const ROOT: &str = "multiselect";
    pub const HEADER: &str = "multiselect-header";
    /// Present on the header while the dropdown is open.
    pub const HEADER_ACTIVE: &str = "multiselect-header-active";
    pub const HEADER_MAX: &str = "multiselect-header-max";
    pub const HEADER_PLACEHOLDER: &str = "multiselect-header-placeholder";
    /// A chip (or the count summary) in the header.
    pub const HEADER_OPTION: &str = "multiselect-header-option";
    pub const DROPDOWN: &str = "multiselect-options";
    pub const SEARCH: &str = "multiselect-search";
    pub const SELECT_ALL: &str = "multiselect-all";
    pub const APPLY: &str = "multiselect-apply";
    pub const OPTION: &str = "multiselect-option";
    pub const SELECTED: &str = "multiselect-selected";
    pub const OPTION_RADIO: &str = "multiselect-option-radio";
    pub const OPTION_CHECKBOX: &str = "multiselect-option-checkbox";
    pub const OPTION_TEXT: &str = "multiselect-option-text";
    pub const GROUP: &str = "multiselect-group";
    pub const GROUP_LABEL: &str = "multiselect-group-label";
    pub const GROUP_OPTIONS: &str = "multiselect-group-options";
    pub const DIVIDER: &str = "multiselect-divider";
}

/// Everything the root fragment depends on.
#[derive(Debug, Clone)]
pub struct RootContext<'a> {
    /// Widget name, added as a class on the root.
    pub name: &'a str,
    /// Id of the mirrored control.
    pub control_id: &'a str,
    pub show_max_hint: bool,
    pub search: bool,
    pub select_all: bool,
    pub show_apply_button: bool,
    pub translations: &'a Translations,
    /// Inline `width`/`height` of the root and header.
    pub width: Option<String>,
    pub height: Option<String>,
    /// Inline `width`/`height` of the dropdown.
    pub dropdown_width: Option<String>,
    pub dropdown_height: Option<String>,
}

/// Handles to the parts of the root fragment the engine updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootNodes {
    pub root: NodeId,
    pub header: NodeId,
    /// `count/max` hint, when enabled.
    pub max_hint: Option<NodeId>,
    /// Container for the search box, select-all, groups and apply button.
    pub dropdown: NodeId,
    pub search: Option<NodeId>,
    pub select_all: Option<NodeId>,
    pub apply: Option<NodeId>,
}

/// A rendered group: the container to attach and the list to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupFragment {
    pub container: NodeId,
    pub list: NodeId,
}

/// Everything an option row depends on.
#[derive(Debug, Clone)]
pub struct OptionContext<'a> {
    pub value: &'a str,
    /// Rich content, label or value, in that order of preference.
    pub content: &'a str,
    pub selected: bool,
    pub show_checkbox: bool,
}

/// Builds view fragments.
///
/// Every method creates detached nodes; the caller attaches them.
pub trait MultiSelectRenderer: Send + Sync {
    /// Build the root, header and dropdown skeleton.
    fn render_root(&self, tree: &mut ViewTree, context: &RootContext<'_>) -> RootNodes;

    /// Build a group container. `label` is `None` for the ungrouped bucket.
    fn render_group(&self, tree: &mut ViewTree, label: Option<&str>) -> GroupFragment;

    /// Build one option row.
    fn render_option(&self, tree: &mut ViewTree, option: &OptionContext<'_>) -> NodeId;

    /// Build a header chip for a selected option.
    fn render_chip(&self, tree: &mut ViewTree, value: &str, content: &str) -> NodeId;

    /// Build the placeholder shown while nothing is selected.
    fn render_placeholder(&self, tree: &mut ViewTree, text: &str) -> NodeId;

    /// Build the single-node summary used by the count and static modes.
    fn render_summary(&self, tree: &mut ViewTree, text: &str) -> NodeId;
}

/// The stock markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl DefaultRenderer {
    fn text_span(tree: &mut ViewTree, class: &str, text: &str) -> NodeId {
        let span = tree.create_with_class("span", class);
        tree.set_text(span, text);
        span
    }

    fn apply_size(tree: &mut ViewTree, node: NodeId, width: Option<&str>, height: Option<&str>) {
        if let Some(width) = width {
            tree.set_style(node, "width", width);
        }
        if let Some(height) = height {
            tree.set_style(node, "height", height);
        }
    }
}

impl MultiSelectRenderer for DefaultRenderer {
    fn render_root(&self, tree: &mut ViewTree, context: &RootContext<'_>) -> RootNodes {
        tracing::trace!(target: targets::RENDER, name = context.name, "rendering root");

        let root = tree.create_with_class("div", classes::ROOT);
        tree.add_class(root, context.name);
        tree.set_attribute(root, "id", format!("{}-dropdown", context.control_id));
        tree.set_attribute(root, "data-ms-for", context.control_id);

        let width = context.width.as_deref();
        let height = context.height.as_deref();
        Self::apply_size(tree, root, width, height);

        let header = tree.create_with_class("div", classes::HEADER);
        Self::apply_size(tree, header, width, height);
        tree.append_child(root, header);

        let max_hint = context.show_max_hint.then(|| {
            let hint = tree.create_with_class("span", classes::HEADER_MAX);
            tree.append_child(header, hint);
            hint
        });

        let dropdown = tree.create_with_class("div", classes::DROPDOWN);
        Self::apply_size(
            tree,
            dropdown,
            context.dropdown_width.as_deref(),
            context.dropdown_height.as_deref(),
        );
        tree.append_child(root, dropdown);

        let search = context.search.then(|| {
            let input = tree.create_with_class("input", classes::SEARCH);
            tree.set_attribute(
                input,
                "placeholder",
                context.translations.get("searchPlaceholder"),
            );
            tree.append_child(dropdown, input);
            input
        });

        let select_all = context.select_all.then(|| {
            let node = tree.create_with_class("div", classes::SELECT_ALL);
            let radio = tree.create_with_class("span", classes::OPTION_RADIO);
            let text = Self::text_span(
                tree,
                classes::OPTION_TEXT,
                context.translations.get("selectAll"),
            );
            tree.append_child(node, radio);
            tree.append_child(node, text);
            tree.append_child(dropdown, node);
            node
        });

        let apply = context.show_apply_button.then(|| {
            let button = tree.create_with_class("button", classes::APPLY);
            tree.set_text(button, context.translations.get("apply"));
            tree.append_child(dropdown, button);
            button
        });

        RootNodes {
            root,
            header,
            max_hint,
            dropdown,
            search,
            select_all,
            apply,
        }
    }

    fn render_group(&self, tree: &mut ViewTree, label: Option<&str>) -> GroupFragment {
        let container = tree.create_with_class("div", classes::GROUP);

        if let Some(label) = label {
            let label = Self::text_span(tree, classes::GROUP_LABEL, label);
            tree.append_child(container, label);
        }

        let list = tree.create_with_class("ul", classes::GROUP_OPTIONS);
        tree.append_child(container, list);

        let divider = tree.create_with_class("div", classes::DIVIDER);
        tree.append_child(container, divider);

        GroupFragment { container, list }
    }

    fn render_option(&self, tree: &mut ViewTree, option: &OptionContext<'_>) -> NodeId {
        let row = tree.create_with_class("li", classes::OPTION);
        tree.toggle_class(row, classes::SELECTED, option.selected);
        tree.set_attribute(row, "data-value", option.value);

        let marker_class = if option.show_checkbox {
            classes::OPTION_CHECKBOX
        } else {
            classes::OPTION_RADIO
        };
        let marker = tree.create_with_class("span", marker_class);
        tree.append_child(row, marker);

        let text = Self::text_span(tree, classes::OPTION_TEXT, option.content);
        tree.append_child(row, text);

        row
    }

    fn render_chip(&self, tree: &mut ViewTree, value: &str, content: &str) -> NodeId {
        let chip = tree.create_with_class("div", classes::HEADER_OPTION);
        tree.set_attribute(chip, "data-value", value);
        tree.set_text(chip, content);
        chip
    }

    fn render_placeholder(&self, tree: &mut ViewTree, text: &str) -> NodeId {
        Self::text_span(tree, classes::HEADER_PLACEHOLDER, text)
    }

    fn render_summary(&self, tree: &mut ViewTree, text: &str) -> NodeId {
        Self::text_span(tree, classes::HEADER_OPTION, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(translations: &Translations) -> RootContext<'_> {
        RootContext {
            name: "fruits",
            control_id: "fruit-select",
            show_max_hint: true,
            search: true,
            select_all: true,
            show_apply_button: true,
            translations,
            width: Some("200px".into()),
            height: None,
            dropdown_width: None,
            dropdown_height: Some("40vh".into()),
        }
    }

    #[test]
    fn test_render_root_structure() {
        let translations = Translations::default();
        let mut tree = ViewTree::new();
        let nodes = DefaultRenderer.render_root(&mut tree, &context(&translations));

        assert!(tree.has_class(nodes.root, classes::ROOT));
        assert!(tree.has_class(nodes.root, "fruits"));
        assert_eq!(tree.attribute(nodes.root, "id"), Some("fruit-select-dropdown"));
        assert_eq!(tree.style(nodes.header, "width"), Some("200px"));
        assert_eq!(tree.style(nodes.dropdown, "height"), Some("40vh"));
        assert_eq!(tree.children(nodes.root), &[nodes.header, nodes.dropdown]);

        let search = nodes.search.unwrap();
        assert_eq!(tree.attribute(search, "placeholder"), Some("Search..."));
        assert_eq!(
            tree.children(nodes.dropdown),
            &[search, nodes.select_all.unwrap(), nodes.apply.unwrap()]
        );
        assert_eq!(tree.text(nodes.apply.unwrap()), Some("Apply"));
        assert_eq!(tree.parent(nodes.max_hint.unwrap()), Some(nodes.header));
    }

    #[test]
    fn test_render_root_minimal() {
        let translations = Translations::default();
        let mut ctx = context(&translations);
        ctx.show_max_hint = false;
        ctx.search = false;
        ctx.select_all = false;
        ctx.show_apply_button = false;

        let mut tree = ViewTree::new();
        let nodes = DefaultRenderer.render_root(&mut tree, &ctx);
        assert!(nodes.max_hint.is_none());
        assert!(nodes.search.is_none());
        assert!(nodes.select_all.is_none());
        assert!(nodes.apply.is_none());
        assert!(tree.children(nodes.dropdown).is_empty());
    }

    #[test]
    fn test_render_option_markers() {
        let mut tree = ViewTree::new();
        let option = OptionContext {
            value: "a",
            content: "Apple",
            selected: true,
            show_checkbox: true,
        };
        let row = DefaultRenderer.render_option(&mut tree, &option);

        assert!(tree.has_class(row, classes::SELECTED));
        assert_eq!(tree.attribute(row, "data-value"), Some("a"));
        let children = tree.children(row).to_vec();
        assert!(tree.has_class(children[0], classes::OPTION_CHECKBOX));
        assert_eq!(tree.text(children[1]), Some("Apple"));
    }

    #[test]
    fn test_render_group_without_label() {
        let mut tree = ViewTree::new();
        let fragment = DefaultRenderer.render_group(&mut tree, None);
        assert!(tree.children_with_class(fragment.container, classes::GROUP_LABEL).is_empty());
        assert_eq!(tree.parent(fragment.list), Some(fragment.container));
    }
}
