//! The `MultiSelect` engine.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use multiselect_core::logging::{span_names, targets};
use multiselect_core::{ConnectionId, PerfSpan, Property, Signal};
use parking_lot::Mutex;
use slotmap::SecondaryMap;
use static_assertions::assert_impl_all;

use super::events::{InboxEvent, NodeRole};
use super::{SEARCH_THRESHOLD, SelectionEvent, WidgetId};
use crate::config::{MultiSelectConfig, apply_dataset};
use crate::dom::{
    ControlChild, ControlEntry, ControlEvent, Document, EventOrigin, NodeId, SelectElement,
    ViewTree,
};
use crate::error::{Error, Result};
use crate::model::{MultiSelectGroup, MultiSelectOption, SelectData};
use crate::render::{DefaultRenderer, MultiSelectRenderer, RootContext, RootNodes, classes};

/// A searchable, groupable multi-selection dropdown over a native control.
///
/// # Signals
///
/// - `selected`: an option was selected through [`select_option`](Self::select_option)
/// - `unselected`: an option was unselected through [`unselect_option`](Self::unselect_option)
/// - `changed`: after either of the above
/// - `visibility_changed`: the dropdown opened (`true`) or closed (`false`)
/// - `applied`: the apply button was clicked; carries the selected values
///
/// Bulk operations ([`select_all`](Self::select_all),
/// [`unselect_all`](Self::unselect_all), [`reset`](Self::reset)) emit no
/// per-option notifications.
pub struct MultiSelect {
    pub(super) id: WidgetId,
    pub(super) name: String,
    pub(super) control: Arc<SelectElement>,
    pub(super) config: MultiSelectConfig,

    pub(super) max: Option<usize>,
    pub(super) min: Option<usize>,
    pub(super) search_enabled: bool,
    pub(super) select_all_enabled: bool,
    pub(super) close_on_select: bool,

    pub(super) groups: Vec<MultiSelectGroup>,
    pub(super) default_selections: Vec<String>,

    pub(super) tree: ViewTree,
    pub(super) renderer: Box<dyn MultiSelectRenderer>,
    pub(super) nodes: RootNodes,
    pub(super) placeholder_node: Option<NodeId>,
    pub(super) summary_node: Option<NodeId>,
    pub(super) roles: SecondaryMap<NodeId, NodeRole>,

    pub(super) open: Property<bool>,
    pub(super) search_query: Property<String>,

    pub(super) inbox: Arc<Mutex<VecDeque<InboxEvent>>>,
    pub(super) control_connection: ConnectionId,
    pub(super) document: Option<(Arc<Document>, ConnectionId)>,

    /// Emitted after an option is selected.
    pub selected: Signal<SelectionEvent>,
    /// Emitted after an option is unselected.
    pub unselected: Signal<SelectionEvent>,
    /// Emitted after every committed single-option change.
    pub changed: Signal<SelectionEvent>,
    /// Emitted when the dropdown opens or closes.
    pub visibility_changed: Signal<bool>,
    /// Emitted when the apply button is clicked.
    pub applied: Signal<Vec<String>>,
}

assert_impl_all!(MultiSelect: Send, Sync);

impl MultiSelect {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Build a widget over `control` with the stock markup.
    pub fn new(control: Arc<SelectElement>, config: MultiSelectConfig) -> Result<Self> {
        Self::with_renderer(control, config, Box::new(DefaultRenderer))
    }

    /// Look up the control by `"#id"` in `document`, build the widget and
    /// listen to the document's clicks.
    pub fn attach(document: &Arc<Document>, key: &str, config: MultiSelectConfig) -> Result<Self> {
        let control = document.query_select(key)?;
        let mut widget = Self::new(control, config)?;
        widget.register_document(document);
        Ok(widget)
    }

    /// Build a widget over `control` with a custom renderer.
    #[tracing::instrument(skip_all, target = "multiselect::engine", level = "debug", fields(control = %control.id()))]
    pub fn with_renderer(
        control: Arc<SelectElement>,
        mut config: MultiSelectConfig,
        renderer: Box<dyn MultiSelectRenderer>,
    ) -> Result<Self> {
        apply_dataset(&mut config, &control.dataset());

        if !config.data.is_empty() {
            load_descriptors(&control, &config.data);
        }

        let groups = scan_groups(&control)?;
        let default_selections: Vec<String> = groups
            .iter()
            .flat_map(MultiSelectGroup::values)
            .filter(|option| option.is_default_value())
            .map(|option| option.value().to_string())
            .collect();
        let option_count: usize = groups.iter().map(MultiSelectGroup::len).sum();

        let max = match config.max {
            None if control.is_multiple() => None,
            None => Some(1),
            Some(max) => max.filter(|&max| max > 0),
        };
        let min = config.min.filter(|&min| min > 0);
        let search_enabled = config.search.unwrap_or(option_count > SEARCH_THRESHOLD);
        let close_on_select = config.close_list_on_item_select.unwrap_or(max == Some(1));
        let select_all_enabled = config.select_all && max != Some(1);

        let id = WidgetId::next();
        let name = [control.name(), config.name.clone()]
            .into_iter()
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| format!("multi-select-{id}"));

        let inbox: Arc<Mutex<VecDeque<InboxEvent>>> = Arc::default();
        let control_connection = {
            let inbox = inbox.clone();
            control.events().connect(move |event| {
                if let ControlEvent::Change {
                    origin: EventOrigin::Widget(origin),
                } = event
                    && *origin == id
                {
                    return;
                }
                inbox.lock().push_back(InboxEvent::Control(*event));
            })
        };

        let mut tree = ViewTree::new();
        let nodes = renderer.render_root(
            &mut tree,
            &RootContext {
                name: &name,
                control_id: control.id(),
                show_max_hint: config.show_max_hint,
                search: search_enabled,
                select_all: select_all_enabled,
                show_apply_button: config.show_apply_button,
                translations: &config.translations,
                width: config.width.as_ref().and_then(|d| d.to_css()),
                height: config.height.as_ref().and_then(|d| d.to_css()),
                dropdown_width: config.dropdown_width.as_ref().and_then(|d| d.to_css()),
                dropdown_height: config.dropdown_height.as_ref().and_then(|d| d.to_css()),
            },
        );

        tracing::debug!(
            target: targets::ENGINE,
            widget = %id,
            %name,
            options = option_count,
            ?max,
            ?min,
            search = search_enabled,
            "building multiselect"
        );

        let mut widget = Self {
            id,
            name,
            control,
            config,
            max,
            min,
            search_enabled,
            select_all_enabled,
            close_on_select,
            groups,
            default_selections,
            tree,
            renderer,
            nodes,
            placeholder_node: None,
            summary_node: None,
            roles: SecondaryMap::new(),
            open: Property::new(false),
            search_query: Property::new(String::new()),
            inbox,
            control_connection,
            document: None,
            selected: Signal::new(),
            unselected: Signal::new(),
            changed: Signal::new(),
            visibility_changed: Signal::new(),
            applied: Signal::new(),
        };

        widget.render_groups();
        widget.update();

        if let Some(on_initialize) = widget.config.callbacks.on_initialize.clone() {
            on_initialize(&widget);
        }

        Ok(widget)
    }

    fn render_groups(&mut self) {
        self.roles.insert(self.nodes.header, NodeRole::Header);
        if let Some(node) = self.nodes.select_all {
            self.roles.insert(node, NodeRole::SelectAll);
        }
        if let Some(node) = self.nodes.apply {
            self.roles.insert(node, NodeRole::Apply);
        }
        if let Some(node) = self.nodes.search {
            self.roles.insert(node, NodeRole::Search);
        }

        let show_checkbox = self.config.show_checkbox;
        for group in &mut self.groups {
            let Some(container) = group.render(&mut self.tree, self.renderer.as_ref(), show_checkbox)
            else {
                continue;
            };

            match self.nodes.apply {
                Some(apply) => self.tree.insert_before(self.nodes.dropdown, container, apply),
                None => self.tree.append_child(self.nodes.dropdown, container),
            }

            for option in group.values() {
                if let Some(row) = option.rendered() {
                    self.roles
                        .insert(row, NodeRole::Option(option.value().to_string()));
                }
            }
        }
    }

    /// Listen to `document`'s clicks (outside clicks close the dropdown,
    /// label clicks toggle it). Replaces any earlier registration.
    pub fn register_document(&mut self, document: &Arc<Document>) {
        if let Some((previous, connection)) = self.document.take() {
            previous.clicks.disconnect(connection);
        }

        let inbox = self.inbox.clone();
        let connection = document
            .clicks
            .connect(move |target| inbox.lock().push_back(InboxEvent::Click(target.clone())));
        self.document = Some((document.clone(), connection));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The widget name: the control's `name`, else the configured name,
    /// else a generated `multi-select-<n>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn control(&self) -> &Arc<SelectElement> {
        &self.control
    }

    /// The effective configuration, after `data-ms-*` overrides.
    pub fn config(&self) -> &MultiSelectConfig {
        &self.config
    }

    /// The selection cap; `None` when unbounded.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// The selection floor; `None` when there is none.
    pub fn min(&self) -> Option<usize> {
        self.min
    }

    pub fn is_search_enabled(&self) -> bool {
        self.search_enabled
    }

    pub fn is_select_all_enabled(&self) -> bool {
        self.select_all_enabled
    }

    pub fn closes_on_select(&self) -> bool {
        self.close_on_select
    }

    /// The rendered view.
    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    /// Handles to the root fragment's parts.
    pub fn root_nodes(&self) -> &RootNodes {
        &self.nodes
    }

    /// The placeholder node, present while nothing is selected.
    pub fn placeholder_node(&self) -> Option<NodeId> {
        self.placeholder_node
    }

    /// The count/static summary node, when that mode is showing.
    pub fn summary_node(&self) -> Option<NodeId> {
        self.summary_node
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Groups in render order; the ungrouped bucket is first.
    pub fn groups(&self) -> &[MultiSelectGroup] {
        &self.groups
    }

    /// Every option, in render order.
    pub fn options(&self) -> impl Iterator<Item = &MultiSelectOption> {
        self.groups.iter().flat_map(MultiSelectGroup::values)
    }

    pub fn find_option(&self, value: &str) -> Option<&MultiSelectOption> {
        self.options().find(|option| option.value() == value)
    }

    /// Whether the option with `value` is selected. Unknown values read as
    /// unselected.
    pub fn is_selected_value(&self, value: &str) -> bool {
        self.find_option(value)
            .is_some_and(MultiSelectOption::is_selected)
    }

    /// Values of the selected options, in render order.
    pub fn selected_values(&self) -> Vec<String> {
        self.options()
            .filter(|option| option.is_selected())
            .map(|option| option.value().to_string())
            .collect()
    }

    /// Values selected when the widget was built; restored by
    /// [`reset`](Self::reset).
    pub fn default_selections(&self) -> &[String] {
        &self.default_selections
    }

    /// Number of selected options. Scans the control every call.
    pub fn count_selected_options(&self) -> usize {
        self.options().filter(|option| option.is_selected()).count()
    }

    /// Whether the selection cap is reached.
    pub fn max_selection_reached(&self) -> bool {
        self.max
            .is_some_and(|max| self.count_selected_options() >= max)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select the option with `value`.
    ///
    /// Returns `true` when the selection changed. Unknown values, already
    /// selected options and selections past the cap are no-ops. With a cap
    /// of 1 the other options are unselected first.
    #[tracing::instrument(skip(self), target = "multiselect::engine", level = "trace")]
    pub fn select_option(&mut self, value: &str) -> bool {
        let Some(option) = self.find_option(value) else {
            tracing::debug!(target: targets::ENGINE, value, "select of unknown value ignored");
            return false;
        };
        if option.is_selected() || !self.admit(option) {
            return false;
        }

        let label = option.label().to_string();
        self.commit(value, label, true);
        true
    }

    /// Unselect the option with `value`.
    ///
    /// Returns `true` when the selection changed. Unknown values, options
    /// that are not selected and unselections that would break the floor
    /// are no-ops.
    #[tracing::instrument(skip(self), target = "multiselect::engine", level = "trace")]
    pub fn unselect_option(&mut self, value: &str) -> bool {
        let Some(option) = self.find_option(value) else {
            tracing::debug!(target: targets::ENGINE, value, "unselect of unknown value ignored");
            return false;
        };
        if !option.is_selected() || !self.release(option) {
            return false;
        }

        let label = option.label().to_string();
        self.commit(value, label, false);
        true
    }

    /// Select every option, stopping at the cap. With a cap of 1 each
    /// option replaces the previous one, leaving the last selected.
    pub fn select_all(&mut self) {
        let before = self.selected_values();

        for option in self.options() {
            if option.is_selected() {
                continue;
            }
            if self.max == Some(1) {
                self.admit(option);
                continue;
            }
            if self.max_selection_reached() {
                tracing::debug!(target: targets::ENGINE, max = ?self.max, "select all stopped at max");
                break;
            }
            option.select();
        }

        self.finish_bulk(before);
    }

    /// Unselect every option, keeping the floor.
    pub fn unselect_all(&mut self) {
        let before = self.selected_values();

        for option in self.options() {
            if option.is_selected() {
                self.release(option);
            }
        }

        self.finish_bulk(before);
    }

    /// Restore the selection captured at construction. The dropdown's
    /// visibility is left as is.
    pub fn reset(&mut self) {
        tracing::debug!(target: targets::ENGINE, widget = %self.id, defaults = ?self.default_selections, "reset");
        for option in self.options() {
            if option.is_default_value() {
                option.select();
            } else {
                option.unselect();
            }
        }
        self.update();
    }

    /// Push the mirrored selection state into the view: option rows,
    /// the select-all affordance, then the header.
    pub fn update(&mut self) {
        let _perf = PerfSpan::new(span_names::UPDATE);

        for option in self.groups.iter().flat_map(MultiSelectGroup::values) {
            if let Some(row) = option.rendered() {
                self.tree
                    .toggle_class(row, classes::SELECTED, option.is_selected());
            }
        }

        if let Some(select_all) = self.nodes.select_all {
            let all_selected = self
                .groups
                .iter()
                .flat_map(MultiSelectGroup::values)
                .all(MultiSelectOption::is_selected);
            self.tree
                .toggle_class(select_all, classes::SELECTED, all_selected);
        }

        self.update_placeholder();

        tracing::trace!(target: targets::ENGINE, tree = %self.debug_tree(), "view updated");
    }

    /// Apply the cardinality cap to a pending selection.
    fn admit(&self, option: &MultiSelectOption) -> bool {
        if self.max_selection_reached() {
            if self.max != Some(1) {
                tracing::debug!(
                    target: targets::ENGINE,
                    value = option.value(),
                    max = ?self.max,
                    "selection rejected, max reached"
                );
                return false;
            }

            for other in self.options() {
                if other.value() != option.value() {
                    other.unselect();
                }
            }
        }

        option.select();
        true
    }

    /// Apply the floor to a pending unselection.
    fn release(&self, option: &MultiSelectOption) -> bool {
        // `<=` also holds the floor when an external write left the
        // control below it.
        if let Some(min) = self.min
            && self.count_selected_options() <= min
        {
            tracing::debug!(
                target: targets::ENGINE,
                value = option.value(),
                min,
                "unselection rejected, min reached"
            );
            return false;
        }

        option.unselect();
        true
    }

    fn commit(&mut self, value: &str, label: String, selected: bool) {
        self.update();

        let event = SelectionEvent {
            widget: self.id,
            value: value.to_string(),
            label,
            selected,
            selected_count: self.count_selected_options(),
        };
        tracing::debug!(target: targets::ENGINE, widget = %self.id, value, selected, "selection changed");

        let callbacks = self.config.callbacks.clone();
        if selected {
            self.selected.emit(event.clone());
            if let Some(on_select) = &callbacks.on_select {
                on_select(&event);
            }
        } else {
            self.unselected.emit(event.clone());
            if let Some(on_unselect) = &callbacks.on_unselect {
                on_unselect(&event);
            }
        }

        self.changed.emit(event.clone());
        if let Some(on_change) = &callbacks.on_change {
            on_change(&event);
        }

        self.dispatch_change();
    }

    fn finish_bulk(&mut self, before: Vec<String>) {
        self.update();
        if self.selected_values() != before {
            self.dispatch_change();
        }
    }

    fn dispatch_change(&self) {
        self.control.dispatch_event(ControlEvent::Change {
            origin: EventOrigin::Widget(self.id),
        });
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Open the dropdown. Does nothing when already open.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    /// Close the dropdown. Does nothing when already closed.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.is_open());
    }

    fn set_open(&mut self, open: bool) {
        if self.open.set(open) {
            self.tree
                .toggle_class(self.nodes.header, classes::HEADER_ACTIVE, open);
            tracing::trace!(target: targets::ENGINE, widget = %self.id, open, "visibility changed");
            self.visibility_changed.emit(open);
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// The current search query.
    pub fn search_query(&self) -> String {
        self.search_query.get()
    }

    /// Show only the options whose displayed content contains `query`
    /// (case-insensitive) and hide groups left with none. Does nothing when
    /// search is disabled.
    pub fn search(&mut self, query: &str) {
        if !self.search_enabled {
            tracing::debug!(target: targets::ENGINE, widget = %self.id, "search ignored, search disabled");
            return;
        }

        self.search_query.set(query.to_string());
        if let Some(input) = self.nodes.search {
            self.tree.set_attribute(input, "value", query);
        }

        let needle = query.to_lowercase();
        for group in &self.groups {
            let mut any_visible = false;
            for option in group.values() {
                let visible =
                    needle.is_empty() || option.display_content().to_lowercase().contains(&needle);
                any_visible |= visible;
                if let Some(row) = option.rendered() {
                    self.tree.set_visible(row, visible);
                }
            }
            if let Some(container) = group.rendered() {
                self.tree.set_visible(container, any_visible);
            }
        }
    }

    /// Clear the query and show every option.
    pub fn clear_search(&mut self) {
        if self.search_enabled && !self.search_query.with(String::is_empty) {
            self.search("");
        }
    }

    /// Values of the options currently shown by the search filter.
    pub fn visible_values(&self) -> BTreeSet<String> {
        self.options()
            .filter(|option| {
                option
                    .rendered()
                    .is_some_and(|row| self.tree.is_visible(row))
            })
            .map(|option| option.value().to_string())
            .collect()
    }
}

impl Drop for MultiSelect {
    fn drop(&mut self) {
        self.control.events().disconnect(self.control_connection);
        if let Some((document, connection)) = self.document.take() {
            document.clicks.disconnect(connection);
        }
    }
}

impl std::fmt::Debug for MultiSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSelect")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("control", &self.control.id())
            .field("max", &self.max)
            .field("min", &self.min)
            .field("selected", &self.selected_values())
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

/// Replace the control's children with descriptor-built entries.
fn load_descriptors(control: &SelectElement, data: &[SelectData]) {
    tracing::debug!(target: targets::ENGINE, control = %control.id(), descriptors = data.len(), "loading option descriptors");
    control.clear();
    for item in data {
        match item {
            SelectData::Option(option) => {
                control.add_option(option.to_entry());
            }
            SelectData::Group(group) => {
                control.add_group(group.to_group());
            }
        }
    }
}

/// Build the group/option model from the control: optgroups become groups,
/// plain entries go to the ungrouped bucket (first).
fn scan_groups(control: &Arc<SelectElement>) -> Result<Vec<MultiSelectGroup>> {
    let mut seen = BTreeSet::new();
    let mut option_for = |key| -> Result<MultiSelectOption> {
        let option = MultiSelectOption::new(ControlEntry::new(control.clone(), key));
        if !seen.insert(option.value().to_string()) {
            return Err(Error::duplicate_value(control.id(), option.value()));
        }
        Ok(option)
    };

    let mut ungrouped = MultiSelectGroup::ungrouped();
    let mut groups = Vec::new();
    for child in control.children() {
        match child {
            ControlChild::Entry(key) => ungrouped.add_value(option_for(key)?),
            ControlChild::Group {
                label,
                html,
                entries,
            } => {
                let values = entries
                    .into_iter()
                    .map(&mut option_for)
                    .collect::<Result<Vec<_>>>()?;
                groups.push(MultiSelectGroup::new(label).with_html(html).with_values(values));
            }
        }
    }

    groups.insert(0, ungrouped);
    Ok(groups)
}
