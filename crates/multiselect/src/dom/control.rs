//! The native selection control mirrored by the widget.
//!
//! [`SelectElement`] models an HTML `<select>`: an ordered list of plain
//! entries and `<optgroup>`s, a `multiple` flag, a `name`, the owning form
//! and the `data-*` dataset. Each entry's `selected` flag is the single
//! source of truth for selection state; the widget and the hosting page
//! share the element through an `Arc` and may both read or write it.
//!
//! Events dispatched on the element (see [`ControlEvent`]) are delivered to
//! every slot connected to [`SelectElement::events`].

use std::collections::BTreeMap;

use multiselect_core::Signal;
use multiselect_core::logging::targets;
use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::widget::WidgetId;

new_key_type! {
    /// Handle to one entry (`<option>`) of a [`SelectElement`].
    pub struct EntryKey;
}

/// One `<option>` of the control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionEntry {
    /// The submitted value.
    pub value: String,
    /// The visible label.
    pub label: String,
    /// Rich-content label (`data-ms-html`).
    pub html: Option<String>,
    /// Current selection state.
    pub selected: bool,
    /// Selection state restored by a native form reset.
    pub default_selected: bool,
}

impl OptionEntry {
    /// Create an unselected entry.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            html: None,
            selected: false,
            default_selected: false,
        }
    }

    /// Mark the entry as selected, both now and after a form reset.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self.default_selected = selected;
        self
    }

    /// Set the rich-content label.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

/// An `<optgroup>` and the entries it holds, used when building a control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptGroup {
    /// Group label.
    pub label: String,
    /// Rich-content label.
    pub html: Option<String>,
    /// Entries in document order.
    pub entries: Vec<OptionEntry>,
}

impl OptGroup {
    /// Create an empty group.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Set the rich-content label.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Append an entry.
    pub fn with_entry(mut self, entry: OptionEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// A direct child of the control, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlChild {
    /// A plain `<option>`.
    Entry(EntryKey),
    /// An `<optgroup>` with its entries.
    Group {
        /// Group label.
        label: String,
        /// Rich-content label.
        html: Option<String>,
        /// Entries in document order.
        entries: Vec<EntryKey>,
    },
}

/// Who dispatched a control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrigin {
    /// Code outside any widget (the hosting page).
    External,
    /// The widget with this id.
    Widget(WidgetId),
}

/// Events dispatched on a [`SelectElement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// The native `change` event.
    Change {
        /// The dispatcher, so a widget can skip its own events.
        origin: EventOrigin,
    },
    /// Custom event asking the widget to restore its default selection.
    ResetRequest,
    /// Custom event asking the widget to resynchronize its view.
    UpdateRequest,
    /// The owning form was reset.
    FormReset,
}

#[derive(Debug, Default)]
struct ControlState {
    name: String,
    multiple: bool,
    form: Option<String>,
    dataset: BTreeMap<String, String>,
    entries: SlotMap<EntryKey, OptionEntry>,
    children: Vec<ControlChild>,
}

impl ControlState {
    fn ordered_keys(&self) -> Vec<EntryKey> {
        let mut keys = Vec::with_capacity(self.entries.len());
        for child in &self.children {
            match child {
                ControlChild::Entry(key) => keys.push(*key),
                ControlChild::Group { entries, .. } => keys.extend(entries.iter().copied()),
            }
        }
        keys
    }

    fn push_entry(&mut self, entry: OptionEntry) -> EntryKey {
        let selected = entry.selected;
        let key = self.entries.insert(entry);
        if selected {
            self.enforce_single(key);
        }
        key
    }

    /// A single-select control holds at most one selected entry.
    fn enforce_single(&mut self, keep: EntryKey) {
        if self.multiple {
            return;
        }
        for (key, entry) in self.entries.iter_mut() {
            if key != keep {
                entry.selected = false;
            }
        }
    }
}

/// A native selection control.
///
/// Built with the `with_*` methods, then usually shared as
/// `Arc<SelectElement>`. All accessors take `&self`.
///
/// # Example
///
/// ```
/// use multiselect::dom::{OptGroup, OptionEntry, SelectElement};
///
/// let control = SelectElement::new("fruits")
///     .with_multiple(true)
///     .with_option(OptionEntry::new("a", "Apple").selected(true))
///     .with_group(OptGroup::new("Citrus").with_entry(OptionEntry::new("o", "Orange")));
///
/// assert_eq!(control.selected_values(), vec!["a".to_string()]);
/// ```
pub struct SelectElement {
    id: String,
    state: RwLock<ControlState>,
    events: Signal<ControlEvent>,
}

impl SelectElement {
    /// Create an empty single-select control with the given element id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: RwLock::new(ControlState::default()),
            events: Signal::new(),
        }
    }

    /// Set the `name` attribute.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.state.write().name = name.into();
        self
    }

    /// Set the `multiple` attribute.
    pub fn with_multiple(self, multiple: bool) -> Self {
        self.state.write().multiple = multiple;
        self
    }

    /// Set the id of the owning form.
    pub fn with_form(self, form: impl Into<String>) -> Self {
        self.state.write().form = Some(form.into());
        self
    }

    /// Set a `data-*` attribute. `name` is the part after `data-`, e.g.
    /// `"ms-max"`, and is stored under its dataset key (`"msMax"`).
    pub fn with_data(self, name: &str, value: impl Into<String>) -> Self {
        self.state
            .write()
            .dataset
            .insert(dataset_key(name), value.into());
        self
    }

    /// Append a plain option.
    pub fn with_option(self, entry: OptionEntry) -> Self {
        self.add_option(entry);
        self
    }

    /// Append an option group.
    pub fn with_group(self, group: OptGroup) -> Self {
        self.add_group(group);
        self
    }

    /// The element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `name` attribute (may be empty).
    pub fn name(&self) -> String {
        self.state.read().name.clone()
    }

    /// Whether several entries may be selected at once.
    pub fn is_multiple(&self) -> bool {
        self.state.read().multiple
    }

    /// Id of the owning form.
    pub fn form(&self) -> Option<String> {
        self.state.read().form.clone()
    }

    /// The dataset (camelCase keys, as in `element.dataset`).
    pub fn dataset(&self) -> BTreeMap<String, String> {
        self.state.read().dataset.clone()
    }

    /// Append a plain option, returning its key.
    pub fn add_option(&self, entry: OptionEntry) -> EntryKey {
        let mut state = self.state.write();
        let key = state.push_entry(entry);
        state.children.push(ControlChild::Entry(key));
        key
    }

    /// Append an option group, returning the keys of its entries.
    pub fn add_group(&self, group: OptGroup) -> Vec<EntryKey> {
        let mut state = self.state.write();
        let keys: Vec<EntryKey> = group
            .entries
            .into_iter()
            .map(|entry| state.push_entry(entry))
            .collect();
        state.children.push(ControlChild::Group {
            label: group.label,
            html: group.html,
            entries: keys.clone(),
        });
        keys
    }

    /// Remove every child.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.children.clear();
        state.entries.clear();
    }

    /// Direct children in document order.
    pub fn children(&self) -> Vec<ControlChild> {
        self.state.read().children.clone()
    }

    /// All entry keys in document order.
    pub fn entry_keys(&self) -> Vec<EntryKey> {
        self.state.read().ordered_keys()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Whether the control has no entries.
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    /// A copy of one entry.
    pub fn entry(&self, key: EntryKey) -> Option<OptionEntry> {
        self.state.read().entries.get(key).cloned()
    }

    /// Key of the first entry with `value`.
    pub fn find(&self, value: &str) -> Option<EntryKey> {
        let state = self.state.read();
        state
            .ordered_keys()
            .into_iter()
            .find(|key| state.entries[*key].value == value)
    }

    /// Whether an entry is selected. Unknown keys read as unselected.
    pub fn is_selected(&self, key: EntryKey) -> bool {
        self.state
            .read()
            .entries
            .get(key)
            .is_some_and(|entry| entry.selected)
    }

    /// Write an entry's selected flag.
    ///
    /// Selecting an entry of a single-select control deselects the others,
    /// as a native control does.
    pub fn set_selected(&self, key: EntryKey, selected: bool) {
        let mut state = self.state.write();
        let Some(entry) = state.entries.get_mut(key) else {
            tracing::trace!(target: targets::CONTROL, control = %self.id, ?key, "set_selected on unknown entry");
            return;
        };
        entry.selected = selected;
        if selected {
            state.enforce_single(key);
        }
    }

    /// Values of the selected entries in document order.
    pub fn selected_values(&self) -> Vec<String> {
        let state = self.state.read();
        state
            .ordered_keys()
            .into_iter()
            .filter_map(|key| {
                let entry = &state.entries[key];
                entry.selected.then(|| entry.value.clone())
            })
            .collect()
    }

    /// Restore every entry to its `default_selected` flag, as a native form
    /// reset does.
    pub fn reset_to_defaults(&self) {
        let mut state = self.state.write();
        for entry in state.entries.values_mut() {
            entry.selected = entry.default_selected;
        }
    }

    /// Signal delivering every event dispatched on this control.
    pub fn events(&self) -> &Signal<ControlEvent> {
        &self.events
    }

    /// Dispatch an event to every listener.
    pub fn dispatch_event(&self, event: ControlEvent) {
        tracing::trace!(target: targets::CONTROL, control = %self.id, ?event, "dispatching control event");
        self.events.emit(event);
    }
}

impl std::fmt::Debug for SelectElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SelectElement")
            .field("id", &self.id)
            .field("name", &state.name)
            .field("multiple", &state.multiple)
            .field("entries", &state.entries.len())
            .finish()
    }
}

/// Convert a `data-*` attribute suffix to its dataset key:
/// `"ms-placeholder-type"` becomes `"msPlaceholderType"`.
pub fn dataset_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            key.extend(ch.to_uppercase());
            upper = false;
        } else {
            key.push(ch);
        }
    }
    key
}

/// A shared handle to one entry of a control.
///
/// This is what an option entity delegates its selection state to.
#[derive(Clone)]
pub struct ControlEntry {
    control: std::sync::Arc<SelectElement>,
    key: EntryKey,
}

impl ControlEntry {
    /// Create a handle to `key` in `control`.
    pub fn new(control: std::sync::Arc<SelectElement>, key: EntryKey) -> Self {
        Self { control, key }
    }

    /// The entry key.
    pub fn key(&self) -> EntryKey {
        self.key
    }

    /// The control the entry belongs to.
    pub fn control(&self) -> &std::sync::Arc<SelectElement> {
        &self.control
    }

    /// A copy of the entry's current data.
    pub fn snapshot(&self) -> Option<OptionEntry> {
        self.control.entry(self.key)
    }

    /// Read the mirrored selected flag.
    pub fn is_selected(&self) -> bool {
        self.control.is_selected(self.key)
    }

    /// Write the mirrored selected flag.
    pub fn set_selected(&self, selected: bool) {
        self.control.set_selected(self.key, selected);
    }
}

impl std::fmt::Debug for ControlEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlEntry")
            .field("control", &self.control.id())
            .field("key", &self.key)
            .finish()
    }
}
