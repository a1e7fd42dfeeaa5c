//! Raw option/group descriptors.
//!
//! Descriptors let a widget be built from data instead of from the
//! control's existing children. They deserialize from JSON or TOML:
//!
//! ```json
//! [
//!   { "value": "a", "text": "Apple", "selected": true },
//!   { "label": "Citrus", "options": [{ "value": "o", "text": "Orange" }] }
//! ]
//! ```

use serde::{Deserialize, Serialize};

use crate::dom::{OptGroup, OptionEntry};

/// One option descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionData {
    pub value: String,
    /// Display label. Falls back to the value when empty.
    pub text: String,
    pub selected: bool,
    pub html: Option<String>,
}

impl OptionData {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub(crate) fn to_entry(&self) -> OptionEntry {
        let label = if self.text.is_empty() {
            self.value.clone()
        } else {
            self.text.clone()
        };
        let mut entry = OptionEntry::new(self.value.clone(), label).selected(self.selected);
        entry.html = self.html.clone();
        entry
    }
}

/// One group descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupData {
    pub label: String,
    #[serde(default)]
    pub html: Option<String>,
    pub options: Vec<OptionData>,
}

impl GroupData {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn with_option(mut self, option: OptionData) -> Self {
        self.options.push(option);
        self
    }

    pub(crate) fn to_group(&self) -> OptGroup {
        let mut group = OptGroup::new(self.label.clone());
        group.html = self.html.clone();
        group.entries = self.options.iter().map(OptionData::to_entry).collect();
        group
    }
}

/// Either an option or a group of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectData {
    Group(GroupData),
    Option(OptionData),
}

impl From<OptionData> for SelectData {
    fn from(option: OptionData) -> Self {
        SelectData::Option(option)
    }
}

impl From<GroupData> for SelectData {
    fn from(group: GroupData) -> Self {
        SelectData::Group(group)
    }
}
