//! Widget configuration.
//!
//! [`MultiSelectConfig`] is built in code with the `with_*` methods or
//! loaded from JSON / TOML (camelCase keys). Values not given keep their
//! defaults; `data-ms-*` attributes on the control override both (see
//! [`apply_dataset`]).
//!
//! ```
//! use multiselect::config::{MultiSelectConfig, PlaceholderType};
//!
//! let config = MultiSelectConfig::from_json(r#"{ "max": 3, "placeholderType": "count" }"#)?;
//! assert_eq!(config.max, Some(Some(3)));
//! assert_eq!(config.placeholder_type, PlaceholderType::Count);
//! # Ok::<(), multiselect::Error>(())
//! ```

mod dataset;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

pub use dataset::apply_dataset;

use crate::error::Result;
use crate::model::SelectData;
use crate::widget::{MultiSelect, SelectionEvent};

/// Default placeholder text.
pub const DEFAULT_PLACEHOLDER: &str = "Select item(s)";

/// How the header summarizes a non-empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum PlaceholderType {
    /// One chip per selected option.
    #[default]
    Default,
    /// A single "%i selected" summary.
    Count,
    /// The configured `label`, verbatim.
    Static,
}

impl PlaceholderType {
    /// Parse a mode name. Unknown names fall back to [`PlaceholderType::Default`].
    pub fn parse(name: &str) -> Self {
        match name {
            "count" => PlaceholderType::Count,
            "static" => PlaceholderType::Static,
            _ => PlaceholderType::Default,
        }
    }
}

impl From<String> for PlaceholderType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

/// A CSS length: a bare number means pixels, a string is used verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(f64),
    Css(String),
}

impl Dimension {
    /// The inline style value, or `None` for an empty string.
    pub fn to_css(&self) -> Option<String> {
        match self {
            Dimension::Pixels(px) => Some(format!("{px}px")),
            Dimension::Css(css) if css.is_empty() => None,
            Dimension::Css(css) => Some(css.clone()),
        }
    }

    /// Parse a declarative value: numbers become pixels.
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<f64>() {
            Ok(px) => Dimension::Pixels(px),
            Err(_) => Dimension::Css(value.to_string()),
        }
    }
}

impl From<f64> for Dimension {
    fn from(px: f64) -> Self {
        Dimension::Pixels(px)
    }
}

impl From<u32> for Dimension {
    fn from(px: u32) -> Self {
        Dimension::Pixels(f64::from(px))
    }
}

impl From<&str> for Dimension {
    fn from(css: &str) -> Self {
        Dimension::Css(css.to_string())
    }
}

/// Translation templates keyed by name.
///
/// `%i` in a template is replaced with the live selection count. Looking up
/// a key without a template returns the key itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct Translations {
    entries: BTreeMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        let entries = [
            ("selectAll", "Select all"),
            ("searchPlaceholder", "Search..."),
            ("selected", "%i selected"),
            ("apply", "Apply"),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
        Self { entries }
    }
}

impl From<BTreeMap<String, String>> for Translations {
    fn from(overrides: BTreeMap<String, String>) -> Self {
        let mut translations = Self::default();
        translations.entries.extend(overrides);
        translations
    }
}

impl Translations {
    /// The template for `key`, or `key` itself when there is none.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.entries.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Set a template.
    pub fn set(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.set(key, template);
        self
    }

    /// The template for `key` with `%i` replaced by `count`.
    pub fn format_count(&self, key: &str, count: usize) -> String {
        self.get(key).replace("%i", &count.to_string())
    }
}

/// Callback receiving one committed selection change.
pub type SelectionCallback = Arc<dyn Fn(&SelectionEvent) + Send + Sync>;

/// Callback receiving the widget once it is fully built.
pub type InitializeCallback = Arc<dyn Fn(&MultiSelect) + Send + Sync>;

/// User callbacks. Not serializable; set through the builder methods.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_select: Option<SelectionCallback>,
    pub on_unselect: Option<SelectionCallback>,
    pub on_change: Option<SelectionCallback>,
    pub on_initialize: Option<InitializeCallback>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_select", &self.on_select.is_some())
            .field("on_unselect", &self.on_unselect.is_some())
            .field("on_change", &self.on_change.is_some())
            .field("on_initialize", &self.on_initialize.is_some())
            .finish()
    }
}

/// Configuration of one widget.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiSelectConfig {
    /// Header text shown while nothing is selected.
    pub placeholder: String,
    /// Selection cap. `None` derives it from the control (1 for a
    /// single-select, unbounded otherwise); `Some(None)` and `Some(Some(0))`
    /// mean unbounded.
    #[serde(deserialize_with = "deserialize_some")]
    pub max: Option<Option<usize>>,
    /// Selection floor enforced on unselect. `0` means none.
    pub min: Option<usize>,
    pub placeholder_type: PlaceholderType,
    /// Show a `count/max` hint in the header.
    pub show_max_hint: bool,
    /// Render the search box. `None` enables it above the option threshold.
    pub search: Option<bool>,
    /// Render the select-all affordance. Ignored when max is 1.
    pub select_all: bool,
    /// Close after an option click. `None` closes for single-select only.
    pub close_list_on_item_select: Option<bool>,
    /// Header text for [`PlaceholderType::Static`].
    pub label: String,
    /// Widget name used when the control has none.
    pub name: String,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub dropdown_width: Option<Dimension>,
    pub dropdown_height: Option<Dimension>,
    /// Render a checkbox marker in each option.
    pub show_checkbox: bool,
    /// Render an apply button at the bottom of the dropdown.
    pub show_apply_button: bool,
    pub translations: Translations,
    /// Descriptors replacing the control's children.
    pub data: Vec<SelectData>,
    #[serde(skip)]
    pub callbacks: Callbacks,
}

impl Default for MultiSelectConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            max: None,
            min: None,
            placeholder_type: PlaceholderType::Default,
            show_max_hint: false,
            search: None,
            select_all: false,
            close_list_on_item_select: None,
            label: String::new(),
            name: String::new(),
            width: None,
            height: None,
            dropdown_width: None,
            dropdown_height: None,
            show_checkbox: false,
            show_apply_button: false,
            translations: Translations::default(),
            data: Vec::new(),
            callbacks: Callbacks::default(),
        }
    }
}

/// Distinguishes an explicit `null` (`Some(None)`) from a missing key (`None`).
fn deserialize_some<'de, D>(deserializer: D) -> std::result::Result<Option<Option<usize>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<usize>::deserialize(deserializer).map(Some)
}

impl MultiSelectConfig {
    /// Create a configuration with every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from TOML.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    // =========================================================================
    // Builder Pattern Methods
    // =========================================================================

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the selection cap. `None` (or 0) means unbounded.
    pub fn with_max(mut self, max: Option<usize>) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_placeholder_type(mut self, placeholder_type: PlaceholderType) -> Self {
        self.placeholder_type = placeholder_type;
        self
    }

    pub fn with_show_max_hint(mut self, show: bool) -> Self {
        self.show_max_hint = show;
        self
    }

    pub fn with_search(mut self, search: bool) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_select_all(mut self, select_all: bool) -> Self {
        self.select_all = select_all;
        self
    }

    pub fn with_close_list_on_item_select(mut self, close: bool) -> Self {
        self.close_list_on_item_select = Some(close);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_width(mut self, width: impl Into<Dimension>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn with_height(mut self, height: impl Into<Dimension>) -> Self {
        self.height = Some(height.into());
        self
    }

    pub fn with_dropdown_width(mut self, width: impl Into<Dimension>) -> Self {
        self.dropdown_width = Some(width.into());
        self
    }

    pub fn with_dropdown_height(mut self, height: impl Into<Dimension>) -> Self {
        self.dropdown_height = Some(height.into());
        self
    }

    pub fn with_show_checkbox(mut self, show: bool) -> Self {
        self.show_checkbox = show;
        self
    }

    pub fn with_show_apply_button(mut self, show: bool) -> Self {
        self.show_apply_button = show;
        self
    }

    pub fn with_translation(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.translations.set(key, template);
        self
    }

    /// Build from descriptors instead of the control's children.
    pub fn with_data(mut self, data: impl IntoIterator<Item = SelectData>) -> Self {
        self.data = data.into_iter().collect();
        self
    }

    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.callbacks.on_select = Some(Arc::new(f));
        self
    }

    pub fn on_unselect<F>(mut self, f: F) -> Self
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.callbacks.on_unselect = Some(Arc::new(f));
        self
    }

    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.callbacks.on_change = Some(Arc::new(f));
        self
    }

    pub fn on_initialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&MultiSelect) + Send + Sync + 'static,
    {
        self.callbacks.on_initialize = Some(Arc::new(f));
        self
    }
}
