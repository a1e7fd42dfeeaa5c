//! Error types for the selection widget.

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a selection widget.
///
/// Policy rejections (selecting past the maximum, unselecting below the
/// minimum) are not errors; the engine reports them by returning `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The lookup key matched no element in the document.
    #[error("no element matches '{key}'")]
    ElementNotFound { key: String },

    /// The element exists but is not a selection control.
    #[error("element '{key}' must be a select element but is a <{tag}>")]
    NotASelectElement { key: String, tag: String },

    /// Two options share one value, so the mirror cannot be kept 1:1.
    #[error("duplicate option value '{value}' in select '{control}'")]
    DuplicateValue { control: String, value: String },

    /// JSON configuration could not be parsed.
    #[error("invalid JSON configuration: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// TOML configuration could not be parsed.
    #[error("invalid TOML configuration: {0}")]
    ConfigToml(#[from] toml::de::Error),
}

impl Error {
    /// Create an element-not-found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::ElementNotFound { key: key.into() }
    }

    /// Create a wrong-element-type error.
    pub fn not_a_select(key: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::NotASelectElement {
            key: key.into(),
            tag: tag.into(),
        }
    }

    /// Create a duplicate-value error.
    pub fn duplicate_value(control: impl Into<String>, value: impl Into<String>) -> Self {
        Self::DuplicateValue {
            control: control.into(),
            value: value.into(),
        }
    }
}
