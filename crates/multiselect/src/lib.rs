//! multiselect - a searchable, grouped multi-selection dropdown.
//!
//! The widget sits on top of a native selection control and keeps three
//! views of the selection consistent: the control's entries, the
//! option/group model and the rendered dropdown.
//!
//! - [`dom`]: the page model (selection controls, labels, forms, clicks)
//!   and the [`ViewTree`](dom::ViewTree) the dropdown is rendered into
//! - [`model`]: option and group entities, and data descriptors
//! - [`config`]: [`MultiSelectConfig`](config::MultiSelectConfig), loadable
//!   from JSON or TOML and overridable with `data-ms-*` attributes
//! - [`render`]: the [`MultiSelectRenderer`](render::MultiSelectRenderer)
//!   trait and the stock markup
//! - [`widget`]: the [`MultiSelect`](widget::MultiSelect) engine
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use multiselect::prelude::*;
//!
//! let document = Arc::new(Document::new());
//! document.insert_select(
//!     SelectElement::new("colors")
//!         .with_multiple(true)
//!         .with_option(OptionEntry::new("r", "Red"))
//!         .with_option(OptionEntry::new("g", "Green"))
//!         .with_option(OptionEntry::new("b", "Blue")),
//! );
//!
//! let config = MultiSelectConfig::new()
//!     .with_max(Some(2))
//!     .with_placeholder_type(PlaceholderType::Count);
//! let mut colors = MultiSelect::attach(&document, "#colors", config)?;
//!
//! assert!(colors.select_option("r"));
//! assert!(colors.select_option("g"));
//! assert!(!colors.select_option("b"));
//! assert_eq!(colors.count_selected_options(), 2);
//! # Ok::<(), multiselect::Error>(())
//! ```

pub mod config;
pub mod dom;
mod error;
pub mod model;
pub mod prelude;
pub mod render;
pub mod widget;

pub use error::{Error, Result};
pub use multiselect_core::{ConnectionId, Property, Signal};
pub use widget::MultiSelect;
