//! Prelude module for multiselect.
//!
//! ```ignore
//! use multiselect::prelude::*;
//! ```

// ============================================================================
// Engine
// ============================================================================

pub use crate::widget::{MultiSelect, SelectionEvent, WidgetId};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{Dimension, MultiSelectConfig, PlaceholderType, Translations};
pub use crate::model::{GroupData, OptionData, SelectData};

// ============================================================================
// Page Model
// ============================================================================

pub use crate::dom::{
    ClickTarget, ControlEvent, Document, EventOrigin, OptGroup, OptionEntry, SelectElement,
};

// ============================================================================
// Signals and Errors
// ============================================================================

pub use crate::Error;
pub use multiselect_core::{ConnectionId, Signal};
