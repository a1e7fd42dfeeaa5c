//! The selection engine.
//!
//! [`MultiSelect`] ties the three representations of selection state
//! together:
//!
//! - the mirrored [`SelectElement`](crate::dom::SelectElement), whose
//!   entries carry the authoritative `selected` flags
//! - the [`MultiSelectGroup`](crate::model::MultiSelectGroup) /
//!   [`MultiSelectOption`](crate::model::MultiSelectOption) model, which
//!   reads and writes those flags
//! - the rendered [`ViewTree`](crate::dom::ViewTree), which the engine
//!   pushes state into on every [`update`](MultiSelect::update)
//!
//! # Driving the widget
//!
//! Public operations run to completion and leave all three consistent.
//! Events raised elsewhere (clicks on the page, native `change` events,
//! form resets) are queued in the widget's inbox and handled in FIFO order
//! by [`MultiSelect::process_events`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use multiselect::config::MultiSelectConfig;
//! use multiselect::dom::{Document, OptionEntry, SelectElement};
//! use multiselect::widget::MultiSelect;
//!
//! let document = Arc::new(Document::new());
//! document.insert_select(
//!     SelectElement::new("fruits")
//!         .with_multiple(true)
//!         .with_option(OptionEntry::new("a", "Apple").selected(true))
//!         .with_option(OptionEntry::new("b", "Banana")),
//! );
//!
//! let mut widget = MultiSelect::attach(&document, "#fruits", MultiSelectConfig::new())?;
//! widget.changed.connect(|event| println!("{} -> {}", event.value, event.selected));
//!
//! widget.select_option("b");
//! assert_eq!(widget.selected_values(), vec!["a", "b"]);
//!
//! widget.reset();
//! assert_eq!(widget.selected_values(), vec!["a"]);
//! # Ok::<(), multiselect::Error>(())
//! ```

mod debug;
mod events;
mod multi_select;
mod placeholder;

use std::sync::atomic::{AtomicU64, Ordering};

pub use debug::SelectionTreeDebug;
pub use events::NodeRole;
pub use multi_select::MultiSelect;

/// Option count above which the search box is shown unless configured.
pub const SEARCH_THRESHOLD: usize = 10;

/// Identifies one widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A committed single-option selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    /// The widget that made the change.
    pub widget: WidgetId,
    pub value: String,
    pub label: String,
    /// `true` for a selection, `false` for a deselection.
    pub selected: bool,
    /// Number of selected options after the change.
    pub selected_count: usize,
}
