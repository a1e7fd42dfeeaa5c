//! Core systems for multiselect.
//!
//! This crate provides the foundation the selection widget is built on:
//!
//! - **Signal/Slot System**: Type-safe notifications ([`Signal`])
//! - **Property System**: Values with change detection ([`Property`])
//! - **Logging**: Tracing targets, tree formatting options, perf spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use multiselect_core::Signal;
//!
//! let changed = Signal::<usize>::new();
//! let conn_id = changed.connect(|count| {
//!     println!("{count} option(s) selected");
//! });
//!
//! changed.emit(2);
//! changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::{PerfSpan, TreeFormatOptions, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
