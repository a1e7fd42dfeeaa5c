//! Logging and debugging facilities.
//!
//! This module provides:
//! - Target names for the `tracing` instrumentation used across the workspace
//! - Shared tree-drawing options for debug visualizations
//! - [`PerfSpan`], a guard that times an operation with a tracing span
//!
//! # Tracing Integration
//!
//! Nothing is printed unless the host installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("multiselect::engine=debug")
//!     .init();
//! ```

/// Span names used for tracing.
pub mod span_names {
    /// Full view resynchronization.
    pub const UPDATE: &str = "multiselect::update";
    /// Inbox event processing.
    pub const EVENTS: &str = "multiselect::events";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "multiselect_core::signal";
    /// Selection engine target.
    pub const ENGINE: &str = "multiselect::engine";
    /// Mirrored control target.
    pub const CONTROL: &str = "multiselect::control";
    /// Configuration target.
    pub const CONFIG: &str = "multiselect::config";
    /// Renderer and view tree target.
    pub const RENDER: &str = "multiselect::render";
    /// Performance spans target.
    pub const PERF: &str = "multiselect::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show handles/keys next to each node.
    pub show_ids: bool,
    /// Whether to show per-node flags (selected, default, visible).
    pub show_flags: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_flags: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }

    /// Options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_flags: false,
            ..Default::default()
        }
    }

    /// Whether a node at `depth` should be printed.
    pub fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }

    /// Build the prefix string for a tree node.
    pub fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.indent_size {
                prefix.push(' ');
            }
        }

        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time whole operations such as a view resync.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
