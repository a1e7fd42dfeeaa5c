//! Debug visualization of a widget's groups and options.
//!
//! ```text
//! fruits (2/5 selected, max 3)
//! ├── (ungrouped)
//! │  └── [x] Apple {default}
//! └── Citrus
//! │  ├── [ ] Orange
//! │  └── [x] Lemon
//! ```

use std::fmt;

use multiselect_core::{TreeFormatOptions, TreeStyle};

use super::MultiSelect;
use crate::model::{MultiSelectGroup, MultiSelectOption};

/// Displays a widget's group/option tree with selection markers.
///
/// Obtained from [`MultiSelect::debug_tree`] or
/// [`MultiSelect::debug_tree_with`].
pub struct SelectionTreeDebug<'a> {
    widget: &'a MultiSelect,
    options: TreeFormatOptions,
}

impl<'a> SelectionTreeDebug<'a> {
    pub fn new(widget: &'a MultiSelect, options: TreeFormatOptions) -> Self {
        Self { widget, options }
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widget = self.widget;
        write!(
            f,
            "{} ({}/{} selected",
            widget.name(),
            widget.count_selected_options(),
            widget.options().count()
        )?;
        if let Some(max) = widget.max() {
            write!(f, ", max {max}")?;
        }
        if let Some(min) = widget.min() {
            write!(f, ", min {min}")?;
        }
        write!(f, ")")
    }

    fn write_group(&self, f: &mut fmt::Formatter<'_>, group: &MultiSelectGroup, is_last: bool) -> fmt::Result {
        let label = if group.is_ungrouped() {
            "(ungrouped)"
        } else {
            group.label()
        };
        writeln!(f, "{}{}", self.options.prefix(1, is_last), label)?;

        if !self.options.within_depth(2) {
            return Ok(());
        }

        let count = group.len();
        for (index, option) in group.values().iter().enumerate() {
            let prefix = self.options.prefix(2, index + 1 == count);
            write!(f, "{prefix}")?;
            self.write_option(f, option)?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_option(&self, f: &mut fmt::Formatter<'_>, option: &MultiSelectOption) -> fmt::Result {
        let marker = if option.is_selected() { "[x]" } else { "[ ]" };
        write!(f, "{marker} {}", option.label())?;

        if self.options.show_ids {
            write!(f, " #{}", option.value())?;
        }

        if self.options.show_flags {
            let mut flags = Vec::new();
            if option.is_default_value() {
                flags.push("default");
            }
            if let Some(row) = option.rendered()
                && !self.widget.tree().is_visible(row)
            {
                flags.push("hidden");
            }
            if !flags.is_empty() {
                write!(f, " {{{}}}", flags.join(", "))?;
            }
        }
        Ok(())
    }

    fn write_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        write!(f, ":")?;
        for group in self.widget.groups().iter().filter(|g| !g.is_empty()) {
            let values: Vec<String> = group
                .values()
                .iter()
                .map(|option| {
                    let star = if option.is_selected() { "*" } else { "" };
                    format!("{}{star}", option.value())
                })
                .collect();
            let label = if group.is_ungrouped() { "" } else { group.label() };
            write!(f, " {label}[{}]", values.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectionTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.options.style == TreeStyle::Compact {
            return self.write_compact(f);
        }

        self.write_header(f)?;
        writeln!(f)?;

        if !self.options.within_depth(1) {
            return Ok(());
        }

        let groups: Vec<&MultiSelectGroup> = self
            .widget
            .groups()
            .iter()
            .filter(|group| !group.is_empty())
            .collect();
        let count = groups.len();
        for (index, group) in groups.into_iter().enumerate() {
            self.write_group(f, group, index + 1 == count)?;
        }
        Ok(())
    }
}

impl MultiSelect {
    /// A displayable tree of groups and options with default formatting.
    pub fn debug_tree(&self) -> SelectionTreeDebug<'_> {
        SelectionTreeDebug::new(self, TreeFormatOptions::default())
    }

    /// A displayable tree of groups and options.
    pub fn debug_tree_with(&self, options: TreeFormatOptions) -> SelectionTreeDebug<'_> {
        SelectionTreeDebug::new(self, options)
    }
}
