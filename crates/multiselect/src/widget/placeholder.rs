//! Header summary: placeholder, chips, count/static summary and max hint.

use multiselect_core::logging::targets;

use super::MultiSelect;
use crate::config::PlaceholderType;

impl MultiSelect {
    /// Recompute the header from the current selection.
    ///
    /// With nothing selected the placeholder is shown in every mode. In the
    /// default mode chips are diffed by value: only chips of newly selected
    /// options are created and only chips of unselected options removed.
    pub fn update_placeholder(&mut self) {
        let count = self.count_selected_options();

        if self.config.show_max_hint
            && let (Some(hint), Some(max)) = (self.nodes.max_hint, self.max)
        {
            self.tree.set_text(hint, format!("{count}/{max}"));
        }

        if count == 0 {
            self.remove_chips();
            self.remove_summary();
            self.show_placeholder();
            return;
        }

        if let Some(placeholder) = self.placeholder_node.take() {
            self.tree.remove(placeholder);
        }

        match self.config.placeholder_type {
            PlaceholderType::Count => {
                self.remove_chips();
                let text = self.config.translations.format_count("selected", count);
                self.show_summary(text);
            }
            PlaceholderType::Static => {
                self.remove_chips();
                let text = self.config.label.clone();
                self.show_summary(text);
            }
            PlaceholderType::Default => {
                self.remove_summary();
                self.sync_chips();
            }
        }
    }

    fn show_placeholder(&mut self) {
        match self.placeholder_node {
            Some(node) => self.tree.set_text(node, self.config.placeholder.as_str()),
            None => {
                let node = self
                    .renderer
                    .render_placeholder(&mut self.tree, &self.config.placeholder);
                self.tree.prepend(self.nodes.header, node);
                self.placeholder_node = Some(node);
            }
        }
    }

    fn show_summary(&mut self, text: String) {
        match self.summary_node {
            Some(node) => self.tree.set_text(node, text),
            None => {
                let node = self.renderer.render_summary(&mut self.tree, &text);
                self.tree.prepend(self.nodes.header, node);
                self.summary_node = Some(node);
            }
        }
    }

    fn remove_summary(&mut self) {
        if let Some(node) = self.summary_node.take() {
            self.tree.remove(node);
        }
    }

    fn remove_chips(&mut self) {
        for group in &mut self.groups {
            for option in group.values_mut() {
                if let Some(chip) = option.take_chip() {
                    self.tree.remove(chip);
                }
            }
        }
    }

    /// Add chips for selected options that lack one, drop chips of
    /// unselected options. Chips go right before the max hint.
    fn sync_chips(&mut self) {
        let header = self.nodes.header;
        let max_hint = self.nodes.max_hint;

        for group in &mut self.groups {
            for option in group.values_mut() {
                match (option.is_selected(), option.chip()) {
                    (true, None) => {
                        let chip = self.renderer.render_chip(
                            &mut self.tree,
                            option.value(),
                            option.display_content(),
                        );
                        match max_hint {
                            Some(hint) => self.tree.insert_before(header, chip, hint),
                            None => self.tree.append_child(header, chip),
                        }
                        option.set_chip(chip);
                        tracing::trace!(target: targets::RENDER, value = option.value(), "chip added");
                    }
                    (false, Some(_)) => {
                        if let Some(chip) = option.take_chip() {
                            self.tree.remove(chip);
                        }
                        tracing::trace!(target: targets::RENDER, value = option.value(), "chip removed");
                    }
                    _ => {}
                }
            }
        }
    }

    /// Values of the options that currently have a header chip, in header
    /// order.
    pub fn chip_values(&self) -> Vec<String> {
        let chips: Vec<_> = self
            .options()
            .filter_map(|option| option.chip().map(|chip| (chip, option.value())))
            .collect();

        self.tree
            .children(self.nodes.header)
            .iter()
            .filter_map(|node| {
                chips
                    .iter()
                    .find(|(chip, _)| chip == node)
                    .map(|(_, value)| value.to_string())
            })
            .collect()
    }
}
