//! Inbox processing: control events and page clicks.

use multiselect_core::PerfSpan;
use multiselect_core::logging::{span_names, targets};

use super::MultiSelect;
use crate::dom::{ClickTarget, ControlEvent, EventOrigin, NodeId};
use crate::render::classes;

/// What a rendered node does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRole {
    /// Toggles the dropdown.
    Header,
    /// Toggles the option with this value.
    Option(String),
    /// Selects all, or unselects all when everything is selected.
    SelectAll,
    /// Closes the dropdown and emits `applied`.
    Apply,
    /// The search input; clicks on it do nothing.
    Search,
}

/// An event waiting in a widget's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InboxEvent {
    Control(ControlEvent),
    Click(ClickTarget),
}

impl MultiSelect {
    /// Number of events waiting in the inbox.
    pub fn pending_events(&self) -> usize {
        self.inbox.lock().len()
    }

    /// Handle every queued control event and click, oldest first.
    ///
    /// Events raised while handling (e.g. a click that selects an option)
    /// are handled in the same call. Returns the number of events handled.
    pub fn process_events(&mut self) -> usize {
        let _perf = PerfSpan::new(span_names::EVENTS);

        let mut handled = 0;
        loop {
            let next = self.inbox.lock().pop_front();
            let Some(event) = next else {
                break;
            };

            tracing::trace!(target: targets::ENGINE, widget = %self.id, ?event, "handling event");
            match event {
                InboxEvent::Control(event) => self.handle_control_event(event),
                InboxEvent::Click(target) => self.handle_document_click(&target),
            }
            handled += 1;
        }
        handled
    }

    fn handle_control_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::ResetRequest | ControlEvent::FormReset => self.reset(),
            ControlEvent::UpdateRequest => self.update(),
            ControlEvent::Change { origin } => {
                if origin != EventOrigin::Widget(self.id) {
                    self.update();
                }
            }
        }
    }

    /// React to a click anywhere on the page.
    ///
    /// Clicks on this widget's nodes are routed to [`click_node`]; a click
    /// on a `<label>` for the control toggles the dropdown; a click on the
    /// control itself is ignored; anything else closes the dropdown.
    ///
    /// [`click_node`]: Self::click_node
    pub fn handle_document_click(&mut self, target: &ClickTarget) {
        match target {
            ClickTarget::Node { widget, node } if *widget == self.id => self.click_node(*node),
            ClickTarget::Label { for_id } if self.is_own_label(for_id) => self.toggle(),
            ClickTarget::Element { id } if id == self.control.id() => {}
            _ => self.close(),
        }
    }

    fn is_own_label(&self, for_id: &str) -> bool {
        for_id == self.control.id()
            && self
                .document
                .as_ref()
                .is_some_and(|(document, _)| document.has_label_for(for_id))
    }

    /// Route a click on one of this widget's nodes to the role of the
    /// nearest ancestor that has one.
    pub fn click_node(&mut self, node: NodeId) {
        let Some(role) = self.role_of(node) else {
            tracing::trace!(target: targets::ENGINE, ?node, "click on inert node");
            return;
        };

        match role {
            NodeRole::Header => self.toggle(),
            NodeRole::Option(value) => self.click_option(&value),
            NodeRole::SelectAll => {
                let active = self
                    .nodes
                    .select_all
                    .is_some_and(|node| self.tree.has_class(node, classes::SELECTED));
                if active {
                    self.unselect_all();
                } else {
                    self.select_all();
                }
            }
            NodeRole::Apply => {
                self.close();
                self.applied.emit(self.selected_values());
            }
            NodeRole::Search => {}
        }
    }

    fn role_of(&self, node: NodeId) -> Option<NodeRole> {
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(role) = self.roles.get(id) {
                return Some(role.clone());
            }
            current = self.tree.parent(id);
        }
        None
    }

    /// Toggle one option as if its row was clicked, then clear the search
    /// and close when configured to.
    pub fn click_option(&mut self, value: &str) {
        if self.is_selected_value(value) {
            self.unselect_option(value);
        } else {
            self.select_option(value);
        }

        self.clear_search();

        if self.close_on_select {
            self.close();
        }
    }
}
