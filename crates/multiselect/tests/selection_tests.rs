//! Tests for selection synchronization across the control, the model and
//! the rendered view.

use std::sync::Arc;

use multiselect::prelude::*;
use multiselect::render::classes;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn abc() -> SelectElement {
    SelectElement::new("letters")
        .with_multiple(true)
        .with_option(OptionEntry::new("a", "A").selected(true))
        .with_option(OptionEntry::new("b", "B"))
        .with_option(OptionEntry::new("c", "C"))
}

fn build(config: MultiSelectConfig) -> MultiSelect {
    init_tracing();
    MultiSelect::new(Arc::new(abc()), config).unwrap()
}

/// Model, mirror and view agree on every option.
fn assert_consistent(widget: &MultiSelect) {
    let control = widget.control();
    for option in widget.options() {
        let key = control.find(option.value()).unwrap();
        assert_eq!(option.is_selected(), control.is_selected(key));

        let row = option.rendered().unwrap();
        assert_eq!(
            widget.tree().has_class(row, classes::SELECTED),
            option.is_selected(),
            "row of {} out of sync",
            option.value()
        );
    }
    assert_eq!(
        widget.count_selected_options(),
        widget.options().filter(|o| o.is_selected()).count()
    );
    assert_eq!(widget.selected_values(), control.selected_values());
}

#[test]
fn test_round_trip() {
    let mut widget = build(MultiSelectConfig::new());
    assert_eq!(widget.count_selected_options(), 1);
    assert_eq!(widget.default_selections(), &["a".to_string()]);

    widget.select_option("b");
    assert_eq!(widget.selected_values(), vec!["a", "b"]);
    assert_consistent(&widget);

    widget.reset();
    assert_eq!(widget.selected_values(), vec!["a"]);
    assert_consistent(&widget);
}

#[test]
fn test_consistency_under_mixed_operations() {
    let mut widget = build(MultiSelectConfig::new().with_max(Some(2)).with_min(1));

    widget.select_option("c");
    assert_consistent(&widget);
    widget.select_option("b");
    assert_consistent(&widget);
    widget.unselect_option("a");
    widget.unselect_option("c");
    widget.unselect_option("b");
    assert_consistent(&widget);
    assert_eq!(widget.selected_values(), vec!["c"]);

    widget.select_all();
    assert_consistent(&widget);
    widget.unselect_all();
    assert_consistent(&widget);
    assert_eq!(widget.count_selected_options(), 1);
}

#[test]
fn test_consistency_after_direct_mirror_write() {
    let mut widget = build(MultiSelectConfig::new());
    let control = widget.control().clone();

    control.set_selected(control.find("a").unwrap(), false);
    control.set_selected(control.find("c").unwrap(), true);
    control.dispatch_event(ControlEvent::UpdateRequest);
    widget.process_events();

    assert_eq!(widget.selected_values(), vec!["c"]);
    assert_consistent(&widget);
}

#[test]
fn test_max_one_replaces_selection() {
    let mut widget = build(MultiSelectConfig::new().with_max(Some(1)));

    widget.select_option("b");
    assert_eq!(widget.selected_values(), vec!["b"]);
    assert_eq!(widget.count_selected_options(), 1);
    assert_consistent(&widget);
}

#[test]
fn test_min_one_keeps_last() {
    let mut widget = build(MultiSelectConfig::new().with_min(1));

    assert!(!widget.unselect_option("a"));
    assert!(widget.is_selected_value("a"));
}

#[test]
fn test_max_three_rejects_fourth() {
    init_tracing();
    let control = abc().with_option(OptionEntry::new("d", "D"));
    let mut widget =
        MultiSelect::new(Arc::new(control), MultiSelectConfig::new().with_max(Some(3))).unwrap();
    widget.select_option("b");
    widget.select_option("c");

    assert!(!widget.select_option("d"));
    assert_eq!(widget.selected_values(), vec!["a", "b", "c"]);
    assert_consistent(&widget);
}

#[test]
fn test_select_all_then_reset_restores_defaults() {
    let mut widget = build(MultiSelectConfig::new());

    widget.select_all();
    assert_eq!(widget.count_selected_options(), 3);

    widget.reset();
    assert_eq!(widget.selected_values(), widget.default_selections());
    assert_consistent(&widget);
}

#[test]
fn test_placeholder_in_every_mode() {
    for mode in [
        PlaceholderType::Default,
        PlaceholderType::Count,
        PlaceholderType::Static,
    ] {
        let mut widget = build(
            MultiSelectConfig::new()
                .with_placeholder("Choose letters")
                .with_placeholder_type(mode),
        );
        widget.unselect_option("a");

        let node = widget.placeholder_node().unwrap();
        assert_eq!(widget.tree().text(node), Some("Choose letters"));
    }
}

#[test]
fn test_page_interaction() {
    init_tracing();
    let document = Arc::new(Document::new());
    document.insert_select(abc().with_form("signup"));
    document.add_label("letters");
    let mut widget = MultiSelect::attach(&document, "#letters", MultiSelectConfig::new()).unwrap();

    let changes = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let changes_clone = changes.clone();
    widget
        .changed
        .connect(move |e| changes_clone.lock().push((e.value.clone(), e.selected)));

    document.click(ClickTarget::Label {
        for_id: "letters".into(),
    });
    widget.process_events();
    assert!(widget.is_open());

    let row = widget.find_option("c").unwrap().rendered().unwrap();
    document.click(ClickTarget::Node {
        widget: widget.id(),
        node: row,
    });
    widget.process_events();
    assert_eq!(widget.selected_values(), vec!["a", "c"]);
    assert_eq!(widget.chip_values(), vec!["a", "c"]);

    document.click(ClickTarget::Elsewhere);
    widget.process_events();
    assert!(!widget.is_open());

    document.reset_form("signup");
    widget.process_events();
    assert_eq!(widget.selected_values(), vec!["a"]);
    assert_consistent(&widget);

    assert_eq!(*changes.lock(), vec![("c".to_string(), true)]);
}

#[test]
fn test_two_widgets_on_one_control() {
    init_tracing();
    let control = Arc::new(abc());
    let mut first = MultiSelect::new(control.clone(), MultiSelectConfig::new()).unwrap();
    let mut second = MultiSelect::new(control, MultiSelectConfig::new()).unwrap();

    first.select_option("b");
    assert_eq!(first.pending_events(), 0);
    assert_eq!(second.pending_events(), 1);

    second.process_events();
    assert_eq!(second.chip_values(), vec!["a", "b"]);
    assert_consistent(&second);
}
