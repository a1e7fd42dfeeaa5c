//! Tests for building widgets from serialized configuration and
//! `data-ms-*` overrides.

use std::sync::Arc;

use multiselect::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_widget_from_json_config() {
    init_tracing();
    let config = MultiSelectConfig::from_json(
        r#"{
            "placeholder": "Pick fruit",
            "placeholderType": "count",
            "max": 2,
            "showMaxHint": true,
            "translations": { "selected": "%i picked" },
            "data": [
                { "value": "a", "text": "Apple", "selected": true },
                { "value": "b", "text": "Banana" },
                { "label": "Citrus", "options": [
                    { "value": "o", "text": "Orange" },
                    { "value": "l" }
                ] }
            ]
        }"#,
    )
    .unwrap();

    let control = Arc::new(SelectElement::new("fruits").with_multiple(true));
    let mut widget = MultiSelect::new(control.clone(), config).unwrap();

    assert_eq!(control.len(), 4);
    assert_eq!(widget.find_option("l").unwrap().label(), "l");
    assert_eq!(widget.groups()[1].label(), "Citrus");

    widget.select_option("o");
    let summary = widget.summary_node().unwrap();
    assert_eq!(widget.tree().text(summary), Some("2 picked"));
    let hint = widget.root_nodes().max_hint.unwrap();
    assert_eq!(widget.tree().text(hint), Some("2/2"));
    assert!(!widget.select_option("b"));
}

#[test]
fn test_widget_from_toml_config() {
    init_tracing();
    let config = MultiSelectConfig::from_toml(
        r#"
        selectAll = true
        search = true
        showApplyButton = true
        width = 320
        dropdownHeight = "50vh"

        [translations]
        selectAll = "Everything"
        "#,
    )
    .unwrap();

    let control = SelectElement::new("tags")
        .with_multiple(true)
        .with_option(OptionEntry::new("x", "X"))
        .with_option(OptionEntry::new("y", "Y"));
    let widget = MultiSelect::new(Arc::new(control), config).unwrap();
    let nodes = widget.root_nodes();

    assert!(widget.is_search_enabled());
    assert!(nodes.apply.is_some());
    assert_eq!(widget.tree().style(nodes.root, "width"), Some("320px"));
    assert_eq!(widget.tree().style(nodes.dropdown, "height"), Some("50vh"));

    let select_all = nodes.select_all.unwrap();
    let text = widget.tree().children(select_all)[1];
    assert_eq!(widget.tree().text(text), Some("Everything"));
}

#[test]
fn test_dataset_wins_over_config() {
    init_tracing();
    let document = Arc::new(Document::new());
    document.insert_select(
        SelectElement::new("sizes")
            .with_multiple(true)
            .with_data("ms-min", "1")
            .with_data("ms-placeholder-type", "static")
            .with_data("ms-label", "Sizes")
            .with_data("ms-max", "lots")
            .with_option(OptionEntry::new("s", "Small").selected(true))
            .with_option(OptionEntry::new("m", "Medium")),
    );

    let config = MultiSelectConfig::new().with_label("Ignored").with_max(Some(1));
    let mut widget = MultiSelect::attach(&document, "sizes", config).unwrap();

    assert_eq!(widget.min(), Some(1));
    assert_eq!(widget.max(), Some(1));
    assert!(!widget.unselect_option("s"));

    let summary = widget.summary_node().unwrap();
    assert_eq!(widget.tree().text(summary), Some("Sizes"));
}

#[test]
fn test_attach_failures() {
    init_tracing();
    let document = Arc::new(Document::new());
    document.insert_element("bio", "textarea");

    let err = MultiSelect::attach(&document, "#missing", MultiSelectConfig::new()).unwrap_err();
    assert!(matches!(err, Error::ElementNotFound { .. }));
    assert!(err.to_string().contains("missing"));

    let err = MultiSelect::attach(&document, "#bio", MultiSelectConfig::new()).unwrap_err();
    assert!(matches!(err, Error::NotASelectElement { .. }));
}

#[test]
fn test_invalid_config_documents() {
    assert!(matches!(
        MultiSelectConfig::from_json("[1, 2"),
        Err(Error::ConfigJson(_))
    ));
    assert!(matches!(
        MultiSelectConfig::from_toml("max = = 2"),
        Err(Error::ConfigToml(_))
    ));
}
