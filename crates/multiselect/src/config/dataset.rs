//! Declarative overrides from `data-ms-*` attributes.

use std::collections::BTreeMap;

use multiselect_core::logging::targets;

use super::{Dimension, MultiSelectConfig, PlaceholderType};

/// Apply `data-ms-*` overrides to `config`.
///
/// `dataset` uses dataset keys (`msMax`, `msPlaceholderType`); the `ms`
/// prefix is stripped and the rest names the config key. Values that do not
/// parse are skipped with a warning; keys naming no config field are
/// ignored.
pub fn apply_dataset(config: &mut MultiSelectConfig, dataset: &BTreeMap<String, String>) {
    for (key, value) in dataset {
        let Some(name) = config_key(key) else {
            continue;
        };

        let applied = match name.as_str() {
            "placeholder" => {
                config.placeholder = value.clone();
                true
            }
            "label" => {
                config.label = value.clone();
                true
            }
            "name" => {
                config.name = value.clone();
                true
            }
            "placeholderType" => {
                config.placeholder_type = PlaceholderType::parse(value);
                true
            }
            "max" => assign(&mut config.max, parse_count(value).map(|max| Some(Some(max)))),
            "min" => assign(&mut config.min, parse_count(value).map(Some)),
            "showMaxHint" => assign(&mut config.show_max_hint, parse_flag(value)),
            "search" => assign(&mut config.search, parse_flag(value).map(Some)),
            "selectAll" => assign(&mut config.select_all, parse_flag(value)),
            "closeListOnItemSelect" => assign(
                &mut config.close_list_on_item_select,
                parse_flag(value).map(Some),
            ),
            "showCheckbox" => assign(&mut config.show_checkbox, parse_flag(value)),
            "showApplyButton" => assign(&mut config.show_apply_button, parse_flag(value)),
            "width" => {
                config.width = Some(Dimension::parse(value));
                true
            }
            "height" => {
                config.height = Some(Dimension::parse(value));
                true
            }
            "dropdownWidth" => {
                config.dropdown_width = Some(Dimension::parse(value));
                true
            }
            "dropdownHeight" => {
                config.dropdown_height = Some(Dimension::parse(value));
                true
            }
            _ => {
                tracing::trace!(target: targets::CONFIG, key = %key, "dataset key is not a config option");
                continue;
            }
        };

        if applied {
            tracing::debug!(target: targets::CONFIG, option = %name, value = %value, "applied dataset override");
        } else {
            tracing::warn!(target: targets::CONFIG, option = %name, value = %value, "invalid dataset override, skipped");
        }
    }
}

/// `msPlaceholderType` -> `placeholderType`.
fn config_key(key: &str) -> Option<String> {
    let rest = key.strip_prefix("ms")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

fn assign<T>(slot: &mut T, parsed: Option<T>) -> bool {
    match parsed {
        Some(value) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn parse_count(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_config_key() {
        assert_eq!(config_key("msMax").as_deref(), Some("max"));
        assert_eq!(config_key("msPlaceholderType").as_deref(), Some("placeholderType"));
        assert_eq!(config_key("ms"), None);
        assert_eq!(config_key("value"), None);
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = MultiSelectConfig::default();
        apply_dataset(
            &mut config,
            &dataset(&[
                ("msMax", "3"),
                ("msMin", "1"),
                ("msPlaceholder", "Choose"),
                ("msPlaceholderType", "count"),
                ("msShowMaxHint", ""),
                ("msSearch", "false"),
                ("msWidth", "300"),
            ]),
        );

        assert_eq!(config.max, Some(Some(3)));
        assert_eq!(config.min, Some(1));
        assert_eq!(config.placeholder, "Choose");
        assert_eq!(config.placeholder_type, PlaceholderType::Count);
        assert!(config.show_max_hint);
        assert_eq!(config.search, Some(false));
        assert_eq!(config.width, Some(Dimension::Pixels(300.0)));
    }

    #[test]
    fn test_invalid_values_skipped() {
        let mut config = MultiSelectConfig::default().with_max(Some(5));
        apply_dataset(
            &mut config,
            &dataset(&[("msMax", "lots"), ("msSelectAll", "maybe"), ("msHtml", "<b>x</b>")]),
        );

        assert_eq!(config.max, Some(Some(5)));
        assert!(!config.select_all);
    }
}
