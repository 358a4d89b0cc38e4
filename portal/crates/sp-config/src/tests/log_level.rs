use crate::LogLevel;

use std::str::FromStr;

use log::LevelFilter;

#[test]
fn given_known_level_names_when_parsed_then_case_is_ignored() {
    assert_eq!(LogLevel::from_str("DEBUG").unwrap().0, LevelFilter::Debug);
    assert_eq!(LogLevel::from_str("Warn").unwrap().0, LevelFilter::Warn);
    assert_eq!(LogLevel::from_str("off").unwrap().0, LevelFilter::Off);
}

#[test]
fn given_unknown_level_when_parsed_then_defaults_to_info() {
    assert_eq!(LogLevel::from_str("loud").unwrap().0, LevelFilter::Info);
}

#[test]
fn given_toml_level_when_deserialized_then_wraps_filter() {
    #[derive(serde::Deserialize)]
    struct Holder {
        level: LogLevel,
    }

    let holder: Holder = toml::from_str("level = \"trace\"").unwrap();
    assert_eq!(*holder.level, LevelFilter::Trace);
}
