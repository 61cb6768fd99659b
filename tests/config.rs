use vitalstats::core::period::Period;
use vitalstats::models::config::Config;

#[test]
fn test_config_defaults_when_sections_missing() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.owner, "local");
    assert_eq!(config.stats.default_period, Period::Month);
    assert_eq!(config.log.level, "warn");
}

#[test]
fn test_config_reads_known_default_period() {
    let config: Config = toml::from_str("[stats]\ndefault_period = \"quarter\"\n").unwrap();
    assert_eq!(config.stats.default_period, Period::Quarter);
}

#[test]
fn test_config_unknown_default_period_falls_back_to_month() {
    let config: Config = toml::from_str("[stats]\ndefault_period = \"fortnight\"\n").unwrap();
    assert_eq!(config.stats.default_period, Period::Month);

    let config: Config = toml::from_str("[stats]\ndefault_period = 7\n").unwrap();
    assert_eq!(config.stats.default_period, Period::Month);
}

#[test]
fn test_config_set_validates_values() {
    let mut config = Config::default();
    config.set("stats.default_period", "week").unwrap();
    assert_eq!(config.stats.default_period, Period::Week);
    assert!(config.set("stats.default_period", "decade").is_err());
    assert!(config.set("age", "0").is_err());
    assert!(config.set("gender", "robot").is_err());
    assert!(config.set("owner", "  ").is_err());
}
