use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_non_16_9_viewport() {
    let mut config = Config::default();
    config.browser.width = 1600;
    config.browser.height = 1000;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "browser.width"));
}

#[test]
fn test_validate_viewport_bounds_inclusive() {
    let mut config = Config::default();
    for (w, h) in [(1280, 720), (3840, 2160)] {
        config.browser.width = w;
        config.browser.height = h;
        assert!(ConfigValidator::validate(&config).unwrap().is_valid());
    }
    config.browser.width = 1264;
    config.browser.height = 711;
    assert!(!ConfigValidator::validate(&config).unwrap().is_valid());
}

#[test]
fn test_validate_port_clash() {
    let mut config = Config::default();
    config.browser.proxy_port = config.browser.debug_port;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "browser.proxy_port"));
}

#[test]
fn test_validate_zero_ports() {
    let mut config = Config::default();
    config.browser.debug_port = 0;
    config.browser.proxy_port = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_edge_bias() {
    let mut config = Config::default();
    for bias in [0.0, -1.0, f64::NAN] {
        config.input.edge_bias = bias;
        let result = ConfigValidator::validate(&config).unwrap();
        assert!(result.errors.iter().any(|e| e.path == "input.edge_bias"));
    }
}

#[test]
fn test_validate_zero_typing_delay_warning() {
    let mut config = Config::default();
    config.input.typing_delay_ms = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "input.typing_delay_ms"));
}

#[test]
fn test_validate_large_jitter_warning() {
    let mut config = Config::default();
    config.input.scroll_jitter_ms = 500;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "input.scroll_jitter_ms"));
}

#[test]
fn test_validate_feed_url_scheme() {
    let mut config = Config::default();
    config.events.feed_url = "http://localhost:8765".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "events.feed_url"));
}

#[test]
fn test_validate_game_url_scheme() {
    let mut config = Config::default();
    config.browser.url = "game.mahjongsoul.com".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "browser.url"));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.timeouts.operation_secs = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "timeouts.operation_secs"));
}

#[test]
fn test_validate_missing_chrome_path_warning() {
    let mut config = Config::default();
    config.browser.chrome_path = Some("/nonexistent/chrome".to_string());

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "browser.chrome_path"));
}

#[test]
fn test_into_result() {
    let mut result = ValidationResult::default();
    result.add_warning(ValidationWarning::new("input.typing_delay_ms", "zero"));
    assert_eq!(result.into_result().unwrap().len(), 1);

    let mut result = ValidationResult::default();
    result.add_error(ValidationError::new("browser.width", "bad"));
    assert!(matches!(
        result.into_result(),
        Err(ConfigError::InvalidValue { ref field, .. }) if field == "browser.width"
    ));
}

#[test]
fn test_validation_result_add_warning() {
    let mut result = ValidationResult::default();
    result.add_warning(ValidationWarning::new("test", "warning"));
    assert!(result.is_valid()); // Warnings don't make it invalid
    assert_eq!(result.warnings.len(), 1);
}
