//! Configuration validation.

use std::path::Path;

use majsoul_rpa_protocols::geometry::validate_viewport;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(first) => Err(ConfigError::InvalidValue {
                field: first.path,
                message: first.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_input(config, &mut result);
        Self::validate_events(config, &mut result);
        Self::validate_timeouts(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let browser = &config.browser;

        if !validate_viewport(browser.width, browser.height) {
            result.add_error(ValidationError::new(
                "browser.width",
                format!(
                    "{}x{} is not a 16:9 viewport between 1280x720 and 3840x2160",
                    browser.width, browser.height
                ),
            ));
        }

        if browser.debug_port == 0 {
            result.add_error(ValidationError::new("browser.debug_port", "Port cannot be 0"));
        }
        if browser.proxy_port == 0 {
            result.add_error(ValidationError::new("browser.proxy_port", "Port cannot be 0"));
        }
        if browser.debug_port != 0 && browser.debug_port == browser.proxy_port {
            result.add_error(ValidationError::new(
                "browser.proxy_port",
                "debug_port and proxy_port must differ",
            ));
        }

        if !browser.url.starts_with("http://") && !browser.url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.url",
                "url must start with http:// or https://",
            ));
        }

        if let Some(ref path) = browser.chrome_path {
            if !Path::new(path).exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome binary does not exist: {}", path),
                ));
            }
        }

        if browser.startup_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.startup_timeout_ms",
                "startup_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_input(config: &Config, result: &mut ValidationResult) {
        let input = &config.input;

        if !input.edge_bias.is_finite() || input.edge_bias <= 0.0 {
            result.add_error(ValidationError::new(
                "input.edge_bias",
                format!("edge_bias must be positive, got {}", input.edge_bias),
            ));
        }

        if input.max_sample_attempts == 0 {
            result.add_error(ValidationError::new(
                "input.max_sample_attempts",
                "max_sample_attempts must be greater than 0",
            ));
        }

        if input.typing_delay_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "input.typing_delay_ms",
                "typing_delay_ms is 0, text will be inserted in one step",
            ));
        } else if input.typing_jitter_ms > input.typing_delay_ms {
            result.add_warning(ValidationWarning::new(
                "input.typing_jitter_ms",
                "typing_jitter_ms exceeds typing_delay_ms, short pauses will be clamped at 0",
            ));
        }

        if input.scroll_jitter_ms > input.scroll_pause_ms {
            result.add_warning(ValidationWarning::new(
                "input.scroll_jitter_ms",
                "scroll_jitter_ms exceeds scroll_pause_ms, short pauses will be clamped at 0",
            ));
        }
    }

    fn validate_events(config: &Config, result: &mut ValidationResult) {
        let url = &config.events.feed_url;
        if !url.starts_with("ws://") && !url.starts_with("wss://") {
            result.add_error(ValidationError::new(
                "events.feed_url",
                "feed_url must start with ws:// or wss://",
            ));
        }

        if config.events.connect_timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "events.connect_timeout_secs",
                "connect_timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_timeouts(config: &Config, result: &mut ValidationResult) {
        for (key, secs) in config.timeouts.entries() {
            if secs == 0 {
                result.add_error(ValidationError::new(
                    format!("timeouts.{}", key),
                    format!("{} must be greater than 0", key),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
