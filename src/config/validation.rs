//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot
//! work (unparseable bind address, overlapping route prefixes, and so on).
//! Every problem is reported, not just the first one.

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address `{0}`")]
    BindAddress(String),

    #[error("{field} `{value}` must start with `/`, must not end with `/` and must not be `/`")]
    Prefix { field: &'static str, value: String },

    #[error("proxy.route_prefix and assets.static_route are both `{0}`")]
    PrefixCollision(String),

    #[error("proxy.default_filename `{0}` must be non-empty and contain no `/`, `\\` or `\"`")]
    DefaultFilename(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check a parsed config. Pure; touches neither disk nor network.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let prefixes = [
        ("proxy.route_prefix", &config.proxy.route_prefix),
        ("assets.static_route", &config.assets.static_route),
    ];
    for (field, value) in prefixes {
        if !is_valid_prefix(value) {
            errors.push(ValidationError::Prefix {
                field,
                value: value.clone(),
            });
        }
    }

    if config.proxy.route_prefix == config.assets.static_route {
        errors.push(ValidationError::PrefixCollision(config.proxy.route_prefix.clone()));
    }

    let name = &config.proxy.default_filename;
    if name.is_empty()
        || name == "."
        || name.contains(['/', '\\', '"'])
        || name.chars().any(char::is_control)
    {
        errors.push(ValidationError::DefaultFilename(name.clone()));
    }

    if config.timeouts.connect_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    prefix.len() > 1
        && prefix.starts_with('/')
        && !prefix.ends_with('/')
        && !prefix.contains(['{', '}', '*'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.proxy.route_prefix = "proxy/".into();
        config.proxy.default_filename = "a/b".into();
        config.timeouts.request_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::BindAddress("not-an-address".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout("request_secs")));
    }

    #[test]
    fn test_prefix_collision() {
        let mut config = ProxyConfig::default();
        config.assets.static_route = "/proxy".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::PrefixCollision("/proxy".into())]);
    }

    #[test]
    fn test_root_prefix_rejected() {
        let mut config = ProxyConfig::default();
        config.proxy.route_prefix = "/".into();
        assert!(validate_config(&config).is_err());
    }
}
