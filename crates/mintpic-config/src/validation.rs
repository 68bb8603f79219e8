// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Checks that serde cannot express: timeout floor, unique item names and
//! ids, URL shape, and response paths that actually parse.

use std::collections::HashSet;

use mintpic_jsonpath::JsonPath;

use crate::diagnostic::ConfigError;
use crate::model::{MIN_PRICE, MIN_TIMEOUT_MS, MintpicConfig};

/// Runs every check and reports all failures together.
pub fn validate_config(config: &MintpicConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.namespace.trim().is_empty() {
        errors.push(ConfigError::Invalid {
            message: "namespace must not be empty".to_string(),
        });
    }

    if config.timeout < MIN_TIMEOUT_MS {
        errors.push(ConfigError::Invalid {
            message: format!(
                "timeout must be at least {MIN_TIMEOUT_MS} ms, got {}",
                config.timeout
            ),
        });
    }

    let mut seen_names = HashSet::new();
    let mut seen_ids = HashSet::new();

    for (i, entry) in config.api_list.iter().enumerate() {
        if entry.name.trim().is_empty() {
            errors.push(ConfigError::Invalid {
                message: format!("api_list[{i}].name must not be empty"),
            });
        } else if !seen_names.insert(entry.name.as_str()) {
            errors.push(ConfigError::Invalid {
                message: format!("duplicate item name `{}` in api_list", entry.name),
            });
        }

        if let Some(id) = &entry.id {
            if id.trim().is_empty() {
                errors.push(ConfigError::Invalid {
                    message: format!("api_list[{i}].id must not be empty when set"),
                });
            } else if !seen_ids.insert(id.as_str()) {
                errors.push(ConfigError::Invalid {
                    message: format!("duplicate item id `{id}` in api_list"),
                });
            }
        }

        if let Some(price) = entry.price {
            if price < MIN_PRICE {
                errors.push(ConfigError::Invalid {
                    message: format!(
                        "api_list[{i}].price must be at least {MIN_PRICE}, got {price}"
                    ),
                });
            }
        }

        if let Err(reason) = check_http_url(&entry.url) {
            errors.push(ConfigError::Invalid {
                message: format!("api_list[{i}].url `{}` {reason}", entry.url),
            });
        }

        if !entry.is_direct() {
            if let Err(e) = JsonPath::parse(&entry.response) {
                errors.push(ConfigError::Invalid {
                    message: format!(
                        "api_list[{i}].response `{}` is not a valid JSONPath: {e}",
                        entry.response
                    ),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that `url` parses as an absolute http(s) URL with a host.
fn check_http_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    if url.chars().any(char::is_whitespace) {
        return Err("must not contain whitespace".to_string());
    }

    let parsed = url::Url::parse(url).map_err(|e| format!("is not a valid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("must start with http:// or https://".to_string());
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("has no host".to_string());
    }

    Ok(())
}
