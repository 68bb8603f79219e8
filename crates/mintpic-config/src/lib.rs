// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for mintpic.
//!
//! Settings come from `mintpic.toml` files layered with `MINTPIC_*`
//! environment variables. Unknown keys are rejected, and every problem found
//! is reported at once as a miette diagnostic.
//!
//! ```no_run
//! let config = mintpic_config::load_and_validate().expect("config errors");
//! println!("{} goods configured", config.api_list.len());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{ApiEntry, MintpicConfig};

/// Loads from the standard file locations and validates the result.
pub fn load_and_validate() -> Result<MintpicConfig, Vec<ConfigError>> {
    finish(loader::load_config(), discovered_sources)
}

/// Loads `path` (plus environment overrides) and validates the result.
pub fn load_and_validate_path(path: &Path) -> Result<MintpicConfig, Vec<ConfigError>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        vec![ConfigError::Load(format!(
            "cannot read {}: {e}",
            path.display()
        ))]
    })?;
    finish(loader::load_config_from_path(path), || {
        vec![(path.display().to_string(), content)]
    })
}

/// Loads a TOML document held in memory and validates the result.
pub fn load_and_validate_str(toml_content: &str) -> Result<MintpicConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validates a loaded config, or turns the load failure into diagnostics.
///
/// `sources` is only consulted on failure, to attach source spans.
fn finish(
    loaded: Result<MintpicConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<MintpicConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => validation::validate_config(&config).map(|()| config),
        Err(err) => Err(ConfigError::from_figment(err, &sources())),
    }
}

/// Contents of every config file that exists in the lookup hierarchy.
fn discovered_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|dir| dir.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.into());

    [
        Some(local),
        loader::user_config_path(),
        Some(loader::SYSTEM_CONFIG_PATH.into()),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        Some((path.display().to_string(), content))
    })
    .collect()
}
