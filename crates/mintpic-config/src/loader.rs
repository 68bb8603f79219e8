// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./mintpic.toml` > `~/.config/mintpic/mintpic.toml` > `/etc/mintpic/mintpic.toml`
//! with environment variable overrides via `MINTPIC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::MintpicConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/mintpic/mintpic.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mintpic.toml";

/// Keys that may be overridden from `MINTPIC_*` environment variables.
const ENV_KEYS: &[&str] = &["namespace", "timeout", "debug", "api_list"];

/// Path of the per-user configuration file, if a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mintpic").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/mintpic/mintpic.toml` (system-wide)
/// 3. `~/.config/mintpic/mintpic.toml` (user XDG config)
/// 4. `./mintpic.toml` (local directory)
/// 5. `MINTPIC_*` environment variables
pub fn load_config() -> Result<MintpicConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<MintpicConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MintpicConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<MintpicConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(MintpicConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(MintpicConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Environment provider restricted to the known top-level keys, so that
/// unrelated `MINTPIC_*` variables never trip `deny_unknown_fields`.
fn env_provider() -> Env {
    Env::prefixed("MINTPIC_").only(ENV_KEYS)
}
