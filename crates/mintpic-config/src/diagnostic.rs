// SPDX-FileCopyrightText: 2026 Mintpic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment reports deserialization problems with a key path but without a
//! position in the file. The conversions here point miette at the offending
//! line of the TOML source and suggest the closest valid key for typos.

#![allow(unused_assignments)] // triggered by code the miette derive expands to

use std::path::Path;

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key needs before it is offered as a fix.
const MIN_SIMILARITY: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("`{key}` is not a recognized setting{}", in_section(.section))]
    #[diagnostic(
        code(mintpic::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), expected))
    )]
    UnknownKey {
        key: String,
        /// Dotted path of the table holding the key; `None` at top level.
        section: Option<String>,
        suggestion: Option<String>,
        expected: Vec<String>,
        #[label("unrecognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}, expected {expected}")]
    #[diagnostic(code(mintpic::config::wrong_type))]
    WrongType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("`{key}` is required but missing")]
    #[diagnostic(
        code(mintpic::config::missing_key),
        help("set `{key}` in mintpic.toml")
    )]
    MissingKey { key: String },

    /// Semantic check failed after deserialization.
    #[error("{message}")]
    #[diagnostic(code(mintpic::config::invalid))]
    Invalid { message: String },

    /// The configuration could not be read or parsed at all.
    #[error("{0}")]
    #[diagnostic(code(mintpic::config::load))]
    Load(String),
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::Invalid`] error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Splits a figment error into one diagnostic per underlying problem.
    ///
    /// `sources` pairs each TOML file path with its contents and is used to
    /// attach source spans to unknown keys.
    pub fn from_figment(err: figment::Error, sources: &[(String, String)]) -> Vec<Self> {
        err.into_iter()
            .map(|error| Self::from_single(error, sources))
            .collect()
    }

    fn from_single(error: figment::Error, sources: &[(String, String)]) -> Self {
        match &error.kind {
            Kind::UnknownField(field, valid) => {
                let (span, src) = match source_for(&error, sources) {
                    Some((name, content)) => match locate_key(content, &error.path, field) {
                        Some(offset) => (
                            Some(SourceSpan::new(offset.into(), field.len())),
                            Some(NamedSource::new(name, content.clone())),
                        ),
                        None => (None, None),
                    },
                    None => (None, None),
                };
                ConfigError::UnknownKey {
                    key: field.clone(),
                    section: (!error.path.is_empty()).then(|| dotted(&error.path)),
                    suggestion: closest_key(field, valid).map(str::to_string),
                    expected: valid.iter().map(|k| k.to_string()).collect(),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => {
                let mut path = error.path.clone();
                path.push(field.to_string());
                ConfigError::MissingKey {
                    key: dotted(&path),
                }
            }
            Kind::InvalidType(found, expected) => ConfigError::WrongType {
                key: dotted(&error.path),
                found: found.to_string(),
                expected: expected.clone(),
            },
            _ => ConfigError::Load(error.to_string()),
        }
    }
}

fn in_section(section: &Option<String>) -> String {
    match section {
        Some(s) => format!(" in `{s}`"),
        None => String::new(),
    }
}

fn unknown_key_help(suggestion: Option<&str>, expected: &[String]) -> String {
    let valid = expected.join(", ");
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys here: {valid}"),
        None => format!("valid keys here: {valid}"),
    }
}

/// Renders a figment key path, writing numeric elements as indices:
/// `["api_list", "1", "url"]` becomes `api_list[1].url`.
fn dotted(path: &[String]) -> String {
    let mut out = String::new();
    for segment in path {
        if segment.parse::<usize>().is_ok() {
            out.push_str(&format!("[{segment}]"));
        } else {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(segment);
        }
    }
    out
}

/// Picks the source file the error came from. Inline strings carry no path,
/// so a lone candidate is used as-is.
fn source_for<'a>(
    error: &figment::Error,
    sources: &'a [(String, String)],
) -> Option<&'a (String, String)> {
    let from_metadata = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| s.file_path())
        .and_then(|file| sources.iter().find(|(p, _)| Path::new(p) == file));

    from_metadata.or(match sources {
        [only] => Some(only),
        _ => None,
    })
}

/// Byte offset of the `key = ...` assignment inside `section` of a TOML
/// document.
///
/// `section` is the figment path of the table holding the key. A numeric
/// second element selects the n-th `[[table]]` of an array of tables. The
/// search stops at the next table header.
pub fn locate_key(content: &str, section: &[String], key: &str) -> Option<usize> {
    let start = section_start(content, section)?;
    let mut offset = start;

    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let body = &line[indent..];
        if body.starts_with('[') {
            break;
        }
        let assigns_key = body
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if assigns_key {
            return Some(offset + indent);
        }
        offset += line.len();
    }

    None
}

fn section_start(content: &str, section: &[String]) -> Option<usize> {
    let (table, nth) = match section {
        [] => return Some(0),
        [table] => (table, 0),
        [table, index, ..] => (table, index.parse().unwrap_or(0)),
    };

    let array_header = format!("[[{table}]]");
    if let Some((pos, _)) = content.match_indices(&array_header).nth(nth) {
        return Some(pos + array_header.len());
    }
    let table_header = format!("[{table}]");
    content
        .find(&table_header)
        .map(|pos| pos + table_header.len())
}

/// The candidate most similar to `unknown`, if any is similar enough.
pub fn closest_key<'a>(unknown: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .map(|&c| (c, strsim::jaro_winkler(unknown, c)))
        .filter(|&(_, score)| score > MIN_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(c, _)| c)
}

/// Prints each error to stderr with miette's graphical report handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("error: {error}"),
        }
    }
}
