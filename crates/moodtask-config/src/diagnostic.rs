// SPDX-FileCopyrightText: 2026 Moodtask Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config diagnostics: figment errors become miette reports pointing at the
//! offending key in `moodtask.toml`, with a "did you mean" hint for typos.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::{Error as FigmentError, Kind};
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem found while loading or validating the configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key the section does not define (every section denies unknown fields).
    #[error("unknown key `{key}` in [{section}]")]
    #[diagnostic(
        code(moodtask::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        section: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a {section} setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that does not deserialize into its field's type.
    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(moodtask::config::invalid_type), help("`{key}` expects {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value that parsed but fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(moodtask::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(moodtask::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let listing = format!("this section accepts: {valid_keys}");
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {listing}"),
        None => listing,
    }
}

/// Turns every error figment collected into a diagnostic.
///
/// `sources` pairs a file path with its text; spans are resolved against the
/// file the error came from, or against the only source when there is one.
pub fn from_figment(err: FigmentError, sources: &[(String, String)]) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let src = source_of(&error, sources);
            let segments: Vec<String> = error.path.iter().map(ToString::to_string).collect();
            let message = error.to_string();
            match error.kind {
                Kind::UnknownField(key, accepted) => {
                    let section = segments.first().cloned().unwrap_or_default();
                    let (span, src) = locate(src, Some(section.as_str()), &key);
                    ConfigError::UnknownKey {
                        suggestion: closest_key(&key, accepted).map(str::to_string),
                        valid_keys: accepted.join(", "),
                        section,
                        key,
                        span,
                        src,
                    }
                }
                Kind::InvalidType(found, expected) => {
                    let (section, key) = match segments.as_slice() {
                        [section, key, ..] => (Some(section.as_str()), key.as_str()),
                        [key] => (None, key.as_str()),
                        [] => (None, ""),
                    };
                    let (span, src) = locate(src, section, key);
                    ConfigError::InvalidType {
                        key: segments.join("."),
                        found: found.to_string(),
                        expected,
                        span,
                        src,
                    }
                }
                _ => ConfigError::Other(message),
            }
        })
        .collect()
}

fn source_of<'a>(error: &FigmentError, sources: &'a [(String, String)]) -> Option<&'a (String, String)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });
    match file {
        Some(path) => sources.iter().find(|(p, _)| *p == path),
        None if sources.len() == 1 => sources.first(),
        None => None,
    }
}

fn locate(
    source: Option<&(String, String)>,
    section: Option<&str>,
    key: &str,
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    source
        .and_then(|(path, text)| {
            let offset = key_offset(text, section, key)?;
            Some((
                Some(SourceSpan::new(offset.into(), key.len())),
                Some(NamedSource::new(path, text.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `key = ...` inside the `[section]` table (or before any
/// table header when `section` is `None`).
pub fn key_offset(text: &str, section: Option<&str>, key: &str) -> Option<usize> {
    let mut table: Option<&str> = None;
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        let body = line.trim_start();
        let indent = line.len() - body.len();
        if let Some(header) = body.trim_end().strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            table = Some(header.trim());
        } else if table == section {
            let is_key = body
                .strip_prefix(key)
                .map(|rest| rest.trim_start().starts_with('='))
                .unwrap_or(false);
            if is_key {
                return Some(line_start + indent);
            }
        }
        line_start += line.len();
    }
    None
}

/// The accepted key most similar to `unknown`, if any scores above the
/// suggestion threshold.
pub fn closest_key(unknown: &str, accepted: &[&'static str]) -> Option<&'static str> {
    accepted
        .iter()
        .map(|&candidate| (candidate, strsim::jaro_winkler(unknown, candidate)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

/// Prints each error to stderr as a graphical miette report.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
