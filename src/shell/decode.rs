//! Decoding the variable dump printed after a sourced config script.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use super::CorrelationToken;
use crate::config::defaults::DUMP_NAME_PATTERN;
use crate::config::{Catalog, OptionName, OptionValue, OptionValues};

static DUMP_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DUMP_NAME_PATTERN).unwrap_or_else(|e| panic!("invalid dump pattern: {e}"))
});

/// Decodes the dump that follows `token` in `stdout`.
///
/// Lines are trimmed and blank lines dropped. Everything up to and including
/// the token line is discarded, whatever it contains. Each remaining line is
/// split on its first `=`; names outside the catalog, undecodable values and
/// malformed lines are skipped. If the token never appears, nothing is decoded.
#[must_use]
pub fn decode(catalog: &Catalog, stdout: &str, token: &CorrelationToken) -> OptionValues {
    let lines: Vec<&str> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some(start) = lines.iter().position(|line| *line == token.as_str()) else {
        tracing::debug!("Correlation token missing from config script output");
        return OptionValues::new();
    };

    lines[start + 1..]
        .iter()
        .filter_map(|line| decode_line(catalog, line))
        .collect()
}

fn decode_line(catalog: &Catalog, line: &str) -> Option<(OptionName, OptionValue)> {
    let Some((name, encoded)) = line.split_once('=') else {
        tracing::trace!("Skipping malformed dump line");
        return None;
    };
    if !DUMP_NAME.is_match(name) {
        tracing::trace!("Skipping unexpected variable {name}");
        return None;
    }
    let option = catalog.option_of(name)?;

    let bytes = STANDARD
        .decode(encoded)
        .inspect_err(|e| tracing::trace!("Skipping {name}: {e}"))
        .ok()?;
    let text = String::from_utf8(bytes)
        .inspect_err(|_| tracing::trace!("Skipping {name}: value is not UTF-8"))
        .ok()?;

    Some((option, OptionValue::from_env_text(option.kind(), &text)))
}
