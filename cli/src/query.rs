// SPDX-License-Identifier: MIT OR Apache-2.0

//! URL-style level options, e.g. `xFieldsMin=6&xFieldsMax=10&seed=abc`

use anyhow::{anyhow, Context, Result};
use challenchess_core::{LevelOptions, Seed};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Split a query string into key/value pairs.
///
/// The whole string is percent-decoded first, leaving escapes of URI
/// delimiters such as `%26` and `%3D` untouched, so `seed=a%26b` keeps
/// `a%26b` as its seed text. Pairs are then separated by `&`, key and value
/// by the first `=`. A pair without `=` maps to an empty value and a
/// leading `?` is ignored.
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = BTreeMap::new();
    if query.is_empty() {
        return params;
    }
    let decoded = percent_decode(query);
    for pair in decoded.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(key.to_string(), value.to_string());
    }
    params
}

/// Overwrite `options` with every recognized key in `params`
pub fn apply_query(options: &mut LevelOptions, params: &BTreeMap<String, String>) -> Result<()> {
    for (key, value) in params {
        match key.as_str() {
            "xFieldsMin" => options.x_fields_min = parse_number(key, value)?,
            "xFieldsMax" => options.x_fields_max = parse_number(key, value)?,
            "yFieldsMin" => options.y_fields_min = parse_number(key, value)?,
            "yFieldsMax" => options.y_fields_max = parse_number(key, value)?,
            "stepCountMin" => options.step_count_min = parse_number(key, value)?,
            "stepCountMax" => options.step_count_max = parse_number(key, value)?,
            // text seeds keep levels shared as links reproducible
            "seed" if value.is_empty() => options.seed = None,
            "seed" => options.seed = Some(Seed::Text(value.clone())),
            "replaceAfterCapture" => options.replace_after_capture = parse_flag(key, value)?,
            _ => tracing::warn!("Ignoring unknown level option \"{}\"", key),
        }
    }
    Ok(())
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse::<T>()
        .with_context(|| format!("Invalid value for {}: \"{}\"", key, value))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "" | "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(anyhow!("Invalid value for {}: \"{}\"", key, other)),
    }
}

/// Bytes whose escapes survive decoding
const RESERVED: &[u8] = b";/?:@&=+$,#";

/// Decode `%XX` escapes except those of [`RESERVED`] bytes; malformed
/// escapes are kept as they are
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                let byte = hi << 4 | lo;
                if !RESERVED.contains(&byte) {
                    out.push(byte);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
