//! Field extraction filter: select delimiter-separated fields from lines of
//! text.
//!
//! An independent leaf tool with no concurrency and no shared state; it
//! reads synchronously and writes one output line per input line.

use std::io::{BufRead, Write};

use crate::{PipechatError, Result};

/// Largest accepted field index.
const MAX_FIELD_INDEX: usize = 1_000_000;

/// Parse a field list such as `"1,3"` into 1-based indices.
///
/// Indices are separated by commas and/or whitespace, must be strictly
/// positive, and are kept in the given order. An empty list is invalid.
pub fn parse_fields(spec: &str) -> Result<Vec<usize>> {
    let mut fields = Vec::new();
    for token in spec.split(|c: char| c == ',' || c.is_ascii_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let index: usize = token
            .parse()
            .map_err(|_| PipechatError::Validation(format!("invalid field list: {spec}")))?;
        if index == 0 || index > MAX_FIELD_INDEX {
            return Err(PipechatError::Validation(format!(
                "invalid field list: {spec}"
            )));
        }
        fields.push(index);
    }
    if fields.is_empty() {
        return Err(PipechatError::Validation(format!(
            "invalid field list: {spec}"
        )));
    }
    Ok(fields)
}

/// Select the requested fields from one line.
///
/// Fields are emitted in their original order of occurrence, re-joined with
/// the input delimiter, regardless of the order of the index list. A field
/// index requested more than once still emits its token once.
pub fn select_fields(line: &str, delimiter: char, fields: &[usize]) -> String {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let mut out = String::new();
    let mut printed_any = false;

    for (i, token) in line.split(delimiter).enumerate() {
        if fields.contains(&(i + 1)) {
            if printed_any {
                out.push(delimiter);
            }
            out.push_str(token);
            printed_any = true;
        }
    }
    out
}

/// Run the filter over every input line.
pub fn run<R, W>(input: R, output: &mut W, delimiter: char, fields: &[usize]) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        writeln!(output, "{}", select_fields(&line, delimiter, fields))?;
    }
    Ok(())
}
