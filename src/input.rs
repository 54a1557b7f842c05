//! Reading the element count.

use std::io::{BufRead, Write};

use crate::error::{BenchError, Result};

/// Prompt printed before reading from stdin.
pub const PROMPT: &str = "Enter number of elements in array: ";

/// Parses an element count. Zero is accepted; negative or non-numeric
/// input is rejected.
pub fn parse_len(raw: &str) -> Result<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BenchError::InvalidInput("no element count given".into()));
    }
    let value: i64 = trimmed
        .parse()
        .map_err(|_| BenchError::InvalidInput(format!("'{trimmed}' is not an integer")))?;
    usize::try_from(value).map_err(|_| {
        BenchError::InvalidInput(format!("element count must not be negative (got {value})"))
    })
}

/// Prints [`PROMPT`] to `prompt` and reads one count from `reader`.
pub fn read_len<R: BufRead, W: Write>(reader: &mut R, prompt: &mut W) -> Result<usize> {
    write!(prompt, "{PROMPT}")?;
    prompt.flush()?;
    let mut line = String::new();
    reader.read_line(&mut line)?;
    parse_len(&line)
}
