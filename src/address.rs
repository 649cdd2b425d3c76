//! Line addresses and address ranges.
//!
//! An address is one of `N` (absolute), `+N`/`-N` (relative to the current
//! line), `.` (current line) or `$` (last line). A range is `addr` or
//! `addr,addr`. Resolution never fails by itself: a value outside the buffer
//! is only rejected when the range is validated.

use crate::{Buffer, ErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-]?)([0-9]+)").expect("address pattern is valid"));

/// A pair of resolved, not yet validated, line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: i64,
    pub end: i64,
}

impl Range {
    #[must_use]
    pub fn single(line: i64) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Check `1 <= start <= end <= line_count` and return the bounds as
    /// line numbers.
    ///
    /// # Errors
    /// [`ErrorKind::MalformedAddress`] if the range isn't inside the buffer.
    pub fn validate(self, line_count: usize) -> Result<(usize, usize), ErrorKind> {
        let start = usize::try_from(self.start).map_err(|_| ErrorKind::MalformedAddress)?;
        let end = usize::try_from(self.end).map_err(|_| ErrorKind::MalformedAddress)?;

        if start >= 1 && start <= end && end <= line_count {
            Ok((start, end))
        } else {
            Err(ErrorKind::MalformedAddress)
        }
    }
}

/// Line number as a signed address value. Saturates, buffers never get
/// anywhere near `i64::MAX` lines.
#[must_use]
pub fn to_address(line_no: usize) -> i64 {
    i64::try_from(line_no).unwrap_or(i64::MAX)
}

/// Resolve one address at the start of `input`.
///
/// Returns the value and the unconsumed rest of the input, or `None` if
/// `input` doesn't start with an address.
#[must_use]
pub fn parse_address<'a>(input: &'a str, buffer: &Buffer) -> Option<(i64, &'a str)> {
    let current = to_address(buffer.current_line());

    if let Some(caps) = NUMBER.captures(input) {
        let whole = caps.get(0)?;
        // Too many digits: saturate, validation rejects it later
        let n: i64 = caps[2].parse().unwrap_or(i64::MAX);
        let value = match &caps[1] {
            "-" => current.saturating_sub(n),
            "+" => current.saturating_add(n),
            _ => n,
        };
        log::trace!("address {:?} -> {value}", whole.as_str());
        return Some((value, &input[whole.end()..]));
    }

    let value = match input.chars().next()? {
        '.' => current,
        '$' => to_address(buffer.len()),
        _ => return None,
    };
    Some((value, &input[1..]))
}

/// Resolve the optional `addr` or `addr,addr` prefix of a command line.
///
/// # Errors
/// [`ErrorKind::MalformedAddress`] for a comma with no address on either
/// side of it.
pub fn parse_range<'a>(
    input: &'a str,
    buffer: &Buffer,
) -> Result<(Option<Range>, &'a str), ErrorKind> {
    let Some((start, rest)) = parse_address(input, buffer) else {
        if input.starts_with(',') {
            return Err(ErrorKind::MalformedAddress);
        }
        return Ok((None, input));
    };

    let Some(after_comma) = rest.strip_prefix(',') else {
        return Ok((Some(Range::single(start)), rest));
    };

    match parse_address(after_comma, buffer) {
        Some((end, rest)) => Ok((Some(Range { start, end }), rest)),
        None => Err(ErrorKind::MalformedAddress),
    }
}
