//! Errors of the RLE reader.

use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
///
/// Board and evolution operations never fail; only reading patterns does.
#[derive(Debug, Display, Error)]
pub enum Error {
  /// Unable to read the pattern: {0}
  Io(#[from] std::io::Error),
  /// Missing header line `x = <width>, y = <height>`.
  MissingHeader,
  /// Invalid header at line {line}: {text:?}.
  InvalidHeader { line: usize, text: String },
  /// Unknown rule {rule:?} at line {line}. Only B3/S23 and B36/S23 are supported.
  UnknownRule { line: usize, rule: String },
  /// Invalid line {line}: {text:?}; expected `#` followed by one of C, c, N, O, r, P, R.
  InvalidPreHeader { line: usize, text: String },
  /// Invalid item {item:?} at line {line}; expected `<count>(b|o|$)`.
  InvalidItem { line: usize, item: char },
  /// Run count at line {line} must be greater than zero.
  ZeroRunCount { line: usize },
  /// Missing end of pattern `!`.
  MissingEnd,
}

pub type Result<T> = std::result::Result<T, Error>;
