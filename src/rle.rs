use std::fs;
use std::path::Path;
use itertools::Itertools;
use log::debug;
use regex::Regex;
use crate::error::*;
use crate::game::Game;
use crate::rule::{ParseRuleError, Rule};

/// Longest line the writer produces.
const MAX_LINE_LEN: usize = 69;

/// Read a Life pattern from a RLE string.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
///
/// Lines starting with `#` before the header set the metadata of the game:
/// `#C`/`#c` comment, `#N` pattern name, `#O` author, `#r` rule and
/// `#P`/`#R` the offset of the board. Living cells are written from `(0, 0)`
/// rightwards and downwards.
pub fn read(src: impl AsRef<str>) -> Result<Game> {
  let header_re = Regex::new(
    r"^x\s*=\s*([1-9][0-9]*)\s*,\s*y\s*=\s*([1-9][0-9]*)\s*(?:,\s*rule\s*=\s*(\S+)\s*)?$"
  ).unwrap();
  let offset_re = Regex::new(r"^[PR]\s*(-?[0-9]+)\s+(-?[0-9]+)$").unwrap();

  let mut game = Game::new();
  let mut lines = src.as_ref().lines().enumerate();

  let (line, header) = loop {
    let (n, text) = lines.next().ok_or(Error::MissingHeader)?;
    let text = text.trim();
    if text.is_empty() {
      continue;
    }
    match text.strip_prefix('#') {
      Some(text) => read_pre_header(text, n + 1, &offset_re, &mut game)?,
      None => break (n + 1, text),
    }
  };

  let caps = header_re.captures(header).ok_or_else(|| Error::InvalidHeader {
    line,
    text: header.to_owned(),
  })?;
  if let Some(rule) = caps.get(3) {
    game.board_mut().set_rule(parse_rule(rule.as_str(), line)?);
  }

  read_cells(lines, &mut game)?;
  Ok(game)
}

/// Reads a RLE file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Game> {
  let path = path.as_ref();
  let src = fs::read_to_string(path)?;
  let game = read(src)?;
  debug!(
    "read {}: rule {}, population {}",
    path.display(),
    game.board().rule(),
    game.board().population(),
  );
  Ok(game)
}

fn parse_rule(rule: &str, line: usize) -> Result<Rule> {
  rule.parse().map_err(|ParseRuleError(rule)| Error::UnknownRule { line, rule })
}

fn read_pre_header(
  text: &str,
  line: usize,
  offset_re: &Regex,
  game: &mut Game,
) -> Result<()> {
  let invalid = || Error::InvalidPreHeader {
    line,
    text: format!("#{}", text),
  };

  let mut chars = text.chars();
  let kind = chars.next().ok_or_else(invalid)?;
  let value = chars.as_str().trim_start();
  match kind {
    'C' | 'c' => game.add_comment(value),
    'N' => game.set_pattern_name(value),
    'O' => game.set_author(value),
    'r' => game.board_mut().set_rule(parse_rule(value, line)?),
    'P' | 'R' => {
      let caps = offset_re.captures(text).ok_or_else(invalid)?;
      let dx = caps[1].parse().map_err(|_| invalid())?;
      let dy = caps[2].parse().map_err(|_| invalid())?;
      game.board_mut().set_offset(dx, dy);
    }
    _ => return Err(invalid()),
  }
  Ok(())
}

fn read_cells<'a>(
  lines: impl Iterator<Item = (usize, &'a str)>,
  game: &mut Game,
) -> Result<()> {
  let board = game.board_mut();
  let mut x = 0i64;
  let mut y = 0i64;

  for (n, text) in lines {
    let line = n + 1;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
      if c.is_whitespace() {
        continue;
      }
      if c == '!' {
        return Ok(());
      }

      let mut num = 1i64;
      let mut tag = c;
      if let Some(d) = c.to_digit(10) {
        if d == 0 {
          return Err(Error::ZeroRunCount { line });
        }
        num = d as i64;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
          num = num.checked_mul(10)
            .and_then(|num| num.checked_add(d as i64))
            .ok_or(Error::InvalidItem { line, item: chars.peek().copied().unwrap_or(c) })?;
          chars.next();
        }
        tag = chars.next().ok_or(Error::InvalidItem { line, item: '\n' })?;
      }

      let overflow = || Error::InvalidItem { line, item: tag };
      match tag {
        'b' => {
          x = x.checked_add(num).ok_or_else(overflow)?;
        }
        '$' => {
          x = 0;
          y = y.checked_add(num).ok_or_else(overflow)?;
        }
        c if c.is_ascii_alphabetic() => {
          let end = x.checked_add(num).ok_or_else(overflow)?;
          for x in x..end {
            board.write(x, y, true);
          }
          x = end;
        }
        c => {
          return Err(Error::InvalidItem { line, item: c });
        }
      }
    }
  }

  Err(Error::MissingEnd)
}

/// Write a Life pattern to a RLE string.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
///
/// The pattern covers the bounding box of the board, so it may carry dead
/// margins.
pub fn write(game: &Game) -> String {
  let board = game.board();
  let mut output = String::new();

  if let Some(author) = game.author() {
    output.push_str(&format!("#O {}\n", author));
  }
  if let Some(name) = game.pattern_name() {
    output.push_str(&format!("#N {}\n", name));
  }
  let (dx, dy) = board.offset();
  if dx != 0 || dy != 0 {
    output.push_str(&format!("#R {} {}\n", dx, dy));
  }
  for comment in game.comments() {
    output.push_str(&format!("#C {}\n", comment));
  }

  let bounds = board.bounds();
  output.push_str(&format!(
    "x = {}, y = {}, rule = {}\n",
    bounds.width(),
    bounds.height(),
    board.rule(),
  ));

  let mut pending_rows = 0;
  for y in bounds.lower_y..=bounds.upper_y {
    let cells = (bounds.lower_x..=bounds.upper_x)
      .map(|x| board.read(x, y))
      .group_by(|&alive| alive);
    let mut runs = Vec::new();
    for (alive, run) in &cells {
      let unit = if alive { RleUnit::Alive } else { RleUnit::Dead };
      runs.push((unit, run.count() as u64));
    }
    if let Some((RleUnit::Dead, _)) = runs.last() {
      runs.pop();
    }

    if runs.is_empty() {
      pending_rows += 1;
      continue;
    }

    if pending_rows > 0 {
      RleUnit::NextRow.push(pending_rows, &mut output);
    }
    for (unit, count) in runs {
      unit.push(count, &mut output);
    }
    pending_rows = 1;
  }

  push_wrapped("!", &mut output);
  output.push('\n');
  output
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RleUnit {
  Dead,
  Alive,
  NextRow,
}

impl RleUnit {
  fn tag(self) -> char {
    match self {
      Self::Dead => 'b',
      Self::Alive => 'o',
      Self::NextRow => '$',
    }
  }

  /// Appends a run of `count` units; the count is left out when it is 1.
  fn push(self, count: u64, output: &mut String) {
    let item = match count {
      1 => self.tag().to_string(),
      n => format!("{}{}", n, self.tag()),
    };
    push_wrapped(&item, output);
  }
}

fn push_wrapped(buf: &str, s: &mut String) {
  let line_len = s.len() - s.rfind('\n').map_or(0, |i| i + 1);
  if line_len > 0 && line_len + buf.len() > MAX_LINE_LEN {
    s.push('\n');
  }
  s.push_str(buf);
}
