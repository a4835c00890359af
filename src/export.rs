use crate::board::Board;
use crate::game::Game;

/// The bounding box of `board`, one line per row from the lowest `y`:
/// `O` for a living cell, a space for a dead one.
pub fn board_ascii(board: &Board) -> String {
  let bounds = board.bounds();
  let mut output = String::with_capacity(
    ((bounds.width() + 1) * bounds.height()).max(0) as usize);
  for y in bounds.lower_y..=bounds.upper_y {
    for x in bounds.lower_x..=bounds.upper_x {
      output.push(if board.read(x, y) { 'O' } else { ' ' });
    }
    output.push('\n');
  }
  output
}

/// Human readable dump of a game: its metadata, then the board.
pub fn write_ascii(game: &Game) -> String {
  let mut output = String::new();
  if let Some(author) = game.author() {
    output.push_str(&format!("Author: {}\n", author));
  }
  if let Some(name) = game.pattern_name() {
    output.push_str(&format!("Pattern name: {}\n", name));
  }
  let (dx, dy) = game.board().offset();
  if dx != 0 || dy != 0 {
    output.push_str(&format!("Shift from origin: ({}, {})\n", dx, dy));
  }
  if !game.comments().is_empty() {
    output.push_str("Info:\n");
    for comment in game.comments() {
      output.push_str(comment);
      output.push('\n');
    }
    output.push('\n');
  }
  output.push_str("Pattern:\n");
  output.push_str(&board_ascii(game.board()));
  output
}
