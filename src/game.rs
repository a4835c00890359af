use crate::board::Board;

/// A board together with the metadata of the pattern file it came from.
#[derive(Debug, Default, Clone)]
pub struct Game {
  board: Board,
  pattern_name: Option<String>,
  author: Option<String>,
  comments: Vec<String>,
}

impl Game {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_board(board: Board) -> Self {
    Self {
      board,
      ..Self::default()
    }
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn board_mut(&mut self) -> &mut Board {
    &mut self.board
  }

  pub fn into_board(self) -> Board {
    self.board
  }

  pub fn pattern_name(&self) -> Option<&str> {
    self.pattern_name.as_deref()
  }

  pub fn author(&self) -> Option<&str> {
    self.author.as_deref()
  }

  pub fn comments(&self) -> &[String] {
    &self.comments
  }

  /// Appends a comment line, without its line terminator.
  pub fn add_comment(&mut self, comment: impl AsRef<str>) {
    let comment = comment.as_ref();
    let comment = comment.strip_suffix('\n').unwrap_or(comment);
    let comment = comment.strip_suffix('\r').unwrap_or(comment);
    self.comments.push(comment.to_owned());
  }

  pub fn set_author(&mut self, author: impl Into<String>) {
    self.author = Some(author.into());
  }

  pub fn set_pattern_name(&mut self, name: impl Into<String>) {
    self.pattern_name = Some(name.into());
  }

  /// Copies author and pattern name into `other` and appends the comments
  /// to its own. The board of `other` is left alone.
  pub fn clone_metadata(&self, other: &mut Game) {
    if let Some(author) = &self.author {
      other.set_author(author.clone());
    }
    for comment in &self.comments {
      other.add_comment(comment);
    }
    if let Some(name) = &self.pattern_name {
      other.set_pattern_name(name.clone());
    }
  }
}
