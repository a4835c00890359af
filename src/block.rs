/// Side length of a block, in cells.
pub const BLOCK_SIZE: usize = 32;

/// One row of a block. Bit `x` is the cell `(x, row)`.
pub(crate) type Row = u32;

/// A `BLOCK_SIZE` x `BLOCK_SIZE` tile of cells.
///
/// An all-zero block is equivalent to a missing one. Emptiness is computed
/// on demand by [`Block::is_empty`], never tracked.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub(crate) struct Block {
  rows: [Row; BLOCK_SIZE],
}

impl Block {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// `x` and `y` must be in `0..BLOCK_SIZE`.
  #[inline]
  pub(crate) fn read(&self, x: usize, y: usize) -> bool {
    debug_assert!(x < BLOCK_SIZE && y < BLOCK_SIZE);
    self.rows[y] >> x & 1 != 0
  }

  #[inline]
  pub(crate) fn write(&mut self, x: usize, y: usize, alive: bool) {
    debug_assert!(x < BLOCK_SIZE && y < BLOCK_SIZE);
    let mask = 1 << x;
    if alive {
      self.rows[y] |= mask;
    } else {
      self.rows[y] &= !mask;
    }
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.rows.iter().all(|&row| row == 0)
  }

  pub(crate) fn population(&self) -> u32 {
    self.rows.iter().map(|row| row.count_ones()).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_read_write() {
    let mut block = Block::new();
    assert!(block.is_empty());

    block.write(0, 0, true);
    block.write(31, 31, true);
    block.write(5, 17, true);
    assert!(block.read(0, 0));
    assert!(block.read(31, 31));
    assert!(block.read(5, 17));
    assert!(!block.read(17, 5));
    assert_eq!(block.population(), 3);

    block.write(5, 17, false);
    assert!(!block.read(5, 17));
    assert!(!block.is_empty());
  }

  #[test]
  fn test_cleared_block_is_empty() {
    let mut block = Block::new();
    block.write(12, 3, true);
    block.write(12, 3, false);
    assert!(block.is_empty());
    assert_eq!(block, Block::new());
  }
}
