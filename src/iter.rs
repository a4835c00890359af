use std::ops::RangeInclusive;
use crate::block::BLOCK_SIZE;
use crate::board::*;

/// The cells covered by one allocated block, in logical coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BlockArea {
  pub quadrant: Quadrant,
  /// Local origin of the block, un-folded and un-offset. In the western
  /// (southern) quadrants it is the block's largest `x` (`y`).
  pub origin: (i64, i64),
}

impl BlockArea {
  pub fn xs(&self) -> RangeInclusive<i64> {
    span(self.origin.0, self.quadrant.is_west())
  }

  pub fn ys(&self) -> RangeInclusive<i64> {
    span(self.origin.1, self.quadrant.is_south())
  }
}

fn span(origin: i64, negative: bool) -> RangeInclusive<i64> {
  let last = BLOCK_SIZE as i64 - 1;
  if negative {
    origin - last..=origin
  } else {
    origin..=origin + last
  }
}

/// Iterator over the allocated blocks of a [`Board`], quadrant by quadrant
/// (NE, SE, NW, SW) and by increasing storage index.
///
/// Allocated blocks may be empty.
pub struct Blocks<'a> {
  board: &'a Board,
  quadrant: usize,
  index: usize,
}

impl<'a> Blocks<'a> {
  pub(crate) fn new(board: &'a Board) -> Self {
    Self {
      board,
      quadrant: 0,
      index: 0,
    }
  }
}

impl<'a> Iterator for Blocks<'a> {
  type Item = BlockArea;

  fn next(&mut self) -> Option<BlockArea> {
    while let Some(&quadrant) = QUADRANTS.get(self.quadrant) {
      let slots = self.board.slots(quadrant);
      while self.index < slots.len() {
        let index = self.index;
        self.index += 1;
        if slots[index].is_some() {
          return Some(BlockArea {
            quadrant,
            origin: self.board.logical_origin(quadrant, index),
          });
        }
      }
      self.quadrant += 1;
      self.index = 0;
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use itertools::Itertools;

  #[test]
  fn test_empty_board() {
    let board = Board::new();
    assert_eq!(board.blocks().next(), None);
  }

  #[test]
  fn test_order_and_origins() {
    let mut board = Board::new();
    board.write(-1, -1, true);
    board.write(-40, 3, true);
    board.write(5, -70, true);
    board.write(33, 0, true);
    board.write(1, 1, true);

    let areas = board.blocks().collect_vec();
    assert_eq!(areas, vec![
      BlockArea { quadrant: Quadrant::NorthEast, origin: (0, 0) },
      BlockArea { quadrant: Quadrant::NorthEast, origin: (32, 0) },
      BlockArea { quadrant: Quadrant::SouthEast, origin: (0, -65) },
      BlockArea { quadrant: Quadrant::NorthWest, origin: (-33, 0) },
      BlockArea { quadrant: Quadrant::SouthWest, origin: (-1, -1) },
    ]);

    for area in &areas {
      let cells = area.xs().cartesian_product(area.ys())
        .filter(|&(x, y)| board.read(x, y))
        .count();
      assert!(cells > 0, "{:?}", area);
    }
    assert_eq!(areas[4].xs(), -32..=-1);
    assert_eq!(areas[2].ys(), -96..=-65);
  }

  #[test]
  fn test_empty_blocks_are_visited() {
    let mut board = Board::new();
    board.write(100, 100, false);
    assert_eq!(board.blocks().count(), 1);
    board.clear();
    assert_eq!(board.blocks().count(), 0);
  }

  #[test]
  fn test_offset_origin() {
    let mut board = Board::new();
    board.set_offset(10, -10);
    board.write(-10, 10, true);
    let area = board.blocks().next().unwrap();
    assert_eq!(area.origin, (-10, 10));
    assert!(area.xs().contains(&-10));
    assert!(area.ys().contains(&10));
  }
}
