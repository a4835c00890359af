use std::convert::TryFrom;
use std::mem;
use crate::block::*;
use crate::iter::Blocks;
use crate::rule::Rule;

/// One of the four sign combinations of the plane.
///
/// Coordinates are sign-folded into a quadrant (`v < 0` becomes `-(v + 1)`),
/// so every quadrant is addressed with non-negative coordinates only.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Quadrant {
  /// `x >= 0`, `y >= 0`.
  NorthEast,
  /// `x >= 0`, `y < 0`.
  SouthEast,
  /// `x < 0`, `y >= 0`.
  NorthWest,
  /// `x < 0`, `y < 0`.
  SouthWest,
}

pub(crate) const QUADRANTS: [Quadrant; 4] = [
  Quadrant::NorthEast,
  Quadrant::SouthEast,
  Quadrant::NorthWest,
  Quadrant::SouthWest,
];

impl Quadrant {
  fn from_signs(west: bool, south: bool) -> Self {
    QUADRANTS[(west as usize) << 1 | south as usize]
  }

  pub(crate) fn index(self) -> usize {
    self as usize
  }

  pub fn is_west(self) -> bool {
    matches!(self, Quadrant::NorthWest | Quadrant::SouthWest)
  }

  pub fn is_south(self) -> bool {
    matches!(self, Quadrant::SouthEast | Quadrant::SouthWest)
  }
}

/// Inclusive bounding box of the living cells of a board.
///
/// The box only ever grows while cells are written: it may contain dead
/// cells, but never excludes a living one. A cleared board has the box
/// `(0, 0, 0, 0)`, so the origin is always inside.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Bounds {
  pub upper_x: i64,
  pub lower_x: i64,
  pub upper_y: i64,
  pub lower_y: i64,
}

impl Bounds {
  pub fn width(&self) -> i64 {
    self.upper_x - self.lower_x + 1
  }

  pub fn height(&self) -> i64 {
    self.upper_y - self.lower_y + 1
  }

  pub fn contains(&self, x: i64, y: i64) -> bool {
    self.lower_x <= x && x <= self.upper_x && self.lower_y <= y && y <= self.upper_y
  }

  fn include(&mut self, x: i64, y: i64) {
    self.upper_x = self.upper_x.max(x);
    self.lower_x = self.lower_x.min(x);
    self.upper_y = self.upper_y.max(y);
    self.lower_y = self.lower_y.min(y);
  }
}

/// Where a cell lives in the storage of a board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Address {
  quadrant: Quadrant,
  /// Diagonal index of the block inside its quadrant.
  index: usize,
  /// Position inside the block.
  x: usize,
  y: usize,
}

fn fold(v: i64) -> (bool, u64) {
  if v < 0 {
    (true, !v as u64)
  } else {
    (false, v as u64)
  }
}

fn unfold(west: bool, v: u64) -> i64 {
  if west {
    !(v as i64)
  } else {
    v as i64
  }
}

/// Linearizes a block-grid coordinate by square shells: shell `d` holds the
/// `2d + 1` blocks with `max(bx, by) == d` at indices `d² ..= d² + 2d`.
///
/// ```ignored
///    by
///     3 |  9 10 11 12
///     2 |  4  5  6 13
///     1 |  1  2  7 14
///     0 |  0  3  8 15
///       +------------ bx
/// ```
///
/// Returns `None` when the index does not fit in memory.
pub(crate) fn diagonal_index(bx: u64, by: u64) -> Option<usize> {
  let index = if bx < by {
    by.checked_mul(by)?.checked_add(bx)?
  } else {
    bx.checked_mul(bx)?.checked_add(2 * bx - by)?
  };
  usize::try_from(index).ok()
}

/// Inverse of [`diagonal_index`].
pub(crate) fn diagonal_position(index: usize) -> (u64, u64) {
  let index = index as u64;
  let mut d = (index as f64).sqrt() as u64;
  while d * d > index {
    d -= 1;
  }
  while (d + 1) * (d + 1) <= index {
    d += 1;
  }
  let r = index - d * d;
  if r < d {
    (r, d)
  } else {
    (d, 2 * d - r)
  }
}

/// Sparse, unbounded board of cells.
///
/// The plane is split in four quadrants. Each quadrant owns a growable list
/// of block slots indexed by [`diagonal_index`]; a `None` slot is an empty
/// block. Slot lists only grow on [`write`](Board::write), which always
/// allocates the slot it grew for, and are never shrunk.
///
/// The offset is added to every logical coordinate before it is resolved,
/// which lets the evolution keep a drifting pattern close to the origin of
/// the storage.
#[derive(Debug, Default)]
pub struct Board {
  quadrants: [Vec<Option<Box<Block>>>; 4],
  bounds: Bounds,
  offset: (i64, i64),
  rule: Rule,
}

impl Board {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_rule(rule: Rule) -> Self {
    Self {
      rule,
      ..Self::default()
    }
  }

  fn resolve(&self, x: i64, y: i64) -> Option<Address> {
    let x = x.checked_add(self.offset.0)?;
    let y = y.checked_add(self.offset.1)?;
    let (west, x) = fold(x);
    let (south, y) = fold(y);
    let n = BLOCK_SIZE as u64;
    Some(Address {
      quadrant: Quadrant::from_signs(west, south),
      index: diagonal_index(x / n, y / n)?,
      x: (x % n) as usize,
      y: (y % n) as usize,
    })
  }

  pub fn read(&self, x: i64, y: i64) -> bool {
    match self.resolve(x, y) {
      Some(addr) => {
        match self.quadrants[addr.quadrant.index()].get(addr.index) {
          Some(Some(block)) => block.read(addr.x, addr.y),
          _ => false,
        }
      }
      None => false,
    }
  }

  /// Writing a living cell extends the bounding box; writing a dead one
  /// never shrinks it.
  ///
  /// # Panics
  ///
  /// If the cell cannot be addressed: once a folded block coordinate
  /// reaches 2³² (`|x|` or `|y|` around 1.4·10¹¹) its diagonal index
  /// overflows. The slot list for such an index is far too large to
  /// allocate anyway.
  pub fn write(&mut self, x: i64, y: i64, alive: bool) {
    let addr = match self.resolve(x, y) {
      Some(addr) => addr,
      None => panic!("cell ({}, {}) is out of the addressable plane", x, y),
    };
    let slots = &mut self.quadrants[addr.quadrant.index()];
    if slots.len() <= addr.index {
      slots.resize_with(addr.index + 1, || None);
    }
    slots[addr.index]
      .get_or_insert_with(|| Box::new(Block::new()))
      .write(addr.x, addr.y, alive);

    if alive {
      self.bounds.include(x, y);
    }
  }

  /// A superset of the living cells; see [`Bounds`].
  pub fn bounds(&self) -> Bounds {
    self.bounds
  }

  /// Drops every block and resets the bounding box. Slot capacity, the
  /// offset and the rule are kept.
  pub fn clear(&mut self) {
    for slots in &mut self.quadrants {
      for slot in slots.iter_mut() {
        *slot = None;
      }
    }
    self.bounds = Bounds::default();
  }

  pub fn set_offset(&mut self, dx: i64, dy: i64) {
    self.offset = (dx, dy);
  }

  pub fn offset(&self) -> (i64, i64) {
    self.offset
  }

  pub fn set_rule(&mut self, rule: Rule) {
    self.rule = rule;
  }

  pub fn rule(&self) -> Rule {
    self.rule
  }

  /// Number of living cells.
  pub fn population(&self) -> u64 {
    self.quadrants.iter()
      .flatten()
      .flatten()
      .map(|block| block.population() as u64)
      .sum()
  }

  /// Allocated blocks, in storage order.
  pub fn blocks(&self) -> Blocks<'_> {
    Blocks::new(self)
  }

  pub(crate) fn slots(&self, quadrant: Quadrant) -> &[Option<Box<Block>>] {
    &self.quadrants[quadrant.index()]
  }

  pub(crate) fn logical_origin(
    &self,
    quadrant: Quadrant,
    index: usize,
  ) -> (i64, i64) {
    let (bx, by) = diagonal_position(index);
    let n = BLOCK_SIZE as u64;
    let x = unfold(quadrant.is_west(), bx * n);
    let y = unfold(quadrant.is_south(), by * n);
    (x - self.offset.0, y - self.offset.1)
  }

  /// Makes `dst` a deep copy of `self`, including bounds, offset and rule.
  ///
  /// Blocks that are allocated but empty are not copied.
  pub fn copy_to(&self, dst: &mut Board) {
    dst.clear();
    dst.bounds = self.bounds;
    dst.offset = self.offset;
    dst.rule = self.rule;
    for (src, dst) in self.quadrants.iter().zip(dst.quadrants.iter_mut()) {
      // backwards, so that `dst` grows at most once
      for (index, block) in src.iter().enumerate().rev() {
        if let Some(block) = block {
          if !block.is_empty() {
            if dst.len() <= index {
              dst.resize_with(index + 1, || None);
            }
            dst[index] = Some(block.clone());
          }
        }
      }
    }
  }

  /// Whether both boards hold the same living cells and the same bounding
  /// box. Rules are not compared.
  pub fn equal(&self, other: &Board) -> bool {
    if self.bounds != other.bounds {
      return false;
    }

    if self.offset == other.offset {
      self.quadrants.iter().zip(&other.quadrants).all(|(a, b)| same_slots(a, b))
    } else {
      let bounds = self.bounds;
      (bounds.lower_x..=bounds.upper_x).all(|x| {
        (bounds.lower_y..=bounds.upper_y).all(|y| self.read(x, y) == other.read(x, y))
      })
    }
  }

  /// Exchanges the cells, bounds and offsets of two boards in constant
  /// time. Rules stay where they are.
  pub fn swap(&mut self, other: &mut Board) {
    mem::swap(&mut self.quadrants, &mut other.quadrants);
    mem::swap(&mut self.bounds, &mut other.bounds);
    mem::swap(&mut self.offset, &mut other.offset);
  }
}

impl Clone for Board {
  fn clone(&self) -> Self {
    let mut board = Board::new();
    self.copy_to(&mut board);
    board
  }
}

fn is_empty_slot(slot: &Option<Box<Block>>) -> bool {
  slot.as_ref().map_or(true, |block| block.is_empty())
}

/// Slot-by-slot comparison where an empty block equals a missing one.
fn same_slots(a: &[Option<Box<Block>>], b: &[Option<Box<Block>>]) -> bool {
  let len = a.len().min(b.len());
  let same_prefix = a[..len].iter().zip(&b[..len]).all(|pair| {
    match pair {
      (Some(x), Some(y)) => x == y,
      (Some(block), None) | (None, Some(block)) => block.is_empty(),
      (None, None) => true,
    }
  });
  // Slots past the shorter list are only there if some write grew them.
  same_prefix &&
    a[len..].iter().all(is_empty_slot) &&
    b[len..].iter().all(is_empty_slot)
}
