use std::mem;
use log::{debug, info, trace};
use crate::board::Board;
use crate::rule::Rule;

/// Advances `board` by `generations` generations under its own rule.
///
/// With `use_active_region`, only the neighborhoods of allocated blocks are
/// evaluated; otherwise the whole bounding box plus a one-cell border is
/// scanned. Both give the same result. With `verbose`, progress is logged
/// at `info` level.
///
/// The board keeps its rule. Its offset is the one chosen for the last
/// generation.
pub fn evolve(
  board: &mut Board,
  generations: usize,
  verbose: bool,
  use_active_region: bool,
) {
  if generations == 0 {
    return;
  }

  let rule = board.rule();
  let mut scratch = Board::with_rule(rule);
  let progress_step = (generations / 20).max(1);

  let mut current = board;
  let mut next = &mut scratch;
  let mut in_scratch = false;

  for gen in 0..generations {
    if verbose && gen % progress_step == 0 {
      info!("generation progress {:.0}%", 100.0 * gen as f64 / generations as f64);
    }

    next.clear();
    // keep the storage of the next generation close to the origin
    let bounds = current.bounds();
    next.set_offset(
      -(bounds.upper_x - bounds.lower_x) / 2,
      -(bounds.upper_y - bounds.lower_y) / 2,
    );
    trace!("generation {}: bounds {:?}, offset {:?}", gen, bounds, next.offset());

    if use_active_region {
      step_active_region(current, next, rule);
    } else {
      step_bounding_box(current, next, rule);
    }

    mem::swap(&mut current, &mut next);
    in_scratch = !in_scratch;
  }

  if verbose {
    info!("generation progress 100%");
  }

  // `next` is the caller's board whenever the last generation landed in
  // the scratch board.
  let result = if in_scratch {
    next.swap(current);
    next
  } else {
    current
  };
  debug!("evolved {} generations, population {}", generations, result.population());
}

/// Number of living cells among the 8 neighbors of `(x, y)`.
#[inline]
fn neighbors(board: &Board, x: i64, y: i64) -> u32 {
  let mut count = 0;
  for j in y - 1..=y + 1 {
    for i in x - 1..=x + 1 {
      if (i != x || j != y) && board.read(i, j) {
        count += 1;
      }
    }
  }
  count
}

#[inline]
fn evaluate(current: &Board, next: &mut Board, rule: Rule, x: i64, y: i64) {
  if rule.next_state(current.read(x, y), neighbors(current, x, y)) {
    next.write(x, y, true);
  }
}

/// Scans the bounding box of `current` and a one-cell border around it.
fn step_bounding_box(current: &Board, next: &mut Board, rule: Rule) {
  let bounds = current.bounds();
  for x in bounds.lower_x - 1..=bounds.upper_x + 1 {
    for y in bounds.lower_y - 1..=bounds.upper_y + 1 {
      evaluate(current, next, rule, x, y);
    }
  }
}

/// Scans every allocated block of `current` and a one-cell border around
/// it. Borders of neighboring blocks overlap; cells already born in `next`
/// are skipped.
fn step_active_region(current: &Board, next: &mut Board, rule: Rule) {
  for area in current.blocks() {
    let xs = area.xs();
    let ys = area.ys();
    for x in xs.start() - 1..=xs.end() + 1 {
      for y in ys.start() - 1..=ys.end() + 1 {
        if !next.read(x, y) {
          evaluate(current, next, rule, x, y);
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn board_with(rule: Rule, cells: &[(i64, i64)]) -> Board {
    let mut board = Board::with_rule(rule);
    for &(x, y) in cells {
      board.write(x, y, true);
    }
    board
  }

  fn both_kernels(board: &Board, generations: usize) -> Board {
    let mut brute = board.clone();
    let mut active = board.clone();
    evolve(&mut brute, generations, false, false);
    evolve(&mut active, generations, false, true);
    assert!(brute.equal(&active), "kernels disagree after {} generations", generations);
    assert_eq!(brute.bounds(), active.bounds());
    active
  }

  const BLINKER_H: [(i64, i64); 3] = [(0, 0), (1, 0), (2, 0)];
  const BLINKER_V: [(i64, i64); 3] = [(1, -1), (1, 0), (1, 1)];

  #[test]
  fn test_zero_generations() {
    // a lonely cell would die in one generation
    let mut board = Board::new();
    board.set_offset(5, 5);
    board.write(3, 3, true);
    for &use_active_region in &[false, true] {
      evolve(&mut board, 0, false, use_active_region);
      assert!(board.read(3, 3));
      assert_eq!(board.population(), 1);
      assert_eq!(board.offset(), (5, 5));
    }
  }

  #[test]
  fn test_lonely_cell_dies() {
    let board = board_with(Rule::Life, &[(0, 0)]);
    let result = both_kernels(&board, 1);
    assert_eq!(result.population(), 0);
    assert!(!result.read(0, 0));
  }

  #[test]
  fn test_block_is_stable() {
    let board = board_with(Rule::Life, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    for &n in &[1, 2, 5, 16] {
      let result = both_kernels(&board, n);
      assert!(result.equal(&board), "after {} generations", n);
    }
  }

  #[test]
  fn test_blinker() {
    let horizontal = board_with(Rule::Life, &BLINKER_H);
    let vertical = board_with(Rule::Life, &BLINKER_V);

    let result = both_kernels(&horizontal, 1);
    assert!(result.equal(&vertical));
    let result = both_kernels(&horizontal, 2);
    assert!(result.equal(&horizontal));
    let result = both_kernels(&horizontal, 7);
    assert!(result.equal(&vertical));
  }

  #[test]
  fn test_blinker_across_quadrants() {
    let cells = [(-1, -40), (0, -40), (1, -40)];
    let board = board_with(Rule::Life, &cells);
    let result = both_kernels(&board, 1);
    assert_eq!(result.population(), 3);
    assert!(result.read(0, -41));
    assert!(result.read(0, -40));
    assert!(result.read(0, -39));
  }

  #[test]
  fn test_rule_is_kept() {
    let mut board = board_with(Rule::HighLife, &BLINKER_H);
    evolve(&mut board, 3, false, true);
    assert_eq!(board.rule(), Rule::HighLife);
  }

  #[test]
  fn test_high_life_birth_on_six() {
    // (1, 1) has six living neighbors and is dead
    let cells = [(0, 0), (1, 0), (2, 0), (0, 2), (1, 2), (2, 2)];
    let life = both_kernels(&board_with(Rule::Life, &cells), 1);
    let high_life = both_kernels(&board_with(Rule::HighLife, &cells), 1);
    assert!(!life.read(1, 1));
    assert!(high_life.read(1, 1));
  }

  #[test]
  fn test_kernels_agree_on_r_pentomino() {
    let cells = [(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)];
    for &rule in &[Rule::Life, Rule::HighLife] {
      let board = board_with(rule, &cells);
      for &n in &[1, 10, 60] {
        both_kernels(&board, n);
      }
    }
  }

  #[test]
  fn test_glider_moves() {
    let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
    let board = board_with(Rule::Life, &glider);
    let result = both_kernels(&board, 8);
    let moved = glider.iter().map(|&(x, y)| (x + 2, y + 2)).collect::<Vec<_>>();
    assert_eq!(result.population(), 5);
    for &(x, y) in &moved {
      assert!(result.read(x, y), "({}, {})", x, y);
    }
    assert!(result.equal(&board_with(Rule::Life, &moved)));
  }
}
