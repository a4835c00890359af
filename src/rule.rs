use std::fmt::{self, Display};
use std::str::FromStr;
use displaydoc::Display as DisplayDoc;
use thiserror::Error;

/// The two supported Life-like rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
  /// Conway's Game of Life, `B3/S23`.
  Life,
  /// HighLife, `B36/S23`.
  HighLife,
}

pub(crate) type NeighborMask = u16;

impl Default for Rule {
  fn default() -> Self {
    Rule::Life
  }
}

impl Rule {
  pub(crate) fn birth(self) -> NeighborMask {
    match self {
      Rule::Life => 0b000001000,
      Rule::HighLife => 0b001001000,
    }
  }

  pub(crate) fn survival(self) -> NeighborMask {
    0b000001100
  }

  /// State of a cell in the next generation, given its current state and
  /// the number of living cells among its 8 neighbors.
  #[inline]
  pub fn next_state(self, alive: bool, neighbors: u32) -> bool {
    let mask = if alive { self.survival() } else { self.birth() };
    neighbors < 9 && mask >> neighbors & 1 != 0
  }
}

/// Writes the neighbor counts set in `mask`, in increasing order.
fn write_counts(f: &mut fmt::Formatter, mask: NeighborMask) -> fmt::Result {
  (0..9u32)
    .filter(|&n| mask >> n & 1 != 0)
    .try_for_each(|n| write!(f, "{}", n))
}

impl Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("B")?;
    write_counts(f, self.birth())?;
    f.write_str("/S")?;
    write_counts(f, self.survival())
  }
}

/// Unknown rule {0:?}.
#[derive(Clone, Debug, PartialEq, Eq, DisplayDoc, Error)]
pub struct ParseRuleError(pub String);

impl FromStr for Rule {
  type Err = ParseRuleError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "B3/S23" | "b3/s23" | "23/3" => Ok(Rule::Life),
      "B36/S23" | "b36/s23" | "23/36" => Ok(Rule::HighLife),
      other => Err(ParseRuleError(other.to_owned())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_life_table() {
    for n in 0..=8 {
      assert_eq!(Rule::Life.next_state(false, n), n == 3, "birth {}", n);
      assert_eq!(Rule::Life.next_state(true, n), n == 2 || n == 3, "survival {}", n);
    }
  }

  #[test]
  fn test_high_life_table() {
    for n in 0..=8 {
      assert_eq!(Rule::HighLife.next_state(false, n), n == 3 || n == 6, "birth {}", n);
      assert_eq!(Rule::HighLife.next_state(true, n), n == 2 || n == 3, "survival {}", n);
    }
  }

  #[test]
  fn test_display() {
    assert_eq!(Rule::Life.to_string(), "B3/S23");
    assert_eq!(Rule::HighLife.to_string(), "B36/S23");
  }

  #[test]
  fn test_parse() {
    assert_eq!("B3/S23".parse::<Rule>().unwrap(), Rule::Life);
    assert_eq!("b3/s23".parse::<Rule>().unwrap(), Rule::Life);
    assert_eq!("23/3".parse::<Rule>().unwrap(), Rule::Life);
    assert_eq!("B36/S23".parse::<Rule>().unwrap(), Rule::HighLife);
    assert_eq!("b36/s23".parse::<Rule>().unwrap(), Rule::HighLife);
    assert_eq!("23/36".parse::<Rule>().unwrap(), Rule::HighLife);
    assert_eq!("B2/S".parse::<Rule>(), Err(ParseRuleError("B2/S".to_owned())));
  }
}
