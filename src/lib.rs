//! A sparse, unbounded Game of Life board, stored as 32×32 blocks laid out
//! along diagonal shells in four quadrants.

mod block;
pub mod board;
pub mod error;
pub mod export;
pub mod game;
pub mod iter;
pub mod life;
pub mod rle;
pub mod rule;

pub use block::BLOCK_SIZE;
pub use board::{Board, Bounds, Quadrant};
pub use error::{Error, Result};
pub use game::Game;
pub use iter::{BlockArea, Blocks};
pub use life::evolve;
pub use rule::Rule;
