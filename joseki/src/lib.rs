//! Statistical joseki trees built from a corpus of game records.
//!
//! Each game is cut into four corner sequences, every sequence is brought into a canonical
//! orientation and color, and the sequences are merged into a prefix tree that counts how often
//! each continuation was played and who went on to win.

mod codec;
mod joseki;
mod prune;
mod quadrant;
mod stats;
mod tree;

pub use crate::codec::*;
pub use crate::joseki::*;
pub use crate::prune::*;
pub use crate::quadrant::*;
pub use crate::stats::*;
pub use crate::tree::*;

pub const DEFAULT_MAX_LEN: usize = 45;
