pub mod color;
pub mod game_record;
pub mod moves;
pub mod point;

pub use crate::color::*;
pub use crate::game_record::*;
pub use crate::moves::*;
pub use crate::point::*;

pub const BOARD_SIZE: u8 = 19;
