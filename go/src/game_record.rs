use crate::{Color, Move, BOARD_SIZE};

/// One game of the corpus, reduced to what joseki extraction needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub board_size: u8,
    pub handicap: u32,
    pub has_setup_stones: bool,
    pub moves: Vec<Move>,
    pub winner: Option<Color>,
}

impl GameRecord {
    /// Only even games on an empty 19x19 board contribute josekis.
    pub fn is_valid(&self) -> bool {
        self.board_size == BOARD_SIZE && self.handicap == 0 && !self.has_setup_stones
    }
}
