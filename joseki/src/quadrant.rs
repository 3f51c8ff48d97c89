use go::{GameRecord, Move, Point};

use crate::Joseki;

const LAST_INDEX: u8 = 18;
const CENTER: u8 = 9;

/// One of the four overlapping 10x10 corners of the board. The center lines belong to both halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    LowerLeft,
    LowerRight,
    UpperLeft,
    UpperRight,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::LowerLeft,
        Quadrant::LowerRight,
        Quadrant::UpperLeft,
        Quadrant::UpperRight,
    ];

    pub fn contains(self, point: Point) -> bool {
        let lower = point.row <= CENTER;
        let upper = point.row >= CENTER;
        let left = point.col <= CENTER;
        let right = point.col >= CENTER;

        match self {
            Quadrant::LowerLeft => lower && left,
            Quadrant::LowerRight => lower && right,
            Quadrant::UpperLeft => upper && left,
            Quadrant::UpperRight => upper && right,
        }
    }

    /// Maps a point of this quadrant onto the upper right corner.
    pub fn to_upper_right(self, point: Point) -> Point {
        let Point { row, col } = point;

        match self {
            Quadrant::LowerLeft => Point::new(LAST_INDEX - row, LAST_INDEX - col),
            Quadrant::LowerRight => Point::new(LAST_INDEX - row, col),
            Quadrant::UpperLeft => Point::new(row, LAST_INDEX - col),
            Quadrant::UpperRight => point,
        }
    }
}

/// Splits a game into the four corner sequences, in the order of `Quadrant::ALL`.
///
/// Positional moves are mapped onto the upper right corner and only collected while the sequence
/// is shorter than `max_len`. Passes are appended to all four sequences regardless of length.
pub fn decompose(moves: &[Move], max_len: usize) -> [Vec<Move>; 4] {
    let mut sequences: [Vec<Move>; 4] = Default::default();

    for mv in moves {
        match mv.point {
            Some(point) => {
                for (quadrant, sequence) in Quadrant::ALL.iter().zip(sequences.iter_mut()) {
                    if quadrant.contains(point) {
                        let mv = Move::new(mv.color, quadrant.to_upper_right(point));
                        push_alternating(sequence, mv, max_len);
                    }
                }
            }
            None => {
                for sequence in sequences.iter_mut() {
                    sequence.push(*mv);
                }
            }
        }

        if sequences.iter().all(|s| s.len() >= max_len) {
            break;
        }
    }

    sequences
}

/// Appends the move while the sequence is shorter than `max_len`, first inserting a pass by the
/// opponent when the same color would otherwise move twice in a row. With the pass the sequence
/// may end one move past `max_len`.
fn push_alternating(sequence: &mut Vec<Move>, mv: Move, max_len: usize) {
    if sequence.len() >= max_len {
        return;
    }

    if sequence.last().is_some_and(|last| last.color == mv.color) {
        sequence.push(Move::pass(mv.color.opponent()));
    }

    sequence.push(mv);
}

/// The four normalized josekis of a game, or `None` when the game is not an even 19x19 game.
pub fn extract_josekis(record: &GameRecord, max_len: usize) -> Option<[Joseki; 4]> {
    if !record.is_valid() {
        return None;
    }

    let winner = record.winner;
    let josekis = decompose(&record.moves, max_len).map(|moves| Joseki::new(moves, winner).normalize());

    Some(josekis)
}
