use go::{Color, Move, Point};

/// A corner sequence together with the winner of the game it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joseki {
    pub moves: Vec<Move>,
    pub winner: Option<Color>,
}

impl Joseki {
    pub fn new(moves: Vec<Move>, winner: Option<Color>) -> Self {
        Self { moves, winner }
    }

    /// Brings the sequence into canonical form: diagonal reflection first, then black to move first.
    pub fn normalize(self) -> Self {
        self.flip_diagonal().black_first()
    }

    /// Reflects the whole sequence across the main diagonal when the first stone off the
    /// diagonal lies below it (`row > col`).
    pub fn flip_diagonal(self) -> Self {
        let first_off_diagonal = self
            .moves
            .iter()
            .filter_map(|m| m.point)
            .find(|p| !p.is_on_diagonal());

        match first_off_diagonal {
            Some(point) if point.row > point.col => Self {
                moves: self
                    .moves
                    .into_iter()
                    .map(|m| m.map_point(Point::transpose))
                    .collect(),
                winner: self.winner,
            },
            _ => self,
        }
    }

    /// Swaps the colors of every move, and the winner, when white moves first.
    pub fn black_first(self) -> Self {
        match self.moves.first() {
            Some(first) if first.color == Color::White => Self {
                moves: self
                    .moves
                    .into_iter()
                    .map(Move::with_swapped_color)
                    .collect(),
                winner: self.winner.map(Color::opponent),
            },
            _ => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }
}
