//! Read-only view of the game for renderers
//!
//! A snapshot copies the grid out of the board so it can be serialised or
//! handed to another thread while the controller keeps running.

use serde::Serialize;

use crate::board::Board;
use crate::cascade::Phase;
use crate::types::{Cell, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub size: u8,
    /// Rows top to bottom; `None` only while a cascade step is mid-flight
    pub rows: Vec<Vec<Cell>>,
    pub phase: Phase,
    pub selected: Option<Position>,
    /// Cascade level in progress, or the depth just reached while settling
    pub combo: u32,
}

impl BoardSnapshot {
    pub fn from_board(board: &Board, phase: Phase) -> Self {
        let selected = match phase {
            Phase::AwaitingSecondSelection { selected } => Some(selected),
            _ => None,
        };
        let combo = match phase {
            Phase::Resolving { level } => level,
            Phase::Settling { combo } => combo,
            _ => 0,
        };
        Self {
            size: board.size(),
            rows: board.rows().map(<[Cell]>::to_vec).collect(),
            phase,
            selected,
            combo,
        }
    }

    /// Gem at `pos`, if any
    pub fn cell(&self, pos: Position) -> Cell {
        self.rows
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GemKind;

    #[test]
    fn test_snapshot_mirrors_board() {
        let board = Board::parse("RBG BGR GRB").unwrap();
        let phase = Phase::AwaitingSecondSelection {
            selected: Position::new(1, 2),
        };
        let snap = BoardSnapshot::from_board(&board, phase);

        assert_eq!(snap.size, 3);
        assert_eq!(snap.rows.len(), 3);
        assert_eq!(snap.selected, Some(Position::new(1, 2)));
        assert_eq!(
            snap.cell(Position::new(1, 2)).map(|g| g.kind),
            Some(GemKind::Red)
        );
        assert_eq!(snap.cell(Position::new(5, 0)), None);
    }

    #[test]
    fn test_snapshot_serialises_phase_tag() {
        let board = Board::parse("RBG BGR GRB").unwrap();
        let snap = BoardSnapshot::from_board(&board, Phase::Idle);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["phase"]["phase"], "idle");
        assert_eq!(json["rows"][0][0]["kind"], "red");
        assert_eq!(json["combo"], 0);
    }
}
