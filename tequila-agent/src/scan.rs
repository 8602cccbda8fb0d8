use tequila_core::{
    board::{Board, Position},
    lines::{lines, Line, LINE_COUNT},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupant {
    Empty,
    Own,
    Opponent,
}

impl Occupant {
    /// Classifies a cell from the point of view of `player`.
    pub fn of<B: Board>(board: &B, position: Position, player: &str) -> Self {
        match board.field_value(position) {
            None => Occupant::Empty,
            Some(owner) if owner == player => Occupant::Own,
            Some(_) => Occupant::Opponent,
        }
    }
}

/// Whose near-complete lines to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Own,
    Opponent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LineCounts {
    pub own: u8,
    pub opponent: u8,
    pub empty: u8,
}

impl LineCounts {
    /// Four or more pieces of `side` and none of the other player.
    pub fn is_near_complete(self, side: Side) -> bool {
        match side {
            Side::Own => 4 <= self.own && self.opponent == 0,
            Side::Opponent => 4 <= self.opponent && self.own == 0,
        }
    }
}

/// Per-line piece counts of a board, indexed like [`lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineScan {
    counts: [LineCounts; LINE_COUNT],
}

impl LineScan {
    pub fn counts(&self) -> &[LineCounts] {
        &self.counts
    }

    /// Scan with the given `(own, opponent)` counts on the first lines and
    /// every other line empty.
    #[cfg(test)]
    pub(crate) fn from_counts(lines: &[(u8, u8)]) -> Self {
        let mut counts = [LineCounts {
            own: 0,
            opponent: 0,
            empty: 5,
        }; LINE_COUNT];

        for (counts, &(own, opponent)) in counts.iter_mut().zip(lines) {
            *counts = LineCounts {
                own,
                opponent,
                empty: 5 - own - opponent,
            };
        }

        Self { counts }
    }

    /// Finds the empty cell of a near-complete line of `side`.
    ///
    /// That is the winning cell for [`Side::Own`] and the cell to block for
    /// [`Side::Opponent`]. When several lines qualify, the last one in canonical
    /// order decides; within a line, the last empty cell is taken.
    pub fn critical_cell<B: Board>(&self, board: &B, side: Side) -> Option<Position> {
        let mut critical = None;

        for (line, counts) in lines().iter().zip(self.counts.iter()) {
            if !counts.is_near_complete(side) {
                continue;
            }

            if let Some(position) = last_empty_cell(board, line) {
                critical = Some(position);
            }
        }

        critical
    }
}

/// Counts own, opponent and empty cells on every winning line.
pub fn scan_lines<B: Board>(board: &B, player: &str) -> LineScan {
    let mut counts = [LineCounts::default(); LINE_COUNT];

    for (line, counts) in lines().iter().zip(counts.iter_mut()) {
        for &position in line {
            match Occupant::of(board, position, player) {
                Occupant::Empty => counts.empty += 1,
                Occupant::Own => counts.own += 1,
                Occupant::Opponent => counts.opponent += 1,
            }
        }
    }

    LineScan { counts }
}

fn last_empty_cell<B: Board>(board: &B, line: &Line) -> Option<Position> {
    line.iter()
        .rev()
        .copied()
        .find(|&position| board.is_empty_at(position))
}
