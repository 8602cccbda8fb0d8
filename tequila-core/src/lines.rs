use crate::board::{Position, CUBE_SIZE};
use std::sync::OnceLock;

/// Number of winning lines in a 5x5x5 cube.
pub const LINE_COUNT: usize = 109;

/// Five cells in a straight row. Owning all of them wins the game.
pub type Line = [Position; CUBE_SIZE];

static LINES: OnceLock<Vec<Line>> = OnceLock::new();

/// Returns every winning line of the cube in canonical order.
///
/// The order is stable across calls, so line indices can be used as identifiers:
/// - x-slices: 5 rows along z, 5 rows along y and both diagonals per slice (60 lines)
/// - y-slices: 5 rows along x and both diagonals per slice (35 lines)
/// - z-slices: both diagonals per slice (10 lines)
/// - the 4 space diagonals joining opposite corners
pub fn lines() -> &'static [Line] {
    LINES.get_or_init(enumerate_lines)
}

/// Lines passing through `position`, in canonical order.
pub fn lines_through(position: Position) -> impl Iterator<Item = &'static Line> {
    lines()
        .iter()
        .filter(move |line| line.contains(&position))
}

fn enumerate_lines() -> Vec<Line> {
    const LAST: usize = CUBE_SIZE - 1;

    let mut lines = Vec::with_capacity(LINE_COUNT);

    for s in 0..CUBE_SIZE {
        for i in 0..CUBE_SIZE {
            lines.push(line(|l| Position::new(s, i, l)));
        }
        for j in 0..CUBE_SIZE {
            lines.push(line(|l| Position::new(s, l, j)));
        }
        lines.push(line(|l| Position::new(s, l, l)));
        lines.push(line(|l| Position::new(s, l, LAST - l)));
    }

    for s in 0..CUBE_SIZE {
        for j in 0..CUBE_SIZE {
            lines.push(line(|l| Position::new(l, s, j)));
        }
        lines.push(line(|l| Position::new(l, s, l)));
        lines.push(line(|l| Position::new(l, s, LAST - l)));
    }

    for s in 0..CUBE_SIZE {
        lines.push(line(|l| Position::new(l, l, s)));
        lines.push(line(|l| Position::new(l, LAST - l, s)));
    }

    lines.push(line(|l| Position::new(l, l, l)));
    lines.push(line(|l| Position::new(l, l, LAST - l)));
    lines.push(line(|l| Position::new(LAST - l, l, l)));
    lines.push(line(|l| Position::new(l, LAST - l, l)));

    assert_eq!(lines.len(), LINE_COUNT, "winning line enumeration is broken");

    lines
}

fn line(cell: impl Fn(usize) -> Position) -> Line {
    std::array::from_fn(cell)
}
