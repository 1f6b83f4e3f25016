use crate::render::Rotation;
use enum_map::Enum;
use rand::{
    distr::{Distribution, StandardUniform},
    Rng,
};
use ratatui::layout::{Position, Size};

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the position one cell over from `pos` in this direction,
    /// wrapping around the edges of a grid of size `grid`
    pub(super) fn advance(self, pos: Position, grid: Size) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = decrement_wrapping(y, grid.height),
            Direction::Down => y = increment_wrapping(y, grid.height),
            Direction::Left => x = decrement_wrapping(x, grid.width),
            Direction::Right => x = increment_wrapping(x, grid.width),
        }
        Position { x, y }
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// The rotation at which to draw the snake's head when facing this way
    pub(super) fn rotation(self) -> Rotation {
        match self {
            Direction::Right => Rotation::Deg0,
            Direction::Up => Rotation::Deg90,
            Direction::Left => Rotation::Deg180,
            Direction::Down => Rotation::Deg270,
        }
    }
}

impl Distribution<Direction> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        Direction::from_usize(rng.random_range(0..Direction::LENGTH))
    }
}

fn decrement_wrapping(x: u16, max: u16) -> u16 {
    x.checked_sub(1).unwrap_or_else(|| max.saturating_sub(1))
}

fn increment_wrapping(x: u16, max: u16) -> u16 {
    x.checked_add(1).filter(|&x2| x2 < max).unwrap_or(0)
}
