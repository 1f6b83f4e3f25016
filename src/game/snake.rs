use super::direction::Direction;
use crate::consts;
use crate::render::{Canvas, Draw, Renderable, Rotation};
use rand::Rng;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The player's snake.  All positions are grid cells relative to the
/// top-left corner of the playfield.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The cells occupied by the snake, with the head at the front
    pub(super) body: VecDeque<Position>,

    /// The length the body grows toward
    pub(super) length: usize,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,

    pub(super) score: u32,

    look: Renderable,
}

impl Snake {
    /// Create a new snake of length 1 at the center of the grid, facing in a
    /// random direction
    pub(super) fn new<R: Rng>(rng: &mut R, look: Renderable) -> Snake {
        Snake {
            body: VecDeque::from([start_position()]),
            length: 1,
            direction: rng.random(),
            score: 0,
            look,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.body.front().copied().unwrap_or_else(start_position)
    }

    /// Change the snake's direction to `direction`, unless that would turn
    /// it straight back on itself
    pub(super) fn turn(&mut self, direction: Direction) {
        if direction != self.direction.reverse() {
            self.direction = direction;
        }
    }

    /// Move the snake forwards one cell in the current direction, wrapping
    /// around the edges of the grid.  Returns `false` without moving if the
    /// new head position would land on the snake's body, not counting the
    /// [`COLLISION_GRACE`][consts::COLLISION_GRACE] segments nearest the
    /// head.
    pub(super) fn advance(&mut self) -> bool {
        let new_head = self.direction.advance(self.head(), consts::GRID_SIZE);
        if self
            .body
            .iter()
            .skip(consts::COLLISION_GRACE)
            .any(|&p| p == new_head)
        {
            return false;
        }
        self.body.push_front(new_head);
        while self.body.len() > self.length {
            let _ = self.body.pop_back();
        }
        true
    }

    /// Extend the snake's length by one and increase its score by
    /// `increment` in response to eating the food
    pub(super) fn grow_and_score(&mut self, increment: u32) {
        self.length += 1;
        self.score = self.score.saturating_add(increment);
    }

    /// Shrink the snake back to a single cell at the center of the grid
    /// facing a random direction, and zero its score
    pub(super) fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.body = VecDeque::from([start_position()]);
        self.length = 1;
        self.direction = rng.random();
        self.score = 0;
    }

    pub(super) fn render(&self, canvas: &mut Canvas<'_>) {
        let mut segments = self.body.iter();
        if let Some(&head) = segments.next() {
            self.look.draw(canvas, head, self.direction.rotation());
        }
        for &p in segments {
            self.look.draw(canvas, p, Rotation::Deg0);
        }
    }
}

fn start_position() -> Position {
    Position::new(consts::GRID_COUNT / 2, consts::GRID_COUNT / 2)
}
