use crate::consts;
use crate::render::{Canvas, Draw, Renderable, Rotation};
use rand::Rng;
use ratatui::layout::Position;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Food {
    pub(super) position: Position,
    look: Renderable,
}

impl Food {
    /// Create a new food item at a random position
    pub(super) fn new<R: Rng>(rng: &mut R, look: Renderable) -> Food {
        let mut food = Food {
            position: Position::ORIGIN,
            look,
        };
        food.randomize_position(rng);
        food
    }

    /// Move the food to a uniformly random cell of the grid.  Cells occupied
    /// by the snake are not avoided.
    pub(super) fn randomize_position<R: Rng>(&mut self, rng: &mut R) {
        self.position = Position::new(
            rng.random_range(0..consts::GRID_SIZE.width),
            rng.random_range(0..consts::GRID_SIZE.height),
        );
    }

    pub(super) fn render(&self, canvas: &mut Canvas<'_>) {
        self.look.draw(canvas, self.position, Rotation::Deg0);
    }
}
