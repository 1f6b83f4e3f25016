//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake (10 updates per second)
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Length of a round
pub(crate) const GAME_DURATION: Duration = Duration::from_secs(120);

/// Amount the score goes up by each time the snake eats the food
pub(crate) const SCORE_INCREMENT: u32 = 100;

/// Number of grid cells along each side of the square playfield
pub(crate) const GRID_COUNT: u16 = 30;

/// Size of the playfield in grid cells
pub(crate) const GRID_SIZE: Size = Size {
    width: GRID_COUNT,
    height: GRID_COUNT,
};

/// Number of terminal columns occupied by one grid cell.  Terminal cells are
/// about twice as tall as they are wide, so this keeps grid cells roughly
/// square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Segments of the snake nearest the head that are not considered when
/// checking for self-collision
pub(crate) const COLLISION_GRACE: usize = 3;

/// Maximum number of characters in a player name
pub(crate) const MAX_NAME_LEN: usize = 20;

/// Name used when the player submits an empty name
pub(crate) const DEFAULT_PLAYER_NAME: &str = "Player";

/// Size of the bordered playfield: the grid plus one cell of border on each
/// side
pub(crate) const BOARD_SIZE: Size = Size {
    width: GRID_COUNT * CELL_WIDTH + 2,
    height: GRID_COUNT + 2,
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window: score & time lines, the board, and the name line.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: BOARD_SIZE.width,
    height: BOARD_SIZE.height + 3,
};

/// Default path to the snake's head sprite
pub(crate) const HEAD_SPRITE_PATH: &str = "assets/dog_hat.txt";

/// Default path to the food sprite
pub(crate) const FOOD_SPRITE_PATH: &str = "assets/pink_hat.txt";

/// Fill colour for the snake when no head sprite is available
pub(crate) const SNAKE_COLOR: Color = Color::Green;

/// Fill colour for the food when no food sprite is available
pub(crate) const FOOD_COLOR: Color = Color::Red;

/// Style for the score, time, and player name
pub(crate) const TEXT_STYLE: Style = Style::new().fg(Color::White);

/// Style for the game over message and the name entry instructions
pub(crate) const NOTICE_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for the border around the name entry box
pub(crate) const INPUT_BOX_STYLE: Style = Style::new().fg(Color::LightBlue);
