use crate::config::AssetConfig;
use crate::consts;
use crate::render::{ColorRect, Renderable, Sprite, SpriteError};
use log::{info, warn};
use ratatui::style::{Color, Style};
use std::path::Path;
use thiserror::Error;

/// The looks of the snake's head and the food, as loaded at startup
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Assets {
    /// How to draw the snake.  The body uses the same look as the head, but
    /// never rotated.
    pub(crate) snake: Renderable,

    /// How to draw the food
    pub(crate) food: Renderable,
}

impl Assets {
    /// Load the sprites named in `config`.  A sprite that cannot be loaded is
    /// replaced by a square of the corresponding fallback colour.
    pub(crate) fn load(config: &AssetConfig) -> Assets {
        Assets {
            snake: load_or_fill(&config.head, config.snake_color),
            food: load_or_fill(&config.food, config.food_color),
        }
    }
}

impl Default for Assets {
    fn default() -> Assets {
        Assets {
            snake: ColorRect(consts::SNAKE_COLOR).into(),
            food: ColorRect(consts::FOOD_COLOR).into(),
        }
    }
}

fn load_or_fill(path: &Path, color: Color) -> Renderable {
    match load_sprite(path, Style::new().fg(color)) {
        Ok(sprite) => {
            info!("Loaded sprite from {}", path.display());
            sprite.into()
        }
        Err(e) => {
            warn!(
                "Could not load sprite from {}, falling back to solid square: {e}",
                path.display()
            );
            ColorRect(color).into()
        }
    }
}

pub(crate) fn load_sprite(path: &Path, style: Style) -> Result<Sprite, AssetError> {
    let src = fs_err::read_to_string(path)?;
    Ok(Sprite::parse(&src, style)?)
}

#[derive(Debug, Error)]
pub(crate) enum AssetError {
    #[error("failed to read sprite file: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid sprite file: {0}")]
    Parse(#[from] SpriteError),
}
