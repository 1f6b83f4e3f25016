mod countdown;
mod direction;
mod food;
mod snake;
use self::countdown::{format_time, Countdown};
use self::direction::Direction;
use self::food::Food;
use self::snake::Snake;
use crate::app::Screen;
use crate::assets::Assets;
use crate::command::Command;
use crate::consts;
use crate::render::Canvas;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use log::{debug, info};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    text::Line,
    widgets::{Block, Clear, Widget},
    Frame,
};
use std::time::Instant;

/// A round of the game, from the moment the player's name is entered
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    player: String,
    snake: Snake,
    food: Food,
    countdown: Countdown,
    /// Seconds left on the clock as of the last tick
    remaining: u64,
    state: GameState,
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(player: String, assets: Assets) -> Self {
        Game::new_with_rng(player, assets, rand::rng(), Instant::now())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(player: String, assets: Assets, mut rng: R, now: Instant) -> Game<R> {
        let snake = Snake::new(&mut rng, assets.snake);
        let food = Food::new(&mut rng, assets.food);
        let countdown = Countdown::new(consts::GAME_DURATION, now);
        info!("Starting round for player {player:?}");
        Game {
            rng,
            player,
            snake,
            food,
            remaining: countdown.total_secs(),
            countdown,
            state: GameState::Playing,
            next_tick: None,
        }
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first, and process it
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        let when = *self
            .next_tick
            .get_or_insert_with(|| Instant::now() + consts::TICK_PERIOD);
        let wait = when.saturating_duration_since(Instant::now());
        if wait.is_zero() || !poll(wait)? {
            self.next_tick = None;
            self.tick(Instant::now());
            Ok(None)
        } else {
            Ok(self.handle_event(read()?, Instant::now()))
        }
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> Option<Screen> {
        match (
            self.state,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => {
                info!("Quit requested; final score {}", self.snake.score);
                return Some(Screen::Quit);
            }
            (GameState::Playing, Command::Up) => self.snake.turn(Direction::Up),
            (GameState::Playing, Command::Down) => self.snake.turn(Direction::Down),
            (GameState::Playing, Command::Left) => self.snake.turn(Direction::Left),
            (GameState::Playing, Command::Right) => self.snake.turn(Direction::Right),
            (GameState::GameOver, Command::Restart) => self.restart(now),
            _ => (),
        }
        None
    }

    /// Run one step of the game: move the snake, let it eat, and check the
    /// clock
    fn tick(&mut self, now: Instant) {
        if self.state != GameState::Playing {
            return;
        }
        if !self.snake.advance() {
            // Food & clock are left untouched on the tick the round ends
            self.end_round("snake ran into itself");
            return;
        }
        if self.snake.head() == self.food.position {
            self.snake.grow_and_score(consts::SCORE_INCREMENT);
            self.food.randomize_position(&mut self.rng);
            debug!(
                "Food eaten; score is now {}, new food at {:?}",
                self.snake.score, self.food.position
            );
        }
        self.remaining = self.countdown.remaining_secs(now);
        if self.remaining == 0 {
            self.end_round("time is up");
        }
    }

    fn restart(&mut self, now: Instant) {
        info!("Restarting round for player {:?}", self.player);
        self.snake.reset(&mut self.rng);
        self.food.randomize_position(&mut self.rng);
        self.countdown.restart(now);
        self.remaining = self.countdown.total_secs();
        self.state = GameState::Playing;
        self.next_tick = None;
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn end_round(&mut self, reason: &str) {
        info!(
            "Round over for player {:?} ({reason}); final score {}",
            self.player, self.snake.score
        );
        self.state = GameState::GameOver;
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, time_area, board_area, name_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(consts::BOARD_SIZE.height),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(format!(" Score: ${}", self.snake.score), consts::TEXT_STYLE)
            .render(score_area, buf);
        Line::styled(
            format!(" Time: {}", format_time(self.remaining)),
            consts::TEXT_STYLE,
        )
        .render(time_area, buf);
        Line::styled(format!("{} ", self.player), consts::TEXT_STYLE)
            .right_aligned()
            .render(name_area, buf);

        Block::bordered().render(board_area, buf);
        let mut canvas = Canvas {
            area: board_area.inner(Margin::new(1, 1)),
            buf: &mut *buf,
        };
        self.snake.render(&mut canvas);
        self.food.render(&mut canvas);

        if self.state == GameState::GameOver {
            GameOver.render(board_area, buf);
        }
    }
}

/// The message shown over the board when the round is over
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameOver;

impl GameOver {
    const MESSAGE: &'static str = "GAME OVER! Press R to restart";
    const SIZE: Size = Size {
        width: 33,
        height: 3,
    };
}

impl Widget for GameOver {
    // `area` is the area of the board, not just the message box
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = center_rect(area, Self::SIZE);
        Clear.render(popup, buf);
        Block::bordered()
            .border_style(consts::NOTICE_STYLE)
            .render(popup, buf);
        Line::styled(Self::MESSAGE, consts::NOTICE_STYLE)
            .centered()
            .render(popup.inner(Margin::new(1, 1)), buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Playing,
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::{
        buffer::Cell,
        layout::Position,
        style::{Color, Style},
    };
    use std::collections::VecDeque;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_game(start: Instant) -> Game<ChaCha12Rng> {
        Game::new_with_rng(
            String::from("Rex"),
            Assets::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            start,
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)))
            .map(Cell::symbol)
            .collect()
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let area = Rect::new(0, 0, consts::DISPLAY_SIZE.width, consts::DISPLAY_SIZE.height);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn new_game_state() {
        let game = new_game(Instant::now());
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.snake.body, VecDeque::from([Position::new(15, 15)]));
        assert_eq!(game.snake.length, 1);
        assert_eq!(game.snake.score, 0);
        assert_eq!(game.remaining, 120);
        assert!(game.food.position.x < consts::GRID_COUNT);
        assert!(game.food.position.y < consts::GRID_COUNT);
    }

    #[test]
    fn eat_food() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.snake.direction = Direction::Right;
        game.food.position = Position::new(16, 15);
        game.tick(start + consts::TICK_PERIOD);
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.snake.head(), Position::new(16, 15));
        assert_eq!(game.snake.score, 100);
        assert_eq!(game.snake.length, 2);
        assert_ne!(game.food.position, Position::new(16, 15));
        assert!(game.food.position.x < consts::GRID_COUNT);
        assert!(game.food.position.y < consts::GRID_COUNT);
        game.food.position = Position::new(0, 0);
        game.tick(start + consts::TICK_PERIOD * 2);
        assert_eq!(game.snake.body.len(), 2);
        assert_eq!(game.snake.score, 100);
    }

    #[test]
    fn time_runs_out() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.food.position = Position::new(0, 0);
        game.snake.direction = Direction::Down;
        game.snake.body = VecDeque::from([Position::new(5, 5)]);
        game.tick(start + Duration::from_millis(119_900));
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.remaining, 1);
        game.tick(start + Duration::from_secs(120));
        assert_eq!(game.state, GameState::GameOver);
        assert_eq!(game.remaining, 0);
        let body = game.snake.body.clone();
        game.tick(start + Duration::from_secs(121));
        assert_eq!(game.snake.body, body, "snake moved after game over");
    }

    #[test]
    fn self_collision_ends_round() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.food.position = Position::new(0, 0);
        game.snake.body = VecDeque::from([
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(6, 4),
        ]);
        game.snake.length = 5;
        game.snake.direction = Direction::Right;
        game.tick(start + consts::TICK_PERIOD);
        assert_eq!(game.state, GameState::GameOver);
        assert_eq!(game.snake.head(), Position::new(5, 5));
        assert_eq!(game.remaining, 120, "clock kept running after collision");
    }

    #[test]
    fn no_reversing() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.snake.direction = Direction::Right;
        assert!(game.handle_event(key(KeyCode::Left), start).is_none());
        assert_eq!(game.snake.direction, Direction::Right);
        assert!(game.handle_event(key(KeyCode::Up), start).is_none());
        assert_eq!(game.snake.direction, Direction::Up);
        assert!(game.handle_event(key(KeyCode::Down), start).is_none());
        assert_eq!(game.snake.direction, Direction::Up);
    }

    #[test]
    fn unknown_keys_ignored() {
        let start = Instant::now();
        let mut game = new_game(start);
        let before = game.clone();
        assert!(game.handle_event(key(KeyCode::Char('x')), start).is_none());
        assert!(game.handle_event(key(KeyCode::Enter), start).is_none());
        assert!(game.handle_event(Event::FocusLost, start).is_none());
        assert_eq!(game, before);
    }

    #[test]
    fn restart_only_after_game_over() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.snake.score = 300;
        assert!(game.handle_event(key(KeyCode::Char('r')), start).is_none());
        assert_eq!(game.snake.score, 300);
        assert_eq!(game.state, GameState::Playing);
    }

    #[test]
    fn restart() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.snake.score = 300;
        game.snake.length = 4;
        game.snake.body = VecDeque::from([
            Position::new(3, 3),
            Position::new(3, 4),
            Position::new(3, 5),
            Position::new(3, 6),
        ]);
        let later = start + Duration::from_secs(120);
        game.tick(later);
        assert_eq!(game.state, GameState::GameOver);
        let restart_time = later + Duration::from_secs(5);
        assert!(game
            .handle_event(key(KeyCode::Char('r')), restart_time)
            .is_none());
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.snake.score, 0);
        assert_eq!(game.snake.length, 1);
        assert_eq!(game.snake.body, VecDeque::from([Position::new(15, 15)]));
        assert_eq!(game.remaining, 120);
        assert_eq!(game.countdown.remaining_secs(restart_time), 120);
        game.food.position = Position::new(0, 0);
        game.tick(restart_time + consts::TICK_PERIOD);
        assert_eq!(game.state, GameState::Playing);
        assert_eq!(game.remaining, 120);
    }

    #[test]
    fn arrows_ignored_after_game_over() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.snake.direction = Direction::Up;
        game.state = GameState::GameOver;
        assert!(game.handle_event(key(KeyCode::Left), start).is_none());
        assert_eq!(game.snake.direction, Direction::Up);
    }

    #[test]
    fn quit_in_any_state() {
        let start = Instant::now();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let mut game = new_game(start);
        assert!(matches!(
            game.handle_event(ctrl_c.clone(), start),
            Some(Screen::Quit)
        ));
        game.state = GameState::GameOver;
        assert!(matches!(
            game.handle_event(ctrl_c, start),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn draw_new_game() {
        let mut game = new_game(Instant::now());
        game.food.position = Position::new(3, 4);
        let buffer = render(&game);
        assert_eq!(row(&buffer, 0).trim_end(), " Score: $0");
        assert_eq!(row(&buffer, 1).trim_end(), " Time: 02:00");
        assert_eq!(
            row(&buffer, 2),
            format!("┌{}┐", "─".repeat(60))
        );
        assert_eq!(
            row(&buffer, 33),
            format!("└{}┘", "─".repeat(60))
        );
        assert_eq!(row(&buffer, 34), format!("{}Rex ", " ".repeat(58)));
        // The head is at grid cell (15, 15)
        assert_eq!(buffer[(31, 18)].bg, Color::Green);
        assert_eq!(buffer[(32, 18)].bg, Color::Green);
        assert_eq!(buffer[(30, 18)].bg, Color::Reset);
        assert_eq!(buffer[(33, 18)].bg, Color::Reset);
        // The food is at grid cell (3, 4)
        assert_eq!(buffer[(7, 7)].bg, Color::Red);
        assert_eq!(buffer[(8, 7)].bg, Color::Red);
        assert!(!(0..35).any(|y| row(&buffer, y).contains("GAME OVER")));
    }

    #[test]
    fn draw_score_and_time() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.snake.score = 1200;
        game.food.position = Position::new(0, 0);
        game.snake.body = VecDeque::from([Position::new(5, 5)]);
        game.snake.direction = Direction::Up;
        game.tick(start + Duration::from_millis(45_500));
        let buffer = render(&game);
        assert_eq!(row(&buffer, 0).trim_end(), " Score: $1200");
        assert_eq!(row(&buffer, 1).trim_end(), " Time: 01:15");
    }

    #[test]
    fn draw_game_over() {
        let mut game = new_game(Instant::now());
        game.state = GameState::GameOver;
        let buffer = render(&game);
        let lines = (0..35).map(|y| row(&buffer, y)).collect::<Vec<_>>();
        let (y, line) = lines
            .iter()
            .enumerate()
            .find(|(_, ln)| ln.contains(GameOver::MESSAGE))
            .expect("game over message should be drawn");
        assert!((16..=18).contains(&y), "message drawn on row {y}");
        assert!(line.contains("│ GAME OVER! Press R to restart │"));
        assert_eq!(lines[0].trim_end(), " Score: $0");
    }

    #[test]
    fn draw_rotated_head() {
        let sprite = crate::render::Sprite::parse("=>\n/\\\n<=\n\\/\n", Style::new()).unwrap();
        let assets = Assets {
            snake: sprite.into(),
            food: crate::render::ColorRect(Color::Red).into(),
        };
        let mut game = Game::new_with_rng(
            String::from("Rex"),
            assets,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            Instant::now(),
        );
        game.food.position = Position::new(0, 0);
        game.snake.body = VecDeque::from([Position::new(15, 15), Position::new(15, 16)]);
        game.snake.direction = Direction::Left;
        let buffer = render(&game);
        let cells = |y| row(&buffer, y).chars().skip(31).take(2).collect::<String>();
        assert_eq!(cells(18), "<=");
        assert_eq!(cells(19), "=>");
    }
}
