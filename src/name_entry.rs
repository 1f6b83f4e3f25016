use crate::consts;
use crate::util::{center_rect, get_display_area};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect, Size},
    text::Line,
    widgets::{Block, Widget},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The screen on which the player types their name before the round starts
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct NameEntry {
    text: String,
}

impl NameEntry {
    const WIDTH: u16 = 32;
    const HEIGHT: u16 = 7;

    pub(crate) fn new() -> NameEntry {
        NameEntry::default()
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
        let input = Self::input_area(frame.area());
        let width = u16::try_from(self.text.width()).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(
            input.x.saturating_add(width).min(input.right().saturating_sub(1)),
            input.y,
        ));
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<NameOutcome>> {
        Ok(self.handle_event(read()?))
    }

    /// Handle an input event.  Returns `Some` once the player has submitted a
    /// name or asked to quit.
    pub(crate) fn handle_event(&mut self, event: Event) -> Option<NameOutcome> {
        let KeyEvent {
            code, modifiers, ..
        } = event.as_key_press_event()?;
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match code {
            KeyCode::Char('c') if modifiers == KeyModifiers::CONTROL => {
                return Some(NameOutcome::Quit)
            }
            _ if !normal_modifiers.contains(modifiers) => (),
            KeyCode::Enter => return Some(NameOutcome::Submitted(self.name())),
            KeyCode::Backspace => {
                if let Some((i, _)) = self.text.grapheme_indices(true).next_back() {
                    self.text.truncate(i);
                }
            }
            KeyCode::Char(ch) => self.push(ch),
            _ => (),
        }
        None
    }

    /// Append `ch` to the name if it's a letter or whitespace and the name
    /// isn't full yet
    fn push(&mut self, ch: char) {
        if (ch.is_alphabetic() || ch.is_whitespace())
            && self.text.chars().count() < consts::MAX_NAME_LEN
        {
            self.text.push(ch);
        }
    }

    /// The name as it would be submitted right now
    pub(crate) fn name(&self) -> String {
        player_name(&self.text)
    }

    /// The area inside the input box, given the area of the whole frame
    fn input_area(area: Rect) -> Rect {
        let [_, input_box, _] = Self::layout(area);
        Block::bordered().inner(input_box)
    }

    /// Split the frame into the prompt line, the input box, and the
    /// instructions line
    fn layout(area: Rect) -> [Rect; 3] {
        let dialog = center_rect(
            get_display_area(area),
            Size {
                width: Self::WIDTH,
                height: Self::HEIGHT,
            },
        );
        let [prompt, _, input_box, _, instructions] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(dialog);
        [prompt, input_box, instructions]
    }
}

impl Widget for &NameEntry {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [prompt, input_box, instructions] = NameEntry::layout(area);
        Line::styled("Enter your name:", consts::TEXT_STYLE)
            .centered()
            .render(prompt, buf);
        let block = Block::bordered().border_style(consts::INPUT_BOX_STYLE);
        let inner = block.inner(input_box);
        block.render(input_box, buf);
        Line::styled(self.text.as_str(), consts::TEXT_STYLE).render(inner, buf);
        Line::styled("Press ENTER when done", consts::NOTICE_STYLE)
            .centered()
            .render(instructions, buf);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum NameOutcome {
    Submitted(String),
    Quit,
}

/// Tidy up raw name input: trim surrounding whitespace, cut it down to
/// [`MAX_NAME_LEN`][consts::MAX_NAME_LEN] characters, and use
/// [`DEFAULT_PLAYER_NAME`][consts::DEFAULT_PLAYER_NAME] if nothing is left.
pub(crate) fn player_name(raw: &str) -> String {
    let name = raw
        .chars()
        .take(consts::MAX_NAME_LEN)
        .collect::<String>()
        .trim()
        .to_owned();
    if name.is_empty() {
        String::from(consts::DEFAULT_PLAYER_NAME)
    } else {
        name
    }
}
