use crate::assets::Assets;
use crate::game::Game;
use crate::name_entry::{NameEntry, NameOutcome};
use log::info;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
    assets: Assets,
}

impl App {
    pub(crate) fn new(assets: Assets) -> App {
        App {
            screen: Screen::NameEntry(NameEntry::new()),
            assets,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        info!("Exiting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::NameEntry(ref entry) => {
                terminal.draw(|frame| entry.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    /// Wait for & handle the next input event or, once a round is in
    /// progress, the next game tick
    fn process_input(&mut self) -> io::Result<()> {
        match self.screen {
            Screen::NameEntry(ref mut entry) => {
                if let Some(outcome) = entry.process_input()? {
                    self.name_entered(outcome);
                }
            }
            Screen::Game(ref mut game) => {
                if let Some(screen) = game.process_input()? {
                    self.screen = screen;
                }
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn name_entered(&mut self, outcome: NameOutcome) {
        self.screen = match outcome {
            NameOutcome::Submitted(name) => Screen::Game(Game::new(name, self.assets.clone())),
            NameOutcome::Quit => Screen::Quit,
        };
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    NameEntry(NameEntry),
    Game(Game),
    Quit,
}
