//! Terminal front end: reads keys, drives the engine's ticks, and draws
//! snapshots
mod command;
mod consts;
mod util;
mod view;
use self::command::Command;
use self::view::View;
use crossterm::event::{poll, read, Event};
use gridsnake::engine::{Direction, Engine, Snapshot};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

#[derive(Clone, Debug)]
pub(crate) struct App<R> {
    engine: Engine<R>,
    snapshot: Snapshot,
    next_tick: Option<Instant>,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(engine: Engine<R>) -> App<R> {
        let snapshot = engine.snapshot();
        App {
            engine,
            snapshot,
            next_tick: None,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| {
                frame.render_widget(
                    View {
                        snapshot: &self.snapshot,
                        grid: self.engine.grid(),
                    },
                    frame.area(),
                );
            })?;
            self.process_input()?;
        }
        Ok(())
    }

    /// Wait for either a key press or the next tick, whichever comes first.
    /// Once the game is over, only key presses are waited for.
    fn process_input(&mut self) -> io::Result<()> {
        if self.snapshot.game_over {
            self.handle_event(read()?);
            return Ok(());
        }
        let when = self.deadline(Instant::now());
        if poll(when.saturating_duration_since(Instant::now()))? {
            self.handle_event(read()?);
        } else {
            self.advance(when, Instant::now());
        }
        Ok(())
    }

    /// Return when the next tick is due, starting the timer at `now` if it
    /// isn't already running
    fn deadline(&mut self, now: Instant) -> Instant {
        let period = self.engine.tick_period();
        *self.next_tick.get_or_insert_with(|| now + period)
    }

    /// Run the tick that was due at `when` and schedule the one after it one
    /// period later (but no earlier than `now`)
    fn advance(&mut self, when: Instant, now: Instant) {
        self.snapshot = self.engine.tick();
        self.next_tick = if self.snapshot.game_over {
            None
        } else {
            Some((when + self.engine.tick_period()).max(now))
        };
    }

    fn handle_event(&mut self, event: Event) {
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        match (cmd, self.snapshot.game_over) {
            (Command::Quit | Command::Q, _) => self.quitting = true,
            (Command::Up, false) => self.engine.set_direction(Direction::Up),
            (Command::Down, false) => self.engine.set_direction(Direction::Down),
            (Command::Left, false) => self.engine.set_direction(Direction::Left),
            (Command::Right, false) => self.engine.set_direction(Direction::Right),
            (Command::R, true) => {
                self.engine.reset();
                self.snapshot = self.engine.snapshot();
                self.next_tick = None;
            }
            _ => (),
        }
    }
}
