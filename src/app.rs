use crate::command::Command;
use crate::config::{Config, StyleConfig};
use crate::consts;
use crate::game::{Board, Game};
use crate::scheduler::Scheduler;
use crate::store::{BestScore, JsonFileStore, KeyValueStore, MemoryStore};
use crossterm::event::{poll, read, Event};
use log::{info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;

/// The running program: owns the current game, the scheduler that drives it,
/// and the best score
#[derive(Debug)]
pub(crate) struct App<S, R> {
    game: Game<R>,
    scheduler: Scheduler,
    best: BestScore<S>,
    styles: StyleConfig,
    /// Source of the seeds for each new game's RNG
    seeder: R,
    /// Set when something visible has changed since the last draw
    dirty: bool,
    quitting: bool,
}

impl App<Box<dyn KeyValueStore>, StdRng> {
    pub(crate) fn new(config: &Config) -> Self {
        let store: Box<dyn KeyValueStore> = if !config.files.save_best_score {
            Box::new(MemoryStore::default())
        } else if let Some(path) = config.files.store_file() {
            info!("Using store file {}", path.display());
            Box::new(JsonFileStore::new(path.into_owned()))
        } else {
            warn!("Failed to determine path to local data directory; best score will not be saved");
            Box::new(MemoryStore::default())
        };
        App::with_parts(BestScore::load(store), StdRng::from_os_rng(), config.styles)
    }
}

impl<S: KeyValueStore, R: Rng + SeedableRng> App<S, R> {
    pub(crate) fn with_parts(best: BestScore<S>, mut seeder: R, styles: StyleConfig) -> Self {
        info!("Best score so far: {}", best.get());
        let game = Game::new_with_rng(R::from_rng(&mut seeder));
        App {
            game,
            scheduler: Scheduler::new(),
            best,
            styles,
            seeder,
            dirty: true,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        info!("Starting new game");
        self.scheduler.start(Instant::now());
        while !self.quitting {
            if self.dirty {
                self.draw(&mut terminal)?;
            }
            self.process_input(Instant::now() + consts::FRAME_PERIOD)?;
            self.run_frame(Instant::now());
        }
        self.scheduler.stop();
        Ok(())
    }

    /// Handle input events until `deadline`, redrawing after each one that
    /// changed anything
    fn process_input(&mut self, deadline: Instant) -> io::Result<()> {
        while !self.quitting && poll(deadline.saturating_duration_since(Instant::now()))? {
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let board = Board::new(&self.game, self.best.get(), self.styles);
        terminal.draw(|frame| frame.render_widget(board, frame.area()))?;
        self.dirty = false;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::FocusLost => self.dirty |= self.game.pause(),
            Event::Resize(..) => self.dirty = true,
            _ => {
                let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event)
                else {
                    return;
                };
                match cmd {
                    Command::Quit => self.quitting = true,
                    Command::Turn(direction) => self.dirty |= self.game.steer(direction),
                    Command::Pause => self.dirty |= self.game.toggle_pause(),
                    Command::Restart => self.restart(),
                }
            }
        }
    }

    /// Throw away the current game and start a fresh one
    fn restart(&mut self) {
        info!("Starting new game");
        self.game = Game::new_with_rng(R::from_rng(&mut self.seeder));
        self.scheduler.start(Instant::now());
        self.dirty = true;
    }

    fn run_frame(&mut self, now: Instant) {
        let frame = self.scheduler.frame(now, &mut self.game);
        if frame.ticks > 0 {
            self.dirty = true;
        }
        if let Some(ending) = frame.ending {
            info!("Game over ({ending}); score: {}", self.game.score());
            let _ = self.best.record(self.game.score());
        }
    }
}
