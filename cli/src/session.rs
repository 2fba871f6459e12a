use chrono::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use sweeper_core::*;

use crate::command::Command;

/// One change worth redrawing, in the order the driver learned about it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Tile {
        point: Point,
        state: TileState,
    },
    Board {
        state: BoardState,
    },
}

/// Changes reported by the board since the last drain.
#[derive(Debug, Default)]
struct Changes {
    tiles: BTreeSet<Point>,
    states: Vec<BoardState>,
}

/// Drives consecutive games in one terminal session.
///
/// The board's signals only record what changed; the session reads the board afterwards,
/// once the mutating call has returned.
pub struct Session {
    config: GameConfig,
    rng: SmallRng,
    board: MinesweeperBoard,
    changes: Rc<RefCell<Changes>>,
    tile_observer: Rc<dyn Observer<Point>>,
    state_observer: Rc<dyn Observer<BoardState>>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Self::generate(config, &mut rng)?;
        let changes = Rc::new(RefCell::new(Changes::default()));

        let sink = Rc::clone(&changes);
        let tile_observer: Rc<dyn Observer<Point>> = Rc::new(move |point: &Point| {
            sink.borrow_mut().tiles.insert(*point);
        });
        let sink = Rc::clone(&changes);
        let state_observer: Rc<dyn Observer<BoardState>> = Rc::new(move |state: &BoardState| {
            sink.borrow_mut().states.push(*state);
        });

        let mut session = Self {
            config,
            rng,
            board,
            changes,
            tile_observer,
            state_observer,
            started_at: None,
            ended_at: None,
        };
        session.subscribe();
        Ok(session)
    }

    pub fn board(&self) -> &MinesweeperBoard {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// Applies a board command and returns what changed, tiles first.
    pub fn apply(&mut self, command: Command) -> Result<Vec<Event>> {
        match command {
            Command::Open(point) => {
                let outcome = self.board.click_tile(point);
                if !outcome.has_update() {
                    log::info!("nothing to open at {}", point);
                }
                log::debug!("open tile {}: {:?}", point, outcome);
            }
            Command::Flag(point) => {
                let outcome = self.board.toggle_flag(point);
                if !outcome.has_update() {
                    log::info!("tile at {} can't be flagged", point);
                }
                log::debug!("flag tile {}: {:?}", point, outcome);
            }
            Command::NewGame => self.new_game()?,
            Command::Help | Command::Quit => {}
        }
        Ok(self.drain_changes())
    }

    /// How many seconds have passed since game started, 0 if it hasn't started
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    fn new_game(&mut self) -> Result<()> {
        self.board.clear_observers();
        self.board = Self::generate(self.config, &mut self.rng)?;
        *self.changes.borrow_mut() = Changes::default();
        self.started_at = None;
        self.ended_at = None;
        self.subscribe();
        log::info!("new game {:?}", self.config);
        Ok(())
    }

    fn generate(config: GameConfig, rng: &mut SmallRng) -> Result<MinesweeperBoard> {
        MinesweeperBoard::generate_with_rng(config.width, config.height, config.bombs, rng)
    }

    fn subscribe(&mut self) {
        self.board.subscribe_tile_changed(&self.tile_observer);
        self.board.subscribe_state_changed(&self.state_observer);
    }

    fn drain_changes(&mut self) -> Vec<Event> {
        let Changes { tiles, states } = core::mem::take(&mut *self.changes.borrow_mut());
        let mut events = Vec::with_capacity(tiles.len() + states.len());

        for point in tiles {
            match self.board.tile_state(point) {
                Ok(state) => events.push(Event::Tile { point, state }),
                Err(err) => log::error!("changed tile is not on the board: {}", err),
            }
        }
        for state in states {
            let now = Utc::now();
            match state {
                BoardState::Active => {
                    log::debug!("started at {}", now);
                    self.started_at = Some(now);
                }
                BoardState::Won | BoardState::Lost => {
                    log::debug!("ended at {}", now);
                    self.ended_at = Some(now);
                }
                BoardState::NotStarted => {}
            }
            events.push(Event::Board { state });
        }
        events
    }
}
