use std::rc::Rc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - NotStarted -> Active
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// Initial state, nothing clicked yet
    #[default]
    NotStarted,
    /// First click or flag happened
    Active,
    /// Every safe tile is open
    Won,
    /// A bomb was opened
    Lost,
}

impl BoardState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Authoritative state of one round.
///
/// Tile truth and tile state live in two grids of identical dimensions. Every mutator runs
/// its whole cascade before returning and reports each changed tile through
/// [`MinesweeperBoard::subscribe_tile_changed`] observers. Observers are called while the
/// board is mutably borrowed and must not call back into it.
///
/// A board lives for exactly one round; start a new game by building a new board.
#[derive(Debug)]
pub struct MinesweeperBoard {
    tile_data: Grid<TileData>,
    tile_state: Grid<TileState>,
    bomb_count: usize,
    tiles_left_to_win: usize,
    flag_count: usize,
    state: BoardState,
    tile_changed: Signal<Point>,
    state_changed: Signal<BoardState>,
}

impl MinesweeperBoard {
    /// Random board using the thread-local generator.
    ///
    /// The first click is not protected, it may hit a bomb.
    pub fn generate(width: Coord, height: Coord, bomb_count: usize) -> Result<Self> {
        Self::generate_with_rng(width, height, bomb_count, &mut rand::rng())
    }

    pub fn generate_with_rng<R: Rng>(
        width: Coord,
        height: Coord,
        bomb_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let layout = shuffled_layout(cell_count(width, height), bomb_count, rng);
        let board = Self::from_layout(width, height, layout)?;
        log::debug!(
            "Generated {}x{} board with {} bombs",
            width,
            height,
            board.bomb_count
        );
        Ok(board)
    }

    /// Board from an explicit row-major bomb mask of `width * height` entries.
    pub fn from_layout(width: Coord, height: Coord, layout: Vec<bool>) -> Result<Self> {
        let bombs = Grid::from_vec(width, height, layout)?;
        let tile_data = bombs.map_indexed(|point, &is_bomb| {
            if is_bomb {
                TileData::Bomb
            } else {
                let bomb_neighbor_count = bombs
                    .neighbors_in_bounds(point)
                    .filter(|&neighbor| bombs[neighbor])
                    .count() as u8;
                TileData::Empty {
                    bomb_neighbor_count,
                }
            }
        });
        let bomb_count = bombs.iter().filter(|&(_, &is_bomb)| is_bomb).count();

        Ok(Self {
            tile_state: Grid::new(width, height, TileState::default())?,
            tiles_left_to_win: tile_data.len() - bomb_count,
            tile_data,
            bomb_count,
            flag_count: 0,
            state: BoardState::default(),
            tile_changed: Signal::new(),
            state_changed: Signal::new(),
        })
    }

    pub fn from_bomb_points(width: Coord, height: Coord, bombs: &[Point]) -> Result<Self> {
        let mut layout = Grid::new(width, height, false)?;
        for &point in bombs {
            *layout.get_mut(point)? = true;
        }
        Self::from_layout(width, height, layout.iter().map(|(_, &b)| b).collect())
    }

    pub fn width(&self) -> Coord {
        self.tile_data.width()
    }

    pub fn height(&self) -> Coord {
        self.tile_data.height()
    }

    pub fn size(&self) -> Size {
        self.tile_data.size()
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn bomb_count(&self) -> usize {
        self.bomb_count
    }

    pub fn tiles_left_to_win(&self) -> usize {
        self.tiles_left_to_win
    }

    pub fn flag_count(&self) -> usize {
        self.flag_count
    }

    /// How many bombs have not been flagged yet, negative when over-flagged
    pub fn bombs_left(&self) -> isize {
        self.bomb_count as isize - self.flag_count as isize
    }

    pub fn is_point_in_bounds(&self, point: Point) -> bool {
        self.tile_data.is_in_bounds(point)
    }

    pub fn tile_state(&self, point: Point) -> Result<TileState> {
        self.tile_state.get(point).copied()
    }

    pub fn tile_data(&self, point: Point) -> Result<TileData> {
        self.tile_data.get(point).copied()
    }

    pub fn points(&self) -> Points {
        self.tile_data.points()
    }

    pub fn tile_data_grid(&self) -> &Grid<TileData> {
        &self.tile_data
    }

    pub fn tile_state_grid(&self) -> &Grid<TileState> {
        &self.tile_state
    }

    pub fn subscribe_tile_changed(&mut self, observer: &Rc<dyn Observer<Point>>) -> bool {
        self.tile_changed.subscribe(observer)
    }

    pub fn unsubscribe_tile_changed(&mut self, observer: &Rc<dyn Observer<Point>>) -> bool {
        self.tile_changed.unsubscribe(observer)
    }

    pub fn subscribe_state_changed(&mut self, observer: &Rc<dyn Observer<BoardState>>) -> bool {
        self.state_changed.subscribe(observer)
    }

    pub fn unsubscribe_state_changed(&mut self, observer: &Rc<dyn Observer<BoardState>>) -> bool {
        self.state_changed.unsubscribe(observer)
    }

    /// Drops every observer, call before discarding the board.
    pub fn clear_observers(&mut self) {
        self.tile_changed.clear();
        self.state_changed.clear();
    }

    /// Flip a closed tile between flagged and unflagged
    pub fn toggle_flag(&mut self, point: Point) -> FlagOutcome {
        if !self.is_point_in_bounds(point) {
            log::warn!("Ignoring flag outside the board at {}", point);
            return FlagOutcome::NoChange;
        }
        self.mark_started();
        if !self.state.is_active() {
            log::warn!("Ignoring flag at {} while board is {:?}", point, self.state);
            return FlagOutcome::NoChange;
        }

        let tile = &mut self.tile_state[point];
        if tile.is_open {
            log::debug!("Cannot flag open tile at {}", point);
            return FlagOutcome::NoChange;
        }
        tile.visibility = tile.visibility.toggled();
        let outcome = if tile.is_flagged() {
            self.flag_count += 1;
            FlagOutcome::Flagged
        } else {
            self.flag_count -= 1;
            FlagOutcome::Unflagged
        };
        self.tile_changed.emit(&point);
        outcome
    }

    /// Open a closed tile, or chord an already open one
    pub fn click_tile(&mut self, point: Point) -> OpenOutcome {
        if !self.is_point_in_bounds(point) {
            log::warn!("Ignoring click outside the board at {}", point);
            return OpenOutcome::NoChange;
        }
        self.mark_started();
        if !self.state.is_active() {
            log::warn!("Ignoring click at {} while board is {:?}", point, self.state);
            return OpenOutcome::NoChange;
        }

        if self.tile_state[point].is_open {
            self.open_neighbors(point)
        } else {
            self.open_tile(point)
        }
    }

    fn open_tile(&mut self, point: Point) -> OpenOutcome {
        if !self.tile_state[point].is_closed() {
            log::debug!("Flagged tile at {} cannot be opened", point);
            return OpenOutcome::NoChange;
        }

        self.set_tile_open(point, true);
        if self.tile_data[point].is_bomb() {
            self.lose()
        } else {
            self.check_win()
        }
    }

    /// Chord: open every unflagged neighbor once the flags around `point` match its number.
    fn open_neighbors(&mut self, point: Point) -> OpenOutcome {
        assert!(
            self.tile_state[point].is_open,
            "chord opening requested on closed tile {point}"
        );
        let Some(bomb_neighbor_count) = self.tile_data[point].bomb_neighbor_count() else {
            panic!("chord opening requested on open bomb {point} while the game is active");
        };

        let neighbors: SmallVec<[Point; 8]> = self.tile_data.neighbors_in_bounds(point).collect();
        let flagged = neighbors
            .iter()
            .filter(|&&neighbor| {
                let tile = self.tile_state[neighbor];
                tile.is_flagged() && !tile.is_open
            })
            .count();
        if flagged != usize::from(bomb_neighbor_count) {
            log::debug!(
                "Chord at {} needs {} flags, found {}",
                point,
                bomb_neighbor_count,
                flagged
            );
            return OpenOutcome::NoChange;
        }

        let mut opened: SmallVec<[Point; 8]> = SmallVec::new();
        for neighbor in neighbors {
            if self.tile_state[neighbor].can_open() {
                self.set_tile_open(neighbor, true);
                opened.push(neighbor);
            }
        }

        if opened.is_empty() {
            OpenOutcome::NoChange
        } else if opened.iter().any(|&p| self.tile_data[p].is_bomb()) {
            self.lose()
        } else {
            self.check_win()
        }
    }

    /// Opens `origin` and flood fills through connected zero tiles.
    ///
    /// Each tile is opened at most once; the closed-and-unopened guard keeps the walk finite.
    fn set_tile_open(&mut self, origin: Point, was_clicked: bool) {
        if !self.tile_state[origin].can_open() {
            log::debug!("Tile at {} is already open or flagged", origin);
            return;
        }

        let mut pending = Vec::from([(origin, was_clicked)]);
        while let Some((point, was_clicked)) = pending.pop() {
            let tile = &mut self.tile_state[point];
            if !tile.can_open() {
                continue;
            }
            tile.is_open = true;
            tile.was_clicked_when_bomb = was_clicked;
            self.tile_changed.emit(&point);

            let TileData::Empty {
                bomb_neighbor_count,
            } = self.tile_data[point]
            else {
                continue;
            };
            self.tiles_left_to_win = match self.tiles_left_to_win.checked_sub(1) {
                Some(left) => left,
                None => panic!("tiles left to win went negative opening {point}"),
            };
            log::trace!("Opened tile at {}, bomb count: {}", point, bomb_neighbor_count);

            if bomb_neighbor_count == 0 {
                let tile_state = &self.tile_state;
                pending.extend(
                    self.tile_data
                        .neighbors_in_bounds(point)
                        .filter(|&neighbor| tile_state[neighbor].can_open())
                        .map(|neighbor| (neighbor, false)),
                );
            }
        }
    }

    /// Flags every remaining bomb and ends the game once no safe tile is left closed
    fn check_win(&mut self) -> OpenOutcome {
        if self.tiles_left_to_win > 0 {
            return OpenOutcome::Opened;
        }

        for point in self.points() {
            let tile = &mut self.tile_state[point];
            if self.tile_data[point].is_bomb() && tile.is_closed() {
                tile.visibility = Visibility::Flagged;
                self.flag_count += 1;
                self.tile_changed.emit(&point);
            }
        }
        self.set_state(BoardState::Won);
        OpenOutcome::Won
    }

    /// Reveals every unflagged bomb and every wrong flag, then ends the game
    fn lose(&mut self) -> OpenOutcome {
        for point in self.points() {
            let data = self.tile_data[point];
            let tile = &mut self.tile_state[point];
            let reveal = match data {
                TileData::Bomb => !tile.is_flagged(),
                TileData::Empty { .. } => tile.is_flagged(),
            };
            if !reveal {
                continue;
            }
            if !data.is_bomb() && !tile.is_open {
                self.tiles_left_to_win -= 1;
            }
            tile.is_open = true;
            self.tile_changed.emit(&point);
        }
        self.set_state(BoardState::Lost);
        OpenOutcome::Exploded
    }

    /// Checks if the state is initial and changes to active
    fn mark_started(&mut self) {
        if matches!(self.state, BoardState::NotStarted) {
            self.set_state(BoardState::Active);
        }
    }

    fn set_state(&mut self, state: BoardState) {
        log::debug!("Board state {:?} -> {:?}", self.state, state);
        self.state = state;
        self.state_changed.emit(&state);
    }
}
