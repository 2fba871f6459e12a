use sweeper_core::*;

/// How a tile is drawn, derived from its truth and its state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sprite {
    Closed,
    Open(u8),
    Flag,
    Exploded,
    Mine,
    IncorrectFlag,
}

impl Sprite {
    pub fn of(data: TileData, state: TileState) -> Self {
        use Sprite::*;
        match (data, state.is_open, state.visibility) {
            (_, false, Visibility::Closed) => Closed,
            (_, false, Visibility::Flagged) => Flag,
            (TileData::Bomb, true, _) if state.was_clicked_when_bomb => Exploded,
            (TileData::Bomb, true, _) => Mine,
            (TileData::Empty { .. }, true, Visibility::Flagged) => IncorrectFlag,
            (
                TileData::Empty {
                    bomb_neighbor_count,
                },
                true,
                Visibility::Closed,
            ) => Open(bomb_neighbor_count),
        }
    }

    pub const fn glyph(self) -> char {
        use Sprite::*;
        match self {
            Closed => '#',
            Open(0) => '.',
            Open(count) => (b'0' + count) as char,
            Flag => 'F',
            Exploded => '@',
            Mine => '*',
            IncorrectFlag => 'x',
        }
    }
}

pub fn sprite_at(board: &MinesweeperBoard, point: Point) -> Result<Sprite> {
    Ok(Sprite::of(board.tile_data(point)?, board.tile_state(point)?))
}

/// Draws the board with a column ruler on top and row numbers on the left.
pub fn render_board(board: &MinesweeperBoard) -> String {
    let (width, _) = board.size();
    let mut out = String::from("    ");
    for x in 0..width {
        out.push(char::from(b'0' + (x % 10) as u8));
    }
    out.push('\n');

    for point in board.points() {
        if point.x == 0 {
            out.push_str(&format!("{:>3} ", point.y));
        }
        let glyph = sprite_at(board, point).map_or('?', Sprite::glyph);
        out.push(glyph);
        if point.x == width - 1 {
            out.push('\n');
        }
    }
    out
}

pub fn render_status(board: &MinesweeperBoard, elapsed_secs: u32) -> String {
    let state = match board.state() {
        BoardState::NotStarted => "ready",
        BoardState::Active => "playing",
        BoardState::Won => "you won!",
        BoardState::Lost => "boom, you lost",
    };
    format!(
        "bombs left: {:>3}  time: {:>3}s  {}",
        board.bombs_left(),
        elapsed_secs,
        state
    )
}
