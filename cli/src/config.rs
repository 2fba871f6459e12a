use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{Coord, GameConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

/// Play Minesweeper in the terminal.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Preset board, individual fields can be overridden below
    #[arg(short, long, value_enum, default_value_t = Difficulty::Beginner)]
    pub difficulty: Difficulty,

    #[arg(long)]
    pub width: Option<Coord>,

    #[arg(long)]
    pub height: Option<Coord>,

    #[arg(short, long)]
    pub bombs: Option<usize>,

    /// Seed for reproducible boards, random if omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print every tile and board change as a JSON line
    #[arg(long)]
    pub events: bool,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

impl Args {
    pub fn game_config(&self) -> sweeper_core::Result<GameConfig> {
        let preset = self.difficulty.config();
        GameConfig::new(
            self.width.unwrap_or(preset.width),
            self.height.unwrap_or(preset.height),
            self.bombs.unwrap_or(preset.bombs),
        )
    }
}
