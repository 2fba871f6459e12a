use core::str::FromStr;
use sweeper_core::{Coord, Point};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Point),
    Flag(Point),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command, type `help` for the list of commands")]
    Empty,
    #[error("Unknown command `{0}`, type `help` for the list of commands")]
    Unknown(String),
    #[error("`{0}` needs two coordinates, like `{0} 3 4`")]
    MissingCoords(String),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
}

pub const HELP: &str = "\
commands:
  o X Y | open X Y   open a tile, or chord an open numbered tile
  f X Y | flag X Y   toggle a flag
  n | new            start a new game
  h | help           show this help
  q | quit           leave";

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let mut point = || -> Result<Point, ParseCommandError> {
            let mut coord = || -> Result<Coord, ParseCommandError> {
                let word = words
                    .next()
                    .ok_or_else(|| ParseCommandError::MissingCoords(name.to_owned()))?;
                word.parse()
                    .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
            };
            Ok(Point::new(coord()?, coord()?))
        };

        match name.to_ascii_lowercase().as_str() {
            "o" | "open" => Ok(Self::Open(point()?)),
            "f" | "flag" => Ok(Self::Flag(point()?)),
            "n" | "new" => Ok(Self::NewGame),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(ParseCommandError::Unknown(name.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tile_commands() {
        assert_eq!("o 3 4".parse::<Command>(), Ok(Command::Open(Point::new(3, 4))));
        assert_eq!(
            "  FLAG 0 12 ".parse::<Command>(),
            Ok(Command::Flag(Point::new(0, 12)))
        );
        assert_eq!("new".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "o 1".parse::<Command>(),
            Err(ParseCommandError::MissingCoords("o".into()))
        );
        assert_eq!(
            "f 1 y".parse::<Command>(),
            Err(ParseCommandError::InvalidCoord("y".into()))
        );
    }
}
