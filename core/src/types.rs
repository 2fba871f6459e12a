use core::fmt;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
///
/// Signed so that neighbor offsets may step off the board before being bounds checked.
pub type Coord = i32;

/// Board dimensions `(width, height)`.
pub type Size = (Coord, Coord);

/// Integer coordinates `(x, y)` of a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: Coord, dy: Coord) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The eight surrounding points, without any bounds filtering.
    pub const fn eight_way_neighbors(self) -> Neighbors {
        Neighbors::new(self)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Total cell count for a `width * height` board, zero for non-positive dimensions.
pub const fn cell_count(width: Coord, height: Coord) -> usize {
    if width <= 0 || height <= 0 {
        0
    } else {
        (width as usize).saturating_mul(height as usize)
    }
}

/// Column-major walk of the 3x3 block minus its center: for each dx, for each dy.
const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Point,
    index: u8,
}

impl Neighbors {
    const fn new(center: Point) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for Neighbors {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        let &(dx, dy) = DISPLACEMENTS.get(usize::from(self.index))?;
        self.index += 1;
        Some(self.center.offset(dx, dy))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = DISPLACEMENTS.len() - usize::from(self.index);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Neighbors {}
