use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Dense two-dimensional container addressed by [`Point`].
///
/// Cells live in an [`Array2`] of shape `(height, width)` in standard layout, so the flat
/// position of `(x, y)` is `x + width * y` and iteration is row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl<T> Grid<T> {
    pub fn from_fn(width: Coord, height: Coord, f: impl FnMut(Point) -> T) -> Result<Self> {
        check_dimensions(width, height)?;
        let cells = Points::new(width, height).map(f).collect();
        Self::from_vec(width, height, cells)
    }

    /// Builds a grid from cells given in row-major order.
    pub fn from_vec(width: Coord, height: Coord, cells: Vec<T>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = cell_count(width, height);
        if cells.len() != expected {
            return Err(GameError::LayoutMismatch {
                expected,
                actual: cells.len(),
            });
        }
        let cells = Array2::from_shape_vec((height as usize, width as usize), cells)
            .expect("length was checked against the shape");
        Ok(Self { cells })
    }

    pub fn width(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn size(&self) -> Size {
        (self.width(), self.height())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_in_bounds(&self, point: Point) -> bool {
        (0..self.width()).contains(&point.x) && (0..self.height()).contains(&point.y)
    }

    /// Flat row-major key of `point`, usable as a stable scalar id.
    pub fn index_of(&self, point: Point) -> Option<usize> {
        self.is_in_bounds(point)
            .then(|| point.x as usize + self.width() as usize * point.y as usize)
    }

    pub fn get(&self, point: Point) -> Result<&T> {
        self.get_or_default(point)
            .ok_or(GameError::OutOfBounds(point))
    }

    pub fn get_mut(&mut self, point: Point) -> Result<&mut T> {
        if !self.is_in_bounds(point) {
            return Err(GameError::OutOfBounds(point));
        }
        Ok(&mut self.cells[to_nd_index(point)])
    }

    /// Like [`Grid::get`] but yields `None` instead of failing outside the bounds.
    pub fn get_or_default(&self, point: Point) -> Option<&T> {
        if self.is_in_bounds(point) {
            Some(&self.cells[to_nd_index(point)])
        } else {
            None
        }
    }

    /// Every point of the grid in row-major order; each call starts a fresh walk.
    pub fn points(&self) -> Points {
        Points::new(self.width(), self.height())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.cells.iter())
    }

    /// Produces a grid of the same dimensions from `transform(point, value)`, visiting cells
    /// in the order of [`Grid::points`].
    pub fn map_indexed<R>(&self, mut transform: impl FnMut(Point, &T) -> R) -> Grid<R> {
        let cells = self
            .iter()
            .map(|(point, value)| transform(point, value))
            .collect();
        let cells = Array2::from_shape_vec(self.cells.dim(), cells)
            .expect("mapping preserves the cell count");
        Grid { cells }
    }

    /// The eight surrounding points of `point`; callers must bounds check each one.
    pub fn eight_way_neighbors(&self, point: Point) -> Neighbors {
        point.eight_way_neighbors()
    }

    /// Eight-way neighbors of `point` that fall inside the grid.
    ///
    /// Does not borrow the grid, so callers may mutate it while walking the result.
    pub fn neighbors_in_bounds(&self, point: Point) -> impl Iterator<Item = Point> + use<T> {
        let (width, height) = self.size();
        point
            .eight_way_neighbors()
            .filter(move |p| (0..width).contains(&p.x) && (0..height).contains(&p.y))
    }
}

impl<T: Clone> Grid<T> {
    pub fn new(width: Coord, height: Coord, fill: T) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            cells: Array2::from_elem((height as usize, width as usize), fill),
        })
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, point: Point) -> &Self::Output {
        match self.get(point) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, point: Point) -> &mut Self::Output {
        match self.get_mut(point) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

fn check_dimensions(width: Coord, height: Coord) -> Result<()> {
    if width > 0 && height > 0 {
        Ok(())
    } else {
        Err(GameError::InvalidDimensions { width, height })
    }
}

const fn to_nd_index(point: Point) -> [usize; 2] {
    [point.y as usize, point.x as usize]
}

/// Row-major walk over every point of a `width * height` area.
#[derive(Clone, Debug)]
pub struct Points {
    width: Coord,
    height: Coord,
    next: usize,
}

impl Points {
    fn new(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            next: 0,
        }
    }
}

impl Iterator for Points {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= cell_count(self.width, self.height) {
            return None;
        }
        let width = self.width as usize;
        let point = Point::new((self.next % width) as Coord, (self.next / width) as Coord);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = cell_count(self.width, self.height).saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Points {}
