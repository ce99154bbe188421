// src/grid.rs
//! Клеточная сетка карты
//!
//! Каждая клетка — океан, нераспределённая суша или клетка конкретной страны.
//! Во внешнем представлении клетка — целое число:
//! - `-1` — океан ([`OCEAN_LABEL`])
//! - `-2` — нераспределённая суша ([`LAND_LABEL`])
//! - `>= 0` — идентификатор страны
//!
//! Индекс клетки вычисляется как `y * width + x`. Соседство — 4-связное,
//! края карты не зацикливаются.

use serde::{Deserialize, Serialize};

pub type RegionId = u32;

pub const OCEAN_LABEL: i32 = -1;
pub const LAND_LABEL: i32 = -2;

/// Порядок перебора соседей. От него зависит "первый найденный" сосед при росте стран.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Cell {
    Ocean,
    Land,
    Region(RegionId),
}

impl Cell {
    #[must_use]
    pub fn is_ocean(self) -> bool {
        self == Cell::Ocean
    }

    /// Суша — как нераспределённая, так и принадлежащая стране.
    #[must_use]
    pub fn is_land(self) -> bool {
        !self.is_ocean()
    }

    #[must_use]
    pub fn region(self) -> Option<RegionId> {
        match self {
            Cell::Region(id) => Some(id),
            _ => None,
        }
    }
}

impl From<Cell> for i32 {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Ocean => OCEAN_LABEL,
            Cell::Land => LAND_LABEL,
            Cell::Region(id) => id as i32,
        }
    }
}

impl TryFrom<i32> for Cell {
    type Error = String;

    fn try_from(label: i32) -> Result<Self, Self::Error> {
        match label {
            OCEAN_LABEL => Ok(Cell::Ocean),
            LAND_LABEL => Ok(Cell::Land),
            id if id >= 0 => Ok(Cell::Region(id as RegionId)),
            other => Err(format!("unknown cell label {other}")),
        }
    }
}

/// Сетка клеток размером `width × height`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    pub data: Vec<Cell>,
}

impl Grid {
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Cell) -> Self {
        Self {
            width,
            height,
            data: vec![fill; (width as usize) * (height as usize)],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[must_use]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((idx % width) as u32, (idx / width) as u32)
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Cell {
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        let idx = self.index(x, y);
        self.data[idx] = cell;
    }

    /// Сосед клетки в направлении `(dx, dy)`; `None` — за пределами карты.
    #[must_use]
    pub fn offset(&self, x: u32, y: u32, dx: i32, dy: i32) -> Option<(u32, u32)> {
        let nx = x as i64 + i64::from(dx);
        let ny = y as i64 + i64::from(dy);
        if nx < 0 || ny < 0 || nx >= i64::from(self.width) || ny >= i64::from(self.height) {
            None
        } else {
            Some((nx as u32, ny as u32))
        }
    }

    /// Соседи по 4 направлениям в порядке [`DIRECTIONS`]; `None` — сосед за краем.
    pub fn neighbors(&self, x: u32, y: u32) -> impl Iterator<Item = Option<(u32, u32)>> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&(dx, dy)| self.offset(x, y, dx, dy))
    }

    /// Индексы клеток на внешнем крае карты (каждая ровно один раз).
    pub fn edge_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&idx| {
            let (x, y) = self.coords(idx);
            x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
        })
    }

    #[must_use]
    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.data.iter().filter(|&&c| pred(c)).count()
    }

    /// Двумерный массив меток для внешних потребителей (рендер, сохранение).
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<i32>> {
        self.data
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|&c| i32::from(c)).collect())
            .collect()
    }

    /// Разбор текстовой карты: `.` — океан, `#` — суша, цифра — страна.
    /// Используется в тестах.
    #[cfg(test)]
    pub(crate) fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = lines.len() as u32;
        let width = lines.first().map_or(0, |l| l.len()) as u32;
        let data = lines
            .iter()
            .flat_map(|l| l.chars())
            .map(|ch| match ch {
                '.' => Cell::Ocean,
                '#' => Cell::Land,
                d => Cell::Region(d.to_digit(10).expect("region digit")),
            })
            .collect();
        Self {
            width,
            height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_json() {
        let grid = Grid::parse(
            "
            .#0
            12.
            ",
        );
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains("[-1,-2,0,1,2,-1]"));
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn negative_unknown_label_is_rejected() {
        assert!(Cell::try_from(-7).is_err());
    }

    #[test]
    fn offset_respects_bounds() {
        let grid = Grid::new(3, 2, Cell::Ocean);
        assert_eq!(grid.offset(0, 0, -1, 0), None);
        assert_eq!(grid.offset(2, 1, 0, 1), None);
        assert_eq!(grid.offset(1, 0, 1, 0), Some((2, 0)));
        assert_eq!(grid.neighbors(0, 0).flatten().count(), 2);
    }

    #[test]
    fn edge_cells_are_listed_once() {
        let grid = Grid::new(4, 3, Cell::Land);
        // 4*3 - 2*1 внутренних
        assert_eq!(grid.edge_indices().count(), 10);
    }

    #[test]
    fn rows_match_dimensions() {
        let grid = Grid::new(5, 2, Cell::Ocean);
        let rows = grid.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 5 && r.iter().all(|&v| v == OCEAN_LABEL)));
    }
}
