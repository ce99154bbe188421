pub mod borders;
pub mod graph;
pub mod grower;
pub mod merge;

use serde::{Deserialize, Serialize};

use crate::grid::RegionId;

/// Страна — связное множество клеток суши с одним идентификатором.
///
/// `border`, `ocean_border` и `neighbors` — производные данные: они пересчитываются
/// целиком после любого изменения сетки (см. [`borders::refresh_borders`],
/// [`graph::refresh_neighbors`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub cells: Vec<(u32, u32)>,
    pub border: Vec<(u32, u32)>,
    pub ocean_border: Vec<(u32, u32)>,
    /// Соседи по возрастанию id
    pub neighbors: Vec<RegionId>,
    pub center: (f32, f32),
}

impl Region {
    #[must_use]
    pub fn new(id: RegionId, cells: Vec<(u32, u32)>) -> Self {
        let mut region = Self {
            id,
            cells,
            border: Vec::new(),
            ocean_border: Vec::new(),
            neighbors: Vec::new(),
            center: (0.0, 0.0),
        };
        region.update_center();
        region
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Есть ли у страны выход к океану (или к краю карты).
    #[must_use]
    pub fn is_coastal(&self) -> bool {
        !self.ocean_border.is_empty()
    }

    pub(crate) fn update_center(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let area = self.cells.len() as f32;
        let sum_x: f32 = self.cells.iter().map(|c| c.0 as f32).sum();
        let sum_y: f32 = self.cells.iter().map(|c| c.1 as f32).sum();
        self.center = (sum_x / area, sum_y / area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_cell_centroid() {
        let region = Region::new(0, vec![(0, 0), (2, 0), (2, 2), (0, 2)]);
        assert_eq!(region.center, (1.0, 1.0));
        assert_eq!(region.area(), 4);
        assert!(!region.is_coastal());
    }
}
