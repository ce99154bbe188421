use crate::grid::{Cell, Grid};
use crate::territory::Region;

/// Граничные клетки страны.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionBorders {
    /// Клетки, у которых хотя бы один сосед — другая страна, океан или край карты
    pub border: Vec<(u32, u32)>,
    /// Подмножество `border`: сосед — океан или край карты
    pub ocean_border: Vec<(u32, u32)>,
}

/// Находит границы одной страны. Линейно по площади страны.
#[must_use]
pub fn extract_borders(grid: &Grid, region: &Region) -> RegionBorders {
    let own = Cell::Region(region.id);
    let mut borders = RegionBorders::default();

    for &(x, y) in &region.cells {
        let mut is_border = false;
        let mut touches_ocean = false;

        for neighbor in grid.neighbors(x, y) {
            match neighbor.map(|(nx, ny)| grid.get(nx, ny)) {
                // За краем карты считаем океаном
                None | Some(Cell::Ocean) => {
                    is_border = true;
                    touches_ocean = true;
                }
                Some(cell) if cell != own => is_border = true,
                Some(_) => {}
            }
        }

        if is_border {
            borders.border.push((x, y));
        }
        if touches_ocean {
            borders.ocean_border.push((x, y));
        }
    }
    borders
}

/// Пересчитывает границы всех стран по текущей сетке.
pub fn refresh_borders(grid: &Grid, regions: &mut [Region]) {
    for region in regions.iter_mut() {
        let RegionBorders {
            border,
            ocean_border,
        } = extract_borders(grid, region);
        region.border = border;
        region.ocean_border = ocean_border;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::territory::grower::collect_regions;

    #[test]
    fn interior_cells_are_not_border() {
        let grid = Grid::parse(
            "
            .....
            .000.
            .000.
            .000.
            .....
            ",
        );
        let mut regions = collect_regions(&grid, 1);
        refresh_borders(&grid, &mut regions);
        assert_eq!(regions[0].border.len(), 8);
        assert!(!regions[0].border.contains(&(2, 2)));
        assert_eq!(regions[0].ocean_border, regions[0].border);
    }

    #[test]
    fn shared_edge_is_border_but_not_ocean_border() {
        let grid = Grid::parse(
            "
            0011
            0011
            ",
        );
        let mut regions = collect_regions(&grid, 2);
        refresh_borders(&grid, &mut regions);

        // Все клетки на краю карты → все граничные и "океанские"
        assert_eq!(regions[0].border.len(), 4);
        assert_eq!(regions[0].ocean_border.len(), 4);

        let grid = Grid::parse(
            "
            ......
            .0011.
            .0011.
            .0011.
            ......
            ",
        );
        let mut regions = collect_regions(&grid, 2);
        refresh_borders(&grid, &mut regions);
        // (2,2) граничит только со страной 1
        assert!(regions[0].border.contains(&(2, 2)));
        assert!(!regions[0].ocean_border.contains(&(2, 2)));
        assert!(regions[0].is_coastal());
    }

    #[test]
    fn ocean_border_is_subset_of_border() {
        let grid = Grid::parse(
            "
            0001..
            0011.2
            3311.2
            3333.2
            ",
        );
        let mut regions = collect_regions(&grid, 4);
        refresh_borders(&grid, &mut regions);
        for region in &regions {
            assert!(region.ocean_border.iter().all(|c| region.border.contains(c)));
        }
    }
}
