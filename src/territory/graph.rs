use crate::grid::{DIRECTIONS, RegionId};
use crate::territory::Region;
use petgraph::graphmap::UnGraphMap;
use std::collections::HashMap;

/// Граф соседства стран. Неориентированный, поэтому симметричен по построению.
pub type RegionGraph = UnGraphMap<RegionId, ()>;

/// Строит граф по граничным клеткам: внутренние клетки соседей иметь не могут.
///
/// Границы стран должны быть актуальны ([`crate::territory::borders::refresh_borders`]).
#[must_use]
pub fn build_region_graph(regions: &[Region]) -> RegionGraph {
    let mut graph = UnGraphMap::new();
    let mut border_owner: HashMap<(u32, u32), RegionId> = HashMap::new();

    for region in regions {
        graph.add_node(region.id);
        for &cell in &region.border {
            border_owner.insert(cell, region.id);
        }
    }

    for region in regions {
        for &(x, y) in &region.border {
            for &(dx, dy) in &DIRECTIONS {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if let Some(&other) = border_owner.get(&(nx, ny)) {
                    if other != region.id {
                        graph.add_edge(region.id, other, ());
                    }
                }
            }
        }
    }
    graph
}

/// Пересчитывает списки соседей всех стран и возвращает граф.
pub fn refresh_neighbors(regions: &mut [Region]) -> RegionGraph {
    let graph = build_region_graph(regions);
    for region in regions.iter_mut() {
        let mut neighbors: Vec<RegionId> = graph.neighbors(region.id).collect();
        neighbors.sort_unstable();
        region.neighbors = neighbors;
    }
    graph
}

/// Проверка симметрии списков соседей: `B ∈ A.neighbors ⇔ A ∈ B.neighbors`.
#[must_use]
pub fn neighbors_are_symmetric(regions: &[Region]) -> bool {
    let by_id: HashMap<RegionId, &Region> = regions.iter().map(|r| (r.id, r)).collect();
    regions.iter().all(|a| {
        a.neighbors.iter().all(|b| {
            by_id
                .get(b)
                .is_some_and(|b| b.neighbors.binary_search(&a.id).is_ok())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::territory::borders::refresh_borders;
    use crate::territory::grower::collect_regions;

    fn regions_of(text: &str, count: usize) -> Vec<Region> {
        let grid = Grid::parse(text);
        let mut regions = collect_regions(&grid, count);
        refresh_borders(&grid, &mut regions);
        regions
    }

    #[test]
    fn adjacency_follows_shared_edges() {
        let mut regions = regions_of(
            "
            0011.
            0011.
            22.33
            22.33
            ",
            4,
        );
        refresh_neighbors(&mut regions);
        assert_eq!(regions[0].neighbors, vec![1, 2]);
        assert_eq!(regions[1].neighbors, vec![0, 3]);
        assert_eq!(regions[2].neighbors, vec![0]);
        assert_eq!(regions[3].neighbors, vec![1]);
        assert!(neighbors_are_symmetric(&regions));
    }

    #[test]
    fn diagonal_contact_is_not_adjacency() {
        let mut regions = regions_of(
            "
            0.
            .1
            ",
            2,
        );
        refresh_neighbors(&mut regions);
        assert!(regions[0].neighbors.is_empty());
        assert!(regions[1].neighbors.is_empty());
    }

    #[test]
    fn asymmetric_lists_are_detected() {
        let mut regions = regions_of("01", 2);
        refresh_neighbors(&mut regions);
        assert!(neighbors_are_symmetric(&regions));
        regions[1].neighbors.clear();
        assert!(!neighbors_are_symmetric(&regions));
    }
}
