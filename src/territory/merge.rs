// src/territory/merge.rs
use crate::grid::{Cell, Grid, RegionId};
use crate::territory::Region;
use crate::territory::borders::refresh_borders;
use crate::territory::graph::refresh_neighbors;

/// Полный пересчёт производных данных: границ и соседей.
pub fn refresh_derived(grid: &Grid, regions: &mut [Region]) {
    refresh_borders(grid, regions);
    refresh_neighbors(regions);
}

/// Сливает страны меньше `min_size` клеток с их самым маленьким соседом.
///
/// Проходы повторяются, пока очередной проход не выполнит ни одного слияния.
/// После каждого слияния границы и соседи всех стран пересчитываются заново.
/// Страны без соседей не трогаются.
///
/// Возвращает общее количество слияний.
pub fn merge_small_regions(grid: &mut Grid, regions: &mut Vec<Region>, min_size: usize) -> usize {
    refresh_derived(grid, regions);
    let mut merged_count = 0;

    loop {
        let mut merged_this_pass = 0;
        let mut i = 0;

        while i < regions.len() {
            if regions[i].area() >= min_size || regions[i].neighbors.is_empty() {
                i += 1;
                continue;
            }

            let Some(target_idx) = smallest_neighbor(regions, i) else {
                i += 1;
                continue;
            };

            absorb(grid, regions, target_idx, i);
            // Удаляем мелкую страну; на место `i` встаёт следующая, индекс не сдвигаем
            regions.remove(i);
            refresh_derived(grid, regions);
            merged_this_pass += 1;
        }

        tracing::debug!("Проход слияния: {} слияний", merged_this_pass);
        merged_count += merged_this_pass;
        if merged_this_pass == 0 {
            break;
        }
    }

    merged_count
}

/// Индекс соседа с наименьшей площадью; при равенстве — с меньшим id.
fn smallest_neighbor(regions: &[Region], idx: usize) -> Option<usize> {
    regions[idx]
        .neighbors
        .iter()
        .filter_map(|&nid| regions.iter().position(|r| r.id == nid))
        .min_by_key(|&j| (regions[j].area(), regions[j].id))
}

fn absorb(grid: &mut Grid, regions: &mut [Region], target_idx: usize, small_idx: usize) {
    let target_id = regions[target_idx].id;
    let small_cells = std::mem::take(&mut regions[small_idx].cells);

    for &(x, y) in &small_cells {
        grid.set(x, y, Cell::Region(target_id));
    }

    let target = &mut regions[target_idx];
    target.cells.extend(small_cells);
    target.update_center();
}

/// Перенумеровывает страны подряд с нуля (`regions[i].id == i`) и обновляет сетку.
pub fn compact_ids(grid: &mut Grid, regions: &mut [Region]) {
    let mut remap: Vec<Option<RegionId>> = Vec::new();
    for (new_id, region) in regions.iter_mut().enumerate() {
        let old = region.id as usize;
        if remap.len() <= old {
            remap.resize(old + 1, None);
        }
        remap[old] = Some(new_id as RegionId);
        region.id = new_id as RegionId;
    }

    for cell in &mut grid.data {
        if let Cell::Region(old) = *cell {
            if let Some(Some(new_id)) = remap.get(old as usize) {
                *cell = Cell::Region(*new_id);
            }
        }
    }

    for region in regions.iter_mut() {
        for id in &mut region.neighbors {
            if let Some(Some(new_id)) = remap.get(*id as usize) {
                *id = *new_id;
            }
        }
        region.neighbors.sort_unstable();
    }
}
