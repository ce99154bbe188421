use crate::grid::{Cell, Grid};
use std::collections::VecDeque;

/// Итог исправления связности
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairStats {
    /// Клетки озёр, ставшие сушей
    pub lake_cells_filled: usize,
    /// Количество удалённых островов
    pub islands_removed: usize,
    /// Клетки удалённых островов, ставшие океаном
    pub island_cells_removed: usize,
}

/// Засыпает озёра: океаном остаётся только вода, достижимая от края карты.
///
/// Возвращает количество засыпанных клеток.
#[allow(clippy::needless_range_loop)]
pub fn fill_lakes(grid: &mut Grid) -> usize {
    let total = grid.len();
    let mut visited = vec![false; total];
    let mut queue = VecDeque::new();

    // Все прибрежные клетки океана — источники BFS
    for idx in grid.edge_indices() {
        if grid.data[idx].is_ocean() {
            visited[idx] = true;
            queue.push_back(idx);
        }
    }

    while let Some(idx) = queue.pop_front() {
        let (x, y) = grid.coords(idx);
        for (nx, ny) in grid.neighbors(x, y).flatten() {
            let nidx = grid.index(nx, ny);
            if !visited[nidx] && grid.data[nidx].is_ocean() {
                visited[nidx] = true;
                queue.push_back(nidx);
            }
        }
    }

    // Всё остальное — озёра
    let mut filled = 0;
    for i in 0..total {
        if grid.data[i].is_ocean() && !visited[i] {
            grid.data[i] = Cell::Land;
            filled += 1;
        }
    }
    filled
}

/// Собирает связный (4-связность) участок суши, начиная с `start`.
///
/// Посещённые клетки отмечаются в `visited`.
pub(crate) fn collect_land_component(
    grid: &Grid,
    start: usize,
    visited: &mut [bool],
) -> Vec<usize> {
    let mut component = Vec::new();
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);

    while let Some(idx) = queue.pop_front() {
        component.push(idx);
        let (x, y) = grid.coords(idx);
        for (nx, ny) in grid.neighbors(x, y).flatten() {
            let nidx = grid.index(nx, ny);
            if !visited[nidx] && grid.data[nidx].is_land() {
                visited[nidx] = true;
                queue.push_back(nidx);
            }
        }
    }
    component
}

/// Топит участки суши меньше `min_island_size` клеток.
///
/// Возвращает `(количество островов, количество клеток)`.
pub fn remove_small_islands(grid: &mut Grid, min_island_size: usize) -> (usize, usize) {
    let mut visited = vec![false; grid.len()];
    let mut islands = 0;
    let mut cells = 0;

    for idx in 0..grid.len() {
        if visited[idx] || grid.data[idx].is_ocean() {
            continue;
        }
        let component = collect_land_component(grid, idx, &mut visited);
        if component.len() < min_island_size {
            islands += 1;
            cells += component.len();
            for i in component {
                grid.data[i] = Cell::Ocean;
            }
        }
    }
    (islands, cells)
}

/// Озёра засыпаются до удаления островов: иначе озеро делило бы остров на части
/// или, наоборот, считалось бы его продолжением.
pub fn repair_connectivity(grid: &mut Grid, min_island_size: usize) -> RepairStats {
    let lake_cells_filled = fill_lakes(grid);
    let (islands_removed, island_cells_removed) = remove_small_islands(grid, min_island_size);

    tracing::debug!(
        "Связность: засыпано {} клеток озёр, удалено {} островов ({} клеток)",
        lake_cells_filled,
        islands_removed,
        island_cells_removed
    );

    RepairStats {
        lake_cells_filled,
        islands_removed,
        island_cells_removed,
    }
}

/// Все ли клетки океана достижимы от края карты.
#[must_use]
pub fn ocean_is_connected(grid: &Grid) -> bool {
    let mut probe = grid.clone();
    fill_lakes(&mut probe) == 0
}

/// Размеры всех связных участков суши.
#[must_use]
pub fn land_component_sizes(grid: &Grid) -> Vec<usize> {
    let mut visited = vec![false; grid.len()];
    let mut sizes = Vec::new();
    for idx in 0..grid.len() {
        if !visited[idx] && grid.data[idx].is_land() {
            sizes.push(collect_land_component(grid, idx, &mut visited).len());
        }
    }
    sizes
}
