// src/territory/grower.rs
use crate::config::GrowthSettings;
use crate::error::{GenerationError, Result};
use crate::grid::{Cell, Grid, RegionId};
use crate::resistance::ResistanceField;
use crate::rng::WorldRng;
use crate::territory::Region;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountrySeed {
    pub x: u32,
    pub y: u32,
    pub region: RegionId,
}

/// Выбирает `count` различных клеток суши равновероятно. Стране `i` достаётся `i`-е семя.
///
/// Если суши меньше, чем стран, возвращает ошибку конфигурации: ни дублировать,
/// ни недосевать семена нельзя.
pub fn pick_country_seeds(
    terrain: &Grid,
    count: usize,
    rng: &mut WorldRng,
) -> Result<Vec<CountrySeed>> {
    let land: Vec<usize> = (0..terrain.len())
        .filter(|&i| terrain.data[i] == Cell::Land)
        .collect();

    if count == 0 {
        return Err(GenerationError::Configuration(
            "country_count must be positive".to_string(),
        ));
    }
    if count > land.len() {
        return Err(GenerationError::NotEnoughLand {
            requested: count,
            available: land.len(),
        });
    }

    let picks = rand::seq::index::sample(rng, land.len(), count);
    Ok(picks
        .iter()
        .enumerate()
        .map(|(rid, i)| {
            let (x, y) = terrain.coords(land[i]);
            CountrySeed {
                x,
                y,
                region: rid as RegionId,
            }
        })
        .collect())
}

/// Статистика роста
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthStats {
    pub claimed: usize,
    pub skipped: usize,
    pub dead_ends: usize,
}

/// Рост стран от семян по общему фронту.
///
/// На каждом шаге берётся случайная запись фронта (не FIFO), поэтому все страны
/// растут одновременно и получаются неправильной формы. Запись удаляется только
/// когда у клетки не осталось свободных соседей, так что вся суша, связанная с
/// каким-либо семенем, в итоге распределяется.
///
/// Вероятности в `settings` должны пройти [`WorldGenerationParams::validate`]:
/// при `skip_probability == 1` рост не завершается.
///
/// [`WorldGenerationParams::validate`]: crate::config::WorldGenerationParams::validate
pub fn grow_countries(
    terrain: &Grid,
    resistance: &ResistanceField,
    seeds: &[CountrySeed],
    settings: &GrowthSettings,
    rng: &mut WorldRng,
) -> (Grid, GrowthStats) {
    debug_assert!(
        (0.0..1.0).contains(&settings.skip_probability),
        "skip_probability must lie in [0, 1)"
    );
    debug_assert!(
        (0.0..=1.0).contains(&settings.expand_random_probability),
        "expand_random_probability must lie in [0, 1]"
    );

    let mut regions = terrain.clone();
    let mut frontier: Vec<(u32, u32, RegionId)> = Vec::with_capacity(terrain.len() / 4);
    let mut stats = GrowthStats::default();

    // ШАГ 1: Семена
    for seed in seeds {
        regions.set(seed.x, seed.y, Cell::Region(seed.region));
        frontier.push((seed.x, seed.y, seed.region));
        stats.claimed += 1;
    }

    // ШАГ 2: Рост
    let mut candidates: Vec<(u32, u32)> = Vec::with_capacity(4);
    while !frontier.is_empty() {
        let i = rng.gen_range(0..frontier.len());
        let (x, y, rid) = frontier[i];

        candidates.clear();
        for (nx, ny) in regions.neighbors(x, y).flatten() {
            if regions.get(nx, ny) == Cell::Land && terrain.get(nx, ny) == Cell::Land {
                candidates.push((nx, ny));
            }
        }

        if candidates.is_empty() {
            frontier.swap_remove(i);
            stats.dead_ends += 1;
            continue;
        }

        // Обычно первый сосед по порядку обхода: смещение по осям + случайный фронт
        // дают рваные, невыпуклые границы
        let (cx, cy) = if rng.gen_bool(settings.expand_random_probability) {
            candidates[rng.gen_range(0..candidates.len())]
        } else {
            candidates[0]
        };

        // "Горы" отталкивают рост; запись фронта остаётся на месте
        if resistance.is_rough(cx, cy) && rng.gen_bool(settings.skip_probability) {
            stats.skipped += 1;
            continue;
        }

        regions.set(cx, cy, Cell::Region(rid));
        frontier.push((cx, cy, rid));
        stats.claimed += 1;
    }

    tracing::debug!(
        "Рост: занято {} клеток, пропущено {} шагов, {} тупиков",
        stats.claimed,
        stats.skipped,
        stats.dead_ends
    );
    (regions, stats)
}

/// Топит сушу, не доставшуюся ни одной стране.
///
/// После роста такая суша — только участки, на которые не попало ни одно семя.
/// Они окружены океаном, поэтому связность океана не нарушается.
pub fn demote_orphan_land(regions: &mut Grid) -> usize {
    let mut demoted = 0;
    for cell in &mut regions.data {
        if *cell == Cell::Land {
            *cell = Cell::Ocean;
            demoted += 1;
        }
    }
    if demoted > 0 {
        tracing::warn!(
            "{} клеток суши без семени превращены в океан",
            demoted
        );
    }
    demoted
}

/// Собирает клетки стран по сетке. Индекс в результате совпадает с id страны.
#[must_use]
pub fn collect_regions(regions: &Grid, count: usize) -> Vec<Region> {
    let mut cells: Vec<Vec<(u32, u32)>> = vec![Vec::new(); count];
    for (idx, cell) in regions.data.iter().enumerate() {
        if let Cell::Region(rid) = *cell {
            if let Some(list) = cells.get_mut(rid as usize) {
                list.push(regions.coords(idx));
            }
        }
    }
    cells
        .into_iter()
        .enumerate()
        .map(|(rid, cells)| Region::new(rid as RegionId, cells))
        .collect()
}
