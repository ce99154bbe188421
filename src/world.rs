// src/world.rs
//! Полный конвейер генерации карты стран
//!
//! Порядок шагов:
//! 1. Рельеф: фрактальный шум + маска краёв + порог
//! 2. Связность: засыпка озёр, затем удаление мелких островов
//! 3. Поле сопротивления (вторичный шум)
//! 4. Семена стран и рост территорий
//! 5. Суша без семени → океан
//! 6. Границы, соседи, слияние мелких стран до неподвижной точки
//! 7. Перенумерация стран подряд с нуля
//!
//! Результат — [`World`]: самодостаточные данные без ссылок и колбэков, которые
//! можно передать между потоками или сериализовать.

use serde::{Deserialize, Serialize};

use crate::config::WorldGenerationParams;
use crate::error::{GenerationError, Result};
use crate::grid::{Cell, Grid, RegionId};
use crate::noise::NoiseField;
use crate::resistance::ResistanceField;
use crate::rng::{WorldRng, world_rng};
use crate::terrain::generate_terrain;
use crate::territory::Region;
use crate::territory::graph::neighbors_are_symmetric;
use crate::territory::grower::{
    collect_regions, demote_orphan_land, grow_countries, pick_country_seeds,
};
use crate::territory::merge::{compact_ids, merge_small_regions};
use crate::water::{land_component_sizes, ocean_is_connected, repair_connectivity};

/// Сгенерированная карта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: u32,
    pub height: u32,
    /// Сид, если генерация была детерминированной
    pub seed: Option<u64>,
    /// Клетки: океан или id страны
    pub grid: Grid,
    /// Страны; `regions[i].id == i`
    pub regions: Vec<Region>,
}

impl World {
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id as usize).filter(|r| r.id == id)
    }

    #[must_use]
    pub fn land_cells(&self) -> usize {
        self.grid.count(Cell::is_land)
    }

    /// Проверяет инварианты готовой карты.
    ///
    /// Нарушение — ошибка в генераторе, а не в параметрах.
    pub fn verify(&self, params: &WorldGenerationParams) -> Result<()> {
        let violation = |msg: String| Err(GenerationError::InvariantViolation(msg));

        if self.grid.width != self.width || self.grid.height != self.height {
            return violation("grid dimensions differ from world dimensions".to_string());
        }

        let unassigned = self.grid.count(|c| c == Cell::Land);
        if unassigned > 0 {
            return violation(format!("{unassigned} land cells left unassigned"));
        }

        if !ocean_is_connected(&self.grid) {
            return violation("ocean is not connected to the map edge".to_string());
        }

        if let Some(size) = land_component_sizes(&self.grid)
            .into_iter()
            .find(|&s| s < params.islands.min_island_size)
        {
            return violation(format!(
                "land component of {size} cells is below min_island_size {}",
                params.islands.min_island_size
            ));
        }

        if !neighbors_are_symmetric(&self.regions) {
            return violation("neighbor graph is not symmetric".to_string());
        }

        let mut claimed = 0;
        for (i, region) in self.regions.iter().enumerate() {
            if region.id as usize != i {
                return violation(format!("region at position {i} has id {}", region.id));
            }
            if region.cells.is_empty() {
                return violation(format!("region {} has no cells", region.id));
            }
            if region.area() < params.growth.min_country_size && !region.neighbors.is_empty() {
                return violation(format!(
                    "region {} has {} cells and {} neighbors after consolidation",
                    region.id,
                    region.area(),
                    region.neighbors.len()
                ));
            }
            if let Some(&(x, y)) = region
                .cells
                .iter()
                .find(|&&(x, y)| self.grid.get(x, y) != Cell::Region(region.id))
            {
                return violation(format!(
                    "cell ({x}, {y}) of region {} is labelled differently",
                    region.id
                ));
            }
            self.verify_borders(region)?;
            claimed += region.area();
        }

        if claimed != self.land_cells() {
            return violation(format!(
                "regions cover {claimed} cells but the grid has {} land cells",
                self.land_cells()
            ));
        }
        Ok(())
    }

    fn verify_borders(&self, region: &Region) -> Result<()> {
        let own = Cell::Region(region.id);
        for &(x, y) in &region.border {
            let outside = self
                .grid
                .neighbors(x, y)
                .any(|n| n.is_none_or(|(nx, ny)| self.grid.get(nx, ny) != own));
            if !outside {
                return Err(GenerationError::InvariantViolation(format!(
                    "border cell ({x}, {y}) of region {} is interior",
                    region.id
                )));
            }
        }
        if let Some(&(x, y)) = region
            .ocean_border
            .iter()
            .find(|c| !region.border.contains(c))
        {
            return Err(GenerationError::InvariantViolation(format!(
                "ocean border cell ({x}, {y}) of region {} is not a border cell",
                region.id
            )));
        }
        Ok(())
    }
}

/// Генерирует карту целиком.
pub fn generate_world(params: &WorldGenerationParams) -> Result<World> {
    generate_world_with(params, || false)
}

/// Генерирует карту, проверяя между шагами, не устарел ли запрос.
///
/// Если `is_superseded()` вернул `true`, генерация прерывается с
/// [`GenerationError::Superseded`].
pub fn generate_world_with(
    params: &WorldGenerationParams,
    is_superseded: impl Fn() -> bool,
) -> Result<World> {
    params.validate()?;
    let checkpoint = || {
        if is_superseded() {
            Err(GenerationError::Superseded)
        } else {
            Ok(())
        }
    };

    let mut rng = world_rng(params.seed);
    let terrain_noise = NoiseField::from_rng(&mut rng);
    let resistance_noise = NoiseField::from_rng(&mut rng);

    // === 1. Рельеф ===
    let terrain = generate_terrain(&terrain_noise, &params.terrain, params.width, params.height);
    checkpoint()?;

    populate(terrain, params, &resistance_noise, &mut rng, checkpoint)
}

/// Расселяет страны по готовому рельефу (`Land`/`Ocean`), например нарисованному вручную.
///
/// Рельеф проходит тот же ремонт связности, что и сгенерированный.
/// Размеры карты берутся из `terrain`, а не из `params`.
pub fn generate_world_on_terrain(terrain: Grid, params: &WorldGenerationParams) -> Result<World> {
    params.validate()?;
    if terrain.data.iter().any(|c| c.region().is_some()) {
        return Err(GenerationError::Configuration(
            "terrain must contain only land and ocean cells".to_string(),
        ));
    }
    let mut rng = world_rng(params.seed);
    let resistance_noise = NoiseField::from_rng(&mut rng);
    populate(terrain, params, &resistance_noise, &mut rng, || Ok(()))
}

fn populate(
    mut terrain: Grid,
    params: &WorldGenerationParams,
    resistance_noise: &NoiseField,
    rng: &mut WorldRng,
    checkpoint: impl Fn() -> Result<()>,
) -> Result<World> {
    let (width, height) = (terrain.width, terrain.height);

    // === 2. Связность ===
    let repair = repair_connectivity(&mut terrain, params.islands.min_island_size);
    let land = terrain.count(Cell::is_land);
    tracing::info!(
        "Рельеф {}×{}: суша {:.1}%, засыпано озёр {} клеток, удалено островов {}",
        width,
        height,
        land as f32 * 100.0 / terrain.len() as f32,
        repair.lake_cells_filled,
        repair.islands_removed
    );
    checkpoint()?;

    // === 3-4. Сопротивление и рост ===
    let resistance = ResistanceField::generate(resistance_noise, &terrain, &params.growth);
    let seeds = pick_country_seeds(&terrain, params.country_count, rng)?;
    let (mut grid, growth) = grow_countries(&terrain, &resistance, &seeds, &params.growth, rng);
    tracing::info!(
        "Выращено {} стран: {} клеток, {} пропущенных шагов",
        seeds.len(),
        growth.claimed,
        growth.skipped
    );

    // === 5. Суша без семени ===
    demote_orphan_land(&mut grid);
    checkpoint()?;

    // === 6-7. Слияние ===
    let mut regions = collect_regions(&grid, seeds.len());
    let merges = merge_small_regions(&mut grid, &mut regions, params.growth.min_country_size);
    compact_ids(&mut grid, &mut regions);
    tracing::info!(
        "🧹 Слито {} мелких стран, осталось {}",
        merges,
        regions.len()
    );

    let world = World {
        width,
        height,
        seed: params.seed,
        grid,
        regions,
    };

    if cfg!(debug_assertions) {
        world.verify(params)?;
    }
    Ok(world)
}
