use crate::config::GrowthSettings;
use crate::grid::Grid;
use crate::noise::NoiseField;
use crate::terrain::map_cells;

/// Стоимость прохода через клетку при росте стран.
///
/// Живёт только во время роста и не сохраняется в странах.
#[derive(Debug, Clone)]
pub struct ResistanceField {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
    min_resistance: f32,
    max_resistance: f32,
}

impl ResistanceField {
    /// Для суши: `min + (max - min) * |шум(x·scale, y·scale)|`, для океана — `+inf`.
    #[must_use]
    pub fn generate(noise: &NoiseField, terrain: &Grid, settings: &GrowthSettings) -> Self {
        let min = settings.min_resistance;
        let span = settings.max_resistance - settings.min_resistance;
        let scale = settings.resistance_scale;

        let data = map_cells(terrain.width, terrain.height, |x, y| {
            if terrain.get(x, y).is_ocean() {
                f32::INFINITY
            } else {
                min + span * noise.sample(x as f32 * scale, y as f32 * scale).abs()
            }
        });

        Self {
            width: terrain.width,
            height: terrain.height,
            data,
            min_resistance: settings.min_resistance,
            max_resistance: settings.max_resistance,
        }
    }

    /// Одинаковая стоимость всей суши в диапазоне `[min, max]`.
    #[cfg(test)]
    pub(crate) fn uniform(terrain: &Grid, cost: f32, min: f32, max: f32) -> Self {
        Self {
            width: terrain.width,
            height: terrain.height,
            data: terrain
                .data
                .iter()
                .map(|c| if c.is_ocean() { f32::INFINITY } else { cost })
                .collect(),
            min_resistance: min,
            max_resistance: max,
        }
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Середина диапазона: клетки дороже неё отталкивают рост.
    #[must_use]
    pub fn midpoint(&self) -> f32 {
        (self.min_resistance + self.max_resistance) / 2.0
    }

    #[must_use]
    pub fn is_rough(&self, x: u32, y: u32) -> bool {
        self.get(x, y) > self.midpoint()
    }
}
