use crate::config::TerrainSettings;
use crate::grid::{Cell, Grid};
use crate::noise::NoiseField;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Вычисляет значение для каждой клетки сетки `width × height`.
///
/// С фичей `parallel` считается через rayon; порядок результата от этого не зависит.
pub(crate) fn map_cells<T, F>(width: u32, height: u32, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(u32, u32) -> T + Sync + Send,
{
    let total = (width as usize) * (height as usize);
    let w = width as usize;

    #[cfg(feature = "parallel")]
    let cells = (0..total)
        .into_par_iter()
        .map(|i| f((i % w) as u32, (i / w) as u32))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let cells = (0..total)
        .map(|i| f((i % w) as u32, (i / w) as u32))
        .collect();

    cells
}

/// Нормированное расстояние до ближайшего края: `0.0` на краю, `0.5` в центре.
fn edge_distance(x: u32, y: u32, width: u32, height: u32) -> f32 {
    let dx = (x.min(width - 1 - x) as f32) / width as f32;
    let dy = (y.min(height - 1 - y) as f32) / height as f32;
    dx.min(dy)
}

/// Значение шума после маски краёв.
///
/// Внутри полосы шириной `border_width` значение смешивается с `-1.0` ("глубокий океан")
/// с весом `(1 - d / border_width) * border_strength`.
#[must_use]
pub fn masked_value(
    noise: &NoiseField,
    settings: &TerrainSettings,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> f32 {
    // Шум центрируем по середине карты
    let nx = (x as f32 - width as f32 / 2.0) * settings.scale;
    let ny = (y as f32 - height as f32 / 2.0) * settings.scale;
    let value = noise.fractal(nx, ny, settings.octaves, settings.persistence);

    let d = edge_distance(x, y, width, height);
    if settings.border_width > 0.0 && d < settings.border_width {
        let t = ((1.0 - d / settings.border_width) * settings.border_strength).clamp(0.0, 1.0);
        value + (-1.0 - value) * t
    } else {
        value
    }
}

/// Строит сырую карту суши и океана. Озёра и мелкие острова здесь ещё возможны.
#[must_use]
pub fn generate_terrain(
    noise: &NoiseField,
    settings: &TerrainSettings,
    width: u32,
    height: u32,
) -> Grid {
    let data = map_cells(width, height, |x, y| {
        if masked_value(noise, settings, x, y, width, height) > settings.threshold {
            Cell::Land
        } else {
            Cell::Ocean
        }
    });

    let grid = Grid {
        width,
        height,
        data,
    };

    tracing::debug!(
        "Сырой рельеф {}×{}: {} клеток суши",
        width,
        height,
        grid.count(Cell::is_land)
    );
    grid
}
