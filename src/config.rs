// src/config.rs
//! Конфигурация генерации мира
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией карты стран:
//! - Размеры карты и целевое количество стран
//! - Параметры шума и порог суши
//! - Маска океана у краёв карты
//! - Удаление мелких островов
//! - Параметры роста территорий и слияния мелких стран
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки через конфигурационные файлы.

use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Настройки рельефа: шум, порог суши и маска краёв
///
/// Управляет тем, какие клетки станут сушей до проверки связности.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TerrainSettings {
    /// Частота шума: координаты клетки (относительно центра карты) умножаются на это значение.
    /// Меньше → крупнее континенты.
    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Порог суши: клетка становится сушей, если значение шума после маски строго больше порога.
    /// Шум лежит в `[-1.0, 1.0]`.
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Количество октав фрактального шума (каждая октава — удвоенная частота)
    #[serde(default = "default_octaves")]
    pub octaves: u32,

    /// Множитель амплитуды между октавами:
    /// - `<0.5` → гладкие берега,
    /// - `>0.5` → изрезанные берега.
    #[serde(default = "default_persistence")]
    pub persistence: f32,

    /// Сила маски у краёв карты:
    /// - `0.0` — маска отключена,
    /// - `1.0` — клетки на самом краю гарантированно становятся океаном.
    #[serde(default = "default_border_strength")]
    pub border_strength: f32,

    /// Ширина маски как доля размера карты (например, `0.1` = 10% ширины/высоты с каждой стороны)
    #[serde(default = "default_border_width")]
    pub border_width: f32,
}

fn default_scale() -> f32 {
    0.02
}
fn default_threshold() -> f32 {
    -0.1
}
fn default_octaves() -> u32 {
    4
}
fn default_persistence() -> f32 {
    0.5
}
fn default_border_strength() -> f32 {
    1.0
}
fn default_border_width() -> f32 {
    0.1
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            threshold: default_threshold(),
            octaves: default_octaves(),
            persistence: default_persistence(),
            border_strength: default_border_strength(),
            border_width: default_border_width(),
        }
    }
}

/// Настройки островов
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IslandSettings {
    /// Минимальный размер связного участка суши в клетках.
    /// Участки меньше этого размера превращаются в океан.
    #[serde(default = "default_min_island_size")]
    pub min_island_size: usize,
}

fn default_min_island_size() -> usize {
    1000
}

impl Default for IslandSettings {
    fn default() -> Self {
        Self {
            min_island_size: default_min_island_size(),
        }
    }
}

/// Настройки роста территорий стран
///
/// Сопротивление — вторичное поле шума, которое замедляет рост стран через
/// "труднопроходимые" клетки и делает границы неровными.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GrowthSettings {
    /// Минимальная стоимость клетки суши
    #[serde(default = "default_min_resistance")]
    pub min_resistance: f32,

    /// Максимальная стоимость клетки суши
    #[serde(default = "default_max_resistance")]
    pub max_resistance: f32,

    /// Частота шума сопротивления (координаты клетки умножаются на это значение)
    #[serde(default = "default_resistance_scale")]
    pub resistance_scale: f32,

    /// Вероятность пропустить шаг роста в клетку с сопротивлением выше середины диапазона.
    /// Чем ближе к `1.0`, тем сильнее "горы" отталкивают рост. Значение `1.0` не допускается.
    #[serde(default = "default_skip_probability")]
    pub skip_probability: f64,

    /// Вероятность выбрать случайного соседа вместо первого найденного
    #[serde(default = "default_expand_random_probability")]
    pub expand_random_probability: f64,

    /// Минимальный размер страны в клетках: страны меньше сливаются с соседями
    #[serde(default = "default_min_country_size")]
    pub min_country_size: usize,
}

fn default_min_resistance() -> f32 {
    1.0
}
fn default_max_resistance() -> f32 {
    10.0
}
fn default_resistance_scale() -> f32 {
    0.05
}
fn default_skip_probability() -> f64 {
    0.95
}
fn default_expand_random_probability() -> f64 {
    0.3
}
fn default_min_country_size() -> usize {
    50
}

impl Default for GrowthSettings {
    fn default() -> Self {
        Self {
            min_resistance: default_min_resistance(),
            max_resistance: default_max_resistance(),
            resistance_scale: default_resistance_scale(),
            skip_probability: default_skip_probability(),
            expand_random_probability: default_expand_random_probability(),
            min_country_size: default_min_country_size(),
        }
    }
}

/// Основные параметры генерации мира
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldGenerationParams {
    /// Сид генератора случайных чисел. `None` — недетерминированная генерация.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Ширина карты в клетках (по умолчанию 200)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота карты в клетках (по умолчанию 120)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Целевое количество стран (после слияния может стать меньше)
    #[serde(default = "default_country_count")]
    pub country_count: usize,

    /// Настройки рельефа
    #[serde(default)]
    pub terrain: TerrainSettings,

    /// Настройки островов
    #[serde(default)]
    pub islands: IslandSettings,

    /// Настройки роста стран
    #[serde(default)]
    pub growth: GrowthSettings,
}

impl WorldGenerationParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Ошибки
    /// Возвращает ошибку, если файл не найден, содержит недопустимый формат
    /// или не проходит [`WorldGenerationParams::validate`].
    ///
    /// # Пример
    /// ```toml
    /// # world.toml
    /// seed = 42
    /// width = 160
    /// height = 100
    /// country_count = 12
    ///
    /// [growth]
    /// skip_probability = 0.98
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Проверяет параметры до начала генерации.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(GenerationError::Configuration(msg));

        if self.width == 0 || self.height == 0 {
            return fail(format!(
                "map dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.country_count == 0 {
            return fail("country_count must be positive".to_string());
        }

        let t = &self.terrain;
        if !(t.scale > 0.0) {
            return fail(format!("terrain.scale must be positive, got {}", t.scale));
        }
        if t.octaves == 0 {
            return fail("terrain.octaves must be at least 1".to_string());
        }
        if !(t.persistence > 0.0) {
            return fail(format!(
                "terrain.persistence must be positive, got {}",
                t.persistence
            ));
        }
        if !t.threshold.is_finite() {
            return fail(format!("terrain.threshold must be finite, got {}", t.threshold));
        }
        if !(t.border_width >= 0.0 && t.border_strength >= 0.0) {
            return fail(format!(
                "terrain.border_width ({}) and border_strength ({}) must be non-negative",
                t.border_width, t.border_strength
            ));
        }

        let g = &self.growth;
        if !(g.min_resistance <= g.max_resistance) {
            return fail(format!(
                "growth.min_resistance ({}) exceeds max_resistance ({})",
                g.min_resistance, g.max_resistance
            ));
        }
        if !(g.resistance_scale > 0.0) {
            return fail(format!(
                "growth.resistance_scale must be positive, got {}",
                g.resistance_scale
            ));
        }
        // При 1.0 рост мог бы навсегда упереться в "дорогую" клетку
        if !(0.0..1.0).contains(&g.skip_probability) {
            return fail(format!(
                "growth.skip_probability must lie in [0, 1), got {}",
                g.skip_probability
            ));
        }
        if !(0.0..=1.0).contains(&g.expand_random_probability) {
            return fail(format!(
                "growth.expand_random_probability must lie in [0, 1], got {}",
                g.expand_random_probability
            ));
        }
        Ok(())
    }
}

fn default_width() -> u32 {
    200
}
fn default_height() -> u32 {
    120
}
fn default_country_count() -> usize {
    12
}

impl Default for WorldGenerationParams {
    fn default() -> Self {
        Self {
            seed: None,
            width: default_width(),
            height: default_height(),
            country_count: default_country_count(),
            terrain: TerrainSettings::default(),
            islands: IslandSettings::default(),
            growth: GrowthSettings::default(),
        }
    }
}
