use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};

use crate::rng::{WorldRng, noise_seed};

/// Двумерный когерентный шум со значениями в `[-1.0, 1.0]`.
///
/// Базовый шум: OpenSimplex2 с единичной частотой. Масштаб задаёт вызывающий код,
/// умножая координаты. Фрактальное суммирование делаем сами, чтобы нормировать
/// результат на накопленную амплитуду.
pub struct NoiseField {
    noise: FastNoiseLite,
}

impl NoiseField {
    #[must_use]
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::new();
        noise.set_seed(Some(seed));
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_fractal_type(Some(FractalType::None));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    /// Новый шум с сидом из генератора мира.
    pub fn from_rng(rng: &mut WorldRng) -> Self {
        Self::new(noise_seed(rng))
    }

    #[must_use]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        self.noise.get_noise_2d(x, y).clamp(-1.0, 1.0)
    }

    /// fBm: `octaves` слоёв с удвоением частоты и умножением амплитуды на `persistence`.
    #[must_use]
    pub fn fractal(&self, x: f32, y: f32, octaves: u32, persistence: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves.max(1) {
            total += amplitude * self.sample(x * frequency, y * frequency);
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }

        (total / max_value).clamp(-1.0, 1.0)
    }
}
