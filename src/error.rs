use thiserror::Error;

/// Ошибки генерации мира.
///
/// Генерация — чистое пакетное вычисление: любая ошибка прерывает её целиком,
/// частичных результатов нет.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Requested {requested} countries but the map has only {available} land cells")]
    NotEnoughLand { requested: usize, available: usize },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Generation superseded by a newer request")]
    Superseded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerationError {
    /// `true` для ошибок, которые исправляются изменением параметров.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GenerationError::Configuration(_) | GenerationError::NotEnoughLand { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GenerationError>;
