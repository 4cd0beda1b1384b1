//! Ошибки контроллера вражеского танка
//!
//! Taxonomy узкая:
//! - `MissingTarget` — non-fatal, танк вечно патрулирует
//! - `MissingBody` — fatal конфигурация, танк никогда не обрабатывается
//! - `InvalidConfig` / `ConfigParse` / `ConfigIo` — отказ при загрузке/спавне
//!
//! Ни одна ошибка не пересекает границу тика: системы логируют и идут дальше.

use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("enemy tank {0:?}: no target tagged PlayerTank, staying in Patrol")]
    MissingTarget(Entity),

    #[error("enemy tank {0:?}: HullBody is missing, controller disabled")]
    MissingBody(Entity),

    #[error("invalid tank AI config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse tank AI config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to read tank AI config: {0}")]
    ConfigIo(#[from] std::io::Error),
}
