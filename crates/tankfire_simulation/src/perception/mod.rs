//! Perception module
//!
//! Каждый render tick: видна ли цель (радиус обнаружения И чистая линия
//! видимости через статичный слой препятствий). Результат живёт один кадр.

pub mod obstacles;
pub mod visibility;

pub use obstacles::{LineOfSight, Obstacle, ObstacleShape, QueryError, RayHit, StaticObstacles};
pub use visibility::{update_perception, update_visibility, PerceptionResult};
