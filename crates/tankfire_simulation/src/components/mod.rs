//! ECS Components для игровых entity
//!
//! - tank: маркеры танков и ссылка на цель (EnemyTank, PlayerTank, TrackedTarget)
//! - collision: слои препятствий для LOS (LayerMask)

pub mod collision;
pub mod tank;

pub use collision::*;
pub use tank::*;
