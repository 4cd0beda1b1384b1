//! Танки: вражеский (AI-controlled) и игрок (цель)

use bevy::prelude::*;

use crate::ai::{BehaviorState, PatrolState, TankAIConfig};
use crate::combat::{TankWeapon, TurretMount};
use crate::perception::PerceptionResult;

/// Вражеский танк под управлением AI
///
/// Required Components добавляют всё состояние контроллера, КРОМЕ `HullBody`:
/// корпус обязан прийти от спавна. Танк без корпуса — ошибка конфигурации
/// (см. `initialize_enemy_tanks`), а не дефолтная точка в (0, 0).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    BehaviorState,
    PerceptionResult,
    PatrolState,
    TrackedTarget,
    TankAIConfig,
    TurretMount,
    TankWeapon
)]
pub struct EnemyTank;

/// Маркер цели (tag lookup для target locator)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerTank;

/// Цель, найденная один раз при инициализации танка
///
/// `None` — цели нет (не нашли или ещё не инициализирован). Танк с `None`
/// никогда не видит цель и остаётся в Patrol.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TrackedTarget(pub Option<Entity>);

impl TrackedTarget {
    pub fn entity(&self) -> Option<Entity> {
        self.0
    }
}
