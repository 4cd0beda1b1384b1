//! Combat module (turret + weapon)
//!
//! - Turret: наведение башни на render tick, корпус не трогает
//! - Weapon: FireCommand (AI) → rate limit → ShellFired
//! - Ricochet: отражение скорости снаряда, данные для projectile слоя

use bevy::app::{RunFixedMainLoop, RunFixedMainLoopSystem};
use bevy::prelude::*;

pub mod ricochet;
pub mod turret;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

// Re-export основных типов
pub use ricochet::{reflect, Impact, RicochetShell, DEFAULT_MAX_BOUNCES};
pub use turret::{aim_turrets, local_target_angle, TurretMount};
pub use weapon::{fire_shell, FireCommand, ShellFired, ShotKind, TankWeapon};

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. aim_turrets — render tick, после AI decision (SimulationSet::Aim)
/// 2. update_weapon_cooldowns → process_fire_commands — FixedUpdate,
///    после AI dispatch (SimulationSet::Weapons)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<FireCommand>().add_event::<ShellFired>();

        app.add_systems(
            RunFixedMainLoop,
            aim_turrets
                .in_set(SimulationSet::Aim)
                .in_set(RunFixedMainLoopSystem::BeforeFixedMainLoop),
        );

        app.add_systems(
            FixedUpdate,
            (weapon::update_weapon_cooldowns, weapon::process_fire_commands)
                .chain()
                .in_set(SimulationSet::Weapons),
        );
    }
}
