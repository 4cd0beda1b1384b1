//! Weapon system - fire trigger → снаряд
//!
//! Architecture:
//! - AI (actions.rs): решает КОГДА стрелять → `FireCommand` (без cooldown)
//! - Weapon (здесь): rate limit + направление по башне → `ShellFired`
//! - Снаряды (spawn, физика, попадания) — за пределами симуляции контроллера

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::TurretMount;
use crate::physics::{unit_vector, HullBody};

/// Тип выстрела
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum ShotKind {
    /// Обычный снаряд
    #[default]
    Single,
    /// Отскакивает от препятствий (см. ricochet.rs)
    Ricochet,
}

/// Пушка танка
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TankWeapon {
    /// Секунды между выстрелами
    pub fire_rate: f32,

    /// Текущий cooldown timer (уменьшается до 0)
    pub cooldown_timer: f32,

    /// Скорость снаряда (м/с)
    pub shell_speed: f32,

    /// Время жизни снаряда (секунды)
    pub shell_lifetime: f32,

    /// Вынос дула от центра корпуса вдоль ствола (fire point на конце ствола).
    /// Default 0.8 — под стандартный спрайт танка; другой ствол → `with_muzzle_offset`
    pub muzzle_offset: f32,

    pub shot_kind: ShotKind,
}

impl Default for TankWeapon {
    fn default() -> Self {
        Self {
            fire_rate: 0.5,
            cooldown_timer: 0.0,
            shell_speed: 20.0,
            shell_lifetime: 3.0,
            muzzle_offset: 0.8,
            shot_kind: ShotKind::Single,
        }
    }
}

impl TankWeapon {
    /// Рикошетная пушка (остальное — defaults)
    pub fn ricochet() -> Self {
        Self {
            shot_kind: ShotKind::Ricochet,
            ..Default::default()
        }
    }

    /// Fire point на другой длине ствола
    pub fn with_muzzle_offset(mut self, offset: f32) -> Self {
        self.muzzle_offset = offset.max(0.0);
        self
    }

    /// Может ли пушка стрелять (cooldown == 0)
    pub fn can_fire(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    /// Начать cooldown после выстрела
    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.fire_rate;
    }

    pub fn tick_cooldown(&mut self, delta: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        }
    }
}

/// Event: AI дёргает fire trigger (не больше одного на танк за physics tick)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FireCommand {
    pub shooter: Entity,
}

/// Event: снаряд выпущен (после rate limit)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ShellFired {
    /// Кто стреляет
    pub shooter: Entity,

    /// Точка вылета (дуло)
    pub origin: Vec2,

    /// Единичный вектор вдоль ствола (world)
    pub direction: Vec2,

    pub speed: f32,

    pub lifetime: f32,

    pub kind: ShotKind,
}

/// Выстрел вдоль world угла башни; `None` если пушка на cooldown
pub fn fire_shell(
    shooter: Entity,
    hull: &HullBody,
    turret: &TurretMount,
    weapon: &mut TankWeapon,
) -> Option<ShellFired> {
    if !weapon.can_fire() {
        return None;
    }

    let direction = unit_vector(turret.world_angle(hull));
    weapon.start_cooldown();

    Some(ShellFired {
        shooter,
        origin: hull.position + direction * weapon.muzzle_offset,
        direction,
        speed: weapon.shell_speed,
        lifetime: weapon.shell_lifetime,
        kind: weapon.shot_kind,
    })
}

/// System: обновление weapon cooldowns (physics tick)
pub fn update_weapon_cooldowns(mut weapons: Query<&mut TankWeapon>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut weapon in weapons.iter_mut() {
        weapon.tick_cooldown(delta);
    }
}

/// System: FireCommand → ShellFired
pub fn process_fire_commands(
    mut commands: EventReader<FireCommand>,
    mut shooters: Query<(&HullBody, &TurretMount, &mut TankWeapon)>,
    mut fired: EventWriter<ShellFired>,
) {
    for command in commands.read() {
        let Ok((hull, turret, mut weapon)) = shooters.get_mut(command.shooter) else {
            crate::log_warning(&format!(
                "FireCommand from {:?} without weapon, ignored",
                command.shooter
            ));
            continue;
        };

        if let Some(shell) = fire_shell(command.shooter, hull, turret, &mut weapon) {
            crate::log(&format!(
                "🔫 {:?} fired {:?} shell from {:?} dir {:?}",
                shell.shooter, shell.kind, shell.origin, shell.direction
            ));
            fired.write(shell);
        }
    }
}
