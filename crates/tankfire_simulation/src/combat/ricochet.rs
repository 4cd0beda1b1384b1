//! Рикошет: отражение скорости снаряда от нормали контакта.
//!
//! Только данные. Кто двигает снаряд и находит контакт — решает
//! projectile слой; здесь счётчик отскоков и новая скорость.

use bevy::prelude::*;

use crate::combat::{ShellFired, ShotKind};
use crate::physics::bearing_degrees;

/// Отскоков до уничтожения снаряда
pub const DEFAULT_MAX_BOUNCES: u32 = 3;

/// Зеркальное отражение `direction` относительно `normal`
///
/// Нормаль нормализуется; нулевая нормаль → направление без изменений.
pub fn reflect(direction: Vec2, normal: Vec2) -> Vec2 {
    let normal = normal.normalize_or_zero();
    direction - 2.0 * direction.dot(normal) * normal
}

/// Результат удара о препятствие
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// Отскочил: новая скорость и угол (CCW, градусы) для визуала
    Bounced { velocity: Vec2, angle: f32 },
    /// Отскоки кончились — снаряд уничтожается
    Spent,
}

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RicochetShell {
    pub velocity: Vec2,
    pub bounces: u32,
    pub max_bounces: u32,
}

impl RicochetShell {
    pub fn new(velocity: Vec2, max_bounces: u32) -> Self {
        Self {
            velocity,
            bounces: 0,
            max_bounces,
        }
    }

    /// Рикошетный снаряд из выстрела; обычный выстрел → `None`
    pub fn from_shot(shot: &ShellFired) -> Option<Self> {
        match shot.kind {
            ShotKind::Ricochet => Some(Self::new(shot.direction * shot.speed, DEFAULT_MAX_BOUNCES)),
            ShotKind::Single => None,
        }
    }

    pub fn bounces_left(&self) -> u32 {
        self.max_bounces.saturating_sub(self.bounces)
    }

    /// Удар о поверхность с нормалью `normal`; скорость по модулю сохраняется
    pub fn on_impact(&mut self, normal: Vec2) -> Impact {
        if self.bounces >= self.max_bounces {
            return Impact::Spent;
        }

        self.bounces += 1;
        self.velocity = reflect(self.velocity, normal);

        Impact::Bounced {
            velocity: self.velocity,
            angle: bearing_degrees(Vec2::ZERO, self.velocity),
        }
    }
}
