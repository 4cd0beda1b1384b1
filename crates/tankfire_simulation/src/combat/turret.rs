//! Turret aim controller
//!
//! Башня целится независимо от корпуса. Каждый render tick локальный
//! target угол пересчитывается с нуля (bearing - facing корпуса), поэтому
//! поворот корпуса под башней не накапливает дрейф.

use bevy::prelude::*;

use crate::ai::TankAIConfig;
use crate::components::{EnemyTank, PlayerTank, TrackedTarget};
use crate::physics::{bearing_degrees, move_towards_angle, normalize_angle, HullBody};

/// Башня: угол локален относительно forward оси корпуса (CCW, градусы)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TurretMount {
    pub local_angle: f32,
}

impl TurretMount {
    /// World угол ствола (CCW от +X)
    pub fn world_angle(&self, hull: &HullBody) -> f32 {
        normalize_angle(hull.facing() + self.local_angle)
    }

    /// Шаг к цели не больше `max_delta` градусов; корпус не трогаем
    pub fn aim(&mut self, hull: &HullBody, target: Vec2, max_delta: f32) {
        let local_target = local_target_angle(hull, target);
        self.local_angle = move_towards_angle(self.local_angle, local_target, max_delta);
    }
}

/// Угол на цель в локальной системе корпуса, (-180, 180]
pub fn local_target_angle(hull: &HullBody, target: Vec2) -> f32 {
    normalize_angle(bearing_degrees(hull.position, target) - hull.facing())
}

/// Система: наведение башен (render tick, независимо от physics tick)
///
/// Цели нет → башня стоит.
pub fn aim_turrets(
    mut tanks: Query<(&HullBody, &TankAIConfig, &TrackedTarget, &mut TurretMount), With<EnemyTank>>,
    targets: Query<&HullBody, (With<PlayerTank>, Without<EnemyTank>)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (hull, config, tracked, mut turret) in tanks.iter_mut() {
        let Some(target) = tracked.entity().and_then(|e| targets.get(e).ok()) else {
            continue;
        };

        turret.aim(hull, target.position, config.turret_rotation_speed * delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_local_angle_relative_to_hull() {
        // Корпус смотрит вверх (+Y): heading -90 (CW-positive)
        let hull = HullBody::new(Vec2::ZERO, -90.0);
        // Цель справа (+X) → -90 локально
        assert_relative_eq!(local_target_angle(&hull, Vec2::new(5.0, 0.0)), -90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_aim_is_rate_limited_and_converges() {
        let hull = HullBody::new(Vec2::ZERO, 0.0);
        let target = Vec2::new(0.0, 5.0);
        let mut turret = TurretMount::default();

        turret.aim(&hull, target, 5.0);
        assert_relative_eq!(turret.local_angle, 5.0, epsilon = 1e-4);

        for _ in 0..40 {
            turret.aim(&hull, target, 5.0);
        }
        assert_relative_eq!(turret.local_angle, 90.0, epsilon = 1e-4);
        assert_relative_eq!(turret.world_angle(&hull), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_aim_never_touches_hull() {
        let hull = HullBody::new(Vec2::new(1.0, 2.0), 33.0);
        let before = hull;
        let mut turret = TurretMount::default();
        turret.aim(&hull, Vec2::new(-4.0, 7.0), 90.0);
        assert_eq!(hull, before);
    }

    #[test]
    fn test_world_bearing_invariant_to_hull_rotation() {
        let target = Vec2::new(6.0, 3.0);
        let bearing = bearing_degrees(Vec2::ZERO, target);
        let mut hull = HullBody::new(Vec2::ZERO, 0.0);
        let mut turret = TurretMount {
            local_angle: local_target_angle(&hull, target),
        };

        // Корпус 90° за 60 кадров (1.5°/кадр), башня 3°/кадр
        for _ in 0..60 {
            hull.heading = normalize_angle(hull.heading + 1.5);
            turret.aim(&hull, target, 3.0);
            assert_relative_eq!(turret.world_angle(&hull), bearing, epsilon = 1e-3);
        }
        assert_relative_eq!(hull.heading, 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_hull_snap_recovers_without_drift() {
        let target = Vec2::new(-3.0, -8.0);
        let bearing = bearing_degrees(Vec2::ZERO, target);
        let mut hull = HullBody::new(Vec2::ZERO, 0.0);
        let mut turret = TurretMount {
            local_angle: local_target_angle(&hull, target),
        };

        // Резкий поворот корпуса на 90°: башня догоняет за 90 / 5 = 18 шагов
        hull.heading = 90.0;
        for _ in 0..18 {
            turret.aim(&hull, target, 5.0);
        }
        assert_relative_eq!(turret.world_angle(&hull), bearing, epsilon = 1e-3);

        // Дальше стоим на месте
        for _ in 0..100 {
            turret.aim(&hull, target, 5.0);
        }
        assert_relative_eq!(turret.world_angle(&hull), bearing, epsilon = 1e-3);
    }
}
