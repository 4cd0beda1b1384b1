//! Visibility check: радиус обнаружения + line of sight

use bevy::prelude::*;

use crate::ai::TankAIConfig;
use crate::components::{EnemyTank, LayerMask, PlayerTank, TrackedTarget};
use crate::physics::HullBody;

use super::obstacles::{LineOfSight, StaticObstacles};

/// Результат восприятия за текущий кадр (без памяти о прошлых кадрах)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PerceptionResult {
    pub visible: bool,
    /// Дистанция до цели; `None` — цели нет
    pub distance: Option<f32>,
}

impl PerceptionResult {
    /// Цели нет: не видим, дистанции нет
    pub const ABSENT: Self = Self {
        visible: false,
        distance: None,
    };
}

/// Видна ли цель агенту
///
/// - дальше радиуса → false, raycast не делается
/// - иначе луч к цели длиной в дистанцию; видна если луч чистый
/// - невалидный запрос (пустая маска и т.п.) → видна: отсутствие слоя
///   препятствий не должно ослеплять танк
pub fn update_visibility(
    agent: Vec2,
    target: Vec2,
    detection_radius: f32,
    line_of_sight: &impl LineOfSight,
    mask: LayerMask,
) -> bool {
    let to_target = target - agent;
    let distance = to_target.length();

    if distance > detection_radius {
        return false;
    }

    match line_of_sight.raycast(agent, to_target, distance, mask) {
        Ok(hit) => hit.is_none(),
        Err(_) => true,
    }
}

/// Система: восприятие (render tick)
///
/// Нет `StaticObstacles` resource → слой пустой, обзор ничем не перекрыт.
pub fn update_perception(
    mut tanks: Query<
        (&HullBody, &TankAIConfig, &TrackedTarget, &mut PerceptionResult),
        With<EnemyTank>,
    >,
    targets: Query<&HullBody, (With<PlayerTank>, Without<EnemyTank>)>,
    obstacles: Option<Res<StaticObstacles>>,
) {
    let empty = StaticObstacles::default();
    let obstacles = obstacles.as_deref().unwrap_or(&empty);

    for (hull, config, tracked, mut perception) in tanks.iter_mut() {
        let Some(target) = tracked.entity().and_then(|e| targets.get(e).ok()) else {
            // Цель отсутствует → не видна, дальше по кадру работы нет
            if *perception != PerceptionResult::ABSENT {
                *perception = PerceptionResult::ABSENT;
            }
            continue;
        };

        let visible = update_visibility(
            hull.position,
            target.position,
            config.detection_range,
            obstacles,
            config.obstacle_mask,
        );

        *perception = PerceptionResult {
            visible,
            distance: Some(hull.distance_to(target.position)),
        };
    }
}
