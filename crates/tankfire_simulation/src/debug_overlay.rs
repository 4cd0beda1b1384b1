//! Debug overlay — данные для визуализации AI (радиусы, patrol точка)
//!
//! Только чтение: сборка overlay не меняет состояние симуляции.
//! Рисует их кто угодно (gizmos, лог, UI).

use bevy::prelude::*;

use crate::ai::{BehaviorState, PatrolState, TankAIConfig};
use crate::components::EnemyTank;
use crate::physics::HullBody;

/// Радиус маркера patrol точки (метры)
pub const PATROL_MARKER_RADIUS: f32 = 0.5;

/// Snapshot одного танка для debug отрисовки
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOverlay {
    pub entity: Entity,
    pub position: Vec2,
    pub state: BehaviorState,
    /// Круг обнаружения (жёлтый)
    pub detection_radius: f32,
    /// Круг стрельбы (красный)
    pub shooting_radius: f32,
    /// Текущая patrol точка (синий маркер)
    pub patrol_target: Option<Vec2>,
    pub patrol_marker_radius: f32,
}

impl DebugOverlay {
    pub fn from_agent(
        entity: Entity,
        hull: &HullBody,
        state: BehaviorState,
        config: &TankAIConfig,
        patrol: &PatrolState,
    ) -> Self {
        Self {
            entity,
            position: hull.position,
            state,
            detection_radius: config.detection_range,
            shooting_radius: config.shooting_range,
            patrol_target: patrol.target,
            patrol_marker_radius: PATROL_MARKER_RADIUS,
        }
    }
}

/// Overlay для каждого вражеского танка, отсортировано по Entity ID
pub fn collect_debug_overlays(world: &mut World) -> Vec<DebugOverlay> {
    let mut query = world.query_filtered::<
        (Entity, &HullBody, &BehaviorState, &TankAIConfig, &PatrolState),
        With<EnemyTank>,
    >();

    let mut overlays: Vec<_> = query
        .iter(world)
        .map(|(entity, hull, state, config, patrol)| {
            DebugOverlay::from_agent(entity, hull, *state, config, patrol)
        })
        .collect();

    overlays.sort_by_key(|overlay| overlay.entity.index());
    overlays
}

/// AI state debug logger: одна строка на танк
pub fn log_debug_overlays(world: &mut World) {
    for overlay in collect_debug_overlays(world) {
        crate::log(&format!(
            "🐛 {:?} {:?} at {:?} (detect {}, shoot {}, patrol {:?})",
            overlay.entity,
            overlay.state,
            overlay.position,
            overlay.detection_radius,
            overlay.shooting_radius,
            overlay.patrol_target
        ));
    }
}
