//! FSM AI systems (инициализация танка, state transitions).

use bevy::prelude::*;

use crate::ai::{generate_patrol_point, BehaviorState, PatrolState, TankAIConfig};
use crate::components::{EnemyTank, PlayerTank, TrackedTarget};
use crate::error::ControllerError;
use crate::perception::PerceptionResult;
use crate::physics::HullBody;
use crate::DeterministicRng;

/// Переход FSM: чистая функция
///
/// Порядок приоритетов:
/// 1. Не видим → Patrol (перекрывает Chase/Attack безусловно)
/// 2. distance ≤ shooting_range → Attack
/// 3. Иначе → Chase
pub fn evaluate_state(visible: bool, distance: f32, shooting_range: f32) -> BehaviorState {
    if !visible {
        return BehaviorState::Patrol;
    }

    if distance <= shooting_range {
        BehaviorState::Attack
    } else {
        BehaviorState::Chase
    }
}

/// Система: инициализация новых вражеских танков (один раз на танк)
///
/// - нет `HullBody` → fatal конфигурация: error в лог, танк инертен навсегда
///   (все системы контроллера требуют `HullBody`)
/// - невалидный `TankAIConfig` (вставлен в обход spawn helper'а) → error в лог,
///   ни цели, ни patrol точки: танк стоит в Patrol
/// - target locator: первый `PlayerTank`; нет цели → warning, вечный Patrol
/// - первая patrol точка вокруг позиции спавна
pub fn initialize_enemy_tanks(
    mut new_tanks: Query<
        (
            Entity,
            Option<&HullBody>,
            &TankAIConfig,
            &mut TrackedTarget,
            &mut PatrolState,
        ),
        Added<EnemyTank>,
    >,
    players: Query<Entity, With<PlayerTank>>,
    mut rng: ResMut<DeterministicRng>,
) {
    for (entity, hull, config, mut tracked, mut patrol) in new_tanks.iter_mut() {
        let Some(hull) = hull else {
            crate::log_error(&ControllerError::MissingBody(entity).to_string());
            continue;
        };

        if let Err(err) = config.validate() {
            crate::log_error(&format!("AI: {:?} disabled: {}", entity, err));
            continue;
        }

        let target = players.iter().next();
        if target.is_none() {
            crate::log_warning(&ControllerError::MissingTarget(entity).to_string());
        }
        *tracked = TrackedTarget(target);

        let first_point = generate_patrol_point(
            &mut rng.rng,
            hull.position,
            config.min_patrol_distance,
            config.max_patrol_distance,
        );
        *patrol = PatrolState::new(first_point);

        crate::log(&format!(
            "AI: {:?} spawned at {:?}, target {:?}, first patrol point {:?}",
            entity, hull.position, target, first_point
        ));
    }
}

/// Система: AI FSM transitions (render tick, после perception)
pub fn update_behavior_state(
    mut tanks: Query<
        (Entity, &PerceptionResult, &TankAIConfig, &mut BehaviorState),
        (With<EnemyTank>, With<HullBody>),
    >,
) {
    for (entity, perception, config, mut state) in tanks.iter_mut() {
        let new_state = evaluate_state(
            perception.visible,
            perception.distance.unwrap_or(f32::INFINITY),
            config.shooting_range,
        );

        if *state != new_state {
            crate::log(&format!("AI: {:?} {:?} → {:?}", entity, *state, new_state));
            *state = new_state;
        }
    }
}
