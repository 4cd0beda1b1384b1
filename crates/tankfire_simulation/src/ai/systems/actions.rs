//! Per-state actions (physics tick).
//!
//! `plan_action` — чистая функция state → действие; системы только применяют
//! результат к корпусу, patrol таймеру и fire trigger.

use bevy::prelude::*;

use crate::ai::{generate_patrol_point, BehaviorState, PatrolState, TankAIConfig};
use crate::combat::FireCommand;
use crate::components::{EnemyTank, PlayerTank, TrackedTarget};
use crate::perception::PerceptionResult;
use crate::physics::{apply_steering, steer_toward_within, unsigned_angle_between, HullBody, TankBody};
use crate::DeterministicRng;

/// Действие танка на текущий physics tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TankAction {
    /// Ничего не делаем (ждём на patrol точке или цели нет)
    Hold,
    /// Дошли до patrol точки → начать ожидание
    BeginWait,
    /// Рулим к точке с заданной скоростью
    Steer { destination: Vec2, speed: f32 },
    /// Полная остановка; `fire` — дёрнуть fire trigger в этом тике
    Engage { fire: bool },
}

pub fn plan_action(
    state: BehaviorState,
    hull: &HullBody,
    patrol: &PatrolState,
    target: Option<Vec2>,
    visible: bool,
    config: &TankAIConfig,
) -> TankAction {
    match state {
        BehaviorState::Patrol => {
            if patrol.is_waiting() {
                return TankAction::Hold;
            }
            let Some(point) = patrol.target else {
                return TankAction::Hold;
            };

            if hull.distance_to(point) < config.patrol_reach_threshold {
                TankAction::BeginWait
            } else {
                TankAction::Steer {
                    destination: point,
                    speed: config.patrol_speed,
                }
            }
        }

        BehaviorState::Chase => match target {
            Some(destination) => TankAction::Steer {
                destination,
                speed: config.chase_speed,
            },
            None => TankAction::Hold,
        },

        BehaviorState::Attack => {
            let Some(target) = target else {
                return TankAction::Hold;
            };

            // Угол между forward корпуса и направлением на цель (башня не участвует)
            let angle = unsigned_angle_between(hull.forward(), target - hull.position);
            TankAction::Engage {
                fire: angle < config.firing_cone && visible,
            }
        }
    }
}

/// Система: patrol wait таймеры
///
/// Тикают в любом state: ожидание, начатое в Patrol, доходит до конца даже
/// если танк уже преследует цель. На финише — новая точка вокруг текущей позиции.
pub fn tick_patrol_waits(
    mut tanks: Query<(Entity, &HullBody, &TankAIConfig, &mut PatrolState), With<EnemyTank>>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta();

    for (entity, hull, config, mut patrol) in tanks.iter_mut() {
        if !patrol.is_waiting() {
            continue;
        }

        if patrol.tick_wait(delta) {
            let next = generate_patrol_point(
                &mut rng.rng,
                hull.position,
                config.min_patrol_distance,
                config.max_patrol_distance,
            );
            patrol.replace_target(next);
            crate::log(&format!("AI: {:?} wait over, next patrol point {:?}", entity, next));
        }
    }
}

/// Система: dispatch текущего state в steering / fire trigger
pub fn execute_tank_behavior(
    mut tanks: Query<
        (
            Entity,
            &BehaviorState,
            &mut HullBody,
            &mut PatrolState,
            &PerceptionResult,
            &TrackedTarget,
            &TankAIConfig,
        ),
        With<EnemyTank>,
    >,
    targets: Query<&HullBody, (With<PlayerTank>, Without<EnemyTank>)>,
    mut fire_commands: EventWriter<FireCommand>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, state, mut hull, mut patrol, perception, tracked, config) in tanks.iter_mut() {
        let target = tracked
            .entity()
            .and_then(|e| targets.get(e).ok())
            .map(|body| body.position);

        match plan_action(*state, &hull, &patrol, target, perception.visible, config) {
            TankAction::Hold => {}

            TankAction::BeginWait => {
                patrol.begin_wait(config.patrol_wait());
                crate::log(&format!(
                    "AI: {:?} reached patrol point {:?}, waiting {}s",
                    entity, patrol.target, config.patrol_wait_time
                ));
            }

            TankAction::Steer { destination, speed } => {
                let step = steer_toward_within(
                    hull.position,
                    hull.heading,
                    destination,
                    speed,
                    config.rotation_speed,
                    delta,
                    config.alignment_tolerance,
                );
                apply_steering(&mut *hull, step);
            }

            TankAction::Engage { fire } => {
                hull.set_velocity(Vec2::ZERO);
                if fire {
                    fire_commands.write(FireCommand { shooter: entity });
                }
            }
        }
    }
}
