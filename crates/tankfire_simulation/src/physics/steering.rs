//! Steering контроллер: точка назначения → поворот + тяга вперёд
//!
//! Gait "сначала развернись, потом едь": пока heading не попал в конус
//! выравнивания, тик только поворачивает корпус. Никакого бокового скольжения
//! на резких поворотах.

use bevy::prelude::*;

use super::angles::{bearing_degrees, delta_angle, move_towards_angle};
use super::body::TankBody;

/// Конус выравнивания по умолчанию (градусы)
pub const ALIGNMENT_TOLERANCE_DEG: f32 = 30.0;

/// Результат одного steering тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteeringStep {
    pub heading: f32,
    pub position: Vec2,
    /// true если тик сдвинул корпус вперёд
    pub advanced: bool,
}

pub fn steer_toward(
    position: Vec2,
    heading: f32,
    target: Vec2,
    speed: f32,
    rotation_rate: f32,
    delta: f32,
) -> SteeringStep {
    steer_toward_within(
        position,
        heading,
        target,
        speed,
        rotation_rate,
        delta,
        ALIGNMENT_TOLERANCE_DEG,
    )
}

/// `steer_toward` с явным конусом выравнивания
///
/// Желаемый heading = -bearing (CW-positive корпус). Проверка конуса по
/// heading ДО поворота, смещение вдоль forward ПОСЛЕ поворота.
pub fn steer_toward_within(
    position: Vec2,
    heading: f32,
    target: Vec2,
    speed: f32,
    rotation_rate: f32,
    delta: f32,
    alignment_tolerance: f32,
) -> SteeringStep {
    let desired = -bearing_degrees(position, target);
    let new_heading = move_towards_angle(heading, desired, rotation_rate * delta);

    if delta_angle(heading, desired).abs() >= alignment_tolerance {
        return SteeringStep {
            heading: new_heading,
            position,
            advanced: false,
        };
    }

    let radians = new_heading.to_radians();
    let forward = Vec2::new(radians.cos(), -radians.sin());

    SteeringStep {
        heading: new_heading,
        position: position + forward * speed * delta,
        advanced: true,
    }
}

/// Применить шаг к телу (rotate + move, velocity не трогаем)
pub fn apply_steering(body: &mut impl TankBody, step: SteeringStep) {
    body.set_heading(step.heading);
    body.move_to(step.position);
}
