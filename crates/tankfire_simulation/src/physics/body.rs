//! Корпус танка (hull) — физическое тело, которым командует контроллер
//!
//! Конвенция heading: по часовой стрелке положительный (screen-space rotation
//! корпуса). Forward = (cos h, -sin h), world facing (CCW) = -h.

use bevy::prelude::*;

use super::angles::normalize_angle;

/// Command interface к физическому телу
///
/// Контроллер только выдаёт команды; интеграцию делает владелец тела.
pub trait TankBody {
    fn position(&self) -> Vec2;
    fn heading(&self) -> f32;
    fn set_heading(&mut self, degrees: f32);
    fn move_to(&mut self, position: Vec2);
    fn set_velocity(&mut self, velocity: Vec2);
}

/// Kinematic корпус танка
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HullBody {
    /// World позиция (метры)
    pub position: Vec2,
    /// Heading, градусы, CW-positive, в (-180, 180]
    pub heading: f32,
    /// Линейная скорость (м/с)
    pub velocity: Vec2,
}

impl HullBody {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading: normalize_angle(heading),
            velocity: Vec2::ZERO,
        }
    }

    /// Ось "вперёд" корпуса в world space
    pub fn forward(&self) -> Vec2 {
        let radians = self.heading.to_radians();
        Vec2::new(radians.cos(), -radians.sin())
    }

    /// CCW world угол forward оси
    pub fn facing(&self) -> f32 {
        normalize_angle(-self.heading)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}

impl TankBody for HullBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn set_heading(&mut self, degrees: f32) {
        self.heading = normalize_angle(degrees);
    }

    fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_is_clockwise_positive() {
        let hull = HullBody::new(Vec2::ZERO, 90.0);
        let forward = hull.forward();
        assert_relative_eq!(forward.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(forward.y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(hull.facing(), -90.0);
    }

    #[test]
    fn test_set_heading_wraps() {
        let mut hull = HullBody::default();
        hull.set_heading(270.0);
        assert_relative_eq!(hull.heading(), -90.0);
    }
}
