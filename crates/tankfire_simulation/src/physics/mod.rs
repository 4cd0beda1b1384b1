//! Physics module
//!
//! Kinematic корпус танка и steering (поворот + тяга). Интеграцию скорости
//! делает владелец тела; контроллер только считает дельты за тик.

pub mod angles;
pub mod body;
pub mod steering;

pub use angles::{
    bearing_degrees, delta_angle, move_towards_angle, normalize_angle, unit_vector,
    unsigned_angle_between,
};
pub use body::{HullBody, TankBody};
pub use steering::{
    apply_steering, steer_toward, steer_toward_within, SteeringStep, ALIGNMENT_TOLERANCE_DEG,
};
