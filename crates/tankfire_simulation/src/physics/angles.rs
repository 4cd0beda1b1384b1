//! Угловая математика (градусы)
//!
//! Все разности углов нормализуются в (-180, 180] перед использованием:
//! наивный lerp через шов ±180 крутит танк по длинной дуге.

use bevy::prelude::*;

/// Нормализация угла в (-180, 180]
pub fn normalize_angle(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Кратчайшая знаковая разность `target - current`, в (-180, 180]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    normalize_angle(target - current)
}

/// Поворот `current` к `target` не больше чем на `max_delta` по кратчайшей дуге
///
/// Результат нормализован. Если остаток меньше шага — возвращаем ровно `target`.
pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = delta_angle(current, target);
    if delta.abs() <= max_delta {
        return normalize_angle(target);
    }
    normalize_angle(current + max_delta.copysign(delta))
}

/// World bearing от `from` к `to` (CCW от +X), градусы
pub fn bearing_degrees(from: Vec2, to: Vec2) -> f32 {
    let direction = to - from;
    direction.y.atan2(direction.x).to_degrees()
}

/// Единичный вектор для CCW угла в градусах
pub fn unit_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Беззнаковый угол между векторами, [0, 180]
///
/// Вырожденный (нулевой) вектор даёт 0.
pub fn unsigned_angle_between(a: Vec2, b: Vec2) -> f32 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    let cos = (a.dot(b) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
