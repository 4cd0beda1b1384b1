//! Static obstacle layer + ray query service
//!
//! Препятствия статичны на всю сессию: стены (отрезки), круги (бочки,
//! деревья), AABB (ящики, здания). Каждое помечено слоем; raycast видит только
//! слои из переданной маски.

use bevy::prelude::*;
use thiserror::Error;

use crate::components::LayerMask;

const RAY_EPSILON: f32 = 1e-6;

/// Ошибка ray query (невалидный запрос, а не "попали")
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QueryError {
    #[error("raycast with an empty layer mask")]
    EmptyMask,
    #[error("raycast with a degenerate or non-finite ray")]
    DegenerateRay,
}

/// Попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Индекс препятствия в слое
    pub obstacle: usize,
    /// Дистанция от origin вдоль луча
    pub distance: f32,
    pub point: Vec2,
}

/// Line-of-sight query service
///
/// `Ok(None)` — луч чистый, `Ok(Some(hit))` — перекрыт, `Err` — запрос
/// невалиден (вызывающий решает, как трактовать).
pub trait LineOfSight {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Result<Option<RayHit>, QueryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ObstacleShape {
    Circle { center: Vec2, radius: f32 },
    Rect { min: Vec2, max: Vec2 },
    Wall { start: Vec2, end: Vec2 },
}

impl ObstacleShape {
    /// Прямоугольник по центру и полуразмерам
    pub fn rect_centered(center: Vec2, half_extents: Vec2) -> Self {
        let half = half_extents.abs();
        Self::Rect {
            min: center - half,
            max: center + half,
        }
    }

    /// Дистанция входа луча (direction — единичный), не дальше `max_distance`
    ///
    /// Origin внутри фигуры → попадание на 0.
    pub fn ray_distance(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<f32> {
        let distance = match *self {
            ObstacleShape::Circle { center, radius } => ray_circle(origin, direction, center, radius),
            ObstacleShape::Rect { min, max } => ray_rect(origin, direction, min, max, max_distance),
            ObstacleShape::Wall { start, end } => {
                ray_segment(origin, direction * max_distance, start, end).map(|t| t * max_distance)
            }
        }?;

        (distance <= max_distance).then_some(distance)
    }
}

fn ray_circle(origin: Vec2, direction: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let b = offset.dot(direction);
    let c = offset.length_squared() - radius * radius;

    // Снаружи и смотрим от круга
    if c > 0.0 && b > 0.0 {
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()).max(0.0))
}

fn ray_rect(origin: Vec2, direction: Vec2, min: Vec2, max: Vec2, max_distance: f32) -> Option<f32> {
    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;

    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], direction[axis], min[axis], max[axis]);

        if d.abs() < RAY_EPSILON {
            // Параллельно slab: либо внутри полосы, либо мимо
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));

        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

/// Пересечение отрезков `origin..origin+ray` и `start..end`, параметр вдоль луча в [0, 1]
fn ray_segment(origin: Vec2, ray: Vec2, start: Vec2, end: Vec2) -> Option<f32> {
    let wall = end - start;
    let denominator = ray.perp_dot(wall);

    // Параллельные (в т.ч. коллинеарные) стены не перекрывают обзор
    if denominator.abs() < RAY_EPSILON {
        return None;
    }

    let to_start = start - origin;
    let t = to_start.perp_dot(wall) / denominator;
    let u = to_start.perp_dot(ray) / denominator;

    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then_some(t)
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Obstacle {
    pub shape: ObstacleShape,
    pub layers: LayerMask,
}

/// Resource: статичный слой препятствий карты
#[derive(Resource, Debug, Clone, Default, Reflect)]
#[reflect(Resource)]
pub struct StaticObstacles {
    pub obstacles: Vec<Obstacle>,
}

impl StaticObstacles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить препятствие на слой Environment
    pub fn with(mut self, shape: ObstacleShape) -> Self {
        self.push(shape, LayerMask::ENVIRONMENT);
        self
    }

    pub fn push(&mut self, shape: ObstacleShape, layers: LayerMask) -> usize {
        self.obstacles.push(Obstacle { shape, layers });
        self.obstacles.len() - 1
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

impl LineOfSight for StaticObstacles {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Result<Option<RayHit>, QueryError> {
        if mask.is_empty() {
            return Err(QueryError::EmptyMask);
        }

        let length = direction.length();
        if !origin.is_finite() || !length.is_finite() || length < RAY_EPSILON || !max_distance.is_finite() {
            return Err(QueryError::DegenerateRay);
        }
        let direction = direction / length;

        let closest = self
            .obstacles
            .iter()
            .enumerate()
            .filter(|(_, obstacle)| obstacle.layers.intersects(mask))
            .filter_map(|(index, obstacle)| {
                obstacle
                    .shape
                    .ray_distance(origin, direction, max_distance)
                    .map(|distance| (index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        Ok(closest.map(|(obstacle, distance)| RayHit {
            obstacle,
            distance,
            point: origin + direction * distance,
        }))
    }
}
