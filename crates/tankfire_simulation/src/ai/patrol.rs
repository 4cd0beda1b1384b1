//! Patrol point generator
//!
//! Случайная точка в кольце [min, max] вокруг позиции танка. RNG передаётся
//! явно (`DeterministicRng`), никакого thread_rng: один seed — один маршрут.

use bevy::prelude::*;
use rand::Rng;

use crate::physics::unit_vector;

/// Точка на равномерной дистанции [min, max] и равномерном угле [0, 360)
///
/// Границы упорядочиваются и обрезаются снизу нулём: config мог прийти в
/// компонент в обход `validate`. Нечисловые границы → `center`.
pub fn generate_patrol_point(
    rng: &mut impl Rng,
    center: Vec2,
    min_radius: f32,
    max_radius: f32,
) -> Vec2 {
    if !min_radius.is_finite() || !max_radius.is_finite() {
        return center;
    }
    let low = min_radius.min(max_radius).max(0.0);
    let high = min_radius.max(max_radius).max(0.0);

    let distance = rng.gen_range(low..=high);
    let angle = rng.gen_range(0.0..360.0);
    center + unit_vector(angle) * distance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_points_stay_in_annulus() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let center = Vec2::new(-3.0, 12.0);

        for _ in 0..1000 {
            let point = generate_patrol_point(&mut rng, center, 5.0, 15.0);
            let distance = point.distance(center);
            assert!(distance >= 5.0 - 1e-3, "distance {} below ring", distance);
            assert!(distance <= 15.0 + 1e-3, "distance {} above ring", distance);
        }
    }

    #[test]
    fn test_same_seed_same_route() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(
                generate_patrol_point(&mut a, Vec2::ZERO, 5.0, 15.0),
                generate_patrol_point(&mut b, Vec2::ZERO, 5.0, 15.0)
            );
        }
    }

    #[test]
    fn test_inverted_ring_does_not_panic() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let point = generate_patrol_point(&mut rng, Vec2::ZERO, 20.0, 5.0);
            let distance = point.length();
            assert!((5.0 - 1e-3..=20.0 + 1e-3).contains(&distance), "distance {}", distance);
        }

        // Отрицательные и нечисловые границы
        let point = generate_patrol_point(&mut rng, Vec2::ONE, -4.0, -1.0);
        assert_eq!(point, Vec2::ONE);
        assert_eq!(generate_patrol_point(&mut rng, Vec2::ONE, f32::NAN, 5.0), Vec2::ONE);
    }

    #[test]
    fn test_degenerate_ring_is_circle() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let point = generate_patrol_point(&mut rng, Vec2::ZERO, 4.0, 4.0);
        assert!((point.length() - 4.0).abs() < 1e-4);
    }
}
