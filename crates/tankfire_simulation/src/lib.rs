//! TANKFIRE Simulation Core
//!
//! ECS-симуляция вражеского танка на Bevy 0.16 (headless).
//!
//! Два тика:
//! - render tick (каждый кадр, до fixed loop): perception → FSM → башня
//! - physics tick (FixedUpdate 60Hz): patrol таймеры → движение → оружие

use bevy::app::{RunFixedMainLoop, RunFixedMainLoopSystem};
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod debug_overlay;
pub mod error;
pub mod logger;
pub mod perception;
pub mod physics;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, BehaviorState, PatrolState, TankAIConfig};
pub use combat::{CombatPlugin, FireCommand, ShellFired, ShotKind, TankWeapon, TurretMount};
pub use components::*;
pub use debug_overlay::{collect_debug_overlays, DebugOverlay};
pub use error::ControllerError;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use perception::{LineOfSight, Obstacle, ObstacleShape, PerceptionResult, StaticObstacles};
pub use physics::{HullBody, TankBody};

/// Фазы симуляции (порядок между плагинами)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Render tick: perception + FSM transition
    Decision,
    /// Render tick: наведение башни (после Decision)
    Aim,
    /// Physics tick: patrol таймеры + движение/fire trigger
    Motion,
    /// Physics tick: cooldown + выстрелы (после Motion)
    Weapons,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для physics tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed 42, если не вставлен заранее)
            .init_resource::<DeterministicRng>()
            .configure_sets(
                RunFixedMainLoop,
                (SimulationSet::Decision, SimulationSet::Aim)
                    .chain()
                    .in_set(RunFixedMainLoopSystem::BeforeFixedMainLoop),
            )
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Motion, SimulationSet::Weapons).chain(),
            )
            .add_plugins((AIPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub const DEFAULT_SEED: u64 = 42;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

/// Bundle вражеского танка; невалидный config → `InvalidConfig`
///
/// Остальные компоненты контроллера приходят через `#[require]` на `EnemyTank`.
pub fn enemy_tank_bundle(
    position: Vec2,
    heading: f32,
    config: TankAIConfig,
) -> Result<impl Bundle, ControllerError> {
    config.validate()?;
    Ok((EnemyTank, HullBody::new(position, heading), config))
}

/// Bundle игрока (цель для target locator)
pub fn player_tank_bundle(position: Vec2, heading: f32) -> impl Bundle {
    (PlayerTank, HullBody::new(position, heading))
}

/// Спавн вражеского танка напрямую в World
pub fn spawn_enemy_tank(
    world: &mut World,
    position: Vec2,
    heading: f32,
    config: TankAIConfig,
) -> Result<Entity, ControllerError> {
    let bundle = enemy_tank_bundle(position, heading, config)?;
    let entity = world.spawn(bundle).id();
    log_info(&format!("✅ Enemy tank {:?} spawned at {:?}", entity, position));
    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rng_seed() {
        assert_eq!(DeterministicRng::default().seed, 42);
    }

    #[test]
    fn test_invalid_config_rejected_at_spawn() {
        let mut world = World::new();
        let config = TankAIConfig {
            shooting_range: -1.0,
            ..Default::default()
        };
        let result = spawn_enemy_tank(&mut world, Vec2::ZERO, 0.0, config);
        assert!(matches!(result, Err(ControllerError::InvalidConfig(_))));
        assert_eq!(world.entities().len(), 0);
    }

    #[test]
    fn test_spawn_adds_required_components() {
        let mut world = World::new();
        let entity = spawn_enemy_tank(&mut world, Vec2::new(1.0, 2.0), 0.0, TankAIConfig::default()).unwrap();

        let entity_ref = world.entity(entity);
        assert!(entity_ref.contains::<BehaviorState>());
        assert!(entity_ref.contains::<PatrolState>());
        assert!(entity_ref.contains::<TurretMount>());
        assert!(entity_ref.contains::<TankWeapon>());
        assert_eq!(entity_ref.get::<HullBody>().map(|h| h.position), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_snapshot_ignores_spawn_order_of_queries() {
        let mut world = World::new();
        world.spawn(HullBody::new(Vec2::X, 10.0));
        world.spawn(HullBody::new(Vec2::Y, 20.0));

        assert_eq!(world_snapshot::<HullBody>(&mut world), world_snapshot::<HullBody>(&mut world));
        assert!(!world_snapshot::<HullBody>(&mut world).is_empty());
    }
}
