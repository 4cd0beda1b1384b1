//! AI decision-making module
//!
//! FSM вражеского танка: Patrol / Chase / Attack.
//! State — чистая функция от (visible, distance); действия исполняются на
//! physics tick.

use bevy::app::{RunFixedMainLoop, RunFixedMainLoopSystem};
use bevy::prelude::*;

pub mod components;
pub mod patrol;
pub mod systems;

pub use components::{BehaviorState, PatrolState, TankAIConfig};
pub use patrol::generate_patrol_point;
pub use systems::{evaluate_state, plan_action, TankAction};

use crate::combat::FireCommand;
use crate::perception::update_perception;
use crate::SimulationSet;

/// AI Plugin
///
/// Порядок выполнения за кадр:
/// 1. initialize_enemy_tanks (PreUpdate) — target lookup, первая patrol точка
/// 2. update_perception → update_behavior_state (render tick, ДО fixed loop)
/// 3. tick_patrol_waits → execute_tank_behavior (FixedUpdate, physics tick)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<crate::DeterministicRng>()
            .add_event::<FireCommand>()
            .add_systems(PreUpdate, systems::initialize_enemy_tanks)
            .add_systems(
                RunFixedMainLoop,
                (update_perception, systems::update_behavior_state)
                    .chain()
                    .in_set(SimulationSet::Decision)
                    .in_set(RunFixedMainLoopSystem::BeforeFixedMainLoop),
            )
            .add_systems(
                FixedUpdate,
                (systems::tick_patrol_waits, systems::execute_tank_behavior)
                    .chain()
                    .in_set(SimulationSet::Motion),
            );
    }
}
