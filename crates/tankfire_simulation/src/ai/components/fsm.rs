//! FSM AI components (state, config, patrol bookkeeping).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::components::LayerMask;
use crate::error::ControllerError;

/// Поведение вражеского танка
///
/// Чистая функция от (visible, distance, shooting_range), пересчитывается
/// каждый кадр. Скрытой памяти нет: потеряли цель — сразу Patrol.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub enum BehaviorState {
    /// Начальное состояние после спавна: цель не видна
    #[default]
    Patrol,
    /// Цель видна, но дальше дистанции стрельбы
    Chase,
    /// Цель видна и в радиусе стрельбы
    Attack,
}

/// Параметры AI танка
///
/// Defaults — боевые настройки врага на стандартной карте. JSON override
/// частичный: отсутствующие поля берутся из `Default`.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct TankAIConfig {
    /// Радиус обнаружения (метры)
    pub detection_range: f32,
    /// Дистанция стрельбы (метры)
    pub shooting_range: f32,
    /// Слои, закрывающие обзор
    pub obstacle_mask: LayerMask,
    /// Скорость поворота башни (градусы/сек)
    pub turret_rotation_speed: f32,
    /// Скорость патруля (м/с)
    pub patrol_speed: f32,
    /// Скорость преследования (м/с)
    pub chase_speed: f32,
    /// Скорость поворота корпуса (градусы/сек)
    pub rotation_speed: f32,
    /// Пауза на patrol точке (секунды)
    pub patrol_wait_time: f32,
    /// Кольцо генерации patrol точек (метры)
    pub min_patrol_distance: f32,
    pub max_patrol_distance: f32,
    /// Радиус "дошли до patrol точки" (метры)
    pub patrol_reach_threshold: f32,
    /// Конус стрельбы вокруг forward оси корпуса (градусы)
    pub firing_cone: f32,
    /// Конус выравнивания: тяга вперёд только внутри него (градусы)
    pub alignment_tolerance: f32,
}

impl Default for TankAIConfig {
    fn default() -> Self {
        Self {
            detection_range: 10.0,
            shooting_range: 8.0,
            obstacle_mask: LayerMask::LINE_OF_SIGHT,
            turret_rotation_speed: 5.0,
            patrol_speed: 3.0,
            chase_speed: 5.0,
            rotation_speed: 120.0,
            patrol_wait_time: 2.0,
            min_patrol_distance: 5.0,
            max_patrol_distance: 15.0,
            patrol_reach_threshold: 0.5,
            firing_cone: 30.0,
            alignment_tolerance: 30.0,
        }
    }
}

impl TankAIConfig {
    /// Загрузить (частичный) config из JSON и провалидировать
    pub fn from_json_str(json: &str) -> Result<Self, ControllerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, ControllerError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        let non_negative = [
            ("detection_range", self.detection_range),
            ("shooting_range", self.shooting_range),
            ("turret_rotation_speed", self.turret_rotation_speed),
            ("patrol_speed", self.patrol_speed),
            ("chase_speed", self.chase_speed),
            ("rotation_speed", self.rotation_speed),
            ("patrol_wait_time", self.patrol_wait_time),
            ("min_patrol_distance", self.min_patrol_distance),
            ("max_patrol_distance", self.max_patrol_distance),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ControllerError::InvalidConfig(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.min_patrol_distance > self.max_patrol_distance {
            return Err(ControllerError::InvalidConfig(format!(
                "min_patrol_distance ({}) exceeds max_patrol_distance ({})",
                self.min_patrol_distance, self.max_patrol_distance
            )));
        }

        if !(self.patrol_reach_threshold.is_finite() && self.patrol_reach_threshold > 0.0) {
            return Err(ControllerError::InvalidConfig(format!(
                "patrol_reach_threshold must be positive, got {}",
                self.patrol_reach_threshold
            )));
        }

        for (name, cone) in [
            ("firing_cone", self.firing_cone),
            ("alignment_tolerance", self.alignment_tolerance),
        ] {
            if !(cone > 0.0 && cone <= 180.0) {
                return Err(ControllerError::InvalidConfig(format!(
                    "{} must be in (0, 180], got {}",
                    name, cone
                )));
            }
        }

        Ok(())
    }

    pub fn patrol_wait(&self) -> Duration {
        Duration::try_from_secs_f32(self.patrol_wait_time).unwrap_or(Duration::ZERO)
    }
}

/// Patrol bookkeeping: текущая точка + таймер ожидания
///
/// `wait` = Some — стоим на достигнутой точке, steering подавлен. Таймер
/// тикает physics delta; на финише генерируется новая точка.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolState {
    /// Текущая patrol точка (`None` до инициализации танка)
    pub target: Option<Vec2>,
    pub wait: Option<Timer>,
}

impl PatrolState {
    pub fn new(target: Vec2) -> Self {
        Self {
            target: Some(target),
            wait: None,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.wait.is_some()
    }

    /// Начать ожидание на достигнутой точке
    pub fn begin_wait(&mut self, duration: Duration) {
        self.wait = Some(Timer::new(duration, TimerMode::Once));
    }

    /// Продвинуть таймер ожидания; true — ожидание закончилось в этом тике
    ///
    /// Таймер снимается; новую точку ставит вызывающий (`replace_target`).
    pub fn tick_wait(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.wait.as_mut() else {
            return false;
        };

        timer.tick(delta);
        if timer.finished() {
            self.wait = None;
            return true;
        }
        false
    }

    pub fn replace_target(&mut self, target: Vec2) {
        self.target = Some(target);
    }
}
