//! Collision layers — битовые маски слоёв для LOS raycast
//!
//! ## Слои:
//! - Layer 1 (0b1 = 1): Tanks (корпуса игрока и врагов)
//! - Layer 2 (0b10 = 2): Environment (стены, ящики, статичные препятствия)
//! - Layer 3 (0b100 = 4): Projectiles (снаряды)
//!
//! LOS проверка по умолчанию смотрит только на Environment: танки и снаряды
//! не закрывают обзор.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const TANKS: Self = Self(0b1);
    pub const ENVIRONMENT: Self = Self(0b10);
    pub const PROJECTILES: Self = Self(0b100);
    pub const ALL: Self = Self(u32::MAX);

    /// Маска для LOS raycast (только статичные препятствия)
    pub const LINE_OF_SIGHT: Self = Self::ENVIRONMENT;

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Есть ли хотя бы один общий слой
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
