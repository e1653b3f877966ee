//! Zone effects: inverted controls, slippery surface, slow surface
//!
//! Эффекты level-triggered: срабатывают только на вход в зону, выход не
//! обрабатывается. Счётчика нет — повторный вход в зону того же типа
//! идемпотентен, побеждает последнее событие.
//!
//! Политика стэкинга спрятана за [`ZonePolicy`], MovementController
//! читает только multipliers.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::logger;

/// Slip multiplier на скользкой поверхности (smooth time ×10)
pub const SLIPPERY_MULTIPLIER: f32 = 10.0;
/// Speed multiplier на медленной поверхности
pub const SLOW_MULTIPLIER: f32 = 0.2;

/// Тип зоны (typed замена string tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ZoneKind {
    InvertZone,
    RestoreZone,
    SlipperyZone,
    RestoreSlipperyZone,
    SlowZone,
    RestoreSlowZone,
}

impl ZoneKind {
    /// Tag коллайдера → ZoneKind. Неизвестный tag → None (игнорируется).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "InvertZone" => Some(Self::InvertZone),
            "RestoreZone" => Some(Self::RestoreZone),
            "SlipperyZone" => Some(Self::SlipperyZone),
            "RestoreSlipperyZone" => Some(Self::RestoreSlipperyZone),
            "SlowZone" => Some(Self::SlowZone),
            "RestoreSlowZone" => Some(Self::RestoreSlowZone),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::InvertZone => "InvertZone",
            Self::RestoreZone => "RestoreZone",
            Self::SlipperyZone => "SlipperyZone",
            Self::RestoreSlipperyZone => "RestoreSlipperyZone",
            Self::SlowZone => "SlowZone",
            Self::RestoreSlowZone => "RestoreSlowZone",
        }
    }
}

/// Политика применения zone событий к модификаторам движения
pub trait ZonePolicy {
    /// Применить вход в зону. Возвращает true если состояние изменилось.
    fn on_zone_enter(&mut self, kind: ZoneKind) -> bool;

    fn invert_controls(&self) -> bool;

    /// > 1.0 → дольше сглаживание (скольжение)
    fn slip_multiplier(&self) -> f32;

    /// (0, 1] → масштаб целевой скорости
    fn speed_multiplier(&self) -> f32;

    /// Инверсия команды если включена
    fn apply_inversion(&self, command: Vec3) -> Vec3 {
        if self.invert_controls() {
            -command
        } else {
            command
        }
    }
}

/// Модификаторы движения персонажа (level-triggered flags)
///
/// Инвариант: оба multiplier строго > 0
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct ZoneEffects {
    pub invert_controls: bool,
    pub slip_multiplier: f32,
    pub speed_multiplier: f32,
}

impl Default for ZoneEffects {
    fn default() -> Self {
        Self {
            invert_controls: false,
            slip_multiplier: 1.0,
            speed_multiplier: 1.0,
        }
    }
}

impl ZonePolicy for ZoneEffects {
    fn on_zone_enter(&mut self, kind: ZoneKind) -> bool {
        let before = *self;

        let message = match kind {
            ZoneKind::InvertZone => {
                self.invert_controls = true;
                "Controls inverted"
            }
            ZoneKind::RestoreZone => {
                self.invert_controls = false;
                "Controls restored"
            }
            ZoneKind::SlipperyZone => {
                self.slip_multiplier = SLIPPERY_MULTIPLIER;
                "Slippery surface engaged"
            }
            ZoneKind::RestoreSlipperyZone => {
                self.slip_multiplier = 1.0;
                "Normal surface restored"
            }
            ZoneKind::SlowZone => {
                self.speed_multiplier = SLOW_MULTIPLIER;
                "Slow surface engaged"
            }
            ZoneKind::RestoreSlowZone => {
                self.speed_multiplier = 1.0;
                "Normal speed restored"
            }
        };

        let changed = before != *self;
        if changed {
            logger::log_info(message);
        }
        changed
    }

    fn invert_controls(&self) -> bool {
        self.invert_controls
    }

    fn slip_multiplier(&self) -> f32 {
        self.slip_multiplier
    }

    fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }
}

impl ZoneEffects {
    /// Tag-based вход (для collision сервисов со string tags)
    ///
    /// Неизвестный tag — no-op, возвращает false.
    pub fn on_tagged_enter(&mut self, tag: &str) -> bool {
        match ZoneKind::from_tag(tag) {
            Some(kind) => self.on_zone_enter(kind),
            None => {
                logger::log(&format!("Ignoring unknown zone tag '{}'", tag));
                false
            }
        }
    }
}
