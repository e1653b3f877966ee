//! MovementController — per-character state machine (Idle → Moving)
//!
//! Архитектура:
//! - Input/AI пишет `pending_command` (displacement vector) до тика
//! - `tick()` считает целевую velocity и сглаживает её через smooth damp
//! - Интеграцию velocity → position делает внешний сервис
//!   (PhysicsBody + integrator system), здесь только target
//!
//! Переход Moving → Idle по умолчанию отсутствует (free-roam движение).
//! Опционально включается через [`RestGuard`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::direction::{map_direction, WalkDirection};
use super::zones::{ZoneEffects, ZonePolicy};
use crate::logger;
use crate::math::smooth_damp_vec2;
use crate::services::PhysicsBody;

/// Guard для возврата Moving → Idle
///
/// Персонаж без команды, чья скорость < `epsilon` в течение `ticks`
/// подряд, возвращается в Idle.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct RestGuard {
    pub epsilon: f32,
    pub ticks: u32,
}

impl Default for RestGuard {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            ticks: 10,
        }
    }
}

/// Параметры движения персонажа (задаются один раз при создании)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Максимальная скорость (units/sec)
    pub speed: f32,
    /// Темп набора progress и базовое smooth time
    pub acceleration: f32,
    /// None → Moving никогда не возвращается в Idle
    #[serde(default)]
    pub rest_guard: Option<RestGuard>,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            acceleration: 2.0,
            rest_guard: None,
        }
    }
}

/// Текущий сегмент движения (фиксируется при переходе в Moving)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct MoveSegment {
    pub start: Vec3,
    pub end: Vec3,
    /// |end - start|, пока advisory (arrival detection не используется)
    pub distance: f32,
    /// Инвариант: 0 ≤ progress ≤ 1, не убывает
    pub progress: f32,
    /// Сколько тиков подряд выполняется условие RestGuard
    pub rest_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum MovementPhase {
    #[default]
    Idle,
    Moving(MoveSegment),
}

/// Результат одного тика (что отдать внешним сервисам)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementOutput {
    /// Новая velocity для integrator (None в Idle — тело не трогаем)
    pub velocity: Option<Vec2>,
    /// Целевая velocity до сглаживания
    pub target_velocity: Option<Vec2>,
    /// WalkX/WalkY для аниматора (если пересчитаны)
    pub walk: Option<WalkDirection>,
    /// flip_x спрайта (true → смотрит вправо)
    pub flip_x: Option<bool>,
    /// Переход Idle → Moving в этом тике
    pub started: bool,
    /// Переход Moving → Idle в этом тике (только с RestGuard)
    pub stopped: bool,
}

/// State machine движения персонажа
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, ZoneEffects, PhysicsBody)]
pub struct MovementController {
    pub config: MovementConfig,
    pub phase: MovementPhase,
    /// Displacement от input/AI. Vec3::ZERO — команды нет.
    pub pending_command: Vec3,
    /// Состояние smooth damp фильтра velocity (переносится между кадрами)
    pub smoothed_velocity: Vec2,
}

impl MovementController {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub fn issue_command(&mut self, displacement: Vec3) {
        self.pending_command = displacement;
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.phase, MovementPhase::Moving(_))
    }

    pub fn segment(&self) -> Option<&MoveSegment> {
        match &self.phase {
            MovementPhase::Moving(segment) => Some(segment),
            MovementPhase::Idle => None,
        }
    }

    /// 0.0 в Idle
    pub fn progress(&self) -> f32 {
        self.segment().map_or(0.0, |segment| segment.progress)
    }

    /// Один кадр state machine
    ///
    /// `position` — текущая позиция (для записи start/end),
    /// `body_velocity` — текущая velocity тела у integrator сервиса.
    pub fn tick(
        &mut self,
        dt: f32,
        position: Vec3,
        body_velocity: Vec2,
        zones: &impl ZonePolicy,
    ) -> MovementOutput {
        match self.phase {
            MovementPhase::Idle => self.tick_idle(position, zones),
            MovementPhase::Moving(segment) => self.tick_moving(segment, dt, body_velocity, zones),
        }
    }

    fn tick_idle(&mut self, position: Vec3, zones: &impl ZonePolicy) -> MovementOutput {
        if self.pending_command == Vec3::ZERO {
            return MovementOutput::default();
        }

        let start = position;
        let end = start + zones.apply_inversion(self.pending_command);
        let segment = MoveSegment {
            start,
            end,
            distance: (end - start).length(),
            progress: 0.0,
            rest_ticks: 0,
        };

        // Аниматор получает сырую команду (без инверсии)
        let walk = map_direction(self.pending_command);
        self.pending_command = Vec3::ZERO;
        self.phase = MovementPhase::Moving(segment);

        logger::log(&format!(
            "Movement started: {:?} → {:?} (distance {:.2})",
            segment.start, segment.end, segment.distance
        ));

        MovementOutput {
            walk: Some(walk),
            started: true,
            ..default()
        }
    }

    fn tick_moving(
        &mut self,
        mut segment: MoveSegment,
        dt: f32,
        body_velocity: Vec2,
        zones: &impl ZonePolicy,
    ) -> MovementOutput {
        let config = self.config;

        segment.progress = (segment.progress + dt * config.acceleration).clamp(0.0, 1.0);

        // Команда перечитывается каждый кадр — живой input может сменить направление
        let command = zones.apply_inversion(self.pending_command);
        let walk = map_direction(command);

        let smooth_time = config.acceleration * zones.slip_multiplier();
        let max_speed = config.speed * zones.speed_multiplier();
        let target_velocity = command.truncate() * max_speed;

        let mut velocity = smooth_damp_vec2(
            body_velocity,
            target_velocity,
            &mut self.smoothed_velocity,
            smooth_time,
            max_speed,
            dt,
        );

        let mut stopped = false;
        if let Some(guard) = config.rest_guard {
            if self.pending_command == Vec3::ZERO && velocity.length() < guard.epsilon {
                segment.rest_ticks += 1;
            } else {
                segment.rest_ticks = 0;
            }
            stopped = segment.rest_ticks >= guard.ticks;
        }

        if stopped {
            // Остаточная velocity ниже epsilon — гасим, чтобы тело не дрейфовало в Idle
            logger::log(&format!("Movement came to rest at velocity {:?}", velocity));
            velocity = Vec2::ZERO;
            self.smoothed_velocity = Vec2::ZERO;
            self.phase = MovementPhase::Idle;
        } else {
            self.phase = MovementPhase::Moving(segment);
        }

        MovementOutput {
            velocity: Some(velocity),
            target_velocity: Some(target_velocity),
            walk: Some(walk),
            flip_x: Some(velocity.x >= 0.0),
            started: false,
            stopped,
        }
    }
}

/// Spawn helper для персонажа
///
/// Создает entity с полным набором компонентов:
/// - Transform
/// - MovementController (+ ZoneEffects, PhysicsBody через Required Components)
/// - WalkAnimator + SpriteFacing sinks
pub fn spawn_character(commands: &mut Commands, position: Vec3, config: MovementConfig) -> Entity {
    use crate::services::{SpriteFacing, WalkAnimator};

    commands
        .spawn((
            Transform::from_translation(position),
            MovementController::new(config),
            WalkAnimator::default(),
            SpriteFacing::default(),
        ))
        .id()
}
