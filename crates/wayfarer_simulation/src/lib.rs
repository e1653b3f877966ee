//! Wayfarer Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (headless)
//! - Movement: state machine персонажа + zone модификаторы
//! - Fading: batch fade спрайтов (один проход за кадр)
//!
//! Рендер, анимационные клипы, коллизии и pixel-perfect камера — внешние
//! сервисы, core общается с ними через компоненты из `services`.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod config;
pub mod driver;
pub mod fading;
pub mod logger;
pub mod math;
pub mod movement;
pub mod schedule;
pub mod services;

// Re-export для удобства
pub use config::{ConfigError, SimulationConfig};
pub use driver::{drive_wanderers, WanderDriver};
pub use fading::{
    spawn_fading_sprite, FadeReport, FadeScheduler, FadeSettings, FadingSprite, FadingSpriteRegistry,
    Inactive, SurfaceTint,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use movement::{
    map_direction, spawn_character, MoveCommand, MoveSegment, MovementConfig, MovementController,
    MovementOutput, MovementPhase, RestGuard, WalkDirection, ZoneEffects, ZoneEntered, ZoneKind,
    ZonePolicy,
};
pub use schedule::{configure_frame_schedule, init_frame_resources, FrameSet};
pub use services::{PhysicsBody, PixelGrid, PixelSnap, PixelSnapper, SpriteFacing, WalkAnimator};

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimulationConfig,
}

impl SimulationPlugin {
    pub fn from_config(config: SimulationConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(FadeScheduler::new(config.fade))
            .init_resource::<FadingSpriteRegistry>()
            .add_event::<MoveCommand>()
            .add_event::<ZoneEntered>()
            .edit_schedule(FixedUpdate, configure_frame_schedule)
            // Input driver пишет команды до Zones set
            .add_systems(FixedUpdate, drive_wanderers.before(FrameSet::Zones));

        if let Some(pixels_per_unit) = config.pixels_per_unit {
            app.insert_resource(PixelSnapper::new(PixelGrid { pixels_per_unit }));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Fixed timestep, seed и fade настройки берутся из `config` (через
/// SimulationPlugin). Один `app.update()` = один fixed tick.
pub fn create_headless_app(config: &SimulationConfig) -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, SimulationPlugin::from_config(config.clone())))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / config.tick_hz,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты сериализуются через Debug, порядок — по Entity index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
