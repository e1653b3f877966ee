//! Headless симуляция Wayfarer
//!
//! Один персонаж с WanderDriver, несколько fading спрайтов, zone events
//! по расписанию. Опционально: путь к JSON конфигу первым аргументом.

use bevy::prelude::*;
use wayfarer_simulation::{
    create_headless_app, init_logger, log_info, spawn_character, spawn_fading_sprite,
    FadeScheduler, FadingSprite, MovementController, SimulationConfig, WanderDriver, ZoneEntered,
    ZoneKind,
};

const TICKS: u64 = 1000;
const SPRITE_COUNT: usize = 8;

/// Zone events по расписанию (tick → kind)
const ZONE_SCHEDULE: [(u64, ZoneKind); 6] = [
    (100, ZoneKind::SlipperyZone),
    (250, ZoneKind::RestoreSlipperyZone),
    (400, ZoneKind::SlowZone),
    (550, ZoneKind::RestoreSlowZone),
    (700, ZoneKind::InvertZone),
    (850, ZoneKind::RestoreZone),
];

fn main() {
    // Логгер нужен уже при загрузке конфига
    init_logger();

    let config = SimulationConfig::load_or_default(std::env::args().nth(1).as_deref());

    log_info(&format!("Starting Wayfarer headless simulation (seed: {})", config.seed));

    let mut app = create_headless_app(&config);

    let character = {
        let mut commands = app.world_mut().commands();
        let character = spawn_character(&mut commands, Vec3::ZERO, config.character);
        commands.entity(character).insert(WanderDriver::default());

        for i in 0..SPRITE_COUNT {
            let alpha = if i % 2 == 0 { 0.0 } else { 1.0 };
            spawn_fading_sprite(&mut commands, alpha, 1.0 - alpha);
        }
        character
    };
    app.world_mut().flush();

    for tick in 0..TICKS {
        for (at, kind) in ZONE_SCHEDULE {
            if at == tick {
                app.world_mut().send_event(ZoneEntered { entity: character, kind });
            }
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let position = world
                .get::<Transform>(character)
                .map(|t| t.translation)
                .unwrap_or_default();
            let phase = world
                .get::<MovementController>(character)
                .map(|c| if c.is_moving() { "Moving" } else { "Idle" })
                .unwrap_or("despawned");
            let report = world.resource::<FadeScheduler>().last_report;
            log_info(&format!(
                "Tick {}: character {} at {:?}, fade pass updated {} sprite(s)",
                tick, phase, position, report.updated
            ));
        }
    }

    let mut sprites = app.world_mut().query::<&FadingSprite>();
    let settled = sprites.iter(app.world()).filter(|s| s.is_settled()).count();
    log_info(&format!(
        "Simulation complete! {}/{} sprites settled",
        settled, SPRITE_COUNT
    ));
}
