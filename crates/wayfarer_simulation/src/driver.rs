//! Headless input driver — детерминированный "игрок" для симуляции без input
//!
//! Каждые `interval` секунд выбирает новое 4-way направление (или стоит),
//! между сменами держит команду как зажатую клавишу (MoveCommand каждый тик).

use bevy::prelude::*;
use rand::Rng;

use crate::movement::MoveCommand;
use crate::DeterministicRng;

const DIRECTIONS: [Vec3; 5] = [Vec3::ZERO, Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y];

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct WanderDriver {
    /// Время между сменами направления (секунды)
    pub interval: f32,
    pub timer: f32,
    pub current: Vec3,
}

impl Default for WanderDriver {
    fn default() -> Self {
        Self {
            interval: 1.5,
            timer: 0.0,
            current: Vec3::ZERO,
        }
    }
}

/// Система: WanderDriver → MoveCommand events
pub fn drive_wanderers(
    mut drivers: Query<(Entity, &mut WanderDriver)>,
    mut rng: ResMut<DeterministicRng>,
    mut move_commands: EventWriter<MoveCommand>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut driver) in drivers.iter_mut() {
        driver.timer -= delta;
        if driver.timer <= 0.0 {
            driver.timer = driver.interval;
            driver.current = DIRECTIONS[rng.rng.gen_range(0..DIRECTIONS.len())];
        }

        move_commands.write(MoveCommand {
            entity,
            displacement: driver.current,
        });
    }
}
