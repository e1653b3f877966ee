//! Frame ordering (FixedUpdate)
//!
//! Порядок внутри одного кадра:
//! 1. Zones — MoveCommand + ZoneEntered events → состояние персонажа
//! 2. Movement — tick state machine каждого персонажа
//! 3. Integrate — velocity → position (headless или rapier)
//! 4. PixelSnap — snap финальной позиции (строго после интеграции)
//! 5. Fade — один глобальный fade pass
//!
//! Схема одна и та же для App (SimulationPlugin) и для голого World в тестах.

use bevy::prelude::*;

use crate::fading::{register_fading_sprites, tick_fading_sprites, FadeScheduler, FadingSpriteRegistry};
use crate::movement::{
    apply_move_commands, apply_zone_events, tick_movement_controllers, MoveCommand, ZoneEntered,
};
use crate::services::{integrate_velocity_to_transform, snap_to_pixel_grid, sync_velocity_to_rapier};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Zones,
    Movement,
    Integrate,
    PixelSnap,
    Fade,
}

/// Регистрирует sets и системы кадра в schedule
pub fn configure_frame_schedule(schedule: &mut Schedule) {
    schedule.configure_sets(
        (
            FrameSet::Zones,
            FrameSet::Movement,
            FrameSet::Integrate,
            FrameSet::PixelSnap,
            FrameSet::Fade,
        )
            .chain(),
    );

    schedule.add_systems((
        (apply_move_commands, apply_zone_events)
            .chain()
            .in_set(FrameSet::Zones),
        tick_movement_controllers.in_set(FrameSet::Movement),
        (sync_velocity_to_rapier, integrate_velocity_to_transform)
            .chain()
            .in_set(FrameSet::Integrate),
        snap_to_pixel_grid.in_set(FrameSet::PixelSnap),
        (register_fading_sprites, tick_fading_sprites)
            .chain()
            .in_set(FrameSet::Fade),
    ));
}

/// Ресурсы, нужные системам кадра (для World без App)
///
/// Уже существующие ресурсы не перезаписываются.
pub fn init_frame_resources(world: &mut World) {
    world.init_resource::<Events<MoveCommand>>();
    world.init_resource::<Events<ZoneEntered>>();
    world.init_resource::<FadingSpriteRegistry>();
    world.init_resource::<FadeScheduler>();
    world.init_resource::<Time<Fixed>>();
}
