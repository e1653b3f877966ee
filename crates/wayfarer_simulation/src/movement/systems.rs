//! Movement systems (FixedUpdate)
//!
//! Порядок внутри кадра задаётся [`crate::schedule::FrameSet`]:
//! Zones (команды + zone events) → Movement (tick) → Integrate → PixelSnap.

use bevy::prelude::*;

use super::controller::MovementController;
use super::events::{MoveCommand, ZoneEntered};
use super::zones::{ZoneEffects, ZonePolicy};
use crate::logger;
use crate::services::{PhysicsBody, SpriteFacing, WalkAnimator};

/// Система: MoveCommand events → pending_command
///
/// Команда живёт один кадр: без нового события pending_command = ZERO
/// (клавиша отпущена). Команда для despawned entity молча пропускается.
pub fn apply_move_commands(
    mut events: EventReader<MoveCommand>,
    mut controllers: Query<&mut MovementController>,
) {
    for mut controller in controllers.iter_mut() {
        if controller.pending_command != Vec3::ZERO {
            controller.pending_command = Vec3::ZERO;
        }
    }

    for event in events.read() {
        if let Ok(mut controller) = controllers.get_mut(event.entity) {
            controller.issue_command(event.displacement);
        }
    }
}

/// Система: ZoneEntered events → ZoneEffects
pub fn apply_zone_events(
    mut events: EventReader<ZoneEntered>,
    mut effects: Query<&mut ZoneEffects>,
) {
    for event in events.read() {
        let Ok(mut zone_effects) = effects.get_mut(event.entity) else {
            logger::log(&format!(
                "Zone event {:?} for missing entity {:?}, skipped",
                event.kind, event.entity
            ));
            continue;
        };

        zone_effects.on_zone_enter(event.kind);
    }
}

/// Система: tick state machine для каждого персонажа
///
/// Пишет velocity в PhysicsBody (integrator применит её в Integrate set),
/// WalkX/WalkY в аниматор и flip_x в спрайт. Отсутствующий аниматор или
/// спрайт — no-op.
pub fn tick_movement_controllers(
    mut query: Query<(
        &mut MovementController,
        &ZoneEffects,
        &Transform,
        &mut PhysicsBody,
        Option<&mut WalkAnimator>,
        Option<&mut SpriteFacing>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut controller, zones, transform, mut body, animator, facing) in query.iter_mut() {
        let position = body.position_or(transform.translation);
        let output = controller.tick(delta, position, body.velocity, zones);

        if let Some(velocity) = output.velocity {
            body.velocity = velocity;
        }

        if let (Some(walk), Some(mut animator)) = (output.walk, animator) {
            animator.set(walk);
        }

        if let (Some(flip_x), Some(mut facing)) = (output.flip_x, facing) {
            facing.flip_x = flip_x;
        }
    }
}
