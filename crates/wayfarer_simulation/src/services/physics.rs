//! Velocity integrator service
//!
//! MovementController считает только target velocity и пишет её в
//! PhysicsBody. Интеграцию делает один из двух путей:
//! - headless: `integrate_velocity_to_transform` (position += velocity * dt)
//! - с rapier: `sync_velocity_to_rapier` (XY plane, rapier сам двигает тело)
//!
//! Headless путь хранит непрерывную позицию в `PhysicsBody::position`.
//! Transform — только презентация (pixel snap может его округлить).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

/// Физическое тело персонажа (velocity в плоскости XY)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec2,
    /// Непрерывная позиция (None → ещё не интегрировали, берём Transform)
    pub position: Option<Vec3>,
}

impl PhysicsBody {
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            position: None,
        }
    }

    /// Симулируемая позиция тела, `fallback` — до первой интеграции
    pub fn position_or(&self, fallback: Vec3) -> Vec3 {
        self.position.unwrap_or(fallback)
    }
}

/// Система интеграции velocity → Transform (headless режим, без Rapier)
///
/// Тела с rapier Velocity пропускаем — их двигает rapier.
pub fn integrate_velocity_to_transform(
    mut query: Query<(&mut PhysicsBody, &mut Transform), Without<Velocity>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut body, mut transform) in query.iter_mut() {
        let position = body.position_or(transform.translation) + body.velocity.extend(0.0) * delta;
        body.position = Some(position);
        transform.translation = position;
    }
}

/// Система синхронизации PhysicsBody.velocity → rapier Velocity
///
/// Z компонента обнуляется (2D персонаж в плоскости XY).
pub fn sync_velocity_to_rapier(mut query: Query<(&PhysicsBody, &mut Velocity)>) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity.extend(0.0);
    }
}
