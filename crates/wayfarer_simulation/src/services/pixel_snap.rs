//! Pixel snap service (late pass)
//!
//! Округление позиции к пиксельной сетке. Запускается строго после
//! интеграции velocity, до презентации кадра (FrameSet::PixelSnap).

use bevy::prelude::*;

use super::physics::PhysicsBody;
use crate::movement::MovementController;

/// Opaque rounding service: позиция → ближайшая ячейка сетки
pub trait PixelSnap: Send + Sync + 'static {
    fn round_to_pixel(&self, position: Vec3) -> Vec3;
}

/// Пиксельная сетка с фиксированным pixels-per-unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelGrid {
    pub pixels_per_unit: f32,
}

impl Default for PixelGrid {
    fn default() -> Self {
        Self {
            pixels_per_unit: 32.0,
        }
    }
}

impl PixelSnap for PixelGrid {
    fn round_to_pixel(&self, position: Vec3) -> Vec3 {
        if self.pixels_per_unit <= 0.0 {
            return position;
        }
        let ppu = self.pixels_per_unit;
        // Z не округляем (sorting depth)
        Vec3::new(
            (position.x * ppu).round() / ppu,
            (position.y * ppu).round() / ppu,
            position.z,
        )
    }
}

/// Resource: активный pixel snap сервис
///
/// Нет ресурса → snapping выключен.
#[derive(Resource)]
pub struct PixelSnapper(pub Box<dyn PixelSnap>);

impl PixelSnapper {
    pub fn new(snap: impl PixelSnap) -> Self {
        Self(Box::new(snap))
    }
}

/// Система: snap финальной позиции персонажей к пиксельной сетке
///
/// Округляется только презентация: Transform выводится из непрерывной
/// позиции PhysicsBody, сама позиция тела не трогается.
pub fn snap_to_pixel_grid(
    snapper: Option<Res<PixelSnapper>>,
    mut query: Query<(&PhysicsBody, &mut Transform), With<MovementController>>,
) {
    let Some(snapper) = snapper else {
        return;
    };

    for (body, mut transform) in query.iter_mut() {
        let snapped = snapper.0.round_to_pixel(body.position_or(transform.translation));
        if snapped != transform.translation {
            transform.translation = snapped;
        }
    }
}
