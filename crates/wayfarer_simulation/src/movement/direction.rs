//! DirectionMapper: вектор движения → дискретное 4-way направление анимации

use bevy::prelude::*;

/// Дискретное направление анимации (WalkX / WalkY параметры аниматора)
///
/// Значения всегда в {-1, 0, 1}.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct WalkDirection {
    pub walk_x: i8,
    pub walk_y: i8,
}

impl WalkDirection {
    pub const NONE: Self = Self { walk_x: 0, walk_y: 0 };

    pub fn new(walk_x: i8, walk_y: i8) -> Self {
        Self { walk_x, walk_y }
    }
}

/// Вектор движения → (walk_x, walk_y)
///
/// Вертикальная ось инвертирована относительно горизонтальной:
/// `y < 0 → walk_y = +1`, `y > 0 → walk_y = -1` (screen-space конвенция
/// анимационных клипов). Это не баг, менять нельзя.
pub fn map_direction(direction: Vec3) -> WalkDirection {
    let walk_x = if direction.x < 0.0 {
        -1
    } else if direction.x > 0.0 {
        1
    } else {
        0
    };

    let walk_y = if direction.y < 0.0 {
        1
    } else if direction.y > 0.0 {
        -1
    } else {
        0
    };

    WalkDirection { walk_x, walk_y }
}
