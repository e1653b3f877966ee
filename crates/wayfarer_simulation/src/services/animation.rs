//! Animation playback / sprite surface sinks
//!
//! Core только пушит значения; клипы и рендер — внешние сервисы.

use bevy::prelude::*;

use crate::movement::WalkDirection;

/// Параметры аниматора WalkX / WalkY
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct WalkAnimator {
    pub walk_x: i8,
    pub walk_y: i8,
}

impl WalkAnimator {
    pub fn set(&mut self, walk: WalkDirection) {
        self.walk_x = walk.walk_x;
        self.walk_y = walk.walk_y;
    }

    pub fn direction(&self) -> WalkDirection {
        WalkDirection::new(self.walk_x, self.walk_y)
    }
}

/// Горизонтальный facing спрайта (true → смотрит вправо)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct SpriteFacing {
    pub flip_x: bool,
}
