//! Fading sprite components

use bevy::prelude::*;

use crate::math::smooth_damp;

/// Спрайт с плавным fade alpha → target_alpha
///
/// `surface` — non-owning ссылка на render surface (SurfaceTint).
/// Surface может исчезнуть раньше спрайта — тогда запись цвета пропускается.
///
/// Инвариант: 0 ≤ alpha ≤ 1, 0 ≤ target_alpha ≤ 1
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FadingSprite {
    pub alpha: f32,
    pub target_alpha: f32,
    /// Состояние smooth damp фильтра (opaque для вызывающего кода)
    pub damp_velocity: f32,
    pub surface: Entity,
}

impl FadingSprite {
    /// Видимый спрайт без fade
    pub fn new(surface: Entity) -> Self {
        Self::with_alpha(surface, 1.0)
    }

    pub fn with_alpha(surface: Entity, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self {
            alpha,
            target_alpha: alpha,
            damp_velocity: 0.0,
            surface,
        }
    }

    pub fn set_target(&mut self, target_alpha: f32) {
        self.target_alpha = target_alpha.clamp(0.0, 1.0);
    }

    pub fn fade_in(&mut self) {
        self.set_target(1.0);
    }

    pub fn fade_out(&mut self) {
        self.set_target(0.0);
    }

    pub fn is_settled(&self) -> bool {
        self.alpha == self.target_alpha
    }

    /// Один шаг фильтра, возвращает новую alpha
    pub fn advance(&mut self, dt: f32, smoothing_time: f32, max_speed: f32) -> f32 {
        self.alpha = smooth_damp(
            self.alpha,
            self.target_alpha,
            &mut self.damp_velocity,
            smoothing_time,
            max_speed,
            dt,
        )
        .clamp(0.0, 1.0);
        self.alpha
    }
}

/// Цвет render surface (RGBA)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SurfaceTint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for SurfaceTint {
    fn default() -> Self {
        Self::WHITE
    }
}

impl SurfaceTint {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// RGB на полной интенсивности, меняется только alpha
    pub fn white_with_alpha(alpha: f32) -> Self {
        Self { a: alpha, ..Self::WHITE }
    }
}

/// Marker: владелец спрайта выключен (scheduler пропускает)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Inactive;

/// Spawn helper: спрайт, который сам является своей render surface
///
/// В registry попадает через register_fading_sprites (Added<FadingSprite>).
pub fn spawn_fading_sprite(commands: &mut Commands, alpha: f32, target_alpha: f32) -> Entity {
    let entity = commands.spawn(SurfaceTint::white_with_alpha(alpha.clamp(0.0, 1.0))).id();
    let mut sprite = FadingSprite::with_alpha(entity, alpha);
    sprite.set_target(target_alpha);
    commands.entity(entity).insert(sprite);
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_clamped() {
        let mut sprite = FadingSprite::with_alpha(Entity::PLACEHOLDER, 3.0);
        assert_eq!(sprite.alpha, 1.0);

        sprite.set_target(-0.5);
        assert_eq!(sprite.target_alpha, 0.0);
        sprite.fade_in();
        assert_eq!(sprite.target_alpha, 1.0);
    }

    #[test]
    fn test_new_sprite_is_settled() {
        let sprite = FadingSprite::new(Entity::PLACEHOLDER);
        assert!(sprite.is_settled());
        assert_eq!(sprite.alpha, 1.0);
    }

    #[test]
    fn test_advance_fades_out() {
        let mut sprite = FadingSprite::new(Entity::PLACEHOLDER);
        sprite.fade_out();

        let alpha = sprite.advance(1.0 / 60.0, 0.1, 1.0);
        assert!(alpha < 1.0 && alpha > 0.0, "alpha = {}", alpha);
        assert!(sprite.damp_velocity < 0.0);
    }

    #[test]
    fn test_white_with_alpha() {
        let tint = SurfaceTint::white_with_alpha(0.25);
        assert_eq!((tint.r, tint.g, tint.b, tint.a), (1.0, 1.0, 1.0, 0.25));
    }
}
