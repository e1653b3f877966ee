//! FadeScheduler — batch fade pass, один раз за кадр
//!
//! Для каждого entity из registry:
//! - stale handle (despawned / без FadingSprite) → skip + prune после прохода
//! - Inactive → skip
//! - иначе alpha → target_alpha через smooth damp, цвет (1, 1, 1, alpha) → surface
//!
//! Апдейт каждого спрайта независим, порядок обхода не влияет на результат.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::components::{FadingSprite, Inactive, SurfaceTint};
use super::registry::FadingSpriteRegistry;
use crate::logger;

/// Параметры fade фильтра
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct FadeSettings {
    /// Smooth time (секунды)
    pub smoothing_time: f32,
    /// Максимальная скорость изменения alpha (в секунду)
    pub max_speed: f32,
}

impl Default for FadeSettings {
    fn default() -> Self {
        Self {
            smoothing_time: 0.1,
            max_speed: 1.0,
        }
    }
}

/// Итоги последнего прохода (для диагностики и тестов)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeReport {
    pub updated: usize,
    pub inactive: usize,
    pub stale: usize,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FadeScheduler {
    pub settings: FadeSettings,
    pub last_report: FadeReport,
}

impl FadeScheduler {
    pub fn new(settings: FadeSettings) -> Self {
        Self {
            settings,
            last_report: FadeReport::default(),
        }
    }
}

/// Система: fade pass по всем зарегистрированным спрайтам
pub fn tick_fading_sprites(
    mut scheduler: ResMut<FadeScheduler>,
    mut registry: ResMut<FadingSpriteRegistry>,
    mut sprites: Query<(&mut FadingSprite, Has<Inactive>)>,
    mut surfaces: Query<&mut SurfaceTint>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let settings = scheduler.settings;
    let mut report = FadeReport::default();
    let mut stale = Vec::new();

    for entity in registry.iter() {
        let Ok((mut sprite, inactive)) = sprites.get_mut(entity) else {
            stale.push(entity);
            continue;
        };

        if inactive {
            report.inactive += 1;
            continue;
        }

        let alpha = sprite.advance(delta, settings.smoothing_time, settings.max_speed);

        // Surface мог быть уничтожен раньше владельца — пропускаем только запись
        if let Ok(mut tint) = surfaces.get_mut(sprite.surface) {
            *tint = SurfaceTint::white_with_alpha(alpha);
        }
        report.updated += 1;
    }

    if !stale.is_empty() {
        for entity in &stale {
            registry.unregister(*entity);
        }
        logger::log(&format!("Fade pass pruned {} stale sprite(s)", stale.len()));
    }
    report.stale = stale.len();

    scheduler.last_report = report;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (World, Schedule) {
        let mut world = World::new();
        world.init_resource::<FadeScheduler>();
        world.init_resource::<FadingSpriteRegistry>();
        world.insert_resource(Time::<Fixed>::default());

        let mut schedule = Schedule::default();
        schedule.add_systems(tick_fading_sprites);
        (world, schedule)
    }

    fn step(world: &mut World, schedule: &mut Schedule) {
        world
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_secs_f32(DT));
        schedule.run(world);
    }

    fn spawn_sprite(world: &mut World, alpha: f32, target: f32) -> Entity {
        let entity = world.spawn(SurfaceTint::white_with_alpha(alpha)).id();
        let mut sprite = FadingSprite::with_alpha(entity, alpha);
        sprite.set_target(target);
        world.entity_mut(entity).insert(sprite);
        world.resource_mut::<FadingSpriteRegistry>().register(entity);
        entity
    }

    #[test]
    fn test_fade_settings_default() {
        let settings = FadeSettings::default();
        assert_eq!(settings.smoothing_time, 0.1);
        assert_eq!(settings.max_speed, 1.0);
    }

    #[test]
    fn test_fade_in_converges_without_overshoot() {
        let (mut world, mut schedule) = setup();
        let entity = spawn_sprite(&mut world, 0.0, 1.0);

        for _ in 0..600 {
            step(&mut world, &mut schedule);
            let alpha = world.get::<FadingSprite>(entity).expect("sprite").alpha;
            assert!(alpha <= 1.0 + 0.01, "alpha = {}", alpha);
        }

        let sprite = world.get::<FadingSprite>(entity).expect("sprite");
        assert!((sprite.alpha - 1.0).abs() < 0.01, "alpha = {}", sprite.alpha);
        let tint = world.get::<SurfaceTint>(entity).expect("tint");
        assert_eq!(*tint, SurfaceTint::white_with_alpha(sprite.alpha));
    }

    #[test]
    fn test_inactive_sprites_are_skipped() {
        let (mut world, mut schedule) = setup();
        let entity = spawn_sprite(&mut world, 0.0, 1.0);
        world.entity_mut(entity).insert(Inactive);

        for _ in 0..10 {
            step(&mut world, &mut schedule);
        }

        assert_eq!(world.get::<FadingSprite>(entity).expect("sprite").alpha, 0.0);
        let report = world.resource::<FadeScheduler>().last_report;
        assert_eq!(report.inactive, 1);
        assert_eq!(report.updated, 0);
        // Inactive остаётся в registry
        assert!(world.resource::<FadingSpriteRegistry>().contains(entity));
    }

    #[test]
    fn test_despawned_sprite_is_skipped_and_pruned() {
        let (mut world, mut schedule) = setup();
        let doomed = spawn_sprite(&mut world, 0.0, 1.0);
        let survivor = spawn_sprite(&mut world, 0.0, 1.0);

        step(&mut world, &mut schedule);
        let survivor_alpha = world.get::<FadingSprite>(survivor).expect("sprite").alpha;

        world.despawn(doomed);
        step(&mut world, &mut schedule);

        let report = world.resource::<FadeScheduler>().last_report;
        assert_eq!(report.stale, 1);
        assert_eq!(report.updated, 1);
        assert!(world.get::<FadingSprite>(survivor).expect("sprite").alpha > survivor_alpha);
        assert!(!world.resource::<FadingSpriteRegistry>().contains(doomed));
    }

    #[test]
    fn test_missing_surface_only_skips_color_write() {
        let (mut world, mut schedule) = setup();
        let surface = world.spawn(SurfaceTint::default()).id();
        let mut sprite = FadingSprite::new(surface);
        sprite.fade_out();
        let owner = world.spawn(sprite).id();
        world.resource_mut::<FadingSpriteRegistry>().register(owner);

        world.despawn(surface);
        step(&mut world, &mut schedule);

        assert!(world.get::<FadingSprite>(owner).expect("sprite").alpha < 1.0);
        assert_eq!(world.resource::<FadeScheduler>().last_report.updated, 1);
    }

    #[test]
    fn test_separate_surface_receives_alpha() {
        let (mut world, mut schedule) = setup();
        let surface = world.spawn(SurfaceTint::default()).id();
        let mut sprite = FadingSprite::new(surface);
        sprite.fade_out();
        let owner = world.spawn(sprite).id();
        world.resource_mut::<FadingSpriteRegistry>().register(owner);

        step(&mut world, &mut schedule);

        let alpha = world.get::<FadingSprite>(owner).expect("sprite").alpha;
        let tint = world.get::<SurfaceTint>(surface).expect("tint");
        assert_eq!(tint.a, alpha);
        assert_eq!((tint.r, tint.g, tint.b), (1.0, 1.0, 1.0));
    }

    #[test]
    fn test_updates_are_independent_of_order() {
        let (mut world_a, mut schedule_a) = setup();
        let (mut world_b, mut schedule_b) = setup();

        let a1 = spawn_sprite(&mut world_a, 0.0, 1.0);
        let a2 = spawn_sprite(&mut world_a, 1.0, 0.3);

        // Обратный порядок регистрации
        let b2 = world_b.spawn(SurfaceTint::default()).id();
        let mut s2 = FadingSprite::with_alpha(b2, 1.0);
        s2.set_target(0.3);
        world_b.entity_mut(b2).insert(s2);
        let b1 = world_b.spawn(SurfaceTint::default()).id();
        let mut s1 = FadingSprite::with_alpha(b1, 0.0);
        s1.set_target(1.0);
        world_b.entity_mut(b1).insert(s1);
        world_b.resource_mut::<FadingSpriteRegistry>().register(b2);
        world_b.resource_mut::<FadingSpriteRegistry>().register(b1);

        for _ in 0..30 {
            step(&mut world_a, &mut schedule_a);
            step(&mut world_b, &mut schedule_b);
        }

        assert_eq!(
            world_a.get::<FadingSprite>(a1).expect("sprite").alpha,
            world_b.get::<FadingSprite>(b1).expect("sprite").alpha
        );
        assert_eq!(
            world_a.get::<FadingSprite>(a2).expect("sprite").alpha,
            world_b.get::<FadingSprite>(b2).expect("sprite").alpha
        );
    }
}
