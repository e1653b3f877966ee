//! Fade integration test
//!
//! FadeScheduler внутри полного кадра: auto-регистрация через Added,
//! convergence, despawn между кадрами, Inactive владельцы.

use std::time::Duration;

use bevy::prelude::*;
use wayfarer_simulation::*;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 0.01;

fn create_frame() -> (World, Schedule) {
    let mut world = World::new();
    init_frame_resources(&mut world);

    let mut schedule = Schedule::default();
    configure_frame_schedule(&mut schedule);

    (world, schedule)
}

fn step(world: &mut World, schedule: &mut Schedule) {
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(DT));
    schedule.run(world);
}

fn spawn_sprite(world: &mut World, alpha: f32, target: f32) -> Entity {
    let entity = spawn_fading_sprite(&mut world.commands(), alpha, target);
    world.flush();
    entity
}

fn alpha_of(world: &World, entity: Entity) -> f32 {
    world.get::<FadingSprite>(entity).expect("sprite").alpha
}

#[test]
fn test_spawned_sprites_are_registered_automatically() {
    let (mut world, mut schedule) = create_frame();
    let a = spawn_sprite(&mut world, 0.0, 1.0);
    let b = spawn_sprite(&mut world, 1.0, 0.0);

    step(&mut world, &mut schedule);

    let registry = world.resource::<FadingSpriteRegistry>();
    assert!(registry.contains(a));
    assert!(registry.contains(b));
    assert_eq!(registry.len(), 2);

    // Спрайт обновлён в том же кадре, в котором зарегистрирован
    assert!(alpha_of(&world, a) > 0.0);
    assert!(alpha_of(&world, b) < 1.0);
}

#[test]
fn test_fade_in_converges_within_epsilon() {
    let (mut world, mut schedule) = create_frame();
    let sprite = spawn_sprite(&mut world, 0.0, 1.0);

    for _ in 0..300 {
        step(&mut world, &mut schedule);
        let alpha = alpha_of(&world, sprite);
        assert!(alpha <= 1.0 + EPSILON, "overshoot: alpha = {}", alpha);
    }

    let alpha = alpha_of(&world, sprite);
    assert!((alpha - 1.0).abs() < EPSILON, "alpha = {}", alpha);

    let tint = world.get::<SurfaceTint>(sprite).expect("tint");
    assert_eq!((tint.r, tint.g, tint.b), (1.0, 1.0, 1.0));
    assert_eq!(tint.a, alpha);
}

#[test]
fn test_alpha_rate_is_limited_by_max_speed() {
    let (mut world, mut schedule) = create_frame();
    let sprite = spawn_sprite(&mut world, 0.0, 1.0);

    // max_speed = 1.0 alpha/sec → за 0.5 сек не больше ~0.5
    for _ in 0..30 {
        step(&mut world, &mut schedule);
    }
    let alpha = alpha_of(&world, sprite);
    assert!(alpha > 0.0 && alpha < 0.6, "alpha = {}", alpha);
}

#[test]
fn test_destroying_sprite_between_ticks_is_tolerated() {
    let (mut world, mut schedule) = create_frame();
    let sprites: Vec<Entity> = (0..5).map(|_| spawn_sprite(&mut world, 0.0, 1.0)).collect();
    step(&mut world, &mut schedule);

    world.despawn(sprites[2]);

    // Эталон: такой же спрайт в отдельном мире без despawn
    let (mut reference_world, mut reference_schedule) = create_frame();
    let reference = spawn_sprite(&mut reference_world, 0.0, 1.0);
    step(&mut reference_world, &mut reference_schedule);
    step(&mut reference_world, &mut reference_schedule);

    step(&mut world, &mut schedule);

    for (i, &entity) in sprites.iter().enumerate() {
        if i == 2 {
            assert!(world.get_entity(entity).is_err());
            continue;
        }
        assert_eq!(alpha_of(&world, entity), alpha_of(&reference_world, reference));
    }
    assert!(!world.resource::<FadingSpriteRegistry>().contains(sprites[2]));
    assert_eq!(world.resource::<FadingSpriteRegistry>().len(), 4);
}

#[test]
fn test_inactive_owner_pauses_fade() {
    let (mut world, mut schedule) = create_frame();
    let sprite = spawn_sprite(&mut world, 0.0, 1.0);
    step(&mut world, &mut schedule);
    let paused_at = alpha_of(&world, sprite);

    world.entity_mut(sprite).insert(Inactive);
    for _ in 0..20 {
        step(&mut world, &mut schedule);
    }
    assert_eq!(alpha_of(&world, sprite), paused_at);
    assert_eq!(world.resource::<FadeScheduler>().last_report.inactive, 1);

    world.entity_mut(sprite).remove::<Inactive>();
    step(&mut world, &mut schedule);
    assert!(alpha_of(&world, sprite) > paused_at);
}

#[test]
fn test_retargeting_mid_fade() {
    let (mut world, mut schedule) = create_frame();
    let sprite = spawn_sprite(&mut world, 0.0, 1.0);

    for _ in 0..30 {
        step(&mut world, &mut schedule);
    }
    let peak = alpha_of(&world, sprite);

    world.get_mut::<FadingSprite>(sprite).expect("sprite").fade_out();
    for _ in 0..300 {
        step(&mut world, &mut schedule);
        let alpha = alpha_of(&world, sprite);
        assert!((0.0..=1.0).contains(&alpha));
    }

    let alpha = alpha_of(&world, sprite);
    assert!(alpha < peak);
    assert!(alpha < EPSILON, "alpha = {}", alpha);
}

#[test]
fn test_custom_fade_settings() {
    let (mut world, mut schedule) = create_frame();
    world.insert_resource(FadeScheduler::new(FadeSettings {
        smoothing_time: 0.1,
        max_speed: 100.0,
    }));
    let fast = spawn_sprite(&mut world, 0.0, 1.0);

    for _ in 0..30 {
        step(&mut world, &mut schedule);
    }
    // Без ограничения скорости 0.5 сек ≫ smoothing_time
    assert!(alpha_of(&world, fast) > 0.95);
}
