//! Critically damped spring filter (smooth damp)
//!
//! Одна и та же примитива используется для velocity персонажа и для alpha
//! fading спрайтов. Состояние фильтра (`velocity`) хранит вызывающий код
//! между кадрами.
//!
//! Формула: ω = 2 / smooth_time, x = ω·dt,
//! exp ≈ e^(-x) = 1 / (1 + x + 0.48x² + 0.235x³)

use bevy::math::Vec2;

/// Минимальный smooth_time (защита от деления на 0)
pub const MIN_SMOOTH_TIME: f32 = 0.0001;

#[inline]
fn decay(omega: f32, dt: f32) -> f32 {
    let x = omega * dt;
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Scalar smooth damp.
///
/// Двигает `current` к `target`; изменение за шаг ограничено
/// `max_speed * smooth_time`. Не перелетает target: при overshoot
/// возвращает ровно target.
///
/// `dt <= 0` — no-op (возвращает `current`, velocity не трогаем).
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let original_target = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Overshoot guard
    if (original_target - current > 0.0) == (output > original_target) {
        output = original_target;
        *velocity = (output - original_target) / dt;
    }

    output
}

/// Vec2 smooth damp (clamp изменения по длине вектора)
pub fn smooth_damp_vec2(
    current: Vec2,
    target: Vec2,
    velocity: &mut Vec2,
    smooth_time: f32,
    max_speed: f32,
    dt: f32,
) -> Vec2 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let original_target = target;
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp_length_max(max_change);
    let target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Overshoot guard: output оказался по другую сторону target
    if (original_target - current).dot(output - original_target) > 0.0 {
        output = original_target;
        *velocity = (output - original_target) / dt;
    }

    output
}
