//! Fading domain — batch fade спрайтов
//!
//! - components: FadingSprite, SurfaceTint, Inactive
//! - registry: FadingSpriteRegistry (Entity handles, stale-tolerant)
//! - scheduler: FadeScheduler + tick_fading_sprites

pub mod components;
pub mod registry;
pub mod scheduler;

pub use components::*;
pub use registry::*;
pub use scheduler::*;
