//! External collaborators — узкие интерфейсы к сервисам вне core
//!
//! - physics: PhysicsBody + velocity integrator (headless / rapier)
//! - animation: WalkAnimator, SpriteFacing sinks
//! - pixel_snap: PixelSnap trait, PixelGrid, late snap pass

pub mod animation;
pub mod physics;
pub mod pixel_snap;

pub use animation::*;
pub use physics::*;
pub use pixel_snap::*;
