//! Movement domain — state machine персонажа и zone модификаторы
//!
//! Содержит:
//! - DirectionMapper (map_direction → WalkDirection)
//! - ZoneEffects / ZonePolicy (invert, slip, slow)
//! - MovementController (Idle → Moving, smooth damp velocity)
//! - MoveCommand / ZoneEntered events
//! - Systems (apply_move_commands, apply_zone_events, tick_movement_controllers)

pub mod controller;
pub mod direction;
pub mod events;
pub mod systems;
pub mod zones;


pub use controller::*;
pub use direction::*;
pub use events::*;
pub use systems::*;
pub use zones::*;
