//! Movement events

use bevy::prelude::*;

use super::zones::ZoneKind;

/// Event: команда перемещения (displacement) для персонажа
///
/// Генерируется:
/// - Player input system
/// - AI / scripted driver (headless)
///
/// Обрабатывается:
/// - apply_move_commands: перезаписывает pending_command (последняя команда кадра побеждает)
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveCommand {
    pub entity: Entity,
    pub displacement: Vec3,
}

/// Event: персонаж вошёл в zone (от внешнего collision/trigger сервиса)
///
/// Exit events нет — эффекты level-triggered.
#[derive(Event, Debug, Clone, Copy)]
pub struct ZoneEntered {
    pub entity: Entity,
    pub kind: ZoneKind,
}
