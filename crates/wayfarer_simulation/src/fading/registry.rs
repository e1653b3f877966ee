//! Registry of fading sprite entities
//!
//! Явно принадлежащий миру Resource (не global static). Хранит Entity
//! handles — generational, поэтому despawned entity просто перестаёт
//! находиться через Query и scheduler его пропускает.

use bevy::prelude::*;

use super::components::FadingSprite;

#[derive(Resource, Debug, Clone, Default)]
pub struct FadingSpriteRegistry {
    entries: Vec<Entity>,
}

impl FadingSpriteRegistry {
    /// Повторная регистрация — no-op. Возвращает true если добавлен.
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.entries.push(entity);
        true
    }

    pub fn unregister(&mut self, entity: Entity) -> bool {
        let before = self.entries.len();
        self.entries.retain(|&e| e != entity);
        self.entries.len() != before
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entries.iter().copied()
    }

    /// Удалить handles, для которых `is_live` вернул false
    pub fn prune_stale(&mut self, mut is_live: impl FnMut(Entity) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|&entity| is_live(entity));
        before - self.entries.len()
    }
}

/// Система: регистрация только что созданных FadingSprite
///
/// Владельцы могут регистрировать и вручную — повторная регистрация безвредна.
pub fn register_fading_sprites(
    added: Query<Entity, Added<FadingSprite>>,
    mut registry: ResMut<FadingSpriteRegistry>,
) {
    for entity in added.iter() {
        registry.register(entity);
    }
}
