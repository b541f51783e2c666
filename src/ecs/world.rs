//! World - the active map area and the actors on it

use crate::core::types::{ActorId, Tick};
use crate::entity::colonist::{Colonist, Faction};
use ahash::AHashMap;

/// The currently active map area
pub struct World {
    pub current_tick: u64,
    entity_registry: AHashMap<ActorId, usize>,
    colonists: Vec<Colonist>,
}

impl World {
    pub fn new() -> Self {
        Self {
            current_tick: 0,
            entity_registry: AHashMap::new(),
            colonists: Vec::new(),
        }
    }

    fn insert(&mut self, colonist: Colonist) -> ActorId {
        let id = colonist.id;
        self.entity_registry.insert(id, self.colonists.len());
        self.colonists.push(colonist);
        id
    }

    pub fn spawn_colonist(&mut self, name: impl Into<String>) -> ActorId {
        let colonist = Colonist::new(name, self.current_tick);
        self.insert(colonist)
    }

    pub fn spawn_guest(&mut self, name: impl Into<String>) -> ActorId {
        let mut colonist = Colonist::new(name, self.current_tick);
        colonist.faction = Faction::Visitor;
        colonist.guest = true;
        self.insert(colonist)
    }

    pub fn get(&self, id: ActorId) -> Option<&Colonist> {
        self.entity_registry.get(&id).map(|&i| &self.colonists[i])
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Colonist> {
        let index = *self.entity_registry.get(&id)?;
        self.colonists.get_mut(index)
    }

    pub fn colonists(&self) -> &[Colonist] {
        &self.colonists
    }

    pub fn entity_count(&self) -> usize {
        self.colonists.len()
    }

    pub fn tick(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }

    /// Player-controlled, non-guest colonists on this map
    pub fn free_colonists_mut(&mut self) -> impl Iterator<Item = &mut Colonist> + '_ {
        self.colonists.iter_mut().filter(|c| c.is_free())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guests_are_not_free() {
        let mut world = World::new();
        let ada = world.spawn_colonist("Ada");
        world.spawn_guest("Trader");

        let free: Vec<ActorId> = world.free_colonists_mut().map(|c| c.id).collect();
        assert_eq!(free, vec![ada]);
        assert_eq!(world.entity_count(), 2);
    }

    #[test]
    fn test_lookup_by_id() {
        let mut world = World::new();
        world.tick();
        let id = world.spawn_colonist("Bram");
        assert_eq!(world.get(id).unwrap().birth_tick, 1);
        world.get_mut(id).unwrap().drafted = true;
        assert!(world.get(id).unwrap().drafted);
        assert!(world.get(ActorId::new()).is_none());
    }
}
