use std::collections::HashMap;

use crate::prelude::*;

/// In-memory stand-in for the surrounding server: a handful of named worlds,
/// each a chunk index plus a player list. The demo binary runs the sweep
/// against one of these, and the tests use it as the [`Host`] double.
pub struct Server {
    worlds: Vec<World>,
}

pub struct World {
    name: String,
    chunks: HashMap<(i32, i32), Chunk>,
    players: Vec<Player>,
    next_entity: u64,
}

#[derive(Default)]
struct Chunk {
    entities: Vec<(EntityId, EntityKind)>,
    /// A pinned chunk refuses unload, like a spawn chunk or one a plugin
    /// holds a ticket on.
    pinned: bool,
}

struct Player {
    name: String,
    position: (f64, f64, f64),
}

impl Server {
    pub fn new() -> Self {
        Self { worlds: vec![] }
    }

    pub fn add_world(&mut self, name: &str) -> &mut World {
        self.worlds.push(World {
            name: name.to_owned(),
            chunks: HashMap::new(),
            players: vec![],
            next_entity: 0,
        });
        self.worlds.last_mut().unwrap()
    }

    pub fn world_mut(&mut self, name: &str) -> Option<&mut World> {
        self.worlds.iter_mut().find(|w| w.name == name)
    }

    fn world(&self, name: &str) -> Option<&World> {
        self.worlds.iter().find(|w| w.name == name)
    }

    pub fn is_loaded(&self, world: &str, chunk: ChunkPos) -> bool {
        self.world(world)
            .is_some_and(|w| w.chunks.contains_key(&(chunk.x, chunk.z)))
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn load_chunk(&mut self, chunk: ChunkPos) {
        self.chunks.entry((chunk.x, chunk.z)).or_default();
    }

    pub fn pin_chunk(&mut self, chunk: ChunkPos) {
        if let Some(c) = self.chunks.get_mut(&(chunk.x, chunk.z)) {
            c.pinned = true;
        }
    }

    pub fn add_player(&mut self, name: &str, position: (f64, f64, f64)) {
        self.players.push(Player {
            name: name.to_owned(),
            position,
        });
    }

    pub fn move_player(&mut self, name: &str, position: (f64, f64, f64)) {
        if let Some(p) = self.players.iter_mut().find(|p| p.name == name) {
            p.position = position;
        }
    }

    /// Drop an entity into an already-loaded chunk.
    pub fn spawn(&mut self, chunk: ChunkPos, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        self.chunks
            .get_mut(&(chunk.x, chunk.z))
            .expect("spawning into an unloaded chunk")
            .entities
            .push((id, kind));
        id
    }
}

impl Host for Server {
    fn worlds(&self) -> Vec<String> {
        self.worlds.iter().map(|w| w.name.clone()).collect()
    }

    fn loaded_chunks(&self, world: &str) -> Vec<ChunkPos> {
        self.world(world).map_or(vec![], |w| {
            w.chunks.keys().map(|&(x, z)| ChunkPos::new(x, z)).collect()
        })
    }

    fn player_positions(&self, world: &str) -> Vec<(f64, f64)> {
        self.world(world).map_or(vec![], |w| {
            w.players
                .iter()
                .map(|p| (p.position.0, p.position.2))
                .collect()
        })
    }

    fn entities_in(&self, world: &str, chunk: ChunkPos) -> Vec<(EntityId, EntityKind)> {
        self.world(world)
            .and_then(|w| w.chunks.get(&(chunk.x, chunk.z)))
            .map_or(vec![], |c| c.entities.clone())
    }

    fn remove_entity(&mut self, world: &str, id: EntityId) -> Result<(), HostError> {
        let w = self
            .world_mut(world)
            .ok_or_else(|| HostError::UnknownWorld(world.to_owned()))?;
        for chunk in w.chunks.values_mut() {
            if let Some(i) = chunk.entities.iter().position(|&(e, _)| e == id) {
                chunk.entities.remove(i);
                return Ok(());
            }
        }
        Err(HostError::UnknownEntity(id))
    }

    fn unload_chunk(&mut self, world: &str, chunk: ChunkPos) -> Result<(), HostError> {
        let w = self
            .world_mut(world)
            .ok_or_else(|| HostError::UnknownWorld(world.to_owned()))?;
        match w.chunks.get(&(chunk.x, chunk.z)) {
            None => Err(HostError::ChunkNotLoaded(chunk)),
            Some(c) if c.pinned => Err(HostError::ChunkInUse(chunk)),
            Some(_) => {
                w.chunks.remove(&(chunk.x, chunk.z));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unload_drops_the_chunk_and_its_entities() {
        let mut server = Server::new();
        let chunk = ChunkPos::new(3, -4);
        {
            let w = server.add_world("w");
            w.load_chunk(chunk);
            w.spawn(chunk, EntityKind::Item);
        }
        server.unload_chunk("w", chunk).unwrap();
        assert!(!server.is_loaded("w", chunk));
        assert!(server.entities_in("w", chunk).is_empty());
    }

    #[test]
    fn pinned_chunks_refuse_unload() {
        let mut server = Server::new();
        let chunk = ChunkPos::new(0, 0);
        {
            let w = server.add_world("w");
            w.load_chunk(chunk);
            w.pin_chunk(chunk);
        }
        assert!(matches!(
            server.unload_chunk("w", chunk),
            Err(HostError::ChunkInUse(_))
        ));
        assert!(server.is_loaded("w", chunk));
    }

    #[test]
    fn removing_a_gone_entity_is_an_error() {
        let mut server = Server::new();
        let chunk = ChunkPos::new(0, 0);
        let id = {
            let w = server.add_world("w");
            w.load_chunk(chunk);
            w.spawn(chunk, EntityKind::Monster)
        };
        server.remove_entity("w", id).unwrap();
        assert!(matches!(
            server.remove_entity("w", id),
            Err(HostError::UnknownEntity(_))
        ));
    }

    #[test]
    fn unknown_worlds_enumerate_as_empty() {
        let server = Server::new();
        assert!(server.loaded_chunks("nope").is_empty());
        assert!(server.player_positions("nope").is_empty());
    }
}
