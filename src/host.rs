use thiserror::Error;

/// Chunk coordinate on a world's horizontal plane. Chunks are 16 blocks to a
/// side; the host addresses loading and unloading at this granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing the given block coordinate. Arithmetic shift keeps
    /// the divide-by-16 rounding toward negative infinity, matching the
    /// host's convention for negative coordinates.
    pub fn of_block(x: i32, z: i32) -> Self {
        Self { x: x >> 4, z: z >> 4 }
    }

    /// Chunk containing a world position (block = floor of the position).
    pub fn of_position(x: f64, z: f64) -> Self {
        Self::of_block(x.floor() as i32, z.floor() as i32)
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.z)
    }
}

/// Opaque handle the host hands out for each entity; only valid within the
/// world it was enumerated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// Category tag the host attaches to every enumerated entity. The sweep
/// never inspects concrete entity types; classification happens on the host
/// side of this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Monster,
    Animal,
    Item,
    /// Anything else (players excluded by the host). Never removed.
    Other,
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("world `{0}` is not active")]
    UnknownWorld(String),
    #[error("chunk {0} is not loaded")]
    ChunkNotLoaded(ChunkPos),
    #[error("chunk {0} is in use")]
    ChunkInUse(ChunkPos),
    #[error("entity {0:?} is gone")]
    UnknownEntity(EntityId),
}

/// Everything the sweep consumes from the surrounding server. The host owns
/// all world, chunk, player and entity state; this side only reads it and
/// issues removal/unload requests, which the host services synchronously.
pub trait Host {
    /// Names of the currently active worlds.
    fn worlds(&self) -> Vec<String>;

    /// Chunks currently loaded in `world`. Unknown world: empty.
    fn loaded_chunks(&self, world: &str) -> Vec<ChunkPos>;

    /// Horizontal block positions of every connected player in `world`.
    fn player_positions(&self, world: &str) -> Vec<(f64, f64)>;

    /// Entities currently present in one chunk, with their category tags.
    fn entities_in(&self, world: &str, chunk: ChunkPos) -> Vec<(EntityId, EntityKind)>;

    fn remove_entity(&mut self, world: &str, id: EntityId) -> Result<(), HostError>;

    /// Non-forced unload request; the host applies its default save
    /// behaviour and may refuse.
    fn unload_chunk(&mut self, world: &str, chunk: ChunkPos) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_to_chunk_shifts_by_four() {
        assert_eq!(ChunkPos::of_block(0, 0), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::of_block(15, 15), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::of_block(16, 31), ChunkPos::new(1, 1));
        assert_eq!(ChunkPos::of_block(96, -96), ChunkPos::new(6, -6));
    }

    #[test]
    fn negative_positions_floor_toward_negative_infinity() {
        // block -1 lives in chunk -1, not chunk 0
        assert_eq!(ChunkPos::of_position(-0.5, -0.5), ChunkPos::new(-1, -1));
        assert_eq!(ChunkPos::of_position(-16.0, -17.0), ChunkPos::new(-1, -2));
        assert_eq!(ChunkPos::of_position(0.9, 15.9), ChunkPos::new(0, 0));
    }
}
