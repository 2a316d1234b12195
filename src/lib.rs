//! Chunk hibernation for a running game server: every few seconds, find the
//! loaded chunks no player is near, clear out the transient entities there
//! (monsters, animals, dropped items, each behind its own flag) and hand the
//! chunks back to the host for unloading.
//!
//! The server itself stays on the other side of the [`Host`] trait; this
//! crate only reads its state and asks for removals/unloads. Scheduling is
//! behind [`ticker::Ticker`] for the same reason, so the sweep runs the same
//! under a real tick loop or a test harness.

pub mod command;
pub mod host;
pub mod settings;
pub mod sweep;
pub mod ticker;
pub mod world;

pub use host::{ChunkPos, EntityId, EntityKind, Host, HostError};
pub use settings::Settings;
pub use sweep::Hibernator;

mod prelude {
    pub(crate) use crate::host::*;
    pub(crate) use crate::settings::*;
}
