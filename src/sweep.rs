use std::path::PathBuf;

use crate::prelude::*;

/// The hibernation sweep. Owns the current settings and the path they came
/// from; all world state belongs to the [`Host`] each sweep is handed.
///
/// One sweep runs to completion inside a single scheduler callback, so there
/// is never a sweep racing another sweep or a reload.
pub struct Hibernator {
    settings: Settings,
    settings_path: PathBuf,
}

impl Hibernator {
    /// Load settings from `path` (writing the defaults first if the file is
    /// missing). A broken settings file is not fatal: it is logged and the
    /// sweep runs on defaults until a `reload` fixes it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let settings_path = path.into();
        let settings = match Settings::load(&settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!(
                    "failed to load settings from {}: {e}; running on defaults",
                    settings_path.display()
                );
                Settings::default()
            }
        };
        log::info!("settings: {settings:?}");
        Self {
            settings,
            settings_path,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Re-read the settings file and replace all six values at once. On any
    /// error the previous values stay in force. An already-running ticker
    /// keeps its old interval; the new one applies on the next start.
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        self.settings = Settings::load(&self.settings_path)?;
        log::info!("settings: {:?}", self.settings);
        Ok(())
    }

    /// One full pass: every loaded chunk in every active world is checked
    /// against the player positions seen right now, and the far-away ones
    /// are swept and (optionally) unloaded. Chunks are handled
    /// independently; a failure in one is logged and the rest still run.
    pub fn sweep_all(&self, host: &mut dyn Host) {
        for world in host.worlds() {
            let players: Vec<ChunkPos> = host
                .player_positions(&world)
                .iter()
                .map(|&(x, z)| ChunkPos::of_position(x, z))
                .collect();
            for chunk in host.loaded_chunks(&world) {
                if !self.is_far_from_players(&players, chunk) {
                    continue;
                }
                let removed = self.clean_entities(host, &world, chunk);
                if removed > 0 {
                    log::info!("removed {removed} entities in chunk {chunk} of '{world}'");
                }
                if self.settings.unload_chunks {
                    match host.unload_chunk(&world, chunk) {
                        Ok(()) => log::info!("unloaded chunk {chunk} in world '{world}'"),
                        Err(e) => log::warn!("could not unload chunk {chunk} in '{world}': {e}"),
                    }
                }
            }
        }
    }

    /// A chunk is far when no player is within `chunk_range` chunks on both
    /// axes. The radius is square on purpose (max-norm, not Euclidean): the
    /// host loads chunks in squares, and switching metrics would change
    /// which edge chunks hibernate.
    pub fn is_far_from_players(&self, players: &[ChunkPos], chunk: ChunkPos) -> bool {
        let range = self.settings.chunk_range;
        for player in players {
            let dx = (player.x - chunk.x).abs();
            let dz = (player.z - chunk.z).abs();
            if dx <= range && dz <= range {
                return false;
            }
        }
        true
    }

    /// Remove every entity in `chunk` whose category flag is enabled.
    /// Strictly an allow-list: a kind without a flag ([`EntityKind::Other`])
    /// is left alone no matter what. Returns how many went.
    pub fn clean_entities(&self, host: &mut dyn Host, world: &str, chunk: ChunkPos) -> u32 {
        let mut removed = 0;
        for (id, kind) in host.entities_in(world, chunk) {
            let enabled = match kind {
                EntityKind::Monster => self.settings.remove_monsters,
                EntityKind::Animal => self.settings.remove_animals,
                EntityKind::Item => self.settings.remove_items,
                EntityKind::Other => false,
            };
            if !enabled {
                continue;
            }
            match host.remove_entity(world, id) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("could not remove entity in chunk {chunk} of '{world}': {e}"),
            }
        }
        removed
    }
}
