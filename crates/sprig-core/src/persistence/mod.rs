// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Save/load of caller state through an opaque byte stream.
//!
//! The game serializes itself through [`Persist`]; where the bytes end up is
//! decided by the [`SaveStorage`] the hosting mode selected: a file next to
//! the game for windowed sessions, a cookie string for embedded ones.
//! Failures never reach the frame loop: [`save_game`] and [`load_game`]
//! report them as `false`.

pub mod cookie;
pub mod file;

pub use cookie::{CookieJar, CookieStorage, MemoryCookieJar};
pub use file::FileStorage;

use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Game state that can be written to and read back from a byte stream.
pub trait Persist {
    /// Serializes the state.
    fn write_save(&self, stream: &mut dyn Write) -> io::Result<()>;

    /// Restores the state. Only called with a non-empty stream.
    fn read_save(&mut self, stream: &mut dyn Read) -> io::Result<()>;
}

/// An error raised by a [`SaveStorage`] backend.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Reading or writing the backing store failed.
    #[error("save storage I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The stored payload is not valid base64.
    #[error("save data is corrupt: {0}")]
    Decode(#[from] base64::DecodeError),
    /// The backing store cannot be reached at all.
    #[error("save storage is unavailable: {0}")]
    Unavailable(String),
}

/// Names a save in every backend: a file name and a cookie name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    file: PathBuf,
    cookie: String,
}

impl SaveSlot {
    /// Creates a slot. Relative file names resolve against the game's base
    /// path.
    pub fn new(file: impl Into<PathBuf>, cookie: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            cookie: cookie.into(),
        }
    }

    /// File name used by file storage.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Cookie name used by cookie storage.
    pub fn cookie(&self) -> &str {
        &self.cookie
    }
}

/// Where saved bytes live.
pub trait SaveStorage: Send + Sync {
    /// Replaces the stored bytes for `slot`. Must not leave partial data
    /// behind on failure.
    fn store(&self, slot: &SaveSlot, data: &[u8]) -> Result<(), SaveError>;

    /// Returns the stored bytes, `None` if nothing was ever stored.
    fn fetch(&self, slot: &SaveSlot) -> Result<Option<Vec<u8>>, SaveError>;
}

/// Serializes `game` and stores it. Returns `false` on any failure.
///
/// The whole payload is serialized in memory first, so a failing
/// `write_save` never touches the store.
pub fn save_game<P: Persist + ?Sized>(storage: &dyn SaveStorage, game: &P, slot: &SaveSlot) -> bool {
    let mut buffer = Vec::new();
    if let Err(e) = game.write_save(&mut buffer) {
        log::warn!("Serializing save '{}' failed: {e}", slot.cookie());
        return false;
    }
    match storage.store(slot, &buffer) {
        Ok(()) => {
            log::info!("Saved {} bytes to slot '{}'", buffer.len(), slot.file().display());
            true
        }
        Err(e) => {
            log::warn!("Storing save '{}' failed: {e}", slot.file().display());
            false
        }
    }
}

/// Fetches the saved bytes and restores `game` from them.
///
/// Returns `false` without calling `read_save` when nothing is stored or the
/// stored stream is empty, and `false` when decoding fails.
pub fn load_game<P: Persist + ?Sized>(storage: &dyn SaveStorage, game: &mut P, slot: &SaveSlot) -> bool {
    let data = match storage.fetch(slot) {
        Ok(Some(data)) if !data.is_empty() => data,
        Ok(_) => {
            log::debug!("No save data in slot '{}'", slot.file().display());
            return false;
        }
        Err(e) => {
            log::warn!("Fetching save '{}' failed: {e}", slot.file().display());
            return false;
        }
    };
    match game.read_save(&mut Cursor::new(data)) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Decoding save '{}' failed: {e}", slot.file().display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStorage {
        data: Mutex<Option<Vec<u8>>>,
    }

    impl SaveStorage for MemoryStorage {
        fn store(&self, _slot: &SaveSlot, data: &[u8]) -> Result<(), SaveError> {
            *self.data.lock().unwrap() = Some(data.to_vec());
            Ok(())
        }

        fn fetch(&self, _slot: &SaveSlot) -> Result<Option<Vec<u8>>, SaveError> {
            Ok(self.data.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    struct Score {
        value: u32,
        reads: u32,
        fail_write: bool,
    }

    impl Persist for Score {
        fn write_save(&self, stream: &mut dyn Write) -> io::Result<()> {
            if self.fail_write {
                return Err(io::Error::other("refusing to write"));
            }
            stream.write_all(&self.value.to_le_bytes())
        }

        fn read_save(&mut self, stream: &mut dyn Read) -> io::Result<()> {
            self.reads += 1;
            let mut bytes = [0; 4];
            stream.read_exact(&mut bytes)?;
            self.value = u32::from_le_bytes(bytes);
            Ok(())
        }
    }

    fn slot() -> SaveSlot {
        SaveSlot::new("score.sav", "score")
    }

    #[test]
    fn save_then_load_restores_state() {
        let storage = MemoryStorage::default();
        let saved = Score {
            value: 42,
            ..Default::default()
        };
        assert!(save_game(&storage, &saved, &slot()));

        let mut loaded = Score::default();
        assert!(load_game(&storage, &mut loaded, &slot()));
        assert_eq!(loaded.value, 42);
    }

    #[test]
    fn failing_writer_leaves_store_untouched() {
        let storage = MemoryStorage::default();
        let game = Score {
            fail_write: true,
            ..Default::default()
        };
        assert!(!save_game(&storage, &game, &slot()));
        assert!(storage.data.lock().unwrap().is_none());
    }

    #[test]
    fn empty_or_missing_stream_skips_read_save() {
        let storage = MemoryStorage::default();
        let mut game = Score::default();
        assert!(!load_game(&storage, &mut game, &slot()));

        storage.store(&slot(), &[]).unwrap();
        assert!(!load_game(&storage, &mut game, &slot()));
        assert_eq!(game.reads, 0);
    }

    #[test]
    fn truncated_stream_is_a_failed_load() {
        let storage = MemoryStorage::default();
        storage.store(&slot(), &[1, 2]).unwrap();

        let mut game = Score::default();
        assert!(!load_game(&storage, &mut game, &slot()));
        assert_eq!(game.reads, 1);
    }
}
