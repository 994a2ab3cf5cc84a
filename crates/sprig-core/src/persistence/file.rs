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

//! Local file storage used by windowed sessions.

use super::{SaveError, SaveSlot, SaveStorage};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Stores each slot in its own file under a root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `root`. Absolute slot paths ignore it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory relative slot names resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file `slot` maps to.
    pub fn path_for(&self, slot: &SaveSlot) -> PathBuf {
        self.root.join(slot.file())
    }
}

impl SaveStorage for FileStorage {
    /// Writes to a temporary file in the target directory and renames it
    /// over the target, so the old save survives any failure.
    fn store(&self, slot: &SaveSlot, data: &[u8]) -> Result<(), SaveError> {
        let path = self.path_for(slot);
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(data)?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| SaveError::Io(e.error))?;
        Ok(())
    }

    fn fetch(&self, slot: &SaveSlot) -> Result<Option<Vec<u8>>, SaveError> {
        match fs::read(self.path_for(slot)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let slot = SaveSlot::new("game.sav", "game");

        storage.store(&slot, b"abc").unwrap();
        assert_eq!(storage.fetch(&slot).unwrap(), Some(b"abc".to_vec()));

        storage.store(&slot, b"xy").unwrap();
        assert_eq!(storage.fetch(&slot).unwrap(), Some(b"xy".to_vec()));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.fetch(&SaveSlot::new("nope.sav", "nope")).unwrap(), None);
    }

    #[test]
    fn unreachable_directory_fails_without_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let slot = SaveSlot::new("missing/sub/dir/game.sav", "game");

        assert!(storage.store(&slot, b"abc").is_err());
        assert!(!storage.path_for(&slot).exists());
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn no_temp_files_are_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.store(&SaveSlot::new("a.sav", "a"), b"1").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
