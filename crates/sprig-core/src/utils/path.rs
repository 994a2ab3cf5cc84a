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

//! Filesystem locations.

use std::path::PathBuf;

/// The directory holding the running executable, falling back to the
/// working directory when it cannot be determined.
pub fn executable_dir() -> PathBuf {
    let dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));
    match dir {
        Some(dir) => dir,
        None => {
            log::warn!("Cannot locate the executable; using the working directory as base path");
            PathBuf::from(".")
        }
    }
}
