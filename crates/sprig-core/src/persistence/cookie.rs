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

//! Cookie-backed storage used by embedded sessions.
//!
//! A save is written as one cookie assignment:
//! `"{name}save=<base64>; path=/; expires=<far future>"`. The embedding
//! host owns the actual cookie string; it is reached through [`CookieJar`].

use super::{SaveError, SaveSlot, SaveStorage};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

const COOKIE_EXPIRY: &str = "Fri, 31 Dec 9999 23:59:59 GMT";

/// The embedding host's cookie string.
pub trait CookieJar: Send + Sync {
    /// The current cookie string, `name=value` pairs separated by `"; "`.
    fn cookies(&self) -> Result<String, SaveError>;

    /// Applies one cookie assignment with its attributes.
    fn set_cookie(&self, assignment: &str) -> Result<(), SaveError>;
}

/// Stores saves base64-encoded inside host cookies.
#[derive(Clone)]
pub struct CookieStorage {
    jar: Arc<dyn CookieJar>,
}

impl CookieStorage {
    /// Creates a storage writing into `jar`.
    pub fn new(jar: Arc<dyn CookieJar>) -> Self {
        Self { jar }
    }

    fn cookie_name(slot: &SaveSlot) -> String {
        format!("{}save", slot.cookie())
    }
}

impl SaveStorage for CookieStorage {
    fn store(&self, slot: &SaveSlot, data: &[u8]) -> Result<(), SaveError> {
        let assignment = format!(
            "{}={}; path=/; expires={COOKIE_EXPIRY}",
            Self::cookie_name(slot),
            STANDARD.encode(data)
        );
        self.jar.set_cookie(&assignment)
    }

    fn fetch(&self, slot: &SaveSlot) -> Result<Option<Vec<u8>>, SaveError> {
        let cookies = self.jar.cookies()?;
        match find_cookie(&cookies, &Self::cookie_name(slot)) {
            Some(value) => Ok(Some(STANDARD.decode(value.trim())?)),
            None => Ok(None),
        }
    }
}

/// Finds `name` at the start of the cookie string or right after a `"; "`
/// separator, so `"xsave"` never matches inside `"myxsave"`.
fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies.split(';').map(str::trim_start).find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then_some(value)
    })
}

/// A cookie jar living in memory, for hosts without a browser behind them.
///
/// Attributes such as `path` and `expires` are accepted and dropped.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryCookieJar {
    fn cookies(&self) -> Result<String, SaveError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn set_cookie(&self, assignment: &str) -> Result<(), SaveError> {
        let pair = assignment.split(';').next().unwrap_or_default();
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| SaveError::Unavailable(format!("malformed cookie '{pair}'")))?;
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.trim().to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingJar {
        cookies: String,
        written: Mutex<Vec<String>>,
    }

    impl CookieJar for RecordingJar {
        fn cookies(&self) -> Result<String, SaveError> {
            Ok(self.cookies.clone())
        }

        fn set_cookie(&self, assignment: &str) -> Result<(), SaveError> {
            self.written.lock().unwrap().push(assignment.to_owned());
            Ok(())
        }
    }

    #[test]
    fn store_writes_one_assignment_with_attributes() {
        let jar = Arc::new(RecordingJar {
            cookies: String::new(),
            written: Mutex::default(),
        });
        let storage = CookieStorage::new(jar.clone());
        storage.store(&SaveSlot::new("a.sav", "hero"), b"hi").unwrap();

        let written = jar.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("herosave=aGk=; path=/; expires="));
    }

    #[test]
    fn fetch_matches_whole_names_only() {
        let jar = Arc::new(RecordingJar {
            cookies: "myherosave=AAAA; herosave=aGk=; other=1".to_owned(),
            written: Mutex::default(),
        });
        let storage = CookieStorage::new(jar);
        let data = storage.fetch(&SaveSlot::new("a.sav", "hero")).unwrap();
        assert_eq!(data, Some(b"hi".to_vec()));
    }

    #[test]
    fn fetch_at_string_start() {
        assert_eq!(find_cookie("herosave=x; b=y", "herosave"), Some("x"));
        assert_eq!(find_cookie("b=y", "herosave"), None);
        assert_eq!(find_cookie("", "herosave"), None);
    }

    #[test]
    fn corrupt_payload_is_a_decode_error() {
        let jar = Arc::new(RecordingJar {
            cookies: "herosave=***".to_owned(),
            written: Mutex::default(),
        });
        let storage = CookieStorage::new(jar);
        let err = storage.fetch(&SaveSlot::new("a.sav", "hero")).unwrap_err();
        assert!(matches!(err, SaveError::Decode(_)));
    }

    #[test]
    fn memory_jar_round_trips_through_storage() {
        let storage = CookieStorage::new(Arc::new(MemoryCookieJar::new()));
        let slot = SaveSlot::new("a.sav", "hero");
        assert_eq!(storage.fetch(&slot).unwrap(), None);

        storage.store(&slot, &[0, 1, 2, 255]).unwrap();
        storage.store(&slot, &[7]).unwrap();
        assert_eq!(storage.fetch(&slot).unwrap(), Some(vec![7]));
    }
}
