//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use crate::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Flat `key=value` store backed by a text file.
///
/// Each line holds one entry split at the first `=`; the value may itself contain `=`.
/// Lines without a separator are ignored when loading. Saving rewrites the whole file
/// in key order.
#[derive(Clone, Debug)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Creates an empty store bound to `path`. Nothing is read until [`ConfigStore::load`].
    pub fn new<P: Into<PathBuf>>(path: P) -> Self { Self { path: path.into(), values: BTreeMap::new() } }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path { &self.path }

    /// Merges the file contents into the store. A missing file loads nothing.
    /// Lines that are not valid UTF-8 are skipped like lines without a separator.
    pub fn load(&mut self) -> Result<(), UiError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, starting empty", self.path.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let mut loaded = 0;
        for raw in bytes.split(|b| *b == b'\n') {
            let Ok(line) = std::str::from_utf8(raw.strip_suffix(b"\r").unwrap_or(raw)) else {
                continue;
            };
            if let Some((key, value)) = line.split_once('=') {
                self.values.insert(key.to_string(), value.to_string());
                loaded += 1;
            }
        }
        log::info!("Loaded {} config entries from {}", loaded, self.path.display());
        Ok(())
    }

    /// Writes every entry to the backing file, replacing its contents.
    pub fn save(&self) -> Result<(), UiError> {
        let mut out = String::new();
        for (key, value) in &self.values {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;
        log::info!("Saved {} config entries to {}", self.values.len(), self.path.display());
        Ok(())
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> { self.values.get(key).map(String::as_str) }

    /// Returns the value stored under `key`, or an empty string.
    pub fn value(&self, key: &str) -> &str { self.get(key).unwrap_or("") }

    /// Inserts or replaces a value.
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) { self.values.insert(key.into(), value.into()); }

    /// Removes a value, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> { self.values.remove(key) }

    /// Returns the number of entries.
    pub fn len(&self) -> usize { self.values.len() }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Stores `items` under `key` with [`encode_list`].
    pub fn save_component_config<S: AsRef<str>>(&mut self, key: &str, items: &[S]) { self.set(key, encode_list(items)); }

    /// Reads the list stored under `key` with [`decode_list`]. Missing keys give an empty list.
    pub fn load_component_config(&self, key: &str) -> Vec<String> { decode_list(self.value(key)) }
}

/// Joins items with a `;` after each one.
pub fn encode_list<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item.as_ref());
        out.push(';');
    }
    out
}

/// Splits on `;`, dropping empty segments.
pub fn decode_list(encoded: &str) -> Vec<String> { encoded.split(';').filter(|s| !s.is_empty()).map(str::to_string).collect() }

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_roundtrip() {
        let items = ["a", "b", "c"];
        assert_eq!(encode_list(&items), "a;b;c;");
        assert_eq!(decode_list(&encode_list(&items)), vec!["a", "b", "c"]);
        let empty: [&str; 0] = [];
        assert_eq!(encode_list(&empty), "");
        assert!(decode_list("").is_empty());
        assert_eq!(decode_list("solo"), vec!["solo"]);
        assert_eq!(decode_list(";;x;;y"), vec!["x", "y"]);
    }

    #[test]
    fn missing_key_reads_empty() {
        let store = ConfigStore::new("unused.cfg");
        assert_eq!(store.get("nope"), None);
        assert_eq!(store.value("nope"), "");
        assert!(store.load_component_config("nope").is_empty());
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = ConfigStore::new(dir.path().join("absent.cfg"));
        store.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn load_splits_at_first_separator() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ui.cfg");
        std::fs::write(&path, "theme=dark\nbroken line\nexpr=a=b\n=anonymous\n").unwrap();
        let mut store = ConfigStore::new(&path);
        store.load().unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.value("theme"), "dark");
        assert_eq!(store.value("expr"), "a=b");
        assert_eq!(store.value(""), "anonymous");
        assert_eq!(store.get("broken line"), None);
    }

    #[test]
    fn load_skips_lines_with_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ui.cfg");
        std::fs::write(&path, b"good=1\nbad=\xff\xfe\r\nalso=2\r\n").unwrap();
        let mut store = ConfigStore::new(&path);
        store.load().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.value("good"), "1");
        assert_eq!(store.value("also"), "2");
        assert_eq!(store.get("bad"), None);
    }

    #[test]
    fn load_is_additive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ui.cfg");
        std::fs::write(&path, "a=file\n").unwrap();
        let mut store = ConfigStore::new(&path);
        store.set("a", "memory");
        store.set("b", "kept");
        store.load().unwrap();
        assert_eq!(store.value("a"), "file");
        assert_eq!(store.value("b"), "kept");
    }

    #[test]
    fn save_then_load_restores_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ui.cfg");
        let mut store = ConfigStore::new(&path);
        store.set("volume", "7");
        store.save_component_config("panel", &["10", "20", "300", "200"]);
        store.save().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "panel=10;20;300;200;\nvolume=7\n");

        let mut reloaded = ConfigStore::new(&path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.value("volume"), "7");
        assert_eq!(reloaded.load_component_config("panel"), vec!["10", "20", "300", "200"]);
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ui.cfg");
        std::fs::write(&path, "stale=1\n").unwrap();
        let mut store = ConfigStore::new(&path);
        store.set("fresh", "2");
        store.save().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh=2\n");
    }

    #[test]
    fn remove_drops_entry() {
        let mut store = ConfigStore::new("unused.cfg");
        store.set("k", "v");
        assert_eq!(store.remove("k").as_deref(), Some("v"));
        assert!(store.remove("k").is_none());
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let mut store = ConfigStore::new(dir.path());
        assert!(matches!(store.load(), Err(UiError::Io(_))));
    }
}
