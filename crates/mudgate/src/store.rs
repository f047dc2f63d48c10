//! The JSON definition store: one file per room or session record.
//!
//! A directory of `*.json` files, one record each. A file that fails to
//! parse (missing required field, trailing comma, whatever) is a
//! malformed record: it is logged and skipped, never fatal to the
//! batch. Only an unreadable directory aborts loading.
//!
//! Files are visited in sorted name order so load order — and with it
//! the registry's broadcast enumeration order — is reproducible.

use std::path::{Path, PathBuf};

use mudgate_session::SessionDef;
use mudgate_world::RoomDef;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::MudgateError;

/// Reads every room definition under `dir`.
pub fn read_room_defs(dir: impl AsRef<Path>) -> Result<Vec<RoomDef>, MudgateError> {
    read_defs(dir.as_ref(), "room")
}

/// Reads every session definition under `dir`.
pub fn read_session_defs(
    dir: impl AsRef<Path>,
) -> Result<Vec<SessionDef>, MudgateError> {
    read_defs(dir.as_ref(), "session")
}

fn read_defs<T: DeserializeOwned>(
    dir: &Path,
    kind: &str,
) -> Result<Vec<T>, MudgateError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(MudgateError::Store)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut defs = Vec::new();
    for path in paths {
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable {kind} file");
                continue;
            }
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(def) => {
                debug!(path = %path.display(), "read {kind} definition");
                defs.push(def);
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "skipping malformed {kind} definition"
                );
            }
        }
    }
    Ok(defs)
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// A scratch directory under the system temp dir, removed on drop.
    /// Named per test so parallel tests don't collide.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(test: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("mudgate-store-{}-{test}", std::process::id()));
            let _ = std::fs::remove_dir_all(&dir);
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn write(&self, name: &str, contents: &str) {
            std::fs::write(self.0.join(name), contents).unwrap();
        }

        fn path(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_read_room_defs_sorted_by_file_name() {
        let dir = ScratchDir::new("rooms-sorted");
        dir.write("b.json", r#"{"id": "ballroom"}"#);
        dir.write("a.json", r#"{"id": "antechamber"}"#);

        let defs = read_room_defs(dir.path()).unwrap();

        let ids: Vec<&str> = defs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["antechamber", "ballroom"]);
    }

    #[test]
    fn test_read_room_defs_skips_malformed_file() {
        let dir = ScratchDir::new("rooms-malformed");
        dir.write("good.json", r#"{"id": "cellar"}"#);
        dir.write("bad.json", r#"{"name": "no id here"}"#);

        let defs = read_room_defs(dir.path()).unwrap();

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].id, "cellar");
    }

    #[test]
    fn test_read_defs_ignores_non_json_files() {
        let dir = ScratchDir::new("rooms-nonjson");
        dir.write("readme.txt", "not a definition");
        dir.write("room.json", r#"{"id": "cellar"}"#);

        let defs = read_room_defs(dir.path()).unwrap();

        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn test_read_session_defs_skips_record_missing_required_field() {
        let dir = ScratchDir::new("sessions-missing-field");
        dir.write("s1.json", r#"{"user_id": 1, "channel_id": 10}"#);
        dir.write("s2.json", r#"{"user_id": 2}"#);

        let defs = read_session_defs(dir.path()).unwrap();

        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].user_id, 1);
    }

    #[test]
    fn test_read_defs_unreadable_directory_is_fatal() {
        let result = read_room_defs("/definitely/not/a/real/path");
        assert!(matches!(result, Err(MudgateError::Store(_))));
    }
}
