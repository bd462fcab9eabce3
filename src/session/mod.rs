//! Ephemeral session storage for the submitted idea.
//!
//! The idea crosses the submit → run boundary through a fixed-key JSON file
//! under the state directory. Absence at pipeline start is an input error
//! sending the user back to idea entry.

use anyhow::{bail, Context};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The serialized field name is the fixed session key.
#[derive(Serialize, Deserialize)]
struct Session {
    startup_idea: String,
}

fn session_path(out_dir: &Path) -> PathBuf {
    out_dir.join("session.json")
}

pub fn store_idea(out_dir: &Path, idea: &str) -> anyhow::Result<()> {
    let idea = idea.trim();
    if idea.is_empty() {
        bail!("idea must not be empty");
    }
    fs::create_dir_all(out_dir)?;
    let payload = serde_json::to_string_pretty(&Session {
        startup_idea: idea.to_string(),
    })?;
    fs::write(session_path(out_dir), payload).context("writing session file")?;
    Ok(())
}

pub fn load_idea(out_dir: &Path) -> anyhow::Result<String> {
    let path = session_path(out_dir);
    if !path.exists() {
        bail!("no idea submitted yet; run with --idea \"<your startup idea>\" first");
    }
    let raw = fs::read_to_string(&path).context("reading session file")?;
    let session: Session = serde_json::from_str(&raw).context("parsing session file")?;
    if session.startup_idea.trim().is_empty() {
        bail!("stored idea is empty; run with --idea \"<your startup idea>\"");
    }
    Ok(session.startup_idea)
}

pub fn clear(out_dir: &Path) -> anyhow::Result<()> {
    let path = session_path(out_dir);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_an_idea() {
        let dir = tempfile::tempdir().unwrap();
        store_idea(dir.path(), "  A meal planning app  ").unwrap();
        assert_eq!(load_idea(dir.path()).unwrap(), "A meal planning app");
    }

    #[test]
    fn empty_idea_is_rejected_at_submission() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_idea(dir.path(), "   ").is_err());
    }

    #[test]
    fn missing_session_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_idea(dir.path()).is_err());
    }

    #[test]
    fn clear_removes_the_session() {
        let dir = tempfile::tempdir().unwrap();
        store_idea(dir.path(), "an idea worth keeping").unwrap();
        clear(dir.path()).unwrap();
        assert!(load_idea(dir.path()).is_err());
    }
}
