//! JSON input scripts for the replay tool.
//!
//! A script is a JSON array of steps, replayed in order:
//!
//! ```json
//! [
//!   { "step": "touch", "event": { "action": "down",
//!       "pointers": [{ "id": 0, "x": 100, "y": 100 }], "time_ms": 0 } },
//!   { "step": "touch", "event": { "action": "up",
//!       "pointers": [{ "id": 0, "x": 100, "y": 100 }], "time_ms": 80 } },
//!   { "step": "poll", "now_ms": 400 },
//!   { "step": "key_down", "key": "dpad_right" },
//!   { "step": "sleep", "ms": 200 },
//!   { "step": "key_up", "key": "dpad_right" }
//! ]
//! ```
//!
//! `poll` fires gesture timers (long press, single-tap confirmation) as of a
//! script timestamp.  `sleep` waits in real time, which is what the d-pad
//! mouse mover needs to produce ticks.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use touchpad_core::{DeviceKey, TouchEvent};

/// Error type for loading scripts.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading script at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse script JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One replay step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ScriptStep {
    Touch { event: TouchEvent },
    KeyDown { key: DeviceKey },
    KeyUp { key: DeviceKey },
    Poll { now_ms: u64 },
    Sleep { ms: u64 },
}

/// Parses a script from JSON text.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] if the text is not a valid step array.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(text)?)
}

/// Reads and parses the script at `path`.
///
/// # Errors
///
/// Returns [`ScriptError::Io`] if the file cannot be read, and
/// [`ScriptError::Parse`] if its content is malformed.
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>, ScriptError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&text)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
