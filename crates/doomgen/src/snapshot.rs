//! `.doomgen.json` snapshots: a versioned JSON document holding the full
//! parameter state and, optionally, the rendered colored grid.

use crate::error::{BannerError, Result};
use crate::grid::ColoredGrid;
use crate::state::{BannerState, StatePatch};
use serde::{Deserialize, Serialize};

/// The only snapshot format version written or accepted.
pub const SNAPSHOT_VERSION: u64 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u64,
    state: &'a BannerState,
    #[serde(rename = "coloredLines", skip_serializing_if = "Option::is_none")]
    colored_lines: Option<&'a ColoredGrid>,
}

/// A parsed snapshot. The state arrives as a patch so that keys absent
/// from older files leave the importer's current values alone.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub version: u64,
    pub state: StatePatch,
    #[serde(rename = "coloredLines")]
    pub colored_lines: Option<ColoredGrid>,
}

/// Serialize a snapshot document (pretty-printed, trailing newline).
pub fn to_json(state: &BannerState, grid: Option<&ColoredGrid>) -> Result<String> {
    let doc = SnapshotOut {
        version: SNAPSHOT_VERSION,
        state,
        colored_lines: grid,
    };
    let mut json = serde_json::to_string_pretty(&doc)?;
    json.push('\n');
    Ok(json)
}

/// Parse a snapshot document, rejecting unknown format versions.
pub fn from_json(json: &str) -> Result<Snapshot> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(BannerError::SnapshotVersion(snapshot.version));
    }
    Ok(snapshot)
}
