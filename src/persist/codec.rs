//! Snapshot codec: `MatchState` to and from an opaque string blob.
//!
//! Layout: URL-safe unpadded base64 of a bincode `SnapshotEnvelope`
//! (`version` + bincode payload of the state). Decoding checks the version
//! and the match invariants, so corrupt or foreign blobs are rejected
//! rather than restored half-valid.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bincode::Options;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::core::{MatchState, Preferences};

/// Current envelope version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot decoding errors.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("snapshot is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("snapshot payload could not be decoded: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    #[error("snapshot violates match invariants: {0}")]
    Invalid(&'static str),
}

#[derive(Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u32,
    payload: Vec<u8>,
}

/// Fixed-width little-endian bincode that refuses trailing bytes.
fn wire() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encode a snapshot as an opaque string.
pub fn encode_snapshot(state: &MatchState) -> Result<String, CodecError> {
    let envelope = SnapshotEnvelope {
        version: SNAPSHOT_VERSION,
        payload: wire().serialize(state)?,
    };
    let bytes = wire().serialize(&envelope)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decode a snapshot produced by `encode_snapshot`.
pub fn decode_snapshot(blob: &str) -> Result<MatchState, CodecError> {
    let bytes = URL_SAFE_NO_PAD.decode(blob.trim())?;
    let envelope: SnapshotEnvelope = wire().deserialize(&bytes)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(CodecError::UnsupportedVersion(envelope.version));
    }

    let state: MatchState = wire().deserialize(&envelope.payload)?;
    validate(&state)?;
    Ok(state)
}

/// Restore the stored snapshot, or build a fresh match if there is none or
/// it cannot be decoded.
#[must_use]
pub fn restore_or_new(blob: Option<&str>, preferences: &Preferences) -> MatchState {
    let Some(blob) = blob.filter(|b| !b.trim().is_empty()) else {
        return MatchState::new(preferences);
    };

    match decode_snapshot(blob) {
        Ok(state) => state,
        Err(err) => {
            warn!(error = %err, "discarding undecodable match snapshot");
            MatchState::new(preferences)
        }
    }
}

fn validate(state: &MatchState) -> Result<(), CodecError> {
    let ids: FxHashSet<_> = state.players.iter().map(|p| p.id).collect();
    if ids.len() != state.players.len() {
        return Err(CodecError::Invalid("duplicate player id"));
    }

    if state.current_player_index >= state.players.len().max(1) {
        return Err(CodecError::Invalid("current player index out of range"));
    }

    if let Some(winner) = state.winner {
        if !ids.contains(&winner) {
            return Err(CodecError::Invalid("winner is not a player"));
        }
    }

    if state.current_turn_score != state.turn.total_points() {
        return Err(CodecError::Invalid("turn score out of sync"));
    }

    if state.round_number == 0 {
        return Err(CodecError::Invalid("round number must start at 1"));
    }

    if !state.game_started {
        if state.game_ended || state.winner.is_some() {
            return Err(CodecError::Invalid("match ended before it started"));
        }
        return Ok(());
    }

    let decided = state.winner.is_some() || state.active_count() < 2;
    if state.game_ended != decided {
        return Err(CodecError::Invalid("match end flag disagrees with its result"));
    }

    if !state.game_ended && state.current_player().map_or(true, |p| p.eliminated) {
        return Err(CodecError::Invalid("active player is eliminated"));
    }

    Ok(())
}
