//! Persistence collaborators.
//!
//! The core performs no I/O. This module supplies what the owning
//! application needs to keep a match across restarts:
//! - `codec`: snapshot to opaque string and back, tolerant of garbage
//! - `store`: where blobs and preferences live

pub mod codec;
pub mod store;

pub use codec::{decode_snapshot, encode_snapshot, restore_or_new, CodecError, SNAPSHOT_VERSION};
pub use store::{FileStore, MemoryStore, PreferencesStore, SnapshotStore, StorageError};
