//! The sync pass and the tag propagation pass.
//!
//! Everything here is generic over the two `gloss-core` traits — no HTTP,
//! no SQL. The orchestrator walks one linear pass: read the watermark,
//! merge remote changes into the store, record the new watermark, then
//! propagate mapped tags through highlight notes.

mod error;
mod mapping;
mod propagate;
mod run;

pub use error::{Error, Result};
pub use mapping::TagMapping;
pub use propagate::{MARKER, PropagationReport, TagPropagation};
pub use run::{SyncReport, Syncer};
