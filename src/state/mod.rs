//! State Module - state that outlives a page session
//!
//! - **Preferences** - persistent key/value store (theme choice)

mod preferences;

pub use preferences::{FileStore, MemoryStore, PreferenceStore};
