//! BotSpeak dictionary: the immutable code ↔ text store and the
//! collaborators that supply it.

pub mod builtin;
pub mod source;
pub mod store;

pub use source::{load_store, source_from_config, DictionarySource, JsonFileSource, StaticSource};
pub use store::DictionaryStore;
