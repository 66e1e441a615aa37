pub mod clipboard;
pub mod credentials;
pub mod generate;

pub use credentials::{CredentialStore, FileStore, KeyValueStore, MemoryStore};
pub use generate::{HttpBackend, ScriptBackend, SubmitError};
