//! Local persistent storage for the session credentials.

mod atomic_json;
mod credential_storage;
mod memory;

pub use atomic_json::AtomicJsonFile;
pub use credential_storage::FileCredentialStore;
pub use memory::MemoryCredentialStore;
