pub mod fs;
pub mod http;
pub mod memory;
pub mod types;

pub use fs::FsLogArchive;
pub use http::{HttpInstanceApi, WebhookNotifier};
pub use memory::{MemoryInstanceApi, MemoryLogArchive, MemoryNotifier};
pub use types::{InstanceApi, LogArchive, Notifier};
