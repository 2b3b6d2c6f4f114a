pub mod config;
pub mod sync;

pub use config::SyncConfig;
pub use sync::{HttpSource, PartSource, SyncReport, Syncer};
