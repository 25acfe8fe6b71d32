pub mod snapshot_model;
pub mod snapshot_traits;

pub use snapshot_model::Snapshot;
pub use snapshot_traits::SnapshotStoreTrait;
