use crate::errors::Result;
use crate::snapshot::Snapshot;

/// Seam for the external snapshot store adapter.
///
/// The engine never persists snapshots itself; callers that need history
/// implement this trait over whatever storage they use and hand the engine
/// ordered snapshot slices.
pub trait SnapshotStoreTrait: Send + Sync {
    /// All recorded snapshots, ordered chronologically.
    fn load_snapshots(&self) -> Result<Vec<Snapshot>>;

    /// The current live snapshot, if one exists.
    fn latest_snapshot(&self) -> Result<Option<Snapshot>>;
}
