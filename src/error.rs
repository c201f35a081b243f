//! Errors in the library.
use crate::ItemShape;
use thiserror::Error;

/// Errors in the library.
///
/// Every variant is a precondition violation. Operations never mutate a
/// state in place, so a failed call cannot leave a corrupted buffer behind.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Invalid buffer configuration, such as a zero capacity or cluster count.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// An item's shape disagrees with the shape established at buffer init.
    #[error("Item shape {found} does not match the buffer item shape {expected}")]
    ShapeMismatch {
        /// Shape established by the template item.
        expected: ItemShape,
        /// Shape of the offending item.
        found: ItemShape,
    },

    /// The clustering function returned an index outside `[0, cluster_count)`.
    #[error("Clustering function returned {index} for a buffer with {cluster_count} clusters")]
    ClusterIndexOutOfRange {
        /// Index returned by the clustering function.
        index: usize,
        /// Number of clusters in the buffer.
        cluster_count: usize,
    },

    /// Sampling was requested from a buffer with zero occupancy.
    #[error("Cannot sample from an empty replay buffer")]
    EmptyBuffer,
}
