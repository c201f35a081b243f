//! Configuration of the clustered replay buffer.
use super::ClusterWeighting;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`ClusteredReplay`](super::ClusteredReplay).
///
/// The configuration covers the serializable part of the buffer: the number
/// of clusters and the cluster weighting. The child buffer and the
/// clustering function are passed to
/// [`ClusteredReplay::build`](super::ClusteredReplay::build) separately.
///
/// # Examples
///
/// ```rust
/// use flashback::{ClusterWeighting, ClusteredReplayConfig};
///
/// let config = ClusteredReplayConfig::default()
///     .cluster_count(4)
///     .weighting(ClusterWeighting::Balanced);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct ClusteredReplayConfig {
    /// Number of clusters the items are partitioned into.
    pub cluster_count: usize,

    /// How clusters are weighted when drawing a batch.
    pub weighting: ClusterWeighting,
}

impl Default for ClusteredReplayConfig {
    /// Creates a default configuration with two clusters weighted by
    /// occupancy.
    fn default() -> Self {
        Self {
            cluster_count: 2,
            weighting: ClusterWeighting::Occupancy,
        }
    }
}

impl ClusteredReplayConfig {
    /// Sets the number of clusters.
    pub fn cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = cluster_count;
        self
    }

    /// Sets how clusters are weighted when drawing a batch.
    pub fn weighting(mut self, weighting: ClusterWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Loads the configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves the configuration to a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
