//! The clustered replay buffer.
use super::ClusteredReplayConfig;
use crate::{error::ReplayError, ReplayBufferBase};
use anyhow::Result;
use log::debug;
use rand::{
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    RngCore, SeedableRng,
};
use serde::{Deserialize, Serialize};

/// How clusters are weighted when drawing a batch.
#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
pub enum ClusterWeighting {
    /// Weight every non-empty cluster by the number of items it stores.
    Occupancy,
    /// Weight every non-empty cluster equally, regardless of occupancy.
    Balanced,
}

impl Default for ClusterWeighting {
    fn default() -> Self {
        Self::Occupancy
    }
}

/// State of a [`ClusteredReplay`] buffer: one child buffer state per cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteredReplayState<S> {
    clusters: Vec<S>,
}

impl<S> ClusteredReplayState<S> {
    /// Returns the number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Returns the per-cluster child states, in cluster index order.
    pub fn clusters(&self) -> &[S] {
        &self.clusters
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// A replay buffer that partitions items into clusters.
///
/// Every cluster is a replay buffer of its own, built from a shared child
/// buffer value, so clusters can themselves be clustered buffers. A
/// clustering function maps each item to the index of the cluster that
/// stores it.
///
/// # Adding
///
/// [`add`](ReplayBufferBase::add) evaluates the clustering function on the
/// item and forwards the item to the selected cluster. The function is
/// expected to be pure; it is evaluated exactly once per added item. An
/// index at or above the cluster count fails with
/// [`ReplayError::ClusterIndexOutOfRange`] without touching any cluster.
///
/// # Sampling
///
/// [`sample`](ReplayBufferBase::sample) draws each item of the batch in two
/// stages: first a cluster is chosen from a weighted distribution over the
/// non-empty clusters, then one item is drawn from that cluster by the child
/// buffer. With [`ClusterWeighting::Occupancy`] the distribution follows the
/// per-cluster item counts; with [`ClusterWeighting::Balanced`] every
/// non-empty cluster is equally likely, which lets sparsely populated
/// clusters contribute as much as crowded ones. Empty clusters are never
/// selected under either weighting.
///
/// ```mermaid
/// graph LR
///     A[Item] -->|clustering fn| K{index}
///     K --> B0[Cluster 0]
///     K --> B1[Cluster 1]
///     K --> B2[Cluster 2]
///     B0 -->|weighted choice| S[sample]
///     B1 -->|weighted choice| S
///     B2 -->|weighted choice| S
/// ```
///
/// # Examples
///
/// ```rust
/// use flashback::{ClusteredReplay, ReplayBufferBase, UniformReplay};
///
/// # fn main() -> anyhow::Result<()> {
/// // Partition f32 items by sign into two clusters of three slots each.
/// let child = UniformReplay::new(3)?;
/// let buffer = ClusteredReplay::new(2, child, |x: &f32| (*x < 0.0) as usize)?;
///
/// let mut state = buffer.init(&0.0f32)?;
/// for x in [1.0, -1.0, 2.0] {
///     state = buffer.add(state, &x)?;
/// }
/// assert_eq!(buffer.size(&state), 3);
/// assert_eq!(buffer.occupancies(&state), vec![2, 1]);
///
/// let batch = buffer.sample(&state, 42, 6)?;
/// assert_eq!(batch.len(), 6);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ClusteredReplay<B, F> {
    cluster_count: usize,
    buffer: B,
    clustering: F,
    weighting: ClusterWeighting,
}

impl<B, F> ClusteredReplay<B, F>
where
    B: ReplayBufferBase,
    F: Fn(&B::Item) -> usize,
{
    /// Creates a buffer partitioning items into `cluster_count` clusters.
    ///
    /// Every cluster stores its items in a buffer shaped like `buffer`;
    /// `clustering` maps an item to the index of its cluster. Sampling
    /// weights clusters by occupancy unless changed with
    /// [`weighting`](Self::weighting).
    ///
    /// Fails with [`ReplayError::Configuration`] if `cluster_count` is zero.
    pub fn new(cluster_count: usize, buffer: B, clustering: F) -> Result<Self> {
        if cluster_count == 0 {
            return Err(
                ReplayError::Configuration("cluster count must be at least 1".into()).into(),
            );
        }
        Ok(Self {
            cluster_count,
            buffer,
            clustering,
            weighting: ClusterWeighting::Occupancy,
        })
    }

    /// Creates a buffer from a configuration, a child buffer and a
    /// clustering function.
    pub fn build(config: &ClusteredReplayConfig, buffer: B, clustering: F) -> Result<Self> {
        debug!(
            "clustered replay buffer with {} clusters, {:?} weighting",
            config.cluster_count, config.weighting
        );
        Ok(Self::new(config.cluster_count, buffer, clustering)?.weighting(config.weighting))
    }

    /// Sets how clusters are weighted when drawing a batch.
    pub fn weighting(mut self, weighting: ClusterWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Returns the number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Returns the number of items stored in each cluster.
    pub fn occupancies(&self, state: &ClusteredReplayState<B::State>) -> Vec<usize> {
        state.clusters.iter().map(|s| self.buffer.size(s)).collect()
    }
}

impl<B, F> ReplayBufferBase for ClusteredReplay<B, F>
where
    B: ReplayBufferBase,
    F: Fn(&B::Item) -> usize,
{
    type Item = B::Item;
    type State = ClusteredReplayState<B::State>;

    fn init(&self, template: &B::Item) -> Result<Self::State> {
        let clusters = (0..self.cluster_count)
            .map(|_| self.buffer.init(template))
            .collect::<Result<Vec<_>>>()?;
        Ok(ClusteredReplayState { clusters })
    }

    fn add(&self, mut state: Self::State, item: &B::Item) -> Result<Self::State> {
        let k = (self.clustering)(item);
        if k >= self.cluster_count {
            return Err(ReplayError::ClusterIndexOutOfRange {
                index: k,
                cluster_count: self.cluster_count,
            }
            .into());
        }
        let cluster = state.clusters.remove(k);
        state.clusters.insert(k, self.buffer.add(cluster, item)?);
        Ok(state)
    }

    fn sample(&self, state: &Self::State, seed: u64, batch_size: usize) -> Result<Vec<B::Item>> {
        let weights: Vec<usize> = match self.weighting {
            ClusterWeighting::Occupancy => self.occupancies(state),
            ClusterWeighting::Balanced => self
                .occupancies(state)
                .iter()
                .map(|&occupancy| (occupancy > 0) as usize)
                .collect(),
        };
        if weights.iter().all(|&w| w == 0) {
            return Err(ReplayError::EmptyBuffer.into());
        }

        // One sub-stream drives cluster selection and a fresh seed is
        // derived for every child draw, so a root seed reproduces the same
        // batch and the draws within a cluster stay independent.
        let mut root = StdRng::seed_from_u64(seed);
        let mut selector = StdRng::seed_from_u64(root.next_u64());
        let weighted = WeightedIndex::new(&weights)?;

        let mut batch = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            let k = weighted.sample(&mut selector);
            batch.extend(self.buffer.sample(&state.clusters[k], root.next_u64(), 1)?);
        }
        Ok(batch)
    }

    fn size(&self, state: &Self::State) -> usize {
        self.occupancies(state).iter().sum()
    }
}
