//! Configuration of the uniform replay buffer.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`UniformReplay`](super::UniformReplay).
///
/// # Examples
///
/// ```rust
/// use flashback::UniformReplayConfig;
///
/// let config = UniformReplayConfig::default().capacity(10000);
/// ```
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct UniformReplayConfig {
    /// Maximum number of items that can be stored in the buffer.
    /// When the buffer is full, new items replace the oldest ones.
    pub capacity: usize,
}

impl Default for UniformReplayConfig {
    /// Creates a default configuration with `capacity = 10000`.
    fn default() -> Self {
        Self { capacity: 10000 }
    }
}

impl UniformReplayConfig {
    /// Sets the capacity of the buffer.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
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
