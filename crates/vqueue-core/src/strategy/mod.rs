//! Reconstruction strategies
//!
//! Three ways to answer "what did the queue hold at version V":
//!
//! | strategy | write cost | query cost | resident history |
//! |---|---|---|---|
//! | [`Replay`] | O(1) | O(C − V) undo walk | log only |
//! | [`MemorySnapshot`] | O(n) copy | O(1) lookup | every version |
//! | [`DiskSnapshot`] | O(n) copy + load/save | load + lookup + save | none between steps |
//!
//! All three observe the same contents for every reachable version.

pub mod disk;
pub mod memory;
pub mod replay;

pub use disk::DiskSnapshot;
pub use memory::MemorySnapshot;
pub use replay::Replay;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VqError};
use crate::model::{Mutation, Version};
use crate::timeline::Timeline;

/// Selector for the three strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Undo mutations from the live state on demand
    #[default]
    #[serde(alias = "compute")]
    Replay,
    /// Keep a snapshot of every version in memory
    Memory,
    /// Keep every snapshot in external storage
    Disk,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Replay => "replay",
            StrategyKind::Memory => "memory",
            StrategyKind::Disk => "disk",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = VqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "replay" | "compute" => Ok(StrategyKind::Replay),
            "memory" => Ok(StrategyKind::Memory),
            "disk" => Ok(StrategyKind::Disk),
            other => Err(VqError::Config {
                message: format!("unknown strategy: {}", other),
            }),
        }
    }
}

/// Policy for materializing past versions
///
/// The timeline is owned by the caller and passed in on every call; a
/// strategy only owns whatever extra history it chooses to materialize.
pub trait Strategy {
    fn kind(&self) -> StrategyKind;

    /// Apply one mutation and record whatever history this strategy keeps
    ///
    /// Returns the version the mutation produced.
    ///
    /// # Errors
    ///
    /// `EmptyQueueUnderflow` from the queue, or a storage error for
    /// strategies that persist history.
    fn apply(&mut self, timeline: &mut Timeline, mutation: &Mutation) -> Result<Version>;

    /// Contents at `version`, front to back
    ///
    /// Never changes the timeline.
    ///
    /// # Errors
    ///
    /// `VersionNotFound` if `version` was never reached, or a storage error.
    fn query(&mut self, timeline: &Timeline, version: Version) -> Result<Vec<String>>;
}

pub(crate) fn version_not_found(requested: Version, timeline: &Timeline) -> VqError {
    VqError::VersionNotFound {
        requested,
        current: timeline.version(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("replay".parse::<StrategyKind>().unwrap(), StrategyKind::Replay);
        assert_eq!("COMPUTE".parse::<StrategyKind>().unwrap(), StrategyKind::Replay);
        assert_eq!("Disk".parse::<StrategyKind>().unwrap(), StrategyKind::Disk);
        assert!(matches!(
            "tape".parse::<StrategyKind>(),
            Err(VqError::Config { .. })
        ));
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [StrategyKind::Replay, StrategyKind::Memory, StrategyKind::Disk] {
            assert_eq!(kind.to_string().parse::<StrategyKind>().unwrap(), kind);
        }
    }
}
