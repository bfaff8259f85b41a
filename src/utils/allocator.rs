use serde::{Deserialize, Serialize};
use std::fmt;

/// Block identifier handed out by a world's [`BlockIdAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct BlockId(pub u64);

impl BlockId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Placeholder id carried by blocks that have not been added to a world.
    pub fn is_null(&self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self(u64::MAX)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

/// Monotonic, world-scoped id generator. Ids are never reused unless the
/// owning world explicitly resets it while empty.
#[derive(Debug, Clone, Default)]
pub struct BlockIdAllocator {
    next: u64,
}

impl BlockIdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn allocate(&mut self) -> BlockId {
        let id = BlockId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out since creation or the last reset.
    pub fn issued(&self) -> u64 {
        self.next
    }

    pub(crate) fn reset(&mut self) {
        self.next = 0;
    }
}
