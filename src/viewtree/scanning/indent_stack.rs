//! Indent stack
//!
//!     The chain of open nesting depths from the document root to the current line. The bottom
//!     is always depth 0 and can never be popped; depths strictly increase towards the top.
//!     Capacity is a resource bound, not a format rule: a push past it is refused and leaves
//!     the stack as it was.

use super::common::ScanError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentStack {
    levels: Vec<u32>,
    capacity: usize,
}

impl IndentStack {
    /// Fits a full stack in one snapshot without truncation.
    pub const DEFAULT_CAPACITY: usize = 255;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A stack holding at most `capacity` levels, the base level included.
    pub fn with_capacity(capacity: usize) -> Self {
        IndentStack {
            levels: vec![0],
            capacity: capacity.max(1),
        }
    }

    /// Rebuild a stack from stored levels, or `None` if they break the stack's invariants.
    pub fn from_levels(levels: Vec<u32>, capacity: usize) -> Option<Self> {
        if levels.first() != Some(&0) {
            return None;
        }
        if levels.windows(2).any(|pair| pair[0] >= pair[1]) {
            return None;
        }
        let capacity = capacity.max(1).max(levels.len());
        Some(IndentStack { levels, capacity })
    }

    /// Depth of the innermost open level.
    pub fn top(&self) -> u32 {
        self.levels.last().copied().unwrap_or(0)
    }

    /// Number of levels, the base level included. Never zero.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Number of open levels above the base.
    pub fn open_levels(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn is_base(&self) -> bool {
        self.levels.len() == 1
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn push(&mut self, depth: u32) -> Result<(), ScanError> {
        let top = self.top();
        if depth <= top {
            return Err(ScanError::NonIncreasingIndent { depth, top });
        }
        if self.levels.len() >= self.capacity {
            return Err(ScanError::CapacityExceeded {
                depth,
                capacity: self.capacity,
            });
        }
        self.levels.push(depth);
        Ok(())
    }

    /// Remove the innermost level. Returns `None` (and leaves the stack alone) at the base.
    pub fn pop(&mut self) -> Option<u32> {
        if self.is_base() {
            None
        } else {
            self.levels.pop()
        }
    }
}

impl Default for IndentStack {
    fn default() -> Self {
        Self::new()
    }
}
