use crate::error::{Result, SampleError};

/// Slots added each time an unbounded reservoir fills up.
pub const GROWTH_INCREMENT: usize = 10_000;

/// Byte offsets of selected record starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetReservoir {
    offsets: Vec<u64>,
    capacity: usize,
}

impl OffsetReservoir {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut offsets = Vec::new();
        offsets
            .try_reserve_exact(capacity)
            .map_err(|_| SampleError::Allocation(capacity))?;
        Ok(Self { offsets, capacity })
    }

    /// Reallocates to hold at least `new_capacity` offsets, keeping contents.
    pub fn grow(&mut self, new_capacity: usize) -> Result<()> {
        let additional = new_capacity.saturating_sub(self.offsets.len());
        self.offsets
            .try_reserve_exact(additional)
            .map_err(|_| SampleError::Allocation(new_capacity))?;
        self.capacity = self.capacity.max(new_capacity);
        Ok(())
    }

    /// Appends within the current capacity. Returns `false` when full.
    pub fn push(&mut self, offset: u64) -> bool {
        if self.is_full() {
            return false;
        }
        self.offsets.push(offset);
        true
    }

    /// Appends, growing by [`GROWTH_INCREMENT`] slots whenever full.
    pub fn push_growing(&mut self, offset: u64) -> Result<()> {
        if self.is_full() {
            self.grow(self.capacity + GROWTH_INCREMENT)?;
        }
        self.offsets.push(offset);
        Ok(())
    }

    pub fn set(&mut self, index: usize, offset: u64) {
        self.offsets[index] = offset;
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.offsets.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.offsets.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn truncate(&mut self, len: usize) {
        self.offsets.truncate(len);
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.offsets
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.offsets
    }
}
