/// Snapshot of a tree's item count and the state of its node arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: usize,
    pub slots: usize,
    pub pooled: usize,
    pub retired: usize,
    pub reclaimed: usize,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena slots currently holding no item.
    pub fn idle_slots(&self) -> usize {
        self.pooled + self.retired
    }

    pub fn avgfill_slots(&self) -> f64 {
        if self.slots == 0 {
            return 1.0;
        }
        self.size as f64 / self.slots as f64
    }
}
