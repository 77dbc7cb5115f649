//! Primitive id assignment
//!
//! Ids are handed out by an explicit counter owned by one conversion run,
//! so independent runs never share state.

/// Monotonic id source for one conversion run
#[derive(Debug, Clone, Default)]
pub struct PrimitiveIdGenerator {
    next: u64,
}

impl PrimitiveIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id as `"<prefix>_<n>"`
    pub fn next_id(&mut self, prefix: &str) -> String {
        let id = format!("{}_{}", prefix, self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}
