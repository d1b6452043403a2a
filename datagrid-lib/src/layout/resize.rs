//! Drag-resize bookkeeping.

/// A resize gesture in progress.
///
/// Captures the width at drag start so every drag event computes
/// `start_width + delta_x` rather than accumulating rounding from previous
/// events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeDrag {
    pub key: String,
    pub start_width: u32,
}

impl ResizeDrag {
    pub fn new(key: impl Into<String>, start_width: u32) -> Self {
        Self {
            key: key.into(),
            start_width,
        }
    }

    /// Unclamped width for a horizontal drag distance.
    pub fn target_width(&self, delta_x: i64) -> i64 {
        self.start_width as i64 + delta_x
    }
}
