//! Config Shape - When a Chart Must Be Rebuilt
//!
//! Chart instances can patch data and colours in place, but not their axis
//! layout or dataset count. The shape captures exactly those two properties.

/// Structural properties of a chart configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigShape {
    pub series_count: usize,
    pub secondary_axis: bool,
}

impl ConfigShape {
    pub fn new(series_count: usize, secondary_axis: bool) -> Self {
        Self {
            series_count,
            secondary_axis,
        }
    }
}

/// Whether moving from `prev` to `next` requires destroying the instance
pub fn needs_recreate(prev: &ConfigShape, next: &ConfigShape) -> bool {
    prev.series_count != next.series_count || prev.secondary_axis != next.secondary_axis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_shape_patches_in_place() {
        assert!(!needs_recreate(&ConfigShape::new(1, false), &ConfigShape::new(1, false)));
        assert!(!needs_recreate(&ConfigShape::new(2, true), &ConfigShape::new(2, true)));
    }

    #[test]
    fn series_count_change_recreates() {
        assert!(needs_recreate(&ConfigShape::new(1, false), &ConfigShape::new(2, false)));
        assert!(needs_recreate(&ConfigShape::new(2, false), &ConfigShape::new(0, false)));
    }

    #[test]
    fn axis_set_change_recreates() {
        assert!(needs_recreate(&ConfigShape::new(1, false), &ConfigShape::new(1, true)));
        assert!(needs_recreate(&ConfigShape::new(1, true), &ConfigShape::new(1, false)));
    }
}
