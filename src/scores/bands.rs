//! Ordered boundary tables shared by every calculator.
//!
//! Clinical point tables are published as ranges ("160-199 mg/dL", "score
//! 109-140"). Each table here lists ascending lower bounds; a value belongs
//! to the last band whose bound it reaches. Values below the first bound
//! clamp to the first band, values beyond the last clamp to the last, so
//! lookups never fail.

/// One entry in an ordered lookup table. Applies from `lower` (inclusive)
/// up to the next entry's bound.
#[derive(Debug, Clone, Copy)]
pub struct Band<T> {
    pub lower: f64,
    pub value: T,
}

/// Shorthand for table literals.
pub const fn band<T>(lower: f64, value: T) -> Band<T> {
    Band { lower, value }
}

/// Return the value of the last band whose lower bound is at or below `x`.
///
/// `table` must be non-empty and sorted ascending by `lower`.
pub fn find_band<T>(table: &[Band<T>], x: f64) -> &T {
    let mut selected = &table[0];
    for entry in &table[1..] {
        if x >= entry.lower {
            selected = entry;
        }
    }
    &selected.value
}

/// Clamp a computed percentage into the 0-100 range reports promise.
pub fn clamp_percentage(pct: f64) -> f64 {
    pct.clamp(0.0, 100.0)
}
