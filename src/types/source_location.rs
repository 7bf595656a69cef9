use alloc::sync::Arc;

/// A byte range within the input string, kept alongside tokens and errors so
/// failures can point at the offending characters.
///
/// The input is shared via `Arc<str>`; locations are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// The full input string the range refers to.
    pub input: Arc<str>,
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SourceLocation {
    /// Create a location covering `[start, end)` of `input`.
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Merge two optional locations into the range spanning both, if they
    /// refer to the same input.
    #[must_use]
    pub fn range(first: Option<Self>, second: Option<Self>) -> Option<Self> {
        let first = first?;
        let second = second?;
        if !Arc::ptr_eq(&first.input, &second.input) {
            return None;
        }
        Some(Self {
            input: first.input,
            start: first.start.min(second.start),
            end: first.end.max(second.end),
        })
    }

    /// The text this location covers.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.input[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_spans_both_locations() {
        let input: Arc<str> = Arc::from("a+b");
        let a = SourceLocation::new(Arc::clone(&input), 0, 1);
        let b = SourceLocation::new(Arc::clone(&input), 2, 3);
        let merged = SourceLocation::range(Some(a), Some(b)).unwrap();
        assert_eq!((merged.start, merged.end), (0, 3));
        assert_eq!(merged.text(), "a+b");
    }

    #[test]
    fn range_rejects_different_inputs() {
        let a = SourceLocation::new(Arc::from("x"), 0, 1);
        let b = SourceLocation::new(Arc::from("y"), 0, 1);
        assert!(SourceLocation::range(Some(a), Some(b)).is_none());
    }
}
