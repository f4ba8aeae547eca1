//! Domain-specific assertion macros for logdex harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! pipeline invariant was violated and show the entries involved.

use logdex::ClassifiedEntry;

// ---------------------------------------------------------------------------
// Batch assertions
// ---------------------------------------------------------------------------

/// Assert the exact sequence of batch sizes a `RecordingProcessor` received.
///
/// ```rust
/// assert_batch_sizes!(processor, [10, 10, 5]);
/// ```
#[macro_export]
macro_rules! assert_batch_sizes {
    ($processor:expr, [$($size:expr),* $(,)?]) => {{
        let actual: Vec<usize> = $processor.batch_sizes();
        let expected: Vec<usize> = vec![$($size),*];
        if actual != expected {
            panic!(
                "assert_batch_sizes! failed:\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            );
        }
    }};
}

/// Assert that no forwarded entry's message contains `needle`.
///
/// ```rust
/// assert_none_contain!(processor.entries(), "/health");
/// ```
#[macro_export]
macro_rules! assert_none_contain {
    ($entries:expr, $needle:expr) => {{
        let needle: &str = $needle;
        let offending: Vec<&str> = $entries
            .iter()
            .map(|e| e.message.as_str())
            .filter(|m| m.contains(needle))
            .collect();
        if !offending.is_empty() {
            panic!(
                "assert_none_contain! failed: {} forwarded entries contain {:?}:\n  {:#?}",
                offending.len(),
                needle,
                offending
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Entry invariant helpers
// ---------------------------------------------------------------------------

/// Assert the context keys every classified entry must carry.
pub fn assert_entry_context(entry: &ClassifiedEntry, auto_indexed: bool) {
    assert!(
        entry.source_file().is_some_and(|s| !s.is_empty()),
        "entry must carry a non-empty source_file: {:?}",
        entry.message
    );
    assert!(
        entry.line_number().is_some_and(|n| n >= 1),
        "entry must carry a 1-based line_number: {:?}",
        entry.message
    );
    assert_eq!(
        entry.auto_indexed(),
        auto_indexed,
        "auto_indexed mismatch for {:?}",
        entry.message
    );
    assert!(
        !entry.category.is_empty(),
        "category must never be empty: {:?}",
        entry.message
    );
}
