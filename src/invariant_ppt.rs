//! Runtime invariant checks with contract-test support.
//!
//! Grid accessors, kernel construction and the stacking engine guard their
//! hard invariants with [`assert_invariant!`]. Each checked message is
//! recorded in a thread-local set, so a test can prove that a guard actually
//! ran on the code path it exercised.
//!
//! ```rust,ignore
//! use focusstack::invariant_ppt::contract_test;
//!
//! assert_invariant!(
//!     grid.contains(x, y),
//!     "Grid coordinates lie inside the allocated extent",
//!     "({}, {}) on a {}x{} grid", x, y, grid.width(), grid.height()
//! );
//!
//! #[test]
//! fn contract_grid_access() {
//!     grid.at(0, 0);
//!     contract_test("grid access", &["Grid coordinates lie inside the allocated extent"]);
//! }
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;

thread_local! {
    static CHECKED: RefCell<BTreeSet<&'static str>> = RefCell::new(BTreeSet::new());
}

/// Check an invariant, record it, and panic with context if it does not hold.
///
/// The optional trailing arguments are a `format!` string describing where the
/// check failed. They are only formatted on failure.
///
/// # Panics
/// If the condition is false.
#[macro_export]
macro_rules! assert_invariant {
    ($condition:expr, $message:expr) => {{
        let holds: bool = $condition;
        $crate::invariant_ppt::record($message);
        if !holds {
            $crate::invariant_ppt::violation($message, "unknown");
        }
    }};
    ($condition:expr, $message:expr, $($context:tt)+) => {{
        let holds: bool = $condition;
        $crate::invariant_ppt::record($message);
        if !holds {
            $crate::invariant_ppt::violation($message, &format!($($context)+));
        }
    }};
}

/// Mark `message` as checked on this thread.
#[doc(hidden)]
pub fn record(message: &'static str) {
    CHECKED.with(|checked| {
        let mut checked = checked.borrow_mut();
        if !checked.contains(message) {
            checked.insert(message);
        }
    });
}

#[doc(hidden)]
#[cold]
pub fn violation(message: &str, context: &str) -> ! {
    panic!("INVARIANT VIOLATION [{}]: {}", context, message);
}

/// Invariants checked on this thread so far, in sorted order.
pub fn checked_invariants() -> Vec<&'static str> {
    CHECKED.with(|checked| checked.borrow().iter().copied().collect())
}

/// Assert that every invariant in `required` has been checked on this thread.
///
/// # Panics
/// Listing each required invariant that never ran.
pub fn contract_test(test_name: &str, required: &[&str]) {
    let missing: Vec<&str> = CHECKED.with(|checked| {
        let checked = checked.borrow();
        required
            .iter()
            .copied()
            .filter(|invariant| !checked.contains(*invariant))
            .collect()
    });

    if !missing.is_empty() {
        panic!(
            "CONTRACT FAILURE [{}]: invariants never checked:\n  - {}",
            test_name,
            missing.join("\n  - ")
        );
    }
}

pub fn clear_invariant_log() {
    CHECKED.with(|checked| checked.borrow_mut().clear());
}
