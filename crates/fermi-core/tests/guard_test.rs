//! Property tests for the per-request call guard.

use fermi_core::guard::{CallGuard, RequestScope};
use proptest::prelude::*;

proptest! {
    /// Any nesting of distinct keys unwinds back to an empty stack.
    #[test]
    fn guard_stays_balanced(n in 1_usize..12) {
        let guard = CallGuard::new();
        fn nest(guard: &CallGuard, remaining: usize, seen: &mut usize) {
            if remaining == 0 {
                return;
            }
            let _entry = guard.enter(&format!("q{remaining}")).unwrap();
            *seen = (*seen).max(guard.depth());
            nest(guard, remaining - 1, seen);
        }
        let mut seen = 0;
        nest(&guard, n, &mut seen);
        prop_assert_eq!(seen, n);
        prop_assert_eq!(guard.depth(), 0);
        prop_assert_eq!(guard.peak(), n);
    }

    /// A key is rejected exactly while it is in flight.
    #[test]
    fn reentry_rejected_only_while_active(key in "[a-z]{1,8}") {
        let guard = CallGuard::new();
        {
            let _entry = guard.enter(&key).unwrap();
            prop_assert!(guard.enter(&key).is_err());
        }
        prop_assert!(guard.enter(&key).is_ok());
    }

    #[test]
    fn descent_bound_matches_max_depth(max_depth in 1_usize..8, depth in 0_usize..10) {
        let scope = RequestScope::new(max_depth);
        prop_assert_eq!(scope.can_descend(depth), depth + 1 < max_depth);
    }
}
