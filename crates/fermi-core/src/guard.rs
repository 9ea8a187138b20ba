//! Per-request recursion guard.
//!
//! A [`CallGuard`] records the query keys currently being resolved in one
//! top-level request. Entering returns a [`GuardEntry`] that pops its key when
//! dropped, so every exit path (early return, error, unwinding panic) leaves
//! the stack balanced. One guard is created per request inside a
//! [`RequestScope`]; nothing here is global.
//!
//! A scope may also carry a [`CancellationToken`]. The caller keeps a clone
//! and flips it from any thread; the cascade polls the scope before each
//! strategy and the resolver before each recursive descent.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::EstimationError;

#[derive(Debug, Default)]
pub struct CallGuard {
    stack: RefCell<Vec<String>>,
    peak: Cell<usize>,
}

impl CallGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `key` onto the active stack.
    ///
    /// Fails with [`EstimationError::CycleDetected`] if the key is already in flight.
    pub fn enter(&self, key: &str) -> Result<GuardEntry<'_>, EstimationError> {
        let mut stack = self.stack.borrow_mut();
        if stack.iter().any(|k| k == key) {
            return Err(EstimationError::CycleDetected {
                key: key.to_string(),
                stack: stack.join(" -> "),
            });
        }
        stack.push(key.to_string());
        self.peak.set(self.peak.get().max(stack.len()));
        Ok(GuardEntry {
            guard: self,
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.stack.borrow().iter().any(|k| k == key)
    }

    /// Number of keys currently in flight.
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    /// Deepest stack seen over the guard's lifetime.
    pub fn peak(&self) -> usize {
        self.peak.get()
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.stack.borrow().clone()
    }

    fn release(&self, key: &str) {
        let mut stack = self.stack.borrow_mut();
        if let Some(pos) = stack.iter().rposition(|k| k == key) {
            stack.remove(pos);
        }
    }
}

/// Scoped membership of one key on a [`CallGuard`]. Pops on drop.
#[derive(Debug)]
pub struct GuardEntry<'a> {
    guard: &'a CallGuard,
    key: String,
}

impl GuardEntry<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for GuardEntry<'_> {
    fn drop(&mut self) {
        self.guard.release(&self.key);
    }
}

/// Stop flag shared between a caller and the [`RequestScope`] it started.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Everything owned by one top-level request and threaded through its call tree.
#[derive(Debug)]
pub struct RequestScope {
    pub guard: CallGuard,
    pub max_depth: usize,
    cancellation: Option<CancellationToken>,
}

impl RequestScope {
    pub fn new(max_depth: usize) -> Self {
        Self {
            guard: CallGuard::new(),
            max_depth,
            cancellation: None,
        }
    }

    pub fn with_cancellation(max_depth: usize, token: CancellationToken) -> Self {
        Self {
            guard: CallGuard::new(),
            max_depth,
            cancellation: Some(token),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Whether a child at `depth + 1` is still within the bound.
    pub fn can_descend(&self, depth: usize) -> bool {
        depth + 1 < self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_sees_a_cancel_from_a_cloned_token() {
        let token = CancellationToken::new();
        let scope = RequestScope::with_cancellation(4, token.clone());
        assert!(!scope.is_cancelled());
        std::thread::spawn(move || token.cancel()).join().unwrap();
        assert!(scope.is_cancelled());
        assert!(!RequestScope::new(4).is_cancelled());
    }

    #[test]
    fn reentry_is_a_cycle() {
        let guard = CallGuard::new();
        let _outer = guard.enter("market size").unwrap();
        let err = guard.enter("market size").unwrap_err();
        assert!(matches!(err, EstimationError::CycleDetected { .. }));
        assert_eq!(guard.depth(), 1);
    }

    #[test]
    fn entries_pop_on_drop() {
        let guard = CallGuard::new();
        {
            let _a = guard.enter("a").unwrap();
            let _b = guard.enter("b").unwrap();
            assert_eq!(guard.snapshot(), vec!["a", "b"]);
        }
        assert_eq!(guard.depth(), 0);
        assert_eq!(guard.peak(), 2);
        assert!(guard.enter("a").is_ok());
    }

    #[test]
    fn entries_pop_on_panic() {
        let guard = CallGuard::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _entry = guard.enter("boom").unwrap();
            panic!("collaborator exploded");
        }));
        assert!(result.is_err());
        assert!(!guard.contains("boom"));
    }

    #[test]
    fn descent_respects_max_depth() {
        let scope = RequestScope::new(2);
        assert!(scope.can_descend(0));
        assert!(!scope.can_descend(1));
    }

    #[test]
    fn scopes_do_not_share_state() {
        let a = RequestScope::new(4);
        let b = RequestScope::new(4);
        let _entry = a.guard.enter("x").unwrap();
        assert!(!b.guard.contains("x"));
    }
}
