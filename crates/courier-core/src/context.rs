//! Call context - the per-invocation carrier for cancellation and metadata

use crate::error::CallError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// String key/value metadata attached to a call context.
///
/// A `BTreeMap` rather than a `HashMap` so that snapshots (log lines, test
/// assertions) render in a stable key order.
pub type Metadata = BTreeMap<String, String>;

/// An immutable, hierarchical, cancellable call context.
///
/// A context carries deadline/cancellation signals and string metadata for
/// exactly one logical invocation. Contexts form a tree: deriving a child
/// (via [`with_metadata`](CallContext::with_metadata),
/// [`with_deadline`](CallContext::with_deadline), or
/// [`with_cancel`](CallContext::with_cancel)) produces a new value and never
/// mutates the parent or any sibling. Lookups see the context's own entries
/// plus everything inherited from its ancestors, with nearer entries
/// shadowing farther ones.
///
/// Cloning is cheap - a context is a shared pointer into the derivation
/// chain.
///
/// # Examples
///
/// ```
/// use courier_core::CallContext;
///
/// let parent = CallContext::background().with_metadata([("a", "1")]);
/// let child = parent.with_metadata([("a", "2"), ("b", "3")]);
///
/// let md = child.metadata().unwrap();
/// assert_eq!(md.get("a").map(String::as_str), Some("2"));
/// assert_eq!(md.get("b").map(String::as_str), Some("3"));
///
/// // The parent is untouched by the derivation.
/// assert_eq!(parent.metadata().unwrap().get("a").map(String::as_str), Some("1"));
/// ```
#[derive(Debug, Clone)]
pub struct CallContext {
    node: Arc<Node>,
}

#[derive(Debug)]
struct Node {
    parent: Option<Arc<Node>>,
    metadata: Option<Metadata>,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

/// Handle for cancelling a context subtree.
///
/// Returned by [`CallContext::with_cancel`]. Calling [`cancel`](CancelHandle::cancel)
/// marks the associated context and every context derived from it as
/// cancelled. Ancestors and siblings are unaffected.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Cancel the associated context and all contexts derived from it.
    ///
    /// Idempotent - cancelling twice has no additional effect.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }
}

impl CallContext {
    /// The root context: no metadata, no deadline, never cancelled.
    ///
    /// Every call tree starts here; layers derive what they need per call.
    pub fn background() -> Self {
        Self {
            node: Arc::new(Node {
                parent: None,
                metadata: None,
                deadline: None,
                cancel: None,
            }),
        }
    }

    fn child(
        &self,
        metadata: Option<Metadata>,
        deadline: Option<Instant>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            node: Arc::new(Node {
                parent: Some(Arc::clone(&self.node)),
                metadata,
                deadline,
                cancel,
            }),
        }
    }

    /// Derive a child context with additional metadata.
    ///
    /// The parent is not mutated. Keys supplied here shadow the same keys
    /// inherited from the parent chain; all other inherited keys remain
    /// visible in the child. Pure value construction - this cannot fail.
    pub fn with_metadata<I, K, V>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let metadata: Metadata = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.child(Some(metadata), None, None)
    }

    /// The effective merged metadata visible at this context.
    ///
    /// Walks the ancestry from this context to the root; a descendant's
    /// entry shadows an ancestor's entry for the same key. Returns `None`
    /// only if no metadata was ever attached anywhere in the ancestry -
    /// an empty attached mapping still yields `Some`.
    pub fn metadata(&self) -> Option<Metadata> {
        let mut merged = Metadata::new();
        let mut found = false;
        let mut node = Some(&self.node);
        while let Some(n) = node {
            if let Some(md) = &n.metadata {
                found = true;
                for (k, v) in md {
                    // Nearer entries were inserted first and win.
                    merged.entry(k.clone()).or_insert_with(|| v.clone());
                }
            }
            node = n.parent.as_ref();
        }
        found.then_some(merged)
    }

    /// Derive a child context that expires at `deadline`.
    ///
    /// The effective deadline of a context is the earliest deadline along
    /// its ancestry - a child can tighten an inherited deadline but never
    /// extend it.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.child(None, Some(deadline), None)
    }

    /// Derive a child context that expires `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a cancellable child context and the handle that cancels it.
    ///
    /// Cancelling through the handle affects this child and everything
    /// derived from it; the parent and its other children are unaffected.
    /// Cancellation of an ancestor is still observed by the child.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        let ctx = self.child(None, None, Some(Arc::clone(&flag)));
        (ctx, CancelHandle { flag })
    }

    /// The effective deadline, if any context in the ancestry set one.
    pub fn deadline(&self) -> Option<Instant> {
        let mut earliest: Option<Instant> = None;
        let mut node = Some(&self.node);
        while let Some(n) = node {
            if let Some(d) = n.deadline {
                earliest = Some(earliest.map_or(d, |e| e.min(d)));
            }
            node = n.parent.as_ref();
        }
        earliest
    }

    /// Whether this context or any ancestor has been cancelled.
    ///
    /// Deadline expiry does not count as cancellation; see
    /// [`check`](CallContext::check) for the combined test.
    pub fn is_cancelled(&self) -> bool {
        let mut node = Some(&self.node);
        while let Some(n) = node {
            if let Some(flag) = &n.cancel {
                if flag.load(Ordering::Acquire) {
                    return true;
                }
            }
            node = n.parent.as_ref();
        }
        false
    }

    /// Check whether the call should still proceed.
    ///
    /// Returns [`CallError::Cancelled`] if the context (or an ancestor) was
    /// cancelled, [`CallError::DeadlineExceeded`] if the effective deadline
    /// has passed, and `Ok(())` otherwise. Terminal clients call this before
    /// touching the network; any layer in a chain may call it to abort
    /// early. The error it returns must propagate to the caller unchanged.
    pub fn check(&self) -> Result<(), CallError> {
        if self.is_cancelled() {
            return Err(CallError::Cancelled);
        }
        if let Some(deadline) = self.deadline() {
            if Instant::now() >= deadline {
                return Err(CallError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}
