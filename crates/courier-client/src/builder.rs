//! Chain builder - composes decorators around a terminal client

use courier_core::Client;
use std::sync::Arc;

/// Builds a client chain from a terminal client and an ordered list of
/// decorator constructors.
///
/// Each call to [`wrap`](ClientBuilder::wrap) applies a constructor to the
/// chain built so far, so wrappers nest in the order they are added: the
/// **last** wrapper added is the outermost and observes each call first.
///
/// Composition order is caller-controlled and significant. Given
/// `ClientBuilder::new(t).wrap(a).wrap(b)`, the resulting chain is
/// `b(a(t))`: `b` sees the call first, then `a`, then the terminal, and the
/// return value travels back `t` → `a` → `b` → caller.
///
/// The chain is finite and linear by construction - every constructor
/// receives the previously built client and must wrap exactly that value,
/// so no chain can wrap itself.
pub struct ClientBuilder {
    client: Arc<dyn Client>,
}

impl ClientBuilder {
    /// Start a chain at its terminal client.
    pub fn new(terminal: Arc<dyn Client>) -> Self {
        Self { client: terminal }
    }

    /// Apply one decorator constructor around the chain built so far.
    pub fn wrap<F>(self, wrapper: F) -> Self
    where
        F: FnOnce(Arc<dyn Client>) -> Arc<dyn Client>,
    {
        Self {
            client: wrapper(self.client),
        }
    }

    /// Finish the chain, yielding the outermost client.
    pub fn build(self) -> Arc<dyn Client> {
        self.client
    }
}
