//! Router shared between connection threads.

use std::sync::{Arc, Mutex};

use super::errors::DispatchError;
use super::router::Router;

/// Cloneable handle serialising access to one [`Router`].
///
/// Every connection thread goes through the same lock, so exactly one
/// message is handled at a time.
#[derive(Clone, Debug)]
pub struct SharedRouter {
    inner: Arc<Mutex<Router>>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            inner: Arc::new(Mutex::new(router)),
        }
    }

    /// Runs `f` with exclusive access to the router.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Poisoned`] if a previous holder panicked.
    pub fn with_router<F, R>(&self, f: F) -> Result<R, DispatchError>
    where
        F: FnOnce(&mut Router) -> R,
    {
        let mut guard = self.inner.lock().map_err(|_| DispatchError::Poisoned)?;
        Ok(f(&mut guard))
    }
}
