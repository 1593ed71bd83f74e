//! Runtime abstraction layer for async operations
//!
//! Backends that talk to the network spawn their requests through this
//! module, so the screen itself never depends on a particular runtime.

use crate::{Error, Result};
use futures::future::BoxFuture;
use std::future::Future;

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it. Fails when the spawner has
    /// no executor to run it on.
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Result<Box<dyn AsyncHandle>>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task. A task that already completed is unaffected.
    fn cancel(&self);
}

/// Convenience function for spawning with type safety
pub fn spawn<F>(future: F) -> Result<Box<dyn AsyncHandle>>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::trace!("runtime::spawn - spawning new async task");
    runtime()?.spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::{runtime::Handle, task::JoinHandle};

        /// Tokio-based async spawner. Spawns onto the runtime the caller is
        /// running in (inside `block_on`, or with a `Runtime::enter` guard held).
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Result<Box<dyn AsyncHandle>> {
                let handle = Handle::try_current().map_err(|e| {
                    Error::InvalidState(format!("no tokio runtime in scope: {}", e))
                })?;
                Ok(Box::new(TokioHandle(handle.spawn(future))))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }
}

/// Global runtime instance
#[cfg(feature = "tokio-runtime")]
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Get the global runtime spawner
#[cfg(feature = "tokio-runtime")]
pub fn runtime() -> Result<&'static dyn AsyncSpawner> {
    Ok(RUNTIME
        .get_or_init(|| Box::new(spawners::tokio_impl::TokioSpawner))
        .as_ref())
}

#[cfg(not(feature = "tokio-runtime"))]
pub fn runtime() -> Result<&'static dyn AsyncSpawner> {
    Err(Error::InvalidState(
        "no async runtime available, enable the 'tokio-runtime' feature".into(),
    ))
}
