//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of some operation.
///
/// `Args` describe the operation itself, while the implementor provides the
/// capability to run it (a gateway, a service, a fake in tests).
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
