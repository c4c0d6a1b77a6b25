//! Unit of Work - the transactional lifecycle contract.
//!
//! Every transactional participant in this crate (buses, coordinators, and
//! whatever persistence context an application brings along) implements
//! [`UnitOfWork`]: a capability flag, a committed flag, synchronous and
//! pooled-asynchronous commit, and rollback to the last commit snapshot.

mod cancellation;
mod error;
mod handle;
mod unit_of_work;

pub use cancellation::CancellationToken;
pub use error::CommitError;
pub use handle::CommitHandle;
pub use unit_of_work::UnitOfWork;
