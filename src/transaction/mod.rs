//! Transaction coordination - one `UnitOfWork` façade over many.
//!
//! A coordinator holds a fixed list of participants supplied at
//! construction and commits them in registration order. The
//! [`coordinator_for`] factory picks the distributed variant only when
//! every participant reports distributed-transaction support; otherwise
//! commits are sequential and best-effort, with no atomicity across
//! participants.

mod coordinator;
mod factory;
mod scope;

pub use coordinator::{
    CoordinatorError, DistributedCoordinator, SuppressedCoordinator, TransactionCoordinator,
};
pub use factory::coordinator_for;
pub use scope::{LocalTransactionScope, TransactionScope};
