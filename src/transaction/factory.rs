use std::sync::Arc;

use tracing::debug;

use super::{
    CoordinatorError, DistributedCoordinator, SuppressedCoordinator, TransactionCoordinator,
};
use crate::unit_of_work::UnitOfWork;

/// Pick a coordinator for the given participants.
///
/// All-or-nothing capability negotiation: the distributed variant is chosen
/// only when every participant reports
/// [`distributed_transaction_supported`]; a single holdout demotes the
/// whole group to sequential, best-effort commits.
///
/// [`distributed_transaction_supported`]: UnitOfWork::distributed_transaction_supported
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use txbus::{coordinator_for, DirectBus, HandlerRegistry, UnitOfWork};
///
/// let bus = DirectBus::new(HandlerRegistry::new());
/// let participants: Vec<Arc<dyn UnitOfWork>> = vec![Arc::new(bus)];
///
/// // A bus never supports distributed transactions, so the group falls
/// // back to the suppressed variant.
/// let coordinator = coordinator_for(participants).unwrap();
/// assert!(!coordinator.distributed_transaction_supported());
/// ```
pub fn coordinator_for(
    participants: Vec<Arc<dyn UnitOfWork>>,
) -> Result<Box<dyn TransactionCoordinator>, CoordinatorError> {
    if participants.is_empty() {
        return Err(CoordinatorError::NoParticipants);
    }
    let all_distributed = participants
        .iter()
        .all(|p| p.distributed_transaction_supported());
    debug!(
        participants = participants.len(),
        distributed = all_distributed,
        "selecting transaction coordinator"
    );
    if all_distributed {
        Ok(Box::new(DistributedCoordinator::new(participants)?))
    } else {
        Ok(Box::new(SuppressedCoordinator::new(participants)?))
    }
}
