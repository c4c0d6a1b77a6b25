mod support;

use std::sync::{Arc, Mutex};

use support::{RecordingDispatcher, StubUnitOfWork};
use txbus::{
    coordinator_for, Bus, CoordinatorError, DirectBus, DistributedCoordinator,
    LocalTransactionScope, Message, SuppressedCoordinator, UnitOfWork,
};

fn shared_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn factory_selects_distributed_when_every_participant_supports_it() {
    let log = shared_log();
    let coordinator = coordinator_for(vec![
        StubUnitOfWork::new("first", true, Arc::clone(&log)),
        StubUnitOfWork::new("second", true, Arc::clone(&log)),
    ])
    .unwrap();

    assert!(coordinator.distributed_transaction_supported());
}

#[test]
fn factory_selects_suppressed_when_any_participant_lacks_support() {
    let log = shared_log();
    let coordinator = coordinator_for(vec![
        StubUnitOfWork::new("first", true, Arc::clone(&log)),
        StubUnitOfWork::new("second", false, Arc::clone(&log)),
    ])
    .unwrap();

    assert!(!coordinator.distributed_transaction_supported());
}

#[test]
fn factory_rejects_zero_participants() {
    let result = coordinator_for(Vec::new());
    assert!(matches!(result, Err(CoordinatorError::NoParticipants)));
}

#[test]
fn participants_commit_in_registration_order() {
    let log = shared_log();
    let coordinator = SuppressedCoordinator::new(vec![
        StubUnitOfWork::new("first", false, Arc::clone(&log)),
        StubUnitOfWork::new("second", false, Arc::clone(&log)),
    ])
    .unwrap();

    coordinator.commit().unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    assert!(coordinator.committed());
}

#[test]
fn a_failing_participant_does_not_undo_earlier_commits() {
    let log = shared_log();
    let first = StubUnitOfWork::new("first", false, Arc::clone(&log));
    let second = StubUnitOfWork::failing("second", false, Arc::clone(&log));
    let coordinator =
        SuppressedCoordinator::new(vec![first.clone(), second.clone()]).unwrap();

    assert!(coordinator.commit().is_err());

    // Both commits were attempted, in order; the first one stands.
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    assert!(first.committed());
    assert!(!second.committed());
    assert!(!coordinator.committed());
}

#[test]
fn suppressed_rollback_does_not_propagate_to_participants() {
    let log = shared_log();
    let participant = StubUnitOfWork::new("only", false, Arc::clone(&log));
    let coordinator = SuppressedCoordinator::new(vec![participant.clone()]).unwrap();

    coordinator.rollback();
    assert_eq!(participant.rollback_count(), 0);
}

#[test]
fn distributed_commit_completes_the_scope() {
    let log = shared_log();
    let coordinator = DistributedCoordinator::with_scope(
        vec![
            StubUnitOfWork::new("first", true, Arc::clone(&log)),
            StubUnitOfWork::new("second", true, Arc::clone(&log)),
        ],
        LocalTransactionScope::new(),
    )
    .unwrap();

    coordinator.commit().unwrap();
    assert!(coordinator.scope().is_completed());
    assert!(coordinator.committed());
}

#[test]
fn distributed_commit_failure_leaves_the_scope_incomplete() {
    let log = shared_log();
    let coordinator = DistributedCoordinator::with_scope(
        vec![
            StubUnitOfWork::new("first", true, Arc::clone(&log)),
            StubUnitOfWork::failing("second", true, Arc::clone(&log)),
        ],
        LocalTransactionScope::new(),
    )
    .unwrap();

    assert!(coordinator.commit().is_err());
    assert!(!coordinator.scope().is_completed());
}

#[test]
fn distributed_rollback_abandons_the_scope() {
    let log = shared_log();
    let coordinator = DistributedCoordinator::with_scope(
        vec![StubUnitOfWork::new("only", true, Arc::clone(&log))],
        LocalTransactionScope::new(),
    )
    .unwrap();

    coordinator.rollback();
    assert!(coordinator.scope().is_abandoned());
    assert!(!coordinator.scope().is_completed());
}

#[test]
fn coordinator_commit_async_resolves() {
    let log = shared_log();
    let coordinator = SuppressedCoordinator::new(vec![
        StubUnitOfWork::new("first", false, Arc::clone(&log)),
        StubUnitOfWork::new("second", false, Arc::clone(&log)),
    ])
    .unwrap();

    coordinator.commit_async().join().unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    assert!(coordinator.committed());
}

#[test]
fn a_bus_participates_alongside_other_units_of_work() {
    let log = shared_log();
    let bus = DirectBus::new(RecordingDispatcher::new());
    bus.publish(Message::with_string_payload("msg-1", "order-created", "{}"));

    let persistence = StubUnitOfWork::new("persistence", true, Arc::clone(&log));
    let coordinator = coordinator_for(vec![
        Arc::new(bus.clone()) as Arc<dyn UnitOfWork>,
        persistence.clone(),
    ])
    .unwrap();

    // The bus never supports distributed transactions, so the group is
    // demoted to the suppressed variant.
    assert!(!coordinator.distributed_transaction_supported());

    coordinator.commit().unwrap();
    assert_eq!(bus.dispatcher().seen(), vec!["order-created"]);
    assert!(bus.committed());
    assert!(persistence.committed());
    assert!(coordinator.committed());
}
