//! Transactional message bus with unit-of-work semantics.
//!
//! Messages published to a [`DirectBus`] accumulate in a staging buffer with
//! no side effects. Committing the bus drains the buffer and dispatches each
//! message, in publish order, to a [`Dispatcher`]. Rolling back restores the
//! buffer to the snapshot taken at the most recent commit attempt.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  DirectBus (UnitOfWork)                  │
//! │  publish() ──► MessageQueue (staged, no side effects)    │
//! │  commit()  ──► snapshot, then drain FIFO ──► Dispatcher  │
//! │  rollback()──► restore queue from snapshot               │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Dispatcher trait                     │
//! │  HandlerRegistry (included) │ EmitterDispatcher (feature)│
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use txbus::{Bus, DirectBus, HandlerRegistry, Message, UnitOfWork};
//!
//! let registry = HandlerRegistry::new();
//! registry.on("order-created", |message| {
//!     println!("handling {}", message.message_type);
//!     Ok(())
//! });
//!
//! let bus = DirectBus::new(registry);
//! bus.publish(Message::with_string_payload("msg-1", "order-created", "{}"));
//! assert!(!bus.committed());
//!
//! bus.commit().unwrap();
//! assert!(bus.committed());
//! ```
//!
//! Several independently committable participants (a bus plus a persistence
//! context, say) can be grouped behind a single [`UnitOfWork`] façade with
//! [`transaction::coordinator_for`].

pub mod bus;
pub mod transaction;
pub mod unit_of_work;
pub mod worker;

pub use bus::{Bus, DirectBus, DispatchError, Dispatcher, HandlerRegistry, Message, MessageQueue};
#[cfg(feature = "emitter")]
pub use bus::{EmitterBus, EmitterDispatcher};
pub use transaction::{
    coordinator_for, CoordinatorError, DistributedCoordinator, LocalTransactionScope,
    SuppressedCoordinator, TransactionCoordinator, TransactionScope,
};
pub use unit_of_work::{CancellationToken, CommitError, CommitHandle, UnitOfWork};
pub use worker::{CommitPool, TaskHandle};

// Re-export the EventEmitter from the event_emitter_rs crate so emitter-backed
// buses can be wired without a direct dependency.
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
