//! Message bus - transactional publish/commit/rollback over a staging buffer.
//!
//! Publishing is a pure local-state mutation: messages accumulate in a
//! [`MessageQueue`] and nothing is dispatched until the bus is committed.
//! Commit snapshots the buffer, then drains it FIFO through a
//! [`Dispatcher`]; rollback restores the buffer from the snapshot taken at
//! the most recent commit attempt.
//!
//! ```text
//! producer ──publish──► MessageQueue ──commit──► Dispatcher ──► handlers
//!                            ▲                       │
//!                            └─────rollback──────snapshot
//! ```
//!
//! Two dispatcher bindings ship with the crate:
//! - [`HandlerRegistry`] - handlers registered per message type.
//! - `EmitterDispatcher` (feature `emitter`) - emits into an
//!   `event_emitter_rs::EventEmitter`.

mod dispatcher;
mod direct_bus;
#[cfg(feature = "emitter")]
mod emitter;
mod message;
mod queue;
mod registry;

pub use direct_bus::{Bus, DirectBus};
pub use dispatcher::{DispatchError, Dispatcher};
#[cfg(feature = "emitter")]
pub use emitter::{EmitterBus, EmitterDispatcher};
pub use message::Message;
pub use queue::MessageQueue;
pub use registry::HandlerRegistry;
