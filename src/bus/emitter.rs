//! Event-emitter dispatcher binding (feature `emitter`).

use std::sync::Mutex;

use event_emitter_rs::EventEmitter;

use super::{DirectBus, DispatchError, Dispatcher, Message};

/// Dispatcher that emits each message into an [`EventEmitter`].
///
/// The message payload is emitted on the channel named by the message type,
/// so listeners registered with `EventEmitter::on` for that type receive
/// the payload bytes. Dispatch returns only once every listener has run,
/// so committed messages are fully processed one at a time, in order. The
/// collaborator contract is the concrete `EventEmitter` API, checked at
/// compile time; there is no runtime method discovery.
pub struct EmitterDispatcher {
    // EventEmitter::emit takes &mut self.
    emitter: Mutex<EventEmitter>,
}

impl EmitterDispatcher {
    /// Wrap an emitter. Listeners may be registered before or after.
    pub fn new(emitter: EventEmitter) -> Self {
        Self {
            emitter: Mutex::new(emitter),
        }
    }
}

impl Dispatcher for EmitterDispatcher {
    fn dispatch(&self, message: Message) -> Result<(), DispatchError> {
        let message_type = message.message_type.clone();
        let listeners = {
            let mut emitter = match self.emitter.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            emitter.emit(&message.message_type, message.payload)
        };
        // The emitter runs listeners on their own threads; wait for every
        // one of them so the message is fully processed before the bus
        // moves on to the next.
        for listener in listeners {
            listener
                .join()
                .map_err(|_| DispatchError::handler(&message_type, "listener panicked"))?;
        }
        Ok(())
    }
}

/// A [`DirectBus`] dispatching into an [`EventEmitter`].
///
/// Buffering, commit, and rollback semantics are identical to any other
/// `DirectBus`; only the dispatch binding differs.
pub type EmitterBus = DirectBus<EmitterDispatcher>;

impl EmitterBus {
    /// Create a bus over the given emitter.
    pub fn over(emitter: EventEmitter) -> Self {
        DirectBus::new(EmitterDispatcher::new(emitter))
    }
}
