//! Handler registry - the default dispatcher binding.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::trace;

use super::{DispatchError, Dispatcher, Message};

type Handler = Box<dyn Fn(&Message) -> Result<(), DispatchError> + Send + Sync>;

/// Dispatcher routing messages to handlers registered per message type.
///
/// Handlers for a type run in registration order; the first failure aborts
/// the remainder and propagates. A message type with no registered handlers
/// dispatches successfully as a no-op.
///
/// ## Example
///
/// ```
/// use txbus::{Dispatcher, HandlerRegistry, Message};
///
/// let registry = HandlerRegistry::new();
/// registry.on("order-created", |message| {
///     assert_eq!(message.payload_str(), Some("{}"));
///     Ok(())
/// });
///
/// registry
///     .dispatch(Message::with_string_payload("msg-1", "order-created", "{}"))
///     .unwrap();
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: RwLock<HashMap<String, Vec<Handler>>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a message type.
    pub fn on<F>(&self, message_type: impl Into<String>, handler: F)
    where
        F: Fn(&Message) -> Result<(), DispatchError> + Send + Sync + 'static,
    {
        let mut handlers = match self.handlers.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        handlers
            .entry(message_type.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Number of handlers registered for a message type.
    pub fn handler_count(&self, message_type: &str) -> usize {
        let handlers = match self.handlers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        handlers.get(message_type).map_or(0, Vec::len)
    }
}

impl Dispatcher for HandlerRegistry {
    fn dispatch(&self, message: Message) -> Result<(), DispatchError> {
        let handlers = match self.handlers.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match handlers.get(&message.message_type) {
            Some(registered) => {
                trace!(
                    message_type = %message.message_type,
                    handlers = registered.len(),
                    "dispatching message"
                );
                for handler in registered {
                    handler(&message)?;
                }
                Ok(())
            }
            None => {
                trace!(message_type = %message.message_type, "no handlers registered");
                Ok(())
            }
        }
    }
}
