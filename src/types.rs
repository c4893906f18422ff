use crate::{config::DispatcherConfig, error::PublishError, Event};
use std::any::{type_name, TypeId};
use uuid::Uuid;

/// Error type a fallible callback may return from `try_subscribe`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The value returned by a fallible callback.
pub type HandlerResult = Result<(), BoxError>;

/// The end result of a `Dispatcher`'s `publish` method, which results in one of the following:
///
/// - `NotNeeded`: Nothing is subscribed to the event's dispatch name; no callback ran.
/// - `Finished(n)`: Every callback subscribed to the dispatch name ran, `n` in total.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy)]
pub enum EventDispatchResult {
    NotNeeded,
    Finished(usize),
}

impl EventDispatchResult {
    /// Number of callbacks invoked.
    pub fn delivered(&self) -> usize {
        match self {
            EventDispatchResult::NotNeeded => 0,
            EventDispatchResult::Finished(count) => *count,
        }
    }
}

/// The callbacks subscribed to one dispatch name, along with the Rust type that owns the name.
pub(crate) struct Channel<H> {
    type_id: TypeId,
    type_name: &'static str,
    pub(crate) handlers: Vec<H>,
}

impl<H> Channel<H> {
    pub(crate) fn for_event<E: Event>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            handlers: Vec::new(),
        }
    }

    /// Panics if `E` is not the type this channel was created for, which means two event types share `E::NAME`.
    pub(crate) fn check<E: Event>(&self) {
        assert!(
            self.type_id == TypeId::of::<E>(),
            "dispatch name collision: `{}` is used by both {} and {}",
            E::NAME,
            self.type_name,
            type_name::<E>()
        );
    }
}

/// Given a channel's callbacks in registration order, runs `invoke` on each of them.
///
/// The first callback to fail stops the loop; its error is returned and the remaining callbacks are skipped.
pub(crate) fn execute_handlers<H, F>(
    config: &DispatcherConfig,
    id: &Uuid,
    event: &'static str,
    handlers: &[H],
    mut invoke: F,
) -> Result<EventDispatchResult, PublishError>
where
    F: FnMut(&H) -> HandlerResult,
{
    for (position, handler) in handlers.iter().enumerate() {
        log::trace!(
            "[{} {}] delivering {} to subscriber {}",
            config.label,
            id,
            event,
            position
        );
        invoke(handler).map_err(|source| PublishError::Handler {
            event,
            position,
            source,
        })?;
    }
    Ok(EventDispatchResult::Finished(handlers.len()))
}
