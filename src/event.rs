/*
    ABSTRACT: Definition of events which are published to a dispatcher (see rc/bus.rs, sync/bus.rs)
    and delivered to the callbacks subscribed to their dispatch name.
*/
use std::any::Any;

/// An immutable record of something that happened, identified by a constant dispatch name.
///
/// - `NAME` is the registry key used by a `Dispatcher`. It must be unique among the event types
///   published through one dispatcher. Two distinct types sharing a name are rejected at
///   subscribe time.
///
/// Prefer the `event!` macro over a handwritten impl.
///
/// ### Example
///
/// ```rust
/// use simple_pubsub::{event, Event};
///
/// pub struct EmailSentEvent {
///     pub to: String,
///     pub from: String,
///     pub body: String,
/// }
/// event!(EmailSentEvent);
///
/// pub struct Renamed;
/// event!(Renamed => "account.renamed");
///
/// assert_eq!(EmailSentEvent::NAME, "EmailSentEvent");
/// assert_eq!(Renamed.name(), "account.renamed");
/// ```
pub trait Event: Any {
    const NAME: &'static str;

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

/// Implements `Event` for a type, using the type identifier as its dispatch name unless one is given.
#[macro_export]
macro_rules! event {
    ($ty:ident) => {
        $crate::event!($ty => stringify!($ty));
    };
    ($ty:ty => $name:expr) => {
        impl $crate::Event for $ty {
            const NAME: &'static str = $name;
        }
    };
}
