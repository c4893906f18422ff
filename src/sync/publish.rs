/*
    ABSTRACT: Definition of a thread-safe publisher which embeds a dispatcher (see bus.rs)
    and publishes its events through it
*/
use crate::{
    sync::Dispatcher,
    types::{EventDispatchResult, HandlerResult},
    Event, PublishError,
};

/// A thread-safe `Publisher`: any type which owns a `sync::Dispatcher` and exposes the pub/sub contract through it.
///
/// The dispatcher locks internally, so every method takes `&self`.
pub trait Publisher {
    fn dispatcher(&self) -> &Dispatcher;

    fn subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.dispatcher().subscribe(callback)
    }

    fn try_subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        self.dispatcher().try_subscribe(callback)
    }

    fn publish<E>(&self, event: &E) -> Result<EventDispatchResult, PublishError>
    where
        E: Event,
    {
        self.dispatcher().publish(event)
    }
}
