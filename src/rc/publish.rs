/*
    ABSTRACT: Definition of a single-thread publisher which embeds a dispatcher (see bus.rs)
    and publishes its events through it
*/
use crate::{
    rc::Dispatcher,
    types::{EventDispatchResult, HandlerResult},
    Event, PublishError,
};

/// A single-thread `Publisher`: any type which owns a `Dispatcher` and exposes the pub/sub contract through it.
///
/// ### Example
///
/// ```rust
/// use simple_pubsub::{event, rc::{Dispatcher, Publisher}};
///
/// pub struct Ping;
/// event!(Ping);
///
/// #[derive(Default)]
/// struct Pinger {
///     dispatcher: Dispatcher,
/// }
///
/// impl Publisher for Pinger {
///     fn dispatcher(&self) -> &Dispatcher {
///         &self.dispatcher
///     }
///
///     fn dispatcher_mut(&mut self) -> &mut Dispatcher {
///         &mut self.dispatcher
///     }
/// }
///
/// let mut pinger = Pinger::default();
/// pinger.subscribe(|_: &Ping| println!("pong"));
/// assert_eq!(pinger.publish(&Ping).unwrap().delivered(), 1);
/// ```
pub trait Publisher {
    fn dispatcher(&self) -> &Dispatcher;
    fn dispatcher_mut(&mut self) -> &mut Dispatcher;

    fn subscribe<E, F>(&mut self, callback: F)
    where
        E: Event,
        F: Fn(&E) + 'static,
    {
        self.dispatcher_mut().subscribe(callback)
    }

    fn try_subscribe<E, F>(&mut self, callback: F)
    where
        E: Event,
        F: Fn(&E) -> HandlerResult + 'static,
    {
        self.dispatcher_mut().try_subscribe(callback)
    }

    fn publish<E: Event>(&self, event: &E) -> Result<EventDispatchResult, PublishError> {
        self.dispatcher().publish(event)
    }
}
