/*
    ABSTRACT: Definition of the single-thread dispatcher which owns the subscription registry
    and synchronously delivers published events (see event.rs) to their subscribed callbacks
*/
use crate::{
    config::DispatcherConfig,
    rc::types::*,
    types::{execute_handlers, Channel, EventDispatchResult, HandlerResult},
    Event, PublishError,
};
use std::any::Any;
use uuid::Uuid;

/// Single-thread datastructure mapping dispatch names to the callbacks subscribed to them
///
/// Callbacks run on the publishing thread, one after the other, in the order they were subscribed.
/// Subscribing the same callback twice delivers each event to it twice.
pub struct Dispatcher {
    id: Uuid,
    config: DispatcherConfig,
    channels: SubscriberMap,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_config(DispatcherConfig::default())
    }
}

impl Dispatcher {
    /// Creates a dispatcher with an empty registry and the default config
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            channels: SubscriberMap::default(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Adds `callback` to the list of callbacks invoked whenever an `E` is published
    ///
    /// ### Panics
    /// - If another event type already registered `E::NAME` on this dispatcher.
    pub fn subscribe<E, F>(&mut self, callback: F)
    where
        E: Event,
        F: Fn(&E) + 'static,
    {
        self.try_subscribe(move |event: &E| {
            callback(event);
            Ok(())
        })
    }

    /// Adds a fallible `callback` for `E`
    ///
    /// ### Notes
    /// - An `Err` from the callback aborts the rest of that `publish` call and is returned to the publisher.
    ///
    /// ### Panics
    /// - If another event type already registered `E::NAME` on this dispatcher.
    pub fn try_subscribe<E, F>(&mut self, callback: F)
    where
        E: Event,
        F: Fn(&E) -> HandlerResult + 'static,
    {
        let Self { id, config, channels } = self;
        let channel = channels.entry(E::NAME).or_insert_with(|| {
            log::log!(
                config.notice_level,
                "[{} {}] event {} does not exist yet, registering new event key",
                config.label,
                id,
                E::NAME
            );
            Channel::for_event::<E>()
        });
        channel.check::<E>();
        channel.handlers.push(Box::new(move |event: &dyn Any| {
            match event.downcast_ref::<E>() {
                Some(event) => callback(event),
                None => unreachable!("channel `{}` holds a different type", E::NAME),
            }
        }));
    }

    /// Returns `true` if at least one callback was ever subscribed to `E` and not removed since
    pub fn is_registered<E: Event>(&self) -> bool {
        self.channels.contains_key(E::NAME)
    }

    /// Number of subscriptions to `E`, counting duplicates
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.channels
            .get(E::NAME)
            .map_or(0, |channel| channel.handlers.len())
    }

    /// Removes all callbacks subscribed to `E` on this `Dispatcher`
    pub fn unsubscribe_all_from<E: Event>(&mut self) {
        self.channels.remove(E::NAME);
    }

    /// Removes all callbacks from this `Dispatcher`
    ///
    /// ### Notes
    /// - The memory previously allocated for the registry remains allocated for reuse.
    pub fn unsubscribe_all(&mut self) {
        self.channels.clear()
    }

    /// Synchronously delivers `event` to every callback subscribed to its type, in subscription order
    ///
    /// ### Returns
    /// - `Ok(NotNeeded)` if nothing is subscribed to the event; this is logged, not an error.
    /// - `Ok(Finished(n))` once all `n` callbacks have run.
    /// - `Err(PublishError::Handler)` from the first fallible callback that failed. Callbacks after it are not run.
    ///
    /// A panicking callback unwinds through `publish` and also skips the remaining callbacks.
    pub fn publish<E: Event>(&self, event: &E) -> Result<EventDispatchResult, PublishError> {
        let name = event.name();
        match self.channels.get(name) {
            Some(channel) => {
                channel.check::<E>();
                execute_handlers(&self.config, &self.id, name, &channel.handlers, |handler| {
                    handler(event as &dyn Any)
                })
            }
            None => {
                log::log!(
                    self.config.notice_level,
                    "[{} {}] sorry but no subscribers for {}",
                    self.config.label,
                    self.id,
                    name
                );
                Ok(EventDispatchResult::NotNeeded)
            }
        }
    }
}
