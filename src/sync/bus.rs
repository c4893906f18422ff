/*
    ABSTRACT: Definition of the thread-safe dispatcher which owns the subscription registry
    and synchronously delivers published events (see event.rs) to their subscribed callbacks
*/
use crate::{
    config::DispatcherConfig,
    sync::types::*,
    types::{execute_handlers, Channel, EventDispatchResult, HandlerResult},
    Event, PublishError,
};
use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Thread-safe datastructure mapping dispatch names to the callbacks subscribed to them
///
/// Same delivery rules as `rc::Dispatcher`: callbacks run on the publishing thread, in subscription order.
///
/// `publish` copies the callback list under a read lock and runs it after the lock is released, so a
/// callback may subscribe on the dispatcher that is calling it. Such a subscription takes effect from
/// the next `publish`.
///
/// This should be wrapped in an Arc<Dispatcher> to be shared between threads
pub struct Dispatcher {
    id: Uuid,
    config: DispatcherConfig,
    channels: RwLock<SubscriberMap>,
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
            channels: RwLock::new(SubscriberMap::default()),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    // A callback that panicked while another thread held the lock cannot leave the map half-written,
    // so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, SubscriberMap> {
        self.channels.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SubscriberMap> {
        self.channels.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `callback` to the list of callbacks invoked whenever an `E` is published
    ///
    /// ### Panics
    /// - If another event type already registered `E::NAME` on this dispatcher.
    pub fn subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
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
    pub fn try_subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(move |event: &dyn Any| match event.downcast_ref::<E>() {
            Some(event) => callback(event),
            None => unreachable!("channel `{}` holds a different type", E::NAME),
        });

        let mut channels = self.write();
        let channel = channels.entry(E::NAME).or_insert_with(|| {
            log::log!(
                self.config.notice_level,
                "[{} {}] event {} does not exist yet, registering new event key",
                self.config.label,
                self.id,
                E::NAME
            );
            Channel::for_event::<E>()
        });
        channel.check::<E>();
        channel.handlers.push(handler);
    }

    /// Returns `true` if at least one callback was ever subscribed to `E` and not removed since
    pub fn is_registered<E: Event>(&self) -> bool {
        self.read().contains_key(E::NAME)
    }

    /// Number of subscriptions to `E`, counting duplicates
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.read()
            .get(E::NAME)
            .map_or(0, |channel| channel.handlers.len())
    }

    /// Removes all callbacks subscribed to `E` on this `Dispatcher`
    pub fn unsubscribe_all_from<E: Event>(&self) {
        self.write().remove(E::NAME);
    }

    /// Removes all callbacks from this `Dispatcher`
    pub fn unsubscribe_all(&self) {
        self.write().clear()
    }

    /// Synchronously delivers `event` to every callback subscribed to its type, in subscription order
    ///
    /// ### Returns
    /// - `Ok(NotNeeded)` if nothing is subscribed to the event; this is logged, not an error.
    /// - `Ok(Finished(n))` once all `n` callbacks have run.
    /// - `Err(PublishError::Handler)` from the first fallible callback that failed. Callbacks after it are not run.
    ///
    /// A panicking callback unwinds through `publish` and also skips the remaining callbacks.
    pub fn publish<E>(&self, event: &E) -> Result<EventDispatchResult, PublishError>
    where
        E: Event,
    {
        let name = event.name();
        let snapshot: Option<Vec<Handler>> = {
            let channels = self.read();
            channels.get(name).map(|channel| {
                channel.check::<E>();
                channel.handlers.clone()
            })
        };

        match snapshot {
            Some(handlers) => {
                execute_handlers(&self.config, &self.id, name, &handlers, |handler| {
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::sync::Mutex;
    use std::thread;

    #[derive(Debug, Clone, PartialEq)]
    struct EmailSentEvent {
        body: String,
    }
    crate::event!(EmailSentEvent);

    struct EmailBouncedEvent;
    crate::event!(EmailBouncedEvent);

    type Log = Arc<Mutex<Vec<String>>>;

    fn recorder(log: &Log, tag: &'static str) -> impl Fn(&EmailSentEvent) + Send + Sync + 'static {
        let log = Arc::clone(log);
        move |event| log.lock().unwrap().push(format!("{}:{}", tag, event.body))
    }

    fn sent(body: &str) -> EmailSentEvent {
        EmailSentEvent { body: body.into() }
    }

    #[test]
    fn dispatcher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dispatcher>();
    }

    #[test]
    fn new_dispatcher_is_empty() {
        let dispatcher = Dispatcher::new();
        assert!(!dispatcher.is_registered::<EmailSentEvent>());
        assert_eq!(dispatcher.publish(&sent("hi")).unwrap(), EventDispatchResult::NotNeeded);
    }

    #[test]
    fn callbacks_run_once_per_subscription_in_order() {
        let log = Log::default();
        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(recorder(&log, "first"));
        dispatcher.subscribe(recorder(&log, "second"));
        dispatcher.subscribe(recorder(&log, "first"));

        let result = dispatcher.publish(&sent("hi")).unwrap();

        assert_eq!(result, EventDispatchResult::Finished(3));
        assert_eq!(*log.lock().unwrap(), vec!["first:hi", "second:hi", "first:hi"]);
    }

    #[test]
    fn only_matching_type_is_invoked() {
        let log = Log::default();
        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(recorder(&log, "sent"));
        {
            let log = Arc::clone(&log);
            dispatcher.subscribe(move |_: &EmailBouncedEvent| log.lock().unwrap().push("bounced".into()));
        }

        dispatcher.publish(&sent("hi")).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["sent:hi"]);
    }

    #[test]
    fn failing_callback_aborts_the_rest() {
        let log = Log::default();
        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(recorder(&log, "before"));
        dispatcher.try_subscribe(|_: &EmailSentEvent| Err("smtp down".into()));
        dispatcher.subscribe(recorder(&log, "after"));

        let err = dispatcher.publish(&sent("hi")).unwrap_err();

        assert_eq!(err.to_string(), "subscriber 1 of `EmailSentEvent` failed: smtp down");
        assert_eq!(*log.lock().unwrap(), vec!["before:hi"]);
    }

    #[test]
    fn callback_may_subscribe_during_publish() {
        let dispatcher = Arc::new(Dispatcher::new());
        {
            let inner = Arc::clone(&dispatcher);
            dispatcher.subscribe(move |_: &EmailBouncedEvent| inner.subscribe(|_: &EmailBouncedEvent| {}));
        }

        assert_eq!(dispatcher.publish(&EmailBouncedEvent).unwrap().delivered(), 1);
        assert_eq!(dispatcher.subscriber_count::<EmailBouncedEvent>(), 2);
        assert_eq!(dispatcher.publish(&EmailBouncedEvent).unwrap().delivered(), 2);
    }

    #[test]
    fn concurrent_subscribers_all_register() {
        let dispatcher = Arc::new(Dispatcher::new());
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let dispatcher = Arc::clone(&dispatcher);
                thread::spawn(move || dispatcher.subscribe(|_: &EmailSentEvent| {}))
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(dispatcher.subscriber_count::<EmailSentEvent>(), 8);
        assert_eq!(dispatcher.publish(&sent("hi")).unwrap(), EventDispatchResult::Finished(8));
    }

    #[test]
    fn registry_survives_a_panicking_callback() {
        let dispatcher = Arc::new(Dispatcher::new());
        dispatcher.subscribe(|_: &EmailBouncedEvent| panic!("mailbox full"));

        let publisher = Arc::clone(&dispatcher);
        let outcome = thread::spawn(move || publisher.publish(&EmailBouncedEvent)).join();
        assert!(outcome.is_err());

        dispatcher.subscribe(|_: &EmailSentEvent| {});
        assert!(dispatcher.is_registered::<EmailSentEvent>());
    }

    #[test]
    #[should_panic(expected = "dispatch name collision")]
    fn subscribing_a_namesake_type_panics() {
        mod shadow {
            pub struct EmailBouncedEvent;
            crate::event!(EmailBouncedEvent);
        }

        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(|_: &EmailBouncedEvent| {});
        dispatcher.subscribe(|_: &shadow::EmailBouncedEvent| {});
    }

    #[test]
    #[should_panic(expected = "dispatch name collision")]
    fn publishing_a_namesake_type_panics() {
        mod shadow {
            pub struct EmailSentEvent;
            crate::event!(EmailSentEvent);
        }

        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(|_: &EmailSentEvent| {});
        let _ = dispatcher.publish(&shadow::EmailSentEvent);
    }

    #[test]
    fn events_need_not_be_thread_safe() {
        struct Draft {
            body: Rc<str>,
        }
        crate::event!(Draft);

        let log = Log::default();
        let dispatcher = Dispatcher::new();
        {
            let log = Arc::clone(&log);
            dispatcher.subscribe(move |draft: &Draft| log.lock().unwrap().push(draft.body.to_string()));
        }

        let result = dispatcher.publish(&Draft { body: Rc::from("hi") }).unwrap();

        assert_eq!(result, EventDispatchResult::Finished(1));
        assert_eq!(*log.lock().unwrap(), vec!["hi"]);
    }

    #[test]
    fn unsubscribe_all_from_and_unsubscribe_all() {
        let dispatcher = Dispatcher::new();
        dispatcher.subscribe(|_: &EmailSentEvent| {});
        dispatcher.subscribe(|_: &EmailBouncedEvent| {});

        dispatcher.unsubscribe_all_from::<EmailSentEvent>();
        assert!(!dispatcher.is_registered::<EmailSentEvent>());
        assert!(dispatcher.is_registered::<EmailBouncedEvent>());

        dispatcher.unsubscribe_all();
        assert!(!dispatcher.is_registered::<EmailBouncedEvent>());
    }
}
