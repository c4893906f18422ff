//! Minimal in-process publish / subscribe dispatcher.
//!
//! Producers publish events, consumers subscribe callbacks per event type, and the dispatcher
//! invokes the matching callbacks synchronously, in the order they were subscribed.
//!
//! Two flavours share the same semantics:
//! - [`rc::Dispatcher`] for single-thread use; `subscribe` takes `&mut self`.
//! - [`sync::Dispatcher`] which locks internally and can be shared between threads.
//!
//! Each event type carries a constant dispatch name (see [`Event`]), which is the registry key.
//!
//! ```rust
//! use simple_pubsub::{event, rc::Dispatcher, EventDispatchResult};
//!
//! pub struct EmailSentEvent {
//!     pub to: String,
//!     pub from: String,
//!     pub body: String,
//! }
//! event!(EmailSentEvent);
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.subscribe(|e: &EmailSentEvent| println!("{}", e.body));
//!
//! let result = dispatcher
//!     .publish(&EmailSentEvent {
//!         to: "a@x.com".into(),
//!         from: "b@x.com".into(),
//!         body: "hi".into(),
//!     })
//!     .unwrap();
//! assert_eq!(result, EventDispatchResult::Finished(1));
//! ```
//!
//! Publishing an event nobody subscribed to is not an error: it is logged through the `log`
//! facade and `publish` returns [`EventDispatchResult::NotNeeded`].
mod config;
mod error;
mod event;
mod types;

pub mod rc;
pub mod sync;

pub use config::DispatcherConfig;
pub use error::PublishError;
pub use event::Event;
pub use types::{BoxError, EventDispatchResult, HandlerResult};
