//! An email service which owns a dispatcher and publishes an event for every email it sends.
//!
//! No logger is installed, so the dispatcher notices sent through `log` are not printed.

use simple_pubsub::{
    event,
    rc::{Dispatcher, Publisher},
    DispatcherConfig, EventDispatchResult, PublishError,
};

#[derive(Debug, Clone)]
pub struct EmailSentEvent {
    pub to: String,
    pub from: String,
    pub body: String,
}
event!(EmailSentEvent);

pub struct EmailService {
    dispatcher: Dispatcher,
}

impl Default for EmailService {
    fn default() -> Self {
        Self {
            dispatcher: Dispatcher::with_config(DispatcherConfig::default().with_label("email")),
        }
    }
}

impl EmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&self, to: &str, from: &str, body: &str) -> Result<EventDispatchResult, PublishError> {
        println!("sending email");
        self.publish(&EmailSentEvent {
            to: to.to_string(),
            from: from.to_string(),
            body: body.to_string(),
        })
    }
}

impl Publisher for EmailService {
    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }
}

fn main() -> Result<(), PublishError> {
    let mut email_service = EmailService::new();

    // Nobody is listening yet.
    email_service.send("a@x.com", "b@x.com", "first")?;

    email_service.subscribe(|e: &EmailSentEvent| println!("{}", e.body));
    email_service.try_subscribe(|e: &EmailSentEvent| {
        if e.to.contains('@') {
            Ok(())
        } else {
            Err(format!("invalid recipient {}", e.to).into())
        }
    });

    let result = email_service.send("a@x.com", "b@x.com", "hi")?;
    println!("delivered to {} subscribers", result.delivered());

    if let Err(err) = email_service.send("nobody", "b@x.com", "lost") {
        println!("{}: {}", err.as_label(), err);
    }
    Ok(())
}
