use crate::types::{Channel, HandlerResult};
use std::any::Any;
use std::collections::HashMap;

pub(crate) type Handler = Box<dyn Fn(&dyn Any) -> HandlerResult>;
pub(crate) type SubscriberMap = HashMap<&'static str, Channel<Handler>>;
