use crate::types::{Channel, HandlerResult};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

pub(crate) type Handler = Arc<dyn Fn(&dyn Any) -> HandlerResult + Send + Sync>;
pub(crate) type SubscriberMap = HashMap<&'static str, Channel<Handler>>;
