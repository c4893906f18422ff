mod bus;
mod publish;
pub(crate) mod types;

pub use bus::Dispatcher;
pub use publish::Publisher;
