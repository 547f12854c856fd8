pub mod config;
pub mod errors;
pub mod event_bus;
pub mod tracing;

pub use config::*;
pub use errors::*;
pub use event_bus::*;
pub use self::tracing::init_tracing;
