//! Status reporting for documentation runs

mod handler;
mod logging;
mod reporter;

pub use handler::{CompositeHandler, NoOpHandler, StatusEvent, StatusHandler};
pub use logging::LoggingHandler;
pub use reporter::{format_event, LineReporter, STATUS_PREFIX};
