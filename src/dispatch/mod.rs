//! Per-backend dispatch: selection, detection gate, availability probe,
//! generator run, outcome

mod dispatcher;
mod health;
mod outcome;
mod probe;
mod runner;
mod selection;

pub use dispatcher::{Dispatcher, OUTPUT_MARKER};
pub use health::{check_health, HealthEntry};
pub use outcome::{BackendReport, Outcome, OutcomeKind, RunReport};
pub use probe::{SystemProbe, ToolProbe};
pub use runner::{CommandRunner, ExitInfo, ProcessRunner};
pub use selection::Selection;
