//! Timing instrumentation: a shared event log, scoped timers that append to
//! it, and a wrapper that times arbitrary sync or async operations.
mod event;
mod instrument;
mod report;
mod timer;
mod tracker;


pub use event::{Metadata, TimingEvent};
pub use instrument::{Derived, EventName, Instrumented, instrument};
pub use report::{NO_EVENTS_NOTICE, REPORT_TITLE, report_lines};
pub use timer::Timer;
pub use tracker::Tracker;
