use std::future::Future;

use crate::error::InstrumentError;

use super::timer::Timer;
use super::tracker::Tracker;

/// Source of an event name for one invocation with arguments `A`.
pub trait EventName<A: ?Sized> {
    /// Produces the event name for `args`.
    ///
    /// # Errors
    ///
    /// Returns an error when no name can be built from `args`; the wrapper
    /// then falls back to its default name.
    fn event_name(&self, args: &A) -> Result<String, InstrumentError>;
}

impl<A: ?Sized> EventName<A> for &'static str {
    fn event_name(&self, _args: &A) -> Result<String, InstrumentError> {
        Ok((*self).to_owned())
    }
}

impl<A: ?Sized> EventName<A> for String {
    fn event_name(&self, _args: &A) -> Result<String, InstrumentError> {
        Ok(self.clone())
    }
}

/// Name computed from the call's arguments.
#[derive(Debug, Clone, Copy)]
pub struct Derived<F>(pub F);

impl<A, F> EventName<A> for Derived<F>
where
    A: ?Sized,
    F: Fn(&A) -> Result<String, InstrumentError>,
{
    fn event_name(&self, args: &A) -> Result<String, InstrumentError> {
        (self.0)(args)
    }
}

/// An operation wrapped with per-invocation timing.
///
/// The wrapper only observes: it returns exactly what the operation returns
/// and adds no tasks, locks held across awaits, or suspension points.
#[derive(Debug, Clone)]
pub struct Instrumented<N, F> {
    tracker: Tracker,
    name: N,
    fallback: &'static str,
    operation: F,
}

/// Wraps `operation` so every call records one event named by `name`, or by
/// `fallback` when the name cannot be derived.
pub fn instrument<N, F>(
    tracker: &Tracker,
    name: N,
    fallback: &'static str,
    operation: F,
) -> Instrumented<N, F> {
    Instrumented {
        tracker: tracker.clone(),
        name,
        fallback,
        operation,
    }
}

impl<N, F> Instrumented<N, F> {
    /// Runs a blocking operation inside a timer.
    pub fn call_blocking<A, T>(&self, args: A) -> T
    where
        N: EventName<A>,
        F: Fn(A) -> T,
    {
        let _timer = Timer::start(&self.tracker, self.resolve_name(&args));
        (self.operation)(args)
    }

    /// Awaits an asynchronous operation inside a timer scoped to this call.
    pub async fn call<A, Fut>(&self, args: A) -> Fut::Output
    where
        N: EventName<A>,
        F: Fn(A) -> Fut,
        Fut: Future,
    {
        let timer = Timer::start(&self.tracker, self.resolve_name(&args));
        let output = (self.operation)(args).await;
        timer.finish();
        output
    }

    fn resolve_name<A>(&self, args: &A) -> String
    where
        N: EventName<A>,
    {
        match self.name.event_name(args) {
            Ok(name) => name,
            Err(err) => {
                tracing::debug!(
                    error = %err,
                    fallback = self.fallback,
                    "using fallback event name"
                );
                self.fallback.to_owned()
            }
        }
    }
}
