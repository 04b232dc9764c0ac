use std::any::{self, Any};
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe, UnwindSafe};

use futures::FutureExt;
use thiserror::Error;
use tracing::debug;

use crate::adapter::caught::CaughtPanic;
use crate::outcome::{Failure, Outcome, Success};

/// Matches panic payloads of a single type.
///
/// Panic payloads are `Box<dyn Any + Send>`; a selector decides membership
/// by downcast, so it matches exactly the payload type it was built for.
/// [`Selector::any`] matches every unwinding panic.
#[derive(Clone, Copy)]
pub struct Selector {
    matches: fn(&(dyn Any + Send)) -> bool,
    type_name: &'static str,
}

impl Selector {
    /// Selector for payloads of type `P`.
    ///
    /// The standard macro panics carry `&'static str` or [`String`]
    /// payloads; `std::panic::panic_any` carries whatever it was given.
    pub fn of<P: Any>() -> Self {
        Self {
            matches: |payload| payload.is::<P>(),
            type_name: any::type_name::<P>(),
        }
    }

    /// Catch-all selector: matches any unwinding panic.
    ///
    /// Aborts and process exit do not unwind and can never be matched.
    pub fn any() -> Self {
        Self {
            matches: |_| true,
            type_name: "<any>",
        }
    }

    /// Name of the payload type this selector matches.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn matches(&self, payload: &(dyn Any + Send)) -> bool {
        (self.matches)(payload)
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selector").field(&self.type_name).finish()
    }
}

/// Rejected adapter configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The selector collection was empty.
    #[error("a panic filter requires at least one selector")]
    NoSelectors,
}

/// Converts panics into [`Failure`] values according to a selector list.
///
/// The list is ordered and non-empty; the first matching selector wins.
/// A panic matching no selector is not converted and resumes unwinding
/// with its original payload.
#[derive(Debug, Clone)]
pub struct PanicFilter {
    selectors: Vec<Selector>,
}

impl PanicFilter {
    /// Builds a filter from an ordered selector collection.
    ///
    /// Fails with [`FilterError::NoSelectors`] when the collection is
    /// empty, before anything is wrapped or invoked.
    pub fn new(selectors: impl IntoIterator<Item = Selector>) -> Result<Self, FilterError> {
        let selectors: Vec<Selector> = selectors.into_iter().collect();
        if selectors.is_empty() {
            return Err(FilterError::NoSelectors);
        }
        Ok(Self { selectors })
    }

    /// Filter that captures every unwinding panic.
    pub fn any() -> Self {
        Self {
            selectors: vec![Selector::any()],
        }
    }

    /// Runs `f`, capturing a selected panic as a [`Failure`].
    ///
    /// A normal return becomes `Success`; a panic whose payload matches a
    /// selector becomes `Failure` holding the payload unchanged; any other
    /// panic resumes unwinding.
    pub fn catch<T, F>(&self, f: F) -> Outcome<T, CaughtPanic>
    where
        F: FnOnce() -> T + UnwindSafe,
    {
        match panic::catch_unwind(f) {
            Ok(value) => Success(value),
            Err(payload) => self.absorb(payload),
        }
    }

    /// Awaits `future`, capturing a selected panic as a [`Failure`].
    ///
    /// The same three-way contract as [`PanicFilter::catch`], applied to
    /// the awaited completion. Dropping the returned future drops the inner
    /// one; a cancelled call produces no outcome.
    pub async fn catch_future<Fut>(&self, future: Fut) -> Outcome<Fut::Output, CaughtPanic>
    where
        Fut: Future,
    {
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(value) => Success(value),
            Err(payload) => self.absorb(payload),
        }
    }

    fn absorb<T>(&self, payload: Box<dyn Any + Send>) -> Outcome<T, CaughtPanic> {
        match self.matched(payload.as_ref()) {
            Some(selector) => {
                debug!(selector = selector.type_name(), "captured panic as failure");
                Failure(CaughtPanic::new(payload))
            }
            None => {
                debug!("panic matched no selector, resuming unwind");
                panic::resume_unwind(payload)
            }
        }
    }

    fn matched(&self, payload: &(dyn Any + Send)) -> Option<&Selector> {
        self.selectors.iter().find(|selector| selector.matches(payload))
    }
}

/// The default filter captures every unwinding panic.
impl Default for PanicFilter {
    fn default() -> Self {
        Self::any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_matches_only_its_payload_type() {
        let payload: Box<dyn Any + Send> = Box::new(5_u8);
        assert!(Selector::of::<u8>().matches(payload.as_ref()));
        assert!(!Selector::of::<u16>().matches(payload.as_ref()));
        assert!(Selector::any().matches(payload.as_ref()));
    }

    #[test]
    fn test_filter_rejects_empty_selector_collection() {
        assert!(matches!(PanicFilter::new([]), Err(FilterError::NoSelectors)));
        assert!(PanicFilter::new([Selector::any()]).is_ok());
    }

    #[test]
    fn test_selector_debug_names_the_payload_type() {
        let rendered = format!("{:?}", Selector::of::<u8>());
        assert_eq!(rendered, "Selector(\"u8\")");
    }
}
