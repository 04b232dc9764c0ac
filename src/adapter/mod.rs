//! Adapters between panicking callables and [`Outcome`](crate::Outcome)
//! values.
//!
//! A [`PanicFilter`] holds an ordered, non-empty list of [`Selector`]s. Code
//! run under the filter produces `Success` on normal return; a panic whose
//! payload matches a selector is captured as `Failure(CaughtPanic)` with the
//! payload preserved unchanged; any other panic resumes unwinding. Each
//! invocation is independent and the filter keeps no state across calls.

mod call;
mod caught;
mod filter;

pub use call::{Adapted, AdaptedAsync, AsyncCall, Call};
pub use caught::CaughtPanic;
pub use filter::{FilterError, PanicFilter, Selector};
