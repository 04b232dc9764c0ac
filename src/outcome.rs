use std::any::Any;
use std::fmt;
use std::panic::panic_any;

use serde::{Deserialize, Serialize};

/// The result of a fallible computation, as a value.
///
/// Exactly one of two variants: [`Success`] holding the produced value, or
/// [`Failure`] holding the error. There is no third state and no way to
/// mutate a constructed outcome.
///
/// Equality and hashing are variant-aware: two outcomes are equal only when
/// they are the same variant with equal payloads, and the derived hash mixes
/// the variant discriminant with the payload hash, so `Success(v)` and
/// `Failure(v)` land in different buckets.
///
/// The serde representation is externally tagged (`{"Success":123}`) and
/// round-trips to an equal value.
///
/// # Example
///
/// ```rust
/// use upshot::{Failure, Outcome, Success};
///
/// fn describe(outcome: Outcome<u32, String>) -> String {
///     match outcome {
///         Success(n) => format!("got {n}"),
///         Failure(reason) => reason,
///     }
/// }
///
/// assert_eq!(describe(Success(7)), "got 7");
/// assert_eq!(describe(Failure("no luck".into())), "no luck");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome<T, E> {
    /// The computation completed and produced this value.
    Success(T),
    /// The computation failed with this error.
    Failure(E),
}

pub use Outcome::{Failure, Success};

impl<T, E> Outcome<T, E> {
    /// Returns `true` for the [`Success`] variant.
    pub const fn is_success(&self) -> bool {
        matches!(self, Success(_))
    }

    /// Returns `true` for the [`Failure`] variant.
    pub const fn is_failure(&self) -> bool {
        matches!(self, Failure(_))
    }

    /// Returns the success value.
    ///
    /// On a [`Failure`] this panics with an [`UnwrapError`] payload that
    /// carries the offending outcome; the payload can be recovered with
    /// `catch_unwind` and a downcast.
    pub fn unwrap(self) -> T
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        match self {
            Success(value) => value,
            failure @ Failure(_) => panic_any(UnwrapError::new(
                "called `Outcome::unwrap()` on a `Failure` value",
                failure,
            )),
        }
    }

    /// Returns the success value, or `default` on a [`Failure`].
    ///
    /// On a [`Success`] the `default` argument is ignored.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Success(value) => value,
            Failure(_) => default,
        }
    }

    /// Returns the error held by a [`Failure`].
    ///
    /// On a [`Success`] this panics with an [`UnwrapError`] payload, the
    /// same way [`Outcome::unwrap`] does on a [`Failure`].
    pub fn unwrap_failure(self) -> E
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        match self {
            success @ Success(_) => panic_any(UnwrapError::new(
                "called `Outcome::unwrap_failure()` on a `Success` value",
                success,
            )),
            Failure(error) => error,
        }
    }
}

/// Marker success for operations whose success carries no data.
///
/// `Outcome::<bool, E>::default()` is `Success(true)`. `Failure` has no
/// zero-argument form; an error payload is always explicit.
impl<E> Default for Outcome<bool, E> {
    fn default() -> Self {
        Success(true)
    }
}

/// Tests whether a type-erased value is an `Outcome<T, E>`, either variant.
///
/// Useful at `dyn Any` boundaries such as panic payloads, where the static
/// type has been erased and `match` is unavailable.
pub fn is_outcome<T: Any, E: Any>(value: &dyn Any) -> bool {
    value.is::<Outcome<T, E>>()
}

/// Panic payload raised when an extraction method is invoked on the wrong
/// variant.
///
/// Carries the offending [`Outcome`] unchanged, for diagnostic inspection
/// after a `catch_unwind`. The outcome is never mutated and equality with
/// the original value is preserved.
pub struct UnwrapError<T, E> {
    message: &'static str,
    outcome: Outcome<T, E>,
}

impl<T, E> UnwrapError<T, E> {
    fn new(message: &'static str, outcome: Outcome<T, E>) -> Self {
        Self { message, outcome }
    }

    /// The operation and the variant it was misapplied to.
    pub fn message(&self) -> &'static str {
        self.message
    }

    /// The outcome that triggered the failure.
    pub fn outcome(&self) -> &Outcome<T, E> {
        &self.outcome
    }

    /// Recovers the outcome that triggered the failure.
    pub fn into_outcome(self) -> Outcome<T, E> {
        self.outcome
    }
}

impl<T, E> fmt::Debug for UnwrapError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self.outcome {
            Success(_) => "Success",
            Failure(_) => "Failure",
        };
        f.debug_struct("UnwrapError")
            .field("message", &self.message)
            .field("variant", &variant)
            .finish()
    }
}

impl<T, E> fmt::Display for UnwrapError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl<T, E> std::error::Error for UnwrapError<T, E> {}
