use std::any::Any;
use std::fmt;
use std::panic;

/// A panic payload captured by a [`PanicFilter`](crate::PanicFilter).
///
/// The payload is held exactly as the panic carried it, not stringified and
/// not re-wrapped, so the original value can be inspected by downcast or
/// handed back to the unwinding machinery with [`CaughtPanic::resume`].
pub struct CaughtPanic {
    payload: Box<dyn Any + Send>,
}

impl CaughtPanic {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        Self { payload }
    }

    /// Borrows the original payload.
    pub fn payload(&self) -> &(dyn Any + Send) {
        self.payload.as_ref()
    }

    /// Borrows the payload as a `P`, when that is its type.
    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref()
    }

    /// Recovers the owned payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// The panic message, when the payload is one of the standard string
    /// forms produced by the panic macros.
    pub fn message(&self) -> Option<&str> {
        match self.payload.downcast_ref::<&'static str>() {
            Some(text) => Some(text),
            None => self.payload.downcast_ref::<String>().map(String::as_str),
        }
    }

    /// Continues unwinding with the original payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

impl fmt::Debug for CaughtPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => f.debug_tuple("CaughtPanic").field(&message).finish(),
            None => f.debug_struct("CaughtPanic").finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for CaughtPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "panic: {message}"),
            None => f.write_str("panic with a non-string payload"),
        }
    }
}

impl std::error::Error for CaughtPanic {}
