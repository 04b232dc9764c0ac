use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::adapter::caught::CaughtPanic;
use crate::adapter::filter::PanicFilter;
use crate::outcome::{Failure, Outcome, Success};

/// A callable of fixed arity, invoked with its arguments packed as a tuple.
///
/// Implemented for `Fn` closures and functions of zero through eight
/// parameters, so wrappers forward parameter and return types unchanged.
pub trait Call<Args> {
    /// Value produced by a completed invocation.
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;
}

/// Async counterpart of [`Call`]: invocation yields a future.
pub trait AsyncCall<Args> {
    /// Value produced once the future completes.
    type Output;
    type Future: Future<Output = Self::Output>;

    fn invoke(&self, args: Args) -> Self::Future;
}

macro_rules! impl_call_for_arity {
    ($($param:ident),*) => {
        impl<Func, Out, $($param),*> Call<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($param,)*): ($($param,)*)) -> Out {
                self($($param),*)
            }
        }

        impl<Func, Fut, $($param),*> AsyncCall<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Fut,
            Fut: Future,
        {
            type Output = Fut::Output;
            type Future = Fut;

            #[allow(non_snake_case)]
            fn invoke(&self, ($($param,)*): ($($param,)*)) -> Fut {
                self($($param),*)
            }
        }
    };
}

impl_call_for_arity!();
impl_call_for_arity!(A1);
impl_call_for_arity!(A1, A2);
impl_call_for_arity!(A1, A2, A3);
impl_call_for_arity!(A1, A2, A3, A4);
impl_call_for_arity!(A1, A2, A3, A4, A5);
impl_call_for_arity!(A1, A2, A3, A4, A5, A6);
impl_call_for_arity!(A1, A2, A3, A4, A5, A6, A7);
impl_call_for_arity!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Callable wrapper produced by [`PanicFilter::adapt`].
///
/// Invocation returns an [`Outcome`] instead of panicking: a normal return
/// becomes `Success`, a panic matching the filter becomes `Failure`, any
/// other panic resumes unwinding. Invocations are independent; the wrapper
/// keeps no state between calls.
pub struct Adapted<F> {
    f: F,
    filter: PanicFilter,
}

impl<F> Adapted<F> {
    pub(crate) fn new(f: F, filter: PanicFilter) -> Self {
        Self { f, filter }
    }

    /// Invokes the wrapped callable with `args` packed as a tuple.
    pub fn call<Args>(&self, args: Args) -> Outcome<F::Output, CaughtPanic>
    where
        F: Call<Args>,
    {
        self.filter.catch(AssertUnwindSafe(|| self.f.invoke(args)))
    }

    /// Hands back the original callable.
    pub fn into_inner(self) -> F {
        self.f
    }
}

/// Callable wrapper produced by [`PanicFilter::adapt_async`].
///
/// Same contract as [`Adapted`], with invocation suspending while the inner
/// future runs. Dropping the returned future cancels the call; no outcome
/// is produced.
pub struct AdaptedAsync<F> {
    f: F,
    filter: PanicFilter,
}

impl<F> AdaptedAsync<F> {
    pub(crate) fn new(f: F, filter: PanicFilter) -> Self {
        Self { f, filter }
    }

    /// Invokes the wrapped callable and awaits its future.
    ///
    /// Building the future runs caller code before the first suspension;
    /// a panic there is subject to the same filter as one raised while
    /// awaiting.
    pub async fn call<Args>(&self, args: Args) -> Outcome<F::Output, CaughtPanic>
    where
        F: AsyncCall<Args>,
    {
        let future = match self.filter.catch(AssertUnwindSafe(|| self.f.invoke(args))) {
            Success(future) => future,
            Failure(caught) => return Failure(caught),
        };
        self.filter.catch_future(future).await
    }

    /// Hands back the original callable.
    pub fn into_inner(self) -> F {
        self.f
    }
}

impl PanicFilter {
    /// Wraps a callable so invocation returns an [`Outcome`] instead of
    /// panicking.
    pub fn adapt<F>(&self, f: F) -> Adapted<F> {
        Adapted::new(f, self.clone())
    }

    /// Wraps an async callable; the wrapper suspends while the inner future
    /// runs.
    pub fn adapt_async<F>(&self, f: F) -> AdaptedAsync<F> {
        AdaptedAsync::new(f, self.clone())
    }
}
