use std::panic::panic_any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use upshot::{PanicFilter, Selector};

/// Stands in for a domain error raised by wrapped async code.
#[derive(Debug, PartialEq)]
struct Rejected(&'static str);

/// A panic the adapters under test are not configured to capture.
#[derive(Debug)]
struct Unrelated;

async fn double(value: i32) -> i32 {
    tokio::task::yield_now().await;
    value * 2
}

async fn reject(_value: i32) -> i32 {
    tokio::task::yield_now().await;
    panic_any(Rejected("rejected"))
}

async fn blow_up() -> i32 {
    tokio::task::yield_now().await;
    panic_any(Unrelated)
}

#[tokio::test]
async fn test_catch_future_returns_success_after_completion() {
    let filter = PanicFilter::new([Selector::of::<Rejected>()]).unwrap();
    let outcome = filter.catch_future(double(123)).await;
    assert_eq!(outcome.unwrap(), 246);
}

#[tokio::test]
async fn test_catch_future_converts_selected_panic_to_failure() {
    let filter = PanicFilter::new([Selector::of::<Rejected>()]).unwrap();
    let caught = filter.catch_future(reject(123)).await.unwrap_failure();
    assert_eq!(caught.downcast_ref::<Rejected>(), Some(&Rejected("rejected")));
}

#[tokio::test]
async fn test_catch_future_propagates_unselected_panic_unchanged() {
    let filter = PanicFilter::new([Selector::of::<Rejected>()]).unwrap();
    let payload = AssertUnwindSafe(filter.catch_future(blow_up()))
        .catch_unwind()
        .await
        .unwrap_err();
    assert!(payload.is::<Unrelated>());
}

#[tokio::test]
async fn test_adapt_async_wraps_callables() {
    let filter = PanicFilter::new([Selector::of::<Rejected>()]).unwrap();

    let good = filter.adapt_async(double);
    assert_eq!(good.call((21,)).await.unwrap(), 42);

    let bad = filter.adapt_async(reject);
    let caught = bad.call((1,)).await.unwrap_failure();
    assert_eq!(caught.downcast_ref::<Rejected>(), Some(&Rejected("rejected")));
}

#[tokio::test]
async fn test_adapt_async_filters_panics_raised_before_the_first_suspension() {
    let filter = PanicFilter::new([Selector::of::<Rejected>()]).unwrap();
    let wrapper = filter.adapt_async(|value: i32| {
        if value < 0 {
            panic_any(Rejected("negative"));
        }
        async move { value + 1 }
    });

    assert_eq!(wrapper.call((1,)).await.unwrap(), 2);
    assert!(wrapper.call((-1,)).await.is_failure());
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_dropping_the_wrapper_cancels_the_inner_future() {
    let filter = PanicFilter::any();
    let dropped = Arc::new(AtomicBool::new(false));
    let guard = SetOnDrop(Arc::clone(&dropped));

    let wrapped = filter.catch_future(async move {
        let _guard = guard;
        futures::future::pending::<i32>().await
    });
    drop(wrapped);

    // The inner future was dropped without completing; no outcome exists.
    assert!(dropped.load(Ordering::SeqCst));
}
