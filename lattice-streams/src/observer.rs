//! Three-capability observer record handed to stream providers.

use crate::provider::ProviderError;
use crate::stream_id::SequenceToken;

/// Capability set a subscriber registers with a provider: a plain record of
/// three function values, so a provider holds exactly the powers the
/// subscriber granted and nothing else.
///
/// Calls are enqueue-only from the provider's perspective: the observers
/// built by a consumer cell push the upcall into the cell's mailbox and
/// return immediately, and the cell task performs the actual delivery in
/// arrival order.
pub struct StreamObserver<T> {
    on_next: Box<dyn Fn(T, Option<SequenceToken>) + Send + Sync>,
    on_completed: Box<dyn Fn() + Send + Sync>,
    on_error: Box<dyn Fn(ProviderError) + Send + Sync>,
}

impl<T> StreamObserver<T> {
    pub fn new(
        on_next: impl Fn(T, Option<SequenceToken>) + Send + Sync + 'static,
        on_completed: impl Fn() + Send + Sync + 'static,
        on_error: impl Fn(ProviderError) + Send + Sync + 'static,
    ) -> Self {
        Self {
            on_next: Box::new(on_next),
            on_completed: Box::new(on_completed),
            on_error: Box::new(on_error),
        }
    }

    /// Hands one item to the subscriber.
    pub fn next(&self, item: T, token: Option<SequenceToken>) {
        (self.on_next)(item, token);
    }

    /// Signals that the stream will deliver no further items.
    pub fn completed(&self) {
        (self.on_completed)();
    }

    /// Reports a stream-level fault without revoking the registration.
    pub fn error(&self, err: ProviderError) {
        (self.on_error)(err);
    }
}

#[cfg(test)]
mod tests {
    use super::StreamObserver;
    use crate::provider::ProviderError;
    use crate::stream_id::SequenceToken;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn each_capability_dispatches_to_its_own_closure() {
        let next_calls = Arc::new(AtomicUsize::new(0));
        let completed_calls = Arc::new(AtomicUsize::new(0));
        let error_calls = Arc::new(AtomicUsize::new(0));

        let observer = {
            let next_calls = next_calls.clone();
            let completed_calls = completed_calls.clone();
            let error_calls = error_calls.clone();
            StreamObserver::new(
                move |_item: u32, _token| {
                    next_calls.fetch_add(1, Ordering::Relaxed);
                },
                move || {
                    completed_calls.fetch_add(1, Ordering::Relaxed);
                },
                move |_err| {
                    error_calls.fetch_add(1, Ordering::Relaxed);
                },
            )
        };

        observer.next(10, Some(SequenceToken::new(1)));
        observer.next(20, None);
        observer.completed();
        observer.error(ProviderError::subscribe("gone"));

        assert_eq!(next_calls.load(Ordering::Relaxed), 2);
        assert_eq!(completed_calls.load(Ordering::Relaxed), 1);
        assert_eq!(error_calls.load(Ordering::Relaxed), 1);
    }
}
