use std::sync::Arc;

use tracing::{debug, error, info};

use crate::clock::Clock;
use crate::errors::ServiceError;
use crate::timers::{elapsed::ElapsedView, store::TimerStore};

/// Business operations over a [`TimerStore`], with "now" taken from an injected [`Clock`].
#[derive(Clone)]
pub struct TimerService {
    store: Arc<dyn TimerStore>,
    clock: Arc<dyn Clock>,
}

impl TimerService {
    pub fn new(store: Arc<dyn TimerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record `timestamp` as the last click of `label`.
    ///
    /// Both inputs must be present; a blank label counts as missing. Nothing is
    /// mutated when validation fails. The label is stored exactly as given.
    pub async fn record_click(&self, label: Option<&str>, timestamp: Option<i64>) -> Result<(), ServiceError> {
        let Some(label) = present(label) else {
            return Err(ServiceError::missing("label"));
        };
        let timestamp = timestamp.ok_or_else(|| ServiceError::missing("timestamp"))?;

        self.store.record(label.to_string(), timestamp).await.map_err(|e| {
            error!(event = "record_failed", label, error = %e, "failed to persist click");
            e
        })?;
        info!(event = "click_recorded", label, timestamp, "click recorded");
        Ok(())
    }

    /// Elapsed time since the last click, or the "never clicked" sentinel.
    pub async fn elapsed(&self, label: Option<&str>) -> ElapsedView {
        let Some(label) = present(label) else {
            return ElapsedView::never_clicked();
        };
        let Some(timestamp) = self.store.get(label).await else {
            return ElapsedView::never_clicked();
        };

        let now = self.clock.now_millis();
        if timestamp > now {
            // caller clocks are authoritative; a future timestamp is reported as-is
            debug!(event = "future_timestamp", label, timestamp, now, "stored timestamp is ahead of server clock");
        }
        ElapsedView::since(timestamp, now)
    }

    pub async fn reset_all(&self) -> Result<(), ServiceError> {
        let cleared = self.store.len().await;
        self.store.reset().await.map_err(|e| {
            error!(event = "reset_failed", error = %e, "failed to persist reset");
            e
        })?;
        info!(event = "reset", cleared, "all timers reset");
        Ok(())
    }
}

/// `None` for an absent or whitespace-only label; otherwise the label untouched.
fn present(label: Option<&str>) -> Option<&str> {
    label.filter(|l| !l.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Mutex;

    /// In-memory store whose persistence can be switched off.
    #[derive(Default)]
    struct MemStore {
        map: Mutex<HashMap<String, i64>>,
        fail_writes: AtomicBool,
    }

    impl MemStore {
        fn check(&self) -> Result<(), ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Persistence("disk full".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TimerStore for MemStore {
        async fn get(&self, label: &str) -> Option<i64> { self.map.lock().await.get(label).copied() }
        async fn record(&self, label: String, timestamp: i64) -> Result<(), ServiceError> {
            self.map.lock().await.insert(label, timestamp);
            self.check()
        }
        async fn reset(&self) -> Result<(), ServiceError> {
            self.map.lock().await.clear();
            self.check()
        }
        async fn len(&self) -> usize { self.map.lock().await.len() }
    }

    fn service(now: i64) -> (TimerService, Arc<MemStore>, Arc<FixedClock>) {
        let store = Arc::new(MemStore::default());
        let clock = Arc::new(FixedClock::new(now));
        (TimerService::new(store.clone(), clock.clone()), store, clock)
    }

    #[tokio::test]
    async fn coffee_scenario() -> Result<(), ServiceError> {
        let (svc, _, clock) = service(1_000);
        svc.record_click(Some("coffee"), Some(1_000)).await?;
        clock.advance(3_725_000);

        let view = svc.elapsed(Some("coffee")).await;
        assert_eq!(view.elapsed_text, "1h 2m 5s since last click.");
        assert_eq!(view.timestamp, Some(1_000));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_or_missing_label_is_never_clicked() {
        let (svc, _, _) = service(0);
        assert_eq!(svc.elapsed(Some("tea")).await, ElapsedView::never_clicked());
        assert_eq!(svc.elapsed(None).await, ElapsedView::never_clicked());
        assert_eq!(svc.elapsed(Some("  ")).await, ElapsedView::never_clicked());
    }

    #[tokio::test]
    async fn missing_inputs_are_rejected_without_mutation() -> Result<(), ServiceError> {
        let (svc, store, _) = service(0);
        svc.record_click(Some("a"), Some(5)).await?;

        assert!(matches!(svc.record_click(Some("a"), None).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.record_click(None, Some(9)).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.record_click(Some(" "), Some(9)).await, Err(ServiceError::Validation(_))));

        assert_eq!(svc.elapsed(Some("a")).await.timestamp, Some(5));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn labels_are_matched_exactly() -> Result<(), ServiceError> {
        let (svc, store, _) = service(0);
        svc.record_click(Some(" coffee"), Some(7)).await?;
        svc.record_click(Some("coffee"), Some(9)).await?;

        assert_eq!(store.len().await, 2);
        assert_eq!(store.get(" coffee").await, Some(7));
        assert_eq!(svc.elapsed(Some(" coffee")).await.timestamp, Some(7));
        assert_eq!(svc.elapsed(Some("coffee")).await.timestamp, Some(9));
        assert_eq!(svc.elapsed(Some("coffee ")).await, ElapsedView::never_clicked());
        Ok(())
    }

    #[tokio::test]
    async fn last_write_wins() -> Result<(), ServiceError> {
        let (svc, _, _) = service(100);
        svc.record_click(Some("a"), Some(50)).await?;
        svc.record_click(Some("a"), Some(10)).await?;
        assert_eq!(svc.elapsed(Some("a")).await.timestamp, Some(10));
        Ok(())
    }

    #[tokio::test]
    async fn reset_clears_and_is_repeatable() -> Result<(), ServiceError> {
        let (svc, _, _) = service(0);
        svc.record_click(Some("a"), Some(1)).await?;
        svc.record_click(Some("b"), Some(2)).await?;

        svc.reset_all().await?;
        svc.reset_all().await?;
        assert_eq!(svc.elapsed(Some("a")).await, ElapsedView::never_clicked());
        assert_eq!(svc.elapsed(Some("b")).await, ElapsedView::never_clicked());
        Ok(())
    }

    #[tokio::test]
    async fn persistence_failures_surface() -> Result<(), ServiceError> {
        let (svc, store, _) = service(0);
        svc.record_click(Some("a"), Some(1)).await?;
        store.fail_writes.store(true, Ordering::SeqCst);

        assert!(matches!(svc.record_click(Some("b"), Some(2)).await, Err(ServiceError::Persistence(_))));
        assert!(matches!(svc.reset_all().await, Err(ServiceError::Persistence(_))));
        // memory was cleared before the write failed
        assert_eq!(store.len().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn future_timestamp_yields_negative_text() -> Result<(), ServiceError> {
        let (svc, _, _) = service(0);
        svc.record_click(Some("later"), Some(2_000)).await?;
        let view = svc.elapsed(Some("later")).await;
        assert_eq!(view.elapsed_text, "-1h -1m -2s since last click.");
        assert_eq!(view.timestamp, Some(2_000));
        Ok(())
    }
}
