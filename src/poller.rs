//! Source poller - one fetch / dedup / forward / record cycle
//!
//! Ordering per notification:
//! 1. look up `(thread_id, updated_at)` in the seen store
//! 2. if new: resolve URL, classify, push
//! 3. record as seen after the push attempt, whatever its outcome
//!
//! A failed push is therefore never retried (at most one delivery attempt per
//! thread version). Dry-run pushes are not recorded.

use tracing::{debug, error, info, warn};

use crate::error::CycleError;
use crate::github::{resolve_html_url, GitHubNotification, NotificationSource};
use crate::notification::channel::{PushChannel, SendResult};
use crate::notification::formatter::build_push_message;
use crate::notification::store::SeenStore;

/// Outcome counters for one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Unread notifications returned by the source
    pub fetched: usize,
    /// Pushes accepted by the endpoint
    pub forwarded: usize,
    /// Pushes that failed (still recorded as seen)
    pub delivery_failures: usize,
    /// Already seen, or skipped by the channel (dry-run)
    pub skipped: usize,
    /// Seen-store upserts that failed
    pub record_failures: usize,
}

/// Polls a notification source and forwards unseen updates
pub struct SourcePoller<S, C, D> {
    source: S,
    channel: C,
    store: D,
}

impl<S, C, D> SourcePoller<S, C, D>
where
    S: NotificationSource,
    C: PushChannel,
    D: SeenStore,
{
    pub fn new(source: S, channel: C, store: D) -> Self {
        Self {
            source,
            channel,
            store,
        }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Run one cycle
    ///
    /// A fetch failure returns before any push or store write. A store lookup
    /// failure stops the remaining items; entries already recorded stay.
    pub async fn poll_once(&mut self) -> Result<CycleReport, CycleError> {
        let notifications = self.source.fetch_unread().await?;

        let mut report = CycleReport {
            fetched: notifications.len(),
            ..CycleReport::default()
        };

        for notification in &notifications {
            if !self.store.is_new(&notification.id, &notification.updated_at)? {
                debug!(thread_id = %notification.id, "Already forwarded, skipping");
                report.skipped += 1;
                continue;
            }

            match self.forward(notification).await {
                Some(SendResult::Sent) => report.forwarded += 1,
                Some(SendResult::Skipped(reason)) => {
                    debug!(thread_id = %notification.id, reason = %reason, "Push skipped, not recording");
                    report.skipped += 1;
                    continue;
                }
                None => report.delivery_failures += 1,
            }

            if let Err(e) = self.store.record(&notification.id, &notification.updated_at) {
                warn!(
                    thread_id = %notification.id,
                    error = %e,
                    "Failed to record notification as seen"
                );
                report.record_failures += 1;
            }
        }

        Ok(report)
    }

    /// Push one notification; `None` means the attempt failed and was logged
    async fn forward(&self, notification: &GitHubNotification) -> Option<SendResult> {
        let subject = &notification.subject;
        let repository = &notification.repository.full_name;
        let url = resolve_html_url(subject);
        let message = build_push_message(repository, &subject.title, &subject.kind, &notification.reason, &url);

        match self.channel.send(&message).await {
            Ok(SendResult::Sent) => {
                info!(
                    channel = self.channel.name(),
                    repo = %repository,
                    kind = %subject.kind,
                    priority = %message.priority,
                    "Notification pushed"
                );
                Some(SendResult::Sent)
            }
            Ok(skipped) => Some(skipped),
            Err(e) => {
                error!(
                    channel = self.channel.name(),
                    thread_id = %notification.id,
                    repo = %repository,
                    error = %e,
                    "Push delivery failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeliveryError, SourceError, StoreError};
    use crate::github::{Repository, Subject};
    use crate::notification::channel::PushMessage;
    use crate::notification::store::SqliteSeenStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticSource(Vec<GitHubNotification>);

    #[async_trait]
    impl NotificationSource for StaticSource {
        async fn fetch_unread(&self) -> Result<Vec<GitHubNotification>, SourceError> {
            Ok(self.0.clone())
        }
    }

    /// 测试用的 mock 渠道，可配置为失败
    #[derive(Default)]
    struct MockChannel {
        sent: Mutex<Vec<PushMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl PushChannel for MockChannel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn send(&self, message: &PushMessage) -> Result<SendResult, DeliveryError> {
            self.sent.lock().unwrap().push(message.clone());
            if self.fail {
                Err(DeliveryError::Status { status: 503, body: "down".to_string() })
            } else {
                Ok(SendResult::Sent)
            }
        }
    }

    /// Store whose lookups fail after `fail_after` successful calls
    struct BrokenLookupStore {
        inner: SqliteSeenStore,
        lookups: std::cell::Cell<usize>,
        fail_after: usize,
    }

    impl SeenStore for BrokenLookupStore {
        fn is_new(&self, thread_id: &str, updated_at: &str) -> Result<bool, StoreError> {
            let n = self.lookups.get();
            self.lookups.set(n + 1);
            if n >= self.fail_after {
                return Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
            }
            self.inner.is_new(thread_id, updated_at)
        }

        fn record(&mut self, thread_id: &str, updated_at: &str) -> Result<(), StoreError> {
            self.inner.record(thread_id, updated_at)
        }
    }

    /// Store whose lookups succeed but every upsert fails
    struct ReadOnlyStore;

    impl SeenStore for ReadOnlyStore {
        fn is_new(&self, _thread_id: &str, _updated_at: &str) -> Result<bool, StoreError> {
            Ok(true)
        }

        fn record(&mut self, _thread_id: &str, _updated_at: &str) -> Result<(), StoreError> {
            Err(StoreError::Sqlite(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_READONLY),
                Some("attempt to write a readonly database".to_string()),
            )))
        }
    }

    fn notification(id: &str, version: &str) -> GitHubNotification {
        GitHubNotification {
            id: id.to_string(),
            updated_at: version.to_string(),
            reason: "subscribed".to_string(),
            repository: Repository { full_name: "o/r".to_string() },
            subject: Subject {
                title: format!("Thread {id}"),
                kind: "Issue".to_string(),
                url: Some(format!("https://api.github.com/repos/o/r/issues/{id}")),
            },
        }
    }

    #[tokio::test]
    async fn test_failed_delivery_still_recorded() {
        let channel = MockChannel { fail: true, ..Default::default() };
        let mut poller = SourcePoller::new(
            StaticSource(vec![notification("1", "v1")]),
            channel,
            SqliteSeenStore::open_in_memory().unwrap(),
        );

        let report = poller.poll_once().await.unwrap();
        assert_eq!(report.delivery_failures, 1);
        assert_eq!(report.forwarded, 0);
        assert!(!poller.store().is_new("1", "v1").unwrap());

        // 下一轮不会重试
        let report = poller.poll_once().await.unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(poller.channel().sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_aborts_rest_of_cycle() {
        let store = BrokenLookupStore {
            inner: SqliteSeenStore::open_in_memory().unwrap(),
            lookups: std::cell::Cell::new(0),
            fail_after: 1,
        };
        let mut poller = SourcePoller::new(
            StaticSource(vec![notification("1", "v1"), notification("2", "v1")]),
            MockChannel::default(),
            store,
        );

        let err = poller.poll_once().await.unwrap_err();
        assert!(matches!(err, CycleError::Store(_)));
        assert_eq!(poller.channel().sent.lock().unwrap().len(), 1);
        assert!(!poller.store().inner.is_new("1", "v1").unwrap());
        assert!(poller.store().inner.is_new("2", "v1").unwrap());
    }

    #[tokio::test]
    async fn test_record_failure_is_item_scoped() {
        // Given: 写入全部失败的存储，三条新通知
        let mut poller = SourcePoller::new(
            StaticSource(vec![notification("1", "v1"), notification("2", "v1"), notification("3", "v1")]),
            MockChannel::default(),
            ReadOnlyStore,
        );

        // When
        let report = poller.poll_once().await.unwrap();

        // Then: 每条都推送，本轮不中断
        assert_eq!(
            report,
            CycleReport {
                fetched: 3,
                forwarded: 3,
                delivery_failures: 0,
                skipped: 0,
                record_failures: 3,
            }
        );
        assert_eq!(poller.channel().sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_updated_thread_forwarded_again() {
        let mut poller = SourcePoller::new(
            StaticSource(vec![notification("1", "v1")]),
            MockChannel::default(),
            SqliteSeenStore::open_in_memory().unwrap(),
        );
        poller.poll_once().await.unwrap();

        poller.source = StaticSource(vec![notification("1", "v2")]);
        let report = poller.poll_once().await.unwrap();

        assert_eq!(report.forwarded, 1);
        assert_eq!(poller.channel().sent.lock().unwrap().len(), 2);
        assert_eq!(poller.store().count().unwrap(), 1);
        assert_eq!(poller.store().version_of("1").unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_message_built_from_notification() {
        let mut n = notification("7", "v1");
        n.reason = "mention".to_string();
        n.subject.kind = "PullRequest".to_string();
        n.subject.url = Some("https://api.github.com/repos/o/r/pulls/7".to_string());

        let mut poller = SourcePoller::new(
            StaticSource(vec![n]),
            MockChannel::default(),
            SqliteSeenStore::open_in_memory().unwrap(),
        );
        poller.poll_once().await.unwrap();

        let sent = poller.channel().sent.lock().unwrap();
        assert_eq!(sent[0].title, "🔀 PullRequest: o/r");
        assert_eq!(sent[0].body, "**MENTION**\nThread 7");
        assert_eq!(sent[0].click, "https://github.com/o/r/pull/7");
        assert_eq!(sent[0].priority.level(), 5);
    }
}
