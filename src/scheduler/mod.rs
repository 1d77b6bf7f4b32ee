//! DB 동기화 상태 폴링 스케줄러
//! 백엔드의 마지막 동기화 시각을 주기적으로 조회하고, 값이 바뀌면 잠시 갱신 알림을 띄운다.
//! 첫 관측값(이전 값 없음)은 알림 대상이 아니다.
// region:    --- Imports
use crate::api::GoodsApi;
use crate::config::ClientConfig;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep_until, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

// endregion: --- Imports

// region:    --- Sync Status
/// 화면에 노출되는 동기화 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub last_synced_at: Option<NaiveDateTime>,
    pub notice: Option<SyncNotice>,
}

/// 갱신 알림
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncNotice {
    pub synced_at: NaiveDateTime,
    pub message: String,
}

impl SyncNotice {
    pub fn new(synced_at: NaiveDateTime) -> Self {
        Self {
            synced_at,
            message: format!(
                "DB가 갱신되었습니다 ({})",
                synced_at.format("%Y-%m-%d %H:%M:%S")
            ),
        }
    }
}

/// 마지막으로 관측한 동기화 시각
#[derive(Debug, Default)]
pub struct SyncTracker {
    last_known: Option<NaiveDateTime>,
}

impl SyncTracker {
    pub fn last_known(&self) -> Option<NaiveDateTime> {
        self.last_known
    }

    /// 새 관측값 반영. 이전 값과 새 값이 모두 있고 서로 다를 때만 알림 대상 시각을 돌려준다.
    pub fn observe(&mut self, fetched: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
        let changed = match (self.last_known, fetched) {
            (Some(prev), Some(next)) if prev != next => Some(next),
            _ => None,
        };
        self.last_known = fetched;
        changed
    }
}

// endregion: --- Sync Status

// region:    --- Sync Refresher
/// 즉시 재조회 요청 (DB 저장 직후 사용)
#[derive(Debug, Clone)]
pub struct SyncRefresher(Arc<Notify>);

impl SyncRefresher {
    pub fn request_refresh(&self) {
        debug!("{:<12} --> 동기화 상태 즉시 조회 요청", "Scheduler");
        self.0.notify_one();
    }
}

// endregion: --- Sync Refresher

// region:    --- Sync Status Poller
/// 동기화 상태 폴링 스케줄러
pub struct SyncStatusPoller<A: GoodsApi + 'static> {
    api: Arc<A>,
    poll_interval: Duration,
    notice_duration: Duration,
}

impl<A: GoodsApi + 'static> SyncStatusPoller<A> {
    pub fn new(api: Arc<A>, config: &ClientConfig) -> Self {
        Self::with_timing(api, config.sync_poll_interval, config.notice_duration)
    }

    pub fn with_timing(api: Arc<A>, poll_interval: Duration, notice_duration: Duration) -> Self {
        Self {
            api,
            poll_interval,
            notice_duration,
        }
    }

    /// 폴링 시작 (시작 즉시 1회 조회 후 주기 반복)
    pub fn start(self) -> SyncPollerHandle {
        let (status_tx, status_rx) = watch::channel(SyncStatus::default());
        let refresh = Arc::new(Notify::new());
        let task = tokio::spawn(self.run(status_tx, Arc::clone(&refresh)));
        info!("{:<12} --> 동기화 상태 폴링 시작", "Scheduler");

        SyncPollerHandle {
            status: status_rx,
            refresher: SyncRefresher(refresh),
            task,
        }
    }

    async fn run(self, status_tx: watch::Sender<SyncStatus>, refresh: Arc<Notify>) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tracker = SyncTracker::default();
        let mut notice_deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = refresh.notified() => {}
                _ = sleep_until(notice_deadline.unwrap_or_else(Instant::now)), if notice_deadline.is_some() => {
                    notice_deadline = None;
                    status_tx.send_modify(|status| status.notice = None);
                    debug!("{:<12} --> 갱신 알림 해제", "Scheduler");
                    continue;
                }
            }

            match self.api.fetch_sync_status().await {
                Ok(fetched) => {
                    let changed = tracker.observe(fetched);
                    if let Some(synced_at) = changed {
                        info!("{:<12} --> DB 갱신 감지: {}", "Scheduler", synced_at);
                        notice_deadline = Some(Instant::now() + self.notice_duration);
                    }
                    // 알림과 시각은 한 번에 반영
                    status_tx.send_if_modified(|status| {
                        let before = status.clone();
                        status.last_synced_at = fetched;
                        if let Some(synced_at) = changed {
                            status.notice = Some(SyncNotice::new(synced_at));
                        }
                        *status != before
                    });
                }
                // 실패 시 상태 유지
                Err(e) => warn!("{:<12} --> 동기화 상태 조회 실패: {}", "Scheduler", e),
            }
        }
    }
}

/// 폴링 작업 핸들 (drop 시 폴링 중단)
pub struct SyncPollerHandle {
    status: watch::Receiver<SyncStatus>,
    refresher: SyncRefresher,
    task: JoinHandle<()>,
}

impl SyncPollerHandle {
    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.status.clone()
    }

    pub fn refresher(&self) -> SyncRefresher {
        self.refresher.clone()
    }

    pub fn stop(self) {
        info!("{:<12} --> 동기화 상태 폴링 중단", "Scheduler");
    }
}

impl Drop for SyncPollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// endregion: --- Sync Status Poller


// endregion: --- Tests
