//! 调度循环 - 固定间隔执行轮询
//!
//! 每轮执行一次 poller，之后固定休眠 `interval`，不管本轮耗时和成败。
//! 没有抖动、退避或重叠执行；停止信号只在休眠期间生效，进行中的一轮总会跑完。

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};

use crate::github::NotificationSource;
use crate::notification::channel::PushChannel;
use crate::notification::store::SeenStore;
use crate::poller::{CycleReport, SourcePoller};

/// 固定间隔调度器
pub struct Scheduler<S, C, D> {
    poller: SourcePoller<S, C, D>,
    interval: Duration,
}

impl<S, C, D> Scheduler<S, C, D>
where
    S: NotificationSource,
    C: PushChannel,
    D: SeenStore,
{
    pub fn new(poller: SourcePoller<S, C, D>, interval: Duration) -> Self {
        Self { poller, interval }
    }

    pub fn poller(&self) -> &SourcePoller<S, C, D> {
        &self.poller
    }

    /// 执行一轮；错误只记录日志，不向外传播
    pub async fn run_once(&mut self) -> Option<CycleReport> {
        match self.poller.poll_once().await {
            Ok(report) => {
                info!(
                    fetched = report.fetched,
                    forwarded = report.forwarded,
                    skipped = report.skipped,
                    delivery_failures = report.delivery_failures,
                    record_failures = report.record_failures,
                    "Sync cycle finished"
                );
                Some(report)
            }
            Err(e) => {
                error!(error = %e, "GitHub sync cycle failed");
                None
            }
        }
    }

    /// 循环执行直到 `shutdown` 完成，返回已执行的轮数
    pub async fn run_until<F>(&mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles = 0u64;

        loop {
            self.run_once().await;
            cycles += 1;

            tokio::select! {
                _ = &mut shutdown => {
                    info!(cycles, "Shutdown requested, scheduler stopping");
                    break;
                }
                _ = sleep(self.interval) => {}
            }
        }

        cycles
    }
}
