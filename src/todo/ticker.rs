use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::store::TaskStore;
use crate::models::{NO_DEADLINE, TaskId};

/// 逾期提醒方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertMode {
    /// 逾期后每次触发都提醒
    #[default]
    Repeat,
    /// 每个截止时间只提醒一次
    Once,
}

/// 剩余时间显示格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownFormat {
    /// "Xh Ym"，小时按 24 取模，不显示天数
    #[default]
    Clock,
    /// "Xd Yh Zm"，线性显示，逾期时带负号
    Days,
}

/// 逾期提醒
#[derive(Debug, Clone, PartialEq)]
pub struct DeadlineAlert {
    pub id: TaskId,
    pub text: String,
    pub deadline: DateTime<Local>,
}

/// 按固定间隔刷新剩余时间并检查逾期
///
/// 每次触发都通过 `&mut TaskStore` 读取当前任务集合，只改写
/// `remaining_time` 和 `notified`，不增删、不重排任务。
#[derive(Debug)]
pub struct DeadlineTicker {
    interval: Duration,
    next_due: Instant,
    alert_mode: AlertMode,
    countdown: CountdownFormat,
}

impl DeadlineTicker {
    pub fn new(
        interval: Duration,
        alert_mode: AlertMode,
        countdown: CountdownFormat,
        started_at: Instant,
    ) -> Self {
        tracing::debug!(?interval, ?alert_mode, ?countdown, "deadline ticker started");
        Self {
            interval,
            next_due: started_at + interval,
            alert_mode,
            countdown,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_due(&self, at: Instant) -> bool {
        at >= self.next_due
    }

    /// 距下一次触发的时间
    pub fn until_due(&self, at: Instant) -> Duration {
        self.next_due.saturating_duration_since(at)
    }

    /// 到期则触发一次并安排下一次，返回本次产生的提醒
    pub fn poll(
        &mut self,
        at: Instant,
        store: &mut TaskStore,
        now: DateTime<Local>,
    ) -> Option<Vec<DeadlineAlert>> {
        if !self.is_due(at) {
            return None;
        }
        // 长时间阻塞后不补发错过的触发
        self.next_due = at + self.interval;
        Some(self.fire(store, now))
    }

    /// 刷新所有任务的剩余时间，收集逾期提醒
    pub fn fire(&self, store: &mut TaskStore, now: DateTime<Local>) -> Vec<DeadlineAlert> {
        let mut alerts = Vec::new();

        for task in store.tasks_mut() {
            let Some(deadline) = task.deadline else {
                task.remaining_time = Some(NO_DEADLINE.to_string());
                continue;
            };

            task.remaining_time = Some(format_remaining(deadline, now, self.countdown));

            if now > deadline && (self.alert_mode == AlertMode::Repeat || !task.notified) {
                task.notified = true;
                alerts.push(DeadlineAlert {
                    id: task.id,
                    text: task.text.clone(),
                    deadline,
                });
            }
        }

        tracing::debug!(alerts = alerts.len(), "deadline tick");
        alerts
    }
}

impl Drop for DeadlineTicker {
    fn drop(&mut self) {
        tracing::debug!("deadline ticker stopped");
    }
}

/// 格式化剩余时间
pub fn format_remaining(
    deadline: DateTime<Local>,
    now: DateTime<Local>,
    format: CountdownFormat,
) -> String {
    let diff_ms = (deadline - now).num_milliseconds();
    match format {
        CountdownFormat::Clock => {
            // 截断取余后向下取整：逾期时会出现负值，超过一天按 24 小时回绕
            let diff = diff_ms as f64;
            let hours = ((diff / 3_600_000.0) % 24.0).floor() as i64;
            let minutes = ((diff / 60_000.0) % 60.0).floor() as i64;
            format!("{}h {}m", hours, minutes)
        }
        CountdownFormat::Days => {
            let sign = if diff_ms < 0 { "-" } else { "" };
            let total_minutes = diff_ms.unsigned_abs() / 60_000;
            let days = total_minutes / (24 * 60);
            let hours = total_minutes / 60 % 24;
            let minutes = total_minutes % 60;
            format!("{}{}d {}h {}m", sign, days, hours, minutes)
        }
    }
}
