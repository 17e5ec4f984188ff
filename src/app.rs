use crate::config::Config;
use crate::models::{Task, TaskId, parse_duration};
use crate::todo::{DeadlineAlert, DeadlineTicker, SearchFilter, StoreError, TaskStore};
use crate::ui::dialogs::DialogType;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// 事件轮询的最长等待时间
const MAX_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
}

/// 通知消息
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    /// 检查通知是否已过期（3秒后自动消失）
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= 3
    }
}

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 正常模式 - 导航和操作任务
    Normal,
    /// 对话框模式
    Dialog,
    /// 帮助模式 - 显示快捷键
    Help,
}

/// 应用状态（一个会话）
pub struct App {
    /// 任务集合
    pub store: TaskStore,
    /// 搜索过滤器
    pub search: SearchFilter,
    /// 截止时间定时器
    pub ticker: DeadlineTicker,
    /// 当前模式
    pub mode: Mode,
    /// 选中任务在显示列表中的索引
    pub selected: usize,
    /// 当前显示的对话框
    pub dialog: Option<DialogType>,
    /// 待确认的逾期提醒，非空时阻塞其他输入
    pub alerts: VecDeque<DeadlineAlert>,
    /// 通知消息
    pub notification: Option<Notification>,
}

impl App {
    /// 创建新的应用实例
    pub fn new(config: &Config) -> Self {
        let ticker = DeadlineTicker::new(
            config.tick_interval(),
            config.alert_mode,
            config.countdown_format,
            Instant::now(),
        );

        Self {
            store: TaskStore::new(),
            search: SearchFilter::new(),
            ticker,
            mode: Mode::Normal,
            selected: 0,
            dialog: None,
            alerts: VecDeque::new(),
            notification: None,
        }
    }

    /// 处理键盘输入
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        use crate::input::handle_key_input;
        handle_key_input(self, key)
    }

    /// 经过搜索过滤后要显示的任务
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.search.apply(self.store.list())
    }

    /// 当前选中的任务
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.selected_task().map(|t| t.id)
    }

    /// 列表变化后把选中索引限制在显示范围内
    pub fn clamp_selection(&mut self) {
        let count = self.visible_tasks().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// 把光标移到指定任务（如果它在显示列表中）
    pub fn select_task(&mut self, id: TaskId) {
        if let Some(idx) = self.visible_tasks().iter().position(|t| t.id == id) {
            self.selected = idx;
        }
    }

    pub fn select_next(&mut self) {
        let count = self.visible_tasks().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_tasks().len().saturating_sub(1);
    }

    /// 添加任务，时长为原始输入
    pub fn add_task(&mut self, text: &str, duration: &str) -> Result<TaskId, StoreError> {
        let id = self.store.add(text, parse_duration(duration), Local::now())?;
        self.select_task(id);
        self.show_notification("已添加任务".to_string(), NotificationLevel::Success);
        Ok(id)
    }

    /// 编辑任务，时长为原始输入
    pub fn edit_task(&mut self, id: TaskId, text: &str, duration: &str) -> Result<(), StoreError> {
        self.store
            .edit(id, text, parse_duration(duration), Local::now())?;
        self.clamp_selection();
        self.show_notification("已保存任务".to_string(), NotificationLevel::Success);
        Ok(())
    }

    /// 切换选中任务的待定标记
    pub fn toggle_selected(&mut self) -> Result<(), StoreError> {
        let Some(id) = self.selected_task_id() else {
            return Ok(());
        };
        self.store.toggle_pending(id)
    }

    /// 删除选中任务（无需确认）
    pub fn delete_selected(&mut self) -> Result<(), StoreError> {
        let Some(id) = self.selected_task_id() else {
            return Ok(());
        };
        self.store.delete(id)?;
        self.clamp_selection();
        self.show_notification("已删除任务".to_string(), NotificationLevel::Info);
        Ok(())
    }

    /// 提交搜索查询
    pub fn apply_search(&mut self, query: String) {
        let keep = self.selected_task_id();
        self.search.set_query(query);
        self.selected = 0;
        if let Some(id) = keep {
            self.select_task(id);
        }

        let shown = self.visible_tasks().len();
        if self.search.is_active() {
            self.show_notification(
                format!("匹配 {} / {} 个任务", shown, self.store.len()),
                NotificationLevel::Info,
            );
        }
    }

    /// 定时器检查，提醒未确认前不触发
    pub fn on_tick(&mut self, at: Instant, now: DateTime<Local>) {
        if !self.alerts.is_empty() {
            return;
        }
        if let Some(alerts) = self.ticker.poll(at, &mut self.store, now) {
            for alert in &alerts {
                tracing::info!(id = %alert.id, text = %alert.text, "deadline passed");
            }
            self.alerts.extend(alerts);
        }
    }

    /// 确认最前面的逾期提醒
    pub fn acknowledge_alert(&mut self) {
        if let Some(alert) = self.alerts.pop_front() {
            tracing::debug!(id = %alert.id, "deadline alert acknowledged");
        }
    }

    /// 事件轮询超时：不超过距下一次触发的时间
    pub fn poll_timeout(&self, at: Instant) -> Duration {
        // 等待确认期间定时器暂停
        if !self.alerts.is_empty() {
            return MAX_POLL_TIMEOUT;
        }
        self.ticker.until_due(at).min(MAX_POLL_TIMEOUT)
    }

    /// 显示通知消息
    pub fn show_notification(&mut self, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    /// 清除已过期的通知
    pub fn clear_expired_notification(&mut self) {
        if let Some(ref notification) = self.notification {
            if notification.is_expired() {
                self.notification = None;
            }
        }
    }
}
