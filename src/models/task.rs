use chrono::{DateTime, Local};
use std::fmt;

/// 任务 ID（创建时分配，会话内唯一且随创建顺序递增）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 未设置截止时间（或尚未刷新）时显示的剩余时间文本
pub const NO_DEADLINE: &str = "No deadline";

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    /// 用户自定义的“待定”标记，与完成与否无关
    pub is_pending: bool,
    pub created_at: DateTime<Local>,
    /// 时长（分钟），始终为正数
    pub duration: Option<u32>,
    /// 截止时间；当且仅当 duration 存在时存在
    pub deadline: Option<DateTime<Local>>,
    /// 剩余时间显示文本，只由定时器刷新
    pub remaining_time: Option<String>,
    /// 已经提醒过（仅在单次提醒模式下使用）
    pub notified: bool,
}

impl Task {
    pub fn new(
        id: TaskId,
        text: String,
        duration: Option<u32>,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            text,
            is_pending: false,
            created_at,
            duration,
            deadline: duration.map(|minutes| deadline_from(created_at, minutes)),
            remaining_time: None,
            notified: false,
        }
    }

    /// 当前时间是否已经超过截止时间
    pub fn is_overdue(&self, now: DateTime<Local>) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }

    /// 渲染用的剩余时间文本
    pub fn remaining_display(&self) -> &str {
        self.remaining_time.as_deref().unwrap_or(NO_DEADLINE)
    }
}

/// 根据起始时间和分钟数计算截止时间
pub fn deadline_from(start: DateTime<Local>, minutes: u32) -> DateTime<Local> {
    start + chrono::Duration::minutes(i64::from(minutes))
}

/// 解析用户输入的时长（分钟）
///
/// 与数字输入框的行为一致：忽略首尾空白，读取开头的可选符号和数字，
/// 其余字符忽略。无法解析、为零或负数都视为未设置。
pub fn parse_duration(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return None;
    }

    match digits[..end].parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(minutes) => Some(minutes),
    }
}
