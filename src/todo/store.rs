use chrono::{DateTime, Local};
use thiserror::Error;

use crate::models::{Task, TaskId, deadline_from};

/// 任务操作错误
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StoreError {
    /// 输入无效（例如任务文本为空），不做任何修改
    #[error("输入无效，已忽略")]
    Rejected,
    /// 任务不存在（已删除或 ID 过期）
    #[error("任务不存在: {0}")]
    NotFound(TaskId),
}

/// 会话内的任务集合，按插入顺序保存
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    last_id: Option<i64>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加任务，返回新任务的 ID
    ///
    /// 文本去除首尾空白后为空则拒绝。截止时间 = now + duration 分钟。
    pub fn add(
        &mut self,
        text: &str,
        duration: Option<u32>,
        now: DateTime<Local>,
    ) -> Result<TaskId, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("rejected empty task text");
            return Err(StoreError::Rejected);
        }

        let id = self.next_id(now);
        self.tasks
            .push(Task::new(id, text.to_string(), duration, now));
        tracing::debug!(%id, ?duration, "task added");
        Ok(id)
    }

    /// 编辑任务：文本原样替换，截止时间从 now 重新计算
    pub fn edit(
        &mut self,
        id: TaskId,
        new_text: &str,
        new_duration: Option<u32>,
        now: DateTime<Local>,
    ) -> Result<(), StoreError> {
        let task = self.find_mut(id)?;
        task.text = new_text.to_string();
        task.duration = new_duration;
        task.deadline = new_duration.map(|minutes| deadline_from(now, minutes));
        task.notified = false;
        tracing::debug!(%id, ?new_duration, "task edited");
        Ok(())
    }

    /// 切换待定标记
    pub fn toggle_pending(&mut self, id: TaskId) -> Result<(), StoreError> {
        let task = self.find_mut(id)?;
        task.is_pending = !task.is_pending;
        tracing::debug!(%id, pending = task.is_pending, "task pending toggled");
        Ok(())
    }

    /// 删除任务，其余任务保持相对顺序
    pub fn delete(&mut self, id: TaskId) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or(StoreError::NotFound(id))?;
        self.tasks.remove(index);
        tracing::debug!(%id, "task deleted");
        Ok(())
    }

    /// 按插入顺序返回所有任务
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 供定时器刷新派生字段（remaining_time / notified）
    pub(crate) fn tasks_mut(&mut self) -> std::slice::IterMut<'_, Task> {
        self.tasks.iter_mut()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn find_mut(&mut self, id: TaskId) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// 以毫秒时间戳作为 ID，同一毫秒内的多次创建顺延
    fn next_id(&mut self, now: DateTime<Local>) -> TaskId {
        let millis = now.timestamp_millis();
        let id = match self.last_id {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last_id = Some(id);
        TaskId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 16, hour, minute, 0).unwrap()
    }

    fn texts(store: &TaskStore) -> Vec<&str> {
        store.list().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_add_assigns_distinct_ids() {
        let mut store = TaskStore::new();
        let now = at(9, 0);
        let mut ids = HashSet::new();
        for i in 0..20 {
            // 同一时刻的连续添加也必须得到不同的 ID
            let id = store.add(&format!("task {}", i), None, now).unwrap();
            ids.insert(id);
        }
        assert_eq!(store.len(), 20);
        assert_eq!(ids.len(), 20);

        let list = store.list();
        assert!(list.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_add_rejects_blank_text() {
        let mut store = TaskStore::new();
        assert_eq!(store.add("", None, at(9, 0)), Err(StoreError::Rejected));
        assert_eq!(store.add("   ", Some(10), at(9, 0)), Err(StoreError::Rejected));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_trims_text() {
        let mut store = TaskStore::new();
        let id = store.add("  Buy milk \n", None, at(9, 0)).unwrap();
        assert_eq!(store.get(id).unwrap().text, "Buy milk");
    }

    #[test]
    fn test_add_with_duration_sets_deadline() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk", Some(30), at(9, 0)).unwrap();
        let task = store.get(id).unwrap();
        assert_eq!(task.created_at, at(9, 0));
        assert_eq!(task.duration, Some(30));
        assert_eq!(task.deadline, Some(at(9, 30)));
        assert_eq!(task.remaining_display(), "No deadline");
    }

    #[test]
    fn test_edit_recomputes_deadline_from_edit_time() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk", Some(30), at(9, 0)).unwrap();

        store.edit(id, "Buy oat milk", Some(15), at(10, 0)).unwrap();
        let task = store.get(id).unwrap();
        assert_eq!(task.text, "Buy oat milk");
        assert_eq!(task.duration, Some(15));
        assert_eq!(task.deadline, Some(at(10, 15)));
        assert_eq!(task.created_at, at(9, 0));
    }

    #[test]
    fn test_edit_without_duration_clears_deadline() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk", Some(30), at(9, 0)).unwrap();

        store.edit(id, "new text", None, at(9, 5)).unwrap();
        let task = store.get(id).unwrap();
        assert_eq!(task.duration, None);
        assert_eq!(task.deadline, None);
    }

    #[test]
    fn test_edit_stores_text_verbatim() {
        let mut store = TaskStore::new();
        let id = store.add("Buy milk", None, at(9, 0)).unwrap();

        store.edit(id, "  ", None, at(9, 1)).unwrap();
        assert_eq!(store.get(id).unwrap().text, "  ");
    }

    #[test]
    fn test_edit_preserves_position_and_resets_notified() {
        let mut store = TaskStore::new();
        store.add("a", None, at(9, 0)).unwrap();
        let b = store.add("b", Some(1), at(9, 0)).unwrap();
        store.add("c", None, at(9, 0)).unwrap();
        store.tasks_mut().for_each(|t| t.notified = true);

        store.edit(b, "B", Some(5), at(9, 2)).unwrap();
        assert_eq!(texts(&store), vec!["a", "B", "c"]);
        assert!(!store.get(b).unwrap().notified);
    }

    #[test]
    fn test_toggle_pending_flips_flag_only() {
        let mut store = TaskStore::new();
        let id = store.add("a", Some(10), at(9, 0)).unwrap();
        let before = store.get(id).unwrap().clone();

        store.toggle_pending(id).unwrap();
        let after = store.get(id).unwrap();
        assert!(after.is_pending);
        assert_eq!(after.text, before.text);
        assert_eq!(after.deadline, before.deadline);

        store.toggle_pending(id).unwrap();
        assert!(!store.get(id).unwrap().is_pending);
    }

    #[test]
    fn test_operations_on_deleted_id_are_not_found() {
        let mut store = TaskStore::new();
        let id = store.add("a", None, at(9, 0)).unwrap();
        let other = store.add("b", None, at(9, 0)).unwrap();
        store.delete(id).unwrap();

        assert_eq!(
            store.edit(id, "x", None, at(9, 1)),
            Err(StoreError::NotFound(id))
        );
        assert_eq!(store.toggle_pending(id), Err(StoreError::NotFound(id)));
        assert_eq!(store.delete(id), Err(StoreError::NotFound(id)));
        assert_eq!(texts(&store), vec!["b"]);
        assert!(!store.get(other).unwrap().is_pending);
    }

    #[test]
    fn test_list_reflects_net_effect_in_insertion_order() {
        let mut store = TaskStore::new();
        let a = store.add("a", None, at(9, 0)).unwrap();
        let b = store.add("b", None, at(9, 0)).unwrap();
        let _ = store.add(" ", None, at(9, 0));
        let c = store.add("c", Some(5), at(9, 1)).unwrap();
        let d = store.add("d", None, at(9, 2)).unwrap();

        store.delete(b).unwrap();
        store.toggle_pending(c).unwrap();
        store.edit(a, "A", None, at(9, 3)).unwrap();
        let _ = store.toggle_pending(b);

        assert_eq!(texts(&store), vec!["A", "c", "d"]);
        let ids: Vec<_> = store.list().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c, d]);
        assert!(store.get(c).unwrap().is_pending);
    }
}
