use crate::models::Task;

/// 搜索过滤器：只影响显示，不修改任务集合
#[derive(Debug, Default, Clone)]
pub struct SearchFilter {
    query: String,
    lowered: String,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换查询串（原样保存，不做 trim）
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.lowered = self.query.to_lowercase();
        tracing::debug!(query = %self.query, "search query updated");
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// 不区分大小写的子串匹配；空查询匹配所有任务
    pub fn matches(&self, task: &Task) -> bool {
        self.lowered.is_empty() || task.text.to_lowercase().contains(&self.lowered)
    }

    /// 按顺序返回匹配的任务
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskId;
    use chrono::Local;

    fn task(id: i64, text: &str) -> Task {
        Task::new(TaskId(id), text.to_string(), None, Local::now())
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let filter = SearchFilter::new();
        assert!(!filter.is_active());
        assert!(filter.matches(&task(1, "anything")));
        assert!(filter.matches(&task(2, "")));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let mut filter = SearchFilter::new();
        filter.set_query("MILK");
        assert!(filter.matches(&task(1, "Buy milk")));
        assert!(filter.matches(&task(2, "milkshake")));
        assert!(!filter.matches(&task(3, "Buy bread")));
    }

    #[test]
    fn test_query_kept_verbatim() {
        let mut filter = SearchFilter::new();
        filter.set_query(" milk");
        assert_eq!(filter.query(), " milk");
        // 前导空格参与匹配
        assert!(filter.matches(&task(1, "buy milk")));
        assert!(!filter.matches(&task(2, "milk")));
    }

    #[test]
    fn test_apply_preserves_order_and_source() {
        let tasks = vec![task(1, "alpha"), task(2, "beta"), task(3, "alphabet")];
        let mut filter = SearchFilter::new();
        filter.set_query("alpha");

        let shown: Vec<_> = filter.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(shown, vec![TaskId(1), TaskId(3)]);
        assert_eq!(tasks.len(), 3);

        filter.set_query("");
        assert_eq!(filter.apply(&tasks).len(), 3);
    }
}
