/// 应用命令枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // ===== 退出 =====
    Quit,

    // ===== 导航 =====
    /// 选择上一个任务
    TaskUp,
    /// 选择下一个任务
    TaskDown,
    /// 跳到第一个任务
    TaskFirst,
    /// 跳到最后一个任务
    TaskLast,

    // ===== 任务操作 =====
    /// 创建新任务
    NewTask,
    /// 编辑当前任务
    EditTask,
    /// 切换待定标记
    TogglePending,
    /// 删除当前任务
    DeleteTask,

    // ===== 搜索 =====
    /// 打开搜索框
    Search,
    /// 清除搜索
    ClearSearch,

    // ===== 模式切换 =====
    /// 显示帮助
    ShowHelp,
}
