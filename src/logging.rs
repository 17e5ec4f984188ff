/// 日志初始化：写入文件，避免干扰 TUI 界面
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "helix-todo.log";

/// 日志目录
/// Linux: ~/.cache/helix-todo
pub fn get_log_dir() -> Result<PathBuf> {
    let base = directories::BaseDirs::new().context("无法获取用户目录")?;
    Ok(base.cache_dir().join("helix-todo"))
}

/// 初始化 tracing，RUST_LOG 优先于配置中的过滤规则
///
/// 返回的 guard 必须保持到程序退出，否则缓冲中的日志会丢失。
pub fn init_logging(default_filter: &str) -> Result<WorkerGuard> {
    let log_dir = get_log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("创建日志目录失败: {}", log_dir.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    if let Err(err) = init_result {
        tracing::debug!(error = %err, "tracing subscriber already set, continuing");
    }

    tracing::info!(log_dir = %log_dir.display(), "logging initialised");
    Ok(guard)
}
