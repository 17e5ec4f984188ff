/// 应用配置管理
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::todo::{AlertMode, CountdownFormat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 剩余时间刷新间隔（秒）
    pub tick_interval_secs: u64,
    /// 逾期提醒方式
    pub alert_mode: AlertMode,
    /// 剩余时间显示格式
    pub countdown_format: CountdownFormat,
    /// 默认日志过滤规则（RUST_LOG 优先）
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_secs: 60,
            alert_mode: AlertMode::Repeat,
            countdown_format: CountdownFormat::Clock,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// 刷新间隔，最少 1 秒
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs.max(1))
    }
}

/// 获取配置所在目录
/// Windows: %APPDATA%\helix-todo
/// macOS: ~/Library/Application Support/helix-todo
/// Linux: ~/.config/helix-todo
pub fn get_config_dir() -> Result<PathBuf> {
    let base = directories::BaseDirs::new().context("无法获取用户目录")?;
    Ok(base.config_dir().join("helix-todo"))
}

/// 获取配置文件路径
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

/// 加载配置
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

/// 从指定路径加载配置，文件不存在时返回默认配置
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取配置失败: {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("解析配置失败: {}", path.display()))?;

    Ok(config)
}

/// 保存配置
pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, &get_config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    // 确保目录存在
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    Ok(())
}

/// 解析刷新间隔
pub fn parse_interval(value: &str) -> Result<u64> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("无效的间隔: {}", value))?;
    if secs == 0 {
        bail!("刷新间隔至少为 1 秒");
    }
    Ok(secs)
}

/// 解析提醒方式
pub fn parse_alert_mode(value: &str) -> Result<AlertMode> {
    match value.trim() {
        "repeat" => Ok(AlertMode::Repeat),
        "once" => Ok(AlertMode::Once),
        other => bail!("未知的提醒方式: {}（可用: repeat, once）", other),
    }
}

/// 解析剩余时间格式
pub fn parse_countdown_format(value: &str) -> Result<CountdownFormat> {
    match value.trim() {
        "clock" => Ok(CountdownFormat::Clock),
        "days" => Ok(CountdownFormat::Days),
        other => bail!("未知的显示格式: {}（可用: clock, days）", other),
    }
}

/// 更新刷新间隔
pub fn set_tick_interval(value: &str) -> Result<()> {
    let mut config = load_config()?;
    config.tick_interval_secs = parse_interval(value)?;
    save_config(&config)?;
    println!("✓ 刷新间隔已设置为: {} 秒", config.tick_interval_secs);
    Ok(())
}

/// 更新提醒方式
pub fn set_alert_mode(value: &str) -> Result<()> {
    let mut config = load_config()?;
    config.alert_mode = parse_alert_mode(value)?;
    save_config(&config)?;
    println!("✓ 提醒方式已设置为: {}", alert_mode_name(config.alert_mode));
    Ok(())
}

/// 更新剩余时间格式
pub fn set_countdown_format(value: &str) -> Result<()> {
    let mut config = load_config()?;
    config.countdown_format = parse_countdown_format(value)?;
    save_config(&config)?;
    println!(
        "✓ 剩余时间格式已设置为: {}",
        countdown_format_name(config.countdown_format)
    );
    Ok(())
}

/// 显示当前配置
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("当前配置:");
    println!("  刷新间隔:     {} 秒", config.tick_interval_secs);
    println!("  提醒方式:     {}", alert_mode_name(config.alert_mode));
    println!("  剩余时间格式: {}", countdown_format_name(config.countdown_format));
    println!("  日志级别:     {}", config.log_filter);
    println!();
    println!("配置文件: {}", get_config_path()?.display());
    Ok(())
}

fn alert_mode_name(mode: AlertMode) -> &'static str {
    match mode {
        AlertMode::Repeat => "repeat",
        AlertMode::Once => "once",
    }
}

fn countdown_format_name(format: CountdownFormat) -> &'static str {
    match format {
        CountdownFormat::Clock => "clock",
        CountdownFormat::Days => "days",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            tick_interval_secs: 15,
            alert_mode: AlertMode::Once,
            countdown_format: CountdownFormat::Days,
            log_filter: "debug".to_string(),
        };

        save_config_to(&config, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("alert_mode = \"once\""));
        assert!(content.contains("countdown_format = \"days\""));

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "alert_mode = \"once\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.alert_mode, AlertMode::Once);
        assert_eq!(config.tick_interval_secs, 60);
        assert_eq!(config.countdown_format, CountdownFormat::Clock);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "alert_mode = \"sometimes\"\n").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = Config {
            tick_interval_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_interval(" 30 ").unwrap(), 30);
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("soon").is_err());
        assert_eq!(parse_alert_mode("once").unwrap(), AlertMode::Once);
        assert!(parse_alert_mode("never").is_err());
        assert_eq!(parse_countdown_format("days").unwrap(), CountdownFormat::Days);
        assert!(parse_countdown_format("weeks").is_err());
    }
}
