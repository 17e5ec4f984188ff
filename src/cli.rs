use anyhow::Result;
use std::env;

/// 处理 CLI 命令
/// 返回 true 表示应该继续进入 TUI，false 表示已处理完毕应该退出
pub fn handle_cli() -> Result<bool> {
    let args: Vec<String> = env::args().collect();

    // 如果没有参数，进入 TUI 模式
    if args.len() < 2 {
        return Ok(true);
    }

    match args[1].as_str() {
        "config" => {
            if let Err(e) = handle_config_command(&args[2..]) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "--help" | "-h" => {
            print_help();
            Ok(false)
        }
        "--version" | "-V" | "-v" => {
            print_version();
            Ok(false)
        }
        _ => {
            eprintln!("未知命令: {}", args[1]);
            eprintln!("使用 'hxt --help' 查看帮助");
            std::process::exit(1);
        }
    }
}

/// 配置子命令
fn handle_config_command(args: &[String]) -> Result<()> {
    let Some(sub) = args.first() else {
        return crate::config::show_config();
    };

    let value = args.get(1).map(String::as_str);
    match (sub.as_str(), value) {
        ("show", _) => crate::config::show_config(),
        ("interval", Some(v)) => crate::config::set_tick_interval(v),
        ("alerts", Some(v)) => crate::config::set_alert_mode(v),
        ("countdown", Some(v)) => crate::config::set_countdown_format(v),
        ("interval" | "alerts" | "countdown", None) => {
            print_config_usage();
            anyhow::bail!("缺少参数: {}", sub)
        }
        _ => {
            print_config_usage();
            anyhow::bail!("未知的配置选项: {}", sub)
        }
    }
}

fn print_config_usage() {
    println!("用法:");
    println!("  hxt config [show]                   查看当前配置");
    println!("  hxt config interval <秒>            设置剩余时间刷新间隔");
    println!("  hxt config alerts <repeat|once>     逾期后每次刷新都提醒 / 只提醒一次");
    println!("  hxt config countdown <clock|days>   剩余时间显示为 Xh Ym / Xd Yh Zm");
}

fn print_help() {
    println!("hxt - 带截止时间的终端待办清单");
    println!();
    println!("用法:");
    println!("  hxt                 启动 TUI（任务只保存在本次会话中）");
    println!("  hxt config ...      管理配置");
    println!("  hxt --help          显示帮助");
    println!("  hxt --version       显示版本");
    println!();
    print_config_usage();
    println!();
    println!("日志: 设置 RUST_LOG 覆盖配置中的 log_filter");
}

fn print_version() {
    println!("hxt {}", env!("CARGO_PKG_VERSION"));
}
