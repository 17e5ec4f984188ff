use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

mod app;
mod cli;
mod config;
mod input;
mod logging;
mod models;
mod todo;
mod ui;

use app::App;

fn main() -> Result<()> {
    // 处理 CLI 命令
    let should_run_tui = cli::handle_cli()?;

    // 如果 CLI 命令已处理，直接退出
    if !should_run_tui {
        return Ok(());
    }

    let config = config::load_config()?;

    // 日志写入文件；目录不可用时不记录日志，程序照常运行
    let _log_guard = match logging::init_logging(&config.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("日志初始化失败: {:#}", e);
            None
        }
    };

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 创建应用（一个会话），定时器随应用一起释放
    let mut app = App::new(&config);
    tracing::info!(interval = ?app.ticker.interval(), "session started");

    // 运行应用
    let res = run_app(&mut terminal, &mut app);
    drop(app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("session ended");

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.clear_expired_notification();
        terminal.draw(|f| ui::render(f, app))?;

        // 等待按键，最多等到下一次定时器触发
        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if !app.handle_key(key) {
                    return Ok(()); // 退出应用
                }
            }
        }

        app.on_tick(Instant::now(), Local::now());
    }
}
