use crate::app::{App, Mode};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// 渲染状态栏（Helix 风格）
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mode_text = if !app.alerts.is_empty() {
        ("ALERT", Color::Red)
    } else {
        match app.mode {
            Mode::Normal => ("NORMAL", Color::Green),
            Mode::Dialog => ("DIALOG", Color::Magenta),
            Mode::Help => ("HELP", Color::Blue),
        }
    };

    // 搜索状态
    let search_display = if app.search.is_active() {
        format!(" 🔍 \"{}\"", app.search.query())
    } else {
        String::new()
    };

    let next_tick = app.ticker.until_due(Instant::now()).as_secs();

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode_text.0),
            Style::default()
                .fg(Color::Black)
                .bg(mode_text.1)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(search_display, Style::default().fg(Color::Cyan)),
        Span::raw(format!(" | {} 个任务 | {}s 后刷新 ", app.store.len(), next_tick)),
        Span::styled(
            "a 新建  e 编辑  空格 待定  d 删除  / 搜索  ? 帮助  q 退出",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().bg(Color::Black));

    f.render_widget(paragraph, area);
}
