pub mod dialogs;
pub mod help;
mod list;
mod statusbar;
pub mod text_input;

use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// 主渲染函数
pub fn render(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // 任务列表
            Constraint::Length(1), // 状态栏
        ])
        .split(f.area());

    list::render(f, main_chunks[0], app);
    statusbar::render(f, main_chunks[1], app);

    // 渲染对话框（如果有）
    if let Some(dialog) = &app.dialog {
        dialogs::render_dialog(f, dialog);
    }

    // 渲染帮助面板（如果处于帮助模式）
    if app.mode == crate::app::Mode::Help {
        help::render(f, f.area());
    }

    // 逾期提醒在最上层
    if let Some(alert) = app.alerts.front() {
        dialogs::render_alert(f, alert, app.alerts.len() - 1);
    }

    // 渲染通知栏（如果有通知）
    if let Some(ref notification) = app.notification {
        render_notification(f, f.area(), notification);
    }
}

/// 渲染通知栏
fn render_notification(f: &mut Frame, area: ratatui::layout::Rect, notification: &crate::app::Notification) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};
    use crate::app::NotificationLevel;

    // 通知栏占据顶部 3 行
    let notification_area = ratatui::layout::Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: area.height.min(3),
    };

    // 根据级别选择颜色
    let (bg_color, fg_color, prefix) = match notification.level {
        NotificationLevel::Info => (Color::Blue, Color::White, "ℹ"),
        NotificationLevel::Success => (Color::Green, Color::White, "✓"),
    };

    let content = Line::from(vec![
        Span::styled(format!(" {} ", prefix), Style::default().fg(fg_color).bg(bg_color).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(&notification.message, Style::default().fg(fg_color)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(bg_color))
        .style(Style::default().bg(bg_color));

    let paragraph = Paragraph::new(content).block(block);

    f.render_widget(Clear, notification_area);
    f.render_widget(paragraph, notification_area);
}
