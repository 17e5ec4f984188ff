use crate::app::{App, Mode};
use crate::models::Task;
use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// 渲染任务列表
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let tasks = app.visible_tasks();
    let now = Local::now();

    let pending_count = tasks.iter().filter(|t| t.is_pending).count();
    let title = format!(" 任务 ({}/{}) · 待定 {} ", tasks.len(), app.store.len(), pending_count);

    let border_color = if app.mode == Mode::Normal {
        Color::White
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .border_type(ratatui::widgets::BorderType::Rounded);

    if tasks.is_empty() {
        let message = if app.store.is_empty() {
            "还没有任务 - 按 a 新建"
        } else {
            "没有匹配的任务 - 按 Esc 清除搜索"
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| task_item(task, i == app.selected, now))
        .collect();

    let list = List::new(items).block(block);

    // ListState 负责滚动到选中项
    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// 单个任务：第一行内容，有截止时间时第二行显示截止与剩余时间
fn task_item(task: &Task, is_selected: bool, now: DateTime<Local>) -> ListItem<'_> {
    let overdue = task.is_overdue(now);

    let selection_indicator = if is_selected {
        Span::styled("▶ ", Style::default().fg(Color::White))
    } else {
        Span::raw("  ")
    };

    // 待定标记
    let pending_indicator = if task.is_pending {
        Span::styled("● 待定 ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("○ ", Style::default().fg(Color::DarkGray))
    };

    let text_style = if overdue {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(" "),
        selection_indicator,
        pending_indicator,
        Span::styled(task.text.as_str(), text_style),
    ])];

    if let Some(deadline) = task.deadline {
        let deadline_style = if overdue {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Rgb(129, 161, 193))
        };
        lines.push(Line::from(vec![
            Span::raw("      "),
            Span::styled(
                format!(
                    "截止: {} ({})",
                    deadline.format("%Y-%m-%d %H:%M"),
                    task.remaining_display()
                ),
                deadline_style,
            ),
        ]));
    }

    let style = if is_selected {
        Style::default()
            .bg(Color::Rgb(41, 98, 218))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if overdue {
        Style::default().bg(Color::Rgb(59, 30, 34))
    } else {
        Style::default()
    };

    ListItem::new(lines).style(style)
}
