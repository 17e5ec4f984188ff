use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::dialogs::centered_rect;

/// 渲染帮助面板
pub fn render(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 70, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" 键盘快捷键帮助 (按 ESC 或 ? 关闭) ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = [
        section("基础导航"),
        Line::from(""),
        entry("j, ↓", "下一个任务"),
        entry("k, ↑", "上一个任务"),
        entry("g / G", "第一个 / 最后一个"),
        entry("?", "显示帮助"),
        entry("q, Ctrl+C", "退出（任务不会保存）"),
        Line::from(""),
        section("搜索"),
        Line::from(""),
        entry("/", "输入搜索词"),
        entry("Esc", "清除搜索"),
    ];

    let right = [
        section("任务操作"),
        Line::from(""),
        entry("a", "新建任务"),
        entry("e, Enter", "编辑任务"),
        entry("空格, p", "切换待定"),
        entry("d", "删除任务"),
        Line::from(""),
        section("表单"),
        Line::from(""),
        entry("Tab", "切换输入框"),
        entry("Enter", "确认"),
        entry("Esc", "取消"),
        entry("Ctrl+U", "清空输入框"),
    ];

    for (column, lines) in [(columns[0], left.to_vec()), (columns[1], right.to_vec())] {
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        f.render_widget(paragraph, column);
    }
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
}

fn entry(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", keys), Style::default().fg(Color::Cyan)),
        Span::raw(description),
    ])
}
