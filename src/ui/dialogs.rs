use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::text_input::FieldInput;
use crate::models::{Task, TaskId};
use crate::todo::DeadlineAlert;

/// 表单用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Add,
    Edit(TaskId),
}

/// 表单中聚焦的输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Duration,
}

/// 对话框类型
pub enum DialogType {
    /// 任务表单（新建 / 编辑）
    TaskForm {
        kind: FormKind,
        text: FieldInput,
        duration: FieldInput,
        focus: FormField,
    },
    /// 搜索输入
    Search { input: FieldInput },
}

impl DialogType {
    /// 空白的新建任务表单
    pub fn add_task() -> Self {
        Self::task_form(FormKind::Add, "", "")
    }

    /// 以任务当前内容预填的编辑表单
    pub fn edit_task(task: &Task) -> Self {
        let duration = task.duration.map(|d| d.to_string()).unwrap_or_default();
        Self::task_form(FormKind::Edit(task.id), &task.text, &duration)
    }

    /// 搜索框，预填当前查询
    pub fn search(current_query: &str) -> Self {
        let mut input = FieldInput::new(current_query, "搜索任务");
        input.set_focused(true);
        Self::Search { input }
    }

    fn task_form(kind: FormKind, text: &str, duration: &str) -> Self {
        let mut text = FieldInput::new(text, "任务内容");
        text.set_focused(true);
        Self::TaskForm {
            kind,
            text,
            duration: FieldInput::numeric(duration, "时长（分钟，可留空）"),
            focus: FormField::Text,
        }
    }

    /// 当前接收按键的输入框
    pub fn focused_input_mut(&mut self) -> &mut FieldInput {
        match self {
            Self::TaskForm {
                text,
                duration,
                focus,
                ..
            } => match focus {
                FormField::Text => text,
                FormField::Duration => duration,
            },
            Self::Search { input } => input,
        }
    }

    /// 在表单字段之间切换焦点
    pub fn cycle_focus(&mut self) {
        if let Self::TaskForm {
            text,
            duration,
            focus,
            ..
        } = self
        {
            *focus = match focus {
                FormField::Text => FormField::Duration,
                FormField::Duration => FormField::Text,
            };
            text.set_focused(*focus == FormField::Text);
            duration.set_focused(*focus == FormField::Duration);
        }
    }
}

/// 渲染居中的对话框
pub fn render_dialog(f: &mut Frame, dialog: &DialogType) {
    render_backdrop(f, f.area());

    match dialog {
        DialogType::TaskForm {
            kind,
            text,
            duration,
            focus,
        } => {
            let area = centered_rect_fixed(60, 12, f.area());
            f.render_widget(Clear, area);
            render_task_form(f, area, *kind, text, duration, *focus);
        }
        DialogType::Search { input } => {
            let area = centered_rect_fixed(60, 7, f.area());
            f.render_widget(Clear, area);
            render_search_dialog(f, area, input);
        }
    }
}

/// 渲染半透明背景遮罩
fn render_backdrop(f: &mut Frame, area: Rect) {
    let block = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    f.render_widget(block, area);
}

fn dialog_block(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .title(format!("  {}  ", title))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .border_type(ratatui::widgets::BorderType::Rounded)
        .style(Style::default().bg(Color::Rgb(46, 52, 64))) // Nord background
}

fn input_block(label: &str, focused: bool) -> Block<'_> {
    let color = if focused {
        Color::Rgb(136, 192, 208) // Nord cyan
    } else {
        Color::Rgb(76, 86, 106)
    };
    Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .border_type(ratatui::widgets::BorderType::Rounded)
}

/// 渲染任务表单：标题 / 两个输入框 / 底部按键提示
fn render_task_form(
    f: &mut Frame,
    area: Rect,
    kind: FormKind,
    text: &FieldInput,
    duration: &FieldInput,
    focus: FormField,
) {
    let title = match kind {
        FormKind::Add => "新建任务",
        FormKind::Edit(_) => "编辑任务",
    };
    let block = dialog_block(title, Color::Rgb(76, 86, 106));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 任务内容
            Constraint::Length(3), // 时长
            Constraint::Min(0),
            Constraint::Length(1), // 按键提示
        ])
        .split(inner);

    for (chunk, label, input, field) in [
        (chunks[0], "内容", text, FormField::Text),
        (chunks[1], "时长（分钟）", duration, FormField::Duration),
    ] {
        let block = input_block(label, focus == field);
        let input_area = block.inner(chunk);
        f.render_widget(block, chunk);
        input.render(f, input_area);
    }

    let confirm = match kind {
        FormKind::Add => "添加",
        FormKind::Edit(_) => "保存",
    };
    render_footer(f, chunks[3], &[("Tab", "切换"), ("Enter", confirm), ("Esc", "取消")]);
}

/// 渲染搜索对话框
fn render_search_dialog(f: &mut Frame, area: Rect, input: &FieldInput) {
    let block = dialog_block("搜索", Color::Rgb(76, 86, 106));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let search_block = input_block("🔍", true);
    let search_inner = search_block.inner(chunks[0]);
    f.render_widget(search_block, chunks[0]);
    input.render(f, search_inner);

    render_footer(f, chunks[2], &[("Enter", "搜索"), ("Esc", "取消")]);
}

fn render_footer(f: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(136, 192, 208)),
        ));
        spans.push(Span::styled(
            format!(" {}  ", label),
            Style::default().fg(Color::Rgb(129, 161, 193)),
        ));
    }
    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

/// 渲染逾期提醒（需要确认才能继续）
pub fn render_alert(f: &mut Frame, alert: &DeadlineAlert, queued: usize) {
    render_backdrop(f, f.area());

    let area = centered_rect_fixed(56, 9, f.area());
    f.render_widget(Clear, area);

    let title = if queued > 0 {
        format!("截止时间已过（还有 {} 条）", queued)
    } else {
        "截止时间已过".to_string()
    };
    let block = dialog_block(&title, Color::Rgb(191, 97, 106)).title_style(
        Style::default()
            .fg(Color::Rgb(191, 97, 106))
            .add_modifier(Modifier::BOLD),
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let message = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("任务已过截止时间: {}", alert.text),
            Style::default()
                .fg(Color::Rgb(216, 222, 233))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("截止: {}", alert.deadline.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::Rgb(129, 161, 193)),
        )),
    ];
    let paragraph = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[0]);

    render_footer(f, chunks[1], &[("Enter", "确定")]);
}

/// 创建固定大小的居中矩形（超出时缩小到可用区域）
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// 创建一个按百分比居中的矩形区域
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
