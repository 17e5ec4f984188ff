use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{CursorMove, TextArea};

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    Frame,
};

/// 单行输入框（基于 tui-textarea）
pub struct FieldInput {
    /// 底层 TextArea 组件
    textarea: TextArea<'static>,
    /// 只接受数字（时长输入）
    numeric: bool,
}

impl FieldInput {
    /// 创建文本输入框
    pub fn new(initial_value: &str, placeholder: &str) -> Self {
        Self::build(initial_value, placeholder, false)
    }

    /// 创建数字输入框
    pub fn numeric(initial_value: &str, placeholder: &str) -> Self {
        Self::build(initial_value, placeholder, true)
    }

    fn build(initial_value: &str, placeholder: &str, numeric: bool) -> Self {
        // 只保留第一行
        let first_line = initial_value.lines().next().unwrap_or("").to_string();
        let mut textarea = TextArea::new(vec![first_line]);
        textarea.move_cursor(CursorMove::End);

        // Nord 主题
        textarea.set_style(
            Style::default()
                .fg(Color::Rgb(236, 239, 244))
                .bg(Color::Rgb(46, 52, 64)),
        );
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text(placeholder.to_string());
        textarea.set_placeholder_style(Style::default().fg(Color::Rgb(76, 86, 106)));

        let mut input = Self { textarea, numeric };
        input.set_focused(false);
        input
    }

    /// 获取内容
    pub fn value(&self) -> String {
        self.textarea.lines().join("")
    }

    /// 聚焦时显示块状光标
    pub fn set_focused(&mut self, focused: bool) {
        let cursor_style = if focused {
            Style::default()
                .bg(Color::Rgb(136, 192, 208))
                .fg(Color::Rgb(46, 52, 64))
        } else {
            Style::default()
        };
        self.textarea.set_cursor_style(cursor_style);
    }

    /// 处理编辑按键，返回是否已处理
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                // Ctrl+U 清空
                KeyCode::Char('u') => {
                    self.textarea.move_cursor(CursorMove::End);
                    self.textarea.delete_line_by_head();
                    true
                }
                KeyCode::Char('a') => {
                    self.textarea.move_cursor(CursorMove::Head);
                    true
                }
                KeyCode::Char('e') => {
                    self.textarea.move_cursor(CursorMove::End);
                    true
                }
                _ => false,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                if self.numeric && !c.is_ascii_digit() {
                    return true;
                }
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.textarea.delete_char();
                true
            }
            KeyCode::Delete => {
                self.textarea.delete_next_char();
                true
            }
            KeyCode::Left => {
                self.textarea.move_cursor(CursorMove::Back);
                true
            }
            KeyCode::Right => {
                self.textarea.move_cursor(CursorMove::Forward);
                true
            }
            KeyCode::Home => {
                self.textarea.move_cursor(CursorMove::Head);
                true
            }
            KeyCode::End => {
                self.textarea.move_cursor(CursorMove::End);
                true
            }
            _ => false,
        }
    }

    /// 渲染输入框
    pub fn render(&self, f: &mut Frame, area: Rect) {
        f.render_widget(&self.textarea, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_editing() {
        let mut input = FieldInput::new("", "");
        for c in "milk".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        input.handle_key(key(KeyCode::Home));
        for c in "Buy ".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(input.value(), "Buy milk");

        input.handle_key(key(KeyCode::End));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Buy mil");
    }

    #[test]
    fn test_prefilled_value_is_single_line() {
        let input = FieldInput::new("first\nsecond", "");
        assert_eq!(input.value(), "first");
    }

    #[test]
    fn test_numeric_ignores_non_digits() {
        let mut input = FieldInput::numeric("1", "");
        for c in "5a-0".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(input.value(), "150");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = FieldInput::new("something", "");
        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(input.value(), "");
    }
}
