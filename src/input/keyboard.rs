use crate::app::{App, Mode, NotificationLevel};
use crate::input::Command;
use crate::todo::StoreError;
use crate::ui::dialogs::{DialogType, FormKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// 处理键盘输入
/// 返回 false 表示应该退出应用
pub fn handle_key_input(app: &mut App, key: KeyEvent) -> bool {
    // 只处理按下事件（Windows 上会收到释放事件）
    if key.kind == KeyEventKind::Release {
        return true;
    }

    // Ctrl+C 在任何情况下都退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return false;
    }

    // 逾期提醒阻塞其他输入，必须先确认
    if !app.alerts.is_empty() {
        handle_alert_keys(app, key);
        return true;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Dialog => handle_dialog_mode(app, key),
        Mode::Help => handle_help_mode(app, key),
    }
}

/// 处理正常模式的按键
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(cmd) = match_key(key) else {
        return true;
    };

    if cmd == Command::Quit {
        return false;
    }

    execute_command(app, cmd);
    true
}

/// 匹配按键到命令
pub fn match_key(key: KeyEvent) -> Option<Command> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Some(Command::Quit),

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Some(Command::TaskDown),
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Some(Command::TaskUp),
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Some(Command::TaskFirst),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Some(Command::TaskLast),

        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(Command::NewTask),
        (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => Some(Command::EditTask),
        (KeyCode::Char(' '), _) | (KeyCode::Char('p'), KeyModifiers::NONE) => {
            Some(Command::TogglePending)
        }
        (KeyCode::Char('d'), KeyModifiers::NONE) => Some(Command::DeleteTask),

        (KeyCode::Char('/'), _) => Some(Command::Search),
        (KeyCode::Esc, _) => Some(Command::ClearSearch),

        (KeyCode::Char('?'), _) => Some(Command::ShowHelp),

        _ => None,
    }
}

/// 执行命令
fn execute_command(app: &mut App, cmd: Command) {
    match cmd {
        Command::Quit => {}
        Command::TaskUp => app.select_prev(),
        Command::TaskDown => app.select_next(),
        Command::TaskFirst => app.selected = 0,
        Command::TaskLast => app.select_last(),
        Command::NewTask => {
            app.dialog = Some(DialogType::add_task());
            app.mode = Mode::Dialog;
        }
        Command::EditTask => {
            if let Some(task) = app.selected_task() {
                app.dialog = Some(DialogType::edit_task(task));
                app.mode = Mode::Dialog;
            }
        }
        Command::TogglePending => log_store_result("toggle", app.toggle_selected()),
        Command::DeleteTask => log_store_result("delete", app.delete_selected()),
        Command::Search => {
            app.dialog = Some(DialogType::search(app.search.query()));
            app.mode = Mode::Dialog;
        }
        Command::ClearSearch => {
            if app.search.is_active() {
                app.apply_search(String::new());
                app.show_notification("已清除搜索".to_string(), NotificationLevel::Info);
            }
        }
        Command::ShowHelp => app.mode = Mode::Help,
    }
}

/// 处理对话框模式的按键
fn handle_dialog_mode(app: &mut App, key: KeyEvent) -> bool {
    let Some(dialog) = app.dialog.as_mut() else {
        app.mode = Mode::Normal;
        return true;
    };

    match key.code {
        KeyCode::Esc => close_dialog(app),
        KeyCode::Enter => submit_dialog(app),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => dialog.cycle_focus(),
        _ => {
            dialog.focused_input_mut().handle_key(key);
        }
    }
    true
}

fn close_dialog(app: &mut App) {
    app.dialog = None;
    app.mode = Mode::Normal;
}

/// 处理对话框提交
fn submit_dialog(app: &mut App) {
    let Some(dialog) = app.dialog.as_ref() else {
        return;
    };

    match dialog {
        DialogType::TaskForm {
            kind,
            text,
            duration,
            ..
        } => {
            let (kind, text, duration) = (*kind, text.value(), duration.value());
            match kind {
                FormKind::Add => match app.add_task(&text, &duration) {
                    Ok(_) => close_dialog(app),
                    // 文本为空：保持表单打开，不提示
                    Err(StoreError::Rejected) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "add task failed");
                        close_dialog(app);
                    }
                },
                FormKind::Edit(id) => {
                    log_store_result("edit", app.edit_task(id, &text, &duration));
                    close_dialog(app);
                }
            }
        }
        DialogType::Search { input } => {
            let query = input.value();
            close_dialog(app);
            app.apply_search(query);
        }
    }
}

/// 任务不存在等情况只记录日志，不影响界面
fn log_store_result(action: &str, result: Result<(), StoreError>) {
    if let Err(err) = result {
        tracing::warn!(action, error = %err, "store operation ignored");
    }
}

/// 处理逾期提醒的确认按键
fn handle_alert_keys(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')
    ) {
        app.acknowledge_alert();
    }
}

/// 处理帮助模式的按键
fn handle_help_mode(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
            app.mode = Mode::Normal;
        }
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::Local;
    use std::time::Instant;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert!(handle_key_input(app, key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn test_match_key() {
        assert_eq!(match_key(key(KeyCode::Char('a'))), Some(Command::NewTask));
        assert_eq!(match_key(key(KeyCode::Char('e'))), Some(Command::EditTask));
        assert_eq!(match_key(key(KeyCode::Enter)), Some(Command::EditTask));
        assert_eq!(match_key(key(KeyCode::Char(' '))), Some(Command::TogglePending));
        assert_eq!(match_key(key(KeyCode::Char('d'))), Some(Command::DeleteTask));
        assert_eq!(match_key(key(KeyCode::Char('/'))), Some(Command::Search));
        assert_eq!(match_key(key(KeyCode::Esc)), Some(Command::ClearSearch));
        assert_eq!(match_key(key(KeyCode::Down)), Some(Command::TaskDown));
        assert_eq!(
            match_key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Command::TaskLast)
        );
        assert_eq!(match_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(&Config::default());
        assert!(!handle_key_input(&mut app, key(KeyCode::Char('q'))));
        assert!(!handle_key_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_add_edit_toggle_delete_flow() {
        let mut app = App::new(&Config::default());

        // 新建
        handle_key_input(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.mode, Mode::Dialog);
        type_text(&mut app, "Buy milk");
        handle_key_input(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "30");
        handle_key_input(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.store.len(), 1);
        let task = app.store.list()[0].clone();
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.duration, Some(30));

        // 编辑：清空时长
        handle_key_input(&mut app, key(KeyCode::Char('e')));
        handle_key_input(&mut app, key(KeyCode::Tab));
        handle_key_input(&mut app, key(KeyCode::Backspace));
        handle_key_input(&mut app, key(KeyCode::Backspace));
        handle_key_input(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "!");
        handle_key_input(&mut app, key(KeyCode::Enter));
        let edited = app.store.get(task.id).unwrap();
        assert_eq!(edited.text, "Buy milk!");
        assert_eq!(edited.duration, None);
        assert_eq!(edited.deadline, None);

        // 切换待定
        handle_key_input(&mut app, key(KeyCode::Char(' ')));
        assert!(app.store.get(task.id).unwrap().is_pending);

        // 删除，无需确认
        handle_key_input(&mut app, key(KeyCode::Char('d')));
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_blank_add_keeps_form_open() {
        let mut app = App::new(&Config::default());
        handle_key_input(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "   ");
        handle_key_input(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Dialog);
        assert!(app.store.is_empty());

        handle_key_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.dialog.is_none());
    }

    #[test]
    fn test_cancel_edit_discards_changes() {
        let mut app = App::new(&Config::default());
        app.add_task("keep me", "5").unwrap();

        handle_key_input(&mut app, key(KeyCode::Char('e')));
        type_text(&mut app, " changed");
        handle_key_input(&mut app, key(KeyCode::Esc));

        let task = &app.store.list()[0];
        assert_eq!(task.text, "keep me");
        assert_eq!(task.duration, Some(5));
    }

    #[test]
    fn test_search_then_clear() {
        let mut app = App::new(&Config::default());
        app.add_task("Buy milk", "").unwrap();
        app.add_task("Walk dog", "").unwrap();

        handle_key_input(&mut app, key(KeyCode::Char('/')));
        type_text(&mut app, "dog");
        handle_key_input(&mut app, key(KeyCode::Enter));
        assert_eq!(app.search.query(), "dog");
        assert_eq!(app.visible_tasks().len(), 1);

        // 删除只作用于显示出来的任务
        handle_key_input(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.list()[0].text, "Buy milk");

        handle_key_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.search.query(), "");
        assert_eq!(app.visible_tasks().len(), 1);
    }

    #[test]
    fn test_alert_blocks_input_until_acknowledged() {
        let mut app = App::new(&Config::default());
        let now = Local::now();
        app.store.add("late", Some(1), now).unwrap();
        app.on_tick(
            Instant::now() + app.ticker.interval(),
            now + chrono::Duration::minutes(5),
        );
        assert_eq!(app.alerts.len(), 1);

        // 提醒显示时其他按键无效
        handle_key_input(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.store.len(), 1);
        assert!(handle_key_input(&mut app, key(KeyCode::Char('q'))));

        handle_key_input(&mut app, key(KeyCode::Enter));
        assert!(app.alerts.is_empty());
        handle_key_input(&mut app, key(KeyCode::Char('d')));
        assert!(app.store.is_empty());
    }

    #[test]
    fn test_help_mode() {
        let mut app = App::new(&Config::default());
        handle_key_input(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.mode, Mode::Help);
        handle_key_input(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.mode, Mode::Help);
        handle_key_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
    }
}
