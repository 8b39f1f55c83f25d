use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::action::Action;
use crate::app::Mode;
use crate::form::{FormField, JobForm};

/// Map a key event to a semantic action based on current mode.
///
/// An active drag session captures the keyboard regardless of mode.
pub fn map_key(key: KeyEvent, mode: &Mode, dragging: bool) -> Action {
    if dragging {
        return map_drag(key);
    }
    match mode {
        Mode::Normal => map_normal(key),
        Mode::Goto => map_goto(key),
        Mode::Form { form } => map_form(key, form),
        Mode::Confirm { .. } => map_confirm(key),
        Mode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::ClosePanel,
            _ => Action::None,
        },
    }
}

/// Map a mouse event. Only the left button participates in clicks and drags.
pub fn map_mouse(event: MouseEvent) -> Action {
    let (x, y) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::PointerDown { x, y },
        MouseEventKind::Drag(MouseButton::Left) => Action::PointerDrag { x, y },
        MouseEventKind::Up(MouseButton::Left) => Action::PointerUp { x, y },
        _ => Action::None,
    }
}

fn map_normal(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::FocusPrevColumn,
        KeyCode::Char('l') | KeyCode::Right => Action::FocusNextColumn,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNextCard,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevCard,
        KeyCode::Char('H') => Action::MoveJobPrevColumn,
        KeyCode::Char('L') => Action::MoveJobNextColumn,
        KeyCode::Char('m') => Action::BeginDrag,
        KeyCode::Enter | KeyCode::Char(' ') => Action::ToggleExpand,
        KeyCode::Char('a') | KeyCode::Char('n') => Action::NewJob,
        KeyCode::Char('e') => Action::EditJob,
        KeyCode::Char('d') | KeyCode::Delete => Action::DeleteJob,
        KeyCode::Char('g') => Action::EnterGotoMode,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::ShowHelp,
        _ => Action::None,
    }
}

fn map_goto(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char(c @ '1'..='5') => Action::JumpToColumn(c as usize - '1' as usize),
        KeyCode::Char('g') => Action::JumpToFirstCard,
        KeyCode::Char('e') => Action::JumpToLastCard,
        _ => Action::None,
    }
}

fn map_drag(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::DragHoverPrev,
        KeyCode::Char('l') | KeyCode::Right => Action::DragHoverNext,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') => Action::Drop,
        KeyCode::Esc | KeyCode::Char('q') => Action::CancelDrag,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::CancelDrag,
        _ => Action::None,
    }
}

/// Alt-Enter and Ctrl-J break lines in the notes field.
fn is_newline_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => key.modifiers.contains(KeyModifiers::ALT),
        KeyCode::Char('j') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn map_form(key: KeyEvent, form: &JobForm) -> Action {
    if is_newline_key(key) {
        return if form.focus == FormField::Notes {
            Action::InputChar('\n')
        } else {
            Action::None
        };
    }
    match key.code {
        KeyCode::Enter => Action::FormSubmit,
        KeyCode::Esc => Action::FormCancel,
        KeyCode::Tab | KeyCode::Down => Action::FormNextField,
        KeyCode::BackTab | KeyCode::Up => Action::FormPrevField,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::FormSubmit,
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputHome,
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputEnd,
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::InputDeleteWord
        }
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Left => Action::InputLeft,
        KeyCode::Right => Action::InputRight,
        KeyCode::Home => Action::InputHome,
        KeyCode::End => Action::InputEnd,
        _ => Action::None,
    }
}

fn map_confirm(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Esc => Action::Deny,
        _ => Action::None,
    }
}

/// A single key binding for display in the help panel and hint popup.
pub struct KeyBinding {
    pub key: &'static str,
    pub description: &'static str,
}

/// Bindings shown in the goto hint popup.
pub fn goto_bindings() -> &'static [KeyBinding] {
    &[
        KeyBinding { key: "1-5", description: "Jump to column" },
        KeyBinding { key: "g", description: "First card" },
        KeyBinding { key: "e", description: "Last card" },
    ]
}
