use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::config::UiConfig;
use crate::drag::{DragSession, DropOutcome, DropTargets};
use crate::form::{FormField, JobForm, Submitted};
use crate::input::action::Action;
use crate::input::keymap::{map_key, map_mouse};
use crate::jobs::store::JobStore;
use crate::jobs::{Job, JobId, JobStatus};
use crate::ui::{Hit, HitMap};

/// Editable value of one form field.
///
/// `cursor` counts chars from the start of `input` and never passes its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    pub input: String,
    pub cursor: usize,
}

impl TextBuffer {
    /// Buffer prefilled with `input`, cursor at the end.
    pub fn new(input: String) -> Self {
        let cursor = input.chars().count();
        Self { input, cursor }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    fn len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_at(&self, cursor: usize) -> usize {
        match self.input.char_indices().nth(cursor) {
            Some((at, _)) => at,
            None => self.input.len(),
        }
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_at(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        let Some(prev) = self.cursor.checked_sub(1) else {
            return;
        };
        let at = self.byte_at(prev);
        self.input.remove(at);
        self.cursor = prev;
    }

    /// Ctrl-W: drop trailing blanks, then the word before them.
    pub fn delete_word(&mut self) {
        let end = self.byte_at(self.cursor);
        let start = self.input[..end]
            .trim_end()
            .trim_end_matches(|c: char| !c.is_whitespace())
            .len();
        self.input.replace_range(start..end, "");
        self.cursor = self.input[..start].chars().count();
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    /// `(before, under, after)` where `under` is the char drawn as the cursor.
    pub fn split_at_cursor(&self) -> (&str, Option<char>, &str) {
        let (before, rest) = self.input.split_at(self.byte_at(self.cursor));
        let mut chars = rest.chars();
        let under = chars.next();
        (before, under, chars.as_str())
    }
}

/// Current interaction mode.
#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    Goto,
    Form {
        form: Box<JobForm>,
    },
    Confirm {
        prompt: &'static str,
        on_confirm: ConfirmTarget,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmTarget {
    DeleteJob(JobId),
}

/// Notification severity for statusbar coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Mouse press on a card that has not yet turned into a click or a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPress {
    pub id: JobId,
    pub x: u16,
    pub y: u16,
}

/// Coordinator state. Everything here is view state; job data lives in the
/// `JobStore`.
pub struct AppState {
    pub mode: Mode,
    pub focused_column: usize,
    pub selected_card: usize,
    /// Cards showing their detail section.
    pub expanded: HashSet<JobId>,
    pub drag: DragSession,
    pub pressed: Option<PendingPress>,
    pub ui: UiConfig,
    pub notification: Option<String>,
    pub notification_level: NotificationLevel,
    pub notification_expires: Option<Instant>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(ui: UiConfig) -> Self {
        Self {
            mode: Mode::Normal,
            focused_column: 0,
            selected_card: 0,
            expanded: HashSet::new(),
            drag: DragSession::default(),
            pressed: None,
            ui,
            notification: None,
            notification_level: NotificationLevel::Info,
            notification_expires: None,
            should_quit: false,
        }
    }

    pub fn focused_status(&self) -> JobStatus {
        JobStatus::from_index(self.focused_column).unwrap_or_default()
    }

    /// Get a reference to the currently selected job.
    pub fn selected_job<'a>(&self, store: &'a JobStore) -> Option<&'a Job> {
        store
            .jobs_with_status(self.focused_status())
            .get(self.selected_card)
            .copied()
    }

    /// Focus the column holding `id` and select it there.
    pub fn select_job(&mut self, store: &JobStore, id: &JobId) {
        let Some(job) = store.get(id) else {
            return;
        };
        let status = job.status;
        self.focused_column = status.index();
        self.selected_card = store
            .jobs_with_status(status)
            .iter()
            .position(|j| &j.id == id)
            .unwrap_or(0);
    }

    pub fn is_expanded(&self, id: &JobId) -> bool {
        self.expanded.contains(id)
    }

    pub fn toggle_expanded(&mut self, id: &JobId) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
    }

    /// Show a transient notification.
    pub fn notify(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Info;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Show a transient error notification (rendered in red).
    pub fn notify_error(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Error;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Clear expired notifications. Returns true if one was cleared.
    pub fn tick_notification(&mut self) -> bool {
        if let Some(expires) = self.notification_expires {
            if Instant::now() >= expires {
                self.notification = None;
                self.notification_level = NotificationLevel::Info;
                self.notification_expires = None;
                return true;
            }
        }
        false
    }

    /// Clamp the selected card index to the focused column's card count.
    pub fn clamp_selection(&mut self, store: &JobStore) {
        let count = store.count_by_status(self.focused_status());
        if count == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= count {
            self.selected_card = count - 1;
        }
    }
}

/// Main TUI application loop.
pub fn run(terminal: &mut DefaultTerminal, store: &mut JobStore, ui: UiConfig) -> color_eyre::Result<()> {
    let mut state = AppState::new(ui);

    // Redraw whenever the store reports a change.
    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    store.subscribe(move |_| flag.set(true));

    let mut hits = HitMap::default();
    let mut needs_draw = true;

    loop {
        if state.tick_notification() {
            needs_draw = true;
        }

        let changed = dirty.replace(false);
        if needs_draw || changed {
            let now = Utc::now();
            terminal.draw(|f| hits = crate::ui::render(f, store, &state, now))?;
            needs_draw = false;
        }

        if event::poll(Duration::from_millis(100))? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    map_key(key, &state.mode, state.drag.is_active())
                }
                Event::Mouse(mouse) => map_mouse(mouse),
                Event::Resize(..) => {
                    needs_draw = true;
                    continue;
                }
                _ => continue,
            };
            process_action(store, &mut state, action, &hits);
            needs_draw = true;

            if state.should_quit {
                break;
            }
        }
    }

    tracing::info!(jobs = store.len(), "jobdeck exiting");
    Ok(())
}

pub fn process_action(store: &mut JobStore, state: &mut AppState, action: Action, hits: &HitMap) {
    let was_goto = matches!(state.mode, Mode::Goto);

    match action {
        Action::None => {
            if was_goto {
                state.mode = Mode::Normal;
            }
        }

        // Navigation
        Action::FocusPrevColumn
        | Action::FocusNextColumn
        | Action::SelectPrevCard
        | Action::SelectNextCard => {
            handle_navigation(store, state, action);
        }

        // Goto / Jump
        Action::JumpToColumn(_) | Action::JumpToFirstCard | Action::JumpToLastCard => {
            handle_goto(store, state, action);
        }

        // Card actions
        Action::NewJob
        | Action::EditJob
        | Action::DeleteJob
        | Action::ToggleExpand
        | Action::MoveJobPrevColumn
        | Action::MoveJobNextColumn => {
            handle_card_action(store, state, action);
        }

        // Keyboard drag
        Action::BeginDrag
        | Action::DragHoverPrev
        | Action::DragHoverNext
        | Action::Drop
        | Action::CancelDrag => {
            handle_drag(store, state, action);
        }

        // Pointer
        Action::PointerDown { .. } | Action::PointerDrag { .. } | Action::PointerUp { .. } => {
            handle_pointer(store, state, action, hits);
        }

        // Form dialog and text input
        Action::FormNextField
        | Action::FormPrevField
        | Action::FormSubmit
        | Action::FormCancel
        | Action::InputChar(_)
        | Action::InputBackspace
        | Action::InputLeft
        | Action::InputRight
        | Action::InputHome
        | Action::InputEnd
        | Action::InputDeleteWord => {
            handle_form(store, state, action);
        }

        // Confirmation
        Action::Confirm | Action::Deny => {
            handle_confirm(store, state, action);
        }

        Action::EnterGotoMode => state.mode = Mode::Goto,
        Action::ShowHelp => state.mode = Mode::Help,
        Action::ClosePanel => state.mode = Mode::Normal,
        Action::Quit => {
            if matches!(state.mode, Mode::Normal) {
                state.should_quit = true;
            } else {
                state.mode = Mode::Normal;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handler: Navigation (column focus, card selection)
// ---------------------------------------------------------------------------

fn handle_navigation(store: &JobStore, state: &mut AppState, action: Action) {
    state.mode = Mode::Normal;
    match action {
        Action::FocusPrevColumn => {
            if state.focused_column > 0 {
                state.focused_column -= 1;
                state.clamp_selection(store);
            }
        }
        Action::FocusNextColumn => {
            if state.focused_column + 1 < JobStatus::ALL.len() {
                state.focused_column += 1;
                state.clamp_selection(store);
            }
        }
        Action::SelectPrevCard => {
            state.selected_card = state.selected_card.saturating_sub(1);
        }
        Action::SelectNextCard => {
            if state.selected_card + 1 < store.count_by_status(state.focused_status()) {
                state.selected_card += 1;
            }
        }
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Goto / Jump actions
// ---------------------------------------------------------------------------

fn handle_goto(store: &JobStore, state: &mut AppState, action: Action) {
    state.mode = Mode::Normal;
    match action {
        Action::JumpToColumn(idx) => {
            if idx < JobStatus::ALL.len() {
                state.focused_column = idx;
                state.selected_card = 0;
            }
        }
        Action::JumpToFirstCard => {
            state.selected_card = 0;
        }
        Action::JumpToLastCard => {
            state.selected_card = store.count_by_status(state.focused_status()).saturating_sub(1);
        }
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Card actions (create, edit, delete, expand, step move)
// ---------------------------------------------------------------------------

fn handle_card_action(store: &mut JobStore, state: &mut AppState, action: Action) {
    state.mode = Mode::Normal;
    match action {
        Action::NewJob => {
            state.mode = Mode::Form { form: Box::new(JobForm::create()) };
        }
        Action::EditJob => {
            if let Some(job) = state.selected_job(store) {
                state.mode = Mode::Form { form: Box::new(JobForm::edit(job)) };
            }
        }
        Action::DeleteJob => {
            if let Some(id) = state.selected_job(store).map(|j| j.id.clone()) {
                request_delete(store, state, id);
            }
        }
        Action::ToggleExpand => {
            if let Some(id) = state.selected_job(store).map(|j| j.id.clone()) {
                state.toggle_expanded(&id);
            }
        }
        Action::MoveJobPrevColumn | Action::MoveJobNextColumn => {
            let forward = matches!(action, Action::MoveJobNextColumn);
            let Some(job) = state.selected_job(store) else {
                return;
            };
            let idx = job.status.index();
            let target = if forward {
                JobStatus::from_index(idx + 1)
            } else {
                idx.checked_sub(1).and_then(JobStatus::from_index)
            };
            if let Some(to) = target {
                let id = job.id.clone();
                store.move_job(&id, to);
                state.select_job(store, &id);
                state.notify(format!("Moved to {}", to.title()));
            }
        }
        _ => unreachable!(),
    }
}

/// Delete immediately, or ask first when confirmation is enabled.
fn request_delete(store: &mut JobStore, state: &mut AppState, id: JobId) {
    if state.ui.confirm_delete {
        state.mode = Mode::Confirm {
            prompt: "Delete job?",
            on_confirm: ConfirmTarget::DeleteJob(id),
        };
    } else {
        delete_job(store, state, &id);
    }
}

fn delete_job(store: &mut JobStore, state: &mut AppState, id: &JobId) {
    if store.delete_job(id) {
        state.expanded.remove(id);
        state.clamp_selection(store);
        state.notify("Job deleted");
    }
}

// ---------------------------------------------------------------------------
// Handler: Keyboard drag
// ---------------------------------------------------------------------------

fn handle_drag(store: &mut JobStore, state: &mut AppState, action: Action) {
    match action {
        Action::BeginDrag => {
            state.mode = Mode::Normal;
            if let Some(job) = state.selected_job(store) {
                state.drag.begin(job.id.clone(), Some(job.status), None);
            }
        }
        Action::DragHoverPrev | Action::DragHoverNext => {
            let current = state.drag.hover().unwrap_or_else(|| state.focused_status());
            let idx = current.index();
            let next = if matches!(action, Action::DragHoverNext) {
                JobStatus::from_index(idx + 1)
            } else {
                idx.checked_sub(1).and_then(JobStatus::from_index)
            };
            state.drag.set_hover(Some(next.unwrap_or(current)));
        }
        Action::Drop => {
            let outcome = state.drag.drop_on_hover(store);
            finish_drop(store, state, outcome);
        }
        Action::CancelDrag => {
            state.drag.cancel();
        }
        _ => unreachable!(),
    }
}

fn finish_drop(store: &JobStore, state: &mut AppState, outcome: DropOutcome) {
    if let DropOutcome::Moved { id, to, .. } = outcome {
        state.select_job(store, &id);
        state.notify(format!("Moved to {}", to.title()));
    }
}

// ---------------------------------------------------------------------------
// Handler: Pointer (click, drag, drop)
// ---------------------------------------------------------------------------

fn handle_pointer(store: &mut JobStore, state: &mut AppState, action: Action, hits: &HitMap) {
    if !state.drag.is_active() && !matches!(state.mode, Mode::Normal | Mode::Goto) {
        return;
    }
    match action {
        Action::PointerDown { x, y } => {
            // A keyboard drag owns the keymap; a click ends it first.
            if state.drag.is_active() && state.drag.pointer().is_none() {
                state.drag.cancel();
            }
            state.mode = Mode::Normal;
            state.pressed = None;
            match hits.hit(x, y).cloned() {
                Some(Hit::AddButton) => {
                    state.mode = Mode::Form { form: Box::new(JobForm::create()) };
                }
                Some(Hit::DeleteJob(id)) => {
                    state.select_job(store, &id);
                    request_delete(store, state, id);
                }
                Some(Hit::Card(id)) => {
                    state.select_job(store, &id);
                    state.pressed = Some(PendingPress { id, x, y });
                }
                Some(Hit::Column(status)) => {
                    state.focused_column = status.index();
                    state.clamp_selection(store);
                }
                None => {}
            }
        }
        Action::PointerDrag { x, y } => {
            let hover = hits.drop_target(x, y).and_then(|t| t.resolve(store));
            if state.drag.is_active() {
                state.drag.set_pointer(x, y);
                state.drag.set_hover(hover);
            } else if let Some(press) = state.pressed.take() {
                if (press.x, press.y) == (x, y) {
                    state.pressed = Some(press);
                } else {
                    state.drag.begin(press.id, hover, Some((x, y)));
                }
            }
        }
        Action::PointerUp { x, y } => {
            if state.drag.is_active() {
                let outcome = state.drag.drop_on(hits.drop_target(x, y), store);
                finish_drop(store, state, outcome);
            } else if let Some(press) = state.pressed.take() {
                if hits.hit(x, y) == Some(&Hit::Card(press.id.clone())) {
                    state.toggle_expanded(&press.id);
                }
            }
        }
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Form dialog (field focus, text input, submit, cancel)
// ---------------------------------------------------------------------------

fn handle_form(store: &mut JobStore, state: &mut AppState, action: Action) {
    let Mode::Form { form } = &mut state.mode else {
        return;
    };

    match action {
        Action::FormNextField => form.focus_next(),
        Action::FormPrevField => form.focus_prev(),
        Action::FormCancel => state.mode = Mode::Normal,
        Action::FormSubmit => match form.submit(store) {
            Ok(submitted) => {
                state.mode = Mode::Normal;
                match submitted {
                    Submitted::Created(id) => {
                        state.select_job(store, &id);
                        state.notify("Job added");
                    }
                    Submitted::Updated(id) => {
                        state.select_job(store, &id);
                        state.notify("Job updated");
                    }
                    Submitted::Unchanged => state.notify("No changes"),
                }
            }
            Err(e) => state.notify_error(e.to_string()),
        },
        // Only notes may span lines.
        Action::InputChar('\n') if form.focus != FormField::Notes => {}
        _ => {
            if let Some(buf) = form.focused_buffer_mut() {
                match action {
                    Action::InputChar(c) => buf.insert(c),
                    Action::InputBackspace => buf.backspace(),
                    Action::InputLeft => buf.move_left(),
                    Action::InputRight => buf.move_right(),
                    Action::InputHome => buf.home(),
                    Action::InputEnd => buf.end(),
                    Action::InputDeleteWord => buf.delete_word(),
                    _ => unreachable!(),
                }
                let focus = form.focus;
                if form.error.as_ref().is_some_and(|e| e.field() == focus) {
                    form.error = None;
                }
            } else {
                // Status selector
                match action {
                    Action::InputLeft => form.cycle_status(false),
                    Action::InputRight | Action::InputChar(' ') => form.cycle_status(true),
                    _ => {}
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handler: Confirmation (delete job)
// ---------------------------------------------------------------------------

fn handle_confirm(store: &mut JobStore, state: &mut AppState, action: Action) {
    let old_mode = std::mem::replace(&mut state.mode, Mode::Normal);
    match (action, old_mode) {
        (
            Action::Confirm,
            Mode::Confirm {
                on_confirm: ConfirmTarget::DeleteJob(id),
                ..
            },
        ) => delete_job(store, state, &id),
        (Action::Confirm | Action::Deny, _) => {}
        _ => unreachable!(),
    }
}
