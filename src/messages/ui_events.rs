//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which view is on screen (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum View {
    #[default]
    Login,
    Register,
    Courses,
    Lessons,
}

/// Everything the key mapper needs to know about the current screen
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct KeyContext {
    pub view: View,
    /// A title field has focus
    pub editing: bool,
    pub confirm_pending: bool,
    pub import_open: bool,
    pub show_help: bool,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Input editing
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextField,
    Submit,
    StartEditing,
    StopEditing,

    // Navigation between views
    ShowRegister,
    ShowLogin,
    OpenLessons,
    Back,
    Logout,

    // Lists
    SelectNext,
    SelectPrev,
    DeleteSelected,
    TogglePublish,
    CycleFilter,
    NextPage,
    PrevPage,
    Reload,
    MoveUp,
    MoveDown,

    // Import popup
    OpenImport,
    ImportChar(char),
    ImportBackspace,
    ImportAutocomplete,
    SubmitImport,
    CancelImport,

    // Confirm popup
    Confirm,
    CancelConfirm,

    // Help popup
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: &KeyContext) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('r') if ctx.view == View::Login => return Some(UiEvent::ShowRegister),
            _ => return None,
        }
    }

    // Popups first
    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }
    if key.code == KeyCode::F(1) {
        return Some(UiEvent::ToggleHelp);
    }

    if ctx.confirm_pending {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(UiEvent::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(UiEvent::CancelConfirm),
            _ => None,
        };
    }

    if ctx.import_open {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelImport),
            KeyCode::Enter => Some(UiEvent::SubmitImport),
            KeyCode::Tab => Some(UiEvent::ImportAutocomplete),
            KeyCode::Backspace => Some(UiEvent::ImportBackspace),
            KeyCode::Char(c) => Some(UiEvent::ImportChar(c)),
            _ => None,
        };
    }

    match ctx.view {
        View::Login | View::Register => handle_form_keys(key, ctx.view),
        View::Courses | View::Lessons if ctx.editing => handle_title_keys(key),
        View::Courses => handle_course_keys(key),
        View::Lessons => handle_lesson_keys(key),
    }
}

/// Login and register forms always have a focused field
fn handle_form_keys(key: KeyEvent, view: View) -> Option<UiEvent> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Esc if view == View::Register => Some(UiEvent::ShowLogin),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

/// New course / lesson title field
fn handle_title_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_course_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Left => Some(UiEvent::PrevPage),
        KeyCode::Right => Some(UiEvent::NextPage),
        KeyCode::Char('n') => Some(UiEvent::StartEditing),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
        KeyCode::Char('p') => Some(UiEvent::TogglePublish),
        KeyCode::Char('l') | KeyCode::Enter => Some(UiEvent::OpenLessons),
        KeyCode::Char('f') => Some(UiEvent::CycleFilter),
        KeyCode::Char('i') => Some(UiEvent::OpenImport),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        KeyCode::Char('o') => Some(UiEvent::Logout),
        _ => None,
    }
}

fn handle_lesson_keys(key: KeyEvent) -> Option<UiEvent> {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up if shift => Some(UiEvent::MoveUp),
        KeyCode::Down if shift => Some(UiEvent::MoveDown),
        KeyCode::Char('K') => Some(UiEvent::MoveUp),
        KeyCode::Char('J') => Some(UiEvent::MoveDown),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Char('n') => Some(UiEvent::StartEditing),
        KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        KeyCode::Esc | KeyCode::Char('b') => Some(UiEvent::Back),
        _ => None,
    }
}
