//! Command handlers - business logic for processing UI events

use crate::app::state::{execute, Screen};
use crate::app::AppState;
use crate::messages::{ApiCall, NetworkCommand, UiEvent};
use crate::models::ReorderDirection;
use crate::screens::login::CredentialsForm;
use crate::screens::{CoursesScreen, InputMode, LessonManager, TextInput};

impl AppState {
    /// Apply one UI event; returns the command to send to the network layer.
    /// `Quit` is handled by the actor.
    pub fn handle_ui_event(&mut self, event: UiEvent) -> Option<NetworkCommand> {
        match event {
            UiEvent::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            UiEvent::CloseHelp => {
                self.show_help = false;
                None
            }
            UiEvent::Quit => None,
            UiEvent::Logout => self.logout(),
            UiEvent::ShowRegister => {
                if matches!(self.screen, Screen::Login(_)) {
                    self.show_register();
                }
                None
            }
            UiEvent::ShowLogin => {
                if matches!(self.screen, Screen::Register(_)) {
                    self.show_login();
                }
                None
            }
            UiEvent::OpenLessons => self.open_lessons(),
            event => self.dispatch_to_screen(event),
        }
    }

    fn open_lessons(&mut self) -> Option<NetworkCommand> {
        let id = self.next_id();
        match &mut self.screen {
            Screen::Courses(courses) if courses.lessons.is_none() => {
                courses.open_lessons(id).map(|call| execute(id, call))
            }
            _ => None,
        }
    }

    fn dispatch_to_screen(&mut self, event: UiEvent) -> Option<NetworkCommand> {
        match &mut self.screen {
            Screen::Login(login) => {
                if event == UiEvent::Submit {
                    self.banner = None;
                    let id = login.id;
                    return login.submit().map(|call| execute(id, call));
                }
                edit_form(&mut login.form, event);
                None
            }
            Screen::Register(register) => {
                if event == UiEvent::Submit {
                    let id = register.id;
                    return register.submit().map(|call| execute(id, call));
                }
                edit_form(&mut register.form, event);
                None
            }
            Screen::Courses(courses) => {
                if courses.lessons.is_some() && event == UiEvent::Back {
                    let id = courses.id;
                    return Some(execute(id, courses.close_lessons()));
                }
                if let Some(lessons) = courses.lessons.as_mut() {
                    let id = lessons.id;
                    return lesson_event(lessons, event).map(|call| execute(id, call));
                }
                let id = courses.id;
                course_event(courses, event).map(|call| execute(id, call))
            }
        }
    }
}

/// Login / register field editing
fn edit_form(form: &mut CredentialsForm, event: UiEvent) {
    match event {
        UiEvent::NextField => form.next_field(),
        other => {
            edit_text(form.focused_mut(), other);
        }
    }
}

/// Shared text editing keys; false when the event is not an edit
fn edit_text(input: &mut TextInput, event: UiEvent) -> bool {
    match event {
        UiEvent::CharInput(c) => input.insert(c),
        UiEvent::Backspace => input.backspace(),
        UiEvent::CursorLeft => input.move_left(),
        UiEvent::CursorRight => input.move_right(),
        _ => return false,
    }
    true
}

fn course_event(courses: &mut CoursesScreen, event: UiEvent) -> Option<ApiCall> {
    if courses.mode == InputMode::Editing {
        return match event {
            UiEvent::Submit => Some(courses.create()),
            UiEvent::StopEditing => {
                courses.stop_editing();
                None
            }
            other => {
                edit_text(&mut courses.title, other);
                None
            }
        };
    }

    match event {
        UiEvent::SelectNext => courses.select_next(),
        UiEvent::SelectPrev => courses.select_prev(),
        UiEvent::StartEditing => courses.start_editing(),
        UiEvent::DeleteSelected => courses.request_delete(),
        UiEvent::Confirm => return courses.confirm(),
        UiEvent::CancelConfirm => courses.cancel_confirm(),
        UiEvent::TogglePublish => return courses.toggle_publish(),
        UiEvent::CycleFilter => return Some(courses.cycle_filter()),
        UiEvent::NextPage => return courses.next_page(),
        UiEvent::PrevPage => return courses.prev_page(),
        UiEvent::Reload => return Some(courses.load()),
        UiEvent::OpenImport => courses.open_import(),
        UiEvent::ImportChar(c) => {
            if let Some(input) = courses.import_input_mut() {
                input.insert(c);
            }
        }
        UiEvent::ImportBackspace => {
            if let Some(input) = courses.import_input_mut() {
                input.backspace();
            }
        }
        UiEvent::ImportAutocomplete => courses.import_autocomplete(),
        UiEvent::SubmitImport => return courses.submit_import(),
        UiEvent::CancelImport => courses.cancel_import(),
        other => tracing::trace!(?other, "Unhandled event on course list"),
    }
    None
}

fn lesson_event(lessons: &mut LessonManager, event: UiEvent) -> Option<ApiCall> {
    if lessons.mode == InputMode::Editing {
        return match event {
            UiEvent::Submit => Some(lessons.create()),
            UiEvent::StopEditing => {
                lessons.stop_editing();
                None
            }
            other => {
                edit_text(&mut lessons.title, other);
                None
            }
        };
    }

    match event {
        UiEvent::SelectNext => lessons.select_next(),
        UiEvent::SelectPrev => lessons.select_prev(),
        UiEvent::StartEditing => lessons.start_editing(),
        UiEvent::DeleteSelected => lessons.request_delete(),
        UiEvent::Confirm => return lessons.confirm(),
        UiEvent::CancelConfirm => lessons.cancel_confirm(),
        UiEvent::MoveUp => return lessons.move_selected(ReorderDirection::Up),
        UiEvent::MoveDown => return lessons.move_selected(ReorderDirection::Down),
        UiEvent::Reload => return Some(lessons.load()),
        other => tracing::trace!(?other, "Unhandled event in lesson manager"),
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{ApiOutcome, NetworkResponse};
    use crate::models::{Course, CourseStatus, Page};
    use crate::session::Session;
    use std::time::Instant;

    fn courses_state() -> AppState {
        let mut state = AppState::new(Session::in_memory());
        state.session().login("abc");
        state.start();
        let id = state.screen.id();
        state.handle_response(
            NetworkResponse {
                screen: id,
                outcome: ApiOutcome::Courses(Ok(Page {
                    data: vec![Course {
                        id: "c1".into(),
                        title: "Rust".into(),
                        status: CourseStatus::Published,
                        is_deleted: false,
                        created_at: None,
                        updated_at: None,
                    }],
                    total: 1,
                })),
            },
            Instant::now(),
        );
        state
    }

    fn call(cmd: Option<NetworkCommand>) -> Option<ApiCall> {
        match cmd {
            Some(NetworkCommand::Execute { call, .. }) => Some(call),
            _ => None,
        }
    }

    #[test]
    fn test_typing_into_login_form() {
        let mut state = AppState::new(Session::in_memory());
        state.start();
        if let Screen::Login(login) = &mut state.screen {
            login.form.clear();
        }
        for c in "me@x.io".chars() {
            state.handle_ui_event(UiEvent::CharInput(c));
        }
        state.handle_ui_event(UiEvent::NextField);
        state.handle_ui_event(UiEvent::CharInput('p'));

        match call(state.handle_ui_event(UiEvent::Submit)) {
            Some(ApiCall::Login(creds)) => {
                assert_eq!(creds.email, "me@x.io");
                assert_eq!(creds.password, "p");
            }
            other => panic!("expected login, got {:?}", other),
        }
    }

    #[test]
    fn test_register_round_trip_between_views() {
        let mut state = AppState::new(Session::in_memory());
        state.start();
        state.handle_ui_event(UiEvent::ShowRegister);
        assert!(matches!(state.screen, Screen::Register(_)));
        state.handle_ui_event(UiEvent::ShowLogin);
        assert!(matches!(state.screen, Screen::Login(_)));
    }

    #[test]
    fn test_course_publish_toggle() {
        let mut state = courses_state();
        assert_eq!(
            call(state.handle_ui_event(UiEvent::TogglePublish)),
            Some(ApiCall::UnpublishCourse { id: "c1".into() })
        );
    }

    #[test]
    fn test_lessons_open_and_back() {
        let mut state = courses_state();
        let courses_id = state.screen.id();

        let open = state.handle_ui_event(UiEvent::OpenLessons);
        match open {
            Some(NetworkCommand::Execute { screen, call }) => {
                assert_ne!(screen, courses_id);
                assert_eq!(call, ApiCall::ListLessons { course_id: "c1".into() });
            }
            other => panic!("expected lesson load, got {:?}", other),
        }

        match state.handle_ui_event(UiEvent::Back) {
            Some(NetworkCommand::Execute { screen, call }) => {
                assert_eq!(screen, courses_id);
                assert!(matches!(call, ApiCall::SearchCourses { .. }));
            }
            other => panic!("expected course reload, got {:?}", other),
        }
    }

    #[test]
    fn test_editing_title_then_submit() {
        let mut state = courses_state();
        state.handle_ui_event(UiEvent::StartEditing);
        for c in "Go".chars() {
            state.handle_ui_event(UiEvent::CharInput(c));
        }
        assert_eq!(
            call(state.handle_ui_event(UiEvent::Submit)),
            Some(ApiCall::CreateCourse { title: "Go".into() })
        );
    }

    #[test]
    fn test_delete_needs_confirm() {
        let mut state = courses_state();
        assert!(state.handle_ui_event(UiEvent::DeleteSelected).is_none());
        assert_eq!(
            call(state.handle_ui_event(UiEvent::Confirm)),
            Some(ApiCall::DeleteCourse { id: "c1".into() })
        );
    }
}
