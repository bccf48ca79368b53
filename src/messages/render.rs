//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::Screen;
use crate::messages::ui_events::{KeyContext, View};
use crate::screens::{InputMode, Notice};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub screen: Screen,
    pub show_help: bool,
    pub banner: Option<Notice>,
}

impl RenderState {
    pub fn view(&self) -> View {
        match &self.screen {
            Screen::Login(_) => View::Login,
            Screen::Register(_) => View::Register,
            Screen::Courses(c) if c.lessons.is_some() => View::Lessons,
            Screen::Courses(_) => View::Courses,
        }
    }

    /// What the key mapper needs from this frame
    pub fn key_context(&self) -> KeyContext {
        let mut ctx = KeyContext {
            view: self.view(),
            show_help: self.show_help,
            ..KeyContext::default()
        };
        if let Screen::Courses(courses) = &self.screen {
            match &courses.lessons {
                Some(lessons) => {
                    ctx.editing = lessons.mode == InputMode::Editing;
                    ctx.confirm_pending = lessons.confirm.is_some();
                }
                None => {
                    ctx.editing = courses.mode == InputMode::Editing;
                    ctx.confirm_pending = courses.confirm.is_some();
                    ctx.import_open = courses.import_path.is_some();
                }
            }
        }
        ctx
    }
}
