//! Lesson manager - ordered lessons of one course
//!
//! Ordering lives on the server. The client only names a direction and
//! reloads; the position checks here use list position, not `order`.

use std::time::Instant;

use crate::constants::FLASH_DURATION;
use crate::error::ApiError;
use crate::messages::{ApiCall, ApiOutcome, ScreenId};
use crate::models::{Lesson, ReorderDirection};
use crate::screens::{clamp_selection, expire_notice, ConfirmAction, InputMode, Notice, TextInput};

const LOAD_FAILED: &str = "Could not load lessons";
const CREATE_FAILED: &str = "Error creating lesson";
const CREATED: &str = "Lesson created";
const DELETE_FAILED: &str = "Could not delete lesson";
const REORDER_FAILED: &str = "Could not reorder lesson";
pub const EMPTY_STATE: &str = "No lessons in this course.";

#[derive(Clone, Debug)]
pub struct LessonManager {
    pub id: ScreenId,
    pub course_id: String,
    pub course_title: String,
    pub lessons: Vec<Lesson>,
    pub title: TextInput,
    pub selected: usize,
    pub mode: InputMode,
    pub error: Option<Notice>,
    pub success: Option<Notice>,
    pub confirm: Option<ConfirmAction>,
    pub loading: bool,
}

impl LessonManager {
    pub fn new(id: ScreenId, course_id: impl Into<String>, course_title: impl Into<String>) -> Self {
        LessonManager {
            id,
            course_id: course_id.into(),
            course_title: course_title.into(),
            lessons: Vec::new(),
            title: TextInput::default(),
            selected: 0,
            mode: InputMode::Normal,
            error: None,
            success: None,
            confirm: None,
            loading: false,
        }
    }

    pub fn selected_lesson(&self) -> Option<&Lesson> {
        self.lessons.get(self.selected)
    }

    /// Text shown in place of an empty list
    pub fn placeholder(&self) -> Option<&'static str> {
        self.lessons.is_empty().then_some(EMPTY_STATE)
    }

    pub fn select_next(&mut self) {
        if !self.lessons.is_empty() {
            self.selected = (self.selected + 1) % self.lessons.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.lessons.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.lessons.len() - 1);
        }
    }

    pub fn start_editing(&mut self) {
        self.mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn load(&mut self) -> ApiCall {
        self.error = None;
        self.loading = true;
        ApiCall::ListLessons {
            course_id: self.course_id.clone(),
        }
    }

    pub fn create(&mut self) -> ApiCall {
        self.error = None;
        self.success = None;
        self.stop_editing();
        ApiCall::CreateLesson {
            title: self.title.value().to_string(),
            course_id: self.course_id.clone(),
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(lesson) = self.selected_lesson() {
            self.confirm = Some(ConfirmAction::DeleteLesson {
                id: lesson.id.clone(),
                title: lesson.title.clone(),
            });
        }
    }

    pub fn confirm(&mut self) -> Option<ApiCall> {
        match self.confirm.take()? {
            ConfirmAction::DeleteLesson { id, .. } => Some(ApiCall::DeleteLesson { id }),
            ConfirmAction::DeleteCourse { .. } => None,
        }
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
    }

    /// First row cannot go up, last row cannot go down
    pub fn can_move(&self, index: usize, direction: ReorderDirection) -> bool {
        if index >= self.lessons.len() {
            return false;
        }
        match direction {
            ReorderDirection::Up => index > 0,
            ReorderDirection::Down => index + 1 < self.lessons.len(),
        }
    }

    pub fn move_selected(&mut self, direction: ReorderDirection) -> Option<ApiCall> {
        if !self.can_move(self.selected, direction) {
            return None;
        }
        let lesson = self.selected_lesson()?;
        Some(ApiCall::ReorderLesson {
            id: lesson.id.clone(),
            direction,
        })
    }

    /// Fold an outcome in; returns the follow-up reload if one is due
    pub fn handle(&mut self, outcome: ApiOutcome, now: Instant) -> Option<ApiCall> {
        match outcome {
            ApiOutcome::Lessons(result) => {
                self.loading = false;
                match result {
                    Ok(lessons) => self.replace_lessons(lessons),
                    Err(_) => {
                        self.error = Some(Notice::error(LOAD_FAILED));
                        self.lessons.clear();
                        self.selected = 0;
                    }
                }
                None
            }
            ApiOutcome::LessonCreated(Ok(())) => {
                self.title.clear();
                self.success = Some(Notice::flash(CREATED, now, FLASH_DURATION));
                Some(self.load())
            }
            ApiOutcome::LessonCreated(Err(_)) => {
                self.error = Some(Notice::error(CREATE_FAILED));
                self.success = None;
                None
            }
            ApiOutcome::LessonDeleted(result) => Some(self.reload_after(result, DELETE_FAILED)),
            ApiOutcome::LessonReordered(result) => Some(self.reload_after(result, REORDER_FAILED)),
            other => {
                tracing::debug!(?other, "Lesson manager ignoring outcome");
                None
            }
        }
    }

    /// Drop the success flash once its window has passed
    pub fn tick(&mut self, now: Instant) -> bool {
        expire_notice(&mut self.success, now)
    }

    /// Reload regardless of outcome, keeping the failure visible
    fn reload_after(&mut self, result: Result<(), ApiError>, failure: &str) -> ApiCall {
        let call = self.load();
        if result.is_err() {
            self.error = Some(Notice::error(failure));
        }
        call
    }

    /// Keep the selection on the same lesson across reloads
    fn replace_lessons(&mut self, lessons: Vec<Lesson>) {
        let selected_id = self.selected_lesson().map(|l| l.id.clone());
        self.lessons = lessons;
        self.selected = selected_id
            .and_then(|id| self.lessons.iter().position(|l| l.id == id))
            .unwrap_or_else(|| clamp_selection(self.selected, self.lessons.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn lesson(id: &str, order: u32) -> Lesson {
        Lesson {
            id: id.into(),
            title: format!("Lesson {}", id),
            order,
        }
    }

    fn manager_with(lessons: Vec<Lesson>) -> LessonManager {
        let mut manager = LessonManager::new(ScreenId(9), "c1", "Rust");
        manager.load();
        manager.handle(ApiOutcome::Lessons(Ok(lessons)), Instant::now());
        manager
    }

    #[test]
    fn test_load_failure_empties_list() {
        let mut manager = manager_with(vec![lesson("a", 1)]);
        manager.load();
        manager.handle(ApiOutcome::Lessons(Err(ApiError::Rejected { status: 500 })), Instant::now());
        assert!(manager.lessons.is_empty());
        assert_eq!(manager.error.as_ref().unwrap().text, LOAD_FAILED);

        manager.load();
        assert!(manager.error.is_none());
        manager.handle(ApiOutcome::Lessons(Err(ApiError::Network("down".into()))), Instant::now());
        assert_eq!(manager.error.as_ref().unwrap().text, LOAD_FAILED);
    }

    #[test]
    fn test_create_success_flash_expires_after_two_seconds() {
        let mut manager = manager_with(vec![]);
        manager.title.set("Ownership");
        let call = manager.create();
        assert_eq!(
            call,
            ApiCall::CreateLesson {
                title: "Ownership".into(),
                course_id: "c1".into(),
            }
        );

        let now = Instant::now();
        let reload = manager.handle(ApiOutcome::LessonCreated(Ok(())), now);
        assert_eq!(reload, Some(ApiCall::ListLessons { course_id: "c1".into() }));
        assert!(manager.title.is_empty());
        assert_eq!(manager.success.as_ref().unwrap().text, CREATED);

        assert!(!manager.tick(now + Duration::from_millis(1500)));
        assert!(manager.success.is_some());
        assert!(manager.tick(now + Duration::from_secs(2)));
        assert!(manager.success.is_none());
    }

    #[test]
    fn test_create_failure_keeps_title() {
        let mut manager = manager_with(vec![]);
        manager.title.set("Ownership");
        manager.create();
        let reload = manager.handle(
            ApiOutcome::LessonCreated(Err(ApiError::Rejected { status: 400 })),
            Instant::now(),
        );
        assert_eq!(reload, None);
        assert_eq!(manager.title.value(), "Ownership");
        assert_eq!(manager.error.as_ref().unwrap().text, CREATE_FAILED);
    }

    #[test]
    fn test_edges_cannot_move_outward() {
        let mut manager = manager_with(vec![lesson("a", 1), lesson("b", 2), lesson("c", 3)]);

        assert!(!manager.can_move(0, ReorderDirection::Up));
        assert!(manager.can_move(0, ReorderDirection::Down));
        assert!(!manager.can_move(2, ReorderDirection::Down));
        assert!(manager.can_move(2, ReorderDirection::Up));

        manager.selected = 0;
        assert_eq!(manager.move_selected(ReorderDirection::Up), None);
        manager.selected = 2;
        assert_eq!(manager.move_selected(ReorderDirection::Down), None);
        assert_eq!(
            manager.move_selected(ReorderDirection::Up),
            Some(ApiCall::ReorderLesson {
                id: "c".into(),
                direction: ReorderDirection::Up,
            })
        );
    }

    #[test]
    fn test_single_lesson_cannot_move() {
        let manager = manager_with(vec![lesson("a", 1)]);
        assert!(!manager.can_move(0, ReorderDirection::Up));
        assert!(!manager.can_move(0, ReorderDirection::Down));
    }

    #[test]
    fn test_reorder_reloads_and_follows_lesson() {
        let mut manager = manager_with(vec![lesson("a", 1), lesson("b", 2)]);
        manager.selected = 1;
        manager.move_selected(ReorderDirection::Up);

        let reload = manager.handle(ApiOutcome::LessonReordered(Ok(())), Instant::now());
        assert_eq!(reload, Some(ApiCall::ListLessons { course_id: "c1".into() }));

        manager.handle(
            ApiOutcome::Lessons(Ok(vec![lesson("b", 1), lesson("a", 2)])),
            Instant::now(),
        );
        assert_eq!(manager.selected, 0);
        assert_eq!(manager.selected_lesson().unwrap().id, "b");
    }

    #[test]
    fn test_deleting_only_lesson_leaves_empty_list() {
        let mut manager = manager_with(vec![lesson("a", 1)]);
        manager.request_delete();
        assert_eq!(manager.confirm(), Some(ApiCall::DeleteLesson { id: "a".into() }));

        let reload = manager.handle(ApiOutcome::LessonDeleted(Ok(())), Instant::now());
        assert!(reload.is_some());
        manager.handle(ApiOutcome::Lessons(Ok(vec![])), Instant::now());
        assert!(manager.lessons.is_empty());
        assert!(manager.selected_lesson().is_none());
        assert_eq!(manager.placeholder(), Some(EMPTY_STATE));
    }

    #[test]
    fn test_failed_delete_still_reloads() {
        let mut manager = manager_with(vec![lesson("a", 1)]);
        let reload = manager.handle(
            ApiOutcome::LessonDeleted(Err(ApiError::Rejected { status: 404 })),
            Instant::now(),
        );
        assert!(reload.is_some());
        assert_eq!(manager.error.as_ref().unwrap().text, DELETE_FAILED);
    }

    #[test]
    fn test_cancelled_confirm_sends_nothing() {
        let mut manager = manager_with(vec![lesson("a", 1)]);
        manager.request_delete();
        manager.cancel_confirm();
        assert_eq!(manager.confirm(), None);
    }
}
