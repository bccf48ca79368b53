//! Course list - paginated, filterable, with the lesson manager nested in it

use std::path::PathBuf;

use crate::constants::PAGE_SIZE;
use crate::messages::{ApiCall, ApiOutcome, ScreenId};
use crate::models::{Course, CourseStatus, StatusFilter};
use crate::screens::path::{autocomplete, expand_home};
use crate::screens::{clamp_selection, ConfirmAction, InputMode, LessonManager, Notice, TextInput};

const LOAD_FAILED: &str = "Could not load courses";
const CREATE_FAILED: &str = "Error creating course";
const DELETE_FAILED: &str = "Could not delete course";
const PUBLISH_FAILED: &str = "Could not publish course";
const UNPUBLISH_FAILED: &str = "Could not unpublish course";
const IMPORT_FAILED: &str = "Error importing file";
const IMPORTED: &str = "Import successful";
pub const EMPTY_STATE: &str = "No courses found.";

#[derive(Clone, Debug)]
pub struct CoursesScreen {
    pub id: ScreenId,
    pub courses: Vec<Course>,
    pub title: TextInput,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub filter: StatusFilter,
    pub selected: usize,
    pub mode: InputMode,
    pub notice: Option<Notice>,
    pub confirm: Option<ConfirmAction>,
    /// Open import popup and the path typed so far
    pub import_path: Option<TextInput>,
    pub lessons: Option<LessonManager>,
    pub loading: bool,
}

impl CoursesScreen {
    pub fn new(id: ScreenId) -> Self {
        CoursesScreen {
            id,
            courses: Vec::new(),
            title: TextInput::default(),
            page: 1,
            page_size: PAGE_SIZE,
            total: 0,
            filter: StatusFilter::Unset,
            selected: 0,
            mode: InputMode::Normal,
            notice: None,
            confirm: None,
            import_path: None,
            lessons: None,
            loading: false,
        }
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.courses.get(self.selected)
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        (self.courses.is_empty() && !self.loading).then_some(EMPTY_STATE)
    }

    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = self.total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn select_next(&mut self) {
        if !self.courses.is_empty() {
            self.selected = (self.selected + 1) % self.courses.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.courses.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.courses.len() - 1);
        }
    }

    pub fn start_editing(&mut self) {
        self.mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.mode = InputMode::Normal;
    }

    // ========================
    // Loading, filter, paging
    // ========================

    pub fn load(&mut self) -> ApiCall {
        self.loading = true;
        ApiCall::SearchCourses {
            page: self.page,
            page_size: self.page_size,
            filter: self.filter,
        }
    }

    /// A filter change always starts over at page 1
    pub fn set_filter(&mut self, filter: StatusFilter) -> ApiCall {
        self.filter = filter;
        self.page = 1;
        self.selected = 0;
        self.load()
    }

    pub fn cycle_filter(&mut self) -> ApiCall {
        self.set_filter(self.filter.next())
    }

    /// Changing the page keeps the filter
    pub fn set_page(&mut self, page: u32) -> Option<ApiCall> {
        let page = page.max(1);
        if page == self.page {
            return None;
        }
        self.page = page;
        self.selected = 0;
        Some(self.load())
    }

    pub fn next_page(&mut self) -> Option<ApiCall> {
        if u64::from(self.page) * u64::from(self.page_size) >= self.total {
            return None;
        }
        self.set_page(self.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<ApiCall> {
        if self.page <= 1 {
            return None;
        }
        self.set_page(self.page - 1)
    }

    // ========================
    // Course intents
    // ========================

    /// The title goes out as typed; the server validates it
    pub fn create(&mut self) -> ApiCall {
        self.notice = None;
        self.stop_editing();
        ApiCall::CreateCourse {
            title: self.title.value().to_string(),
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(course) = self.selected_course() {
            self.confirm = Some(ConfirmAction::DeleteCourse {
                id: course.id.clone(),
                title: course.title.clone(),
            });
        }
    }

    pub fn confirm(&mut self) -> Option<ApiCall> {
        match self.confirm.take()? {
            ConfirmAction::DeleteCourse { id, .. } => Some(ApiCall::DeleteCourse { id }),
            ConfirmAction::DeleteLesson { .. } => None,
        }
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
    }

    /// Publish a draft or unpublish a published course
    pub fn toggle_publish(&mut self) -> Option<ApiCall> {
        let course = self.selected_course()?;
        let id = course.id.clone();
        Some(match course.status {
            CourseStatus::Draft => ApiCall::PublishCourse { id },
            CourseStatus::Published => ApiCall::UnpublishCourse { id },
        })
    }

    // ========================
    // Import
    // ========================

    pub fn open_import(&mut self) {
        self.import_path = Some(TextInput::default());
    }

    pub fn cancel_import(&mut self) {
        self.import_path = None;
    }

    pub fn import_input_mut(&mut self) -> Option<&mut TextInput> {
        self.import_path.as_mut()
    }

    pub fn import_autocomplete(&mut self) {
        if let Some(input) = self.import_path.as_mut() {
            if let Some(completed) = autocomplete(input.value()) {
                input.set(completed);
            }
        }
    }

    /// The popup closes and its input is reset whether or not a call goes out
    pub fn submit_import(&mut self) -> Option<ApiCall> {
        let input = self.import_path.take()?;
        let raw = input.value().trim();
        if raw.is_empty() {
            return None;
        }
        self.notice = None;
        Some(ApiCall::ImportCourses {
            path: PathBuf::from(expand_home(raw)),
        })
    }

    // ========================
    // Lessons
    // ========================

    pub fn open_lessons(&mut self, id: ScreenId) -> Option<ApiCall> {
        let course = self.selected_course()?;
        let mut manager = LessonManager::new(id, course.id.clone(), course.title.clone());
        let call = manager.load();
        self.lessons = Some(manager);
        Some(call)
    }

    /// Back to the list, which is refreshed
    pub fn close_lessons(&mut self) -> ApiCall {
        self.lessons = None;
        self.load()
    }

    // ========================
    // Outcomes
    // ========================

    /// Fold an outcome in; returns the follow-up reload if one is due
    pub fn handle(&mut self, outcome: ApiOutcome) -> Option<ApiCall> {
        match outcome {
            ApiOutcome::Courses(result) => {
                self.loading = false;
                match result {
                    Ok(page) => {
                        self.courses = page.data;
                        self.total = page.total;
                        self.selected = clamp_selection(self.selected, self.courses.len());
                        // Other notices outlive a reload; a load error does not
                        if self.notice.as_ref().is_some_and(|n| n.text == LOAD_FAILED) {
                            self.notice = None;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Course list load failed");
                        self.notice = Some(Notice::error(LOAD_FAILED));
                    }
                }
                None
            }
            ApiOutcome::CourseCreated(Ok(())) => {
                self.title.clear();
                Some(self.load())
            }
            ApiOutcome::CourseCreated(Err(_)) => {
                self.notice = Some(Notice::error(CREATE_FAILED));
                None
            }
            ApiOutcome::CourseDeleted(result) => {
                if result.is_err() {
                    self.notice = Some(Notice::error(DELETE_FAILED));
                }
                Some(self.load())
            }
            ApiOutcome::CoursePublished(result) => {
                if result.is_err() {
                    self.notice = Some(Notice::error(PUBLISH_FAILED));
                }
                Some(self.load())
            }
            ApiOutcome::CourseUnpublished(result) => {
                if result.is_err() {
                    self.notice = Some(Notice::error(UNPUBLISH_FAILED));
                }
                Some(self.load())
            }
            ApiOutcome::Imported(Ok(())) => {
                self.notice = Some(Notice::info(IMPORTED));
                Some(self.load())
            }
            ApiOutcome::Imported(Err(e)) => {
                tracing::warn!(error = %e, "Import failed");
                self.notice = Some(Notice::error(IMPORT_FAILED));
                None
            }
            other => {
                tracing::debug!(?other, "Course list ignoring outcome");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::Page;
    use crate::screens::NoticeKind;

    fn course(id: &str, status: CourseStatus) -> Course {
        Course {
            id: id.into(),
            title: format!("Course {}", id),
            status,
            is_deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded(courses: Vec<Course>, total: u64) -> CoursesScreen {
        let mut screen = CoursesScreen::new(ScreenId(1));
        screen.load();
        screen.handle(ApiOutcome::Courses(Ok(Page { data: courses, total })));
        screen
    }

    fn search(page: u32, filter: StatusFilter) -> ApiCall {
        ApiCall::SearchCourses {
            page,
            page_size: PAGE_SIZE,
            filter,
        }
    }

    #[test]
    fn test_initial_load() {
        let mut screen = CoursesScreen::new(ScreenId(1));
        assert_eq!(screen.load(), search(1, StatusFilter::Unset));
        assert!(screen.loading);
        assert_eq!(screen.placeholder(), None);

        screen.handle(ApiOutcome::Courses(Ok(Page::default())));
        assert!(!screen.loading);
        assert_eq!(screen.placeholder(), Some(EMPTY_STATE));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut screen = loaded(vec![course("a", CourseStatus::Draft)], 35);
        screen.next_page();
        screen.next_page();
        assert_eq!(screen.page, 3);

        let call = screen.set_filter(StatusFilter::Published);
        assert_eq!(call, search(1, StatusFilter::Published));
        assert_eq!(screen.page, 1);

        assert_eq!(screen.cycle_filter(), search(1, StatusFilter::Unset));
        assert_eq!(screen.cycle_filter(), search(1, StatusFilter::Draft));
    }

    #[test]
    fn test_page_change_keeps_filter() {
        let mut screen = loaded(vec![course("a", CourseStatus::Draft)], 25);
        screen.set_filter(StatusFilter::Draft);
        screen.handle(ApiOutcome::Courses(Ok(Page {
            data: vec![course("a", CourseStatus::Draft)],
            total: 25,
        })));

        assert_eq!(screen.next_page(), Some(search(2, StatusFilter::Draft)));
        assert_eq!(screen.filter, StatusFilter::Draft);
        assert_eq!(screen.prev_page(), Some(search(1, StatusFilter::Draft)));
        assert_eq!(screen.filter, StatusFilter::Draft);
    }

    #[test]
    fn test_paging_bounds() {
        let mut screen = loaded(vec![course("a", CourseStatus::Draft)], 20);
        assert_eq!(screen.total_pages(), 2);
        assert_eq!(screen.prev_page(), None);
        assert!(screen.next_page().is_some());
        assert_eq!(screen.next_page(), None);

        let empty = loaded(vec![], 0);
        assert_eq!(empty.total_pages(), 1);
    }

    #[test]
    fn test_create_failure_keeps_draft_and_skips_reload() {
        let mut screen = loaded(vec![], 0);
        screen.title.set("Async Rust");
        assert_eq!(screen.create(), ApiCall::CreateCourse { title: "Async Rust".into() });

        let follow_up = screen.handle(ApiOutcome::CourseCreated(Err(ApiError::Rejected { status: 400 })));
        assert_eq!(follow_up, None);
        assert_eq!(screen.title.value(), "Async Rust");
        let notice = screen.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.text, CREATE_FAILED);
    }

    #[test]
    fn test_create_success_clears_draft_and_reloads() {
        let mut screen = loaded(vec![], 0);
        screen.title.set("Async Rust");
        screen.create();
        let follow_up = screen.handle(ApiOutcome::CourseCreated(Ok(())));
        assert_eq!(follow_up, Some(search(1, StatusFilter::Unset)));
        assert!(screen.title.is_empty());
    }

    #[test]
    fn test_blank_title_is_not_validated() {
        let mut screen = loaded(vec![], 0);
        screen.title.set("   ");
        assert_eq!(screen.create(), ApiCall::CreateCourse { title: "   ".into() });
    }

    #[test]
    fn test_delete_requires_confirmation_and_always_reloads() {
        let mut screen = loaded(vec![course("a", CourseStatus::Draft)], 1);
        assert_eq!(screen.confirm(), None);

        screen.request_delete();
        assert_eq!(screen.confirm(), Some(ApiCall::DeleteCourse { id: "a".into() }));
        assert!(screen.confirm.is_none());

        let follow_up = screen.handle(ApiOutcome::CourseDeleted(Err(ApiError::Rejected { status: 500 })));
        assert!(follow_up.is_some());
        assert_eq!(screen.notice.as_ref().unwrap().text, DELETE_FAILED);
    }

    #[test]
    fn test_toggle_publish_follows_status() {
        let mut screen = loaded(
            vec![course("a", CourseStatus::Draft), course("b", CourseStatus::Published)],
            2,
        );
        assert_eq!(screen.toggle_publish(), Some(ApiCall::PublishCourse { id: "a".into() }));
        screen.select_next();
        assert_eq!(screen.toggle_publish(), Some(ApiCall::UnpublishCourse { id: "b".into() }));

        assert!(screen.handle(ApiOutcome::CourseUnpublished(Ok(()))).is_some());
        assert!(screen.notice.is_none());
    }

    #[test]
    fn test_import_success() {
        let mut screen = loaded(vec![], 0);
        screen.open_import();
        for c in "/tmp/courses.xlsx".chars() {
            screen.import_input_mut().unwrap().insert(c);
        }

        let call = screen.submit_import();
        assert_eq!(
            call,
            Some(ApiCall::ImportCourses {
                path: PathBuf::from("/tmp/courses.xlsx"),
            })
        );
        assert!(screen.import_path.is_none());

        let follow_up = screen.handle(ApiOutcome::Imported(Ok(())));
        assert_eq!(follow_up, Some(search(1, StatusFilter::Unset)));
        let notice = screen.notice.as_ref().unwrap();
        assert_eq!(notice.kind, NoticeKind::Info);
        assert_eq!(notice.text, IMPORTED);
    }

    #[test]
    fn test_import_failure() {
        let mut screen = loaded(vec![], 0);
        screen.open_import();
        screen.import_input_mut().unwrap().set("report.ods");
        assert!(screen.submit_import().is_some());

        let follow_up = screen.handle(ApiOutcome::Imported(Err(ApiError::Io("not found".into()))));
        assert_eq!(follow_up, None);
        assert_eq!(screen.notice.as_ref().unwrap().text, IMPORT_FAILED);
        assert!(screen.import_path.is_none());
    }

    #[test]
    fn test_empty_import_path_sends_nothing() {
        let mut screen = loaded(vec![], 0);
        screen.open_import();
        assert_eq!(screen.submit_import(), None);
        assert!(screen.import_path.is_none());
    }

    #[test]
    fn test_open_and_close_lessons() {
        let mut screen = loaded(vec![course("a", CourseStatus::Draft)], 1);
        let call = screen.open_lessons(ScreenId(2));
        assert_eq!(call, Some(ApiCall::ListLessons { course_id: "a".into() }));
        assert_eq!(screen.lessons.as_ref().unwrap().course_title, "Course a");

        assert_eq!(screen.close_lessons(), search(1, StatusFilter::Unset));
        assert!(screen.lessons.is_none());
    }

    #[test]
    fn test_good_reload_clears_load_error() {
        let mut screen = loaded(vec![], 0);
        screen.load();
        screen.handle(ApiOutcome::Courses(Err(ApiError::Network("refused".into()))));
        assert_eq!(screen.notice.as_ref().unwrap().text, LOAD_FAILED);

        screen.load();
        screen.handle(ApiOutcome::Courses(Ok(Page {
            data: vec![course("a", CourseStatus::Draft)],
            total: 1,
        })));
        assert!(screen.notice.is_none());
        assert_eq!(screen.courses.len(), 1);
    }

    #[test]
    fn test_import_notice_survives_reload() {
        let mut screen = loaded(vec![], 0);
        screen.handle(ApiOutcome::Imported(Ok(())));
        screen.handle(ApiOutcome::Courses(Ok(Page::default())));
        assert_eq!(screen.notice.as_ref().unwrap().text, IMPORTED);
    }

    #[test]
    fn test_selection_clamped_after_reload() {
        let mut screen = loaded(
            vec![course("a", CourseStatus::Draft), course("b", CourseStatus::Draft)],
            2,
        );
        screen.select_next();
        assert_eq!(screen.selected, 1);
        screen.handle(ApiOutcome::Courses(Ok(Page {
            data: vec![course("a", CourseStatus::Draft)],
            total: 1,
        })));
        assert_eq!(screen.selected, 0);
    }
}
