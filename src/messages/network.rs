//! Network messages - communication between App and Network layers

use std::path::PathBuf;

use crate::error::ApiError;
use crate::models::{Course, Credentials, Lesson, Page, ReorderDirection, StatusFilter};

/// Identifies the screen instance that issued a call, so late answers for a
/// screen that is gone can be dropped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenId(pub u64);

/// One API intent
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login(Credentials),
    Register(Credentials),
    SearchCourses {
        page: u32,
        page_size: u32,
        filter: StatusFilter,
    },
    CreateCourse {
        title: String,
    },
    DeleteCourse {
        id: String,
    },
    PublishCourse {
        id: String,
    },
    UnpublishCourse {
        id: String,
    },
    ImportCourses {
        path: PathBuf,
    },
    ListLessons {
        course_id: String,
    },
    CreateLesson {
        title: String,
        course_id: String,
    },
    DeleteLesson {
        id: String,
    },
    ReorderLesson {
        id: String,
        direction: ReorderDirection,
    },
}

impl ApiCall {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::Login(_) => "login",
            ApiCall::Register(_) => "register",
            ApiCall::SearchCourses { .. } => "search_courses",
            ApiCall::CreateCourse { .. } => "create_course",
            ApiCall::DeleteCourse { .. } => "delete_course",
            ApiCall::PublishCourse { .. } => "publish_course",
            ApiCall::UnpublishCourse { .. } => "unpublish_course",
            ApiCall::ImportCourses { .. } => "import_courses",
            ApiCall::ListLessons { .. } => "list_lessons",
            ApiCall::CreateLesson { .. } => "create_lesson",
            ApiCall::DeleteLesson { .. } => "delete_lesson",
            ApiCall::ReorderLesson { .. } => "reorder_lesson",
        }
    }
}

/// Result of an `ApiCall`, one variant per call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Login(Result<String, ApiError>),
    Register(Result<(), ApiError>),
    Courses(Result<Page<Course>, ApiError>),
    CourseCreated(Result<(), ApiError>),
    CourseDeleted(Result<(), ApiError>),
    CoursePublished(Result<(), ApiError>),
    CourseUnpublished(Result<(), ApiError>),
    Imported(Result<(), ApiError>),
    Lessons(Result<Vec<Lesson>, ApiError>),
    LessonCreated(Result<(), ApiError>),
    LessonDeleted(Result<(), ApiError>),
    LessonReordered(Result<(), ApiError>),
}

impl ApiOutcome {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ApiOutcome::Login(r) => r.as_ref().err(),
            ApiOutcome::Courses(r) => r.as_ref().err(),
            ApiOutcome::Lessons(r) => r.as_ref().err(),
            ApiOutcome::Register(r)
            | ApiOutcome::CourseCreated(r)
            | ApiOutcome::CourseDeleted(r)
            | ApiOutcome::CoursePublished(r)
            | ApiOutcome::CourseUnpublished(r)
            | ApiOutcome::Imported(r)
            | ApiOutcome::LessonCreated(r)
            | ApiOutcome::LessonDeleted(r)
            | ApiOutcome::LessonReordered(r) => r.as_ref().err(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.error().is_some_and(ApiError::is_unauthorized)
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    Execute { screen: ScreenId, call: ApiCall },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    pub screen: ScreenId,
    pub outcome: ApiOutcome,
}
