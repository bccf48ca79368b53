//! HTTP client wrapper - the single place that attaches credentials and
//! decides when a session is dead

use std::path::Path;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;

use crate::config::Config;
use crate::error::ApiError;
use crate::messages::{ApiCall, ApiOutcome};
use crate::models::{
    extract_token, Course, Credentials, Lesson, NewCourse, NewLesson, Page, ReorderDirection,
    ReorderRequest, StatusFilter,
};
use crate::session::Session;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Per-call additions to the default request
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// Applied after the defaults, so they win on conflict
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn json<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(RequestOptions {
            body: Some(bytes),
            ..Default::default()
        })
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Client for the courses platform API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &Config, session: Session) -> Self {
        ApiClient::with_client(create_client(config), config.api_url.clone(), session)
    }

    pub fn with_client(http: reqwest::Client, base_url: Url, session: Session) -> Self {
        ApiClient {
            http,
            base_url,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with the given path segments appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// JSON content type plus the bearer token when a session exists
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(value) = self.bearer_value() {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    fn bearer_value(&self) -> Option<HeaderValue> {
        let token = self.session.token()?;
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Stored token is not a valid header value; sending without it");
                None
            }
        }
    }

    /// Issue an authenticated request. A 401 tears the session down and is
    /// reported as `ApiError::Unauthorized`; every other status is returned
    /// to the caller untouched.
    pub async fn request(
        &self,
        method: Method,
        segments: &[&str],
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(segments)?;

        let mut headers = self.default_headers();
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut builder = self.http.request(method.clone(), url).headers(headers);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.session.expire();
            return Err(ApiError::Unauthorized);
        }

        Ok(response)
    }

    async fn send_intent(
        &self,
        method: Method,
        segments: &[&str],
        options: RequestOptions,
    ) -> Result<(), ApiError> {
        let response = self.request(method, segments, options).await?;
        ensure_success(response).map(|_| ())
    }

    // ========================
    // Auth (public endpoints)
    // ========================

    /// Credentials travel as query parameters on a body-less POST
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = self.endpoint(&["api", "auth", "login"])?;
        let response = self
            .http
            .post(url)
            .query(&[
                ("email", credentials.email.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;
        let response = ensure_success(response)?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        extract_token(&body).ok_or_else(|| ApiError::InvalidResponse("missing token".to_string()))
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "register"])?;
        let response = self.http.post(url).json(credentials).send().await?;
        ensure_success(response).map(|_| ())
    }

    // ========================
    // Courses
    // ========================

    pub async fn search_courses(
        &self,
        page: u32,
        page_size: u32,
        filter: StatusFilter,
    ) -> Result<Page<Course>, ApiError> {
        let mut options = RequestOptions::default()
            .query("page", page)
            .query("pageSize", page_size);
        if let Some(code) = filter.query_value() {
            options = options.query("status", code);
        }

        let response = self
            .request(Method::GET, &["api", "courses", "search"], options)
            .await?;
        let response = ensure_success(response)?;
        Ok(response.json::<Page<Course>>().await?)
    }

    pub async fn create_course(&self, title: &str) -> Result<(), ApiError> {
        let options = RequestOptions::json(&NewCourse { title })?;
        self.send_intent(Method::POST, &["api", "courses"], options)
            .await
    }

    pub async fn delete_course(&self, id: &str) -> Result<(), ApiError> {
        self.send_intent(Method::DELETE, &["api", "courses", id], RequestOptions::default())
            .await
    }

    pub async fn publish_course(&self, id: &str) -> Result<(), ApiError> {
        self.send_intent(
            Method::PATCH,
            &["api", "courses", id, "publish"],
            RequestOptions::default(),
        )
        .await
    }

    pub async fn unpublish_course(&self, id: &str) -> Result<(), ApiError> {
        self.send_intent(
            Method::PATCH,
            &["api", "courses", id, "unpublish"],
            RequestOptions::default(),
        )
        .await
    }

    /// Multipart upload of a spreadsheet. Goes around `request`: only the
    /// bearer header is attached and a 401 is an ordinary rejection.
    pub async fn import_courses(&self, path: &Path) -> Result<(), ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import.xlsx".to_string());

        let part = Part::bytes(bytes).file_name(file_name).mime_str(XLSX_MIME)?;
        let form = Form::new().part("file", part);

        let url = self.endpoint(&["api", "courses", "import"])?;
        let mut builder = self.http.post(url).multipart(form);
        if let Some(value) = self.bearer_value() {
            builder = builder.header(AUTHORIZATION, value);
        }

        let response = builder.send().await?;
        ensure_success(response).map(|_| ())
    }

    // ========================
    // Lessons
    // ========================

    pub async fn list_lessons(&self, course_id: &str) -> Result<Vec<Lesson>, ApiError> {
        let response = self
            .request(
                Method::GET,
                &["api", "courses", course_id, "lessons"],
                RequestOptions::default(),
            )
            .await?;
        let response = ensure_success(response)?;
        let lessons: Option<Vec<Lesson>> = response.json().await?;
        Ok(lessons.unwrap_or_default())
    }

    pub async fn create_lesson(&self, title: &str, course_id: &str) -> Result<(), ApiError> {
        let options = RequestOptions::json(&NewLesson { title, course_id })?;
        self.send_intent(Method::POST, &["api", "lessons"], options)
            .await
    }

    pub async fn delete_lesson(&self, id: &str) -> Result<(), ApiError> {
        self.send_intent(Method::DELETE, &["api", "lessons", id], RequestOptions::default())
            .await
    }

    pub async fn reorder_lesson(&self, id: &str, direction: ReorderDirection) -> Result<(), ApiError> {
        let options = RequestOptions::json(&ReorderRequest { direction })?;
        self.send_intent(Method::PATCH, &["api", "lessons", id, "reorder"], options)
            .await
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Rejected {
            status: status.as_u16(),
        })
    }
}

/// Run one call and wrap its result in the matching outcome
pub async fn execute_call(client: &ApiClient, call: ApiCall) -> ApiOutcome {
    match call {
        ApiCall::Login(credentials) => ApiOutcome::Login(client.login(&credentials).await),
        ApiCall::Register(credentials) => {
            ApiOutcome::Register(client.register(&credentials).await)
        }
        ApiCall::SearchCourses {
            page,
            page_size,
            filter,
        } => ApiOutcome::Courses(client.search_courses(page, page_size, filter).await),
        ApiCall::CreateCourse { title } => {
            ApiOutcome::CourseCreated(client.create_course(&title).await)
        }
        ApiCall::DeleteCourse { id } => ApiOutcome::CourseDeleted(client.delete_course(&id).await),
        ApiCall::PublishCourse { id } => {
            ApiOutcome::CoursePublished(client.publish_course(&id).await)
        }
        ApiCall::UnpublishCourse { id } => {
            ApiOutcome::CourseUnpublished(client.unpublish_course(&id).await)
        }
        ApiCall::ImportCourses { path } => ApiOutcome::Imported(client.import_courses(&path).await),
        ApiCall::ListLessons { course_id } => {
            ApiOutcome::Lessons(client.list_lessons(&course_id).await)
        }
        ApiCall::CreateLesson { title, course_id } => {
            ApiOutcome::LessonCreated(client.create_lesson(&title, &course_id).await)
        }
        ApiCall::DeleteLesson { id } => ApiOutcome::LessonDeleted(client.delete_lesson(&id).await),
        ApiCall::ReorderLesson { id, direction } => {
            ApiOutcome::LessonReordered(client.reorder_lesson(&id, direction).await)
        }
    }
}

/// Create an HTTP client; requests only time out when configured to
pub fn create_client(config: &Config) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default HTTP client");
        reqwest::Client::new()
    })
}
