use serde::{Deserialize, Deserializer, Serialize};

/// Course lifecycle flag, numeric on the wire
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum CourseStatus {
    Draft,
    Published,
}

impl CourseStatus {
    pub fn code(&self) -> u8 {
        match self {
            CourseStatus::Draft => 0,
            CourseStatus::Published => 1,
        }
    }

    /// Anything other than 0 reads as published
    pub fn from_code(code: i64) -> Self {
        if code == 0 {
            CourseStatus::Draft
        } else {
            CourseStatus::Published
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "Draft",
            CourseStatus::Published => "Published",
        }
    }
}

impl From<CourseStatus> for u8 {
    fn from(status: CourseStatus) -> u8 {
        status.code()
    }
}

impl<'de> Deserialize<'de> for CourseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(CourseStatus::from_code(n)),
            Raw::Float(f) => Ok(CourseStatus::from_code(f as i64)),
            Raw::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(CourseStatus::from_code)
                .map_err(|_| serde::de::Error::custom(format!("non-numeric course status {:?}", s))),
        }
    }
}

/// Ids are opaque strings; numeric ids are accepted and stringified
fn id_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// A missing or null flag reads as false
fn bool_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub title: String,
    pub status: CourseStatus,
    #[serde(default, deserialize_with = "bool_or_null")]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Course {
    /// Creation date for display, `YYYY-MM-DD` when the timestamp parses
    pub fn created_on(&self) -> String {
        let Some(raw) = self.created_at.as_deref() else {
            return String::new();
        };
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
            return dt.format("%Y-%m-%d").to_string();
        }
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format("%Y-%m-%d").to_string();
        }
        raw.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    pub title: String,
    pub order: u32,
}

/// Paginated list envelope
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page {
            data: Vec::new(),
            total: 0,
        }
    }
}

/// Course list filter; `Unset` sends no status at all
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Unset,
    Draft,
    Published,
}

impl StatusFilter {
    pub fn query_value(&self) -> Option<u8> {
        match self {
            StatusFilter::Unset => None,
            StatusFilter::Draft => Some(CourseStatus::Draft.code()),
            StatusFilter::Published => Some(CourseStatus::Published.code()),
        }
    }

    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::Unset => StatusFilter::Draft,
            StatusFilter::Draft => StatusFilter::Published,
            StatusFilter::Published => StatusFilter::Unset,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Unset => "All",
            StatusFilter::Draft => "Draft",
            StatusFilter::Published => "Published",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderDirection {
    Up,
    Down,
}

impl ReorderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReorderDirection::Up => "up",
            ReorderDirection::Down => "down",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewCourse<'a> {
    pub title: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson<'a> {
    pub title: &'a str,
    pub course_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ReorderRequest {
    pub direction: ReorderDirection,
}

/// Pull a non-empty string `token` out of a login response body
pub fn extract_token(body: &serde_json::Value) -> Option<String> {
    body.get("token")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_coerced_from_number_and_string() {
        let page: Page<Course> = serde_json::from_value(json!({
            "data": [
                {"id": "a", "title": "Rust", "status": 1, "isDeleted": false,
                 "createdAt": "2024-03-01T10:00:00Z", "updatedAt": "2024-03-01T10:00:00Z"},
                {"id": 7, "title": "Go", "status": "0", "isDeleted": false,
                 "createdAt": "2024-03-02T08:30:00.123", "updatedAt": null}
            ],
            "total": 2
        }))
        .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.data[0].status, CourseStatus::Published);
        assert_eq!(page.data[1].status, CourseStatus::Draft);
        assert_eq!(page.data[1].id, "7");
        assert_eq!(page.data[0].created_on(), "2024-03-01");
        assert_eq!(page.data[1].created_on(), "2024-03-02");
    }

    #[test]
    fn test_null_deleted_flag_reads_false() {
        let page: Page<Course> = serde_json::from_value(json!({
            "data": [
                { "id": "a", "title": "Rust", "status": 0, "isDeleted": null },
                { "id": "b", "title": "Go", "status": 1 },
                { "id": "c", "title": "Zig", "status": 1, "isDeleted": true }
            ],
            "total": 3
        }))
        .unwrap();
        let flags: Vec<bool> = page.data.iter().map(|c| c.is_deleted).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_non_numeric_status_rejected() {
        let result: Result<Course, _> = serde_json::from_value(json!({
            "id": "a", "title": "Rust", "status": "live"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_cycle_and_query() {
        assert_eq!(StatusFilter::default(), StatusFilter::Unset);
        assert_eq!(StatusFilter::Unset.query_value(), None);
        assert_eq!(StatusFilter::Draft.query_value(), Some(0));
        assert_eq!(StatusFilter::Published.query_value(), Some(1));
        assert_eq!(StatusFilter::Published.next(), StatusFilter::Unset);
    }

    #[test]
    fn test_wire_bodies() {
        let lesson = serde_json::to_value(NewLesson { title: "Intro", course_id: "c1" }).unwrap();
        assert_eq!(lesson, json!({"title": "Intro", "courseId": "c1"}));

        let reorder = serde_json::to_value(ReorderRequest { direction: ReorderDirection::Down }).unwrap();
        assert_eq!(reorder, json!({"direction": "down"}));
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token(&json!({"token": "abc"})), Some("abc".to_string()));
        assert_eq!(extract_token(&json!({"token": ""})), None);
        assert_eq!(extract_token(&json!({"jwt": "abc"})), None);
        assert_eq!(extract_token(&json!(null)), None);
    }
}
