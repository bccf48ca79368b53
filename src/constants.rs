//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// API host used when neither the environment nor the config file names one
pub const DEFAULT_API_URL: &str = "https://coursesplatform-backend.onrender.com";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "COURSEDESK_API_URL";

/// Directory (under the home directory) holding config and the token file
pub const CONFIG_DIR_NAME: &str = ".coursedesk";

/// Name of the file the session token is persisted in
pub const TOKEN_FILE_NAME: &str = "token";

/// Name of the optional YAML config file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Default log file, written in the working directory
pub const DEFAULT_LOG_FILE: &str = "coursedesk.log";

/// Courses shown per page
pub const PAGE_SIZE: u32 = 10;

/// How long a success flash stays on screen
pub const FLASH_DURATION: Duration = Duration::from_secs(2);

/// Interval at which the app expires flash messages
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Credentials the login form starts with
pub const DEMO_EMAIL: &str = "admin@test.com";
pub const DEMO_PASSWORD: &str = "123456";

/// Application name
pub const APP_NAME: &str = "CoursesPlatform";
