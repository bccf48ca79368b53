//! Registration screen. A successful registration does not log in.

use crate::error::{ApiError, ErrorKind};
use crate::messages::{ApiCall, ScreenId};
use crate::screens::login::{CredentialsForm, NETWORK_ERROR};

const REGISTRATION_FAILED: &str = "Registration failed. Try another email.";
const REGISTRATION_OK: &str = "Registration successful! You can now log in.";

#[derive(Clone, Debug)]
pub struct RegisterScreen {
    pub id: ScreenId,
    pub form: CredentialsForm,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl RegisterScreen {
    pub fn new(id: ScreenId) -> Self {
        RegisterScreen {
            id,
            form: CredentialsForm::default(),
            loading: false,
            error: None,
            success: None,
        }
    }

    pub fn submit(&mut self) -> Option<ApiCall> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.success = None;
        self.loading = true;
        Some(ApiCall::Register(self.form.credentials()))
    }

    pub fn handle_register(&mut self, result: Result<(), ApiError>) {
        self.loading = false;
        match result {
            Ok(()) => {
                self.form.clear();
                self.success = Some(REGISTRATION_OK.to_string());
            }
            Err(e) if e.kind() == ErrorKind::Validation => {
                self.error = Some(REGISTRATION_FAILED.to_string());
            }
            Err(_) => {
                self.error = Some(NETWORK_ERROR.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credentials;

    fn filled() -> RegisterScreen {
        let mut screen = RegisterScreen::new(ScreenId(2));
        screen.form.email.set("new@test.com");
        screen.form.password.set("secret");
        screen
    }

    #[test]
    fn test_submit_sends_credentials() {
        let mut screen = filled();
        assert_eq!(
            screen.submit(),
            Some(ApiCall::Register(Credentials {
                email: "new@test.com".into(),
                password: "secret".into(),
            }))
        );
    }

    #[test]
    fn test_success_clears_fields() {
        let mut screen = filled();
        screen.submit();
        screen.handle_register(Ok(()));
        assert!(screen.form.email.is_empty());
        assert!(screen.form.password.is_empty());
        assert_eq!(screen.success.as_deref(), Some(REGISTRATION_OK));
        assert!(screen.error.is_none());
    }

    #[test]
    fn test_rejection_keeps_fields() {
        let mut screen = filled();
        screen.submit();
        screen.handle_register(Err(ApiError::Rejected { status: 409 }));
        assert_eq!(screen.form.email.value(), "new@test.com");
        assert_eq!(screen.error.as_deref(), Some(REGISTRATION_FAILED));
        assert!(screen.success.is_none());
        assert!(!screen.loading);
    }

    #[test]
    fn test_network_failure() {
        let mut screen = filled();
        screen.submit();
        screen.handle_register(Err(ApiError::Network("refused".into())));
        assert_eq!(screen.error.as_deref(), Some(NETWORK_ERROR));
    }
}
