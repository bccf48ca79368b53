//! Login screen

use crate::constants::{DEMO_EMAIL, DEMO_PASSWORD};
use crate::error::{ApiError, ErrorKind};
use crate::messages::{ApiCall, ScreenId};
use crate::models::Credentials;
use crate::screens::TextInput;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_RESPONSE: &str = "Invalid server response";
pub(crate) const NETWORK_ERROR: &str = "Network or server error";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthField {
    #[default]
    Email,
    Password,
}

/// Email/password pair shared by the login and register screens
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CredentialsForm {
    pub email: TextInput,
    pub password: TextInput,
    pub focus: AuthField,
}

impl CredentialsForm {
    pub fn new(email: &str, password: &str) -> Self {
        CredentialsForm {
            email: TextInput::new(email),
            password: TextInput::new(password),
            focus: AuthField::Email,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextInput {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Email,
        };
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
        self.focus = AuthField::Email;
    }
}

#[derive(Clone, Debug)]
pub struct LoginScreen {
    pub id: ScreenId,
    pub form: CredentialsForm,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoginScreen {
    pub fn new(id: ScreenId) -> Self {
        LoginScreen {
            id,
            form: CredentialsForm::new(DEMO_EMAIL, DEMO_PASSWORD),
            loading: false,
            error: None,
        }
    }

    pub fn submit(&mut self) -> Option<ApiCall> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(ApiCall::Login(self.form.credentials()))
    }

    /// Returns the token to start a session with, if login succeeded
    pub fn handle_login(&mut self, result: Result<String, ApiError>) -> Option<String> {
        self.loading = false;
        match result {
            Ok(token) => Some(token),
            Err(e) => {
                self.error = Some(login_message(&e).to_string());
                None
            }
        }
    }
}

fn login_message(e: &ApiError) -> &'static str {
    match e {
        ApiError::Rejected { .. } => INVALID_CREDENTIALS,
        ApiError::InvalidResponse(_) => INVALID_RESPONSE,
        _ if e.kind() == ErrorKind::Validation => INVALID_RESPONSE,
        _ => NETWORK_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_demo_credentials() {
        let mut screen = LoginScreen::new(ScreenId(1));
        let call = screen.submit().unwrap();
        assert_eq!(
            call,
            ApiCall::Login(Credentials {
                email: "admin@test.com".into(),
                password: "123456".into(),
            })
        );
        assert!(screen.loading);
    }

    #[test]
    fn test_submit_ignored_while_loading() {
        let mut screen = LoginScreen::new(ScreenId(1));
        assert!(screen.submit().is_some());
        assert!(screen.submit().is_none());
    }

    #[test]
    fn test_error_messages() {
        let mut screen = LoginScreen::new(ScreenId(1));

        screen.submit();
        assert_eq!(screen.handle_login(Err(ApiError::Rejected { status: 400 })), None);
        assert_eq!(screen.error.as_deref(), Some(INVALID_CREDENTIALS));
        assert!(!screen.loading);

        screen.submit();
        assert!(screen.error.is_none());
        screen.handle_login(Err(ApiError::InvalidResponse("missing token".into())));
        assert_eq!(screen.error.as_deref(), Some(INVALID_RESPONSE));

        screen.submit();
        screen.handle_login(Err(ApiError::Network("refused".into())));
        assert_eq!(screen.error.as_deref(), Some(NETWORK_ERROR));
    }

    #[test]
    fn test_success_yields_token() {
        let mut screen = LoginScreen::new(ScreenId(1));
        screen.submit();
        assert_eq!(screen.handle_login(Ok("abc".into())), Some("abc".to_string()));
        assert!(screen.error.is_none());
    }

    #[test]
    fn test_field_editing() {
        let mut form = CredentialsForm::new("", "");
        form.focused_mut().insert('a');
        form.next_field();
        form.focused_mut().insert('b');
        assert_eq!(form.credentials(), Credentials { email: "a".into(), password: "b".into() });
        form.clear();
        assert!(form.email.is_empty() && form.password.is_empty());
    }
}
