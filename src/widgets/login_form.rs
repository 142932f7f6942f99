//! Email/password form state shared by the login and sign-up screens

use super::traits::{FieldNavigable, TextEditable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    SignIn,
    SignUp,
}

impl LoginMode {
    pub fn title(&self) -> &'static str {
        match self {
            LoginMode::SignIn => "Log in",
            LoginMode::SignUp => "Create an account",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub mode: LoginMode,
    pub email: String,
    pub password: String,
    focused: usize,
    /// A request is in flight; input is ignored until it returns
    pub pending: bool,
    pub error: Option<String>,
}

const FIELD_COUNT: usize = 3; // email, password, google button

impl LoginForm {
    pub fn new(mode: LoginMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            focused: 0,
            pending: false,
            error: None,
        }
    }

    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    /// Whether the "continue with Google" button has focus
    pub fn federated_focused(&self) -> bool {
        self.focused == 2
    }

    /// Credentials ready to send, or a reason they are not
    pub fn credentials(&self) -> Result<(String, String), &'static str> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Enter your email");
        }
        if self.password.is_empty() {
            return Err("Enter your password");
        }
        Ok((email.to_string(), self.password.clone()))
    }

    /// Reset after a request returns
    pub fn finish(&mut self, error: Option<String>) {
        self.pending = false;
        if error.is_some() {
            self.password.clear();
        }
        self.error = error;
    }
}

impl FieldNavigable for LoginForm {
    fn next_field(&mut self) {
        self.focused = (self.focused + 1) % FIELD_COUNT;
    }

    fn previous_field(&mut self) {
        self.focused = (self.focused + FIELD_COUNT - 1) % FIELD_COUNT;
    }

    fn field_count(&self) -> usize {
        FIELD_COUNT
    }

    fn current_field(&self) -> usize {
        self.focused
    }
}

impl TextEditable for LoginForm {
    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            0 => Some(&mut self.email),
            1 => Some(&mut self.password),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_cycle_and_typing() {
        let mut form = LoginForm::new(LoginMode::SignIn);
        form.paste("kid@example.com");
        form.next_field();
        form.push_char('s');
        form.push_char('e');
        form.pop_char();
        assert_eq!(form.email, "kid@example.com");
        assert_eq!(form.password, "s");
        assert_eq!(form.masked_password(), "•");

        form.next_field();
        assert!(form.federated_focused());
        form.push_char('x'); // button has no text
        assert_eq!(form.password, "s");

        form.next_field();
        assert_eq!(form.current_field(), 0);
        form.previous_field();
        assert_eq!(form.current_field(), 2);
    }

    #[test]
    fn test_credentials_and_finish() {
        let mut form = LoginForm::new(LoginMode::SignUp);
        assert_eq!(form.credentials(), Err("Enter your email"));
        form.email = "  a@b.co ".to_string();
        assert_eq!(form.credentials(), Err("Enter your password"));
        form.password = "secret1".to_string();
        assert_eq!(
            form.credentials(),
            Ok(("a@b.co".to_string(), "secret1".to_string()))
        );

        form.pending = true;
        form.finish(Some("Wrong password".to_string()));
        assert!(!form.pending);
        assert!(form.password.is_empty());
        assert_eq!(form.error.as_deref(), Some("Wrong password"));
    }
}
