//! Login and registration form validation.

use crate::models::auth::{ LoginRequest, RegisterRequest };
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

pub const MIN_PASSWORD_LEN: usize = 8;

/// A local part, then a domain of at least two non-empty labels.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";

static EMAIL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(EMAIL_PATTERN).ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Nome",
            Field::Email => "Email",
            Field::Password => "Senha",
            Field::ConfirmPassword => "Confirmar senha",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self { field, message: message.to_string() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, Vec<FieldError>> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(Field::Name, "Nome é obrigatório"));
        }
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        if self.confirm_password.is_empty() {
            errors.push(
                FieldError::new(Field::ConfirmPassword, "Confirmação de senha é obrigatória")
            );
        } else if self.confirm_password != self.password {
            errors.push(FieldError::new(Field::ConfirmPassword, "As senhas não coincidem"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    let email = email.trim();
    if email.is_empty() {
        errors.push(FieldError::new(Field::Email, "Email é obrigatório"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new(Field::Email, "Email inválido"));
    }
}

fn check_password(password: &str, errors: &mut Vec<FieldError>) {
    if password.is_empty() {
        errors.push(FieldError::new(Field::Password, "Senha é obrigatória"));
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(
            FieldError::new(Field::Password, "A senha deve ter pelo menos 8 caracteres")
        );
    }
}

fn is_valid_email(email: &str) -> bool {
    match &*EMAIL {
        Some(pattern) => pattern.is_match(email),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(errors: &[FieldError]) -> Vec<(Field, &str)> {
        errors
            .iter()
            .map(|e| (e.field, e.message.as_str()))
            .collect()
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![(Field::Email, "Email é obrigatório"), (Field::Password, "Senha é obrigatória")]
        );
    }

    #[test]
    fn login_checks_email_shape_and_password_length() {
        let form = LoginForm { email: "ana@localhost".into(), password: "short".into() };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![
                (Field::Email, "Email inválido"),
                (Field::Password, "A senha deve ter pelo menos 8 caracteres")
            ]
        );
    }

    #[test]
    fn valid_login_trims_email() {
        let form = LoginForm { email: "  ana@example.com ".into(), password: "12345678".into() };
        let req = form.validate().unwrap();
        assert_eq!(req.email, "ana@example.com");
        assert_eq!(req.password, "12345678");
    }

    #[test]
    fn register_reports_mismatch_and_missing_name() {
        let form = RegisterForm {
            name: " ".into(),
            email: "ana@example.com".into(),
            password: "12345678".into(),
            confirm_password: "12345679".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            messages(&errors),
            vec![(Field::Name, "Nome é obrigatório"), (Field::ConfirmPassword, "As senhas não coincidem")]
        );
    }

    #[test]
    fn register_requires_confirmation() {
        let form = RegisterForm {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "12345678".into(),
            confirm_password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors[0].to_string(), "Confirmar senha: Confirmação de senha é obrigatória");
    }

    #[test]
    fn email_shapes() {
        assert!(EMAIL.is_some());
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("ana.souza+docs@mail.example.com.br"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
        assert!(!is_valid_email("a@b..co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b.co."));
    }
}
