//! Field validation for the auth forms.

use rifa_api::Registration;

/// Minimum accepted password length
pub const PASSWORD_MIN_LEN: usize = 8;

/// Loose email shape check: something@something.something
///
/// The backend owns real validation; this only catches obvious typos before
/// a request leaves the client.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || trimmed.contains(' ') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// Phone check: digits only, 7-15 of them
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    (7..=15).contains(&trimmed.len()) && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// Per-field problems with a registration form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistrationErrors {
    /// Problem with the email field
    pub email: Option<&'static str>,
    /// Problem with the name field
    pub name: Option<&'static str>,
    /// Problem with the phone field
    pub phone: Option<&'static str>,
    /// Problem with the password field
    pub password: Option<&'static str>,
}

impl RegistrationErrors {
    /// Whether every field passed
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.phone.is_none()
            && self.password.is_none()
    }
}

/// Validate a registration form field by field
#[must_use]
pub fn validate_registration(registration: &Registration) -> RegistrationErrors {
    RegistrationErrors {
        email: (!is_valid_email(&registration.email)).then_some("Correo inválido"),
        name: registration
            .name
            .trim()
            .is_empty()
            .then_some("El nombre es obligatorio"),
        phone: (!is_valid_phone(&registration.phone)).then_some("Teléfono inválido"),
        password: (registration.password.len() < PASSWORD_MIN_LEN)
            .then_some("La contraseña debe tener al menos 8 caracteres"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> Registration {
        Registration {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            phone: "04141112233".to_string(),
            password: "secret-password".to_string(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b@sub.example.co"));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana @example.com"));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("04141112233"));
        assert!(is_valid_phone("1234567"));
        assert!(!is_valid_phone("123456"));
        assert!(!is_valid_phone("0414-111-2233"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn clean_registration_passes() {
        assert!(validate_registration(&registration()).is_clean());
    }

    #[test]
    fn each_field_is_reported_separately() {
        let mut r = registration();
        r.email = "nope".to_string();
        r.password = "short".to_string();

        let errors = validate_registration(&r);
        assert!(errors.email.is_some());
        assert!(errors.password.is_some());
        assert!(errors.name.is_none());
        assert!(errors.phone.is_none());
        assert!(!errors.is_clean());
    }
}
