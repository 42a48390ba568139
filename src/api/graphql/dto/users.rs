/*
 * Responsibility
 * - User / Address の GraphQL 型 (output / input)
 * - validate() で形式チェック (違反はまとめて返す)
 * - password hash は output に出さない
 */
use async_graphql::{ID, InputObject, SimpleObject};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::repos::{AddressRecord, NewAddress, NewUser, UserRecord};

pub const PASSWORD_MIN_LENGTH: usize = 7;

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct UserType {
    /// User id
    pub id: ID,
    /// User name
    pub name: String,
    /// User e-mail
    pub email: String,
    /// User birth date (ISO 8601, UTC)
    pub birth_date: String,
    pub created_at: String,
    pub updated_at: String,
    /// User addresses
    pub addresses: Vec<AddressType>,
}

impl From<UserRecord> for UserType {
    fn from(u: UserRecord) -> Self {
        Self {
            id: ID(u.id.to_string()),
            name: u.name,
            email: u.email,
            birth_date: iso_timestamp(u.birth_date),
            created_at: iso_timestamp(u.created_at),
            updated_at: iso_timestamp(u.updated_at),
            addresses: u.addresses.into_iter().map(AddressType::from).collect(),
        }
    }
}

// 1990-05-04T00:00:00.000Z
fn iso_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Address")]
pub struct AddressType {
    pub id: ID,
    /// Address label/name
    pub label: Option<String>,
    /// Postal code
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl From<AddressRecord> for AddressType {
    fn from(a: AddressRecord) -> Self {
        Self {
            id: ID(a.id.to_string()),
            label: a.label,
            cep: a.cep,
            street: a.street,
            street_number: a.street_number,
            complement: a.complement,
            neighborhood: a.neighborhood,
            city: a.city,
            state: a.state,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub birth_date: DateTime<Utc>,
    #[graphql(default)]
    pub addresses: Vec<AddressInput>,
}

impl UserInput {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push("name is required".to_string());
        }
        if !is_valid_email(&self.email) {
            violations.push("email must be a valid e-mail address".to_string());
        }
        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            violations.push(format!(
                "password must have at least {PASSWORD_MIN_LENGTH} characters"
            ));
        }
        let has_letter = self.password.chars().any(char::is_alphabetic);
        let has_digit = self.password.chars().any(|c| c.is_ascii_digit());
        if !(has_letter && has_digit) {
            violations
                .push("password must contain at least one letter and one number".to_string());
        }
        for (i, address) in self.addresses.iter().enumerate() {
            violations.extend(
                address
                    .validate()
                    .into_iter()
                    .map(|v| format!("addresses[{i}]: {v}")),
            );
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password_hash,
            birth_date: self.birth_date,
            addresses: self.addresses.into_iter().map(NewAddress::from).collect(),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct AddressInput {
    pub label: Option<String>,
    pub cep: String,
    pub street: String,
    pub street_number: i32,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl AddressInput {
    fn validate(&self) -> Vec<String> {
        let required = [
            ("cep", &self.cep),
            ("street", &self.street),
            ("neighborhood", &self.neighborhood),
            ("city", &self.city),
            ("state", &self.state),
        ];

        let mut violations: Vec<String> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| format!("{name} is required"))
            .collect();
        if self.street_number < 0 {
            violations.push("streetNumber must not be negative".to_string());
        }
        violations
    }
}

impl From<AddressInput> for NewAddress {
    fn from(a: AddressInput) -> Self {
        Self {
            label: a.label,
            cep: a.cep,
            street: a.street,
            street_number: a.street_number,
            complement: a.complement,
            neighborhood: a.neighborhood,
            city: a.city,
            state: a.state,
        }
    }
}

// local@domain.tld, no whitespace, exactly one '@'
fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn input(email: &str, password: &str) -> UserInput {
        UserInput {
            name: "Anakin Skywalker".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            birth_date: Utc::now(),
            addresses: Vec::new(),
        }
    }

    #[test]
    fn output_timestamps_use_utc_z_form() {
        let at = Utc.with_ymd_and_hms(1990, 5, 4, 0, 0, 0).unwrap();
        assert_eq!(iso_timestamp(at), "1990-05-04T00:00:00.000Z");

        let later = at + chrono::TimeDelta::milliseconds(1250);
        assert_eq!(iso_timestamp(later), "1990-05-04T00:00:01.250Z");
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("padmeia@yahoo.com"));
        assert!(is_valid_email("pão.de.mel@yahoo.com"));
        assert!(!is_valid_email("wrong email"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a@localhost"));
        assert!(!is_valid_email("a@domain..com"));
        assert!(!is_valid_email("@yahoo.com"));
    }

    #[test]
    fn valid_input_passes() {
        assert!(input("vader.darth@yahoo.com", "é8Ç7qwa2").validate().is_ok());
    }

    #[test]
    fn short_letter_only_password_reports_both_rules() {
        let violations = input("vader.darth@yahoo.com", "aaa").validate().unwrap_err();
        assert_eq!(
            violations,
            vec![
                "password must have at least 7 characters",
                "password must contain at least one letter and one number",
            ]
        );
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // 6 chars, 9 bytes
        let violations = input("vader.darth@yahoo.com", "éÇé1a2").validate().unwrap_err();
        assert_eq!(violations, vec!["password must have at least 7 characters"]);
    }

    #[test]
    fn blank_address_fields_are_reported_with_index() {
        let mut data = input("vader.darth@yahoo.com", "padead123");
        data.addresses.push(AddressInput {
            label: None,
            cep: "01001-000".to_string(),
            street: " ".to_string(),
            street_number: 4,
            complement: None,
            neighborhood: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        });

        assert_eq!(
            data.validate().unwrap_err(),
            vec!["addresses[0]: street is required"]
        );
    }
}
