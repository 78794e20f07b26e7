use super::{validate, Field, FieldMapping};
use crate::error::RowError;

/// A parent or legal guardian slot from the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ParentRecord {
    fn from_fields(mapping: &FieldMapping, first: Field, last: Field, email: Field, phone: Field) -> Self {
        let name = format!("{} {}", mapping.get(first), mapping.get(last));
        Self {
            name: name.trim().to_string(),
            email: mapping.get(email).trim().to_string(),
            phone: mapping.get(phone).trim().to_string(),
        }
    }

    /// A slot is present iff it carries an email address.
    pub fn is_present(&self) -> bool {
        !self.email.is_empty()
    }
}

/// A validated onboarding row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub account_type: String,
    pub class: String,
    pub wifi_required: String,
    pub parents: [ParentRecord; 2],
}

impl StudentRecord {
    /// Validate the mandatory fields, then pull out the fields provisioning needs.
    pub fn decode(mapping: &FieldMapping) -> Result<Self, RowError> {
        validate(mapping)?;
        Ok(Self {
            first_name: mapping.get(Field::FirstName).to_string(),
            last_name: mapping.get(Field::LastName).to_string(),
            preferred_name: mapping.get(Field::PreferredName).to_string(),
            account_type: mapping.get(Field::AccountType).to_string(),
            class: mapping.get(Field::Class).to_string(),
            wifi_required: mapping.get(Field::WifiRequired).to_string(),
            parents: [
                ParentRecord::from_fields(
                    mapping,
                    Field::Parent1FirstName,
                    Field::Parent1LastName,
                    Field::Parent1Email,
                    Field::Parent1Phone,
                ),
                ParentRecord::from_fields(
                    mapping,
                    Field::Parent2FirstName,
                    Field::Parent2LastName,
                    Field::Parent2Email,
                    Field::Parent2Phone,
                ),
            ],
        })
    }

    /// `first.last`, lowercased.
    pub fn username(&self) -> String {
        format!("{}.{}", self.first_name, self.last_name).to_lowercase()
    }

    pub fn user_principal_name(&self, domain: &str) -> String {
        format!("{}@{}", self.username(), domain)
    }

    /// Preferred name when given, otherwise `first last`.
    pub fn display_name(&self) -> String {
        if self.preferred_name.is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            self.preferred_name.clone()
        }
    }

    /// Parent slots that carry an email, in slot order.
    pub fn present_parents(&self) -> impl Iterator<Item = &ParentRecord> {
        self.parents.iter().filter(|p| p.is_present())
    }
}
