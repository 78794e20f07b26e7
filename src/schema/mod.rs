// src/schema/mod.rs

pub mod row;
pub mod student;

pub use row::{FieldMapping, Row};
pub use student::{ParentRecord, StudentRecord};

use crate::error::RowError;

/// One column of the onboarding form export, in export order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    StartTime,
    CompletionTime,
    Email,
    Name,
    Language,
    FirstName,
    LastName,
    PreferredName,
    StartDate,
    AccountType,
    JobRole,
    HighestTeachingGrade,
    PrivateEmail,
    EmploymentType,
    Class,
    Parent1FirstName,
    Parent1LastName,
    Parent1Email,
    Parent1Phone,
    AddAnotherParent,
    Parent2FirstName,
    Parent2LastName,
    Parent2Email,
    Parent2Phone,
    WifiRequired,
}

/// The header schema. Positions match the table columns.
pub const SCHEMA: [Field; 26] = [
    Field::Id,
    Field::StartTime,
    Field::CompletionTime,
    Field::Email,
    Field::Name,
    Field::Language,
    Field::FirstName,
    Field::LastName,
    Field::PreferredName,
    Field::StartDate,
    Field::AccountType,
    Field::JobRole,
    Field::HighestTeachingGrade,
    Field::PrivateEmail,
    Field::EmploymentType,
    Field::Class,
    Field::Parent1FirstName,
    Field::Parent1LastName,
    Field::Parent1Email,
    Field::Parent1Phone,
    Field::AddAnotherParent,
    Field::Parent2FirstName,
    Field::Parent2LastName,
    Field::Parent2Email,
    Field::Parent2Phone,
    Field::WifiRequired,
];

/// Fields that must be non-blank for a row to be processed.
pub const MANDATORY: [Field; 2] = [Field::FirstName, Field::LastName];

impl Field {
    /// Column header exactly as the form export writes it, artifacts included.
    pub fn header(&self) -> &'static str {
        match self {
            Field::Id => "Id",
            Field::StartTime => "Start time",
            Field::CompletionTime => "Completion time",
            Field::Email => "Email",
            Field::Name => "Name",
            Field::Language => "Language",
            Field::FirstName => "First Name as appears in government-issued ID",
            Field::LastName => "Last Name as appears in government-issued ID",
            Field::PreferredName => "\"Preferred Name\n\"",
            Field::StartDate => "Start Date",
            Field::AccountType => "Account Type",
            Field::JobRole => "Job Role",
            Field::HighestTeachingGrade => "Highest Teaching Grade",
            Field::PrivateEmail => {
                "Private E-mail Address (will only be used to deliver the temporary access information)"
            }
            Field::EmploymentType => "Employment Type",
            Field::Class => "Class",
            Field::Parent1FirstName => {
                "Parent or Legal Guardian #1 FIRST name (or preferred first name)"
            }
            Field::Parent1LastName => "Parent or Legal Guardian #1 LAST name",
            Field::Parent1Email => "Parent or Legal Guardian #1 - E-mail Address",
            Field::Parent1Phone => "Parent or Legal Guardian #1 - Phone Number",
            Field::AddAnotherParent => "Add another Parent or Legal Guardian?",
            Field::Parent2FirstName => "Parent or Legal Guardian #2 FIRST name (or preferred name)",
            Field::Parent2LastName => "Parent or Legal Guardian #2 LAST name",
            Field::Parent2Email => "Parent or Legal Guardian #2 - E-mail Address",
            Field::Parent2Phone => "Parent or Legal Guardian #2 - Phone Number",
            Field::WifiRequired => "Wi-Fi Account Required?",
        }
    }

    /// Column position in the schema.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Reverse lookup by exact header text.
    pub fn from_header(header: &str) -> Option<Self> {
        SCHEMA.iter().copied().find(|f| f.header() == header)
    }
}

/// Rejects the mapping on the first mandatory field that is blank after trimming.
pub fn validate(mapping: &FieldMapping) -> Result<(), RowError> {
    for field in MANDATORY {
        if mapping.get(field).trim().is_empty() {
            return Err(RowError::MissingField(field));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_order_matches_index() {
        for (i, field) in SCHEMA.iter().enumerate() {
            assert_eq!(field.index(), i, "{:?}", field);
        }
    }

    #[test]
    fn test_headers_are_verbatim() {
        assert_eq!(Field::PreferredName.header(), "\"Preferred Name\n\"");
        assert_eq!(
            Field::from_header("\"Preferred Name\n\""),
            Some(Field::PreferredName)
        );
        assert_eq!(Field::from_header("Preferred Name"), None);
        assert_eq!(Field::from_header("Class"), Some(Field::Class));
    }

    #[test]
    fn test_validate_rejects_blank_mandatory_field() {
        let mut cells = vec![String::new(); SCHEMA.len()];
        cells[Field::FirstName.index()] = "Maria".into();
        cells[Field::LastName.index()] = "   ".into();
        let mapping = FieldMapping::from_row(&Row::new(cells));

        assert_eq!(
            validate(&mapping),
            Err(RowError::MissingField(Field::LastName))
        );
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mapping = FieldMapping::from_row(&Row::new(Vec::new()));
        assert_eq!(
            validate(&mapping),
            Err(RowError::MissingField(Field::FirstName))
        );
    }

    #[test]
    fn test_validate_accepts_populated_row() {
        let mut cells = vec![String::new(); SCHEMA.len()];
        cells[Field::FirstName.index()] = "Maria".into();
        cells[Field::LastName.index()] = "Rossi".into();
        assert!(validate(&FieldMapping::from_row(&Row::new(cells))).is_ok());
    }
}
