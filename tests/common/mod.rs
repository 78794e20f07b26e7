#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use student_onboarding::{
    graph::{NewUser, SendMail},
    schema::{Field, Row, SCHEMA},
    AccessToken, ApiError, AuthError, ContactError, ContactProvisioner, FetchError, GraphApi,
    ParentContact, PipelineSettings,
};

pub const DOMAIN: &str = "ldv-muenchen.de";
pub const MAILBOX: &str = "svc@ldv-muenchen.de";
pub const SENDER: &str = "it-admin@ldv-muenchen.de";

pub fn settings() -> PipelineSettings {
    PipelineSettings {
        domain: DOMAIN.to_string(),
        mailbox: MAILBOX.to_string(),
        sender: SENDER.to_string(),
    }
}

/// Every collaborator call, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Authenticate,
    FetchRows,
    CreateUser { upn: String, password: String },
    CreateContact(ParentContact),
    SendMail { mailbox: String, to: String, content: String },
}

pub type Journal = Arc<Mutex<Vec<Call>>>;

pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(journal: &Journal) -> Vec<Call> {
    journal.lock().unwrap().clone()
}

/// Count calls that reach the identity API or the notifier.
pub fn side_effects(journal: &Journal) -> usize {
    calls(journal)
        .iter()
        .filter(|c| {
            matches!(
                c,
                Call::CreateUser { .. } | Call::CreateContact(_) | Call::SendMail { .. }
            )
        })
        .count()
}

pub struct FakeGraph {
    pub journal: Journal,
    pub rows: Vec<Row>,
    pub fail_auth: bool,
    pub fail_create: HashSet<String>,
    pub fail_mail: HashSet<String>,
}

impl FakeGraph {
    pub fn new(journal: &Journal, rows: Vec<Row>) -> Self {
        Self {
            journal: journal.clone(),
            rows,
            fail_auth: false,
            fail_create: HashSet::new(),
            fail_mail: HashSet::new(),
        }
    }

    fn push(&self, call: Call) {
        self.journal.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GraphApi for FakeGraph {
    async fn authenticate(&self) -> Result<AccessToken, AuthError> {
        self.push(Call::Authenticate);
        if self.fail_auth {
            return Err(AuthError::MissingSecret);
        }
        Ok(AccessToken::new("token"))
    }

    async fn fetch_rows(&self, token: &AccessToken) -> Result<Vec<Row>, FetchError> {
        assert_eq!(token.secret(), "token");
        self.push(Call::FetchRows);
        if self.rows.is_empty() {
            return Err(FetchError::EmptyResult);
        }
        Ok(self.rows.clone())
    }

    async fn create_user(&self, _token: &AccessToken, user: &NewUser) -> Result<(), ApiError> {
        self.push(Call::CreateUser {
            upn: user.user_principal_name.clone(),
            password: user.password_profile.password.clone(),
        });
        if self.fail_create.contains(&user.user_principal_name) {
            return Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                body: r#"{"error":{"code":"Request_BadRequest"}}"#.to_string(),
            });
        }
        Ok(())
    }

    async fn send_mail(
        &self,
        _token: &AccessToken,
        mailbox: &str,
        mail: &SendMail,
    ) -> Result<(), ApiError> {
        let to = mail.recipient().unwrap_or_default().to_string();
        self.push(Call::SendMail {
            mailbox: mailbox.to_string(),
            to: to.clone(),
            content: mail.message.body.content.clone(),
        });
        if self.fail_mail.contains(&to) {
            return Err(ApiError::Status {
                status: StatusCode::FORBIDDEN,
                body: "ErrorAccessDenied".to_string(),
            });
        }
        Ok(())
    }
}

pub struct FakeContacts {
    pub journal: Journal,
    pub fail: HashSet<String>,
}

impl FakeContacts {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: HashSet::new(),
        }
    }
}

#[async_trait]
impl ContactProvisioner for FakeContacts {
    async fn create_contact(&self, contact: &ParentContact) -> Result<(), ContactError> {
        self.journal
            .lock()
            .unwrap()
            .push(Call::CreateContact(contact.clone()));
        if self.fail.contains(&contact.email) {
            return Err(ContactError::Failed {
                status: "exit status: 1".to_string(),
                output: "New-MailContact failed".to_string(),
            });
        }
        Ok(())
    }
}

/// Builds a form row cell by cell.
pub struct RowBuilder {
    cells: Vec<String>,
}

impl RowBuilder {
    pub fn student(first: &str, last: &str) -> Self {
        Self {
            cells: vec![String::new(); SCHEMA.len()],
        }
        .set(Field::FirstName, first)
        .set(Field::LastName, last)
        .set(Field::AccountType, "Student")
        .set(Field::Class, "5A")
    }

    pub fn set(mut self, field: Field, value: &str) -> Self {
        self.cells[field.index()] = value.to_string();
        self
    }

    pub fn parent1(self, first: &str, last: &str, email: &str) -> Self {
        self.set(Field::Parent1FirstName, first)
            .set(Field::Parent1LastName, last)
            .set(Field::Parent1Email, email)
    }

    pub fn parent2(self, first: &str, last: &str, email: &str) -> Self {
        self.set(Field::Parent2FirstName, first)
            .set(Field::Parent2LastName, last)
            .set(Field::Parent2Email, email)
    }

    pub fn build(self) -> Row {
        Row::new(self.cells)
    }
}
