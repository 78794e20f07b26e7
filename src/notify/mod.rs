// src/notify/mod.rs

pub mod contact;
pub mod email;

pub use contact::{ContactProvisioner, ParentContact, ScriptContactProvisioner};

use tracing::info;

use crate::error::NotifyError;
use crate::graph::{AccessToken, GraphApi, SendMail};
use crate::schema::StudentRecord;

/// Registers each parent as a contact and mails them the student's credentials.
pub struct ParentNotifier<'a> {
    api: &'a dyn GraphApi,
    contacts: &'a dyn ContactProvisioner,
    /// Mailbox the message is posted from.
    mailbox: String,
    /// Address shown in `from`.
    sender: String,
}

impl<'a> ParentNotifier<'a> {
    pub fn new(
        api: &'a dyn GraphApi,
        contacts: &'a dyn ContactProvisioner,
        mailbox: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            api,
            contacts,
            mailbox: mailbox.into(),
            sender: sender.into(),
        }
    }

    /// Handle parent slots in order, contact then email for each.
    ///
    /// Stops at the first failure; contacts already created stay in place.
    /// Returns how many parents were notified.
    pub async fn notify(
        &self,
        token: &AccessToken,
        record: &StudentRecord,
        upn: &str,
        password: &str,
    ) -> Result<usize, NotifyError> {
        let mut notified = 0;
        for parent in record.present_parents() {
            let contact = ParentContact {
                name: parent.name.clone(),
                email: parent.email.clone(),
                class: record.class.clone(),
            };
            self.contacts
                .create_contact(&contact)
                .await
                .map_err(|source| NotifyError::ContactFailed {
                    email: parent.email.clone(),
                    source,
                })?;

            let mail = SendMail::html(
                &self.sender,
                &parent.email,
                email::SUBJECT,
                email::render_credentials(upn, password),
            );
            self.api
                .send_mail(token, &self.mailbox, &mail)
                .await
                .map_err(|source| NotifyError::EmailFailed {
                    email: parent.email.clone(),
                    source,
                })?;

            info!(upn, parent = %parent.email, "credentials sent");
            notified += 1;
        }
        Ok(notified)
    }
}
