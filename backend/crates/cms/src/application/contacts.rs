//! Contact Service

use std::sync::Arc;

use crate::domain::entity::contact::{Contact, ContactDraft};
use crate::domain::repository::ContactRepository;
use crate::domain::value_object::ContactMessageId;
use crate::error::{CmsError, CmsResult};

pub struct ContactService<R>
where
    R: ContactRepository,
{
    repo: Arc<R>,
}

impl<R> ContactService<R>
where
    R: ContactRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn submit(&self, draft: ContactDraft) -> CmsResult<Contact> {
        let contact = Contact::create(draft)?;
        self.repo.insert_contact(&contact).await?;

        // Address and body stay out of the logs
        tracing::info!(contact_id = %contact.id, "Contact message received");
        Ok(contact)
    }

    pub async fn list(&self, unread_only: bool) -> CmsResult<Vec<Contact>> {
        self.repo.list_contacts(unread_only).await
    }

    /// Marking an already read message again is fine
    pub async fn mark_read(&self, id: &ContactMessageId) -> CmsResult<()> {
        if !self.repo.mark_contact_read(id).await? {
            return Err(CmsError::NotFound("Contact message not found"));
        }
        Ok(())
    }
}
