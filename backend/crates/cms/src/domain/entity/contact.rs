//! Contact Message Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{ContactMessageId, text};
use crate::error::{CmsError, CmsResult};

pub const NAME_MAX_LENGTH: usize = 100;
pub const SUBJECT_MAX_LENGTH: usize = 200;
pub const MESSAGE_MAX_LENGTH: usize = 10_000;

/// A message left through the public contact form
#[derive(Debug, Clone)]
pub struct Contact {
    pub id: ContactMessageId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl Contact {
    pub fn create(draft: ContactDraft) -> CmsResult<Self> {
        let (Some(name), Some(email), Some(subject), Some(message)) =
            (draft.name, draft.email, draft.subject, draft.message)
        else {
            return Err(CmsError::invalid("All fields are required"));
        };
        if [&name, &email, &subject, &message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(CmsError::invalid("All fields are required"));
        }

        Ok(Self {
            id: ContactMessageId::new(),
            name: text::required("Name", &name, NAME_MAX_LENGTH)?,
            email: text::email("Email", &email)?,
            subject: text::required("Subject", &subject, SUBJECT_MAX_LENGTH)?,
            message: text::required("Message", &message, MESSAGE_MAX_LENGTH)?,
            read: false,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ContactDraft {
        ContactDraft {
            name: Some("Jane".into()),
            email: Some("jane@example.com".into()),
            subject: Some("Hello".into()),
            message: Some("I'd like a quote".into()),
        }
    }

    #[test]
    fn test_create_unread() {
        let contact = Contact::create(draft()).unwrap();
        assert!(!contact.read);
    }

    #[test]
    fn test_all_fields_required() {
        for broken in [
            ContactDraft { name: None, ..draft() },
            ContactDraft { email: Some(" ".into()), ..draft() },
            ContactDraft { message: None, ..draft() },
        ] {
            let err = Contact::create(broken).unwrap_err();
            assert_eq!(err.to_string(), "All fields are required");
        }
    }
}
