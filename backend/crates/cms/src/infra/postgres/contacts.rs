//! Contact messages

use super::PgCmsRepository;
use super::rows::ContactRow;
use crate::domain::entity::contact::Contact;
use crate::domain::repository::ContactRepository;
use crate::domain::value_object::ContactMessageId;
use crate::error::CmsResult;

const CONTACT_SELECT: &str = r#"
    SELECT contact_id, name, email, subject, message, read, created_at
    FROM contacts
"#;

impl PgCmsRepository {
    /// Newest unread messages, at most `limit`
    pub(super) async fn recent_unread_contacts(&self, limit: i64) -> CmsResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            "{CONTACT_SELECT} WHERE NOT read ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ContactRow::into_contact).collect())
    }
}

impl ContactRepository for PgCmsRepository {
    async fn insert_contact(&self, contact: &Contact) -> CmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO contacts (contact_id, name, email, subject, message, read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(contact.id.as_uuid())
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(contact.read)
        .bind(contact.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_contacts(&self, unread_only: bool) -> CmsResult<Vec<Contact>> {
        let rows = sqlx::query_as::<_, ContactRow>(&format!(
            "{CONTACT_SELECT} WHERE (NOT $1 OR NOT read) ORDER BY created_at DESC"
        ))
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ContactRow::into_contact).collect())
    }

    async fn mark_contact_read(&self, id: &ContactMessageId) -> CmsResult<bool> {
        let updated = sqlx::query("UPDATE contacts SET read = TRUE WHERE contact_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }
}
