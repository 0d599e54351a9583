//! Member Entity

use chrono::{DateTime, Utc};
use derive_more::Display;

use crate::domain::value_object::{Code, MemberId, text};
use crate::error::{CmsError, CmsResult};

pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum MemberStatus {
    #[default]
    #[display("ACTIVE")]
    Active,
    #[display("INACTIVE")]
    Inactive,
    #[display("CANCELLED")]
    Cancelled,
}

impl MemberStatus {
    /// Case-insensitive
    pub fn parse(raw: &str) -> CmsResult<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(MemberStatus::Active),
            "INACTIVE" => Ok(MemberStatus::Inactive),
            "CANCELLED" => Ok(MemberStatus::Cancelled),
            _ => Err(CmsError::invalid(
                "Status must be ACTIVE, INACTIVE or CANCELLED",
            )),
        }
    }

    pub fn from_db(code: &str) -> CmsResult<Self> {
        Self::parse(code).map_err(|_| CmsError::Internal(format!("Invalid member status: {code}")))
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub plan: Code,
    pub status: MemberStatus,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub plan: String,
    pub status: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub plan: Option<String>,
    pub status: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub plan: Option<Code>,
    pub status: Option<MemberStatus>,
    /// Matches name or email
    pub search: Option<String>,
}

impl Member {
    pub fn create(draft: MemberDraft) -> CmsResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: MemberId::new(),
            name: text::required("Name", &draft.name, NAME_MAX_LENGTH)?,
            email: text::email("Email", &draft.email)?,
            plan: Code::new("Plan", &draft.plan)?,
            status: draft
                .status
                .as_deref()
                .map(MemberStatus::parse)
                .transpose()?
                .unwrap_or_default(),
            expires_at: draft.expires_at,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, patch: MemberPatch) -> CmsResult<()> {
        if let Some(name) = patch.name {
            self.name = text::required("Name", &name, NAME_MAX_LENGTH)?;
        }
        if let Some(email) = patch.email {
            self.email = text::email("Email", &email)?;
        }
        if let Some(plan) = patch.plan {
            self.plan = Code::new("Plan", &plan)?;
        }
        if let Some(status) = patch.status {
            self.status = MemberStatus::parse(&status)?;
        }
        if let Some(expires_at) = patch.expires_at {
            self.expires_at = Some(expires_at);
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(MemberStatus::Active.to_string(), "ACTIVE");
        assert_eq!(MemberStatus::parse("cancelled").unwrap(), MemberStatus::Cancelled);
        assert!(MemberStatus::parse("paused").is_err());
    }

    #[test]
    fn test_create_normalises() {
        let member = Member::create(MemberDraft {
            name: "Jane".into(),
            email: "Jane@Example.com".into(),
            plan: "premium".into(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(member.email, "jane@example.com");
        assert_eq!(member.plan.as_str(), "PREMIUM");
        assert_eq!(member.status, MemberStatus::Active);
    }

    #[test]
    fn test_patch_status() {
        let mut member = Member::create(MemberDraft {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            plan: "basic".into(),
            ..Default::default()
        })
        .unwrap();

        member
            .apply(MemberPatch {
                status: Some("inactive".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(member.status, MemberStatus::Inactive);
        assert_eq!(member.plan.as_str(), "BASIC");
    }
}
