//! Member Service

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::member::{Member, MemberDraft, MemberFilter, MemberPatch};
use crate::domain::repository::MemberRepository;
use crate::domain::value_object::MemberId;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Member not found";

pub struct MemberService<R>
where
    R: MemberRepository,
{
    repo: Arc<R>,
}

impl<R> MemberService<R>
where
    R: MemberRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, filter: MemberFilter, page: PageRequest) -> CmsResult<Page<Member>> {
        self.repo.list_members(&filter, page).await
    }

    pub async fn get(&self, id: &MemberId) -> CmsResult<Member> {
        self.repo
            .find_member(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, draft: MemberDraft) -> CmsResult<Member> {
        let member = Member::create(draft)?;
        self.repo.insert_member(&member).await?;

        tracing::info!(member_id = %member.id, plan = %member.plan, "Member created");
        Ok(member)
    }

    pub async fn update(&self, id: &MemberId, patch: MemberPatch) -> CmsResult<Member> {
        let mut member = self.get(id).await?;
        member.apply(patch)?;

        if !self.repo.update_member(&member).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        Ok(member)
    }

    pub async fn delete(&self, id: &MemberId) -> CmsResult<()> {
        if !self.repo.delete_member(id).await? {
            return Err(CmsError::NotFound(NOT_FOUND));
        }
        tracing::info!(member_id = %id, "Member deleted");
        Ok(())
    }
}
