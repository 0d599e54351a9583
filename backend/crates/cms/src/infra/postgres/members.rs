//! Members

use kernel::pagination::{Page, PageRequest};
use sqlx::{Postgres, QueryBuilder};

use super::rows::MemberRow;
use super::{PgCmsRepository, as_total, like_pattern, push_page};
use crate::domain::entity::member::{Member, MemberFilter};
use crate::domain::repository::MemberRepository;
use crate::domain::value_object::MemberId;
use crate::error::CmsResult;

const MEMBER_SELECT: &str = r#"
    SELECT
        member_id,
        name,
        email,
        plan,
        status,
        expires_at,
        created_at,
        updated_at
    FROM members
"#;

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &MemberFilter) {
    qb.push(" WHERE TRUE");

    if let Some(plan) = &filter.plan {
        qb.push(" AND plan = ").push_bind(plan.as_str().to_string());
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status.to_string());
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl MemberRepository for PgCmsRepository {
    async fn list_members(&self, filter: &MemberFilter, page: PageRequest) -> CmsResult<Page<Member>> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM members");
        push_filter(&mut count, filter);
        let total = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut qb = QueryBuilder::<Postgres>::new(MEMBER_SELECT);
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC");
        push_page(&mut qb, page);

        let items = qb
            .build_query_as::<MemberRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(MemberRow::into_member)
            .collect::<CmsResult<Vec<_>>>()?;

        Ok(Page {
            items,
            total: as_total(total),
        })
    }

    async fn find_member(&self, id: &MemberId) -> CmsResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(&format!("{MEMBER_SELECT} WHERE member_id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(MemberRow::into_member).transpose()
    }

    async fn insert_member(&self, member: &Member) -> CmsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO members (
                member_id,
                name,
                email,
                plan,
                status,
                expires_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.plan.as_str())
        .bind(member.status.to_string())
        .bind(member.expires_at)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_member(&self, member: &Member) -> CmsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE members SET
                name = $2,
                email = $3,
                plan = $4,
                status = $5,
                expires_at = $6,
                updated_at = $7
            WHERE member_id = $1
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.plan.as_str())
        .bind(member.status.to_string())
        .bind(member.expires_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn delete_member(&self, id: &MemberId) -> CmsResult<bool> {
        let deleted = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}
