//! PostgreSQL Repository Implementation
//!
//! One repository type backs every content trait. Statements are split by
//! content area; row structs and their conversions live in `rows`.

mod catalog;
mod contacts;
mod members;
mod posts;
mod rows;
mod stats;
mod taxonomy;

use sqlx::{PgPool, Postgres, QueryBuilder};

/// PostgreSQL-backed content repository
#[derive(Clone)]
pub struct PgCmsRepository {
    pool: PgPool,
}

impl PgCmsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// `%term%` for ILIKE with the wildcard characters of `term` escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.trim().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Append `LIMIT .. OFFSET ..` for a page request
fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: kernel::pagination::PageRequest) {
    qb.push(" LIMIT ")
        .push_bind(i64::from(page.limit()))
        .push(" OFFSET ")
        .push_bind(offset_bind(page));
}

/// Offset as the BIGINT Postgres binds, saturating at `i64::MAX`
fn offset_bind(page: kernel::pagination::PageRequest) -> i64 {
    i64::try_from(page.offset()).unwrap_or(i64::MAX)
}

/// Counts come back as `i64`; pagination wants `u64`
fn as_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("seo"), "%seo%");
        assert_eq!(like_pattern(" 100% _real_ "), "%100\\% \\_real\\_%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_page_clause() {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT 1");
        push_page(&mut qb, kernel::pagination::PageRequest::new(Some(2), Some(20)));
        assert_eq!(qb.sql(), "SELECT 1 LIMIT $1 OFFSET $2");
    }

    #[test]
    fn test_offset_bind() {
        use kernel::pagination::PageRequest;

        assert_eq!(offset_bind(PageRequest::new(Some(3), Some(20))), 40);
        let last = PageRequest::new(Some(u32::MAX), Some(100));
        assert_eq!(offset_bind(last), (i64::from(u32::MAX) - 1) * 100);
    }
}
