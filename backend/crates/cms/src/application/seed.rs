//! Default taxonomy written at startup

use crate::domain::entity::{
    category::{Category, CategoryDraft},
    tag::{Tag, TagDraft},
};
use crate::domain::repository::{CategoryRepository, TagRepository};
use crate::error::CmsResult;

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    (
        "Digital Marketing",
        "Articles about digital marketing strategies and trends",
    ),
    ("SEO", "Search Engine Optimization tips and techniques"),
    (
        "AI & Technology",
        "Artificial Intelligence and technology insights",
    ),
    (
        "Content Marketing",
        "Content creation and marketing strategies",
    ),
];

const DEFAULT_TAGS: &[&str] = &["SEO", "Content", "AI", "Marketing", "Strategy", "Analytics"];

/// Insert the default categories and tags whose slugs are not taken yet.
/// Returns how many rows were written; running it twice writes nothing.
pub async fn seed_defaults<R>(repo: &R) -> CmsResult<usize>
where
    R: CategoryRepository + TagRepository,
{
    let mut written = 0;

    for (name, description) in DEFAULT_CATEGORIES {
        let category = Category::create(CategoryDraft {
            name: (*name).to_string(),
            description: Some((*description).to_string()),
            ..Default::default()
        })?;
        if repo.insert_category_if_absent(&category).await? {
            written += 1;
        }
    }

    for name in DEFAULT_TAGS {
        let tag = Tag::create(TagDraft {
            name: (*name).to_string(),
            ..Default::default()
        })?;
        if repo.insert_tag_if_absent(&tag).await? {
            written += 1;
        }
    }

    tracing::info!(rows_written = written, "Default categories and tags seeded");
    Ok(written)
}
