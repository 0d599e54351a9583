//! Aggregate read models for the dashboard and the blog stats page

use crate::domain::entity::{category::Category, contact::Contact, post::PostView};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostCounts {
    pub total: i64,
    pub published: i64,
}

impl PostCounts {
    pub fn draft(&self) -> i64 {
        self.total - self.published
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberCounts {
    pub total: i64,
    pub active: i64,
}

impl MemberCounts {
    /// Everything not `ACTIVE`, cancelled members included
    pub fn inactive(&self) -> i64 {
        self.total - self.active
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub posts: PostCounts,
    pub members: MemberCounts,
    /// Published videos
    pub videos: i64,
    /// Active products
    pub products: i64,
    /// Five newest unread contact messages
    pub recent_contacts: Vec<Contact>,
    /// Five newest posts, drafts included
    pub recent_posts: Vec<PostView>,
    /// Five most viewed published posts
    pub popular_posts: Vec<PostView>,
}

#[derive(Debug, Clone)]
pub struct BlogStats {
    pub posts: PostCounts,
    pub total_views: i64,
    pub recent_posts: Vec<PostView>,
    pub popular_posts: Vec<PostView>,
    pub categories: Vec<Category>,
}

impl BlogStats {
    /// Rounded mean views per post, 0 without posts
    pub fn average_views(&self) -> i64 {
        if self.posts.total == 0 {
            return 0;
        }
        (self.total_views as f64 / self.posts.total as f64).round() as i64
    }

    /// Rounded percentage of posts that are published
    pub fn publish_rate(&self) -> i64 {
        if self.posts.total == 0 {
            return 0;
        }
        (self.posts.published as f64 * 100.0 / self.posts.total as f64).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: i64, published: i64, views: i64) -> BlogStats {
        BlogStats {
            posts: PostCounts { total, published },
            total_views: views,
            recent_posts: Vec::new(),
            popular_posts: Vec::new(),
            categories: Vec::new(),
        }
    }

    #[test]
    fn test_derived_metrics() {
        let s = stats(3, 2, 10);
        assert_eq!(s.posts.draft(), 1);
        assert_eq!(s.average_views(), 3);
        assert_eq!(s.publish_rate(), 67);
    }

    #[test]
    fn test_empty_blog() {
        let s = stats(0, 0, 0);
        assert_eq!(s.average_views(), 0);
        assert_eq!(s.publish_rate(), 0);
    }

    #[test]
    fn test_member_counts() {
        let counts = MemberCounts { total: 10, active: 7 };
        assert_eq!(counts.inactive(), 3);
    }
}
