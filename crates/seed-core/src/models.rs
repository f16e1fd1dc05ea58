//! Entities produced by a seed run.
//!
//! Entities reference each other by [`EntityId`] rather than by pointer; the
//! generator owns every collection for the duration of a run and hands the
//! finished [`SeedDataset`] to a storage backend.

use crate::enums::{
    AccountRole, AccountStatus, ArticleStatus, IdentityStatus, IdentityStyle, ThreadRole,
    ThreadStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary key type shared by every entity (PostgreSQL `INTEGER`).
pub type EntityId = i32;

/// Monotonic id allocator, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    next: EntityId,
}

impl Sequence {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id, or `None` once the id space is exhausted.
    pub fn next_id(&mut self) -> Option<EntityId> {
        let id = self.next;
        self.next = id.checked_add(1)?;
        Some(id)
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> usize {
        (self.next - 1) as usize
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub role: AccountRole,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A top-level topic category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: EntityId,
    pub title: String,
    /// Short code used in URLs (e.g. "tech")
    pub short: String,
    pub description: String,
    /// Running post counter; the last post number handed out on this board.
    pub post_count: i32,
    /// Threads owned by this board, in creation order.
    pub threads: Vec<EntityId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Post counter value for a board with no posts yet.
    pub const INITIAL_POST_COUNT: i32 = 1;

    /// Advance the post counter and return the new post number.
    ///
    /// Post numbers are unique within a board and strictly increasing;
    /// `None` means the counter would overflow.
    pub fn next_post_number(&mut self) -> Option<i32> {
        self.post_count = self.post_count.checked_add(1)?;
        Some(self.post_count)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: EntityId,
    pub board_id: EntityId,
    pub status: ThreadStatus,
    pub title: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub id: EntityId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: EntityId,
    pub title: String,
    pub slug: String,
    pub status: ArticleStatus,
    /// Admin or super account that wrote the article
    pub author_id: EntityId,
    /// 1:1 reference to the article's content row
    pub content_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pseudonymous alias of one account inside exactly one thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    pub account_id: EntityId,
    pub thread_id: EntityId,
    pub role: ThreadRole,
    pub style: IdentityStyle,
    pub status: IdentityStatus,
    /// Display name shown in place of the username
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    pub id: EntityId,
    pub content: String,
}

/// A post references its identity, never the account behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: EntityId,
    pub post_number: i32,
    pub board_id: EntityId,
    pub thread_id: EntityId,
    pub identity_id: EntityId,
    pub content_id: EntityId,
    pub created_at: DateTime<Utc>,
}

/// Join row linking an identity to a post on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityPost {
    pub identity_id: EntityId,
    pub post_id: EntityId,
    pub board_id: EntityId,
}

/// Complete output of a seed run.
///
/// Field order matches the insertion order required by foreign keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedDataset {
    pub accounts: Vec<Account>,
    pub boards: Vec<Board>,
    pub article_contents: Vec<ArticleContent>,
    pub articles: Vec<Article>,
    pub threads: Vec<Thread>,
    pub post_contents: Vec<PostContent>,
    pub posts: Vec<Post>,
    pub identities: Vec<Identity>,
    pub identity_posts: Vec<IdentityPost>,
}

impl SeedDataset {
    /// Total number of rows across every collection.
    pub fn row_count(&self) -> usize {
        self.accounts.len()
            + self.boards.len()
            + self.article_contents.len()
            + self.articles.len()
            + self.threads.len()
            + self.post_contents.len()
            + self.posts.len()
            + self.identities.len()
            + self.identity_posts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let now = Utc::now();
        Board {
            id: 1,
            title: "general".to_string(),
            short: "gen".to_string(),
            description: "general discussion".to_string(),
            post_count: Board::INITIAL_POST_COUNT,
            threads: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_sequence_starts_at_one() {
        let mut seq = Sequence::new();
        assert_eq!(seq.allocated(), 0);
        assert_eq!(seq.next_id(), Some(1));
        assert_eq!(seq.next_id(), Some(2));
        assert_eq!(seq.allocated(), 2);
    }

    #[test]
    fn test_sequence_exhaustion_is_none() {
        let mut seq = Sequence {
            next: EntityId::MAX - 1,
        };
        assert_eq!(seq.next_id(), Some(EntityId::MAX - 1));
        // The last id cannot be handed out without overflowing the counter
        assert_eq!(seq.next_id(), None);
        assert_eq!(seq.next_id(), None);
    }

    #[test]
    fn test_post_numbers_start_after_initial_count() {
        let mut board = board();
        assert_eq!(board.next_post_number(), Some(2));
        assert_eq!(board.next_post_number(), Some(3));
        assert_eq!(board.post_count, 3);

        board.post_count = i32::MAX;
        assert_eq!(board.next_post_number(), None);
        assert_eq!(board.post_count, i32::MAX);
    }

    #[test]
    fn test_dataset_row_count() {
        let mut dataset = SeedDataset::default();
        assert_eq!(dataset.row_count(), 0);

        dataset.boards.push(board());
        dataset.identity_posts.push(IdentityPost {
            identity_id: 1,
            post_id: 1,
            board_id: 1,
        });
        assert_eq!(dataset.row_count(), 2);
    }
}
