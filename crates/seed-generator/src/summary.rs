//! Human-readable summary of a seed run.

use seed_core::SeedDataset;
use serde::Serialize;
use std::fmt;

/// Entity counts produced by a seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub accounts: usize,
    pub admins: usize,
    pub moderators: usize,
    pub articles: usize,
    pub boards: usize,
    pub threads: usize,
    pub posts: usize,
    pub identities: usize,
}

impl SeedSummary {
    pub fn new(dataset: &SeedDataset, admins: usize, moderators: usize) -> Self {
        Self {
            accounts: dataset.accounts.len(),
            admins,
            moderators,
            articles: dataset.articles.len(),
            boards: dataset.boards.len(),
            threads: dataset.threads.len(),
            posts: dataset.posts.len(),
            identities: dataset.identities.len(),
        }
    }

    /// Accounts that are neither admins nor moderators.
    pub fn users(&self) -> usize {
        self.accounts.saturating_sub(self.admins + self.moderators)
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results")?;
        writeln!(f, "=======")?;
        writeln!(f, "  - {} Accounts", self.accounts)?;
        writeln!(f, "    - {} Admins", self.admins)?;
        writeln!(f, "    - {} Moderators", self.moderators)?;
        writeln!(f, "    - {} Users", self.users())?;
        writeln!(f, "  - {} Articles", self.articles)?;
        writeln!(f, "  - {} Boards", self.boards)?;
        writeln!(f, "    - {} Threads", self.threads)?;
        writeln!(f, "    - {} Posts", self.posts)?;
        write!(f, "    - {} Identities", self.identities)
    }
}
