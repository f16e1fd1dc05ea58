//! Phased generation of a complete forum dataset.
//!
//! Phases run strictly in order: accounts, boards, articles, threads, posts.
//! Each phase reads what the earlier ones produced, so starting one early (or
//! twice) is an error rather than a silent no-op.
//!
//! Post distribution is driven by two weight tables. Every board starts with
//! [`INITIAL_BOARD_WEIGHT`] and every thread with [`INITIAL_THREAD_WEIGHT`].
//! Each post picks a board by weight, then a thread of that board by weight,
//! and both lose weight in proportion to how far the current burst has run.
//! Busy threads therefore cool down and quieter ones catch up.

use crate::config::SeederConfig;
use crate::error::GeneratorError;
use crate::ident::{add_domain_suffix, new_article_slug, new_identity_slug, new_thread_slug, new_username};
use crate::identity::IdentityIndex;
use crate::lorem::{Lorem, LoremConfig};
use crate::random::{count_between, random_from_choice, random_from_list, WeightedList};
use crate::resolve::RandomVariant;
use crate::summary::SeedSummary;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_core::{
    Account, AccountRole, AccountStatus, Article, ArticleContent, ArticleStatus, Board, EntityId,
    Identity, IdentityPost, IdentityStatus, IdentityStyle, Post, PostContent, SeedDataset,
    Sequence, Thread, ThreadRole, ThreadStatus,
};
use tracing::{debug, info};

/// Starting selection weight of every board.
pub const INITIAL_BOARD_WEIGHT: u32 = 100_000;

/// Starting selection weight of every thread.
pub const INITIAL_THREAD_WEIGHT: u32 = 10_000;

/// Weights never drop below this, so every thread stays reachable.
const WEIGHT_FLOOR: u32 = 1;

/// Progress of a seed run. Each variant names the last completed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Init,
    Accounts,
    Boards,
    Articles,
    Threads,
    Posts,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Accounts => "accounts",
            Phase::Boards => "boards",
            Phase::Articles => "articles",
            Phase::Threads => "threads",
            Phase::Posts => "posts",
        }
    }

    fn previous(&self) -> Phase {
        match self {
            Phase::Init | Phase::Accounts => Phase::Init,
            Phase::Boards => Phase::Accounts,
            Phase::Articles => Phase::Boards,
            Phase::Threads => Phase::Articles,
            Phase::Posts => Phase::Threads,
        }
    }
}

fn allocate(sequence: &mut Sequence, entity: &'static str) -> Result<EntityId, GeneratorError> {
    sequence.next_id().ok_or(GeneratorError::IdExhausted(entity))
}

#[derive(Debug, Default)]
struct Sequences {
    account: Sequence,
    board: Sequence,
    article: Sequence,
    article_content: Sequence,
    thread: Sequence,
    post: Sequence,
    post_content: Sequence,
    identity: Sequence,
}

/// Generates a [`SeedDataset`] from a [`SeederConfig`].
///
/// All randomness flows from one `StdRng` seeded with `config.seed`, and every
/// timestamp is the seeder's creation time, so two seeders built from the same
/// configuration and timestamp produce identical datasets.
pub struct Seeder {
    config: SeederConfig,
    rng: StdRng,
    now: DateTime<Utc>,
    body: Lorem,
    post_body: Lorem,
    title: Lorem,
    ids: Sequences,
    dataset: SeedDataset,
    admins: Vec<EntityId>,
    moderators: Vec<EntityId>,
    identity_index: IdentityIndex,
    /// Board positions in `dataset.boards`, weighted
    board_weights: WeightedList<usize>,
    /// Per board position: thread positions in `dataset.threads`, weighted
    thread_weights: Vec<WeightedList<usize>>,
    phase: Phase,
}

impl Seeder {
    /// Create a seeder after validating `config`.
    pub fn new(config: SeederConfig) -> Result<Self, GeneratorError> {
        config.validate()?;
        Self::build(config)
    }

    fn build(config: SeederConfig) -> Result<Self, GeneratorError> {
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            rng,
            now: Utc::now(),
            body: Lorem::new(LoremConfig::default())?,
            post_body: Lorem::new(LoremConfig::default().with_max_paragraphs(3))?,
            title: Lorem::new(LoremConfig::title())?,
            ids: Sequences::default(),
            dataset: SeedDataset::default(),
            admins: Vec::new(),
            moderators: Vec::new(),
            identity_index: IdentityIndex::new(),
            board_weights: WeightedList::new(),
            thread_weights: Vec::new(),
            phase: Phase::Init,
        })
    }

    /// Stamp every generated entity with `now` instead of the creation time.
    pub fn with_timestamp(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn config(&self) -> &SeederConfig {
        &self.config
    }

    /// Last completed phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dataset(&self) -> &SeedDataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> SeedDataset {
        self.dataset
    }

    /// Ids of admin and super accounts, in creation order.
    pub fn admins(&self) -> &[EntityId] {
        &self.admins
    }

    /// Ids of moderator accounts, in creation order.
    pub fn moderators(&self) -> &[EntityId] {
        &self.moderators
    }

    pub fn summary(&self) -> SeedSummary {
        SeedSummary::new(&self.dataset, self.admins.len(), self.moderators.len())
    }

    /// Run every phase in order.
    pub fn run(&mut self) -> Result<SeedSummary, GeneratorError> {
        info!("Seeding with seed {}", self.config.seed);

        self.seed_accounts()?;
        self.seed_boards()?;
        self.seed_articles()?;
        self.seed_threads()?;
        self.seed_posts()?;

        let summary = self.summary();
        info!(
            "Generated {} rows ({} accounts, {} threads, {} posts)",
            self.dataset.row_count(),
            summary.accounts,
            summary.threads,
            summary.posts
        );
        Ok(summary)
    }

    fn begin(&self, phase: Phase) -> Result<(), GeneratorError> {
        if self.phase >= phase {
            return Err(GeneratorError::PhaseRepeated(phase.as_str()));
        }
        let required = phase.previous();
        if self.phase != required {
            return Err(GeneratorError::PhaseOrder {
                requested: phase.as_str(),
                required: required.as_str(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Create the fixed seed accounts, then a random number of random ones.
    pub fn seed_accounts(&mut self) -> Result<(), GeneratorError> {
        self.begin(Phase::Accounts)?;

        let fixed = self.config.accounts.clone();
        for seed in fixed {
            let status = random_from_choice(
                &mut self.rng,
                &[AccountStatus::Active, AccountStatus::Inactive],
            )?;
            self.push_account(seed.username, seed.email, seed.role, status)?;
        }

        let count = count_between(
            &mut self.rng,
            self.config.min_account_count,
            self.config.max_account_count,
        );
        for _ in 0..count {
            let role = AccountRole::random(&mut self.rng);
            let status = AccountStatus::random(&mut self.rng);
            let username = new_username(&mut self.rng);
            let email = add_domain_suffix(&mut self.rng, &username);
            self.push_account(username, email, role, status)?;
        }

        info!(
            "Generated {} accounts ({} admins, {} moderators)",
            self.dataset.accounts.len(),
            self.admins.len(),
            self.moderators.len()
        );
        self.phase = Phase::Accounts;
        Ok(())
    }

    fn push_account(
        &mut self,
        username: String,
        email: String,
        role: AccountRole,
        status: AccountStatus,
    ) -> Result<(), GeneratorError> {
        let id = allocate(&mut self.ids.account, "accounts")?;
        match role {
            AccountRole::Admin | AccountRole::Super => self.admins.push(id),
            AccountRole::Moderator => self.moderators.push(id),
            AccountRole::User => {}
        }

        self.dataset.accounts.push(Account {
            id,
            username,
            email,
            role,
            status,
            created_at: self.now,
            updated_at: self.now,
            deleted_at: None,
        });
        Ok(())
    }

    // ========================================================================
    // Boards
    // ========================================================================

    /// Create the fixed boards with equal selection weight.
    pub fn seed_boards(&mut self) -> Result<(), GeneratorError> {
        self.begin(Phase::Boards)?;

        let boards = self.config.boards.clone();
        for seed in boards {
            let position = self.dataset.boards.len();
            let id = allocate(&mut self.ids.board, "boards")?;
            self.dataset.boards.push(Board {
                id,
                title: seed.title,
                short: seed.short,
                description: seed.description,
                post_count: Board::INITIAL_POST_COUNT,
                threads: Vec::new(),
                created_at: self.now,
                updated_at: self.now,
            });
            self.board_weights.push(position, INITIAL_BOARD_WEIGHT);
            self.thread_weights.push(WeightedList::new());
        }

        info!("Generated {} boards", self.dataset.boards.len());
        self.phase = Phase::Boards;
        Ok(())
    }

    // ========================================================================
    // Articles
    // ========================================================================

    /// Create a random number of articles, each written by an admin.
    pub fn seed_articles(&mut self) -> Result<(), GeneratorError> {
        self.begin(Phase::Articles)?;

        let count = count_between(
            &mut self.rng,
            self.config.min_article_count,
            self.config.max_article_count,
        );
        if count > 0 && self.admins.is_empty() {
            return Err(GeneratorError::MissingAdminAuthor { articles: count });
        }

        for _ in 0..count {
            let content_id = allocate(&mut self.ids.article_content, "article contents")?;
            let content = self.body.generate(&mut self.rng);
            self.dataset
                .article_contents
                .push(ArticleContent { id: content_id, content });

            let title = self.title.generate_sentence(&mut self.rng);
            let author_id = *random_from_list(&mut self.rng, &self.admins, "admin accounts")?;
            let status = ArticleStatus::random(&mut self.rng);
            let slug = new_article_slug(&mut self.rng);
            let id = allocate(&mut self.ids.article, "articles")?;

            self.dataset.articles.push(Article {
                id,
                title,
                slug,
                status,
                author_id,
                content_id,
                created_at: self.now,
                updated_at: self.now,
            });
        }

        info!("Generated {} articles", self.dataset.articles.len());
        self.phase = Phase::Articles;
        Ok(())
    }

    // ========================================================================
    // Threads
    // ========================================================================

    /// Create a random number of threads per board, each with an opening post.
    pub fn seed_threads(&mut self) -> Result<(), GeneratorError> {
        self.begin(Phase::Threads)?;

        for board_pos in 0..self.dataset.boards.len() {
            let count = count_between(
                &mut self.rng,
                self.config.min_thread_per_board,
                self.config.max_thread_per_board,
            );
            for _ in 0..count {
                self.create_thread(board_pos)?;
            }
            debug!(
                "Board '{}' has {} threads",
                self.dataset.boards[board_pos].short, count
            );
        }

        info!("Generated {} threads", self.dataset.threads.len());
        self.phase = Phase::Threads;
        Ok(())
    }

    fn create_thread(&mut self, board_pos: usize) -> Result<(), GeneratorError> {
        let id = allocate(&mut self.ids.thread, "threads")?;
        let board_id = self.dataset.boards[board_pos].id;
        let status = ThreadStatus::random(&mut self.rng);
        let title = self.title.generate_sentence(&mut self.rng);
        let slug = new_thread_slug(&mut self.rng);

        let thread_pos = self.dataset.threads.len();
        self.dataset.threads.push(Thread {
            id,
            board_id,
            status,
            title,
            slug,
            created_at: self.now,
            updated_at: self.now,
        });

        let creator_id = self.random_account_id()?;
        let identity_pos = self.resolve_identity_position(creator_id, id)?;
        self.dataset.identities[identity_pos].role = ThreadRole::Creator;
        self.create_post(board_pos, thread_pos, identity_pos)?;

        self.dataset.boards[board_pos].threads.push(id);
        self.thread_weights[board_pos].push(thread_pos, INITIAL_THREAD_WEIGHT);
        Ok(())
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Spread replies across threads with decaying board and thread weights.
    ///
    /// Runs one round per board. Each round draws a per-thread post target and
    /// places that many weighted posts once for every existing thread, so a
    /// run adds `rounds * threads * target` replies.
    pub fn seed_posts(&mut self) -> Result<(), GeneratorError> {
        self.begin(Phase::Posts)?;

        let thread_weights = &self.thread_weights;
        self.board_weights
            .retain(|board_pos| !thread_weights[*board_pos].is_empty());

        let rounds = self.dataset.boards.len();
        let before = self.dataset.posts.len();

        if rounds > 0 && !self.board_weights.is_empty() {
            let slots = self.dataset.threads.len();
            for round in 0..rounds {
                let target = count_between(
                    &mut self.rng,
                    self.config.min_post_per_thread,
                    self.config.max_post_per_thread,
                );
                debug!("Post round {}: {} slots x {} posts", round, slots, target);

                for _ in 0..slots {
                    for step in 0..target {
                        self.create_weighted_post(step)?;
                    }
                }
            }
        }

        info!(
            "Generated {} replies ({} posts total)",
            self.dataset.posts.len() - before,
            self.dataset.posts.len()
        );
        self.phase = Phase::Posts;
        Ok(())
    }

    fn create_weighted_post(&mut self, step: usize) -> Result<(), GeneratorError> {
        let board_slot = self
            .board_weights
            .pick_index(&mut self.rng)
            .ok_or(GeneratorError::EmptyWeights("boards"))?;
        let board_pos = self.board_weights.entries()[board_slot].0;

        let threads = &self.thread_weights[board_pos];
        let thread_slot = threads
            .pick_index(&mut self.rng)
            .ok_or(GeneratorError::EmptyWeights("threads"))?;
        let thread_pos = threads.entries()[thread_slot].0;

        let board_decay = u32::try_from(step / 4 + 1).unwrap_or(u32::MAX);
        let thread_decay = u32::try_from(step + 1).unwrap_or(u32::MAX);
        self.board_weights
            .decrease_at(board_slot, board_decay, WEIGHT_FLOOR);
        self.thread_weights[board_pos].decrease_at(thread_slot, thread_decay, WEIGHT_FLOOR);

        let account_id = self.random_account_id()?;
        let thread_id = self.dataset.threads[thread_pos].id;
        let identity_pos = self.resolve_identity_position(account_id, thread_id)?;
        self.create_post(board_pos, thread_pos, identity_pos)
    }

    fn create_post(
        &mut self,
        board_pos: usize,
        thread_pos: usize,
        identity_pos: usize,
    ) -> Result<(), GeneratorError> {
        let content_id = allocate(&mut self.ids.post_content, "post contents")?;
        let content = self.post_body.generate(&mut self.rng);
        self.dataset
            .post_contents
            .push(PostContent { id: content_id, content });

        let id = allocate(&mut self.ids.post, "posts")?;
        let board = &mut self.dataset.boards[board_pos];
        let post_number = board
            .next_post_number()
            .ok_or(GeneratorError::IdExhausted("post numbers"))?;
        let board_id = board.id;
        let thread_id = self.dataset.threads[thread_pos].id;
        let identity_id = self.dataset.identities[identity_pos].id;

        self.dataset.posts.push(Post {
            id,
            post_number,
            board_id,
            thread_id,
            identity_id,
            content_id,
            created_at: self.now,
        });
        self.dataset.identity_posts.push(IdentityPost {
            identity_id,
            post_id: id,
            board_id,
        });
        Ok(())
    }

    // ========================================================================
    // Identities
    // ========================================================================

    /// The identity `account_id` posts under in `thread_id`, created on first use.
    ///
    /// Both ids must belong to entities already in the dataset.
    pub fn resolve_identity(
        &mut self,
        account_id: EntityId,
        thread_id: EntityId,
    ) -> Result<&Identity, GeneratorError> {
        if self
            .dataset
            .accounts
            .binary_search_by_key(&account_id, |a| a.id)
            .is_err()
        {
            return Err(GeneratorError::UnknownReference {
                entity: "account",
                id: account_id,
            });
        }
        if self
            .dataset
            .threads
            .binary_search_by_key(&thread_id, |t| t.id)
            .is_err()
        {
            return Err(GeneratorError::UnknownReference {
                entity: "thread",
                id: thread_id,
            });
        }

        let position = self.resolve_identity_position(account_id, thread_id)?;
        Ok(&self.dataset.identities[position])
    }

    fn resolve_identity_position(
        &mut self,
        account_id: EntityId,
        thread_id: EntityId,
    ) -> Result<usize, GeneratorError> {
        if let Some(position) = self.identity_index.get(thread_id, account_id) {
            return Ok(position);
        }

        let identity = Identity {
            id: allocate(&mut self.ids.identity, "identities")?,
            account_id,
            thread_id,
            role: ThreadRole::random(&mut self.rng),
            style: IdentityStyle::random(&mut self.rng),
            status: IdentityStatus::random(&mut self.rng),
            name: new_identity_slug(&mut self.rng),
            created_at: self.now,
        };

        let position = self.dataset.identities.len();
        self.dataset.identities.push(identity);
        Ok(self.identity_index.insert(thread_id, account_id, position))
    }

    fn random_account_id(&mut self) -> Result<EntityId, GeneratorError> {
        random_from_list(&mut self.rng, &self.dataset.accounts, "accounts").map(|a| a.id)
    }
}
