//! Table layouts and row encoding for bulk COPY inserts.
//!
//! Every entity maps to one table through [`CopyRow`]. Rows are flattened to
//! [`SqlValue`]s in column order and streamed by the store through
//! `COPY ... FROM STDIN BINARY`.

use chrono::{DateTime, Utc};
use seed_core::{
    Account, Article, ArticleContent, Board, Identity, IdentityPost, Post, PostContent, SeedEnum,
    Thread,
};
use tokio_postgres::types::{ToSql, Type};

/// PostgreSQL column types used by the seeded schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int4,
    Text,
    TimestampTz,
}

impl ColumnType {
    pub fn pg_type(&self) -> Type {
        match self {
            ColumnType::Int4 => Type::INT4,
            ColumnType::Text => Type::TEXT,
            ColumnType::TimestampTz => Type::TIMESTAMPTZ,
        }
    }
}

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int4(i32),
    Text(String),
    TimestampTz(DateTime<Utc>),
}

impl SqlValue {
    pub fn column_type(&self) -> ColumnType {
        match self {
            SqlValue::Int4(_) => ColumnType::Int4,
            SqlValue::Text(_) => ColumnType::Text,
            SqlValue::TimestampTz(_) => ColumnType::TimestampTz,
        }
    }

    fn enum_id<E: SeedEnum>(variant: E) -> Self {
        SqlValue::Int4(variant.id())
    }
}

/// Convert a value to a boxed ToSql trait object.
pub fn sql_value_to_boxed(value: SqlValue) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Int4(i) => Box::new(i),
        SqlValue::Text(s) => Box::new(s),
        SqlValue::TimestampTz(ts) => Box::new(ts),
    }
}

/// Target table of one entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Model name used in error messages
    pub model: &'static str,
    pub table: &'static str,
    pub columns: &'static [(&'static str, ColumnType)],
    /// Whether `id` is an identity column whose sequence needs re-syncing
    pub has_identity: bool,
}

impl TableSpec {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    pub fn pg_types(&self) -> Vec<Type> {
        self.columns.iter().map(|(_, ty)| ty.pg_type()).collect()
    }

    /// `COPY "table" ("col", ...) FROM STDIN BINARY`
    pub fn copy_statement(&self) -> String {
        let columns = self
            .column_names()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        format!("COPY \"{}\" ({}) FROM STDIN BINARY", self.table, columns)
    }

    /// Advance the `id` identity sequence past the highest inserted id.
    ///
    /// Returns `None` for tables without an identity column.
    pub fn sync_sequence_statement(&self) -> Option<String> {
        if !self.has_identity {
            return None;
        }
        Some(format!(
            "SELECT setval(pg_get_serial_sequence('\"{t}\"', 'id'), COALESCE(MAX(\"id\"), 0) + 1, false) FROM \"{t}\"",
            t = self.table
        ))
    }
}

/// An entity that can be bulk-copied into its table.
pub trait CopyRow {
    const TABLE: TableSpec;

    /// Column values in [`TableSpec::columns`] order.
    fn values(&self) -> Vec<SqlValue>;
}

use ColumnType::{Int4, Text, TimestampTz};

impl CopyRow for Account {
    const TABLE: TableSpec = TableSpec {
        model: "Account",
        table: "accounts",
        columns: &[
            ("id", Int4),
            ("username", Text),
            ("email", Text),
            ("status_id", Int4),
            ("role_id", Int4),
            ("created_at", TimestampTz),
            ("updated_at", TimestampTz),
        ],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int4(self.id),
            SqlValue::Text(self.username.clone()),
            SqlValue::Text(self.email.clone()),
            SqlValue::enum_id(self.status),
            SqlValue::enum_id(self.role),
            SqlValue::TimestampTz(self.created_at),
            SqlValue::TimestampTz(self.updated_at),
        ]
    }
}

impl CopyRow for Board {
    const TABLE: TableSpec = TableSpec {
        model: "Board",
        table: "boards",
        columns: &[
            ("id", Int4),
            ("title", Text),
            ("short", Text),
            ("description", Text),
            ("post_count", Int4),
            ("created_at", TimestampTz),
            ("updated_at", TimestampTz),
        ],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int4(self.id),
            SqlValue::Text(self.title.clone()),
            SqlValue::Text(self.short.clone()),
            SqlValue::Text(self.description.clone()),
            SqlValue::Int4(self.post_count),
            SqlValue::TimestampTz(self.created_at),
            SqlValue::TimestampTz(self.updated_at),
        ]
    }
}

impl CopyRow for ArticleContent {
    const TABLE: TableSpec = TableSpec {
        model: "ArticleContent",
        table: "article_contents",
        columns: &[("id", Int4), ("content", Text)],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::Int4(self.id), SqlValue::Text(self.content.clone())]
    }
}

impl CopyRow for Article {
    const TABLE: TableSpec = TableSpec {
        model: "Article",
        table: "articles",
        columns: &[
            ("id", Int4),
            ("title", Text),
            ("slug", Text),
            ("content_id", Int4),
            ("status_id", Int4),
            ("author_id", Int4),
            ("created_at", TimestampTz),
            ("updated_at", TimestampTz),
        ],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int4(self.id),
            SqlValue::Text(self.title.clone()),
            SqlValue::Text(self.slug.clone()),
            SqlValue::Int4(self.content_id),
            SqlValue::enum_id(self.status),
            SqlValue::Int4(self.author_id),
            SqlValue::TimestampTz(self.created_at),
            SqlValue::TimestampTz(self.updated_at),
        ]
    }
}

impl CopyRow for Thread {
    const TABLE: TableSpec = TableSpec {
        model: "Thread",
        table: "threads",
        columns: &[
            ("id", Int4),
            ("board_id", Int4),
            ("status_id", Int4),
            ("title", Text),
            ("slug", Text),
            ("created_at", TimestampTz),
            ("updated_at", TimestampTz),
        ],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int4(self.id),
            SqlValue::Int4(self.board_id),
            SqlValue::enum_id(self.status),
            SqlValue::Text(self.title.clone()),
            SqlValue::Text(self.slug.clone()),
            SqlValue::TimestampTz(self.created_at),
            SqlValue::TimestampTz(self.updated_at),
        ]
    }
}

impl CopyRow for PostContent {
    const TABLE: TableSpec = TableSpec {
        model: "PostContent",
        table: "post_contents",
        columns: &[("id", Int4), ("content", Text)],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::Int4(self.id), SqlValue::Text(self.content.clone())]
    }
}

impl CopyRow for Post {
    const TABLE: TableSpec = TableSpec {
        model: "Post",
        table: "posts",
        columns: &[
            ("id", Int4),
            ("post_number", Int4),
            ("board_id", Int4),
            ("thread_id", Int4),
            ("identity_id", Int4),
            ("content_id", Int4),
            ("created_at", TimestampTz),
        ],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int4(self.id),
            SqlValue::Int4(self.post_number),
            SqlValue::Int4(self.board_id),
            SqlValue::Int4(self.thread_id),
            SqlValue::Int4(self.identity_id),
            SqlValue::Int4(self.content_id),
            SqlValue::TimestampTz(self.created_at),
        ]
    }
}

impl CopyRow for Identity {
    const TABLE: TableSpec = TableSpec {
        model: "Identity",
        table: "identities",
        columns: &[
            ("id", Int4),
            ("account_id", Int4),
            ("thread_id", Int4),
            ("role_id", Int4),
            ("style_id", Int4),
            ("status_id", Int4),
            ("name", Text),
            ("created_at", TimestampTz),
        ],
        has_identity: true,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int4(self.id),
            SqlValue::Int4(self.account_id),
            SqlValue::Int4(self.thread_id),
            SqlValue::enum_id(self.role),
            SqlValue::enum_id(self.style),
            SqlValue::enum_id(self.status),
            SqlValue::Text(self.name.clone()),
            SqlValue::TimestampTz(self.created_at),
        ]
    }
}

impl CopyRow for IdentityPost {
    const TABLE: TableSpec = TableSpec {
        model: "IdentityPost",
        table: "identity_posts",
        columns: &[("identity_id", Int4), ("post_id", Int4), ("board_id", Int4)],
        has_identity: false,
    };

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int4(self.identity_id),
            SqlValue::Int4(self.post_id),
            SqlValue::Int4(self.board_id),
        ]
    }
}

/// Every seeded table, in foreign-key insertion order.
pub const INSERT_ORDER: [TableSpec; 9] = [
    Account::TABLE,
    Board::TABLE,
    ArticleContent::TABLE,
    Article::TABLE,
    Thread::TABLE,
    PostContent::TABLE,
    Post::TABLE,
    Identity::TABLE,
    IdentityPost::TABLE,
];

/// Encode a collection of entities for its table.
pub fn encode_rows<T: CopyRow>(rows: &[T]) -> Vec<Vec<SqlValue>> {
    rows.iter().map(CopyRow::values).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::{AccountRole, AccountStatus};

    fn account() -> Account {
        let now = Utc::now();
        Account {
            id: 7,
            username: "nyronic".to_string(),
            email: "nyronic@gmail.com".to_string(),
            role: AccountRole::Admin,
            status: AccountStatus::Inactive,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_copy_statement() {
        assert_eq!(
            ArticleContent::TABLE.copy_statement(),
            "COPY \"article_contents\" (\"id\", \"content\") FROM STDIN BINARY"
        );
    }

    #[test]
    fn test_values_match_column_types() {
        let values = account().values();
        let columns = Account::TABLE.columns;

        assert_eq!(values.len(), columns.len());
        for (value, (name, ty)) in values.iter().zip(columns) {
            assert_eq!(value.column_type(), *ty, "column {name}");
        }
    }

    #[test]
    fn test_enum_columns_use_ordinals() {
        let values = account().values();

        // status_id, role_id
        assert_eq!(values[3], SqlValue::Int4(2));
        assert_eq!(values[4], SqlValue::Int4(3));
    }

    #[test]
    fn test_sync_sequence_statement() {
        let sql = Board::TABLE.sync_sequence_statement().unwrap();
        assert!(sql.contains("pg_get_serial_sequence('\"boards\"', 'id')"));
        assert!(sql.ends_with("FROM \"boards\""));

        assert!(IdentityPost::TABLE.sync_sequence_statement().is_none());
    }

    #[test]
    fn test_insert_order() {
        let tables: Vec<&str> = INSERT_ORDER.iter().map(|t| t.table).collect();
        assert_eq!(
            tables,
            vec![
                "accounts",
                "boards",
                "article_contents",
                "articles",
                "threads",
                "post_contents",
                "posts",
                "identities",
                "identity_posts",
            ]
        );
    }

    #[test]
    fn test_encode_rows() {
        let rows = encode_rows(&[account(), account()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], SqlValue::Text("nyronic".to_string()));
    }
}
