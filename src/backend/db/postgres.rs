/**
 * PostgreSQL Database
 *
 * sqlx-backed implementation of the persistence traits. Queries are checked
 * at runtime, the schema lives in `migrations/`.
 *
 * # Reaction Sets
 *
 * Like and dislike sets are `UUID[]` columns. A toggle locks the row with
 * `SELECT ... FOR UPDATE`, applies the change in Rust through the reaction
 * types (which own the set invariants) and writes both arrays back in the
 * same transaction.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{CommentRecords, DbError, DbResult, PostRecords, UserRecords};
use crate::shared::models::{
    Comment, NewComment, NewPost, NewUser, Pagination, Post, PostChanges, PostFilter, SortOrder,
    User, UserChanges,
};
use crate::shared::reactions::{CommentLikes, PostReactions, Reaction};

const USER_COLUMNS: &str =
    "id, username, email, password_hash, profile_picture, is_admin, created_at, updated_at";

const POST_COLUMNS: &str =
    "id, user_id, title, content, category, image, slug, likes, dislikes, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, post_id, user_id, content, likes, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    category: String,
    image: String,
    slug: String,
    likes: Vec<Uuid>,
    dislikes: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            category: row.category,
            image: row.image,
            slug: row.slug,
            reactions: PostReactions::from_sets(
                row.likes.into_iter().collect(),
                row.dislikes.into_iter().collect(),
            ),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    content: String,
    likes: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            content: row.content,
            likes: CommentLikes::from_set(row.likes.into_iter().collect()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Map unique-constraint failures on `users` to the field that collided
fn map_unique_violation(err: sqlx::Error) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("users_username_key") => "username",
                Some("users_email_key") => "email",
                _ => "record",
            };
            return DbError::UniqueViolation { field };
        }
    }
    DbError::Sqlx(err)
}

fn order_sql(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

/// LIMIT/OFFSET value; Postgres takes BIGINT, so huge values saturate
fn sql_count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Escape `%`, `_` and `\` so the term matches literally inside ILIKE
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Database backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url`
    pub async fn connect(database_url: &str) -> DbResult<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations from `migrations/`
    pub async fn migrate(&self) -> DbResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRecords for PgDatabase {
    async fn insert_user(&self, user: NewUser) -> DbResult<User> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.profile_picture)
            .bind(user.is_admin)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(map_unique_violation)
    }

    async fn find_user(&self, id: Uuid) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_users(&self, ids: &[Uuid]) -> DbResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(ids.to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn update_user(&self, id: Uuid, changes: UserChanges) -> DbResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET \
                username = COALESCE($2, username), \
                email = COALESCE($3, email), \
                password_hash = COALESCE($4, password_hash), \
                profile_picture = COALESCE($5, profile_picture), \
                updated_at = $6 \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.username)
            .bind(changes.email)
            .bind(changes.password_hash)
            .bind(changes.profile_picture)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_unique_violation)
    }

    async fn delete_user(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self, page: Pagination, order: SortOrder) -> DbResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at {} LIMIT $1 OFFSET $2",
            order_sql(order)
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(sql_count(page.limit))
            .bind(sql_count(page.start_index))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn count_users(&self, created_since: Option<DateTime<Utc>>) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE $1::timestamptz IS NULL OR created_at >= $1",
        )
        .bind(created_since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[async_trait]
impl PostRecords for PgDatabase {
    async fn insert_post(&self, post: NewPost) -> DbResult<Post> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO posts (id, user_id, title, content, category, image, slug, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(post.user_id)
            .bind(&post.title)
            .bind(&post.content)
            .bind(&post.category)
            .bind(&post.image)
            .bind(&post.slug)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_post(&self, id: Uuid) -> DbResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Post::from))
    }

    async fn update_post(&self, id: Uuid, changes: PostChanges) -> DbResult<Option<Post>> {
        let sql = format!(
            "UPDATE posts SET \
                title = COALESCE($2, title), \
                content = COALESCE($3, content), \
                category = COALESCE($4, category), \
                image = COALESCE($5, image), \
                updated_at = $6 \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.content)
            .bind(changes.category)
            .bind(changes.image)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Post::from))
    }

    async fn delete_post(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: Pagination,
        order: SortOrder,
    ) -> DbResult<Vec<Post>> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {POST_COLUMNS} FROM posts WHERE TRUE"));
        if let Some(user_id) = filter.user_id {
            query.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(post_id) = filter.post_id {
            query.push(" AND id = ").push_bind(post_id);
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(slug) = &filter.slug {
            query.push(" AND slug = ").push_bind(slug.clone());
        }
        if let Some(term) = filter.search_term.as_deref().filter(|t| !t.is_empty()) {
            let pattern = format!("%{}%", escape_like(term));
            query
                .push(" AND (title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR content ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        query.push(format!(" ORDER BY created_at {}", order_sql(order)));
        query.push(" LIMIT ").push_bind(sql_count(page.limit));
        query.push(" OFFSET ").push_bind(sql_count(page.start_index));

        let rows = query
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn count_posts(&self, created_since: Option<DateTime<Utc>>) -> DbResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM posts WHERE $1::timestamptz IS NULL OR created_at >= $1",
        )
        .bind(created_since)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn react_to_post(
        &self,
        id: Uuid,
        user_id: Uuid,
        reaction: Reaction,
    ) -> DbResult<Option<Post>> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1 FOR UPDATE");
        let Some(row) = sqlx::query_as::<_, PostRow>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut post = Post::from(row);
        post.reactions.apply(reaction, user_id);

        let update = format!(
            "UPDATE posts SET likes = $2, dislikes = $3, updated_at = $4 \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&update)
            .bind(id)
            .bind(post.reactions.likes().to_vec())
            .bind(post.reactions.dislikes().to_vec())
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(row.into()))
    }
}

#[async_trait]
impl CommentRecords for PgDatabase {
    async fn insert_comment(&self, comment: NewComment) -> DbResult<Comment> {
        let now = Utc::now();
        let sql = format!(
            "INSERT INTO comments (id, post_id, user_id, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(comment.post_id)
            .bind(comment.user_id)
            .bind(&comment.content)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_comment(&self, id: Uuid) -> DbResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Comment::from))
    }

    async fn comments_for_post(&self, post_id: Uuid) -> DbResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(post_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn update_comment_content(
        &self,
        id: Uuid,
        content: String,
    ) -> DbResult<Option<Comment>> {
        let sql = format!(
            "UPDATE comments SET content = $2, updated_at = $3 WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .bind(content)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Comment::from))
    }

    async fn delete_comment(&self, id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle_comment_like(&self, id: Uuid, user_id: Uuid) -> DbResult<Option<Comment>> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 FOR UPDATE");
        let Some(row) = sqlx::query_as::<_, CommentRow>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let mut comment = Comment::from(row);
        comment.likes.toggle(user_id);

        let update = format!(
            "UPDATE comments SET likes = $2, number_of_likes = $3, updated_at = $4 \
             WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CommentRow>(&update)
            .bind(id)
            .bind(comment.likes.likes().to_vec())
            .bind(comment.likes.number_of_likes())
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Some(row.into()))
    }
}
