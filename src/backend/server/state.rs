/**
 * Application State Management
 *
 * `AppState` holds the three stores, the session keys and the configuration.
 * The `FromRef` implementations let handlers extract only the part they
 * use, e.g. `State(posts): State<PostStore>`.
 *
 * Every field is cheap to clone: the stores share one `Arc<dyn Database>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::comments::CommentStore;
use crate::backend::db::Database;
use crate::backend::posts::PostStore;
use crate::backend::users::UserStore;
use crate::shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: SessionKeys,
    pub users: UserStore,
    pub posts: PostStore,
    pub comments: CommentStore,
}

impl AppState {
    /// Wire the stores over `db`
    pub fn new(config: AppConfig, db: Arc<dyn Database>) -> Self {
        let config = Arc::new(config);
        let sessions = SessionKeys::from_config(&config);
        let users = UserStore::new(db.clone(), sessions.clone(), config.clone());
        let posts = PostStore::new(db.clone(), users.clone());
        let comments = CommentStore::new(db, config.comment_max_len);

        Self {
            config,
            sessions,
            users,
            posts,
            comments,
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for UserStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for PostStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.posts.clone()
    }
}

impl FromRef<AppState> for CommentStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.comments.clone()
    }
}
