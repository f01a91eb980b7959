#![allow(dead_code)]

use std::sync::Arc;

use backoffice_api::db::{establish_connection, run_migrations, DbPool};
use backoffice_api::events::{self, EventSender};

/// Fresh in-memory database with the full schema applied. Each test names
/// its own database so parallel tests never share state.
pub async fn test_db(name: &str) -> Arc<DbPool> {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let db = establish_connection(&url)
        .await
        .expect("failed to open test database");
    run_migrations(&db).await.expect("failed to run migrations");
    Arc::new(db)
}

/// Event channel whose receiver is simply dropped; sends are best-effort.
pub fn test_events() -> EventSender {
    let (sender, receiver) = events::channel(64);
    drop(receiver);
    sender
}
