use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::{query_as, Pool, Sqlite};

use log::{error, info};

use crate::user::User;

type Result<T> = std::result::Result<T, ()>;

pub type InitError = sqlx::Error;

pub struct Backend(pub Pool<Sqlite>);

impl Backend {
    pub async fn new(data_dir: &Path) -> std::result::Result<Self, InitError> {
        let path = data_dir.join("users.sql");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;
        info!("Using {path:?}");

        migrate(&pool).await?;

        Ok(Self(pool))
    }

    pub async fn close(&self) {
        self.0.close().await;
    }
}

async fn migrate(pool: &Pool<Sqlite>) -> std::result::Result<(), InitError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}

impl Backend {
    pub async fn users_named(&self, username: &str) -> Result<Vec<User>> {
        query_as::<_, User>(
            "
            SELECT id, username, pwhash, role
            FROM users
            WHERE username = ?
            ",
        )
        .bind(username)
        .fetch_all(&self.0)
        .await
        .map_err(|e| {
            error!("couldn't query for user {username}: {e:?}");
        })
    }
}
