use log::{error, info};
use tokio::task;

use crate::backend::Backend;
use crate::login::{Credentials, LoginResult};
use crate::password;
use crate::user::User;

/// Checks credentials against the store. Holds no per-request state.
pub struct Verifier(Backend);

impl Verifier {
    pub fn new(backend: Backend) -> Self {
        Self(backend)
    }

    pub async fn close(&self) {
        self.0.close().await
    }

    /// One lookup, one password check, no retries.
    pub async fn verify(&self, creds: Credentials) -> LoginResult {
        let users = self.0.users_named(&creds.username).await;

        classify(users, creds).await
    }
}

async fn classify(users: Result<Vec<User>, ()>, creds: Credentials) -> LoginResult {
    let Credentials { username, password } = creds;

    let users = match users {
        Ok(users) => users,
        Err(()) => {
            error!("couldn't look up user {username}");
            return LoginResult::StoreError;
        }
    };

    let user = match <[User; 1]>::try_from(users) {
        Ok([user]) => user,
        Err(users) if users.is_empty() => {
            let _ = task::spawn_blocking(move || password::verify_dummy(&password)).await;

            info!("login failed (user not found): {username}");
            return LoginResult::UserNotFound;
        }
        Err(users) => {
            error!(
                "integrity violation: {} users found for username {username}",
                users.len()
            );
            return LoginResult::StoreError;
        }
    };

    let User {
        id,
        username: stored_name,
        pwhash,
        role,
    } = user;

    let matched = task::spawn_blocking(move || password::verify_password(&password, &pwhash))
        .await
        .map_err(|e| error!("password check for {username} didn't complete: {e:?}"));

    match matched {
        Ok(Ok(true)) => {
            info!("login success for user: {stored_name} (id {id})");
            LoginResult::Success { user_id: id, role }
        }
        Ok(Ok(false)) => {
            info!("login failed (wrong password) for user: {stored_name} (id {id})");
            LoginResult::PasswordMismatch
        }
        Ok(Err(e)) => {
            error!("unusable password hash stored for {stored_name} (id {id}): {e}");
            LoginResult::StoreError
        }
        Err(()) => LoginResult::StoreError,
    }
}
