use std::fs::File;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::user::User;

mod kv;

type Result<T> = std::result::Result<T, ()>;

pub type InitError = io::Error;

pub struct Backend {
    root: PathBuf,
}

macro_rules! path {
    ($root: expr, $($components: expr),*) => {
        {
            let mut p = $root.clone();
            path!(@internal, p, $($components),*);
            p
        }
    };
    (@internal, $p:expr, $next:expr, $($rest: expr),*) => {
        $p.push($next);
        path!(@internal, $p, $($rest),*);
    };
    (@internal, $p:expr, $next:expr) => {
        $p.push($next);
    };
}

impl Backend {
    pub async fn new(data_dir: &Path) -> std::result::Result<Self, InitError> {
        let users = data_dir.join("users");
        if !users.is_dir() {
            return Err(io::Error::new(
                ErrorKind::NotFound,
                format!("no users directory at {users:?}"),
            ));
        }

        info!("Using {users:?}");
        Ok(Self {
            root: data_dir.to_path_buf(),
        })
    }

    pub async fn close(&self) {}
}

/// Whether `username` can name exactly one directory under `users/`.
fn is_path_safe(username: &str) -> bool {
    !username.is_empty()
        && username != "."
        && username != ".."
        && !username.contains(['/', '\\', '\0'])
}

impl Backend {
    pub async fn users_named(&self, username: &str) -> Result<Vec<User>> {
        if !is_path_safe(username) {
            return Ok(vec![]);
        }

        let path = path!(self.root, "users", username, "creds.txt");
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                error!("open \"{path:?}\": {e:?}");
                return Err(());
            }
        };

        let creds = kv::read(file, &["id", "pwhash", "role"]).map_err(|()| {
            error!("couldn't parse \"{path:?}\"");
        })?;

        let id = creds["id"].parse().map_err(|e| {
            error!("invalid id for \"{username}\": {e:?}");
        })?;

        Ok(vec![User {
            id,
            username: username.into(),
            pwhash: creds["pwhash"].clone(),
            role: creds["role"].clone(),
        }])
    }
}
