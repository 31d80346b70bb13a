//! [`Session`] definitions.

use std::{fs, path::PathBuf, sync::Arc};

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, FromStr};
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing as log;

use super::{Password, Username};

/// Established operator session.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// Bearer [`Token`] authorizing this [`Session`].
    pub token: Token,

    /// [`DateTime`] when this [`Session`] was established.
    #[serde(with = "common::datetime::serde::unix_timestamp")]
    pub established_at: CreationDateTime,
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Deserialize, Display, FromStr, Serialize)]
#[as_ref(str, String)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// [`DateTime`] of a [`Session`] establishment.
pub type CreationDateTime = DateTimeOf<(Session, unit::Creation)>;

/// Operator credentials exchanged for a [`Session`].
#[derive(Debug)]
pub struct Credentials {
    /// [`Username`] of the operator.
    pub username: Username,

    /// [`Password`] of the operator.
    pub password: SecretBox<Password>,
}

/// Shared store of the current operator [`Session`].
///
/// The [`Session`] is mirrored into a state file, so an operator stays
/// signed in across restarts. File errors are logged and swallowed: losing
/// the mirror only costs a re-login.
#[derive(Clone, Debug)]
pub struct Store {
    /// Path of the state file.
    path: Arc<PathBuf>,

    /// Currently established [`Session`], if any.
    session: Arc<RwLock<Option<Session>>>,
}

impl Store {
    /// Opens a [`Store`] backed by the provided state file, picking up the
    /// [`Session`] persisted there earlier, if any.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let session = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|e| {
                        log::warn!(
                            "malformed session state file \
                             `{}`: {e}",
                            path.display(),
                        );
                    })
                    .ok()
            });
        Self {
            path: Arc::new(path),
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Returns the [`Token`] of the currently established [`Session`], if
    /// any.
    pub async fn token(&self) -> Option<Token> {
        self.session.read().await.as_ref().map(|s| s.token.clone())
    }

    /// Establishes the provided [`Session`], replacing the current one.
    pub async fn establish(&self, session: Session) {
        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(e) = fs::write(self.path.as_ref(), raw) {
                    log::warn!(
                        "failed to persist session into `{}`: {e}",
                        self.path.display(),
                    );
                }
            }
            Err(e) => log::warn!("failed to serialize session: {e}"),
        }
        *self.session.write().await = Some(session);
    }

    /// Destroys the currently established [`Session`], if any.
    pub async fn destroy(&self) {
        *self.session.write().await = None;
        if let Err(e) = fs::remove_file(self.path.as_ref()) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "failed to wipe session state file `{}`: {e}",
                    self.path.display(),
                );
            }
        }
    }
}

#[cfg(test)]
mod store_spec {
    use common::DateTime;

    use super::{Session, Store, Token};

    fn session(token: &str) -> Session {
        #[expect(unsafe_code, reason = "test input is well-formed")]
        let token = unsafe { Token::new_unchecked(token.into()) };
        Session { token, established_at: DateTime::now().coerce() }
    }

    #[tokio::test]
    async fn survives_reopening() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("session-{}.json", uuid::Uuid::new_v4()));

        let store = Store::open(&path);
        assert!(store.token().await.is_none());

        store.establish(session("op-token")).await;
        assert_eq!(
            store.token().await.as_ref().map(AsRef::as_ref),
            Some("op-token"),
        );

        let reopened = Store::open(&path);
        assert_eq!(
            reopened.token().await.as_ref().map(AsRef::as_ref),
            Some("op-token"),
        );

        reopened.destroy().await;
        assert!(reopened.token().await.is_none());
        assert!(Store::open(&path).token().await.is_none());

        reopened.destroy().await;
    }
}
