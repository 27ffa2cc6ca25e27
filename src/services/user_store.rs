use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

use super::password::{hash_password, verify_password, PasswordError, PasswordHash};

/// Role required for every `/cashcards` route
pub const ROLE_CARD_OWNER: &str = "CARD-OWNER";

/// A user definition before its password has been hashed
pub struct UserSeed {
    pub username: String,
    pub password: Secret<String>,
    pub roles: Vec<String>,
}

impl UserSeed {
    pub fn new(username: &str, password: &str, roles: &[&str]) -> Self {
        Self {
            username: username.to_string(),
            password: Secret::new(password.to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// The principal resolved from valid credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

struct StoredUser {
    username: String,
    password_hash: PasswordHash,
    roles: Vec<String>,
}

/// In-memory user store. Only password hashes are kept.
/// Usernames are looked up case-insensitively.
pub struct UserStore {
    // Keyed by lowercased username
    users: HashMap<String, StoredUser>,
    // Verified against for unknown usernames so they cost the same as a wrong password
    decoy: PasswordHash,
}

impl UserStore {
    pub fn new(seeds: Vec<UserSeed>, iterations: u32) -> Result<Self, PasswordError> {
        let mut users = HashMap::with_capacity(seeds.len());

        for seed in seeds {
            let password_hash = hash_password(seed.password.expose_secret(), iterations)?;
            users.insert(
                seed.username.to_lowercase(),
                StoredUser {
                    username: seed.username,
                    password_hash,
                    roles: seed.roles,
                },
            );
        }

        let decoy = hash_password("decoy-password", iterations)?;

        Ok(Self { users, decoy })
    }

    /// The built-in accounts: two card owners and one user without the role.
    pub fn sample_users() -> Vec<UserSeed> {
        vec![
            UserSeed::new("Thai", "abc123", &[ROLE_CARD_OWNER]),
            UserSeed::new("user-no-cards", "abc123", &["NON-OWNER"]),
            UserSeed::new("Mike", "abc123", &[ROLE_CARD_OWNER]),
        ]
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns the user if the username exists and the password matches.
    /// The principal carries the username as it was registered.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<AuthenticatedUser> {
        match self.users.get(&username.to_lowercase()) {
            Some(user) if verify_password(password, &user.password_hash) => {
                Some(AuthenticatedUser {
                    username: user.username.clone(),
                    roles: user.roles.clone(),
                })
            }
            Some(_) => None,
            None => {
                let _ = verify_password(password, &self.decoy);
                None
            }
        }
    }
}
