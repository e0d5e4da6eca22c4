//! Test helpers for inbound HTTP components.
//!
//! Handler tests run the real domain services over in-memory repositories so
//! evaluation, ownership and error mapping are exercised end to end without a
//! database.

use std::sync::{Arc, Mutex, PoisonError};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    CalculationRepository, CalculationRepositoryError, CredentialHasher, CredentialHasherError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Calculation, CalculationId, CalculationService, NewCalculation, NewUser, PageRequest,
    PasswordHash, User, UserAccount, UserAccountService, UserId,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

struct Table<T> {
    next_id: i64,
    rows: Vec<T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: Vec::new(),
        }
    }
}

/// Shared in-memory store backing both test repositories, so the calculation
/// foreign key can be checked against registered users.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    users: Arc<Mutex<Table<UserAccount>>>,
    calculations: Arc<Mutex<Table<Calculation>>>,
}

impl InMemoryStore {
    fn user_exists(&self, id: UserId) -> bool {
        let users = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        users.rows.iter().any(|account| account.user.id() == id)
    }

    /// Number of stored calculations.
    pub fn calculation_count(&self) -> usize {
        let calculations = self
            .calculations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        calculations.rows.len()
    }
}

#[async_trait]
impl CalculationRepository for InMemoryStore {
    async fn insert(
        &self,
        calculation: &NewCalculation,
    ) -> Result<Calculation, CalculationRepositoryError> {
        if let Some(owner) = calculation.user_id() {
            if !self.user_exists(owner) {
                return Err(CalculationRepositoryError::unknown_user(owner.as_i64()));
            }
        }
        let mut table = self
            .calculations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        table.next_id += 1;
        let record = Calculation {
            id: CalculationId::new(table.next_id),
            a: calculation.a(),
            b: calculation.b(),
            kind: calculation.kind(),
            result: calculation.result(),
            created_at: calculation.created_at(),
            user_id: calculation.user_id(),
        };
        table.rows.push(record);
        Ok(record)
    }

    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let table = self
            .calculations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(table.rows.iter().find(|record| record.id == id).copied())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let table = self
            .calculations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(table.rows.iter().skip(skip).take(take).copied().collect())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let table = self
            .calculations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(table
            .rows
            .iter()
            .filter(|record| record.user_id == Some(user_id))
            .copied()
            .collect())
    }

    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationRepositoryError> {
        let mut table = self
            .calculations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = table.rows.len();
        table.rows.retain(|record| record.id != id);
        Ok(table.rows.len() != before)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &NewUser) -> Result<UserAccount, UserRepositoryError> {
        let mut table = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        if table
            .rows
            .iter()
            .any(|account| account.user.username() == &user.username)
        {
            return Err(UserRepositoryError::duplicate_username(user.username.as_str()));
        }
        if table
            .rows
            .iter()
            .any(|account| account.user.email() == &user.email)
        {
            return Err(UserRepositoryError::duplicate_email(user.email.as_str()));
        }
        table.next_id += 1;
        let id = UserId::new(table.next_id)
            .map_err(|err| UserRepositoryError::query(err.to_string()))?;
        let account = UserAccount {
            user: User::new(id, user.username.clone(), user.email.clone(), user.created_at),
            password_hash: user.password_hash.clone(),
        };
        table.rows.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, UserRepositoryError> {
        let table = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(table
            .rows
            .iter()
            .find(|account| account.user.id() == id)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let table = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(table
            .rows
            .iter()
            .find(|account| account.user.username().as_str() == username)
            .cloned())
    }

    async fn update_password_hash(
        &self,
        id: UserId,
        hash: &PasswordHash,
    ) -> Result<bool, UserRepositoryError> {
        let mut table = self.users.lock().unwrap_or_else(PoisonError::into_inner);
        match table.rows.iter_mut().find(|account| account.user.id() == id) {
            Some(account) => {
                account.password_hash = hash.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Reversible "hasher" so handler tests skip Argon2's cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainCredentialHasher;

impl CredentialHasher for PlainCredentialHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, CredentialHasherError> {
        Ok(PasswordHash::new(format!("plain${password}")))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, CredentialHasherError> {
        hash.as_str()
            .strip_prefix("plain$")
            .map(|stored| stored == password)
            .ok_or_else(|| CredentialHasherError::malformed_hash("missing plain$ prefix"))
    }
}

/// HTTP state wired to the real services over `store`.
pub fn in_memory_state(store: &InMemoryStore) -> HttpState {
    let repo = Arc::new(store.clone());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let calculations = Arc::new(CalculationService::new(
        Arc::clone(&repo),
        Arc::clone(&repo),
        clock.clone(),
    ));
    let accounts = Arc::new(UserAccountService::new(
        repo,
        Arc::new(PlainCredentialHasher),
        clock,
    ));
    HttpState::new(HttpStatePorts {
        calculations: calculations.clone(),
        calculations_query: calculations,
        login: accounts.clone(),
        accounts,
    })
}
