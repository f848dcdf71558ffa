//! Seams for saving results
//!
//! The engine never talks to storage directly. It asks an [IdentityProvider] who is typing
//! and hands passed results to a [ResultStore]. Shells plug in their own implementations.

use std::{cell::RefCell, fmt::Display, rc::Rc};

use thiserror::Error;

use crate::SessionResult;

/// Identifies the typist a result belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur while saving a result
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Result store is unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to write result: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode result: {0}")]
    Encode(String),
}

/// Tells who is typing. `None` means nobody is signed in and nothing is saved.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<UserId>;
}

impl IdentityProvider for Option<UserId> {
    fn current_user(&self) -> Option<UserId> {
        self.clone()
    }
}

/// Stores passed results, keyed by user
pub trait ResultStore {
    fn save(&mut self, result: &SessionResult, user: &UserId) -> Result<(), PersistenceError>;
}

/// Lets the caller keep a handle on a store it hands to a controller
impl<S: ResultStore> ResultStore for Rc<RefCell<S>> {
    fn save(&mut self, result: &SessionResult, user: &UserId) -> Result<(), PersistenceError> {
        self.borrow_mut().save(result, user)
    }
}

/// A store that accepts and drops every result
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl ResultStore for Discard {
    fn save(&mut self, _result: &SessionResult, _user: &UserId) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Keeps results in memory, in the order they were saved
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    results: Vec<(UserId, SessionResult)>,
}

impl MemoryStore {
    pub fn results(&self) -> &[(UserId, SessionResult)] {
        &self.results
    }

    /// Results saved for `user`
    pub fn results_for<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a SessionResult> {
        self.results
            .iter()
            .filter(move |(owner, _)| owner == user)
            .map(|(_, result)| result)
    }
}

impl ResultStore for MemoryStore {
    fn save(&mut self, result: &SessionResult, user: &UserId) -> Result<(), PersistenceError> {
        self.results.push((user.clone(), result.clone()));
        Ok(())
    }
}
