//! # Controller Module - Driving Sessions End to End
//!
//! The [SessionController] is the entry point for shells. It seeds sessions from a
//! [WordSource], forwards keys and ticks, keeps time-mode tests supplied with words, and
//! turns an ended session into a [SessionResult] exactly once.
//!
//! ## Flow
//!
#![doc = simple_mermaid::mermaid!("../diagrams/controller_flow.mmd")]
//!
//! ## Usage Example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use caret::persistence::MemoryStore;
//! use caret::{KeyInput, Mode, SessionController, UserId, WordList};
//!
//! let store = Rc::new(RefCell::new(MemoryStore::default()));
//! let mut controller = SessionController::builder(WordList::new("demo", ["go"]))
//!     .with_identity(Some(UserId::new("ada")))
//!     .with_store(Rc::clone(&store))
//!     .start(Mode::words(1))
//!     .unwrap();
//!
//! controller.handle_key_event(KeyInput::Char('g'));
//! controller.handle_key_event(KeyInput::Char('o'));
//!
//! // Ending the test saved the result
//! assert_eq!(store.borrow().results().len(), 1);
//! ```

use crate::persistence::Discard;
use crate::{
    Configuration, Ending, FailureReason, GenerationError, IdentityProvider, KeyInput, Keystroke,
    MetricSample, Mode, Outcome, PersistenceError, ResultStore, Session, SessionResult,
    WordSource,
};

/// Side-channel notifications from a [SessionController]. Every method defaults to a no-op.
pub trait SessionObserver {
    /// The first key of a test started the clock
    fn on_started(&mut self, _mode: Mode) {}
    fn on_keystroke(&mut self, _keystroke: Keystroke) {}
    fn on_afk_changed(&mut self, _afk: bool) {}
    fn on_ended(&mut self, _ending: Ending) {}
    fn on_saved(&mut self, _result: &SessionResult) {}
    fn on_persistence_failed(&mut self, _error: &PersistenceError) {}
}

/// Why a result was not handed to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The result did not pass
    NotPassed(FailureReason),
    /// Nobody is signed in
    SignedOut,
}

/// What happened to the latest result
#[derive(Debug, Default)]
pub enum Persistence {
    /// No result yet
    #[default]
    Pending,
    Saved,
    Skipped(SkipReason),
    Failed(PersistenceError),
}

/// Configures a [SessionController] before the first session starts
pub struct ControllerBuilder {
    words: Box<dyn WordSource>,
    config: Configuration,
    identity: Box<dyn IdentityProvider>,
    store: Box<dyn ResultStore>,
    observer: Option<Box<dyn SessionObserver>>,
}

impl ControllerBuilder {
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    pub fn with_identity(mut self, identity: impl IdentityProvider + 'static) -> Self {
        self.identity = Box::new(identity);
        self
    }

    pub fn with_store(mut self, store: impl ResultStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Seed the first session and build the controller
    pub fn start(mut self, mode: Mode) -> Result<SessionController, GenerationError> {
        let session = seed_session(self.words.as_mut(), mode, &self.config)?;
        tracing::info!(%mode, "session ready");

        Ok(SessionController {
            session,
            words: self.words,
            config: self.config,
            identity: self.identity,
            store: self.store,
            observer: self.observer,
            result: None,
            persistence: Persistence::Pending,
            extension_failed: false,
        })
    }
}

/// Drives typing sessions for a shell
pub struct SessionController {
    session: Session,
    words: Box<dyn WordSource>,
    config: Configuration,
    identity: Box<dyn IdentityProvider>,
    store: Box<dyn ResultStore>,
    observer: Option<Box<dyn SessionObserver>>,
    result: Option<SessionResult>,
    persistence: Persistence,
    extension_failed: bool,
}

impl SessionController {
    /// Start configuring a controller around a word source.
    ///
    /// Without further configuration, results are computed but not saved.
    pub fn builder(words: impl WordSource + 'static) -> ControllerBuilder {
        ControllerBuilder {
            words: Box::new(words),
            config: Configuration::default(),
            identity: Box::new(None),
            store: Box::new(Discard),
            observer: None,
        }
    }

    /// A controller with the default configuration that never saves
    pub fn new(words: impl WordSource + 'static, mode: Mode) -> Result<Self, GenerationError> {
        Self::builder(words).start(mode)
    }

    /// Replace the session with a fresh idle one in `mode`.
    ///
    /// Words are generated first. If that fails the current session is left untouched.
    pub fn start(&mut self, mode: Mode) -> Result<(), GenerationError> {
        let session = seed_session(self.words.as_mut(), mode, &self.config).inspect_err(
            |error| tracing::error!(%error, %mode, "could not generate words for session"),
        )?;

        let focused = self.session.is_focused();
        self.session.stop();
        self.session = session;
        self.session.set_focus(focused);
        self.result = None;
        self.persistence = Persistence::Pending;
        self.extension_failed = false;

        tracing::info!(%mode, "session ready");
        Ok(())
    }

    /// Start over with the current mode
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        self.start(self.session.mode())
    }

    /// Forward a key to the session
    pub fn handle_key_event(&mut self, input: KeyInput) -> Keystroke {
        let outcome = self.session.handle_key(input);

        if outcome.started {
            let mode = self.session.mode();
            self.notify(|observer| observer.on_started(mode));
        }
        if outcome.afk_cleared {
            self.notify(|observer| observer.on_afk_changed(false));
        }
        self.notify(|observer| observer.on_keystroke(outcome.keystroke));

        if outcome.ended {
            self.conclude();
        } else {
            self.extend_words();
        }

        outcome.keystroke
    }

    /// Advance the session clock by one second
    ///
    /// Returns the sample recorded for the new second, if the session is running.
    pub fn tick(&mut self) -> Option<MetricSample> {
        let outcome = self.session.tick();

        if outcome.went_afk {
            self.notify(|observer| observer.on_afk_changed(true));
        }
        if outcome.ended {
            self.conclude();
        }

        outcome.sample
    }

    pub const fn set_focus(&mut self, focused: bool) {
        self.session.set_focus(focused);
    }

    /// Compute and save the result of an ended session
    ///
    /// The result is computed and handed to the store once. Later calls return the same
    /// result. Returns `None` while the session has not ended.
    pub fn finalize(&mut self) -> Option<&SessionResult> {
        if !self.session.is_ended() {
            return None;
        }

        if self.result.is_none() {
            let result = SessionResult::from_session(&self.session, &self.config.thresholds);
            tracing::info!(
                wpm = result.wpm,
                raw_wpm = result.raw_wpm,
                accuracy = result.accuracy,
                consistency = result.consistency,
                outcome = ?result.outcome,
                "session finalized"
            );
            self.persistence = self.persist(&result);
            self.result = Some(result);
        }

        self.result.as_ref()
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub const fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub const fn mode(&self) -> Mode {
        self.session.mode()
    }

    fn conclude(&mut self) {
        if let Some(ending) = self.session.ending() {
            self.notify(|observer| observer.on_ended(ending));
        }
        self.finalize();
    }

    fn persist(&mut self, result: &SessionResult) -> Persistence {
        if let Outcome::Failed(reason) = result.outcome {
            tracing::info!(%reason, "result did not pass, not saving");
            return Persistence::Skipped(SkipReason::NotPassed(reason));
        }

        let Some(user) = self.identity.current_user() else {
            tracing::debug!("nobody signed in, not saving");
            return Persistence::Skipped(SkipReason::SignedOut);
        };

        match self.store.save(result, &user) {
            Ok(()) => {
                tracing::info!(%user, "result saved");
                self.notify(|observer| observer.on_saved(result));
                Persistence::Saved
            }
            Err(error) => {
                tracing::warn!(%error, %user, "failed to save result");
                self.notify(|observer| observer.on_persistence_failed(&error));
                Persistence::Failed(error)
            }
        }
    }

    // Time mode never runs out of words: once the caret reaches the last word, append a batch
    fn extend_words(&mut self) {
        let session = &self.session;
        if !session.mode().is_time()
            || session.is_ended()
            || !session.grid().is_last_word()
            || self.extension_failed
        {
            return;
        }

        match self.words.generate(self.config.time_mode_batch) {
            Ok(words) => {
                tracing::debug!(count = words.len(), "extending time-mode words");
                self.session.push_words(&words);
            }
            Err(error) => {
                tracing::warn!(%error, "could not extend time-mode words");
                self.extension_failed = true;
            }
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn SessionObserver)) {
        if let Some(observer) = self.observer.as_deref_mut() {
            f(observer);
        }
    }
}

fn seed_session(
    words: &mut dyn WordSource,
    mode: Mode,
    config: &Configuration,
) -> Result<Session, GenerationError> {
    let generated = words.generate(mode.initial_word_count(config))?;
    Session::new(mode, &generated, config)
        .ok_or_else(|| GenerationError::Exhausted(words.name().to_owned()))
}
