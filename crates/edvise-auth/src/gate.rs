//! The session gate.
//!
//! State machine: `Unknown → {Authenticated, Unauthenticated}`. The gate
//! starts `Unknown` until the first [`SessionGate::check`] resolves, and every
//! later transition is broadcast over a watch channel so protected views can
//! react to an external sign-out mid-session.

use std::sync::Arc;

use tokio::sync::watch;

use edvise_core::{Error, Result};

use crate::client::{Session, SessionProvider};

/// Presence state of the admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// First session check has not resolved yet.
    Unknown,
    /// A session exists; protected views may render.
    Authenticated(Session),
    /// No session; the caller's move is a redirect to login.
    Unauthenticated,
}

impl SessionState {
    /// Returns `true` when a session is present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Which action the login form is submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    /// Sign in with existing credentials.
    Login,
    /// Create a new account.
    Signup,
}

/// Terminal outcome of a login-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Signed in; the protected view may be entered.
    Authenticated,
    /// Account created. The user is NOT signed in; the form switches back to
    /// login mode with a confirmation notice.
    SignupComplete,
}

/// Subscription to session-state changes.
///
/// A protected view holds one of these for its lifetime; dropping it releases
/// the listener on every exit path, normal teardown or forced navigation
/// alike.
#[derive(Debug)]
pub struct SessionWatch {
    rx: watch::Receiver<SessionState>,
}

impl SessionWatch {
    /// The state as of the last observed change.
    pub fn current(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    /// Wait for the next state change and return it.
    ///
    /// Returns `Unauthenticated` if the gate itself has gone away.
    pub async fn changed(&mut self) -> SessionState {
        if self.rx.changed().await.is_err() {
            return SessionState::Unauthenticated;
        }
        self.rx.borrow_and_update().clone()
    }
}

/// Owns the current session and gates every administrative operation.
#[derive(Clone)]
pub struct SessionGate {
    provider: Arc<dyn SessionProvider>,
    tx: watch::Sender<SessionState>,
}

impl SessionGate {
    /// Create a gate in the `Unknown` state.
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        let (tx, _rx) = watch::channel(SessionState::Unknown);
        Self { provider, tx }
    }

    /// Current state without touching the provider.
    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// The current session, when one is installed.
    pub fn session(&self) -> Option<Session> {
        match self.state() {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Subscribe to session-change notifications.
    pub fn subscribe(&self) -> SessionWatch {
        SessionWatch {
            rx: self.tx.subscribe(),
        }
    }

    /// Perform the mount-time session lookup.
    ///
    /// Resolves `Unknown` by validating any installed session against the
    /// provider. An invalid or absent session transitions to
    /// `Unauthenticated` and is broadcast; the caller must not issue any
    /// store call before this returns an authenticated state.
    pub async fn check(&self) -> SessionState {
        let current = self.state();
        let session = match current {
            SessionState::Authenticated(ref session) => session.clone(),
            SessionState::Unauthenticated | SessionState::Unknown => {
                self.transition(SessionState::Unauthenticated);
                return SessionState::Unauthenticated;
            }
        };

        match self.provider.fetch_user(&session.access_token).await {
            Ok(_) => current,
            Err(err) => {
                tracing::info!(error = %err, "Session no longer valid");
                self.transition(SessionState::Unauthenticated);
                SessionState::Unauthenticated
            }
        }
    }

    /// Submit the login form.
    ///
    /// Provider failures come back verbatim for the form to display. Signup
    /// success does not install a session.
    pub async fn submit_login(
        &self,
        email: &str,
        password: &str,
        mode: LoginMode,
    ) -> Result<LoginOutcome> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("email and password are required"));
        }
        match mode {
            LoginMode::Login => {
                let session = self.provider.sign_in(email.trim(), password).await?;
                self.transition(SessionState::Authenticated(session));
                Ok(LoginOutcome::Authenticated)
            }
            LoginMode::Signup => {
                self.provider.sign_up(email.trim(), password).await?;
                Ok(LoginOutcome::SignupComplete)
            }
        }
    }

    /// Invalidate the session with the provider and broadcast the sign-out.
    ///
    /// The local session is dropped even when the provider call fails; a
    /// half-dead token should not keep the admin view open.
    pub async fn logout(&self) -> Result<()> {
        let session = self.session();
        self.transition(SessionState::Unauthenticated);
        if let Some(session) = session {
            self.provider.sign_out(&session.access_token).await?;
        }
        Ok(())
    }

    /// Install a session obtained out of band (tests, token restore).
    pub fn install(&self, session: Session) {
        self.transition(SessionState::Authenticated(session));
    }

    /// Drop the session locally, as an external sign-out would.
    pub fn invalidate(&self) {
        self.transition(SessionState::Unauthenticated);
    }

    fn transition(&self, next: SessionState) {
        self.tx.send_if_modified(|state| {
            if *state == next {
                false
            } else {
                *state = next.clone();
                true
            }
        });
    }
}
