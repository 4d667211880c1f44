//! Per-resolution-context provider sessions.

use crate::error::{Error, LogoutFailure, Result};

use super::handler::ResourceProviderHandler;
use super::{AuthType, AuthenticationInfo, ProviderState};

#[derive(Debug)]
struct Session {
    handler: ResourceProviderHandler,
    state: ProviderState,
}

/// Opens and tracks the provider sessions of one resolution context.
///
/// Providers with [`AuthType::Required`] are logged in eagerly by
/// [`authenticate_all`](Self::authenticate_all), providers with
/// [`AuthType::Lazy`] the first time they are used, and providers with
/// [`AuthType::No`] never. Every session opened here is closed by
/// [`logout`](Self::logout).
///
/// The authenticator belongs to exactly one resolution context and is not
/// shared between threads.
#[derive(Debug, Default)]
pub struct ResourceProviderAuthenticator {
    auth_info: AuthenticationInfo,
    sessions: Vec<Session>,
}

impl ResourceProviderAuthenticator {
    /// Creates an authenticator with no open sessions.
    #[must_use]
    pub fn new(auth_info: AuthenticationInfo) -> Self {
        Self {
            auth_info,
            sessions: Vec::new(),
        }
    }

    /// Returns the authentication info handed to providers.
    #[must_use]
    pub fn auth_info(&self) -> &AuthenticationInfo {
        &self.auth_info
    }

    /// Logs in to every provider that requires authentication.
    ///
    /// Providers that already have a session are skipped. Sessions opened
    /// before a failure stay open until [`logout`](Self::logout).
    ///
    /// # Errors
    ///
    /// Returns the first login failure.
    pub fn authenticate_all<'a>(
        &mut self,
        handlers: impl IntoIterator<Item = &'a ResourceProviderHandler>,
    ) -> Result<()> {
        for handler in handlers {
            if handler.info().auth_type() == AuthType::Required {
                self.get_or_authenticate(handler)?;
            }
        }
        Ok(())
    }

    /// Returns the session state for a provider, logging in if needed.
    ///
    /// Providers that need no authentication get an empty state and no
    /// session is recorded for them.
    ///
    /// # Errors
    ///
    /// Returns the provider's login failure.
    pub fn get_or_authenticate(&mut self, handler: &ResourceProviderHandler) -> Result<ProviderState> {
        if handler.info().auth_type() == AuthType::No {
            return Ok(ProviderState::empty());
        }
        if let Some(state) = self.session_state(handler.id()) {
            return Ok(state.clone());
        }

        let name = handler.info().display_name();
        let state = handler
            .provider()
            .authenticate(&self.auth_info)
            .map_err(|e| match e {
                Error::Login { reason, .. } => Error::Login {
                    provider: name.to_string(),
                    reason,
                },
                other => other,
            })?;
        log::debug!("Logged in to provider {name}");
        self.sessions.push(Session {
            handler: handler.clone(),
            state: state.clone(),
        });
        Ok(state)
    }

    /// Returns the state of an open session.
    #[must_use]
    pub fn session_state(&self, handler_id: u64) -> Option<&ProviderState> {
        self.sessions
            .iter()
            .find(|s| s.handler.id() == handler_id)
            .map(|s| &s.state)
    }

    /// Returns `true` if a session is open for the handler.
    #[must_use]
    pub fn is_authenticated(&self, handler_id: u64) -> bool {
        self.session_state(handler_id).is_some()
    }

    /// Returns the number of open sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Iterates over the open sessions in the order they were opened.
    pub fn sessions(&self) -> impl Iterator<Item = (&ResourceProviderHandler, &ProviderState)> {
        self.sessions.iter().map(|s| (&s.handler, &s.state))
    }

    /// Closes every open session.
    ///
    /// Every session is attempted even if some fail. The session table is
    /// cleared either way, so a second call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Logout`] listing every provider that failed.
    pub fn logout(&mut self) -> Result<()> {
        let mut failures = Vec::new();
        for session in self.sessions.drain(..) {
            let name = session.handler.info().display_name().to_string();
            match session.handler.provider().logout(&session.state) {
                Ok(()) => log::debug!("Logged out of provider {name}"),
                Err(e) => {
                    log::warn!("Logout of provider {name} failed: {e}");
                    failures.push(LogoutFailure {
                        provider: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Logout { failures })
        }
    }
}
