use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::verifier::SessionUser;
use super::verifier::SessionVerifier;
use crate::domain::session::RoutePolicy;

/// Access requirement of a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    AdminOnly,
}

/// Progress of the session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Authenticated(SessionUser),
    Unauthenticated,
}

/// What a protected view should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView {
    Loading,
    Render(SessionUser),
    Redirect(&'static str),
}

impl GuardView {
    fn resolve(state: &GuardState, access: Access) -> Self {
        match state {
            GuardState::Checking => GuardView::Loading,
            GuardState::Unauthenticated => GuardView::Redirect(RoutePolicy::LOGIN_PATH),
            GuardState::Authenticated(user)
                if access == Access::AdminOnly && !user.role.is_admin() =>
            {
                GuardView::Redirect(RoutePolicy::VERIFY_PATH)
            }
            GuardState::Authenticated(user) => GuardView::Render(user.clone()),
        }
    }
}

/// Client-side guard for protected views.
pub struct SessionGuard;

impl SessionGuard {
    /// Start the one session check for a view being mounted.
    ///
    /// The check runs on its own task. Its outcome is published only while
    /// the returned guard is still mounted.
    pub fn mount<V>(verifier: Arc<V>, access: Access) -> MountedGuard
    where
        V: SessionVerifier + ?Sized,
    {
        let (sender, receiver) = watch::channel(GuardState::Checking);
        let active = Arc::new(AtomicBool::new(true));

        let task = tokio::spawn({
            let active = Arc::clone(&active);
            async move {
                let outcome = match verifier.verify().await {
                    Ok(Some(user)) => GuardState::Authenticated(user),
                    Ok(None) => GuardState::Unauthenticated,
                    Err(e) => {
                        tracing::warn!(error = %e, "Session check failed");
                        GuardState::Unauthenticated
                    }
                };

                let published = sender.send_if_modified(|state| {
                    if !active.load(Ordering::Acquire) {
                        return false;
                    }
                    *state = outcome;
                    true
                });
                if !published {
                    tracing::debug!("Session check finished after unmount, result discarded");
                }
            }
        });

        MountedGuard {
            access,
            state: receiver,
            active,
            task,
        }
    }
}

/// Handle to a mounted guard. Dropping it unmounts.
pub struct MountedGuard {
    access: Access,
    state: watch::Receiver<GuardState>,
    active: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl MountedGuard {
    pub fn state(&self) -> GuardState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> GuardView {
        GuardView::resolve(&self.state.borrow(), self.access)
    }

    /// Wait until the session check settles and return the resulting view.
    ///
    /// Returns `Loading` if the guard was unmounted before the check finished.
    pub async fn settled(&mut self) -> GuardView {
        let access = self.access;
        let settled = self
            .state
            .wait_for(|state| *state != GuardState::Checking)
            .await
            .map(|state| GuardView::resolve(&state, access));
        settled.unwrap_or_else(|_| self.view())
    }

    /// Receiver that observes state changes.
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Cancel the pending check. Any later result is discarded.
    pub fn unmount(&mut self) {
        self.active.store(false, Ordering::Release);
        self.task.abort();
    }
}

impl Drop for MountedGuard {
    fn drop(&mut self) {
        self.unmount();
    }
}
