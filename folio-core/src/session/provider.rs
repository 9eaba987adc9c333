//! Session provider and read-only consumer handles.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{Resolution, SessionService, SessionState};
use crate::error::{Error, Result};
use crate::types::Session;

/// Owns the session state cell and the background work that feeds it.
///
/// Only the provider writes to the cell. Consumers get a [`SessionHandle`]
/// through [`SessionProvider::subscribe`].
pub struct SessionProvider {
    service: Arc<dyn SessionService>,
    state: Arc<watch::Sender<SessionState>>,
    mounted: AtomicBool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SessionProvider {
    /// Create an unmounted provider backed by `service`.
    pub fn new<S: SessionService + 'static>(service: S) -> Self {
        Self::with_service(Arc::new(service))
    }

    /// Create an unmounted provider from a shared service.
    pub fn with_service(service: Arc<dyn SessionService>) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            service,
            state: Arc::new(state),
            mounted: AtomicBool::new(false),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Start the one session fetch for this provider.
    ///
    /// Returns `false` without issuing a request when the provider was already
    /// mounted. Must be called from within a tokio runtime; without one the
    /// state resolves to `FetchFailed`.
    pub fn mount(&self) -> bool {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("Session provider already mounted, skipping fetch");
            return false;
        }

        self.state.send_replace(SessionState::Loading);

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        let spawned = self.spawn(async move {
            let resolution = Resolution::from_fetch(service.fetch_session().await);
            match &resolution {
                Resolution::Authenticated(session) => {
                    info!("Session resolved for user {}", session.id)
                }
                Resolution::Anonymous => debug!("Session resolved as anonymous"),
                Resolution::FetchFailed(reason) => warn!("Session fetch failed: {}", reason),
            }

            let applied = state.send_if_modified(|current| {
                if matches!(current, SessionState::Loading) {
                    *current = SessionState::resolved(resolution);
                    true
                } else {
                    false
                }
            });
            if !applied {
                debug!("Session changed while fetching, dropping fetch result");
            }
        });

        if !spawned {
            self.state.send_replace(SessionState::resolved(Resolution::FetchFailed(
                "no async runtime available".into(),
            )));
        }
        true
    }

    /// Log out locally, then invalidate the remote session in the background.
    ///
    /// The local state is `Resolved(Anonymous)` when this returns. The outcome
    /// of the remote call is only logged. A later `mount()` issues no fetch.
    pub fn logout(&self) {
        self.mounted.store(true, Ordering::SeqCst);
        self.state
            .send_replace(SessionState::resolved(Resolution::Anonymous));
        info!("Logged out locally");

        let service = Arc::clone(&self.service);
        self.spawn(async move {
            match service.invalidate_session().await {
                Ok(()) => debug!("Remote session invalidated"),
                Err(e) => warn!("Failed to invalidate remote session: {}", e),
            }
        });
    }

    /// Current principal, `None` unless the state is `Resolved(Authenticated)`.
    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Hand out a read-only view of the session.
    pub fn subscribe(&self) -> SessionHandle {
        SessionHandle {
            rx: self.state.subscribe(),
        }
    }

    /// Wait for every background task this provider started.
    pub async fn settle(&self) {
        loop {
            let pending = {
                let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
                std::mem::take(&mut *tasks)
            };
            if pending.is_empty() {
                break;
            }
            for task in pending {
                if let Err(e) = task.await {
                    warn!("Session task ended abnormally: {}", e);
                }
            }
        }
    }

    fn spawn<F>(&self, future: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("Cannot start session task: {}", e);
                return false;
            }
        };

        let handle = runtime.spawn(future);
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
        true
    }
}

/// Read-only, cloneable view of the provider's session state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Current principal. `None` before initialization completes.
    pub fn current_session(&self) -> Option<Session> {
        self.rx.borrow().session().cloned()
    }

    pub fn state(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().session().is_some()
    }

    /// Wait for the next state change.
    pub async fn changed(&mut self) -> Result<()> {
        self.rx
            .changed()
            .await
            .map_err(|_| Error::Other("Session provider dropped".into()))
    }

    /// Wait until the state is resolved and return the resolution.
    pub async fn wait_resolved(&mut self) -> Result<Resolution> {
        let state = self
            .rx
            .wait_for(SessionState::is_resolved)
            .await
            .map_err(|_| Error::Other("Session provider dropped".into()))?;

        Ok(state
            .resolution()
            .cloned()
            .unwrap_or(Resolution::Anonymous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    #[derive(Clone)]
    enum Reply {
        Principal(Session),
        Anonymous,
        Unauthorized,
        Fail,
    }

    #[derive(Clone)]
    struct StubService {
        reply: Reply,
        fail_invalidate: bool,
        gate: Option<Arc<Notify>>,
        fetches: Arc<AtomicUsize>,
        invalidations: Arc<AtomicUsize>,
    }

    impl StubService {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                fail_invalidate: false,
                gate: None,
                fetches: Arc::new(AtomicUsize::new(0)),
                invalidations: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn gated(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn failing_invalidate(mut self) -> Self {
            self.fail_invalidate = true;
            self
        }
    }

    #[async_trait]
    impl SessionService for StubService {
        async fn fetch_session(&self) -> Result<Option<Session>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match &self.reply {
                Reply::Principal(session) => Ok(Some(session.clone())),
                Reply::Anonymous => Ok(None),
                Reply::Unauthorized => Err(Error::Unauthorized),
                Reply::Fail => Err(Error::Http("connection refused".into())),
            }
        }

        async fn invalidate_session(&self) -> Result<()> {
            self.invalidations.fetch_add(1, Ordering::SeqCst);
            if self.fail_invalidate {
                Err(Error::api(500, "boom"))
            } else {
                Ok(())
            }
        }
    }

    fn principal() -> Session {
        Session {
            id: "1001".into(),
            email: "choi@example.com".into(),
            nickname: "choi".into(),
            is_logged_in: true,
        }
    }

    #[tokio::test]
    async fn test_principal_is_exposed_after_mount() {
        let provider = SessionProvider::new(StubService::new(Reply::Principal(principal())));

        assert!(provider.mount());
        provider.settle().await;

        assert_eq!(provider.current_session(), Some(principal()));
        assert_eq!(provider.state().label(), "authenticated");
    }

    #[tokio::test]
    async fn test_anonymous_and_failed_fetches_expose_no_session() {
        for reply in [Reply::Anonymous, Reply::Unauthorized] {
            let provider = SessionProvider::new(StubService::new(reply));
            provider.mount();
            provider.settle().await;

            assert!(provider.current_session().is_none());
            assert_eq!(provider.state().label(), "anonymous");
        }

        let provider = SessionProvider::new(StubService::new(Reply::Fail));
        provider.mount();
        provider.settle().await;

        assert!(provider.current_session().is_none());
        assert!(matches!(
            provider.state().resolution(),
            Some(Resolution::FetchFailed(reason)) if reason.contains("connection refused")
        ));
    }

    #[tokio::test]
    async fn test_session_is_none_before_initialization_completes() {
        let gate = Arc::new(Notify::new());
        let provider = SessionProvider::new(
            StubService::new(Reply::Principal(principal())).gated(Arc::clone(&gate)),
        );
        let handle = provider.subscribe();

        assert!(handle.current_session().is_none());
        assert_eq!(handle.state(), SessionState::Uninitialized);

        provider.mount();
        assert!(handle.current_session().is_none());
        assert_eq!(handle.state(), SessionState::Loading);

        gate.notify_one();
        provider.settle().await;
        assert_eq!(handle.current_session(), Some(principal()));
    }

    #[tokio::test]
    async fn test_mount_issues_exactly_one_fetch() {
        let service = StubService::new(Reply::Principal(principal()));
        let fetches = Arc::clone(&service.fetches);
        let provider = SessionProvider::new(service);

        assert!(provider.mount());
        assert!(!provider.mount());
        provider.settle().await;
        assert!(!provider.mount());
        provider.settle().await;

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_session_synchronously_even_if_invalidation_fails() {
        let service = StubService::new(Reply::Principal(principal())).failing_invalidate();
        let invalidations = Arc::clone(&service.invalidations);
        let provider = SessionProvider::new(service);
        provider.mount();
        provider.settle().await;
        assert!(provider.current_session().is_some());

        provider.logout();
        assert!(provider.current_session().is_none());
        assert_eq!(provider.state().label(), "anonymous");

        provider.settle().await;
        assert!(provider.current_session().is_none());
        assert_eq!(invalidations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_logout_during_fetch_wins() {
        let gate = Arc::new(Notify::new());
        let provider = SessionProvider::new(
            StubService::new(Reply::Principal(principal())).gated(Arc::clone(&gate)),
        );

        provider.mount();
        provider.logout();
        gate.notify_one();
        provider.settle().await;

        assert!(provider.current_session().is_none());
        assert_eq!(provider.state().label(), "anonymous");
    }

    #[tokio::test]
    async fn test_logout_before_mount_sticks() {
        let service = StubService::new(Reply::Principal(principal()));
        let fetches = Arc::clone(&service.fetches);
        let invalidations = Arc::clone(&service.invalidations);
        let provider = SessionProvider::new(service);

        provider.logout();
        assert!(!provider.mount());
        provider.settle().await;

        assert!(provider.current_session().is_none());
        assert_eq!(provider.state().label(), "anonymous");
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
        assert_eq!(invalidations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handles_observe_changes() {
        let gate = Arc::new(Notify::new());
        let provider = SessionProvider::new(
            StubService::new(Reply::Principal(principal())).gated(Arc::clone(&gate)),
        );
        let mut handle = provider.subscribe();

        provider.mount();
        gate.notify_one();

        let resolution = handle.wait_resolved().await.unwrap();
        assert_eq!(resolution, Resolution::Authenticated(principal()));
        assert!(handle.is_authenticated());

        provider.logout();
        handle.changed().await.unwrap();
        assert!(!handle.is_authenticated());
        provider.settle().await;
    }

    #[tokio::test]
    async fn test_handle_reports_dropped_provider() {
        let provider = SessionProvider::new(StubService::new(Reply::Anonymous));
        let mut handle = provider.subscribe();
        drop(provider);

        assert!(handle.changed().await.is_err());
        assert!(handle.current_session().is_none());
    }

    #[test]
    fn test_mount_without_runtime_resolves_as_failed() {
        let service = StubService::new(Reply::Principal(principal()));
        let fetches = Arc::clone(&service.fetches);
        let provider = SessionProvider::new(service);

        provider.mount();

        assert!(provider.current_session().is_none());
        assert_eq!(provider.state().label(), "fetch-failed");
        assert_eq!(fetches.load(Ordering::SeqCst), 0);
    }
}
