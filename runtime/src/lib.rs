//! # Rifa Runtime
//!
//! Runtime implementation for the rifa client architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **`EffectHandle`**: Completion tracking for the effects of one dispatched action
//!
//! ## Example
//!
//! ```ignore
//! use rifa_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and wait for its effects
//! let mut handle = store.send(Action::DoSomething).await?;
//! handle.wait().await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field.clone()).await;
//! ```

use rifa_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for terminal action
        ///
        /// Returned by `send_and_wait_for` when the timeout expires before
        /// a matching action is received.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed
        ///
        /// The action broadcast channel was closed, typically because the
        /// store is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects spawned by
/// one action to finish. Feedback actions dispatched by those effects run
/// through the reducer *before* the handle completes, so waiting on the
/// handle is enough to observe the post-feedback state. Effects spawned by
/// the feedback actions themselves are tracked by their own handles.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful for initialization in loops where a `last_handle` is threaded
    /// through iterations.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Wait for all effects to complete
    ///
    /// Blocks until the effect counter reaches zero.
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Notifier dropped with effects still counted: every tracking
                // clone has been dropped, so nothing is running anymore.
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: tracking state shared between a handle and its effect tasks
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Ensures the counter is always decremented, even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct PendingGuard(Arc<AtomicUsize>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(
///     WizardState::default(),
///     WizardReducer::new(config),
///     live_environment(client),
/// );
///
/// store.send(WizardAction::Open).await?;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Action broadcast channel for observing actions produced by effects.
    ///
    /// Only feedback actions are broadcast (never the initially dispatched
    /// action). This is what `send_and_wait_for` subscribes to.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// The action broadcast capacity defaults to 16; increase it with
    /// [`Store::with_broadcast_capacity`] if observers frequently lag.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
    }

    /// Create a new Store with a custom action broadcast capacity
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires write lock on state
    /// 2. Calls reducer with (state, action, environment)
    /// 3. Executes returned effects asynchronously
    /// 4. Effects may produce more actions (feedback loop)
    ///
    /// `send()` returns after *starting* effect execution; use the returned
    /// [`EffectHandle`] to wait for completion. Multiple concurrent `send()`
    /// calls serialize at the reducer level.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(StoreError::ShutdownInProgress);
        }

        metrics::counter!("store.actions").increment(1);

        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.environment)
        };

        let (handle, tracking) = EffectHandle::new();
        for effect in effects {
            self.spawn_effect(effect, &tracking);
        }

        Ok(handle)
    }

    /// Send an action and wait for a matching feedback action
    ///
    /// Designed for request-response flows: subscribe to the action
    /// broadcast *before* sending (avoiding the race where the feedback
    /// arrives first), send the initial action, then wait for the first
    /// feedback action matching the predicate.
    ///
    /// Only actions produced by effects are broadcast, not the initial
    /// action.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: timeout expired before a matching action
    /// - [`StoreError::ChannelClosed`]: broadcast channel closed
    /// - [`StoreError::ShutdownInProgress`]: store is shutting down
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        let mut rx = self.action_broadcast.subscribe();

        self.send(action).await?;

        tokio::time::timeout(timeout, async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Action broadcast lagged, observer skipped actions");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Subscribe to feedback actions produced by effects
    ///
    /// Useful for observers that mirror actions elsewhere (an [`ActionLog`],
    /// a UI event stream). Slow observers may lag and miss actions.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Read a projection of the current state
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Number of effects currently running
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.pending_effects.load(Ordering::Acquire)
    }

    /// Initiate graceful shutdown of the store
    ///
    /// Sets the shutdown flag (rejecting new actions), then waits for
    /// pending effects to complete.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before
    /// all pending effects complete.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("Initiating graceful shutdown");
        metrics::counter!("store.shutdown.initiated").increment(1);

        self.shutdown.store(true, Ordering::Release);

        let start = tokio::time::Instant::now();
        let poll_interval = Duration::from_millis(100);

        loop {
            let pending = self.pending_effects.load(Ordering::Acquire);

            if pending == 0 {
                metrics::counter!("store.shutdown.completed").increment(1);
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending, "Shutdown timeout with effects still running");
                metrics::counter!("store.shutdown.timeout").increment(1);
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Spawn one top-level effect onto the runtime
    ///
    /// `Parallel` fans out into sibling tasks; everything else becomes a
    /// single task. Counters are incremented *before* spawning so a handle
    /// obtained from `send()` never observes a transient zero.
    fn spawn_effect(&self, effect: Effect<A>, tracking: &EffectTracking) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                for inner in effects {
                    self.spawn_effect(inner, tracking);
                }
            },
            effect @ (Effect::Sequential(_) | Effect::Delay { .. } | Effect::Future(_)) => {
                tracking.increment();
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                metrics::counter!("store.effects.spawned").increment(1);

                let store = self.clone();
                let guard = DecrementGuard(tracking.clone());
                let pending = PendingGuard(Arc::clone(&self.pending_effects));
                tokio::spawn(async move {
                    let _guard = guard;
                    let _pending = pending;
                    store.run_effect(effect).await;
                    metrics::counter!("store.effects.completed").increment(1);
                });
            },
        }
    }

    /// Run one effect to completion within the current task
    async fn run_effect(&self, effect: Effect<A>) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                let runs = effects
                    .into_iter()
                    .map(|inner| Box::pin(self.run_effect(inner)));
                futures::future::join_all(runs).await;
            },
            Effect::Sequential(effects) => {
                for inner in effects {
                    Box::pin(self.run_effect(inner)).await;
                }
            },
            Effect::Delay { duration, action } => {
                tokio::time::sleep(duration).await;
                self.feed_back(*action).await;
            },
            Effect::Future(fut) => {
                if let Some(action) = fut.await {
                    self.feed_back(action).await;
                }
            },
        }
    }

    /// Dispatch a feedback action produced by an effect
    ///
    /// The action is broadcast to observers, then run through the reducer.
    /// Effects it produces are tracked by a fresh handle, not the one that
    /// spawned this effect.
    async fn feed_back(&self, action: A) {
        let _ = self.action_broadcast.send(action.clone());

        if let Err(error) = Box::pin(self.send(action)).await {
            metrics::counter!("store.feedback.rejected").increment(1);
            tracing::warn!(%error, "Feedback action rejected");
        }
    }
}

/// A bounded FIFO of recently observed actions, for diagnostics in tests and
/// the demo binary
///
/// The broadcast channel drops actions for lagging observers; when a test
/// needs every feedback action, it can drain one of these instead.
#[derive(Debug)]
pub struct ActionLog<A> {
    entries: std::sync::Mutex<VecDeque<A>>,
    max_entries: usize,
}

impl<A> ActionLog<A> {
    /// Create a log retaining at most `max_entries` actions
    #[must_use]
    pub const fn new(max_entries: usize) -> Self {
        Self {
            entries: std::sync::Mutex::new(VecDeque::new()),
            max_entries,
        }
    }

    /// Record an action, dropping the oldest entry when full
    pub fn record(&self, action: A) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(action);
    }

    /// Drain all recorded actions in arrival order
    pub fn drain(&self) -> Vec<A> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Number of recorded actions
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rifa_core::{SmallVec, smallvec};

    #[derive(Debug, Clone, Default)]
    struct PingState {
        pings: u32,
        pongs: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum PingAction {
        Ping,
        Pong,
    }

    #[derive(Clone)]
    struct PingReducer;

    impl Reducer for PingReducer {
        type State = PingState;
        type Action = PingAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                PingAction::Ping => {
                    state.pings += 1;
                    smallvec![Effect::future(async { Some(PingAction::Pong) })]
                },
                PingAction::Pong => {
                    state.pongs += 1;
                    smallvec![Effect::None]
                },
            }
        }
    }

    #[tokio::test]
    async fn send_runs_reducer_and_effects() {
        let store = Store::new(PingState::default(), PingReducer, ());

        let mut handle = store.send(PingAction::Ping).await.unwrap();
        handle.wait().await;

        let (pings, pongs) = store.state(|s| (s.pings, s.pongs)).await;
        assert_eq!(pings, 1);
        assert_eq!(pongs, 1);
    }

    #[tokio::test]
    async fn send_and_wait_for_observes_feedback() {
        let store = Store::new(PingState::default(), PingReducer, ());

        let result = store
            .send_and_wait_for(
                PingAction::Ping,
                |a| matches!(a, PingAction::Pong),
                Duration::from_secs(1),
            )
            .await
            .unwrap();

        assert_eq!(result, PingAction::Pong);
    }

    #[tokio::test]
    async fn shutdown_rejects_new_actions() {
        let store = Store::new(PingState::default(), PingReducer, ());

        store.shutdown(Duration::from_secs(1)).await.unwrap();

        assert!(matches!(
            store.send(PingAction::Ping).await,
            Err(StoreError::ShutdownInProgress)
        ));
    }

    #[tokio::test]
    async fn delay_effect_dispatches_after_sleep() {
        #[derive(Clone)]
        struct DelayReducer;

        impl Reducer for DelayReducer {
            type State = PingState;
            type Action = PingAction;
            type Environment = ();

            fn reduce(
                &self,
                state: &mut Self::State,
                action: Self::Action,
                _env: &Self::Environment,
            ) -> SmallVec<[Effect<Self::Action>; 4]> {
                match action {
                    PingAction::Ping => {
                        state.pings += 1;
                        smallvec![Effect::Delay {
                            duration: Duration::from_millis(10),
                            action: Box::new(PingAction::Pong),
                        }]
                    },
                    PingAction::Pong => {
                        state.pongs += 1;
                        smallvec![Effect::None]
                    },
                }
            }
        }

        let store = Store::new(PingState::default(), DelayReducer, ());
        let mut handle = store.send(PingAction::Ping).await.unwrap();
        handle.wait().await;

        assert_eq!(store.state(|s| s.pongs).await, 1);
    }

    #[test]
    fn completed_handle_waits_instantly() {
        let mut handle = EffectHandle::completed();
        tokio_test::block_on(handle.wait());
    }

    #[test]
    fn action_log_caps_entries() {
        let log = ActionLog::new(2);
        log.record(1);
        log.record(2);
        log.record(3);
        assert_eq!(log.drain(), vec![2, 3]);
        assert!(log.is_empty());
    }
}
