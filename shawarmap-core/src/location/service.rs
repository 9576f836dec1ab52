//! The location service shared by everything that needs the user's position.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;

use super::error::LocationError;
use super::provider::{LocationProvider, PermissionState, PositionOptions};
use crate::UserLocation;

/// Default pause between fixes while watching.
const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for [`LocationService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationServiceConfig {
    /// Options for [`LocationService::current_location`].
    pub current: PositionOptions,
    /// Options for each fix taken by [`LocationService::watch_location`].
    pub watch: PositionOptions,
    /// Pause between consecutive watch fixes.
    pub watch_interval: Duration,
}

impl Default for LocationServiceConfig {
    fn default() -> Self {
        Self {
            current: PositionOptions::ONE_SHOT,
            watch: PositionOptions::WATCH,
            watch_interval: DEFAULT_WATCH_INTERVAL,
        }
    }
}

impl LocationServiceConfig {
    /// Set the one-shot request options.
    #[must_use]
    pub const fn with_current(mut self, options: PositionOptions) -> Self {
        self.current = options;
        self
    }

    /// Set the per-fix watch options.
    #[must_use]
    pub const fn with_watch(mut self, options: PositionOptions) -> Self {
        self.watch = options;
        self
    }

    /// Set the pause between watch fixes.
    #[must_use]
    pub const fn with_watch_interval(mut self, interval: Duration) -> Self {
        self.watch_interval = interval;
        self
    }
}

/// Receives the results of a continuous watch.
///
/// Failed fixes never end the watch. The default `on_error` logs a warning;
/// override it to route failures elsewhere. Closures taking a
/// [`UserLocation`] implement this trait directly.
pub trait WatchObserver: Send + 'static {
    /// A fresh fix arrived.
    fn on_update(&mut self, location: UserLocation);

    /// A fix failed; the watch keeps running.
    fn on_error(&mut self, error: LocationError) {
        warn!("error watching location: {error}");
    }
}

impl<F> WatchObserver for F
where
    F: FnMut(UserLocation) + Send + 'static,
{
    fn on_update(&mut self, location: UserLocation) {
        self(location);
    }
}

/// Outcome of [`LocationService::watch_location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStart {
    /// No watch was running.
    Started,
    /// A running watch was cancelled and replaced.
    Replaced,
}

/// Mediates access to a [`LocationProvider`].
///
/// Build one per application and share it. The service remembers the most
/// recent successful fix and owns at most one watch task, which is cancelled
/// when the service is dropped.
///
/// Watching spawns onto the ambient Tokio runtime.
///
/// # Examples
///
/// ```
/// use shawarmap_core::{LocationError, LocationService, PermissionState};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let service = LocationService::without_provider();
/// assert_eq!(service.check_permission().await, PermissionState::Prompt);
/// assert_eq!(service.current_location().await, Err(LocationError::Unsupported));
/// # }
/// ```
pub struct LocationService {
    provider: Option<Arc<dyn LocationProvider>>,
    config: LocationServiceConfig,
    last_known: Arc<RwLock<Option<UserLocation>>>,
    watch: Mutex<Option<JoinHandle<()>>>,
}

impl fmt::Debug for LocationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationService")
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LocationProvider>"))
            .field("config", &self.config)
            .field("last_known", &self.last_known_location())
            .field("watching", &self.is_watching())
            .finish()
    }
}

impl LocationService {
    /// Create a service backed by `provider` with default configuration.
    pub fn new<P>(provider: P) -> Self
    where
        P: LocationProvider + 'static,
    {
        Self::with_config(provider, LocationServiceConfig::default())
    }

    /// Create a service backed by `provider` with explicit configuration.
    pub fn with_config<P>(provider: P, config: LocationServiceConfig) -> Self
    where
        P: LocationProvider + 'static,
    {
        let provider: Arc<dyn LocationProvider> = Arc::new(provider);
        Self::from_shared(Some(provider), config)
    }

    /// Create a service for a platform without any location capability.
    ///
    /// Position requests fail with [`LocationError::Unsupported`] and the
    /// permission state is always [`PermissionState::Prompt`].
    #[must_use]
    pub fn without_provider() -> Self {
        Self::from_shared(None, LocationServiceConfig::default())
    }

    /// Create a service from an already shared provider.
    #[must_use]
    pub fn from_shared(
        provider: Option<Arc<dyn LocationProvider>>,
        config: LocationServiceConfig,
    ) -> Self {
        Self {
            provider,
            config,
            last_known: Arc::new(RwLock::new(None)),
            watch: Mutex::new(None),
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &LocationServiceConfig {
        &self.config
    }

    /// Request a single fix and remember it.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Unsupported`] without a provider,
    /// [`LocationError::Timeout`] when the configured timeout elapses, or
    /// whatever the provider reports.
    pub async fn current_location(&self) -> Result<UserLocation, LocationError> {
        let provider = self.provider.as_ref().ok_or(LocationError::Unsupported)?;
        let location = request_fix(provider.as_ref(), &self.config.current).await?;
        debug!("position fix acquired at {}", location.point);
        store(&self.last_known, location);
        Ok(location)
    }

    /// The most recent successful fix, if any.
    #[must_use]
    pub fn last_known_location(&self) -> Option<UserLocation> {
        *self
            .last_known
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a continuous watch delivering fixes to `observer`.
    ///
    /// The first fix is requested immediately, then one per
    /// [`LocationServiceConfig::watch_interval`]. A watch that is already
    /// running is cancelled and replaced.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Unsupported`] without a provider.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn watch_location<O>(&self, observer: O) -> Result<WatchStart, LocationError>
    where
        O: WatchObserver,
    {
        let provider = Arc::clone(self.provider.as_ref().ok_or(LocationError::Unsupported)?);
        let task = tokio::spawn(run_watch(
            provider,
            self.config.watch,
            self.config.watch_interval,
            Arc::clone(&self.last_known),
            observer,
        ));
        let previous = lock(&self.watch).replace(task);
        match previous {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                warn!("location watch replaced; the previous subscription was cancelled");
                Ok(WatchStart::Replaced)
            }
            _ => Ok(WatchStart::Started),
        }
    }

    /// Cancel the running watch. Does nothing when none is active.
    pub fn stop_watching(&self) {
        if let Some(handle) = lock(&self.watch).take() {
            handle.abort();
            debug!("location watch stopped");
        }
    }

    /// Whether a watch task is currently running.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        lock(&self.watch)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Query the provider's permission state.
    ///
    /// Falls back to [`PermissionState::Prompt`] when there is no provider,
    /// the provider cannot answer, or the query fails, so callers ask
    /// explicitly instead of assuming either outcome.
    pub async fn check_permission(&self) -> PermissionState {
        let Some(provider) = self.provider.as_ref() else {
            debug!("no location provider; assuming permission prompt");
            return PermissionState::Prompt;
        };
        match provider.permission_state().await {
            Ok(state) => state,
            Err(err) => {
                debug!("permission state unknown ({err}); assuming prompt");
                PermissionState::Prompt
            }
        }
    }
}

impl Drop for LocationService {
    fn drop(&mut self) {
        self.stop_watching();
    }
}

async fn request_fix(
    provider: &dyn LocationProvider,
    options: &PositionOptions,
) -> Result<UserLocation, LocationError> {
    match tokio::time::timeout(options.timeout, provider.current_position(options)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(LocationError::Timeout),
    }
}

async fn run_watch<O>(
    provider: Arc<dyn LocationProvider>,
    options: PositionOptions,
    interval: Duration,
    last_known: Arc<RwLock<Option<UserLocation>>>,
    mut observer: O,
) where
    O: WatchObserver,
{
    loop {
        match request_fix(provider.as_ref(), &options).await {
            Ok(location) => {
                store(&last_known, location);
                observer.on_update(location);
            }
            Err(error) => observer.on_error(error),
        }
        tokio::time::sleep(interval).await;
    }
}

fn store(slot: &RwLock<Option<UserLocation>>, location: UserLocation) {
    *slot.write().unwrap_or_else(PoisonError::into_inner) = Some(location);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
