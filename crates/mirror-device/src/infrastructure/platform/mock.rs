//! Simulated platform for tests and the demo binary.
//!
//! # What does it simulate?
//!
//! - A display with a size and a rotation.  [`MockPlatform::rotate_to`]
//!   turns it: the reported size swaps when the rotation parity flips, and
//!   every registered watcher is called with the raw rotation value on the
//!   calling thread, the way a real window service calls back on its own
//!   binder thread.
//! - Input injection.  The most recent events (up to the history limit,
//!   [`DEFAULT_HISTORY_LIMIT`] by default) are kept so tests can inspect
//!   exactly what reached the "OS" and in what order; a running total counts
//!   all of them.
//! - Screen power and the model name.
//!
//! # Failure switches
//!
//! - `set_unavailable(true)` makes `display_info` and
//!   `register_rotation_watcher` fail with `ServiceUnavailable`.
//! - `set_reject_injection(true)` makes `inject_input_event` return `false`.
//!
//! # Usage in tests
//!
//! ```ignore
//! let platform = Arc::new(MockPlatform::portrait_1080p());
//! let device = Device::open(Arc::clone(&platform) as Arc<dyn PlatformServices>, options)?;
//!
//! platform.rotate_to(1);
//! assert_eq!(device.screen_info().device_size, Size::new(1920, 1080));
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mirror_core::{InjectionMode, InputEvent, Rotation, Size};

use crate::application::platform::{
    DisplayInfo, PlatformError, PlatformServices, RotationWatcher,
};

type SharedWatcher = Arc<dyn Fn(i32) + Send + Sync>;

/// Number of injected events kept unless [`MockPlatform::with_history_limit`]
/// says otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// In-memory [`PlatformServices`] implementation.
pub struct MockPlatform {
    name: String,
    display: Mutex<DisplayInfo>,
    watchers: Mutex<Vec<SharedWatcher>>,
    injected: Mutex<VecDeque<(InputEvent, InjectionMode)>>,
    injected_count: AtomicUsize,
    history_limit: usize,
    screen_on: AtomicBool,
    reject_injection: AtomicBool,
    unavailable: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockPlatform {
    /// Creates a platform whose display currently measures `size` at
    /// `rotation`.
    pub fn new(size: Size, rotation: Rotation) -> Self {
        Self {
            name: "mirror-sim".to_string(),
            display: Mutex::new(DisplayInfo { size, rotation }),
            watchers: Mutex::new(Vec::new()),
            injected: Mutex::new(VecDeque::new()),
            injected_count: AtomicUsize::new(0),
            history_limit: DEFAULT_HISTORY_LIMIT,
            screen_on: AtomicBool::new(true),
            reject_injection: AtomicBool::new(false),
            unavailable: AtomicBool::new(false),
        }
    }

    /// A 1080x1920 phone held upright.
    pub fn portrait_1080p() -> Self {
        Self::new(Size::new(1080, 1920), Rotation::Deg0)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Keeps at most `limit` injected events; older ones are discarded.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Rotates the simulated display and notifies every watcher with `raw`.
    ///
    /// Watchers run after the internal locks are released, so a watcher may
    /// call back into the platform.
    pub fn rotate_to(&self, raw: i32) {
        let rotation = Rotation::from_raw(raw);
        {
            let mut display = lock(&self.display);
            if display.rotation.is_rotated() != rotation.is_rotated() {
                display.size = display.size.rotate();
            }
            display.rotation = rotation;
        }

        let watchers: Vec<SharedWatcher> = lock(&self.watchers).clone();
        for watcher in watchers {
            watcher(raw);
        }
    }

    /// The rotation the simulated display is currently at.
    pub fn rotation(&self) -> Rotation {
        lock(&self.display).rotation
    }

    pub fn watcher_count(&self) -> usize {
        lock(&self.watchers).len()
    }

    /// A copy of the retained injected events, oldest first.
    pub fn injected_events(&self) -> Vec<(InputEvent, InjectionMode)> {
        lock(&self.injected).iter().copied().collect()
    }

    /// Number of events accepted since creation, including discarded ones.
    pub fn injected_count(&self) -> usize {
        self.injected_count.load(Ordering::SeqCst)
    }

    pub fn set_screen_on(&self, on: bool) {
        self.screen_on.store(on, Ordering::SeqCst);
    }

    pub fn set_reject_injection(&self, reject: bool) {
        self.reject_injection.store(reject, Ordering::SeqCst);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self, service: &str) -> Result<(), PlatformError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PlatformError::ServiceUnavailable(service.to_string()));
        }
        Ok(())
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::portrait_1080p()
    }
}

impl PlatformServices for MockPlatform {
    fn display_info(&self) -> Result<DisplayInfo, PlatformError> {
        self.check_available("display")?;
        Ok(*lock(&self.display))
    }

    fn register_rotation_watcher(&self, watcher: RotationWatcher) -> Result<(), PlatformError> {
        self.check_available("window")?;
        lock(&self.watchers).push(Arc::from(watcher));
        Ok(())
    }

    fn inject_input_event(&self, event: &InputEvent, mode: InjectionMode) -> bool {
        if self.reject_injection.load(Ordering::SeqCst) {
            return false;
        }
        self.injected_count.fetch_add(1, Ordering::SeqCst);
        if self.history_limit > 0 {
            let mut injected = lock(&self.injected);
            if injected.len() == self.history_limit {
                injected.pop_front();
            }
            injected.push_back((*event, mode));
        }
        true
    }

    fn is_screen_on(&self) -> bool {
        self.screen_on.load(Ordering::SeqCst)
    }

    fn device_name(&self) -> String {
        self.name.clone()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::{KeyAction, KeyEvent};
    use std::sync::atomic::AtomicI32;

    #[test]
    fn test_display_info_reports_initial_display() {
        let platform = MockPlatform::portrait_1080p();

        let info = platform.display_info().unwrap();

        assert_eq!(info.size, Size::new(1080, 1920));
        assert_eq!(info.rotation, Rotation::Deg0);
    }

    #[test]
    fn test_rotate_to_swaps_size_on_parity_flip_only() {
        // Arrange
        let platform = MockPlatform::portrait_1080p();

        // Act / Assert
        platform.rotate_to(1);
        assert_eq!(platform.display_info().unwrap().size, Size::new(1920, 1080));

        platform.rotate_to(3);
        assert_eq!(platform.display_info().unwrap().size, Size::new(1920, 1080));

        platform.rotate_to(2);
        assert_eq!(platform.display_info().unwrap().size, Size::new(1080, 1920));
        assert_eq!(platform.rotation(), Rotation::Deg180);
    }

    #[test]
    fn test_rotate_to_fires_every_watcher_with_raw_value() {
        // Arrange
        let platform = MockPlatform::portrait_1080p();
        let first = Arc::new(AtomicI32::new(-1));
        let second = Arc::new(AtomicI32::new(-1));
        let (a, b) = (Arc::clone(&first), Arc::clone(&second));
        platform
            .register_rotation_watcher(Box::new(move |raw| a.store(raw, Ordering::SeqCst)))
            .unwrap();
        platform
            .register_rotation_watcher(Box::new(move |raw| b.store(raw, Ordering::SeqCst)))
            .unwrap();

        // Act
        platform.rotate_to(3);

        // Assert
        assert_eq!(platform.watcher_count(), 2);
        assert_eq!(first.load(Ordering::SeqCst), 3);
        assert_eq!(second.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_watcher_may_query_platform_during_notification() {
        let platform = Arc::new(MockPlatform::portrait_1080p());
        let seen = Arc::new(Mutex::new(None));
        let (p, sink) = (Arc::clone(&platform), Arc::clone(&seen));
        platform
            .register_rotation_watcher(Box::new(move |_| {
                *sink.lock().unwrap() = Some(p.display_info().unwrap());
            }))
            .unwrap();

        platform.rotate_to(1);

        let seen = seen.lock().unwrap().expect("watcher ran");
        assert_eq!(seen.size, Size::new(1920, 1080));
    }

    #[test]
    fn test_unavailable_platform_fails_queries() {
        let platform = MockPlatform::portrait_1080p();
        platform.set_unavailable(true);

        assert!(matches!(
            platform.display_info(),
            Err(PlatformError::ServiceUnavailable(_))
        ));
        assert!(platform.register_rotation_watcher(Box::new(|_| {})).is_err());
    }

    #[test]
    fn test_inject_records_events_and_honours_reject_switch() {
        // Arrange
        let platform = MockPlatform::portrait_1080p();
        let event = InputEvent::Key(KeyEvent {
            action: KeyAction::Down,
            keycode: 26,
            repeat: 0,
            meta_state: 0,
        });

        // Act
        let accepted = platform.inject_input_event(&event, InjectionMode::Async);
        platform.set_reject_injection(true);
        let rejected = platform.inject_input_event(&event, InjectionMode::Async);

        // Assert
        assert!(accepted);
        assert!(!rejected);
        assert_eq!(platform.injected_events(), vec![(event, InjectionMode::Async)]);
    }

    #[test]
    fn test_name_and_screen_power_are_configurable() {
        let platform = MockPlatform::portrait_1080p().with_name("Pixel 7");
        platform.set_screen_on(false);

        assert_eq!(platform.device_name(), "Pixel 7");
        assert!(!platform.is_screen_on());
    }

    #[test]
    fn test_injection_history_keeps_only_most_recent_events() {
        // Arrange
        let platform = MockPlatform::portrait_1080p().with_history_limit(2);
        let key = |keycode| {
            InputEvent::Key(KeyEvent {
                action: KeyAction::Down,
                keycode,
                repeat: 0,
                meta_state: 0,
            })
        };

        // Act
        for keycode in 1..=5 {
            assert!(platform.inject_input_event(&key(keycode), InjectionMode::Async));
        }

        // Assert: the total counts everything, the history is bounded
        assert_eq!(platform.injected_count(), 5);
        assert_eq!(
            platform.injected_events(),
            vec![(key(4), InjectionMode::Async), (key(5), InjectionMode::Async)]
        );
    }

    #[test]
    fn test_rejected_injection_is_not_counted() {
        let platform = MockPlatform::portrait_1080p();
        platform.set_reject_injection(true);
        let event = InputEvent::Scroll {
            point: mirror_core::Point::new(0, 0),
            h_scroll: 0,
            v_scroll: 1,
        };

        platform.inject_input_event(&event, InjectionMode::Async);

        assert_eq!(platform.injected_count(), 0);
    }
}
