// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A button that shows a wait indicator while its action runs.
//!
//! The indicator goes through these states. The two delayed transitions are driven by
//! timer tasks on the tokio runtime, which deliver a [`ButtonSignal`] to the event loop
//! that owns the button. The event loop hands it back via [`Button::apply_signal`].
//!
//! ```text
//! start_waiting()        +wait_start_delay           stop_waiting()    +wait_end_delay
//!       │                      │                          │                  │
//!       ▼                      ▼                          ▼                  ▼
//! ┌───────────┐  signal  ┌────────────────┐         ┌───────────┐ signal ┌────────┐
//! │ waiting   │ ───────▶ │ waiting        │ ──────▶ │ has_ended │ ─────▶ │ idle   │
//! │           │          │ + has_started  │         │ (fading)  │        │        │
//! └───────────┘          └────────────────┘         └───────────┘        └────────┘
//! ```

use tokio::{sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
            task::JoinHandle};

use super::{ButtonConfig, PointerClick};

/// Enable or disable debug logging for the button wait indicator.
pub const DEBUG_BUTTON_MOD: bool = true;

/// Delivered by a task the button spawned. The `generation` ties the signal to the task
/// that sent it, so a signal from a cancelled timer is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonSignal {
    WaitingHasStarted { generation: u64 },
    WaitingHasEnded { generation: u64 },
    /// The action started by [`Button::click_async`] has completed, successfully or not.
    ActionFinished { generation: u64 },
}

/// What the renderer should show for the wait indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitIndicatorView {
    pub visible: bool,
    /// The "shown" transition has started.
    pub after_show: bool,
}

#[derive(Debug)]
pub struct Button {
    config: ButtonConfig,
    disabled: bool,
    /// Last value passed to [`Button::set_wait`].
    wait_prop: bool,
    waiting: bool,
    waiting_has_started: bool,
    waiting_has_ended: bool,
    is_mounted: bool,
    generation: u64,
    maybe_pending_start: Option<PendingTimer>,
    maybe_pending_end: Option<PendingTimer>,
    /// Generation of the running [`Button::click_async`] action.
    maybe_pending_action: Option<u64>,
    signal_sender: UnboundedSender<ButtonSignal>,
}

#[derive(Debug)]
struct PendingTimer {
    generation: u64,
    maybe_handle: Option<JoinHandle<()>>,
}

impl PendingTimer {
    fn cancel(self) {
        if let Some(handle) = self.maybe_handle {
            handle.abort();
        }
    }
}

impl Drop for Button {
    fn drop(&mut self) { self.cancel_timers(); }
}

impl Button {
    /// Returns the button and the receiving end of its signal channel. The event loop
    /// that owns the button should poll the receiver and pass every signal to
    /// [`Button::apply_signal`].
    pub fn new(config: ButtonConfig) -> (Self, UnboundedReceiver<ButtonSignal>) {
        let (signal_sender, signal_receiver) = unbounded_channel();
        let it = Self {
            config,
            disabled: false,
            wait_prop: false,
            waiting: false,
            waiting_has_started: false,
            waiting_has_ended: false,
            is_mounted: true,
            generation: 0,
            maybe_pending_start: None,
            maybe_pending_end: None,
            maybe_pending_action: None,
            signal_sender,
        };
        (it, signal_receiver)
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Initial `wait` value. The button starts out waiting, without any transition.
    #[must_use]
    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait_prop = wait;
        self.waiting = wait;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) { self.disabled = disabled; }

    pub fn is_disabled(&self) -> bool { self.disabled }

    pub fn is_waiting(&self) -> bool { self.waiting }

    pub fn waiting_has_started(&self) -> bool { self.waiting_has_started }

    pub fn waiting_has_ended(&self) -> bool { self.waiting_has_ended }

    pub fn is_mounted(&self) -> bool { self.is_mounted }

    /// A button can be clicked when it is neither waiting nor disabled.
    pub fn is_interactive(&self) -> bool { !self.waiting && !self.disabled }

    pub fn wait_indicator(&self) -> WaitIndicatorView {
        WaitIndicatorView {
            visible: self.waiting || self.waiting_has_ended,
            after_show: self.waiting_has_started,
        }
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Wait indicator                                                      │
    // └─────────────────────────────────────────────────────────────────────┘

    pub fn start_waiting(&mut self) {
        self.cancel_timers();

        self.waiting = true;
        self.waiting_has_started = false;
        self.waiting_has_ended = false;

        let pending = self.schedule(self.config.wait_start_delay(), |generation| {
            ButtonSignal::WaitingHasStarted { generation }
        });
        self.maybe_pending_start = Some(pending);

        DEBUG_BUTTON_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "button start waiting", generation = %self.generation);
        });
    }

    pub fn stop_waiting(&mut self) {
        if let Some(pending) = self.maybe_pending_start.take() {
            pending.cancel();
        }

        self.waiting = false;
        self.waiting_has_started = false;
        self.waiting_has_ended = true;

        if let Some(pending) = self.maybe_pending_end.take() {
            pending.cancel();
        }
        let pending = self.schedule(self.config.wait_end_delay(), |generation| {
            ButtonSignal::WaitingHasEnded { generation }
        });
        self.maybe_pending_end = Some(pending);

        DEBUG_BUTTON_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "button stop waiting", generation = %self.generation);
        });
    }

    /// Edge triggered: only a change of `wait` starts or stops waiting.
    pub fn set_wait(&mut self, wait: bool) {
        match (self.wait_prop, wait) {
            (false, true) => self.start_waiting(),
            (true, false) => self.stop_waiting(),
            _ => {}
        }
        self.wait_prop = wait;
    }

    /// Applies a signal delivered by a timer task. Returns `true` if the button changed
    /// (and needs a render). Signals are ignored after [`Button::unmount`], and when the
    /// timer that sent them was cancelled.
    pub fn apply_signal(&mut self, signal: ButtonSignal) -> bool {
        if !self.is_mounted {
            return false;
        }

        let applied = match signal {
            ButtonSignal::WaitingHasStarted { generation } => {
                if take_if_current(&mut self.maybe_pending_start, generation) {
                    self.waiting_has_started = true;
                    true
                } else {
                    false
                }
            }
            ButtonSignal::WaitingHasEnded { generation } => {
                if take_if_current(&mut self.maybe_pending_end, generation) {
                    self.waiting_has_ended = false;
                    true
                } else {
                    false
                }
            }
            ButtonSignal::ActionFinished { generation } => {
                if self.maybe_pending_action == Some(generation) {
                    self.maybe_pending_action = None;
                    self.stop_waiting();
                    true
                } else {
                    false
                }
            }
        };

        DEBUG_BUTTON_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "button apply signal", signal = ?signal, applied = %applied);
        });

        applied
    }

    /// Cancels all timers. The button ignores every signal from now on.
    pub fn unmount(&mut self) {
        self.is_mounted = false;
        self.cancel_timers();
    }

    fn cancel_timers(&mut self) {
        if let Some(pending) = self.maybe_pending_start.take() {
            pending.cancel();
        }
        if let Some(pending) = self.maybe_pending_end.take() {
            pending.cancel();
        }
    }

    /// Spawns a timer task that sends one signal after `delay`. Outside of a tokio
    /// runtime there is nothing to drive the timer, so the signal is sent right away.
    fn schedule(
        &mut self,
        delay: std::time::Duration,
        make_signal: impl FnOnce(u64) -> ButtonSignal,
    ) -> PendingTimer {
        self.generation += 1;
        let generation = self.generation;
        let signal = make_signal(generation);
        let sender = self.signal_sender.clone();

        let maybe_handle = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => Some(runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                // The receiver is gone when the event loop has shut down.
                let _unused = sender.send(signal);
            })),
            Err(_) => {
                let _unused = sender.send(signal);
                None
            }
        };

        PendingTimer {
            generation,
            maybe_handle,
        }
    }

    // ┌─────────────────────────────────────────────────────────────────────┐
    // │ Clicks                                                              │
    // └─────────────────────────────────────────────────────────────────────┘

    /// Runs `action` unless the button is waiting or disabled. Returns `true` if it ran.
    pub fn click(&mut self, action: impl FnOnce()) -> bool {
        if !self.is_interactive() {
            return false;
        }
        action();
        true
    }

    /// Starts waiting and spawns the future returned by `action`. The button is not
    /// borrowed while the action runs: the event loop keeps applying signals, and
    /// [`ButtonSignal::ActionFinished`] stops waiting once the future completes, whatever
    /// its output. Returns `false` if the button is waiting or disabled, or if there is no
    /// tokio runtime to run the action on.
    pub fn click_async<Fut>(&mut self, action: impl FnOnce() -> Fut) -> bool
    where
        Fut: Future + Send + 'static,
    {
        if !self.is_interactive() {
            return false;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return false;
        };

        self.start_waiting();

        self.generation += 1;
        let generation = self.generation;
        self.maybe_pending_action = Some(generation);

        let future = action();
        let sender = self.signal_sender.clone();
        // The action is not aborted on unmount, its signal is ignored instead.
        let _unused = runtime.spawn(async move {
            let _unused = future.await;
            let _unused = sender.send(ButtonSignal::ActionFinished { generation });
        });

        DEBUG_BUTTON_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "button click async", generation = %generation);
        });

        true
    }

    /// A click on a button rendered as a link. Returns `true` if `action` ran. When this
    /// returns `false`, the renderer should let the link navigate as usual.
    pub fn on_link_click(&mut self, click: PointerClick, action: impl FnOnce()) -> bool {
        if !click.activates_link() {
            return false;
        }
        self.click(action)
    }
}

fn take_if_current(maybe_pending: &mut Option<PendingTimer>, generation: u64) -> bool {
    match maybe_pending {
        Some(pending) if pending.generation == generation => {
            *maybe_pending = None;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::{Instant, sleep};

    use super::*;
    use crate::{DEFAULT_WAIT_END_DELAY_MS, DEFAULT_WAIT_START_DELAY_MS, ModifierKeysMask,
                assert_eq2};

    #[tokio::test(start_paused = true)]
    async fn test_start_waiting_then_signal_after_delay() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        let start = Instant::now();

        button.start_waiting();
        assert!(button.is_waiting());
        assert!(!button.waiting_has_started());
        assert!(!button.is_interactive());
        assert_eq2!(
            button.wait_indicator(),
            WaitIndicatorView {
                visible: true,
                after_show: false
            }
        );

        let signal = receiver.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(DEFAULT_WAIT_START_DELAY_MS));
        assert!(matches!(signal, ButtonSignal::WaitingHasStarted { .. }));
        assert!(button.apply_signal(signal));
        assert!(button.waiting_has_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_waiting_lingers_then_hides() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        button.start_waiting();
        let started = receiver.recv().await.unwrap();
        button.apply_signal(started);

        let stop_time = Instant::now();
        button.stop_waiting();
        assert!(!button.is_waiting());
        assert!(!button.waiting_has_started());
        assert!(button.waiting_has_ended());
        assert!(button.wait_indicator().visible);

        let ended = receiver.recv().await.unwrap();
        assert!(stop_time.elapsed() >= Duration::from_millis(DEFAULT_WAIT_END_DELAY_MS));
        assert!(button.apply_signal(ended));
        assert!(!button.waiting_has_ended());
        assert!(!button.wait_indicator().visible);
        assert!(button.is_interactive());
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_from_cancelled_timer_is_ignored() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        button.start_waiting();

        // Let the start timer fire, but don't apply its signal yet.
        sleep(Duration::from_millis(20)).await;
        button.stop_waiting();

        let stale = receiver.recv().await.unwrap();
        assert!(matches!(stale, ButtonSignal::WaitingHasStarted { .. }));
        assert!(!button.apply_signal(stale));
        assert!(!button.waiting_has_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_pending_start_timer() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        button.start_waiting();
        button.stop_waiting();

        // Only the end signal arrives.
        let signal = receiver.recv().await.unwrap();
        assert!(matches!(signal, ButtonSignal::WaitingHasEnded { .. }));
        sleep(Duration::from_secs(1)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_cancels_timers() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        button.start_waiting();
        button.unmount();

        sleep(Duration::from_secs(1)).await;
        assert!(receiver.try_recv().is_err());
        assert!(!button.apply_signal(ButtonSignal::WaitingHasStarted { generation: 1 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timers() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        button.start_waiting();
        drop(button);

        // The sender is dropped along with the button and the aborted task.
        sleep(Duration::from_secs(1)).await;
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_wait_is_edge_triggered() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        button.set_wait(true);
        assert!(button.is_waiting());
        // No edge, no new timer.
        button.set_wait(true);

        button.set_wait(false);
        assert!(!button.is_waiting());
        assert!(button.waiting_has_ended());

        let signal = receiver.recv().await.unwrap();
        assert!(matches!(signal, ButtonSignal::WaitingHasEnded { .. }));
        sleep(Duration::from_secs(1)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_initial_wait_has_no_transition() {
        let (button, _receiver) = Button::new(ButtonConfig::default());
        let button = button.with_wait(true);
        assert!(button.is_waiting());
        assert!(!button.waiting_has_started());
    }

    #[test]
    fn test_click_ignored_when_disabled_or_waiting() {
        let (button, _receiver) = Button::new(ButtonConfig::default());
        let mut button = button.with_disabled(true);
        let mut count = 0;
        assert!(!button.click(|| count += 1));

        button.set_disabled(false);
        assert!(button.click(|| count += 1));

        let (button, _receiver) = Button::new(ButtonConfig::default());
        let mut button = button.with_wait(true);
        assert!(!button.click(|| count += 1));
        assert_eq2!(count, 1);
    }

    #[test]
    fn test_outside_runtime_signal_is_sent_right_away() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        button.start_waiting();
        let signal = receiver.try_recv().unwrap();
        assert!(button.apply_signal(signal));
        assert!(button.waiting_has_started());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_async_shows_indicator_while_action_runs() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        let start = Instant::now();

        assert!(button.click_async(|| async {
            sleep(Duration::from_secs(1)).await;
            Err::<(), &str>("failed")
        }));
        assert!(button.is_waiting());
        assert!(!button.is_interactive());

        // The action is still running when the start signal arrives.
        let started = receiver.recv().await.unwrap();
        assert!(matches!(started, ButtonSignal::WaitingHasStarted { .. }));
        assert!(button.apply_signal(started));
        assert!(button.waiting_has_started());
        assert_eq2!(
            button.wait_indicator(),
            WaitIndicatorView {
                visible: true,
                after_show: true
            }
        );

        // Waiting stops even though the action failed.
        let finished = receiver.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert!(matches!(finished, ButtonSignal::ActionFinished { .. }));
        assert!(button.apply_signal(finished));
        assert!(!button.is_waiting());
        assert!(!button.waiting_has_started());
        assert!(button.waiting_has_ended());

        let ended = receiver.recv().await.unwrap();
        assert!(matches!(ended, ButtonSignal::WaitingHasEnded { .. }));
        assert!(button.apply_signal(ended));
        assert!(!button.wait_indicator().visible);
        assert!(button.is_interactive());
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_async_ignored_when_disabled_or_waiting() {
        let (button, mut receiver) = Button::new(ButtonConfig::default());
        let mut button = button.with_disabled(true);
        assert!(!button.click_async(|| async { 42 }));
        assert!(!button.is_waiting());

        button.set_disabled(false);
        assert!(button.click_async(|| async { sleep(Duration::from_secs(1)).await }));
        assert!(!button.click_async(|| async { 42 }));

        // Only one action ran.
        let mut finished_count = 0;
        while let Some(signal) = receiver.recv().await {
            if matches!(signal, ButtonSignal::ActionFinished { .. }) {
                finished_count += 1;
            }
            button.apply_signal(signal);
            if button.is_interactive() && !button.waiting_has_ended() {
                break;
            }
        }
        assert_eq2!(finished_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_finished_after_unmount_is_ignored() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        assert!(button.click_async(|| async { sleep(Duration::from_millis(100)).await }));
        button.unmount();

        // Timers are gone, the action still completes.
        let signal = receiver.recv().await.unwrap();
        assert!(matches!(signal, ButtonSignal::ActionFinished { .. }));
        assert!(!button.apply_signal(signal));
        assert!(button.is_waiting());
    }

    #[test]
    fn test_click_async_needs_runtime() {
        let (mut button, mut receiver) = Button::new(ButtonConfig::default());
        assert!(!button.click_async(|| async {}));
        assert!(!button.is_waiting());
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_link_click_filter() {
        let (mut button, _receiver) = Button::new(ButtonConfig::default());
        let mut count = 0;
        let ctrl_click =
            PointerClick::primary().with_mask(ModifierKeysMask::new().with_ctrl());
        assert!(!button.on_link_click(ctrl_click, || count += 1));
        assert!(button.on_link_click(PointerClick::primary(), || count += 1));
        assert_eq2!(count, 1);
    }
}
