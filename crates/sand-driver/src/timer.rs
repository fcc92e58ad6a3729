use crossbeam::channel::{self, Receiver, Sender};
use std::time::{Duration, Instant};

/// A recurring timer whose ticks arrive on a channel.
pub trait TimerService {
    /// Start (or restart) ticking every `interval`. Pending ticks are dropped.
    fn start(&mut self, interval: Duration);

    /// Stop ticking. Pending ticks are dropped.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;

    fn ticks(&self) -> &Receiver<Instant>;
}

/// Wall-clock timer backed by `crossbeam::channel::tick`.
pub struct TickTimer {
    ticks: Receiver<Instant>,
    interval: Option<Duration>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self {
            ticks: channel::never(),
            interval: None,
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService for TickTimer {
    fn start(&mut self, interval: Duration) {
        self.ticks = channel::tick(interval);
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        self.ticks = channel::never();
        self.interval = None;
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    fn ticks(&self) -> &Receiver<Instant> {
        &self.ticks
    }
}

/// A timer that only ticks when told to. Used by hosts that own their own
/// clock, and by tests.
pub struct ManualTimer {
    tx: Sender<Instant>,
    rx: Receiver<Instant>,
    interval: Option<Duration>,
}

impl ManualTimer {
    pub fn new() -> Self {
        let (tx, rx) = channel::unbounded();
        Self { tx, rx, interval: None }
    }

    /// Queue one tick. Returns `false` if the timer is not running.
    pub fn fire(&self) -> bool {
        if self.interval.is_none() {
            return false;
        }
        self.tx.send(Instant::now()).is_ok()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    fn drain(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService for ManualTimer {
    fn start(&mut self, interval: Duration) {
        self.drain();
        self.interval = Some(interval);
    }

    fn cancel(&mut self) {
        self.drain();
        self.interval = None;
    }

    fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    fn ticks(&self) -> &Receiver<Instant> {
        &self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timer_fires_only_when_started() {
        let mut t = ManualTimer::new();
        assert!(!t.fire());
        t.start(Duration::from_millis(2));
        assert!(t.fire());
        assert!(t.fire());
        assert_eq!(t.pending(), 2);
        t.cancel();
        assert_eq!(t.pending(), 0);
        assert!(!t.is_active());
    }

    #[test]
    fn test_tick_timer_ticks() {
        let mut t = TickTimer::new();
        assert!(t.ticks().recv_timeout(Duration::from_millis(20)).is_err());
        t.start(Duration::from_millis(1));
        assert!(t.ticks().recv_timeout(Duration::from_secs(2)).is_ok());
        t.cancel();
        assert!(t.ticks().try_recv().is_err());
    }
}
