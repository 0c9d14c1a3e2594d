//! The countdown that reloads the dashboard.

use std::thread;
use std::time::Duration;

/// The number of seconds between two reloads when none is given.
pub const DEFAULT_REFRESH_SECONDS: u32 = 300;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Waits for the next countdown tick.
pub trait Ticker {
    /// Blocks until the next tick is due.
    fn wait(&mut self);
}

/// A [Ticker] firing once per second.
#[derive(Debug, Default)]
pub struct IntervalTicker;

impl Ticker for IntervalTicker {
    fn wait(&mut self) {
        thread::sleep(TICK_INTERVAL);
    }
}

/// Shows the seconds left until the reload.
pub trait CountdownDisplay {
    /// Updates the displayed number of seconds.
    fn show(&mut self, seconds: u32);
}

/// Performs the reload once the countdown is over.
pub trait Reload {
    /// Reloads the page.
    fn reload(&mut self);
}

/// The outcome of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown continues with the given seconds left.
    Remaining(u32),
    /// The countdown is over and the page must be reloaded.
    Reload,
}

/// A countdown decremented once per second that reloads the page
/// when it reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTimer {
    remaining: u32,
}

impl RefreshTimer {
    /// Creates a countdown of `total_seconds`; zero selects
    /// [DEFAULT_REFRESH_SECONDS].
    pub fn new(total_seconds: u32) -> RefreshTimer {
        let remaining = if total_seconds == 0 {
            DEFAULT_REFRESH_SECONDS
        } else {
            total_seconds
        };

        Self { remaining }
    }

    /// Returns the seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            Tick::Reload
        } else {
            Tick::Remaining(self.remaining)
        }
    }

    /// Counts down to zero, updating `display` on every tick when present,
    /// and reloads exactly once at the end.
    pub fn start<T, R>(
        mut self,
        ticker: &mut T,
        mut display: Option<&mut dyn CountdownDisplay>,
        reloader: &mut R,
    ) where
        T: Ticker,
        R: Reload,
    {
        if let Some(display) = display.as_deref_mut() {
            display.show(self.remaining);
        }

        loop {
            ticker.wait();
            let tick = self.tick();

            if let Some(display) = display.as_deref_mut() {
                display.show(self.remaining);
            }

            if tick == Tick::Reload {
                tracing::debug!("countdown over, reloading");
                reloader.reload();
                return;
            }
        }
    }
}

impl Default for RefreshTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_SECONDS)
    }
}
