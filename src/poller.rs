//! Fixed-interval driver for feed refreshes.
//!
//! The first tick fires immediately. The schedule never waits on tick work:
//! a deadline that arrives while the previous tick is still running is
//! dropped, and the next tick starts on the following deadline.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

pub struct Poller {
    interval: Duration,
    shutdown: Option<watch::Sender<bool>>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    /// Spawn the polling loop. Must be called inside a tokio runtime.
    pub fn start<F, Fut>(every: Duration, on_tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut timer = interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut running: Option<JoinHandle<()>> = None;

            loop {
                tokio::select! {
                    _ = timer.tick() => {}
                    _ = stopped.changed() => break,
                }
                if *stopped.borrow() {
                    break;
                }

                if let Some(previous) = running.take() {
                    if !previous.is_finished() {
                        debug!("Previous poll tick still running, skipping");
                        running = Some(previous);
                        continue;
                    }
                    if let Err(e) = previous.await {
                        warn!("Poll tick failed: {}", e);
                    }
                }

                // Ticks run on their own task so stopping the poller never
                // cancels work that already started.
                running = Some(tokio::spawn(on_tick()));
            }
            debug!("Poller stopped");
        });

        debug!("Poller started (interval: {})", format_interval(every));
        Self {
            interval: every,
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Stop scheduling ticks. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }
        // The loop exits on its own once it sees the signal.
        self.handle.take();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Parse an interval like "500ms", "5s", "30s", "1m" or "1h".
/// A bare number is read as milliseconds.
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    let (digits, unit_ms) = if let Some(ms) = s.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, 1_000)
    } else if let Some(minutes) = s.strip_suffix('m') {
        (minutes, 60_000)
    } else if let Some(hours) = s.strip_suffix('h') {
        (hours, 3_600_000)
    } else {
        (s.as_str(), 1)
    };

    let value = digits
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("Invalid interval: {}. Use a form like '5s', '30s', '500ms'", s))?;
    let millis = value
        .checked_mul(unit_ms)
        .ok_or_else(|| format!("Interval too large: {}", s))?;

    if millis == 0 {
        return Err("Interval must be greater than zero".to_string());
    }
    Ok(Duration::from_millis(millis))
}

/// Render an interval in the largest whole unit.
pub fn format_interval(interval: Duration) -> String {
    let ms = interval.as_millis();
    if ms >= 3_600_000 && ms % 3_600_000 == 0 {
        format!("{}h", ms / 3_600_000)
    } else if ms >= 60_000 && ms % 60_000 == 0 {
        format!("{}m", ms / 60_000)
    } else if ms >= 1_000 && ms % 1_000 == 0 {
        format!("{}s", ms / 1_000)
    } else {
        format!("{}ms", ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    fn counting_tick(count: Arc<AtomicUsize>) -> impl Fn() -> std::future::Ready<()> {
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_immediately_then_on_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::start(Duration::from_secs(5), counting_tick(count.clone()));
        assert_eq!(poller.interval(), Duration::from_secs(5));

        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(5_001)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 4);

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut poller = Poller::start(Duration::from_secs(1), counting_tick(count.clone()));
        settle().await;

        poller.stop();
        poller.stop();
        assert!(!poller.is_running());

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_poller() {
        let count = Arc::new(AtomicUsize::new(0));
        {
            let _poller = Poller::start(Duration::from_secs(1), counting_tick(count.clone()));
            settle().await;
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_tick_is_not_buffered() {
        let origin = Instant::now();
        let starts: Arc<Mutex<Vec<Duration>>> = Arc::default();
        let on_tick = {
            let starts = starts.clone();
            move || {
                starts.lock().unwrap().push(origin.elapsed());
                tokio::time::sleep(Duration::from_millis(3_500))
            }
        };
        let mut poller = Poller::start(Duration::from_secs(1), on_tick);

        // Deadlines at 1s, 2s and 3s land while the first tick is running.
        tokio::time::sleep(Duration::from_millis(3_900)).await;
        settle().await;
        assert_eq!(starts.lock().unwrap().len(), 1);

        // The tick finishing at 3.5s does not release a queued deadline; the
        // next start waits for the 4s boundary.
        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;
        assert_eq!(
            *starts.lock().unwrap(),
            vec![Duration::ZERO, Duration::from_millis(4_000)]
        );

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_does_not_cancel_running_tick() {
        let finished = Arc::new(AtomicUsize::new(0));
        let on_tick = {
            let finished = finished.clone();
            move || {
                let finished = finished.clone();
                async move {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    finished.fetch_add(1, Ordering::SeqCst);
                }
            }
        };
        let mut poller = Poller::start(Duration::from_secs(10), on_tick);
        settle().await;

        poller.stop();
        tokio::time::sleep(Duration::from_secs(3)).await;
        settle().await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_interval("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_interval("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_interval("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_interval("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_interval("5000").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_interval(" 30S ").unwrap(), Duration::from_secs(30));
        assert!(parse_interval("0s").is_err());
        assert!(parse_interval("fast").is_err());
        assert!(parse_interval("").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(5)), "5s");
        assert_eq!(format_interval(Duration::from_secs(30)), "30s");
        assert_eq!(format_interval(Duration::from_secs(60)), "1m");
        assert_eq!(format_interval(Duration::from_secs(7200)), "2h");
        assert_eq!(format_interval(Duration::from_millis(1500)), "1500ms");
    }
}
