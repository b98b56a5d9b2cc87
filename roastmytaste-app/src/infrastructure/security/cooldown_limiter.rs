use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

const COOLDOWN: Duration = Duration::from_secs(300);
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// One roast per client per cooldown window, tracked in process memory.
/// Process-local: multi-instance deployments would each keep their own map,
/// and two truly simultaneous first requests can both pass.
#[derive(Clone)]
pub struct CooldownLimiter {
    last_request: Arc<DashMap<IpAddr, Instant>>,
    last_cleanup: Arc<std::sync::Mutex<Instant>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownExceeded {
    pub wait_secs: u64,
}

impl CooldownLimiter {
    pub fn new() -> Self {
        Self {
            last_request: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(std::sync::Mutex::new(Instant::now())),
        }
    }

    pub fn check(&self, ip: IpAddr) -> Result<(), CooldownExceeded> {
        self.maybe_cleanup();
        self.check_at(ip, Instant::now())
    }

    fn check_at(&self, ip: IpAddr, now: Instant) -> Result<(), CooldownExceeded> {
        match self.last_request.entry(ip) {
            Entry::Occupied(mut entry) => {
                let elapsed = now.saturating_duration_since(*entry.get());
                if elapsed < COOLDOWN {
                    return Err(CooldownExceeded {
                        wait_secs: (COOLDOWN - elapsed).as_secs(),
                    });
                }
                entry.insert(now);
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                Ok(())
            }
        }
    }

    fn maybe_cleanup(&self) {
        let mut last_cleanup = self.last_cleanup.lock().unwrap();
        if last_cleanup.elapsed() > CLEANUP_INTERVAL {
            self.last_request.retain(|_, seen| seen.elapsed() < COOLDOWN);
            *last_cleanup = Instant::now();
        }
    }
}

impl Default for CooldownLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[test]
    fn second_request_within_the_window_is_rejected() {
        let limiter = CooldownLimiter::new();
        let start = Instant::now();
        assert!(limiter.check_at(ip(1), start).is_ok());

        let err = limiter
            .check_at(ip(1), start + Duration::from_secs(13))
            .unwrap_err();
        assert_eq!(err.wait_secs, 287);
    }

    #[test]
    fn wait_time_rounds_down_to_whole_seconds() {
        let limiter = CooldownLimiter::new();
        let start = Instant::now();
        limiter.check_at(ip(2), start).unwrap();

        let err = limiter
            .check_at(ip(2), start + Duration::from_millis(500))
            .unwrap_err();
        assert_eq!(err.wait_secs, 299);
    }

    #[test]
    fn the_window_reopens_after_the_cooldown() {
        let limiter = CooldownLimiter::new();
        let start = Instant::now();
        limiter.check_at(ip(3), start).unwrap();
        assert!(limiter.check_at(ip(3), start + COOLDOWN).is_ok());
    }

    #[test]
    fn clients_are_limited_independently() {
        let limiter = CooldownLimiter::new();
        let start = Instant::now();
        limiter.check_at(ip(4), start).unwrap();
        assert!(limiter.check_at(ip(5), start).is_ok());
    }
}
