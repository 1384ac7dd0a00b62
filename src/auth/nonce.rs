//! Nonce generation for CoinSpot API authentication.
//!
//! Every signed request carries a `nonce` field. CoinSpot rejects a nonce
//! that does not exceed the last one it saw for the same API key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for signed requests.
///
/// The nonce must be strictly increasing for each request made with the
/// same credentials.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider that generates strictly increasing nonces based on time.
///
/// Uses milliseconds since UNIX epoch. Requests issued within the same
/// millisecond get `last + 1`, so two concurrent calls never share a nonce.
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Create a provider whose first nonce is greater than `last`.
    ///
    /// Useful when a nonce used by a previous process is known.
    pub fn starting_after(last: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(last),
        }
    }

    fn current_time_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IncreasingNonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IncreasingNonce")
            .field("last_nonce", &self.last_nonce.load(Ordering::Relaxed))
            .finish()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let time_nonce = Self::current_time_millis();

        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = time_nonce.max(last.saturating_add(1));

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = IncreasingNonce::new();

        let mut last = 0u64;
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_is_millisecond_timestamp() {
        let before = IncreasingNonce::current_time_millis();
        let nonce = IncreasingNonce::new().next_nonce();
        let after = IncreasingNonce::current_time_millis();

        assert!(nonce >= before && nonce <= after);
    }

    #[test]
    fn test_nonce_starting_after_future_value() {
        let far_future = IncreasingNonce::current_time_millis() + 1_000_000;
        let provider = IncreasingNonce::starting_after(far_future);

        assert_eq!(provider.next_nonce(), far_future + 1);
        assert_eq!(provider.next_nonce(), far_future + 2);
    }

    #[test]
    fn test_nonce_saturates_at_max() {
        let provider = IncreasingNonce::starting_after(u64::MAX);

        assert_eq!(provider.next_nonce(), u64::MAX);
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = std::sync::Arc::new(IncreasingNonce::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                let mut nonces = Vec::new();
                for _ in 0..1000 {
                    nonces.push(p.next_nonce());
                }
                nonces
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            let nonces = handle.join().unwrap();
            for nonce in nonces {
                assert!(
                    all_nonces.insert(nonce),
                    "Nonce must be unique across threads"
                );
            }
        }
    }
}
