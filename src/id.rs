//! Record identifiers.
//!
//! Format: `id_<unix millis>_<process counter>_<64 random bits as hex>`.
//! The counter makes ids unique within a process; the clock and random
//! parts keep ids from separate processes apart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Generate a fresh record identifier.
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("id_{}_{:x}_{:016x}", millis, seq, random_u64())
}

fn random_u64() -> u64 {
    let mut bytes = [0u8; 8];
    if getrandom::fill(&mut bytes).is_err() {
        // the counter still keeps ids unique within this process
        tracing::warn!("os rng unavailable, id falls back to clock and counter");
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        return u64::from(nanos);
    }
    u64::from_le_bytes(bytes)
}
