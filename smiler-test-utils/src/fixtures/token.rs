//! Random values for generated fixtures.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::{distr::Alphanumeric, Rng};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Lowercase alphanumeric token unique within the process, e.g. `k3j9x0qa17`.
///
/// Eight random characters followed by a process-wide sequence number, so two calls never
/// return the same token even if the random part repeats.
pub fn unique_token() -> String {
    let random: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    format!("{}{}", random, sequence)
}

/// Hex encoding of `bytes` random bytes.
pub fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::rng().fill(buf.as_mut_slice());

    buf.iter().map(|b| format!("{:02x}", b)).collect()
}
