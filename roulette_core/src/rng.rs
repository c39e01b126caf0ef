use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::taxonomy::MAX_OUTCOME;

// Deterministic outcome source using the provably-fair HMAC construction
// server_seed (secret) + client_seed + nonce -> HMAC-SHA256 -> bytes -> floats in [0,1) -> pocket

pub type HmacSha256 = Hmac<Sha256>;

const POCKETS: f64 = (MAX_OUTCOME as f64) + 1.0;

pub fn derive_hash_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

pub fn derive_floats(hmac_bytes: &[u8], count: usize) -> Vec<f64> {
    // Successive 4-byte chunks as big-endian u32, mapped to [0,1)
    let mut out = Vec::with_capacity(count);
    let mut buffer = hmac_bytes.to_vec();
    let mut i = 0usize;
    while out.len() < count {
        if i + 4 > buffer.len() {
            // extend deterministically by hashing the previous buffer
            buffer = Sha256::digest(&buffer).to_vec();
            i = 0;
            continue;
        }
        let chunk = &buffer[i..i + 4];
        let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        out.push(f64::from(v) / (f64::from(u32::MAX) + 1.0));
        i += 4;
    }
    out
}

fn float_to_outcome(f: f64) -> u8 {
    ((f * POCKETS).floor() as u8).min(MAX_OUTCOME)
}

pub struct ProvablyFairRng {
    pub server_seed: String, // secret
    pub client_seed: String,
    pub nonce: u64,
}

impl ProvablyFairRng {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>, nonce: u64) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }

    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    pub fn hmac_bytes(&self) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.server_seed.as_bytes())
            .expect("HMAC accepts keys of any length");
        let msg = format!("{}:{}", self.client_seed, self.nonce);
        mac.update(msg.as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    pub fn next_floats(&self, count: usize) -> Vec<f64> {
        derive_floats(&self.hmac_bytes(), count)
    }

    /// Pocket 0..=36 for this seed triple.
    pub fn outcome(&self) -> u8 {
        float_to_outcome(self.next_floats(1)[0])
    }
}

/// Outcomes for `count` consecutive nonces starting at `first_nonce`.
pub fn spin_with_seeds(
    server_seed: &str,
    client_seed: &str,
    first_nonce: u64,
    count: usize,
) -> Vec<u8> {
    (0..count as u64)
        .map(|i| ProvablyFairRng::new(server_seed, client_seed, first_nonce + i).outcome())
        .collect()
}

/// Check that a revealed outcome matches what the seeds produce.
pub fn verify_outcome(server_seed: &str, client_seed: &str, nonce: u64, expected: u8) -> bool {
    ProvablyFairRng::new(server_seed, client_seed, nonce).outcome() == expected
}
