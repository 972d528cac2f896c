//! The PIN gate. A weak client-side lock: SHA-256 digest of a 4-digit PIN
//! compared against the stored hash, with a capped retry count.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Result, bail};
use sha2::{Digest, Sha256};

use bulk_core::models::TrackerData;
use bulk_core::validate;

pub const MAX_PIN_ATTEMPTS: u32 = 3;

/// Hex-encoded SHA-256 of the PIN string. Imported backups carry the same
/// digest format, so their PINs keep unlocking.
#[must_use]
pub fn hash_pin(pin: &str) -> String {
    use std::fmt::Write as _;

    let digest = Sha256::digest(pin.as_bytes());
    digest
        .iter()
        .fold(String::with_capacity(64), |mut acc: String, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        })
}

/// Prompt for the PIN when one is configured. A malformed entry re-prompts
/// without consuming an attempt; a wrong PIN consumes one. After
/// [`MAX_PIN_ATTEMPTS`] misses the command fails hard - rerun to retry.
pub fn require_pin(data: &TrackerData) -> Result<()> {
    let Some(stored) = &data.user_settings.pin_hash else {
        return Ok(());
    };

    let stdin = io::stdin();
    if !stdin.is_terminal() {
        bail!("A PIN is set; run from an interactive terminal to unlock");
    }

    let mut attempts = 0;
    while attempts < MAX_PIN_ATTEMPTS {
        eprint!(
            "Enter PIN (attempt {} of {MAX_PIN_ATTEMPTS}): ",
            attempts + 1
        );
        io::stderr().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            bail!("PIN entry cancelled");
        };
        let line = line?;

        let pin = match validate::pin(line.trim()) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        if hash_pin(pin) == *stored {
            return Ok(());
        }

        attempts += 1;
        if attempts < MAX_PIN_ATTEMPTS {
            let remaining = MAX_PIN_ATTEMPTS - attempts;
            eprintln!("Invalid PIN, {remaining} attempts remaining");
        }
    }

    bail!("Maximum PIN attempts exceeded. Access denied.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_pin_is_sha256_hex() {
        // Known SHA-256 of the ASCII string "1234".
        assert_eq!(
            hash_pin("1234"),
            "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4"
        );
    }

    #[test]
    fn test_hash_pin_differs_per_pin() {
        assert_ne!(hash_pin("0000"), hash_pin("0001"));
    }

    #[test]
    fn test_no_pin_configured_passes() {
        let data = TrackerData::default();
        assert!(require_pin(&data).is_ok());
    }
}
