//! Session secret generation.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Random bytes per secret; encodes to 64 characters.
const SECRET_BYTES: usize = 48;

/// Generate a random secret suitable for `PACHARA_SESSION_SECRET`.
#[must_use]
pub fn generate() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Print a fresh secret to stdout.
pub fn print() {
    #[allow(clippy::print_stdout)]
    {
        println!("{}", generate());
    }
}
