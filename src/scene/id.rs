use rand::{RngCore, rngs::OsRng};

use crate::foundation::error::{PhotofieldError, PhotofieldResult};

/// Characters used in generated scene ids. No vowels and no easily confused glyphs.
pub const ID_ALPHABET: &[u8] = b"6789BCDFGHJKLMNPQRTWbcdfghjkmnpqrtwz";

/// Default generated id length.
pub const ID_LENGTH: usize = 10;

/// Generate a [`ID_LENGTH`]-character scene id from the OS entropy source.
pub fn generate_id() -> PhotofieldResult<String> {
    generate_id_with(&mut OsRng, ID_LENGTH)
}

/// Generate a `len`-character id over [`ID_ALPHABET`] using `rng`.
///
/// Bytes are masked to 6 bits and values outside the alphabet are rejected, so every
/// character is equally likely.
pub fn generate_id_with<R: RngCore + ?Sized>(
    rng: &mut R,
    len: usize,
) -> PhotofieldResult<String> {
    let mask = (ID_ALPHABET.len().next_power_of_two() - 1) as u8;
    let mut id = String::with_capacity(len);
    let mut buf = [0u8; 32];
    while id.len() < len {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| PhotofieldError::id_generation(format!("entropy source failed: {e}")))?;
        for byte in buf {
            let idx = usize::from(byte & mask);
            if let Some(&c) = ID_ALPHABET.get(idx) {
                id.push(char::from(c));
                if id.len() == len {
                    break;
                }
            }
        }
    }
    Ok(id)
}
