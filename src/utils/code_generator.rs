//! Short code generation.
//!
//! Codes are drawn uniformly, position by position, from a 62-symbol
//! alphanumeric alphabet. Randomness comes from `rand`'s thread-local,
//! OS-seeded generator, so concurrent callers never share generator state.

use rand::Rng;

/// The 62 symbols a short code may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Code length used when none is configured.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that would shadow a fixed route and are never handed out.
pub const RESERVED_CODES: &[&str] = &["health", "shorten"];

/// Source of short codes used by the URL service.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a code of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Production generator backed by [`generate_code`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        loop {
            let code = generate_code(length);
            if !is_reserved(&code) {
                return code;
            }
        }
    }
}

/// Generates a random code using the current thread's generator.
///
/// # Examples
///
/// ```
/// use url_shortener::utils::code_generator::{generate_code, ALPHABET};
///
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
/// ```
pub fn generate_code(length: usize) -> String {
    generate_code_with(&mut rand::rng(), length)
}

/// Generates a code from the given generator.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` collides with a reserved route segment.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
