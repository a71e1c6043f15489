//! Password verification material for protected links.
//!
//! Two schemes exist. `Legacy` is plain base64 of the password, which is
//! what older clients put in links; it is trivially reversible and only
//! kept so those links still open. Those clients encoded one byte per
//! character (Latin-1), so a password such as `é` is `6Q==`, not the
//! base64 of its UTF-8 bytes. `Argon2` is a salted Argon2id PHC
//! string and is the default for new links.
//!
//! Verification detects the scheme from the material itself: PHC strings
//! start with `$argon2`, and `$` is not in the base64 alphabet.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier as ArgonVerifier,
        SaltString, rand_core::OsRng,
    },
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;

use pinshare_core::config::share::VerificationSchemeKind;

use crate::error::ShareError;

/// Produces and checks verification material.
#[derive(Debug, Clone, Copy)]
pub struct PasswordVerifier {
    scheme: VerificationSchemeKind,
}

impl PasswordVerifier {
    /// Creates a verifier that produces material with `scheme`.
    pub fn new(scheme: VerificationSchemeKind) -> Self {
        Self { scheme }
    }

    /// Scheme used for new material.
    pub fn scheme(&self) -> VerificationSchemeKind {
        self.scheme
    }

    /// Turns a plaintext password into verification material.
    pub fn produce(&self, password: &str) -> Result<String, ShareError> {
        match self.scheme {
            VerificationSchemeKind::Legacy => Ok(STANDARD.encode(legacy_bytes(password))),
            VerificationSchemeKind::Argon2 => {
                let salt = SaltString::generate(&mut OsRng);
                Argon2::default()
                    .hash_password(password.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| ShareError::Hashing(e.to_string()))
            }
        }
    }

    /// Checks `input` against `material`.
    ///
    /// Returns `Ok(false)` on a mismatch. Material that claims to be a PHC
    /// string but does not parse makes the link itself invalid.
    pub fn verify(&self, input: &str, material: &str) -> Result<bool, ShareError> {
        match detect_scheme(material) {
            VerificationSchemeKind::Legacy => {
                // Unescaped material loses `+` to a space when the query is decoded.
                let material = material.replace(' ', "+");
                let latin1 = STANDARD.encode(legacy_bytes(input));
                let utf8 = STANDARD.encode(input.as_bytes());
                let matches_latin1 = constant_time_eq(latin1.as_bytes(), material.as_bytes());
                let matches_utf8 = constant_time_eq(utf8.as_bytes(), material.as_bytes());
                Ok(matches_latin1 | matches_utf8)
            }
            VerificationSchemeKind::Argon2 => {
                let parsed = PasswordHash::new(material)
                    .map_err(|_| ShareError::invalid_link("unparseable argon2 material"))?;
                match Argon2::default().verify_password(input.as_bytes(), &parsed) {
                    Ok(()) => Ok(true),
                    Err(argon2::password_hash::Error::Password) => Ok(false),
                    Err(_) => Err(ShareError::invalid_link("unsupported argon2 parameters")),
                }
            }
        }
    }
}

impl Default for PasswordVerifier {
    fn default() -> Self {
        Self::new(VerificationSchemeKind::default())
    }
}

/// Which scheme produced `material`.
pub fn detect_scheme(material: &str) -> VerificationSchemeKind {
    if material.starts_with("$argon2") {
        VerificationSchemeKind::Argon2
    } else {
        VerificationSchemeKind::Legacy
    }
}

/// Bytes the legacy scheme encodes: one byte per character when every
/// character fits in Latin-1, otherwise the UTF-8 bytes.
fn legacy_bytes(password: &str) -> Vec<u8> {
    password
        .chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect::<Option<Vec<u8>>>()
        .unwrap_or_else(|| password.as_bytes().to_vec())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
