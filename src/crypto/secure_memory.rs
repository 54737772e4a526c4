//! Passphrases held in memory that is wiped on drop

use std::fmt;
use std::ops::Deref;

use zeroize::Zeroizing;

/// A passphrase as read from the environment or a prompt
///
/// Derefs to `str`; the buffer is zeroed when the value is dropped.
pub struct SecureString(Zeroizing<String>);

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self(Zeroizing::new(s))
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString([REDACTED])")
    }
}
