//! Plaintext interchange formats
//!
//! Credentials leave and enter the vault in plaintext only through these
//! codecs; everything they produce is handed straight to an encrypting
//! engine or to the caller.

pub mod csv;

pub use self::csv::{decode, encode, encode_to, CSV_HEADER};
