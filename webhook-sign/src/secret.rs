use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SignError, SignResult};

/**
    Shared HMAC key agreed out-of-band with the receiving service.

    The bytes are never printed: `Debug` and `Display` both render
    `[REDACTED]`. They are wiped from memory when the value is dropped.
    An empty secret cannot be constructed.
*/
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    /**
        Wrap raw key bytes, rejecting an empty key.
    */
    pub fn new(bytes: impl Into<Vec<u8>>) -> SignResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(SignError::InvalidKey);
        }
        Ok(Self { bytes })
    }

    /**
        Read the secret through an arbitrary lookup function.

        `None` maps to [`SignError::MissingSecret`], an empty value to
        [`SignError::InvalidKey`].
    */
    pub fn from_lookup<F>(var: &str, lookup: F) -> SignResult<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let value = lookup(var).ok_or_else(|| SignError::MissingSecret(var.to_owned()))?;
        Self::new(value)
    }

    /**
        Borrow the key bytes. Keep the borrow short and never log it.
    */
    pub fn expose(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl TryFrom<&str> for Secret {
    type Error = SignError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Secret {
    type Error = SignError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
