use anyhow::{Context, Result, bail};

use webhook_sign::{SIGNATURE_HEADER, Secret};

/// Environment variable holding the shared signing secret.
pub const SECRET_VAR: &str = "WEBHOOK_SECRET";

/// Optional override for the printed signature header name.
pub const HEADER_VAR: &str = "WEBHOOK_SIGNATURE_HEADER";

#[derive(Debug)]
pub struct Config {
    pub secret: Secret,
    pub header: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = Secret::from_lookup(SECRET_VAR, &lookup)
            .with_context(|| format!("{SECRET_VAR} must be set to a non-empty value"))?;

        let header = match lookup(HEADER_VAR) {
            Some(name) if !name.trim().is_empty() => {
                let name = name.trim();
                if !name.bytes().all(is_token_byte) {
                    bail!("{HEADER_VAR} is not a valid HTTP header name: {name:?}");
                }
                name.to_owned()
            }
            _ => SIGNATURE_HEADER.to_owned(),
        };

        Ok(Self { secret, header })
    }
}

// RFC 9110 token characters.
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
