#![allow(clippy::doc_overindented_list_items)]

pub mod canonical;

mod constants;
mod error;
mod payload;
mod secret;
mod signature;
mod signer;

pub use serde_json::Value;

pub use self::constants::{MAX_DEPTH, SIGNATURE_HEADER, SIGNATURE_LEN};
pub use self::error::{SignError, SignResult};
pub use self::payload::{Payload, parse_payload};
pub use self::secret::Secret;
pub use self::signature::Signature;
pub use self::signer::{SignatureGenerator, SignedPayload, sign, sign_bytes};
