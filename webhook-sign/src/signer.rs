use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::canonical::to_canonical_string;
use crate::constants::{SIGNATURE_HEADER, SIGNATURE_LEN};
use crate::error::{SignError, SignResult};
use crate::secret::Secret;
use crate::signature::Signature;

type HmacSha256 = Hmac<Sha256>;

/**
    A canonical payload body together with its signature.

    `body` must be sent byte-for-byte as the HTTP request body; any
    re-serialization on the way out invalidates `signature`.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    pub body: String,
    pub signature: Signature,
}

impl SignedPayload {
    /**
        Header name and value to attach to the request.
    */
    pub fn header(&self) -> (&'static str, String) {
        (SIGNATURE_HEADER, self.signature.to_hex())
    }
}

/**
    Serialize `payload` canonically and sign the resulting bytes.

    Fails with [`SignError::InvalidKey`] for an empty secret (checked before
    any serialization work) and [`SignError::Encoding`] for payloads that
    have no JSON form.
*/
pub fn sign<T>(secret: &[u8], payload: &T) -> SignResult<SignedPayload>
where
    T: Serialize + ?Sized,
{
    if secret.is_empty() {
        return Err(SignError::InvalidKey);
    }
    let body = to_canonical_string(payload)?;
    let signature = sign_bytes(secret, body.as_bytes())?;
    tracing::debug!(body_len = body.len(), "signed webhook payload");
    Ok(SignedPayload { body, signature })
}

/**
    HMAC-SHA256 over an already-serialized body.

    This is the computation a receiver runs over the raw request body, so
    `sign_bytes(secret, signed.body.as_bytes())` reproduces
    `signed.signature`.
*/
pub fn sign_bytes(secret: &[u8], body: &[u8]) -> SignResult<Signature> {
    if secret.is_empty() {
        return Err(SignError::InvalidKey);
    }
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(secret).map_err(|_| SignError::InvalidKey)?;
    mac.update(body);
    let tag = mac.finalize().into_bytes();

    let mut bytes = [0u8; SIGNATURE_LEN];
    bytes.copy_from_slice(&tag);
    Ok(Signature::from_bytes(bytes))
}

/**
    Signs payloads with a secret it owns.

    The secret is validated once at construction, so signing can only fail
    on payload encoding.
*/
#[derive(Debug, Clone)]
pub struct SignatureGenerator {
    secret: Secret,
}

impl SignatureGenerator {
    pub fn new(secret: Secret) -> Self {
        Self { secret }
    }

    pub fn sign<T>(&self, payload: &T) -> SignResult<SignedPayload>
    where
        T: Serialize + ?Sized,
    {
        sign(self.secret.expose(), payload)
    }

    pub fn sign_bytes(&self, body: &[u8]) -> SignResult<Signature> {
        sign_bytes(self.secret.expose(), body)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use hex_literal::hex;
    use serde::ser::{SerializeMap, Serializer};
    use serde_json::json;

    use super::*;
    use crate::payload::Payload;

    const SECRET: &[u8] = b"webhook-secret-key";

    const BODY: &str = r#"{"event_type":"payment.completed","payment_id":"dd3d664a-0471-44b4-9510-d6cc8a358656","provider":"test_provider","data":{"reference":"TEST_REF_456_DEV_OPS"}}"#;

    const PINNED: [u8; 32] =
        hex!("27fcb5be6a67579fa223bfd537711dfee98060f8b385c35a5beb81a84c66bfd2");

    fn sample_payload() -> Payload {
        let mut data = Payload::new();
        data.insert("reference", json!("TEST_REF_456_DEV_OPS"));

        let mut payload = Payload::new();
        payload.insert("event_type", json!("payment.completed"));
        payload.insert("payment_id", json!("dd3d664a-0471-44b4-9510-d6cc8a358656"));
        payload.insert("provider", json!("test_provider"));
        payload.insert("data", data);
        payload
    }

    #[test]
    fn pinned_payment_completed() {
        let signed = sign(SECRET, &sample_payload()).unwrap();
        assert_eq!(signed.body, BODY);
        assert_eq!(signed.signature.as_bytes(), &PINNED);
        assert_eq!(
            signed.signature.to_string(),
            "27fcb5be6a67579fa223bfd537711dfee98060f8b385c35a5beb81a84c66bfd2"
        );
    }

    #[test]
    fn deterministic() {
        let payload = sample_payload();
        let first = sign(SECRET, &payload).unwrap();
        for _ in 0..5 {
            assert_eq!(sign(SECRET, &payload).unwrap(), first);
        }
    }

    #[test]
    fn round_trip_over_body() {
        let signed = sign(SECRET, &sample_payload()).unwrap();
        let recomputed = sign_bytes(SECRET, signed.body.as_bytes()).unwrap();
        assert_eq!(recomputed, signed.signature);
    }

    #[test]
    fn one_character_secret_change() {
        let payload = sample_payload();
        let a = sign(b"webhook-secret-key", &payload).unwrap();
        let b = sign(b"webhook-secret-kez", &payload).unwrap();
        assert_eq!(a.body, b.body);
        assert_ne!(a.signature, b.signature);
        assert_eq!(
            b.signature.to_string(),
            "c79a4df9239967a755d297a1a5b87346dacb060c467516173179be7d6e1f5ab5"
        );
    }

    #[test]
    fn field_value_change() {
        let base = sign(SECRET, &sample_payload()).unwrap();
        let mut changed = sample_payload();
        changed.insert("provider", json!("other_provider"));
        let signed = sign(SECRET, &changed).unwrap();
        assert_ne!(signed.body, base.body);
        assert_ne!(signed.signature, base.signature);
    }

    #[test]
    fn key_order_change() {
        let base = sign(SECRET, &sample_payload()).unwrap();
        let mut reordered = Payload::new();
        for key in ["provider", "event_type", "payment_id", "data"] {
            reordered.insert(key, sample_payload()[key].clone());
        }
        let signed = sign(SECRET, &reordered).unwrap();
        assert_ne!(signed.body, base.body);
        assert_ne!(signed.signature, base.signature);
    }

    #[test]
    fn structure_change() {
        let base = sign(SECRET, &sample_payload()).unwrap();
        let mut flattened = sample_payload();
        flattened.insert("data", json!("TEST_REF_456_DEV_OPS"));
        let signed = sign(SECRET, &flattened).unwrap();
        assert_ne!(signed.body, base.body);
        assert_ne!(signed.signature, base.signature);
    }

    #[test]
    fn empty_secret_rejected() {
        assert_eq!(
            sign(b"", &sample_payload()).unwrap_err(),
            SignError::InvalidKey
        );
        assert_eq!(sign_bytes(b"", b"body").unwrap_err(), SignError::InvalidKey);
    }

    #[test]
    fn empty_secret_checked_before_encoding() {
        let err = sign(b"", &f64::NAN).unwrap_err();
        assert_eq!(err, SignError::InvalidKey);
    }

    struct Cycle(RefCell<Option<Rc<Cycle>>>);

    impl Serialize for Cycle {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("self", &self.0.borrow().as_deref())?;
            map.end()
        }
    }

    #[test]
    fn cyclic_payload_rejected() {
        let cycle = Rc::new(Cycle(RefCell::new(None)));
        *cycle.0.borrow_mut() = Some(Rc::clone(&cycle));
        let err = sign(SECRET, &*cycle).unwrap_err();
        assert!(matches!(err, SignError::Encoding(_)));
        cycle.0.borrow_mut().take();
    }

    #[test]
    fn rfc4231_case_2() {
        let sig = sign_bytes(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            sig.as_bytes(),
            &hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn long_key_is_hashed() {
        // keys longer than the SHA-256 block are hashed first, never rejected
        let key = [0xaa; 131];
        let sig = sign_bytes(&key, b"Test Using Larger Than Block-Size Key - Hash Key First")
            .unwrap();
        assert_eq!(
            sig.as_bytes(),
            &hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54")
        );
    }

    #[test]
    fn header_pair() {
        let signed = sign(SECRET, &sample_payload()).unwrap();
        let (name, value) = signed.header();
        assert_eq!(name, "X-Webhook-Signature");
        assert_eq!(value.len(), 64);
        assert_eq!(value, signed.signature.to_hex());
    }

    #[test]
    fn generator_matches_free_function() {
        let generator = SignatureGenerator::new(Secret::new(SECRET).unwrap());
        let signed = generator.sign(&sample_payload()).unwrap();
        assert_eq!(signed, sign(SECRET, &sample_payload()).unwrap());
        assert_eq!(
            generator.sign_bytes(BODY.as_bytes()).unwrap(),
            signed.signature
        );
        assert!(!format!("{generator:?}").contains("webhook-secret-key"));
    }

    #[test]
    fn generator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignatureGenerator>();
        assert_send_sync::<SignedPayload>();
    }

    #[test]
    fn concurrent_signing() {
        let generator = SignatureGenerator::new(Secret::new(SECRET).unwrap());
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| generator.sign(&sample_payload()).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().signature.as_bytes(), &PINNED);
            }
        });
    }
}
