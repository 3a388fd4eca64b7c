/**
    HTTP header that carries the hex signature alongside the signed body.
*/
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/**
    Length in bytes of an HMAC-SHA256 tag.
*/
pub const SIGNATURE_LEN: usize = 32;

/**
    Deepest nesting of arrays, objects and wrapper values the canonical
    serializer accepts. Anything deeper is treated as a cyclic structure.
    Matches the recursion limit `serde_json` applies when parsing.
*/
pub const MAX_DEPTH: usize = 128;
