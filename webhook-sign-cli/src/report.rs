use std::io::{self, Write};

use webhook_sign::SignedPayload;

/**
    Print the signed body and signature for pasting into an HTTP client.
*/
pub fn write_report<W: Write>(
    out: &mut W,
    signed: &SignedPayload,
    header: &str,
) -> io::Result<()> {
    writeln!(out, "--- Signature Generation ---")?;
    writeln!(out, "Payload string: {}", signed.body)?;
    writeln!(out, "Signature: {}", signed.signature)?;
    writeln!(out)?;
    writeln!(out, "{header}: {}", signed.signature)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use webhook_sign::{parse_payload, sign};

    #[test]
    fn report_layout() {
        let payload = parse_payload(r#"{"event_type":"payment.completed"}"#).unwrap();
        let signed = sign(b"webhook-secret-key", &payload).unwrap();

        let mut out = Vec::new();
        write_report(&mut out, &signed, "X-Webhook-Signature").unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected = format!(
            "--- Signature Generation ---\n\
             Payload string: {{\"event_type\":\"payment.completed\"}}\n\
             Signature: {sig}\n\
             \n\
             X-Webhook-Signature: {sig}\n",
            sig = signed.signature
        );
        assert_eq!(text, expected);
    }
}
