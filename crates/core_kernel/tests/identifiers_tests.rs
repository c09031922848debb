//! Tests for strongly-typed identifiers

use core_kernel::{InvoiceId, TaxpayerId};
use uuid::Uuid;

#[test]
fn test_invoice_id_roundtrips_through_uuid() {
    let uuid = Uuid::new_v4();
    let id = InvoiceId::from(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
}

#[test]
fn test_invoice_id_parses_without_prefix() {
    let uuid = Uuid::new_v4();
    let parsed: InvoiceId = uuid.to_string().parse().unwrap();
    assert_eq!(parsed.as_uuid(), &uuid);
}

#[test]
fn test_taxpayer_id_is_opaque() {
    // Formatting characters are kept as-is; the value is never normalized.
    let formatted = TaxpayerId::parse("123.456.789-00").unwrap();
    let digits = TaxpayerId::parse("12345678900").unwrap();
    assert_ne!(formatted, digits);
    assert_eq!(formatted.as_str(), "123.456.789-00");
}

#[test]
fn test_taxpayer_id_deserialization_rejects_empty() {
    assert!(serde_json::from_str::<TaxpayerId>("\"\"").is_err());
    let id: TaxpayerId = serde_json::from_str("\"98765432100\"").unwrap();
    assert_eq!(id.to_string(), "98765432100");
}
