//! Billing service flows: preview, submission payloads and payment entry

use billing_service::*;
use config_engine::{ConsoleConfig, ParsePolicy};
use error_common::{ConsoleError, ErrorKind};
use serde_json::json;

fn final_bill_form() -> FormSnapshot {
    [
        ("admissionId", "ADM-2024-0113"),
        ("patientId", "P-5521"),
        ("bedGross", "15000"),
        ("bedDiscount", "1000"),
        ("bedNet", "14000"),
        ("doctorGross", "8000"),
        ("doctorNet", "8000"),
        ("otGross", "20000"),
        ("otDiscount", "2000"),
        ("otNet", "18000"),
        ("miscGross", "5000"),
        ("miscNet", "5000"),
        ("additionalDiscountAmount", "500"),
    ]
    .into_iter()
    .collect()
}

fn strict_service() -> BillingService {
    BillingService::new(BillingSettings::default().with_policy(ParsePolicy::Strict))
}

#[test]
fn test_preview_final_bill_formats_summary() {
    let preview = BillingService::default().preview_final_bill(&final_bill_form()).unwrap();

    assert_eq!(preview.totals.subtotal, 45000.0);
    assert_eq!(preview.totals.final_payable_amount, 44500.0);
    assert_eq!(preview.summary.total_gross_amount, "₹48000.00");
    assert_eq!(preview.summary.final_payable_amount, "₹44500.00");
}

#[test]
fn test_final_bill_submission_payload() {
    let submission = BillingService::default()
        .final_bill_submission(&final_bill_form())
        .unwrap();
    let body = serde_json::to_value(&submission).unwrap();

    assert_eq!(body["admissionId"], "ADM-2024-0113");
    assert_eq!(body["patientId"], "P-5521");
    assert_eq!(body["bedCharges"], json!({"gross": 15000.0, "discount": 1000.0, "net": 14000.0}));
    assert_eq!(body["otCharges"]["net"], 18000.0);
    assert_eq!(body["totalGrossAmount"], 48000.0);
    assert_eq!(body["totalItemDiscounts"], 3000.0);
    assert_eq!(body["subtotal"], 45000.0);
    assert_eq!(body["additionalDiscountAmount"], 500.0);
    assert_eq!(body["finalPayableAmount"], 44500.0);
}

#[test]
fn test_submission_requires_identifiers_even_when_lenient() {
    let form: FormSnapshot = final_bill_form()
        .iter()
        .filter(|(key, _)| *key != "patientId")
        .collect();

    let err = BillingService::default().final_bill_submission(&form).unwrap_err();
    assert_eq!(err, BillingError::MissingField("patientId".to_string()));

    let console: ConsoleError = err.into();
    assert_eq!(console.kind(), ErrorKind::MissingField);
}

#[test]
fn test_create_bill_submission_payload() {
    let header = FormSnapshot::new()
        .with("admissionId", "ADM-7")
        .with("patientId", "P-9");
    let rows = vec![
        FormSnapshot::new()
            .with("category", "Room")
            .with("description", "General ward, 2 nights")
            .with("quantity", "2")
            .with("unitRate", "500")
            .with("date", "2024-05-01"),
        FormSnapshot::new()
            .with("category", "Procedure")
            .with("description", "Appendectomy")
            .with("quantity", "1")
            .with("unitRate", "5000")
            .with("discount", "1000"),
    ];

    let submission = BillingService::default()
        .create_bill_submission(&header, &rows)
        .unwrap();
    let body = serde_json::to_value(&submission).unwrap();

    assert_eq!(body["grandTotal"], 5000.0);
    assert_eq!(body["items"][0]["date"], "2024-05-01");
    assert_eq!(body["items"][0]["lineTotal"], 1000.0);
    assert_eq!(body["items"][1]["lineTotal"], 4000.0);
    assert_eq!(body["items"][1]["unitRate"], 5000.0);
}

#[test]
fn test_strict_service_surfaces_invalid_number_kind() {
    let form = final_bill_form().with("doctorDiscount", "ten percent");

    let err = strict_service().preview_final_bill(&form).unwrap_err();
    let console: ConsoleError = err.into();

    assert_eq!(console.kind(), ErrorKind::InvalidNumber);
    assert_eq!(console.code(), "VALIDATION_1004");
}

#[test]
fn test_record_payments_against_final_bill() {
    let service = BillingService::default();
    let payable = service
        .preview_final_bill(&final_bill_form())
        .unwrap()
        .totals
        .final_payable_amount;

    let rows = vec![
        FormSnapshot::new().with("amount", "30000").with("method", "card"),
        FormSnapshot::new().with("amount", "4500").with("method", "UPI").with("reference", "UTR991"),
    ];
    let summary = service.record_payments(payable, &rows).unwrap();

    assert_eq!(summary.total_paid, 34500.0);
    assert_eq!(summary.outstanding_balance, 10000.0);
}

#[test]
fn test_payment_errors_name_the_row() {
    let rows = vec![
        FormSnapshot::new().with("amount", "1000").with("method", "cash"),
        FormSnapshot::new().with("amount", "2000"),
    ];
    let err = BillingService::default().record_payments(5000.0, &rows).unwrap_err();
    assert_eq!(err.field(), Some("payments[1].method"));

    let rows = vec![
        FormSnapshot::new().with("amount", "1000").with("method", "cash"),
        FormSnapshot::new().with("amount", "two thousand").with("method", "card"),
    ];
    let err = strict_service().record_payments(5000.0, &rows).unwrap_err();
    assert_eq!(err, BillingError::invalid_number("payments[1].amount", "two thousand"));
}

#[test]
fn test_overpayment_leaves_nothing_outstanding() {
    let rows = vec![FormSnapshot::new().with("amount", "600").with("method", "cash")];
    let summary = BillingService::default().record_payments(500.0, &rows).unwrap();
    assert_eq!(summary.outstanding_balance, 0.0);
}

#[test]
fn test_settings_follow_console_config() {
    let mut config = ConsoleConfig::default();
    config.billing.parse_policy = ParsePolicy::Strict;
    config.billing.currency_symbol = "INR ".to_string();
    config.billing.decimals = 1;

    let service = BillingService::new(BillingSettings::from_config(&config));

    assert_eq!(service.calculator().policy(), ParsePolicy::Strict);
    assert_eq!(service.display().money(12.26), "INR 12.3");
}
