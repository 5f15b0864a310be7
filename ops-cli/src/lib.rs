//! Operator CLI for the BedCare billing console
//!
//! Evaluates saved form snapshots the same way the billing pages do, which
//! makes it easy to reproduce a disputed total from a support ticket.
//!
//! # Example Usage
//!
//! ```bash
//! # Final bill summary from a JSON object of field name to text
//! bedcare final-bill final-bill.json
//!
//! # Request body the page would post, rejecting malformed amounts
//! bedcare --strict final-bill final-bill.json --json
//!
//! # Itemized bill ({"admissionId": .., "patientId": .., "items": [..]})
//! bedcare bill bill.json
//!
//! # Outstanding balance after payments
//! bedcare balance final-bill.json --payments payments.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use billing_service::{fields, BillingService, BillingSettings, FormSnapshot, ParsePolicy};
use clap::{Parser, Subcommand};
use config_engine::{ConfigLoader, ConsoleConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "bedcare.yaml";

#[derive(Debug, Parser)]
#[command(name = "bedcare", version, about = "Evaluate BedCare billing form snapshots")]
pub struct Cli {
    /// Configuration file (YAML or TOML); `bedcare.yaml` is used when present
    #[arg(long, global = true, env = "BEDCARE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reject malformed amounts instead of counting them as zero
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Aggregate a "create final bill" form
    FinalBill {
        file: PathBuf,
        /// Print the submission payload instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Aggregate an itemized "create bill" form
    Bill {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Apply payment entries to a final bill
    Balance {
        file: PathBuf,
        #[arg(long)]
        payments: PathBuf,
    },
}

impl Command {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::FinalBill { .. } => "final-bill",
            Self::Bill { .. } => "bill",
            Self::Balance { .. } => "balance",
        }
    }
}

/// Itemized bill document: header identifiers plus one field map per row
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BillDocument {
    #[serde(default)]
    admission_id: String,
    #[serde(default)]
    patient_id: String,
    #[serde(default)]
    items: Vec<FormSnapshot>,
}

impl BillDocument {
    fn header(&self) -> FormSnapshot {
        FormSnapshot::new()
            .with(fields::ADMISSION_ID, self.admission_id.as_str())
            .with(fields::PATIENT_ID, self.patient_id.as_str())
    }
}

impl Cli {
    /// Resolve configuration: explicit file, else `bedcare.yaml` if present,
    /// then `BEDCARE_` environment overrides.
    ///
    /// # Errors
    ///
    /// Any [`config_engine::ConfigError`] from loading.
    pub fn load_config(&self) -> anyhow::Result<ConsoleConfig> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::new().file(path),
            None => ConfigLoader::new().optional_file(DEFAULT_CONFIG_FILE),
        };
        Ok(loader.load()?)
    }

    /// Billing settings with the `--strict` flag applied over configuration
    pub fn settings(&self, config: &ConsoleConfig) -> BillingSettings {
        let settings = BillingSettings::from_config(config);
        if self.strict {
            settings.with_policy(ParsePolicy::Strict)
        } else {
            settings
        }
    }
}

/// Run one command and return what should be printed.
///
/// # Errors
///
/// Unreadable or malformed input files, and billing errors from the service.
pub async fn run(cli: &Cli, service: &BillingService) -> anyhow::Result<String> {
    match &cli.command {
        Command::FinalBill { file, json } => {
            let snapshot: FormSnapshot = read_json(file).await?;
            if *json {
                let submission = service.final_bill_submission(&snapshot)?;
                Ok(serde_json::to_string_pretty(&submission)?)
            } else {
                Ok(service.preview_final_bill(&snapshot)?.summary.to_string())
            }
        }
        Command::Bill { file, json } => {
            let document: BillDocument = read_json(file).await?;
            if *json {
                let submission = service.create_bill_submission(&document.header(), &document.items)?;
                Ok(serde_json::to_string_pretty(&submission)?)
            } else {
                Ok(service.preview_bill(&document.items)?.summary.to_string())
            }
        }
        Command::Balance { file, payments } => {
            let snapshot: FormSnapshot = read_json(file).await?;
            let rows: Vec<FormSnapshot> = read_json(payments).await?;
            let payable = service.preview_final_bill(&snapshot)?.totals.final_payable_amount;
            let summary = service.record_payments(payable, &rows)?;
            let display = service.display();
            Ok(format!(
                "{:<24}{:>16}\n{:<24}{:>16}\n{:<24}{:>16}",
                "Final payable amount",
                display.money(summary.final_payable_amount),
                "Total paid",
                display.money(summary.total_paid),
                "Outstanding balance",
                display.money(summary.outstanding_balance),
            ))
        }
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_json(value: &serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bedcare").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_strict_flag_is_global() {
        let parsed = cli(&["final-bill", "form.json", "--strict"]);
        assert!(parsed.strict);
        let settings = parsed.settings(&ConsoleConfig::default());
        assert_eq!(settings.policy, ParsePolicy::Strict);
    }

    #[test]
    fn test_command_names_match_subcommands() {
        assert_eq!(cli(&["final-bill", "form.json"]).command.name(), "final-bill");
        assert_eq!(cli(&["bill", "bill.json", "--json"]).command.name(), "bill");
        assert_eq!(
            cli(&["balance", "form.json", "--payments", "p.json"]).command.name(),
            "balance"
        );
    }

    #[test]
    fn test_balance_requires_payments() {
        let result = Cli::try_parse_from(["bedcare", "balance", "form.json"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_final_bill_summary_output() {
        let form = write_json(&serde_json::json!({
            "bedGross": "15000", "bedDiscount": "1000", "bedNet": "14000",
            "doctorGross": 8000, "doctorNet": 8000,
            "otGross": "20000", "otDiscount": "2000", "otNet": "18000",
            "miscGross": "5000", "miscNet": "5000",
            "additionalDiscountAmount": ""
        }));
        let parsed = cli(&["final-bill", form.path().to_str().unwrap()]);

        let output = run(&parsed, &BillingService::default()).await.unwrap();

        assert!(output.contains("₹48000.00"));
        assert!(output.contains("₹45000.00"));
    }

    #[tokio::test]
    async fn test_bill_json_output() {
        let bill = write_json(&serde_json::json!({
            "admissionId": "ADM-1",
            "patientId": "P-1",
            "items": [
                {"quantity": "2", "unitRate": "500", "discount": "0"},
                {"quantity": "1", "unitRate": "5000", "discount": "1000"}
            ]
        }));
        let parsed = cli(&["bill", bill.path().to_str().unwrap(), "--json"]);

        let output = run(&parsed, &BillingService::default()).await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(body["grandTotal"], 5000.0);
    }

    #[tokio::test]
    async fn test_balance_output() {
        let form = write_json(&serde_json::json!({"bedNet": "1000"}));
        let payments = write_json(&serde_json::json!([
            {"amount": "400", "method": "cash"}
        ]));
        let parsed = cli(&[
            "balance",
            form.path().to_str().unwrap(),
            "--payments",
            payments.path().to_str().unwrap(),
        ]);

        let output = run(&parsed, &BillingService::default()).await.unwrap();

        assert!(output.contains("Outstanding balance"));
        assert!(output.contains("₹600.00"));
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let parsed = cli(&["final-bill", "/nonexistent/form.json"]);
        let err = run(&parsed, &BillingService::default()).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/form.json"));
    }
}
