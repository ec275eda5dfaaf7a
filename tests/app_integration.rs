use finnorm::cli::OutputFormat;
use finnorm::core::transaction::ValidationStatus;
use finnorm::{AppCommand, CommandOutput, execute, run_command};
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use tracing::info;

mod test_utils {
    use std::path::{Path, PathBuf};

    pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    pub const TRANSACTIONS: &str = r#"[
        {
            "id": "tx-1",
            "source": "SGG:Sales",
            "category": "Social Gas Sales",
            "amount": 10000,
            "currency": "USD",
            "date": "2024-03-05"
        },
        {
            "id": "tx-2",
            "source": "HQ",
            "category": "Settlement X",
            "amount": 15000,
            "currency": "GEL",
            "counterparty": "SGG",
            "date": "2024-03-28"
        },
        {
            "id": "tx-3",
            "source": "HQ:Admin",
            "category": "Office Rent",
            "amount": 1800.50,
            "currency": "EUR"
        }
    ]"#;

    pub const HIERARCHY: &str = r#"{
        "assets": {
            "id": "assets",
            "label": "Assets",
            "children": [
                { "id": "cash", "label": "Cash", "value": { "budget": 500, "actual": 450 } },
                { "id": "receivables", "label": "Receivables", "value": { "budget": 300, "actual": 350 } }
            ]
        },
        "liabilities": {
            "id": "liabilities",
            "label": "Liabilities",
            "children": [
                { "id": "loans", "label": "Loans", "value": { "budget": 400, "actual": 400 } }
            ]
        },
        "equity": {
            "id": "equity",
            "label": "Equity",
            "value": { "budget": 400, "actual": 400 }
        }
    }"#;
}

fn config_file(dir: &Path) -> String {
    let path = dir.join("config.yaml");
    finnorm::cli::setup::setup_at_path(&path).expect("Failed to write config");
    path.to_str().unwrap().to_string()
}

fn map_command(input: &Path) -> AppCommand {
    AppCommand::Map {
        input: input.to_path_buf(),
        company: None,
        period: None,
    }
}

#[test_log::test(tokio::test)]
async fn test_map_command_with_reference_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = config_file(dir.path());
    let input = test_utils::write_file(dir.path(), "tx.json", test_utils::TRANSACTIONS);

    let output = execute(map_command(&input), Some(&config_path))
        .await
        .expect("Map failed");
    let CommandOutput::Mapping(report) = output else {
        panic!("Expected a mapping report, got {output:?}");
    };

    assert_eq!(report.target_currency, "GEL");
    assert_eq!(report.transactions.len(), 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.flagged, 1);
    assert_eq!(report.unmapped, 1);

    let revenue = &report.transactions[0];
    assert_eq!(revenue.id, "tx-1");
    assert_eq!(revenue.target_account, "4-4001-01");
    assert_eq!(revenue.currency.converted, dec!(27000));
    assert_eq!(revenue.validation.status, ValidationStatus::Ok);

    let settlement = &report.transactions[1];
    assert_eq!(settlement.id, "tx-2");
    assert!(settlement.source_entity.is_company());
    assert_eq!(settlement.target_account, "9-9999 (Unmapped)");
    assert_eq!(settlement.validation.status, ValidationStatus::Error);

    let rent = &report.transactions[2];
    assert_eq!(rent.target_account, "7-7002-01");
    assert_eq!(rent.currency.rate, dec!(2.9));
    assert_eq!(rent.currency.converted, dec!(5221.45));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["transactions"][1]["validation"]["status"], "error");
    assert_eq!(json["transactions"][0]["source_entity"]["type"], "department");

    for format in [OutputFormat::Table, OutputFormat::Json] {
        let result = run_command(map_command(&input), Some(&config_path), format).await;
        assert!(result.is_ok(), "Map failed with: {:?}", result.err());
    }
}

#[test_log::test(tokio::test)]
async fn test_map_command_with_context() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = config_file(dir.path());
    let input = test_utils::write_file(dir.path(), "tx.json", test_utils::TRANSACTIONS);

    let output = execute(
        AppCommand::Map {
            input,
            company: Some("HQ".to_string()),
            period: Some("2024-03".parse().unwrap()),
        },
        Some(&config_path),
    )
    .await
    .expect("Map failed");
    let CommandOutput::Mapping(report) = output else {
        panic!("Expected a mapping report, got {output:?}");
    };

    // tx-1 belongs to SGG and tx-3 is undated
    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.transactions[0].id, "tx-2");
    assert_eq!(report.flagged, 1);
    assert_eq!(report.context.company.as_deref(), Some("HQ"));
}

#[test_log::test(tokio::test)]
async fn test_aggregate_and_balance_commands() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = config_file(dir.path());
    let input = test_utils::write_file(dir.path(), "sheet.json", test_utils::HIERARCHY);

    let output = execute(
        AppCommand::Aggregate {
            input: input.clone(),
        },
        None,
    )
    .await
    .expect("Aggregate failed");
    let CommandOutput::Aggregation(aggregated) = output else {
        panic!("Expected an aggregated hierarchy, got {output:?}");
    };
    assert_eq!(aggregated.assets.value.budget, dec!(800));
    assert_eq!(aggregated.assets.value.actual, dec!(800));
    assert_eq!(aggregated.assets.value.variance, dec!(0));
    assert_eq!(
        aggregated.assets.find("cash").map(|n| n.value.variance),
        Some(dec!(-50))
    );
    assert_eq!(aggregated.liabilities.value.actual, dec!(400));
    assert_eq!(aggregated.equity.value.actual, dec!(400));

    let output = execute(
        AppCommand::Balance {
            input: input.clone(),
        },
        Some(&config_path),
    )
    .await
    .expect("Balance failed");
    let CommandOutput::Balance(check) = output else {
        panic!("Expected a balance check, got {output:?}");
    };
    assert!(check.is_valid);
    assert_eq!(check.diff, dec!(0));
    assert_eq!(check.assets_total, dec!(800));

    let json = serde_json::to_value(check).unwrap();
    assert_eq!(json["isValid"], true);

    let result = run_command(
        AppCommand::Aggregate {
            input: input.clone(),
        },
        None,
        OutputFormat::Table,
    )
    .await;
    assert!(result.is_ok(), "Aggregate failed with: {:?}", result.err());

    let result = run_command(
        AppCommand::Balance { input },
        Some(&config_path),
        OutputFormat::Json,
    )
    .await;
    assert!(result.is_ok(), "Balance failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_out_of_balance_sheet_is_not_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = config_file(dir.path());
    let unbalanced = test_utils::HIERARCHY.replace(
        r#""label": "Loans", "value": { "budget": 400, "actual": 400 }"#,
        r#""label": "Loans", "value": { "budget": 400, "actual": 900 }"#,
    );
    assert_ne!(unbalanced, test_utils::HIERARCHY);
    let input = test_utils::write_file(dir.path(), "sheet.json", &unbalanced);

    let output = execute(
        AppCommand::Balance {
            input: input.clone(),
        },
        Some(&config_path),
    )
    .await
    .expect("Balance failed");
    let CommandOutput::Balance(check) = output else {
        panic!("Expected a balance check, got {output:?}");
    };
    assert!(!check.is_valid);
    assert_eq!(check.diff, dec!(-500));
    assert_eq!(check.liabilities_total, dec!(900));

    let result = run_command(
        AppCommand::Balance { input },
        Some(&config_path),
        OutputFormat::Table,
    )
    .await;
    assert!(result.is_ok(), "Balance failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_input_reports_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = config_file(dir.path());
    let missing = dir.path().join("missing.json");

    let result = execute(map_command(&missing), Some(&config_path)).await;

    let err = result.expect_err("Missing input should fail");
    info!(%err, "Received expected error");
    assert!(err.to_string().contains("missing.json"));
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = test_utils::write_file(
        dir.path(),
        "config.yaml",
        "currency: GEL\nrates:\n  - { from: USD, to: GEL, rate: -1 }\n",
    );
    let input = test_utils::write_file(dir.path(), "tx.json", test_utils::TRANSACTIONS);

    let result = run_command(
        AppCommand::Map {
            input,
            company: None,
            period: None,
        },
        config_path.to_str(),
        OutputFormat::Table,
    )
    .await;

    let err = result.expect_err("Invalid config should fail");
    assert!(format!("{err:#}").contains("must be positive"));
    assert!(fs::read_to_string(&config_path).unwrap().contains("rate: -1"));
}
