mod common;

use common::*;
use std::io::Write;
use tempfile::NamedTempFile;
use vault_admin::{load_batch, run_batch, Action, AdminContext, CaseSlot};

#[tokio::test]
async fn test_batch_runs_in_order_and_counts_failures() {
    let submitter = RecordingSubmitter::new()
        .respond_with(success_response("a"))
        .fail_with("object not found")
        .respond_with(success_response("c"));
    let ctx = AdminContext::new(sample_config(), submitter).with_echo(false);

    let actions = vec![
        Action::SetPointsRate { rate: 10_000 },
        Action::Deposit {
            case: CaseSlot::Two,
        },
        Action::PayToBeneficiary {
            case: CaseSlot::One,
            amount: 100,
        },
    ];
    let report = run_batch(&ctx, &actions).await;

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(!report.all_succeeded());
    assert!(!report.outcomes[1].is_success());

    let targets: Vec<String> = ctx.submitter.plans().iter().map(|p| p.target()).collect();
    assert_eq!(
        targets,
        vec![
            "config::set_points_rate",
            "vault::deposit",
            "vault::pay_to_beneficiary"
        ]
    );
}

#[tokio::test]
async fn test_empty_batch_submits_nothing() {
    let ctx = AdminContext::new(sample_config(), RecordingSubmitter::new()).with_echo(false);
    let report = run_batch(&ctx, &[]).await;
    assert!(report.outcomes.is_empty());
    assert!(report.all_succeeded());
    assert!(ctx.submitter.plans().is_empty());
}

#[test]
fn test_load_batch_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"action": "set_points_rate", "rate": 1000}},
            {{"action": "add_case", "beneficiary": "0x9630777ce7127498bc1bcc810054913b38528df6c1e4ab020f0ff12adf34f0af"}},
            {{"action": "deposit", "case": 1}},
            {{"action": "pay_to_beneficiary", "case": 2, "amount": 200000}}
        ]"#
    )
    .unwrap();

    let actions = load_batch(file.path()).unwrap();
    assert_eq!(actions.len(), 4);
    assert_eq!(actions[0], Action::SetPointsRate { rate: 1000 });
    assert_eq!(actions[2], Action::Deposit { case: CaseSlot::One });
    assert_eq!(
        actions[3],
        Action::PayToBeneficiary {
            case: CaseSlot::Two,
            amount: 200_000
        }
    );
}

#[test]
fn test_load_batch_rejects_unknown_action() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"[{{"action": "withdraw_all"}}]"#).unwrap();

    let err = load_batch(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("JSON array of actions"));
}

#[test]
fn test_load_batch_blank_file() {
    let file = NamedTempFile::new().unwrap();
    let err = load_batch(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("is empty"), "{err:#}");
}

#[test]
fn test_load_batch_missing_file() {
    let err = load_batch(std::path::Path::new("/nonexistent/actions.json")).unwrap_err();
    assert!(format!("{err:#}").contains("read /nonexistent/actions.json"));
}
