//! Tests for project, bank and currency payloads

use core_kernel::CurrencyCode;
use domain_directory::{
    BankContact, DirectoryError, NewBank, NewCurrency, NewProject, ProjectPatch, DEFAULT_STATUS,
};

#[test]
fn test_project_with_only_name_gets_defaults() {
    let project = NewProject::new("Bridge").unwrap();
    assert_eq!(project.name, "Bridge");
    assert_eq!(project.status, DEFAULT_STATUS);
    assert!(project.description.is_none());
}

#[test]
fn test_project_name_is_trimmed() {
    let project = NewProject::new("  Tunnel ").unwrap();
    assert_eq!(project.name, "Tunnel");
}

#[test]
fn test_blank_project_name_rejected() {
    let err = NewProject::new("   ").unwrap_err();
    assert!(matches!(err, DirectoryError::EmptyField("name")));
    assert_eq!(err.field(), "name");
}

#[test]
fn test_explicit_status_overrides_default() {
    let project = NewProject::new("Dam")
        .unwrap()
        .with_status(Some("completed".to_string()))
        .unwrap();
    assert_eq!(project.status, "completed");
}

#[test]
fn test_empty_patch() {
    assert!(ProjectPatch::default().is_empty());
    let clear = ProjectPatch {
        description: Some(None),
        ..Default::default()
    };
    assert!(!clear.is_empty());
}

#[test]
fn test_bank_contact_details() {
    let bank = NewBank::new("Ziraat")
        .unwrap()
        .with_contact(BankContact {
            branch_name: Some("Ankara".to_string()),
            ..Default::default()
        });
    assert_eq!(bank.contact.branch_name.as_deref(), Some("Ankara"));
    assert_eq!(bank.status, DEFAULT_STATUS);
}

#[test]
fn test_new_currency_starts_active() {
    let currency = NewCurrency::new(CurrencyCode::new("iqd").unwrap(), "Iraqi Dinar").unwrap();
    assert!(currency.is_active);
    assert_eq!(currency.code.as_str(), "IQD");
}

#[test]
fn test_related_flattens_record_with_null_relations() {
    #[derive(serde::Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        letter_amount: &'static str,
    }

    let related = domain_directory::Related::detached(Row { letter_amount: "100" });
    let json = serde_json::to_value(&related).unwrap();
    assert_eq!(json["letterAmount"], "100");
    assert!(json["bank"].is_null());
    assert!(json["project"].is_null());
    assert!(related.bank_name().is_none());
}
