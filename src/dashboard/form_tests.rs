#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

use super::form::*;
use crate::models::{Category, Division, Transaction, TxnType};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn filled() -> Draft {
    Draft {
        amount: "5000".into(),
        description: "July salary".into(),
        ..Draft::new(now())
    }
}

#[test]
fn test_new_draft_defaults() {
    let draft = Draft::new(now());
    assert_eq!(draft.kind, TxnType::Income);
    assert_eq!(draft.division, Division::Office);
    assert_eq!(draft.category, Category::Salary);
    assert!(draft.amount.is_empty());
    assert!(draft.description.is_empty());
    assert_eq!(draft.date, "2024-07-01T09:30");
}

#[test]
fn test_draft_from_transaction_copies_fields() {
    let txn = Transaction {
        id: "abc".into(),
        kind: TxnType::Expense,
        division: Division::Personal,
        category: Category::Medical,
        amount: dec!(100.50),
        description: "Checkup".into(),
        date: now(),
    };
    let draft = Draft::from_transaction(&txn);
    assert_eq!(draft.kind, TxnType::Expense);
    assert_eq!(draft.division, Division::Personal);
    assert_eq!(draft.category, Category::Medical);
    assert_eq!(draft.amount, "100.5");
    assert_eq!(draft.description, "Checkup");
    assert_eq!(draft.date, "2024-07-01T09:30");
}

#[test]
fn test_validate_ok() {
    let input = filled().validate().unwrap();
    assert_eq!(input.kind, TxnType::Income);
    assert_eq!(input.amount, dec!(5000));
    assert_eq!(input.description, "July salary");
    assert_eq!(input.date, now());
}

#[test]
fn test_validate_trims_description_and_amount() {
    let draft = Draft {
        amount: " 12.5 ".into(),
        description: "  Lunch ".into(),
        ..Draft::new(now())
    };
    let input = draft.validate().unwrap();
    assert_eq!(input.amount, dec!(12.5));
    assert_eq!(input.description, "Lunch");
}

#[test]
fn test_validate_zero_amount_allowed() {
    let draft = Draft {
        amount: "0".into(),
        ..filled()
    };
    assert_eq!(draft.validate().unwrap().amount, dec!(0));
}

#[test]
fn test_validate_missing_amount() {
    let draft = Draft {
        amount: "   ".into(),
        ..filled()
    };
    assert_eq!(draft.validate(), Err(DraftError::AmountMissing));
}

#[test]
fn test_validate_non_numeric_amount() {
    let draft = Draft {
        amount: "12abc".into(),
        ..filled()
    };
    assert_eq!(draft.validate(), Err(DraftError::AmountInvalid));
}

#[test]
fn test_validate_negative_amount() {
    let draft = Draft {
        amount: "-1".into(),
        ..filled()
    };
    assert_eq!(draft.validate(), Err(DraftError::AmountNegative));
}

#[test]
fn test_validate_empty_description() {
    let draft = Draft {
        description: " ".into(),
        ..filled()
    };
    assert_eq!(draft.validate(), Err(DraftError::DescriptionMissing));
}

#[test]
fn test_validate_bad_date() {
    let draft = Draft {
        date: "01/07/2024".into(),
        ..filled()
    };
    assert_eq!(draft.validate(), Err(DraftError::DateInvalid));
}

#[test]
fn test_draft_error_messages() {
    assert_eq!(DraftError::AmountMissing.to_string(), "Amount is required");
    assert_eq!(DraftError::DescriptionMissing.to_string(), "Description is required");
}

// ── FormState ────────────────────────────────────────────────

#[test]
fn test_closed_form_has_no_draft() {
    let mut form = FormState::default();
    assert!(!form.is_open());
    assert!(form.draft().is_none());
    assert!(form.draft_mut().is_none());
    assert!(form.mode().is_none());
}

#[test]
fn test_submitting_form_is_frozen() {
    let mut form = FormState::Submitting {
        mode: FormMode::Create,
        draft: filled(),
    };
    assert!(form.is_open());
    assert!(form.is_submitting());
    assert!(form.draft().is_some());
    assert!(form.draft_mut().is_none());
}

#[test]
fn test_edit_mode() {
    let form = FormState::Open {
        mode: FormMode::Edit { id: "x".into() },
        draft: filled(),
    };
    assert!(form.is_editing());
    assert_eq!(form.mode(), Some(&FormMode::Edit { id: "x".into() }));
}
