use provisio_core::catalog::DepartmentCatalog;
use provisio_core::models::row::InputRow;
use provisio_pipeline::validator::validate;

fn catalog() -> DepartmentCatalog {
    DepartmentCatalog::default()
}

fn valid_row() -> InputRow {
    InputRow {
        name: "Alice Smith".to_string(),
        email: "alice.smith@company.com".to_string(),
        department: "Finance".to_string(),
        role: "Analyst".to_string(),
        join_date: "2025-11-15".to_string(),
        status: "active".to_string(),
    }
}

#[test]
fn fully_valid_row_has_no_errors() {
    let outcome = validate(&valid_row(), &catalog());
    assert!(outcome.valid(), "unexpected errors: {:?}", outcome.errors);
}

#[test]
fn inactive_status_is_valid() {
    let row = InputRow {
        status: "inactive".to_string(),
        ..valid_row()
    };
    assert!(validate(&row, &catalog()).valid());
}

#[test]
fn status_is_case_insensitive() {
    let row = InputRow {
        status: "Active".to_string(),
        ..valid_row()
    };
    assert!(validate(&row, &catalog()).valid());
}

#[test]
fn missing_fields_are_each_reported() {
    let row = InputRow {
        name: String::new(),
        role: String::new(),
        ..valid_row()
    };
    let outcome = validate(&row, &catalog());
    assert!(outcome.errors.contains(&"Missing required field: name".to_string()));
    assert!(outcome.errors.contains(&"Missing required field: role".to_string()));
    assert_eq!(outcome.errors.len(), 2);
}

#[test]
fn unknown_department_is_reported_with_its_name() {
    let row = InputRow {
        department: "Sales".to_string(),
        ..valid_row()
    };
    let outcome = validate(&row, &catalog());
    assert_eq!(outcome.errors, vec!["Unknown department: Sales".to_string()]);
}

#[test]
fn bad_email_is_reported() {
    let row = InputRow {
        email: "not-an-email".to_string(),
        ..valid_row()
    };
    let outcome = validate(&row, &catalog());
    assert_eq!(outcome.errors, vec!["Invalid email format".to_string()]);
}

#[test]
fn unparseable_join_date_is_reported() {
    let row = InputRow {
        join_date: "soon".to_string(),
        ..valid_row()
    };
    let outcome = validate(&row, &catalog());
    assert_eq!(outcome.errors, vec!["Invalid join_date".to_string()]);
}

#[test]
fn bad_status_vocabulary_is_reported() {
    let row = InputRow {
        status: "pending".to_string(),
        ..valid_row()
    };
    let outcome = validate(&row, &catalog());
    assert_eq!(
        outcome.errors,
        vec!["Status must be 'active' or 'inactive'".to_string()]
    );
}

#[test]
fn blank_status_reports_both_missing_field_and_vocabulary() {
    let row = InputRow {
        status: String::new(),
        ..valid_row()
    };
    let outcome = validate(&row, &catalog());
    assert!(outcome.errors.contains(&"Missing required field: status".to_string()));
    assert!(outcome
        .errors
        .contains(&"Status must be 'active' or 'inactive'".to_string()));
}

#[test]
fn one_row_can_carry_many_errors() {
    let row = InputRow {
        name: String::new(),
        email: "bad".to_string(),
        department: "Sales".to_string(),
        role: "Analyst".to_string(),
        join_date: "whenever".to_string(),
        status: "maybe".to_string(),
    };
    let outcome = validate(&row, &catalog());
    assert_eq!(outcome.errors.len(), 5);
}

#[test]
fn blank_department_does_not_report_unknown() {
    let row = InputRow {
        department: String::new(),
        ..valid_row()
    };
    let outcome = validate(&row, &catalog());
    assert_eq!(
        outcome.errors,
        vec!["Missing required field: department".to_string()]
    );
}
