use lumbung::repl::statement::{PrepareError, Statement, prepare_statement};

#[test]
fn test_prepare_insert() {
    let statement = prepare_statement("insert 1 alice alice@example.com").unwrap();
    match statement {
        Statement::Insert(row) => {
            assert_eq!(row.id, 1);
            assert_eq!(row.username, "alice");
            assert_eq!(row.email, "alice@example.com");
        }
        _ => panic!("Expected Insert statement"),
    }
}

#[test]
fn test_prepare_select() {
    assert_eq!(prepare_statement("select").unwrap(), Statement::Select);
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(prepare_statement("SELECT").unwrap(), Statement::Select);
    assert!(matches!(
        prepare_statement("INSERT 1 a b").unwrap(),
        Statement::Insert(_)
    ));
}

#[test]
fn test_insert_with_missing_tokens_is_syntax_error() {
    assert!(matches!(
        prepare_statement("insert 1 alice"),
        Err(PrepareError::Syntax(_))
    ));
    assert!(matches!(
        prepare_statement("insert"),
        Err(PrepareError::Syntax(_))
    ));
}

#[test]
fn test_insert_with_non_numeric_id_is_syntax_error() {
    assert!(matches!(
        prepare_statement("insert abc alice alice@example.com"),
        Err(PrepareError::Syntax(_))
    ));
}

#[test]
fn test_negative_id_is_rejected() {
    assert_eq!(
        prepare_statement("insert -1 alice alice@example.com"),
        Err(PrepareError::NegativeId)
    );
}

#[test]
fn test_id_beyond_u32_is_syntax_error() {
    assert!(matches!(
        prepare_statement("insert 4294967296 alice alice@example.com"),
        Err(PrepareError::Syntax(_))
    ));
}

#[test]
fn test_overlong_username_is_rejected() {
    let username = "a".repeat(33);
    let input = format!("insert 1 {} alice@example.com", username);
    assert_eq!(prepare_statement(&input), Err(PrepareError::StringTooLong));
}

#[test]
fn test_overlong_email_is_rejected() {
    let email = "b".repeat(256);
    let input = format!("insert 1 alice {}", email);
    assert_eq!(prepare_statement(&input), Err(PrepareError::StringTooLong));
}

#[test]
fn test_maximum_length_fields_are_accepted() {
    let username = "a".repeat(32);
    let email = "b".repeat(255);
    let input = format!("insert 1 {} {}", username, email);
    assert!(matches!(
        prepare_statement(&input).unwrap(),
        Statement::Insert(_)
    ));
}

#[test]
fn test_unrecognized_statement() {
    assert_eq!(
        prepare_statement("update 1 alice alice@example.com"),
        Err(PrepareError::UnrecognizedStatement(
            "update 1 alice alice@example.com".to_string()
        ))
    );
}

#[test]
fn test_extra_tokens_are_ignored() {
    let statement = prepare_statement("insert 1 alice alice@example.com extra tokens").unwrap();
    match statement {
        Statement::Insert(row) => assert_eq!(row.email, "alice@example.com"),
        _ => panic!("Expected Insert statement"),
    }
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    assert_eq!(prepare_statement("  select  ").unwrap(), Statement::Select);
}

#[test]
fn test_prepare_error_messages() {
    assert_eq!(
        prepare_statement("frobnicate").unwrap_err().to_string(),
        "Unrecognized keyword at start of 'frobnicate'"
    );
    assert_eq!(
        prepare_statement("insert -1 a b").unwrap_err().to_string(),
        "ID must be positive"
    );
}
