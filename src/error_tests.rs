use std::path::PathBuf;

use super::*;

#[test]
fn config_error_displays_message() {
    let err = AuditGuardError::Config("bad fail_on value".to_string());
    assert_eq!(err.to_string(), "Configuration error: bad fail_on value");
}

#[test]
fn file_read_error_includes_path() {
    let err = AuditGuardError::FileRead {
        path: PathBuf::from("src/app.ts"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert!(err.to_string().contains("src/app.ts"));
}

#[test]
fn test_not_found_names_the_id() {
    let err = AuditGuardError::TestNotFound("app.test.ts#Auth#logs in".to_string());
    assert!(err.to_string().contains("app.test.ts#Auth#logs in"));
}

#[test]
fn io_error_converts_via_from() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: AuditGuardError = io.into();
    assert!(matches!(err, AuditGuardError::Io(_)));
}
