use std::error::Error;
use tutorhub_core::errors::{HubError, HubResult};

#[test]
fn test_hub_error_display() {
    let invalid = HubError::InvalidRequest("weekdays must not be empty".to_string());
    let not_found = HubError::NotFound("Center not found".to_string());
    let persistence = HubError::PersistenceFailure(eyre::eyre!("connection reset"));
    let internal = HubError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        invalid.to_string(),
        "Invalid request: weekdays must not be empty"
    );
    assert_eq!(not_found.to_string(), "Resource not found: Center not found");
    assert!(persistence.to_string().contains("Persistence failure:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_invalid_helper() {
    let err = HubError::invalid(format!("Unknown timezone: {}", "Nowhere/Land"));
    assert!(matches!(err, HubError::InvalidRequest(ref msg) if msg == "Unknown timezone: Nowhere/Land"));
}

#[test]
fn test_eyre_converts_to_persistence_failure() {
    fn fails() -> HubResult<()> {
        Err::<(), _>(eyre::eyre!("insert failed"))?;
        Ok(())
    }

    assert!(matches!(fails(), Err(HubError::PersistenceFailure(_))));
}

#[test]
fn test_internal_keeps_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let hub_error = HubError::Internal(Box::new(io_error));

    assert!(hub_error.source().is_some());
    assert!(hub_error.to_string().contains("IO error"));
}
