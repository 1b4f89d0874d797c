use tonic::Status;

pub mod login;
pub mod register;

/// Reject an empty required string field. Emails are checked after normalization.
fn require(value: &str, field: &str) -> Result<(), Status> {
    if value.is_empty() {
        return Err(Status::invalid_argument(format!("{} is required", field)));
    }
    Ok(())
}
