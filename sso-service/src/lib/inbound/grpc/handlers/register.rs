use tonic::Status;

use super::require;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S>(service: &S, request: RegisterRequest) -> Result<RegisterResponse, Status>
where
    S: AuthServicePort + ?Sized,
{
    let command = RegisterCommand::new(request.email, request.password);

    require(command.email.as_str(), "email")?;
    require(&command.password, "password")?;

    match service.register(command).await {
        Ok(user_id) => Ok(RegisterResponse { user_id: user_id.0 }),
        Err(AuthError::UserExists) => Err(Status::already_exists("user already exists")),
        Err(_) => Err(Status::internal("failed to register user")),
    }
}
