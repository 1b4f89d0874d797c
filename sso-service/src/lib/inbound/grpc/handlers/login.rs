use tonic::Status;

use super::require;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AppId;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S>(service: &S, request: LoginRequest) -> Result<LoginResponse, Status>
where
    S: AuthServicePort + ?Sized,
{
    let command = LoginCommand::new(request.email, request.password, AppId(request.app_id));

    require(command.email.as_str(), "email")?;
    require(&command.password, "password")?;

    if command.app_id.0 == 0 {
        return Err(Status::invalid_argument("app_id is required"));
    }

    match service.login(command).await {
        Ok(token) => Ok(LoginResponse { token }),
        Err(AuthError::InvalidCredentials) => {
            Err(Status::invalid_argument("invalid email or password"))
        }
        Err(_) => Err(Status::internal("failed to login")),
    }
}
