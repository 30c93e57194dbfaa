use leadflow_domain::{
    AuthSession, ChangePasswordInput, ForgotPasswordInput, GenericResponse, GoogleLoginInput,
    LoginInput, RegisterInput, ResendOtpInput, ResetPasswordInput, VerifyOtpInput,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::ApiCommands;
use crate::api::endpoints;
use crate::api::errors::ApiError;
use crate::http::RequestDescriptor;

impl ApiCommands {
    // === Account lifecycle ===

    /// Create an account; the backend answers by sending an OTP.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: &RegisterInput) -> Result<GenericResponse, ApiError> {
        self.client.post(endpoints::auth::SIGNUP, input).await
    }

    /// Confirm the OTP sent at registration. Stores the session the backend
    /// returns, if any.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn verify_otp(
        &self,
        input: &VerifyOtpInput,
    ) -> Result<GenericResponse<AuthSession>, ApiError> {
        let response: GenericResponse<AuthSession> =
            self.client.post(endpoints::auth::VERIFY_OTP, input).await?;
        self.remember(&response.data).await;
        Ok(response)
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn resend_otp(&self, input: &ResendOtpInput) -> Result<GenericResponse, ApiError> {
        self.client.post(endpoints::auth::RESEND_OTP, input).await
    }

    // === Session ===

    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns the normalized server message on bad credentials
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(
        &self,
        input: &LoginInput,
    ) -> Result<GenericResponse<AuthSession>, ApiError> {
        let response: GenericResponse<AuthSession> =
            self.client.post(endpoints::auth::SIGNIN, input).await?;
        self.remember(&response.data).await;
        info!("signed in");
        Ok(response)
    }

    #[instrument(skip(self, input))]
    pub async fn google_login(
        &self,
        input: &GoogleLoginInput,
    ) -> Result<GenericResponse<AuthSession>, ApiError> {
        let response: GenericResponse<AuthSession> =
            self.client.post(endpoints::auth::GOOGLE, input).await?;
        self.remember(&response.data).await;
        info!("signed in with google");
        Ok(response)
    }

    /// Sign out. The local session is cleared even when the backend call
    /// fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<GenericResponse, ApiError> {
        let result = self.client.post(endpoints::auth::LOGOUT, &json!({})).await;
        self.forget().await;
        result
    }

    /// Check a credential with the backend.
    ///
    /// With `Some(token)` that token is verified instead of the stored one,
    /// and a rejection is returned as is rather than refreshing the session.
    #[instrument(skip(self, access_token))]
    pub async fn verify_session(
        &self,
        access_token: Option<&str>,
    ) -> Result<GenericResponse, ApiError> {
        let mut request = RequestDescriptor::get(endpoints::auth::VERIFY);
        if let Some(token) = access_token {
            request = request
                .with_header("Authorization", &format!("Bearer {token}"))?
                .without_refresh();
        }
        self.client.send(request).await
    }

    // === Passwords ===

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn forgot_password(
        &self,
        input: &ForgotPasswordInput,
    ) -> Result<GenericResponse, ApiError> {
        self.client.post(endpoints::auth::FORGOT_PASSWORD, input).await
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn reset_password(
        &self,
        input: &ResetPasswordInput,
    ) -> Result<GenericResponse, ApiError> {
        self.client.post(endpoints::auth::RESET_PASSWORD, input).await
    }

    #[instrument(skip(self, input))]
    pub async fn change_password(
        &self,
        input: &ChangePasswordInput,
    ) -> Result<GenericResponse<Value>, ApiError> {
        self.client.post(endpoints::auth::CHANGE_PASSWORD, input).await
    }
}
