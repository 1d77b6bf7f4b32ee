// region:    --- Imports
use super::endpoints;
use super::envelope::{DataEnvelope, Envelope, MessageEnvelope, UserEnvelope};
use super::ApiClient;
use crate::account::model::{
    DeleteUserRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest,
    UserProfile,
};
use crate::error::ClientResult;
use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

// endregion: --- Imports

// region:    --- Account Api
/// 사용자 API
#[async_trait]
pub trait AccountApi: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<Option<UserProfile>>;
    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse>;
    async fn fetch_me(&self) -> ClientResult<UserProfile>;
    async fn update_me(&self, request: &UpdateUserRequest) -> ClientResult<UserProfile>;
    async fn delete_me(&self, request: &DeleteUserRequest) -> ClientResult<()>;
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> ClientResult<Option<UserProfile>> {
        info!("{:<12} --> 회원가입 요청: email={}", "AccountApi", request.email);
        let envelope: UserEnvelope<UserProfile> = self
            .send_json_anonymous(Method::POST, endpoints::USERS_REGISTER, request)
            .await?;
        Ok(envelope.ensure_success("회원가입에 실패했습니다.")?.user)
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<LoginResponse> {
        info!("{:<12} --> 로그인 요청: email={}", "AccountApi", request.email);
        let envelope: DataEnvelope<LoginResponse> = self
            .send_json_anonymous(Method::POST, endpoints::USERS_LOGIN, request)
            .await?;
        envelope.into_data("로그인에 실패했습니다.")
    }

    async fn fetch_me(&self) -> ClientResult<UserProfile> {
        let envelope: DataEnvelope<UserProfile> = self.get_json(endpoints::USERS_ME).await?;
        envelope.into_data("정보를 불러올 수 없습니다.")
    }

    async fn update_me(&self, request: &UpdateUserRequest) -> ClientResult<UserProfile> {
        info!("{:<12} --> 내 정보 수정", "AccountApi");
        let envelope: DataEnvelope<UserProfile> = self
            .send_json(Method::PUT, endpoints::USERS_ME, request)
            .await?;
        envelope.into_data("정보 수정에 실패했습니다.")
    }

    async fn delete_me(&self, request: &DeleteUserRequest) -> ClientResult<()> {
        info!("{:<12} --> 회원 탈퇴 요청", "AccountApi");
        let envelope: MessageEnvelope = self
            .send_json(Method::DELETE, endpoints::USERS_ME, request)
            .await?;
        envelope.ensure_success("회원 탈퇴에 실패했습니다.")?;
        Ok(())
    }
}

// endregion: --- Account Api
