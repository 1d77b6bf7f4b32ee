// region:    --- Imports
use super::forms::{DeleteAccountForm, LoginForm, RegisterForm, UpdateProfileForm};
use super::model::{LoginResponse, UserProfile};
use crate::api::AccountApi;
use crate::error::ClientResult;
use crate::session::Session;
use std::sync::Arc;
use tracing::info;

// endregion: --- Imports

// region:    --- Account Service
/// 계정 기능 (폼 검증 + API 호출 + 세션 반영)
pub struct AccountService<A: AccountApi> {
    api: Arc<A>,
    session: Session,
}

impl<A: AccountApi> AccountService<A> {
    pub fn new(api: Arc<A>, session: Session) -> Self {
        Self { api, session }
    }

    pub async fn register(&self, form: &RegisterForm) -> ClientResult<Option<UserProfile>> {
        let request = form.validate()?;
        self.api.register(&request).await
    }

    /// 로그인 성공 시 토큰을 세션에 저장
    pub async fn login(&self, form: &LoginForm) -> ClientResult<LoginResponse> {
        let request = form.validate()?;
        let response = self.api.login(&request).await?;
        self.session.sign_in(&response.token)?;
        info!("{:<12} --> 로그인 성공: {}", "Account", request.email);
        Ok(response)
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.session.sign_out()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn me(&self) -> ClientResult<UserProfile> {
        self.api.fetch_me().await
    }

    pub async fn update_profile(&self, form: &UpdateProfileForm) -> ClientResult<UserProfile> {
        let request = form.validate()?;
        self.api.update_me(&request).await
    }

    /// 탈퇴 성공 시 세션 삭제
    pub async fn delete_account(&self, form: &DeleteAccountForm) -> ClientResult<()> {
        let request = form.validate()?;
        self.api.delete_me(&request).await?;
        self.session.sign_out()?;
        info!("{:<12} --> 회원 탈퇴 완료", "Account");
        Ok(())
    }
}

// endregion: --- Account Service
