//! 백엔드 REST API 클라이언트
//! 기본 URL, Bearer 토큰 첨부, 401 처리(세션 삭제 + 로그인 이동 훅)를 담당한다.
// region:    --- Imports
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Modules
pub mod endpoints;
pub mod envelope;
pub mod favorites;
pub mod goods;
pub mod purchases;
pub mod users;

pub use favorites::FavoriteApi;
pub use goods::{GoodsApi, LiveGoodsQuery};
pub use purchases::PurchaseApi;
pub use users::AccountApi;

// endregion: --- Modules

// region:    --- Api Client
/// 401 응답 시 호출되는 콜백 (로그인 화면 이동)
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// 인증 요구 여부
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    /// 토큰 첨부, 401 은 세션 만료로 처리
    Session,
    /// 로그인/회원가입: 401 은 입력 오류로 처리
    Anonymous,
}

/// HTTP 클라이언트 래퍼
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: crate::config::normalize_base_url(&config.api_base_url),
            session,
            on_unauthorized: None,
        })
    }

    /// 401 콜백 등록
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.http.get(self.url(path));
        self.execute(request, Auth::Session).await
    }

    /// GET + 쿼리 파라미터
    pub(crate) async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.http.get(self.url(path)).query(query);
        self.execute(request, Auth::Session).await
    }

    /// 본문 없는 요청 (DELETE 등)
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> ClientResult<T> {
        let request = self.http.request(method, self.url(path));
        self.execute(request, Auth::Session).await
    }

    /// JSON 본문 요청
    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.request(method, self.url(path)).json(body);
        self.execute(request, Auth::Session).await
    }

    /// 토큰 없이 보내는 JSON 본문 요청
    pub(crate) async fn send_json_anonymous<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.http.request(method, self.url(path)).json(body);
        self.execute(request, Auth::Anonymous).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        auth: Auth,
    ) -> ClientResult<T> {
        let request = match (auth, self.session.token()?) {
            (Auth::Session, Some(token)) => request.bearer_auth(token),
            _ => request,
        };

        let response = request
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status();
        debug!("{:<12} --> {} {}", "Http", status.as_u16(), response.url().path());

        if status == StatusCode::UNAUTHORIZED && auth == Auth::Session {
            self.handle_unauthorized();
            return Err(ClientError::Unauthenticated);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(status, &body);
            return Err(match auth {
                Auth::Anonymous if status == StatusCode::UNAUTHORIZED => {
                    ClientError::ValidationFailed(message)
                }
                _ => ClientError::ProviderUnavailable(message),
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// 세션 삭제 후 로그인 이동 콜백 호출
    fn handle_unauthorized(&self) {
        warn!("{:<12} --> 인증 만료: 세션 삭제 후 로그인으로 이동", "Http");
        if let Err(e) = self.session.sign_out() {
            warn!("{:<12} --> 세션 삭제 실패: {}", "Http", e);
        }
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }
}

/// 실패 응답 본문에서 서버 메시지 추출
fn parse_error_message(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty());

    match message {
        Some(message) => message,
        None if status == StatusCode::NOT_FOUND => "요청한 정보를 찾을 수 없습니다.".to_string(),
        None => format!("서버 요청이 실패했습니다 (HTTP {})", status.as_u16()),
    }
}

// endregion: --- Api Client


// endregion: --- Tests
