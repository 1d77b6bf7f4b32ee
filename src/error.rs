// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Client Error
/// 클라이언트 오류 분류
///
/// 모든 오류는 실패한 지점에서 사용자 메시지로 처리되며 자동 재시도는 없다.
/// `Unauthenticated`만 세션 삭제와 로그인 이동이라는 전역 부수효과를 가진다.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// 네트워크 오류, 실패 상태 코드, 실패 응답(`success: false`)
    #[error("{0}")]
    ProviderUnavailable(String),

    /// 선행 작업 없이 의존 작업을 시도한 경우
    #[error("{0}")]
    PreconditionNotMet(String),

    /// 폼 입력 검증 실패
    #[error("{0}")]
    ValidationFailed(String),

    /// 401 응답
    #[error("로그인이 필요합니다.")]
    Unauthenticated,

    /// 토큰 저장소 입출력 오류
    #[error("세션 저장소 오류: {0}")]
    Storage(String),
}

impl ClientError {
    /// CLI 종료 코드
    pub fn exit_code(&self) -> u8 {
        match self {
            ClientError::Unauthenticated => 3,
            ClientError::ProviderUnavailable(_) => 2,
            ClientError::PreconditionNotMet(_)
            | ClientError::ValidationFailed(_)
            | ClientError::Storage(_) => 1,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::ProviderUnavailable(format!("응답을 해석할 수 없습니다: {}", e))
        } else {
            ClientError::ProviderUnavailable(format!("서버와 통신할 수 없습니다: {}", e))
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

// endregion: --- Client Error
