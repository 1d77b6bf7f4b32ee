// region:    --- Imports
use crate::error::{ClientError, ClientResult};
use crate::goods::Goods;
use chrono::NaiveDateTime;
use serde::Deserialize;

// endregion: --- Imports

// region:    --- Envelope Trait
/// 서버 공통 응답 래퍼 (`success`, `message`)
pub trait Envelope {
    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;

    /// `success: false` 이면 서버 메시지(없으면 `fallback`)로 오류 변환
    fn ensure_success(self, fallback: &str) -> ClientResult<Self>
    where
        Self: Sized,
    {
        if self.success() {
            return Ok(self);
        }
        let message = self
            .message()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string();
        Err(ClientError::ProviderUnavailable(message))
    }
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Envelope for $ty {
                fn success(&self) -> bool {
                    self.success
                }

                fn message(&self) -> Option<&str> {
                    self.message.as_deref()
                }
            }
        )*
    };
}

// endregion: --- Envelope Trait

// region:    --- Envelopes
/// `GET /goods` 응답
#[derive(Debug, Deserialize)]
pub struct LiveGoodsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<GoodsPage>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsPage {
    #[serde(default)]
    pub items: Vec<Goods>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub page_no: Option<u32>,
    #[serde(default)]
    pub num_of_rows: Option<u32>,
}

/// `items` 목록 응답
#[derive(Debug, Deserialize)]
pub struct ItemsEnvelope<T> {
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` 단건/목록 응답
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 회원가입 응답
#[derive(Debug, Deserialize)]
pub struct UserEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub user: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 일괄 저장 응답
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedEnvelope {
    pub success: bool,
    #[serde(default)]
    pub saved_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// 삭제 응답
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedEnvelope {
    pub success: bool,
    #[serde(default)]
    pub deleted_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// 동기화 상태 응답
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatusEnvelope {
    pub success: bool,
    #[serde(default)]
    pub last_synced_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 관심물건 여부 응답
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheckEnvelope {
    pub success: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// 메시지만 있는 응답
#[derive(Debug, Deserialize)]
pub struct MessageEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl_envelope!(
    LiveGoodsEnvelope,
    SavedEnvelope,
    DeletedEnvelope,
    SyncStatusEnvelope,
    FavoriteCheckEnvelope,
    MessageEnvelope,
);

impl<T> Envelope for ItemsEnvelope<T> {
    fn success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl<T> Envelope for DataEnvelope<T> {
    fn success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl<T> Envelope for UserEnvelope<T> {
    fn success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl<T> DataEnvelope<T> {
    /// 성공 응답의 `data` (없으면 오류)
    pub fn into_data(self, fallback: &str) -> ClientResult<T> {
        let envelope = self.ensure_success(fallback)?;
        envelope
            .data
            .ok_or_else(|| ClientError::ProviderUnavailable(fallback.to_string()))
    }
}

// endregion: --- Envelopes
