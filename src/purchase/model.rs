use crate::goods::HistoryNo;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 구매 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseStatus {
    Pending,
    Completed,
    Cancelled,
}

impl PurchaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "대기중",
            PurchaseStatus::Completed => "완료",
            PurchaseStatus::Cancelled => "취소",
        }
    }
}

// 구매 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(default)]
    pub id: Option<i64>,
    pub history_no: HistoryNo,
    pub purchase_price: i64,
    #[serde(default)]
    pub purchase_status: Option<PurchaseStatus>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

// 구매 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub history_no: HistoryNo,
    pub purchase_price: i64,
}
