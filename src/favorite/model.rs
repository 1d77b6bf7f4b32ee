use crate::goods::{Goods, HistoryNo};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// 관심물건 모델 (등록 시점의 물건 정보 스냅샷 포함)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_no: Option<HistoryNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bid_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_close_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Favorite {
    /// 등록 요청 본문 (물건 스냅샷)
    pub fn snapshot_of(goods: &Goods) -> Self {
        Self {
            history_no: goods.history_no.clone(),
            goods_no: goods.goods_no.clone(),
            goods_name: goods.goods_name.clone(),
            min_bid_price: goods.min_bid_price,
            bid_close_date: goods.bid_close_date.clone(),
            ..Self::default()
        }
    }
}
