//! 구매 버튼 상태
//! 같은 물건이력번호로 구매 기록이 하나라도 있으면 비활성화된다.
// region:    --- Imports
use super::model::{Purchase, PurchaseRequest};
use crate::api::PurchaseApi;
use crate::error::{ClientError, ClientResult};
use crate::goods::{Goods, HistoryNo};
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

/// 서버가 중복 구매를 거절할 때 메시지에 포함되는 문구
const ALREADY_PURCHASED: &str = "이미 구매";

pub struct PurchaseAction<A: PurchaseApi> {
    api: Arc<A>,
    history_no: HistoryNo,
    purchase_price: i64,
    records: Vec<Purchase>,
    disabled: bool,
}

impl<A: PurchaseApi> PurchaseAction<A> {
    /// 구매가는 최저입찰가
    pub fn for_goods(api: Arc<A>, goods: &Goods) -> ClientResult<Self> {
        let history_no = goods.history_no.clone().ok_or_else(|| {
            ClientError::PreconditionNotMet("물건이력번호가 없는 물건입니다.".to_string())
        })?;
        let purchase_price = goods.min_bid_price.ok_or_else(|| {
            ClientError::PreconditionNotMet("최저입찰가가 없는 물건은 구매할 수 없습니다.".to_string())
        })?;
        Ok(Self {
            api,
            history_no,
            purchase_price,
            records: Vec::new(),
            disabled: false,
        })
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn records(&self) -> &[Purchase] {
        &self.records
    }

    pub fn purchase_price(&self) -> i64 {
        self.purchase_price
    }

    /// 구매 이력 조회 후 버튼 상태 갱신
    pub async fn refresh(&mut self) -> ClientResult<bool> {
        self.records = self
            .api
            .fetch_purchases_by_history_no(&self.history_no)
            .await?;
        self.disabled = !self.records.is_empty();
        Ok(self.disabled)
    }

    pub async fn purchase(&mut self) -> ClientResult<Purchase> {
        if self.disabled {
            return Err(ClientError::PreconditionNotMet(
                "이미 구매한 물건입니다.".to_string(),
            ));
        }

        let request = PurchaseRequest {
            history_no: self.history_no.clone(),
            purchase_price: self.purchase_price,
        };
        match self.api.create_purchase(&request).await {
            Ok(purchase) => {
                info!(
                    "{:<12} --> 구매 완료 historyNo: {}",
                    "Purchase", self.history_no
                );
                self.records.push(purchase.clone());
                self.disabled = true;
                Ok(purchase)
            }
            Err(e) => {
                if let ClientError::ProviderUnavailable(message) = &e {
                    if message.contains(ALREADY_PURCHASED) {
                        self.disabled = true;
                    }
                }
                warn!("{:<12} --> 구매 실패: {}", "Purchase", e);
                Err(e)
            }
        }
    }
}
