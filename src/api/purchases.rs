// region:    --- Imports
use super::endpoints;
use super::envelope::{DataEnvelope, DeletedEnvelope, Envelope, ItemsEnvelope};
use super::ApiClient;
use crate::error::ClientResult;
use crate::goods::HistoryNo;
use crate::purchase::model::{Purchase, PurchaseRequest};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Purchase Api
/// 구매 API
#[async_trait]
pub trait PurchaseApi: Send + Sync {
    async fn create_purchase(&self, request: &PurchaseRequest) -> ClientResult<Purchase>;
    async fn fetch_purchases_by_history_no(&self, history_no: &HistoryNo)
        -> ClientResult<Vec<Purchase>>;
    async fn fetch_all_purchases(&self) -> ClientResult<Vec<Purchase>>;
    async fn reset_purchases(&self) -> ClientResult<u64>;
}

#[async_trait]
impl PurchaseApi for ApiClient {
    async fn create_purchase(&self, request: &PurchaseRequest) -> ClientResult<Purchase> {
        info!(
            "{:<12} --> 구매 생성 historyNo: {}, price: {}",
            "PurchaseApi", request.history_no, request.purchase_price
        );
        let envelope: DataEnvelope<Purchase> = self
            .send_json(Method::POST, endpoints::PURCHASES, request)
            .await?;
        envelope.into_data("구매에 실패했습니다.")
    }

    async fn fetch_purchases_by_history_no(
        &self,
        history_no: &HistoryNo,
    ) -> ClientResult<Vec<Purchase>> {
        info!("{:<12} --> 구매 이력 조회 historyNo: {}", "PurchaseApi", history_no);
        let envelope: ItemsEnvelope<Purchase> = self
            .get_json(&endpoints::purchases_by_history_no(history_no))
            .await?;
        Ok(envelope
            .ensure_success("구매 이력을 불러올 수 없습니다.")?
            .items)
    }

    async fn fetch_all_purchases(&self) -> ClientResult<Vec<Purchase>> {
        info!("{:<12} --> 전체 구매 이력 조회", "PurchaseApi");
        let envelope: ItemsEnvelope<Purchase> = self.get_json(endpoints::PURCHASES).await?;
        Ok(envelope
            .ensure_success("구매 목록을 불러올 수 없습니다.")?
            .items)
    }

    async fn reset_purchases(&self) -> ClientResult<u64> {
        warn!("{:<12} --> 구매 이력 초기화 요청", "PurchaseApi");
        let envelope: DeletedEnvelope = self.send(Method::DELETE, endpoints::PURCHASES_RESET).await?;
        Ok(envelope
            .ensure_success("구매 이력 초기화에 실패했습니다.")?
            .deleted_count)
    }
}

// endregion: --- Purchase Api
