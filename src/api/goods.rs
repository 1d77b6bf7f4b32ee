// region:    --- Imports
use super::endpoints;
use super::envelope::{
    DataEnvelope, DeletedEnvelope, Envelope, GoodsPage, ItemsEnvelope, LiveGoodsEnvelope,
    SavedEnvelope, SyncStatusEnvelope,
};
use super::ApiClient;
use crate::error::ClientResult;
use crate::goods::{Goods, HistoryNo};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Method;
use tracing::info;

// endregion: --- Imports

// region:    --- Goods Api Trait
/// 공매물건 API
#[async_trait]
pub trait GoodsApi: Send + Sync {
    /// 외부 API 직접 조회 (`GET /goods`)
    async fn fetch_live_goods(&self, query: &LiveGoodsQuery) -> ClientResult<GoodsPage>;

    /// DB 미러 전체 조회 (`GET /goods/db`)
    async fn fetch_persisted_goods(&self) -> ClientResult<Vec<Goods>>;

    /// DB 물건 상세 조회
    async fn fetch_goods_detail(&self, history_no: &HistoryNo) -> ClientResult<Goods>;

    /// 전체 교체 저장, 저장 건수 반환
    async fn save_goods_batch(&self, goods: &[Goods]) -> ClientResult<u64>;

    /// 전체 삭제, 삭제 건수 반환
    async fn delete_all_goods(&self) -> ClientResult<u64>;

    /// 마지막 DB 동기화 시각
    async fn fetch_sync_status(&self) -> ClientResult<Option<NaiveDateTime>>;
}

/// `GET /goods` 조회 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveGoodsQuery {
    pub page_no: u32,
    pub num_of_rows: u32,
    /// 빈 값이 제거된 필터 파라미터
    pub filters: Vec<(String, String)>,
}

impl LiveGoodsQuery {
    pub fn new(page_no: u32, num_of_rows: u32) -> Self {
        Self {
            page_no,
            num_of_rows,
            filters: Vec::new(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<(String, String)>) -> Self {
        self.filters = filters
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .collect();
        self
    }

    /// 쿼리스트링 파라미터
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("pageNo".to_string(), self.page_no.to_string()),
            ("numOfRows".to_string(), self.num_of_rows.to_string()),
        ];
        params.extend(self.filters.iter().cloned());
        params
    }
}

// endregion: --- Goods Api Trait

// region:    --- Goods Api Impl
#[async_trait]
impl GoodsApi for ApiClient {
    async fn fetch_live_goods(&self, query: &LiveGoodsQuery) -> ClientResult<GoodsPage> {
        info!(
            "{:<12} --> 온비드 물건 조회: pageNo={}, numOfRows={}",
            "GoodsApi", query.page_no, query.num_of_rows
        );
        let envelope: LiveGoodsEnvelope = self
            .get_json_with_query(endpoints::GOODS, &query.params())
            .await?;
        let envelope = envelope.ensure_success("물건 정보를 불러올 수 없습니다.")?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn fetch_persisted_goods(&self) -> ClientResult<Vec<Goods>> {
        info!("{:<12} --> DB 물건 목록 조회", "GoodsApi");
        let envelope: ItemsEnvelope<Goods> = self.get_json(endpoints::GOODS_DB).await?;
        Ok(envelope
            .ensure_success("DB 물건 목록을 불러올 수 없습니다.")?
            .items)
    }

    async fn fetch_goods_detail(&self, history_no: &HistoryNo) -> ClientResult<Goods> {
        info!("{:<12} --> DB 물건 상세 조회 historyNo: {}", "GoodsApi", history_no);
        let envelope: DataEnvelope<Goods> = self
            .get_json(&endpoints::goods_db_detail(history_no))
            .await?;
        envelope.into_data("물건 정보를 불러올 수 없습니다.")
    }

    async fn save_goods_batch(&self, goods: &[Goods]) -> ClientResult<u64> {
        info!("{:<12} --> 물건 일괄 저장: {}건", "GoodsApi", goods.len());
        let envelope: SavedEnvelope = self
            .send_json(Method::POST, endpoints::GOODS_DB_BATCH, goods)
            .await?;
        Ok(envelope
            .ensure_success("물건 목록 저장에 실패했습니다.")?
            .saved_count)
    }

    async fn delete_all_goods(&self) -> ClientResult<u64> {
        info!("{:<12} --> 물건 전체 삭제", "GoodsApi");
        let envelope: DeletedEnvelope = self.send(Method::DELETE, endpoints::GOODS_DB_ALL).await?;
        Ok(envelope
            .ensure_success("물건 삭제에 실패했습니다.")?
            .deleted_count)
    }

    async fn fetch_sync_status(&self) -> ClientResult<Option<NaiveDateTime>> {
        let envelope: SyncStatusEnvelope = self.get_json(endpoints::GOODS_REFRESH_STATUS).await?;
        Ok(envelope
            .ensure_success("동기화 상태를 불러올 수 없습니다.")?
            .last_synced_at)
    }
}

// endregion: --- Goods Api Impl
