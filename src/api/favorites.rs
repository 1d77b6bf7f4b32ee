// region:    --- Imports
use super::endpoints;
use super::envelope::{DataEnvelope, Envelope, FavoriteCheckEnvelope, MessageEnvelope};
use super::ApiClient;
use crate::error::ClientResult;
use crate::favorite::model::Favorite;
use crate::goods::HistoryNo;
use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

// endregion: --- Imports

// region:    --- Favorite Api
/// 관심물건 API (인증 필요)
#[async_trait]
pub trait FavoriteApi: Send + Sync {
    async fn fetch_favorites(&self) -> ClientResult<Vec<Favorite>>;
    async fn add_favorite(&self, favorite: &Favorite) -> ClientResult<Favorite>;
    async fn delete_favorite(&self, id: i64) -> ClientResult<()>;
    async fn delete_favorite_by_goods_no(&self, goods_no: &str) -> ClientResult<()>;
    async fn is_favorite(&self, history_no: &HistoryNo) -> ClientResult<bool>;
}

#[async_trait]
impl FavoriteApi for ApiClient {
    async fn fetch_favorites(&self) -> ClientResult<Vec<Favorite>> {
        info!("{:<12} --> 관심물건 목록 조회", "FavoriteApi");
        let envelope: DataEnvelope<Vec<Favorite>> = self.get_json(endpoints::FAVORITES).await?;
        let envelope = envelope.ensure_success("관심물건 목록을 불러올 수 없습니다.")?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn add_favorite(&self, favorite: &Favorite) -> ClientResult<Favorite> {
        info!(
            "{:<12} --> 관심물건 등록 goodsNo: {:?}",
            "FavoriteApi", favorite.goods_no
        );
        let envelope: DataEnvelope<Favorite> = self
            .send_json(Method::POST, endpoints::FAVORITES, favorite)
            .await?;
        envelope.into_data("관심물건 등록에 실패했습니다.")
    }

    async fn delete_favorite(&self, id: i64) -> ClientResult<()> {
        info!("{:<12} --> 관심물건 삭제 id: {}", "FavoriteApi", id);
        let envelope: MessageEnvelope = self
            .send(Method::DELETE, &endpoints::favorite_by_id(id))
            .await?;
        envelope.ensure_success("관심물건 삭제에 실패했습니다.")?;
        Ok(())
    }

    async fn delete_favorite_by_goods_no(&self, goods_no: &str) -> ClientResult<()> {
        info!("{:<12} --> 관심물건 삭제 goodsNo: {}", "FavoriteApi", goods_no);
        let envelope: MessageEnvelope = self
            .send(Method::DELETE, &endpoints::favorite_by_goods_no(goods_no))
            .await?;
        envelope.ensure_success("관심물건 삭제에 실패했습니다.")?;
        Ok(())
    }

    async fn is_favorite(&self, history_no: &HistoryNo) -> ClientResult<bool> {
        let envelope: FavoriteCheckEnvelope = self
            .get_json(&endpoints::favorite_check(history_no))
            .await?;
        Ok(envelope
            .ensure_success("관심물건 여부를 확인할 수 없습니다.")?
            .is_favorite)
    }
}

// endregion: --- Favorite Api
