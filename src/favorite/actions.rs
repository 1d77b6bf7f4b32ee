//! 관심물건 등록/해제
//! 서버 확인 후에만 로컬 상태를 바꾼다 (낙관적 갱신 없음).
// region:    --- Imports
use super::model::Favorite;
use crate::api::FavoriteApi;
use crate::error::{ClientError, ClientResult};
use crate::goods::Goods;
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Favorite Toggle
/// 물건 한 건의 관심 상태
pub struct FavoriteToggle<A: FavoriteApi> {
    api: Arc<A>,
    goods: Goods,
    is_favorite: bool,
}

impl<A: FavoriteApi> FavoriteToggle<A> {
    pub fn new(api: Arc<A>, goods: Goods) -> Self {
        Self {
            api,
            goods,
            is_favorite: false,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn goods(&self) -> &Goods {
        &self.goods
    }

    /// 서버 기준 관심 여부 재조회
    pub async fn refresh(&mut self) -> ClientResult<bool> {
        let history_no = self.goods.history_no.as_ref().ok_or_else(|| {
            ClientError::PreconditionNotMet("물건이력번호가 없는 물건입니다.".to_string())
        })?;
        self.is_favorite = self.api.is_favorite(history_no).await?;
        Ok(self.is_favorite)
    }

    /// 등록/해제 후 확정된 상태 반환. 실패하면 상태는 그대로다.
    pub async fn toggle(&mut self) -> ClientResult<bool> {
        let result = if self.is_favorite {
            self.remove().await
        } else {
            self.add().await
        };

        match result {
            Ok(()) => {
                self.is_favorite = !self.is_favorite;
                info!(
                    "{:<12} --> 관심물건 {}: {:?}",
                    "Favorite",
                    if self.is_favorite { "등록" } else { "해제" },
                    self.goods.goods_no
                );
                Ok(self.is_favorite)
            }
            Err(e) => {
                warn!("{:<12} --> 관심물건 변경 실패: {}", "Favorite", e);
                Err(e)
            }
        }
    }

    async fn add(&self) -> ClientResult<()> {
        self.api
            .add_favorite(&Favorite::snapshot_of(&self.goods))
            .await?;
        Ok(())
    }

    async fn remove(&self) -> ClientResult<()> {
        let goods_no = self.goods.goods_no.as_deref().ok_or_else(|| {
            ClientError::PreconditionNotMet("물건관리번호가 없는 물건입니다.".to_string())
        })?;
        self.api.delete_favorite_by_goods_no(goods_no).await
    }
}

// endregion: --- Favorite Toggle

// region:    --- Favorite List
/// 내 관심물건 목록
pub struct FavoriteList<A: FavoriteApi> {
    api: Arc<A>,
    items: Vec<Favorite>,
}

impl<A: FavoriteApi> FavoriteList<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[Favorite] {
        &self.items
    }

    pub async fn load(&mut self) -> ClientResult<&[Favorite]> {
        self.items = self.api.fetch_favorites().await?;
        Ok(&self.items)
    }

    /// id 로 삭제, 서버 확인 후 목록에서 제거
    pub async fn remove(&mut self, id: i64) -> ClientResult<()> {
        self.api.delete_favorite(id).await?;
        self.items.retain(|favorite| favorite.id != Some(id));
        Ok(())
    }
}

// endregion: --- Favorite List
