#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use onbid_client::api::envelope::GoodsPage;
use onbid_client::api::{GoodsApi, LiveGoodsQuery};
use onbid_client::error::{ClientError, ClientResult};
use onbid_client::goods::{Goods, HistoryNo};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 트레이싱 초기화 (여러 테스트에서 호출돼도 안전)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// 테스트용 물건
pub fn goods(history_no: u64, goods_no: &str) -> Goods {
    Goods {
        history_no: Some(HistoryNo::from(history_no)),
        goods_no: Some(goods_no.to_string()),
        goods_name: Some(format!("물건 {}", goods_no)),
        ..Goods::default()
    }
}

pub fn goods_with_price(history_no: u64, goods_no: &str, min_bid_price: i64) -> Goods {
    Goods {
        min_bid_price: Some(min_bid_price),
        ..goods(history_no, goods_no)
    }
}

/// 같은 태그(goods_detail)를 가진 물건 n건
pub fn tagged_goods(count: u64, tag: &str) -> Vec<Goods> {
    (1..=count)
        .map(|i| Goods {
            goods_detail: Some(tag.to_string()),
            ..goods(i, &format!("G-{:04}", i))
        })
        .collect()
}

pub fn timestamp(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("유효한 시각")
}

/// 호출 횟수와 지연을 조절할 수 있는 가짜 물건 API
#[derive(Default)]
pub struct FakeGoodsApi {
    pub live: Mutex<Vec<Goods>>,
    pub live_error: Mutex<Option<ClientError>>,
    pub last_live_query: Mutex<Option<LiveGoodsQuery>>,
    pub db: Mutex<Vec<Goods>>,
    /// 설정되면 DB 조회가 이 오류로 실패
    pub db_error: Mutex<Option<ClientError>>,
    /// DB 조회 호출별 (지연, 응답). 비어 있으면 `db` 를 즉시 반환
    pub db_script: Mutex<VecDeque<(Duration, Vec<Goods>)>>,
    pub db_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    /// 동기화 시각 응답 순서 (마지막 값은 계속 반복)
    pub sync_statuses: Mutex<VecDeque<ClientResult<Option<NaiveDateTime>>>>,
    pub sync_calls: AtomicUsize,
}

impl FakeGoodsApi {
    pub fn with_live(items: Vec<Goods>) -> Self {
        let api = Self::default();
        *api.live.lock().unwrap() = items;
        api
    }

    pub fn with_db(items: Vec<Goods>) -> Self {
        let api = Self::default();
        *api.db.lock().unwrap() = items;
        api
    }

    pub fn script_db(&self, delay: Duration, items: Vec<Goods>) {
        self.db_script.lock().unwrap().push_back((delay, items));
    }

    pub fn script_sync(&self, status: ClientResult<Option<NaiveDateTime>>) {
        self.sync_statuses.lock().unwrap().push_back(status);
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn db_calls(&self) -> usize {
        self.db_calls.load(Ordering::SeqCst)
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GoodsApi for FakeGoodsApi {
    async fn fetch_live_goods(&self, query: &LiveGoodsQuery) -> ClientResult<GoodsPage> {
        *self.last_live_query.lock().unwrap() = Some(query.clone());
        if let Some(e) = self.live_error.lock().unwrap().clone() {
            return Err(e);
        }
        let items = self.live.lock().unwrap().clone();
        Ok(GoodsPage {
            total_count: Some(items.len() as u64),
            items,
            ..GoodsPage::default()
        })
    }

    async fn fetch_persisted_goods(&self) -> ClientResult<Vec<Goods>> {
        self.db_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.db_error.lock().unwrap().clone() {
            return Err(e);
        }
        let scripted = self.db_script.lock().unwrap().pop_front();
        match scripted {
            Some((delay, items)) => {
                tokio::time::sleep(delay).await;
                Ok(items)
            }
            None => Ok(self.db.lock().unwrap().clone()),
        }
    }

    async fn fetch_goods_detail(&self, history_no: &HistoryNo) -> ClientResult<Goods> {
        self.db
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.history_no.as_ref() == Some(history_no))
            .cloned()
            .ok_or_else(|| ClientError::ProviderUnavailable("물건을 찾을 수 없습니다.".to_string()))
    }

    async fn save_goods_batch(&self, goods: &[Goods]) -> ClientResult<u64> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        *self.db.lock().unwrap() = goods.to_vec();
        Ok(goods.len() as u64)
    }

    async fn delete_all_goods(&self) -> ClientResult<u64> {
        let mut db = self.db.lock().unwrap();
        let deleted = db.len() as u64;
        db.clear();
        Ok(deleted)
    }

    async fn fetch_sync_status(&self) -> ClientResult<Option<NaiveDateTime>> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        let mut statuses = self.sync_statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap_or(Ok(None))
        } else {
            statuses.front().cloned().unwrap_or(Ok(None))
        }
    }
}
