//! 목록 화면 컨트롤러
//! 세 가지 데이터 소스(DB 미러, 외부 API 직접 조회, 최신 회차 축약본) 중
//! 하나를 골라 필터/정렬/페이지 구간을 적용해 보여준다.
// region:    --- Imports
use super::view::{
    apply_client_side_view, page_window, total_pages, FilterCriteria, SortKey, SortState,
    ViewPage,
};
use crate::api::{GoodsApi, LiveGoodsQuery};
use crate::error::{ClientError, ClientResult};
use crate::goods::rounds::{reduce_to_latest_rounds, LATEST_ROUND_LIMIT};
use crate::goods::Goods;
use crate::scheduler::SyncRefresher;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

// endregion: --- Imports

// region:    --- Active Source
/// 현재 표시 중인 데이터 소스와 그 원본 목록
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveSource {
    /// 백엔드 DB 미러 (`GET /goods/db`)
    Database(Vec<Goods>),
    /// 외부 API 직접 조회 결과
    LiveApi(Vec<Goods>),
    /// 외부 API 결과에서 물건별 최신 회차만 추린 최대 100건
    Reduced(Vec<Goods>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Database,
    LiveApi,
    Reduced,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Database => "DB",
            SourceKind::LiveApi => "온비드 API",
            SourceKind::Reduced => "최신 회차 100건",
        }
    }
}

impl ActiveSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            ActiveSource::Database(_) => SourceKind::Database,
            ActiveSource::LiveApi(_) => SourceKind::LiveApi,
            ActiveSource::Reduced(_) => SourceKind::Reduced,
        }
    }

    pub fn items(&self) -> &[Goods] {
        match self {
            ActiveSource::Database(items)
            | ActiveSource::LiveApi(items)
            | ActiveSource::Reduced(items) => items,
        }
    }
}

// endregion: --- Active Source

// region:    --- Fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchRequest {
    /// `reset_page`: 명시적 로드면 1페이지로, 페이지/정렬 변경에 따른 재조회면 유지
    Database { reset_page: bool },
    LiveApi,
}

enum FetchOutcome {
    Database {
        reset_page: bool,
        result: ClientResult<Vec<Goods>>,
    },
    LiveApi(ClientResult<Vec<Goods>>),
}

/// 진행 중인 조회 (결과는 이 핸들로만 전달되므로 취소된 요청은 상태를 바꿀 수 없다)
struct Inflight {
    generation: u64,
    handle: JoinHandle<FetchOutcome>,
}

// endregion: --- Fetch

// region:    --- Listing Controller
pub struct ListingController<A: GoodsApi + 'static> {
    api: Arc<A>,
    source: ActiveSource,
    /// 마지막 외부 API 조회 결과 (축약의 선행 조건)
    live_snapshot: Vec<Goods>,
    /// 마지막 축약 결과 (DB 저장의 선행 조건)
    reduced_snapshot: Vec<Goods>,
    page: usize,
    sort: SortState,
    filter: FilterCriteria,
    /// 사용자에게 보여줄 오류/안내 메시지
    message: Option<String>,
    live_fetch_rows: u32,
    generation: u64,
    inflight: Option<Inflight>,
    sync_refresher: Option<SyncRefresher>,
}

impl<A: GoodsApi + 'static> ListingController<A> {
    pub fn new(api: Arc<A>, live_fetch_rows: u32) -> Self {
        Self {
            api,
            source: ActiveSource::Database(Vec::new()),
            live_snapshot: Vec::new(),
            reduced_snapshot: Vec::new(),
            page: 1,
            sort: SortState::default(),
            filter: FilterCriteria::default(),
            message: None,
            live_fetch_rows,
            generation: 0,
            inflight: None,
            sync_refresher: None,
        }
    }

    /// DB 저장 후 동기화 상태 즉시 재조회 요청 대상
    pub fn attach_sync_refresher(&mut self, refresher: SyncRefresher) {
        self.sync_refresher = Some(refresher);
    }

    // region:    --- Accessors
    pub fn source(&self) -> &ActiveSource {
        &self.source
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn is_loading(&self) -> bool {
        self.inflight.is_some()
    }

    pub fn live_snapshot(&self) -> &[Goods] {
        &self.live_snapshot
    }

    pub fn reduced_snapshot(&self) -> &[Goods] {
        &self.reduced_snapshot
    }
    // endregion: --- Accessors

    // region:    --- Data Sources
    /// 최초 마운트: DB 미러가 기본 소스
    pub async fn mount(&mut self) -> ClientResult<()> {
        self.load_from_database().await
    }

    /// DB 미러 조회, 1페이지로 이동
    pub async fn load_from_database(&mut self) -> ClientResult<()> {
        self.start_fetch(FetchRequest::Database { reset_page: true });
        self.settle_current().await
    }

    /// 외부 API 일괄 조회 (최대 `live_fetch_rows` 건), 1페이지로 이동
    pub async fn load_from_live_api(&mut self) -> ClientResult<()> {
        self.start_fetch(FetchRequest::LiveApi);
        self.settle_current().await
    }

    /// 외부 API 결과에서 물건별 최신 회차 100건 추출
    pub fn reduce_to_latest_rounds(&mut self) -> ClientResult<usize> {
        if self.live_snapshot.is_empty() {
            return Err(self.fail(ClientError::PreconditionNotMet(
                "먼저 온비드 API에서 물건 목록을 조회하세요.".to_string(),
            )));
        }

        self.cancel_inflight();
        let reduced = reduce_to_latest_rounds(&self.live_snapshot, LATEST_ROUND_LIMIT);
        info!(
            "{:<12} --> 최신 회차 추출: {}건 -> {}건",
            "Listing",
            self.live_snapshot.len(),
            reduced.len()
        );

        let count = reduced.len();
        self.reduced_snapshot = reduced.clone();
        self.source = ActiveSource::Reduced(reduced);
        self.page = 1;
        self.message = None;
        Ok(count)
    }

    /// 축약본을 DB에 전체 교체 저장, 동기화 상태 재조회 요청 후 DB 재조회
    pub async fn commit_reduced_set_to_database(&mut self) -> ClientResult<u64> {
        if self.reduced_snapshot.is_empty() {
            return Err(self.fail(ClientError::PreconditionNotMet(
                "먼저 최신 회차 100건을 추출하세요.".to_string(),
            )));
        }

        self.cancel_inflight();
        let saved = match self.api.save_goods_batch(&self.reduced_snapshot).await {
            Ok(saved) => saved,
            Err(e) => return Err(self.fail(e)),
        };
        info!("{:<12} --> DB 저장 완료: {}건", "Listing", saved);
        if let Some(refresher) = &self.sync_refresher {
            refresher.request_refresh();
        }

        self.load_from_database().await?;
        Ok(saved)
    }

    /// DB 물건 전체 삭제 후 재조회 (확인 절차는 호출 측 책임)
    pub async fn delete_all_persisted(&mut self) -> ClientResult<u64> {
        self.cancel_inflight();
        let deleted = match self.api.delete_all_goods().await {
            Ok(deleted) => deleted,
            Err(e) => return Err(self.fail(e)),
        };
        info!("{:<12} --> DB 물건 삭제 완료: {}건", "Listing", deleted);

        self.load_from_database().await?;
        Ok(deleted)
    }

    /// 현재 소스 재조회 (축약본은 클라이언트 파생이라 재조회 없음)
    pub async fn refresh(&mut self) -> ClientResult<()> {
        match self.source.kind() {
            SourceKind::Database => {
                self.start_fetch(FetchRequest::Database { reset_page: false });
                self.settle_current().await
            }
            SourceKind::LiveApi => self.load_from_live_api().await,
            SourceKind::Reduced => Ok(()),
        }
    }
    // endregion: --- Data Sources

    // region:    --- View State
    /// 페이지 이동 (유효 범위로 보정). DB 소스면 이전 조회를 취소하고 재조회를 시작한다.
    pub fn change_page(&mut self, page: usize) {
        let last_page = self.view().total_pages.max(1);
        let page = page.clamp(1, last_page);
        if page == self.page {
            return;
        }
        debug!("{:<12} --> 페이지 이동: {} -> {}", "Listing", self.page, page);
        self.page = page;
        self.refetch_if_persisted();
    }

    /// 정렬 헤더 클릭
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        debug!(
            "{:<12} --> 정렬 변경: {:?} {:?}",
            "Listing", self.sort.key, self.sort.direction
        );
        self.refetch_if_persisted();
    }

    /// 첫 조회 전에 정렬과 페이지 지정 (재조회 없음, 페이지는 결과 반영 시 보정)
    pub fn preset_view(&mut self, sort: SortState, page: usize) {
        self.sort = sort;
        self.page = page.max(1);
    }

    /// 검색 조건 변경, 1페이지로 이동
    pub fn set_filter(&mut self, filter: FilterCriteria) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn reset_filter(&mut self) {
        self.set_filter(FilterCriteria::default());
    }

    /// 현재 상태로 계산한 화면 페이지
    pub fn view(&self) -> ViewPage {
        apply_client_side_view(self.source.items(), &self.filter, &self.sort, self.page)
    }

    /// 페이지 번호 버튼 목록
    pub fn page_numbers(&self) -> Vec<usize> {
        let view = self.view();
        page_window(view.page, view.total_pages)
    }

    fn refetch_if_persisted(&mut self) {
        if self.source.kind() == SourceKind::Database {
            self.start_fetch(FetchRequest::Database { reset_page: false });
        }
    }
    // endregion: --- View State

    // region:    --- Fetch Lifecycle
    /// 진행 중인 조회 결과를 기다려 반영 (진행 중인 조회가 없으면 None)
    pub async fn settle(&mut self) -> Option<ClientResult<()>> {
        let inflight = self.inflight.take()?;
        let generation = inflight.generation;

        let outcome = match inflight.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => {
                debug!("{:<12} --> 취소된 조회 무시 (#{})", "Listing", generation);
                return None;
            }
            Err(e) => {
                error!("{:<12} --> 조회 작업 실패 (#{}): {:?}", "Listing", generation, e);
                return Some(Err(self.fail(ClientError::ProviderUnavailable(
                    "물건 정보를 불러오는 중 오류가 발생했습니다.".to_string(),
                ))));
            }
        };

        Some(self.apply(outcome))
    }

    /// 화면 해제: 진행 중인 조회 취소
    pub fn teardown(&mut self) {
        self.cancel_inflight();
    }

    async fn settle_current(&mut self) -> ClientResult<()> {
        self.settle().await.unwrap_or(Ok(()))
    }

    /// 이전 조회를 취소하고 새 조회 시작
    fn start_fetch(&mut self, request: FetchRequest) {
        self.cancel_inflight();
        self.generation += 1;
        let generation = self.generation;
        let api = Arc::clone(&self.api);
        let query = LiveGoodsQuery::new(1, self.live_fetch_rows)
            .with_filters(self.filter.to_query_params());

        debug!("{:<12} --> 조회 시작 (#{}): {:?}", "Listing", generation, request);
        let handle = tokio::spawn(async move {
            match request {
                FetchRequest::Database { reset_page } => FetchOutcome::Database {
                    reset_page,
                    result: api.fetch_persisted_goods().await,
                },
                FetchRequest::LiveApi => FetchOutcome::LiveApi(
                    api.fetch_live_goods(&query).await.map(|page| page.items),
                ),
            }
        });

        self.inflight = Some(Inflight { generation, handle });
    }

    fn cancel_inflight(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            inflight.handle.abort();
            debug!(
                "{:<12} --> 진행 중인 조회 취소 (#{})",
                "Listing", inflight.generation
            );
        }
    }

    fn apply(&mut self, outcome: FetchOutcome) -> ClientResult<()> {
        match outcome {
            FetchOutcome::Database { reset_page, result } => {
                let items = result.map_err(|e| self.fail(e))?;
                info!("{:<12} --> DB 물건 {}건 반영", "Listing", items.len());
                self.source = ActiveSource::Database(items);
                self.page = if reset_page { 1 } else { self.clamped_page() };
            }
            FetchOutcome::LiveApi(result) => {
                let items = result.map_err(|e| self.fail(e))?;
                info!("{:<12} --> 온비드 물건 {}건 반영", "Listing", items.len());
                // 이전 조회에서 추린 축약본은 새 결과와 맞지 않는다
                self.reduced_snapshot.clear();
                self.live_snapshot = items.clone();
                self.source = ActiveSource::LiveApi(items);
                self.page = 1;
            }
        }
        self.message = None;
        Ok(())
    }

    fn clamped_page(&self) -> usize {
        let filtered = self
            .source
            .items()
            .iter()
            .filter(|goods| self.filter.matches(goods))
            .count();
        self.page.clamp(1, total_pages(filtered).max(1))
    }

    /// 오류를 사용자 메시지로 기록
    fn fail(&mut self, e: ClientError) -> ClientError {
        warn!("{:<12} --> {}", "Listing", e);
        self.message = Some(e.to_string());
        e
    }
    // endregion: --- Fetch Lifecycle
}

impl<A: GoodsApi + 'static> Drop for ListingController<A> {
    fn drop(&mut self) {
        self.cancel_inflight();
    }
}

// endregion: --- Listing Controller
