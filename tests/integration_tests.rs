mod common;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use common::init_tracing;
use onbid_client::account::{AccountService, LoginForm};
use onbid_client::api::{AccountApi, ApiClient, FavoriteApi};
use onbid_client::config::ClientConfig;
use onbid_client::error::ClientError;
use onbid_client::favorite::{FavoriteList, FavoriteToggle};
use onbid_client::goods::{Goods, HistoryNo};
use onbid_client::listing::{ListingController, SourceKind};
use onbid_client::purchase::PurchaseAction;
use onbid_client::session::{FileTokenStore, MemoryTokenStore, Session};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const TOKEN: &str = "jwt-token-1";

/// 온비드 조회 → 최신 회차 추출 → DB 저장 → DB 재조회
#[tokio::test]
async fn test_live_reduce_commit_reload_flow() {
    let live: Vec<Value> = (1..=150u64)
        .map(|i| {
            json!({
                "historyNo": i,
                "goodsNo": format!("2025-{:05}-001", i % 60),
                "goodsName": format!("물건 {}", i),
                "minBidPrice": i * 1000,
            })
        })
        .collect();
    let (base_url, backend) = spawn_backend(MockBackend::with_live(live)).await;
    let api = Arc::new(client(&base_url, Session::in_memory()));
    let mut listing = ListingController::new(api, 1000);

    listing.load_from_live_api().await.expect("온비드 조회");
    assert_eq!(listing.source().items().len(), 150);

    let reduced = listing.reduce_to_latest_rounds().expect("최신 회차 추출");
    assert_eq!(reduced, 60);

    let saved = listing
        .commit_reduced_set_to_database()
        .await
        .expect("DB 저장");
    assert_eq!(saved, 60);
    assert_eq!(listing.source_kind(), SourceKind::Database);
    assert_eq!(listing.source().items().len(), 60);

    // 그룹별 최신 회차: 91..=150
    let mut history_nos: Vec<u64> = listing
        .source()
        .items()
        .iter()
        .filter_map(|g| g.history_no.as_ref().and_then(HistoryNo::numeric))
        .collect();
    history_nos.sort_unstable();
    assert_eq!(history_nos, (91..=150).collect::<Vec<_>>());

    // 저장 본문의 historyNo 는 숫자
    let stored = backend.db.lock().unwrap().clone();
    assert!(stored.iter().all(|v| v["historyNo"].is_u64()));

    let queries = backend.live_queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("pageNo").map(String::as_str), Some("1"));
    assert_eq!(queries[0].get("numOfRows").map(String::as_str), Some("1000"));
}

/// `success: false` 응답은 서버 메시지를 담은 오류가 된다
#[tokio::test]
async fn test_unsuccessful_envelope_is_provider_error() {
    let backend = MockBackend {
        live_failure: Some("온비드 API 호출에 실패했습니다.".to_string()),
        ..MockBackend::default()
    };
    let (base_url, _backend) = spawn_backend(backend).await;
    let api = Arc::new(client(&base_url, Session::in_memory()));
    let mut listing = ListingController::new(api, 1000);

    let result = listing.load_from_live_api().await;
    assert_eq!(
        result,
        Err(ClientError::ProviderUnavailable(
            "온비드 API 호출에 실패했습니다.".to_string()
        ))
    );
    assert_eq!(listing.message(), Some("온비드 API 호출에 실패했습니다."));
}

/// 로그인 상태면 Bearer 토큰이 첨부된다
#[tokio::test]
async fn test_bearer_token_attached() {
    let (base_url, backend) = spawn_backend(MockBackend::default()).await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let api = client(&base_url, session);

    let favorites = api.fetch_favorites().await.expect("관심물건 조회");
    assert!(favorites.is_empty());

    let headers = backend.auth_headers.lock().unwrap().clone();
    assert_eq!(headers, vec![Some(format!("Bearer {}", TOKEN))]);
}

/// 401: 세션 삭제 + 로그인 이동 콜백
#[tokio::test]
async fn test_unauthorized_clears_session_and_calls_hook() {
    let (base_url, _backend) = spawn_backend(MockBackend::default()).await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token("expired-token")));
    let redirected = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&redirected);
    let api = client(&base_url, session.clone())
        .with_unauthorized_hook(Arc::new(move || flag.store(true, Ordering::SeqCst)));

    let result = api.fetch_me().await;
    assert_eq!(result, Err(ClientError::Unauthenticated));
    assert!(redirected.load(Ordering::SeqCst));
    assert!(!session.is_authenticated());
}

/// 로그인 성공 시 토큰 파일에 저장되고 이후 요청에 사용된다
#[tokio::test]
async fn test_login_persists_token() {
    let (base_url, _backend) = spawn_backend(MockBackend::default()).await;
    let dir = tempfile::tempdir().expect("임시 디렉터리");
    let token_path = dir.path().join("session").join("token");
    let session = Session::new(Arc::new(FileTokenStore::new(token_path.clone())));
    let api = Arc::new(client(&base_url, session.clone()));
    let service = AccountService::new(Arc::clone(&api), session.clone());

    let response = service
        .login(&LoginForm {
            email: "user@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .expect("로그인");
    assert_eq!(response.token, TOKEN);
    assert_eq!(std::fs::read_to_string(&token_path).unwrap(), TOKEN);

    let me = service.me().await.expect("내 정보");
    assert_eq!(me.email, "user@example.com");

    service.logout().expect("로그아웃");
    assert!(!token_path.exists());
}

/// 로그인 실패(401)는 입력 오류이며 로그인 이동 콜백을 부르지 않는다
#[tokio::test]
async fn test_login_failure_is_validation_error() {
    let (base_url, _backend) = spawn_backend(MockBackend::default()).await;
    let redirected = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&redirected);
    let api = Arc::new(
        client(&base_url, Session::in_memory())
            .with_unauthorized_hook(Arc::new(move || flag.store(true, Ordering::SeqCst))),
    );
    let service = AccountService::new(Arc::clone(&api), api.session().clone());

    let result = service
        .login(&LoginForm {
            email: "user@example.com".to_string(),
            password: "wrong-pw".to_string(),
        })
        .await;
    assert_eq!(
        result.map(|r| r.token),
        Err(ClientError::ValidationFailed(
            "이메일 또는 비밀번호가 올바르지 않습니다.".to_string()
        ))
    );
    assert!(!redirected.load(Ordering::SeqCst));
    assert!(!service.is_authenticated());
}

/// 구매 후 같은 물건이력번호는 구매 불가
#[tokio::test]
async fn test_purchase_disables_after_success() {
    let (base_url, backend) = spawn_backend(MockBackend::default()).await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let api = Arc::new(client(&base_url, session));
    let goods = sample_goods(1001, "2025-00001-001", 15_000_000);

    let mut action = PurchaseAction::for_goods(Arc::clone(&api), &goods).unwrap();
    assert!(!action.refresh().await.unwrap());

    let purchase = action.purchase().await.expect("구매");
    assert_eq!(purchase.history_no, HistoryNo::from(1001u64));
    assert_eq!(purchase.purchase_price, 15_000_000);
    assert!(action.is_disabled());

    // 새 화면에서도 이력 조회로 비활성화
    let mut reopened = PurchaseAction::for_goods(Arc::clone(&api), &goods).unwrap();
    assert!(reopened.refresh().await.unwrap());
    assert!(matches!(
        reopened.purchase().await,
        Err(ClientError::PreconditionNotMet(_))
    ));

    assert_eq!(backend.purchases.lock().unwrap().len(), 1);
}

/// 이력 조회 없이 중복 구매하면 서버 거절 메시지로 비활성화
#[tokio::test]
async fn test_duplicate_purchase_rejected_by_backend() {
    let (base_url, _backend) = spawn_backend(MockBackend::default()).await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let api = Arc::new(client(&base_url, session));
    let goods = sample_goods(2002, "2025-00002-001", 9_000);

    let mut first = PurchaseAction::for_goods(Arc::clone(&api), &goods).unwrap();
    first.purchase().await.expect("첫 구매");

    let mut second = PurchaseAction::for_goods(Arc::clone(&api), &goods).unwrap();
    let result = second.purchase().await;
    assert_eq!(
        result.map(|p| p.history_no),
        Err(ClientError::ProviderUnavailable(
            "이미 구매된 물건입니다.".to_string()
        ))
    );
    assert!(second.is_disabled());
}

/// 관심물건 등록/해제는 서버 확인 후 반영
#[tokio::test]
async fn test_favorite_toggle_confirms_with_backend() {
    let (base_url, backend) = spawn_backend(MockBackend::default()).await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let api = Arc::new(client(&base_url, session));

    let mut toggle = FavoriteToggle::new(
        Arc::clone(&api),
        sample_goods(3003, "2025-00003-001", 50_000),
    );
    assert!(!toggle.refresh().await.unwrap());

    assert!(toggle.toggle().await.unwrap());
    assert!(toggle.is_favorite());
    assert_eq!(backend.favorites.lock().unwrap().len(), 1);
    assert!(toggle.refresh().await.unwrap());

    assert!(!toggle.toggle().await.unwrap());
    assert!(backend.favorites.lock().unwrap().is_empty());
}

/// 서버가 거절하면 관심 상태는 바뀌지 않는다
#[tokio::test]
async fn test_favorite_toggle_failure_keeps_state() {
    let (base_url, backend) = spawn_backend(MockBackend::default()).await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let api = Arc::new(client(&base_url, session));

    let mut toggle = FavoriteToggle::new(Arc::clone(&api), sample_goods(4004, "FAIL", 1_000));
    let result = toggle.toggle().await;
    assert_eq!(
        result,
        Err(ClientError::ProviderUnavailable(
            "관심물건 등록에 실패했습니다.".to_string()
        ))
    );
    assert!(!toggle.is_favorite());
    assert!(backend.favorites.lock().unwrap().is_empty());
}

/// 관심물건 목록 조회 후 id 로 삭제
#[tokio::test]
async fn test_favorite_list_remove_by_id() {
    let (base_url, _backend) = spawn_backend(MockBackend::default()).await;
    let session = Session::new(Arc::new(MemoryTokenStore::with_token(TOKEN)));
    let api = Arc::new(client(&base_url, session));

    for (history_no, goods_no) in [(1u64, "A-1"), (2, "B-1")] {
        let mut toggle = FavoriteToggle::new(
            Arc::clone(&api),
            sample_goods(history_no, goods_no, 1_000),
        );
        toggle.toggle().await.unwrap();
    }

    let mut list = FavoriteList::new(Arc::clone(&api));
    let ids: Vec<_> = list.load().await.unwrap().iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);

    list.remove(1).await.unwrap();
    assert_eq!(list.items().len(), 1);
    assert_eq!(list.load().await.unwrap().len(), 1);
}

// region:    --- Helpers

fn sample_goods(history_no: u64, goods_no: &str, min_bid_price: i64) -> Goods {
    Goods {
        history_no: Some(HistoryNo::from(history_no)),
        goods_no: Some(goods_no.to_string()),
        goods_name: Some(format!("테스트 물건 {}", goods_no)),
        min_bid_price: Some(min_bid_price),
        bid_close_date: Some("20250131170000".to_string()),
        ..Goods::default()
    }
}

fn client(base_url: &str, session: Session) -> ApiClient {
    let config = ClientConfig::default().with_base_url(base_url);
    ApiClient::new(&config, session).expect("HTTP 클라이언트 생성")
}

/// 테스트용 백엔드 상태
#[derive(Default)]
struct MockBackend {
    live: Vec<Value>,
    live_failure: Option<String>,
    live_queries: Mutex<Vec<HashMap<String, String>>>,
    db: Mutex<Vec<Value>>,
    purchases: Mutex<Vec<Value>>,
    favorites: Mutex<Vec<Value>>,
    auth_headers: Mutex<Vec<Option<String>>>,
}

impl MockBackend {
    fn with_live(live: Vec<Value>) -> Self {
        Self {
            live,
            ..Self::default()
        }
    }
}

type Shared = Arc<MockBackend>;
type Reply = (StatusCode, Json<Value>);

/// 임의 포트로 모의 백엔드 실행, `http://127.0.0.1:<port>/api` 반환
async fn spawn_backend(backend: MockBackend) -> (String, Shared) {
    init_tracing();
    let shared = Arc::new(backend);
    let app = Router::new()
        .route("/api/goods", get(live_goods))
        .route("/api/goods/db", get(db_goods))
        .route("/api/goods/db/batch", post(save_batch))
        .route("/api/goods/db/all", delete(delete_all))
        .route("/api/goods/refresh-status", get(refresh_status))
        .route("/api/purchases", post(create_purchase))
        .route("/api/purchases/:history_no", get(purchases_by_history_no))
        .route("/api/users/login", post(login))
        .route("/api/users/me", get(me))
        .route("/api/favorites", get(list_favorites).post(add_favorite))
        .route("/api/favorites/:id", delete(delete_favorite))
        .route(
            "/api/favorites/:kind/:key",
            get(check_favorite).delete(delete_favorite_by_goods_no),
        )
        .with_state(Arc::clone(&shared));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("모의 서버 포트 할당 실패");
    let addr = listener.local_addr().expect("모의 서버 주소");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("모의 서버 실행 실패");
    });

    (format!("http://{}/api", addr), shared)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn authorized(headers: &HeaderMap) -> bool {
    bearer(headers) == Some(format!("Bearer {}", TOKEN))
}

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "인증이 필요합니다."})),
    )
}

fn same_id(value: &Value, raw: &str) -> bool {
    match value {
        Value::Number(n) => n.to_string() == raw,
        Value::String(s) => s == raw,
        _ => false,
    }
}

async fn live_goods(
    State(s): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    s.live_queries.lock().unwrap().push(query);
    if let Some(message) = &s.live_failure {
        return Json(json!({"success": false, "message": message}));
    }
    let total = s.live.len();
    Json(json!({
        "success": true,
        "data": {"items": s.live, "totalCount": total, "pageNo": 1, "numOfRows": 1000}
    }))
}

async fn db_goods(State(s): State<Shared>) -> Json<Value> {
    let items = s.db.lock().unwrap().clone();
    Json(json!({"success": true, "items": items, "count": items.len()}))
}

async fn save_batch(State(s): State<Shared>, Json(body): Json<Vec<Value>>) -> Json<Value> {
    let saved = body.len();
    *s.db.lock().unwrap() = body;
    Json(json!({"success": true, "savedCount": saved, "message": format!("{}개 저장", saved)}))
}

async fn delete_all(State(s): State<Shared>) -> Json<Value> {
    let mut db = s.db.lock().unwrap();
    let deleted = db.len();
    db.clear();
    Json(json!({"success": true, "deletedCount": deleted}))
}

async fn refresh_status() -> Json<Value> {
    Json(json!({"success": true, "lastSyncedAt": "2025-01-15T10:00:00"}))
}

async fn create_purchase(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut purchases = s.purchases.lock().unwrap();
    if purchases.iter().any(|p| p["historyNo"] == body["historyNo"]) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "이미 구매된 물건입니다."})),
        );
    }
    let purchase = json!({
        "id": purchases.len() + 1,
        "historyNo": body["historyNo"],
        "purchasePrice": body["purchasePrice"],
        "purchaseStatus": "COMPLETED",
        "createdAt": "2025-01-15T10:00:00",
    });
    purchases.push(purchase.clone());
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": purchase, "message": "구매가 완료되었습니다."})),
    )
}

async fn purchases_by_history_no(
    State(s): State<Shared>,
    Path(history_no): Path<String>,
) -> Json<Value> {
    let items: Vec<Value> = s
        .purchases
        .lock()
        .unwrap()
        .iter()
        .filter(|p| same_id(&p["historyNo"], &history_no))
        .cloned()
        .collect();
    Json(json!({"success": true, "items": items, "count": items.len()}))
}

async fn login(Json(body): Json<Value>) -> Reply {
    if body["password"] != "secret1" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "이메일 또는 비밀번호가 올바르지 않습니다."})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "token": TOKEN,
                "type": "Bearer",
                "userId": 1,
                "username": "홍길동",
                "email": body["email"],
            }
        })),
    )
}

async fn me(headers: HeaderMap) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {"id": 1, "email": "user@example.com", "username": "홍길동", "createdAt": "2025-01-01T09:00:00"}
        })),
    )
}

async fn list_favorites(State(s): State<Shared>, headers: HeaderMap) -> Reply {
    s.auth_headers.lock().unwrap().push(bearer(&headers));
    if !authorized(&headers) {
        return unauthorized();
    }
    let items = s.favorites.lock().unwrap().clone();
    (
        StatusCode::OK,
        Json(json!({"success": true, "data": items, "count": items.len()})),
    )
}

async fn add_favorite(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    if body["goodsNo"] == "FAIL" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": "관심물건 등록에 실패했습니다."})),
        );
    }
    let mut favorites = s.favorites.lock().unwrap();
    let next_id = favorites
        .iter()
        .filter_map(|f| f["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    body["id"] = json!(next_id);
    body["userId"] = json!(1);
    favorites.push(body.clone());
    (StatusCode::OK, Json(json!({"success": true, "data": body})))
}

async fn delete_favorite(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    s.favorites
        .lock()
        .unwrap()
        .retain(|f| f["id"].as_i64() != Some(id));
    (StatusCode::OK, Json(json!({"success": true, "message": "삭제되었습니다."})))
}

/// `DELETE /favorites/goods/{goodsNo}`
async fn delete_favorite_by_goods_no(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path((kind, goods_no)): Path<(String, String)>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    if kind != "goods" {
        return (StatusCode::NOT_FOUND, Json(json!({"success": false})));
    }
    s.favorites
        .lock()
        .unwrap()
        .retain(|f| f["goodsNo"].as_str() != Some(goods_no.as_str()));
    (StatusCode::OK, Json(json!({"success": true, "message": "삭제되었습니다."})))
}

/// `GET /favorites/check/{historyNo}`
async fn check_favorite(
    State(s): State<Shared>,
    headers: HeaderMap,
    Path((kind, history_no)): Path<(String, String)>,
) -> Reply {
    if !authorized(&headers) {
        return unauthorized();
    }
    if kind != "check" {
        return (StatusCode::NOT_FOUND, Json(json!({"success": false})));
    }
    let is_favorite = s
        .favorites
        .lock()
        .unwrap()
        .iter()
        .any(|f| same_id(&f["historyNo"], &history_no));
    (
        StatusCode::OK,
        Json(json!({"success": true, "isFavorite": is_favorite})),
    )
}

// endregion: --- Helpers
