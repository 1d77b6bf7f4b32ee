// region:    --- Imports
use crate::account::{
    AccountService, DeleteAccountForm, LoginForm, RegisterForm, UpdateProfileForm,
};
use crate::api::{ApiClient, GoodsApi, PurchaseApi};
use crate::cli::Commands;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::favorite::{FavoriteList, FavoriteToggle};
use crate::format::{format_optional_date, format_price};
use crate::goods::{Goods, HistoryNo};
use crate::listing::{
    FilterCriteria, ListingController, SortDirection, SortKey, SortState, SourceKind,
};
use crate::purchase::PurchaseAction;
use crate::render::{pagination_bar, GoodsCard, GoodsTable};
use crate::scheduler::SyncStatusPoller;
use std::sync::Arc;
use tokio::time::{sleep_until, timeout, Duration, Instant};
use tracing::info;

// endregion: --- Imports

// region:    --- Dispatch
/// 명령 실행
pub async fn dispatch(
    command: Commands,
    api: Arc<ApiClient>,
    config: &ClientConfig,
) -> ClientResult<()> {
    info!("{:<12} --> 명령 실행: {}", "Command", command_name(&command));

    match command {
        Commands::List {
            source,
            page,
            sort,
            asc,
            filter,
            cards,
            expand,
        } => {
            let options = ListOptions {
                source: source.into(),
                page,
                sort: sort.map(Into::into),
                ascending: asc,
                filter: filter.into(),
                cards,
                expand: expand.into_iter().map(HistoryNo::new).collect(),
            };
            handle_list(api, config, options).await
        }
        Commands::Sync { filter } => handle_sync(api, config, filter.into()).await,
        Commands::Clear { yes } => handle_clear(api, config, yes).await,
        Commands::Watch { ticks } => handle_watch(api, config, ticks).await,
        Commands::Detail { history_no } => handle_detail(api, &HistoryNo::new(history_no)).await,
        Commands::Purchase { history_no, yes } => {
            handle_purchase(api, &HistoryNo::new(history_no), yes).await
        }
        Commands::Purchases => handle_purchases(api).await,
        Commands::PurchasesReset { yes } => handle_purchases_reset(api, yes).await,
        Commands::Favorites => handle_favorites(api).await,
        Commands::Favorite { history_no } => {
            handle_favorite_toggle(api, &HistoryNo::new(history_no)).await
        }
        Commands::UnfavoriteId { id } => handle_unfavorite_id(api, id).await,
        Commands::Register {
            email,
            username,
            password,
            password_confirm,
        } => {
            let form = RegisterForm {
                email,
                password,
                password_confirm,
                username,
            };
            handle_register(api, &form).await
        }
        Commands::Login { email, password } => {
            handle_login(api, &LoginForm { email, password }).await
        }
        Commands::Logout => handle_logout(api),
        Commands::Me => handle_me(api).await,
        Commands::UpdateMe {
            username,
            current_password,
            new_password,
            new_password_confirm,
        } => {
            let form = UpdateProfileForm {
                username,
                current_password,
                new_password,
                new_password_confirm,
            };
            handle_update_me(api, &form).await
        }
        Commands::DeleteMe { password, yes } => {
            handle_delete_me(api, &DeleteAccountForm { password }, yes).await
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::List { .. } => "list",
        Commands::Sync { .. } => "sync",
        Commands::Clear { .. } => "clear",
        Commands::Watch { .. } => "watch",
        Commands::Detail { .. } => "detail",
        Commands::Purchase { .. } => "purchase",
        Commands::Purchases => "purchases",
        Commands::PurchasesReset { .. } => "purchases-reset",
        Commands::Favorites => "favorites",
        Commands::Favorite { .. } => "favorite",
        Commands::UnfavoriteId { .. } => "unfavorite-id",
        Commands::Register { .. } => "register",
        Commands::Login { .. } => "login",
        Commands::Logout => "logout",
        Commands::Me => "me",
        Commands::UpdateMe { .. } => "update-me",
        Commands::DeleteMe { .. } => "delete-me",
    }
}

/// 되돌릴 수 없는 작업의 확인 절차
fn confirm(yes: bool, action: &str) -> ClientResult<()> {
    if yes {
        Ok(())
    } else {
        Err(ClientError::PreconditionNotMet(format!(
            "{} 작업을 진행하려면 --yes 를 지정하세요.",
            action
        )))
    }
}

fn require_login(api: &ApiClient) -> ClientResult<()> {
    if api.session().is_authenticated() {
        Ok(())
    } else {
        Err(ClientError::Unauthenticated)
    }
}

// endregion: --- Dispatch

// region:    --- Listing Handlers
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub source: SourceKind,
    pub page: usize,
    pub sort: Option<SortKey>,
    pub ascending: bool,
    pub filter: FilterCriteria,
    pub cards: bool,
    pub expand: Vec<HistoryNo>,
}

/// 목록 조회 후 표/카드 출력
pub async fn handle_list(
    api: Arc<ApiClient>,
    config: &ClientConfig,
    options: ListOptions,
) -> ClientResult<()> {
    let mut controller = ListingController::new(api, config.live_fetch_rows);
    controller.set_filter(options.filter);

    // 정렬/페이지를 먼저 정해 두고 한 번만 조회
    let sort = SortState {
        key: options.sort,
        direction: if options.sort.is_some() && options.ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        },
    };
    controller.preset_view(sort, options.page);

    match options.source {
        SourceKind::Database => controller.refresh().await?,
        SourceKind::LiveApi => {
            controller.load_from_live_api().await?;
            controller.change_page(options.page);
        }
        SourceKind::Reduced => {
            controller.load_from_live_api().await?;
            controller.reduce_to_latest_rounds()?;
            controller.change_page(options.page);
        }
    }

    let view = controller.view();
    println!(
        "[{}] 총 {}건 ({}/{} 페이지)",
        controller.source_kind().label(),
        view.total_count,
        view.page,
        view.total_pages.max(1)
    );

    if options.cards {
        for goods in &view.items {
            let mut card = GoodsCard::new(goods);
            let expanded = goods
                .history_no
                .as_ref()
                .is_some_and(|no| options.expand.contains(no));
            if expanded {
                card.toggle_details();
            }
            println!("{}", card.render());
        }
    } else {
        let mut table = GoodsTable::new();
        for history_no in &options.expand {
            table.toggle_row(history_no);
        }
        print!("{}", table.render(&view.items, &controller.sort()));
    }

    let bar = pagination_bar(view.page, view.total_pages);
    if !bar.is_empty() {
        println!("{}", bar);
    }
    if let Some(message) = controller.message() {
        println!("{}", message);
    }
    Ok(())
}

/// 온비드 조회 → 최신 회차 추출 → DB 저장
pub async fn handle_sync(
    api: Arc<ApiClient>,
    config: &ClientConfig,
    filter: FilterCriteria,
) -> ClientResult<()> {
    let poller = SyncStatusPoller::new(Arc::clone(&api), config).start();
    let mut status = poller.subscribe();
    let mut controller = ListingController::new(api, config.live_fetch_rows);
    controller.set_filter(filter);
    controller.attach_sync_refresher(poller.refresher());

    controller.load_from_live_api().await?;
    let fetched = controller.live_snapshot().len();
    let reduced = controller.reduce_to_latest_rounds()?;
    let saved = controller.commit_reduced_set_to_database().await?;
    println!("온비드 조회 {}건 → 최신 회차 {}건 → DB 저장 {}건", fetched, reduced, saved);

    // 저장 직후 요청한 재조회 결과를 알림 표시 시간만큼 기다린다
    let notice = timeout(
        config.notice_duration,
        status.wait_for(|current| current.notice.is_some()),
    )
    .await
    .ok()
    .and_then(Result::ok)
    .and_then(|current| current.notice.clone());
    if let Some(notice) = notice {
        println!("{}", notice.message);
    }
    if let Some(synced_at) = poller.status().last_synced_at {
        println!("마지막 동기화: {}", synced_at.format("%Y-%m-%d %H:%M:%S"));
    }

    poller.stop();
    Ok(())
}

pub async fn handle_clear(
    api: Arc<ApiClient>,
    config: &ClientConfig,
    yes: bool,
) -> ClientResult<()> {
    confirm(yes, "DB 물건 전체 삭제")?;
    let mut controller = ListingController::new(api, config.live_fetch_rows);
    let deleted = controller.delete_all_persisted().await?;
    println!("DB 물건 {}건을 삭제했습니다.", deleted);
    Ok(())
}

/// 감시 종료 시각. 너무 큰 값이면 종료 시각 없이 Ctrl-C 까지 감시
fn watch_deadline(start: Instant, poll_interval: Duration, ticks: Option<u32>) -> Option<Instant> {
    ticks
        .and_then(|n| poll_interval.checked_mul(n))
        .and_then(|period| start.checked_add(period))
}

/// 동기화 상태 감시 (`ticks` 주기 후 또는 Ctrl-C 로 종료)
pub async fn handle_watch(
    api: Arc<ApiClient>,
    config: &ClientConfig,
    ticks: Option<u32>,
) -> ClientResult<()> {
    let handle = SyncStatusPoller::new(api, config).start();
    let mut status = handle.subscribe();
    let deadline = watch_deadline(Instant::now(), config.sync_poll_interval, ticks);
    let mut last_printed = None;
    let mut last_notice = None;

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = status.borrow_and_update().clone();
                if let Some(notice) = &current.notice {
                    if last_notice != Some(notice.synced_at) {
                        last_notice = Some(notice.synced_at);
                        println!("{}", notice.message);
                    }
                }
                if current.last_synced_at != last_printed {
                    last_printed = current.last_synced_at;
                    match current.last_synced_at {
                        Some(at) => println!("마지막 동기화: {}", at.format("%Y-%m-%d %H:%M:%S")),
                        None => println!("마지막 동기화: -"),
                    }
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.stop();
    Ok(())
}

// endregion: --- Listing Handlers

// region:    --- Goods Detail / Purchase Handlers
pub async fn handle_detail(api: Arc<ApiClient>, history_no: &HistoryNo) -> ClientResult<()> {
    let goods = api.fetch_goods_detail(history_no).await?;
    let mut card = GoodsCard::new(&goods);
    card.toggle_details();
    println!("{}", card.render());

    if !api.session().is_authenticated() {
        println!("로그인하면 구매와 관심물건 등록을 할 수 있습니다.");
        return Ok(());
    }

    let mut favorite = FavoriteToggle::new(Arc::clone(&api), goods.clone());
    let is_favorite = favorite.refresh().await?;
    println!("관심물건: {}", if is_favorite { "♥ 등록됨" } else { "♡ 미등록" });

    match PurchaseAction::for_goods(api, &goods) {
        Ok(mut action) => {
            let disabled = action.refresh().await?;
            if disabled {
                println!("구매: 이미 구매한 물건입니다.");
            } else {
                println!("구매: 가능 ({})", format_price(Some(action.purchase_price())));
            }
        }
        Err(e) => println!("구매: {}", e),
    }
    Ok(())
}

pub async fn handle_purchase(
    api: Arc<ApiClient>,
    history_no: &HistoryNo,
    yes: bool,
) -> ClientResult<()> {
    require_login(&api)?;
    let goods = api.fetch_goods_detail(history_no).await?;
    confirm(yes, &format!("{} 구매", display_name(&goods)))?;

    let mut action = PurchaseAction::for_goods(api, &goods)?;
    action.refresh().await?;
    let purchase = action.purchase().await?;
    println!(
        "구매가 완료되었습니다. {} / {}",
        purchase.history_no,
        format_price(Some(purchase.purchase_price))
    );
    Ok(())
}

pub async fn handle_purchases(api: Arc<ApiClient>) -> ClientResult<()> {
    let purchases = api.fetch_all_purchases().await?;
    if purchases.is_empty() {
        println!("구매 이력이 없습니다.");
        return Ok(());
    }
    for purchase in &purchases {
        println!(
            "{} | {} | {} | {}",
            purchase.history_no,
            format_price(Some(purchase.purchase_price)),
            purchase
                .purchase_status
                .map(|status| status.label())
                .unwrap_or("-"),
            purchase
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    println!("총 {}건", purchases.len());
    Ok(())
}

pub async fn handle_purchases_reset(api: Arc<ApiClient>, yes: bool) -> ClientResult<()> {
    confirm(yes, "구매 이력 초기화")?;
    let deleted = api.reset_purchases().await?;
    println!("구매 이력 {}건을 삭제했습니다.", deleted);
    Ok(())
}

fn display_name(goods: &Goods) -> &str {
    goods.goods_name.as_deref().unwrap_or("물건")
}

// endregion: --- Goods Detail / Purchase Handlers

// region:    --- Favorite Handlers
pub async fn handle_favorites(api: Arc<ApiClient>) -> ClientResult<()> {
    require_login(&api)?;
    let mut list = FavoriteList::new(api);
    let favorites = list.load().await?;
    if favorites.is_empty() {
        println!("관심물건이 없습니다.");
        return Ok(());
    }
    for favorite in favorites {
        println!(
            "#{} | {} | {} | {} | 마감 {}",
            favorite.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            favorite.goods_no.as_deref().unwrap_or("-"),
            favorite.goods_name.as_deref().unwrap_or("-"),
            format_price(favorite.min_bid_price),
            format_optional_date(favorite.bid_close_date.as_deref())
        );
    }
    Ok(())
}

pub async fn handle_favorite_toggle(
    api: Arc<ApiClient>,
    history_no: &HistoryNo,
) -> ClientResult<()> {
    require_login(&api)?;
    let goods = api.fetch_goods_detail(history_no).await?;
    let mut toggle = FavoriteToggle::new(api, goods);
    toggle.refresh().await?;
    let is_favorite = toggle.toggle().await?;
    println!(
        "{}: {}",
        display_name(toggle.goods()),
        if is_favorite {
            "관심물건에 등록했습니다."
        } else {
            "관심물건에서 해제했습니다."
        }
    );
    Ok(())
}

pub async fn handle_unfavorite_id(api: Arc<ApiClient>, id: i64) -> ClientResult<()> {
    require_login(&api)?;
    let mut list = FavoriteList::new(api);
    list.remove(id).await?;
    println!("관심물건 #{} 을 삭제했습니다.", id);
    Ok(())
}

// endregion: --- Favorite Handlers

// region:    --- Account Handlers
fn account_service(api: Arc<ApiClient>) -> AccountService<ApiClient> {
    let session = api.session().clone();
    AccountService::new(api, session)
}

pub async fn handle_register(api: Arc<ApiClient>, form: &RegisterForm) -> ClientResult<()> {
    let user = account_service(api).register(form).await?;
    match user {
        Some(user) => println!("회원가입이 완료되었습니다: {} ({})", user.username, user.email),
        None => println!("회원가입이 완료되었습니다."),
    }
    Ok(())
}

pub async fn handle_login(api: Arc<ApiClient>, form: &LoginForm) -> ClientResult<()> {
    let response = account_service(api).login(form).await?;
    println!(
        "{}님 환영합니다.",
        response.username.as_deref().unwrap_or(&form.email)
    );
    Ok(())
}

pub fn handle_logout(api: Arc<ApiClient>) -> ClientResult<()> {
    account_service(api).logout()?;
    println!("로그아웃되었습니다.");
    Ok(())
}

pub async fn handle_me(api: Arc<ApiClient>) -> ClientResult<()> {
    require_login(&api)?;
    let user = account_service(api).me().await?;
    println!("이메일: {}", user.email);
    println!("사용자명: {}", user.username);
    if let Some(created_at) = user.created_at {
        println!("가입일: {}", created_at.format("%Y-%m-%d"));
    }
    Ok(())
}

pub async fn handle_update_me(api: Arc<ApiClient>, form: &UpdateProfileForm) -> ClientResult<()> {
    require_login(&api)?;
    let user = account_service(api).update_profile(form).await?;
    println!("정보가 수정되었습니다: {} ({})", user.username, user.email);
    Ok(())
}

pub async fn handle_delete_me(
    api: Arc<ApiClient>,
    form: &DeleteAccountForm,
    yes: bool,
) -> ClientResult<()> {
    require_login(&api)?;
    confirm(yes, "회원 탈퇴")?;
    account_service(api).delete_account(form).await?;
    println!("회원 탈퇴가 완료되었습니다.");
    Ok(())
}

// endregion: --- Account Handlers


// endregion: --- Tests
