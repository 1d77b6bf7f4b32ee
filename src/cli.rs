use crate::listing::{parse_date_bound, FilterCriteria, SortKey, SourceKind};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "onbid-client")]
#[command(about = "온비드 공매물건 조회/관심물건/구매 클라이언트", long_about = None)]
#[command(version)]
pub struct Cli {
    /// 백엔드 API 주소 (ONBID_API_BASE_URL 보다 우선)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 물건 목록
    List {
        #[arg(long, value_enum, default_value = "db")]
        source: SourceArg,

        #[arg(long, default_value = "1")]
        page: usize,

        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// 오름차순 (기본 내림차순)
        #[arg(long)]
        asc: bool,

        #[command(flatten)]
        filter: FilterArgs,

        /// 카드 형태로 출력
        #[arg(long)]
        cards: bool,

        /// 상세를 펼칠 물건이력번호
        #[arg(long)]
        expand: Vec<String>,
    },

    /// 온비드 조회 → 최신 회차 100건 추출 → DB 저장
    Sync {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// DB 물건 전체 삭제
    Clear {
        #[arg(long)]
        yes: bool,
    },

    /// DB 동기화 상태 감시
    Watch {
        /// 폴링 횟수 (생략 시 계속)
        #[arg(long)]
        ticks: Option<u32>,
    },

    /// 물건 상세 + 구매 가능 여부
    Detail { history_no: String },

    /// 최저입찰가로 구매
    Purchase {
        history_no: String,

        #[arg(long)]
        yes: bool,
    },

    /// 전체 구매 이력
    Purchases,

    /// 구매 이력 초기화
    PurchasesReset {
        #[arg(long)]
        yes: bool,
    },

    /// 내 관심물건
    Favorites,

    /// 관심물건 등록/해제
    Favorite { history_no: String },

    /// 관심물건 id 로 삭제
    UnfavoriteId { id: i64 },

    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        password_confirm: String,
    },

    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    Logout,

    /// 내 정보
    Me,

    /// 내 정보 수정
    UpdateMe {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        current_password: Option<String>,

        #[arg(long)]
        new_password: Option<String>,

        #[arg(long)]
        new_password_confirm: Option<String>,
    },

    /// 회원 탈퇴
    DeleteMe {
        #[arg(long)]
        password: String,

        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    Db,
    Live,
    Reduced,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Db => SourceKind::Database,
            SourceArg::Live => SourceKind::LiveApi,
            SourceArg::Reduced => SourceKind::Reduced,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    HistoryNo,
    Name,
    MinBidPrice,
    AppraisalPrice,
    BidStart,
    BidClose,
    Inquiry,
    Favorite,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::HistoryNo => SortKey::HistoryNo,
            SortArg::Name => SortKey::GoodsName,
            SortArg::MinBidPrice => SortKey::MinBidPrice,
            SortArg::AppraisalPrice => SortKey::AppraisalPrice,
            SortArg::BidStart => SortKey::BidStartDate,
            SortArg::BidClose => SortKey::BidCloseDate,
            SortArg::Inquiry => SortKey::InquiryCount,
            SortArg::Favorite => SortKey::FavoriteCount,
        }
    }
}

/// 검색 조건
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// 물건명
    #[arg(long)]
    pub name: Option<String>,

    /// 물건관리번호
    #[arg(long)]
    pub goods_no: Option<String>,

    #[arg(long)]
    pub appraisal_from: Option<i64>,

    #[arg(long)]
    pub appraisal_to: Option<i64>,

    #[arg(long)]
    pub min_bid_from: Option<i64>,

    #[arg(long)]
    pub min_bid_to: Option<i64>,

    /// 입찰시작일 하한 (YYYYMMDD 또는 YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_bound)]
    pub bid_start_from: Option<String>,

    /// 입찰마감일 상한 (YYYYMMDD 또는 YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_bound)]
    pub bid_close_to: Option<String>,

    #[arg(long)]
    pub category: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            goods_name: args.name,
            goods_no: args.goods_no,
            appraisal_price_from: args.appraisal_from,
            appraisal_price_to: args.appraisal_to,
            min_bid_price_from: args.min_bid_from,
            min_bid_price_to: args.min_bid_to,
            bid_start_from: args.bid_start_from,
            bid_close_to: args.bid_close_to,
            category: args.category,
        }
    }
}
