//! 목록 화면 파생 (필터 → 정렬 → 페이지 구간)
//! 같은 입력이면 항상 같은 결과를 내는 순수 함수들이다.
// region:    --- Imports
use crate::error::{ClientError, ClientResult};
use crate::goods::Goods;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// endregion: --- Imports

/// 페이지당 건수
pub const PAGE_SIZE: usize = 20;

/// 페이지 번호 버튼 최대 개수
pub const MAX_PAGE_BUTTONS: usize = 10;

// region:    --- Sort
/// 정렬 가능한 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    HistoryNo,
    GoodsName,
    MinBidPrice,
    AppraisalPrice,
    BidStartDate,
    BidCloseDate,
    InquiryCount,
    FavoriteCount,
}

impl SortKey {
    /// 화면 표시용 필드명
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::HistoryNo => "물건이력번호",
            SortKey::GoodsName => "물건명",
            SortKey::MinBidPrice => "최저입찰가",
            SortKey::AppraisalPrice => "감정가",
            SortKey::BidStartDate => "입찰시작일",
            SortKey::BidCloseDate => "입찰마감일",
            SortKey::InquiryCount => "조회수",
            SortKey::FavoriteCount => "관심수",
        }
    }

    fn compare(&self, a: &Goods, b: &Goods) -> Option<Ordering> {
        match self {
            SortKey::HistoryNo => compare_present(&a.history_no, &b.history_no),
            SortKey::GoodsName => compare_present(&a.goods_name, &b.goods_name),
            SortKey::MinBidPrice => compare_present(&a.min_bid_price, &b.min_bid_price),
            SortKey::AppraisalPrice => compare_present(&a.appraisal_price, &b.appraisal_price),
            SortKey::BidStartDate => compare_present(&a.bid_start_date, &b.bid_start_date),
            SortKey::BidCloseDate => compare_present(&a.bid_close_date, &b.bid_close_date),
            SortKey::InquiryCount => compare_present(&a.inquiry_count, &b.inquiry_count),
            SortKey::FavoriteCount => compare_present(&a.favorite_count, &b.favorite_count),
        }
    }
}

/// 둘 다 값이 있을 때만 비교 (없으면 None)
fn compare_present<T: Ord>(a: &Option<T>, b: &Option<T>) -> Option<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn has_key(key: SortKey, goods: &Goods) -> bool {
    match key {
        SortKey::HistoryNo => goods.history_no.is_some(),
        SortKey::GoodsName => goods.goods_name.is_some(),
        SortKey::MinBidPrice => goods.min_bid_price.is_some(),
        SortKey::AppraisalPrice => goods.appraisal_price.is_some(),
        SortKey::BidStartDate => goods.bid_start_date.is_some(),
        SortKey::BidCloseDate => goods.bid_close_date.is_some(),
        SortKey::InquiryCount => goods.inquiry_count.is_some(),
        SortKey::FavoriteCount => goods.favorite_count.is_some(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// 단일 키 정렬 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// 정렬 헤더 클릭: 같은 필드면 방향 전환, 다른 필드면 내림차순
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Descending;
        }
    }

    /// 정렬 아이콘
    pub fn indicator(&self, key: SortKey) -> &'static str {
        match (self.key == Some(key), self.direction) {
            (false, _) => "⇅",
            (true, SortDirection::Ascending) => "↑",
            (true, SortDirection::Descending) => "↓",
        }
    }

    /// 안정 정렬, 값이 없는 항목은 방향과 관계없이 뒤로
    pub fn sort(&self, items: &mut [Goods]) {
        let Some(key) = self.key else {
            return;
        };
        let direction = self.direction;
        items.sort_by(|a, b| match (has_key(key, a), has_key(key, b)) {
            (true, true) => {
                let ordering = key.compare(a, b).unwrap_or(Ordering::Equal);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        });
    }
}

// endregion: --- Sort

// region:    --- Filter
/// 검색 필터
///
/// 가격 범위는 양 끝 포함이며, 범위 조건이 있으면 해당 필드가 없는 항목은 제외한다.
/// 날짜 조건은 `YYYYMMDD` 로 정규화해 비교하며, 형식이 맞지 않는 조건은 무시한다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// 물건명 (부분 일치)
    pub goods_name: Option<String>,
    /// 물건관리번호 (부분 일치, 회차 공통)
    pub goods_no: Option<String>,
    pub appraisal_price_from: Option<i64>,
    pub appraisal_price_to: Option<i64>,
    pub min_bid_price_from: Option<i64>,
    pub min_bid_price_to: Option<i64>,
    /// 입찰시작일 하한 (YYYYMMDD)
    pub bid_start_from: Option<String>,
    /// 입찰마감일 상한 (YYYYMMDD)
    pub bid_close_to: Option<String>,
    /// 카테고리명 (부분 일치)
    pub category: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, goods: &Goods) -> bool {
        contains_text(&self.goods_name, goods.goods_name.as_deref())
            && contains_text(&self.goods_no, goods.goods_no.as_deref())
            && contains_text(&self.category, goods.category_name.as_deref())
            && in_range(
                goods.appraisal_price,
                self.appraisal_price_from,
                self.appraisal_price_to,
            )
            && in_range(
                goods.min_bid_price,
                self.min_bid_price_from,
                self.min_bid_price_to,
            )
            && date_on_or_after(goods.bid_start_date.as_deref(), self.bid_start_from.as_deref())
            && date_on_or_before(goods.bid_close_date.as_deref(), self.bid_close_to.as_deref())
    }

    /// 외부 API 조회 파라미터 (`GET /goods`)
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |name: &str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                params.push((name.to_string(), value));
            }
        };
        push("cltrNm", self.goods_name.clone());
        push("cltrMnmtNo", self.goods_no.clone());
        push("goodsPriceFrom", self.appraisal_price_from.map(|v| v.to_string()));
        push("goodsPriceTo", self.appraisal_price_to.map(|v| v.to_string()));
        push("openPriceFrom", self.min_bid_price_from.map(|v| v.to_string()));
        push("openPriceTo", self.min_bid_price_to.map(|v| v.to_string()));
        push("pbctBegnDtm", normalized_bound(self.bid_start_from.as_deref()));
        push("pbctClsDtm", normalized_bound(self.bid_close_to.as_deref()));
        params
    }
}

fn contains_text(needle: &Option<String>, haystack: Option<&str>) -> bool {
    let Some(needle) = needle.as_deref().map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

fn in_range(value: Option<i64>, from: Option<i64>, to: Option<i64>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    from.map_or(true, |from| value >= from) && to.map_or(true, |to| value <= to)
}

/// 날짜 조건 입력 정규화
///
/// `YYYYMMDD`, `YYYY-MM-DD`, `YYYY.MM.DD`, `YYYY/MM/DD` 를 받아 `YYYYMMDD` 로 돌려준다.
pub fn parse_date_bound(raw: &str) -> ClientResult<String> {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '.' | '/'))
        .collect();
    let valid = digits.len() == 8
        && digits.bytes().all(|b| b.is_ascii_digit())
        && NaiveDate::parse_from_str(&digits, "%Y%m%d").is_ok();
    if valid {
        Ok(digits)
    } else {
        Err(ClientError::ValidationFailed(format!(
            "날짜는 YYYYMMDD 또는 YYYY-MM-DD 형식으로 입력해주세요: {}",
            raw.trim()
        )))
    }
}

fn normalized_bound(raw: Option<&str>) -> Option<String> {
    raw.and_then(|raw| parse_date_bound(raw).ok())
}

/// 물건 날짜 값의 앞 8자리 숫자 (`20250110180000`, `2025-01-10 18:00` 모두 `20250110`)
fn date_key(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(8).collect();
    (digits.len() == 8).then_some(digits)
}

fn date_on_or_after(value: Option<&str>, bound: Option<&str>) -> bool {
    let Some(bound) = normalized_bound(bound) else {
        return true;
    };
    value.and_then(date_key).is_some_and(|v| v >= bound)
}

fn date_on_or_before(value: Option<&str>, bound: Option<&str>) -> bool {
    let Some(bound) = normalized_bound(bound) else {
        return true;
    };
    value.and_then(date_key).is_some_and(|v| v <= bound)
}

// endregion: --- Filter

// region:    --- View Page
/// 화면에 표시되는 한 페이지
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPage {
    pub items: Vec<Goods>,
    pub page: usize,
    /// 필터 적용 후 전체 건수
    pub total_count: usize,
    pub total_pages: usize,
}

/// 필터 → 정렬 → 페이지 구간 (PAGE_SIZE 건)
pub fn apply_client_side_view(
    items: &[Goods],
    filter: &FilterCriteria,
    sort: &SortState,
    page: usize,
) -> ViewPage {
    let mut filtered: Vec<Goods> = items
        .iter()
        .filter(|goods| filter.matches(goods))
        .cloned()
        .collect();
    sort.sort(&mut filtered);

    let total_count = filtered.len();
    let total_pages = total_pages(total_count);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE);

    let items = filtered.into_iter().skip(start).take(PAGE_SIZE).collect();

    ViewPage {
        items,
        page,
        total_count,
        total_pages,
    }
}

pub fn total_pages(total_count: usize) -> usize {
    total_count.div_ceil(PAGE_SIZE)
}

/// 현재 페이지를 중심으로 최대 10개의 페이지 번호
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
    let end = (start + MAX_PAGE_BUTTONS - 1).min(total_pages);

    if end + 1 - start < MAX_PAGE_BUTTONS {
        start = (end + 1).saturating_sub(MAX_PAGE_BUTTONS).max(1);
    }

    (start..=end).collect()
}

// endregion: --- View Page
