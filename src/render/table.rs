// region:    --- Imports
use crate::format::{format_optional_date, format_optional_number, format_price};
use crate::goods::{Goods, HistoryNo};
use crate::listing::view::{SortKey, SortState};
use std::collections::HashSet;
use std::fmt::Write;

// endregion: --- Imports

const COLUMNS: [(&str, Option<SortKey>); 6] = [
    ("물건이력번호", Some(SortKey::HistoryNo)),
    ("물건명", Some(SortKey::GoodsName)),
    ("최저입찰가", Some(SortKey::MinBidPrice)),
    ("감정가", Some(SortKey::AppraisalPrice)),
    ("입찰마감일", Some(SortKey::BidCloseDate)),
    ("주소", None),
];

// region:    --- Goods Table
/// 물건 목록 표. 행별 펼침 상태는 표가 직접 가진다.
#[derive(Debug, Default)]
pub struct GoodsTable {
    expanded: HashSet<HistoryNo>,
}

impl GoodsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 행 펼침/접기, 펼쳐졌으면 true
    pub fn toggle_row(&mut self, history_no: &HistoryNo) -> bool {
        if self.expanded.remove(history_no) {
            false
        } else {
            self.expanded.insert(history_no.clone());
            true
        }
    }

    pub fn is_expanded(&self, history_no: &HistoryNo) -> bool {
        self.expanded.contains(history_no)
    }

    pub fn render(&self, items: &[Goods], sort: &SortState) -> String {
        if items.is_empty() {
            return "조회된 물건이 없습니다.".to_string();
        }

        let header = COLUMNS
            .iter()
            .map(|(label, key)| match key {
                Some(key) => format!("{} {}", label, sort.indicator(*key)),
                None => label.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ");

        let mut out = String::new();
        let _ = writeln!(out, "{}", header);
        let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));

        for goods in items {
            let _ = writeln!(out, "{}", row(goods));
            let expanded = goods
                .history_no
                .as_ref()
                .is_some_and(|no| self.is_expanded(no));
            if expanded {
                out.push_str(&detail_block(goods));
            }
        }
        out
    }
}

fn text(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

fn row(goods: &Goods) -> String {
    [
        goods
            .history_no
            .as_ref()
            .map(|no| no.to_string())
            .unwrap_or_else(|| "-".to_string()),
        text(goods.goods_name.as_deref()).to_string(),
        format_price(goods.min_bid_price),
        format_price(goods.appraisal_price),
        format_optional_date(goods.bid_close_date.as_deref()),
        text(goods.display_address()).to_string(),
    ]
    .join(" | ")
}

fn detail_block(goods: &Goods) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "    물건관리번호: {}", text(goods.goods_no.as_deref()));
    let _ = writeln!(out, "    공고번호: {}", text(goods.notice_no.as_deref()));
    let _ = writeln!(out, "    상태: {}", text(goods.status_name.as_deref()));
    let _ = writeln!(
        out,
        "    처분/입찰방식: {} / {}",
        text(goods.sale_type_name.as_deref()),
        text(goods.bid_method_name.as_deref())
    );
    let _ = writeln!(
        out,
        "    입찰기간: {} ~ {}",
        format_optional_date(goods.bid_start_date.as_deref()),
        format_optional_date(goods.bid_close_date.as_deref())
    );
    let _ = writeln!(out, "    수수료율: {}", text(goods.fee_rate.as_deref()));
    let _ = writeln!(
        out,
        "    조회수 {} / 관심 {}",
        format_optional_number(goods.inquiry_count),
        format_optional_number(goods.favorite_count)
    );
    if let Some(detail) = goods.goods_detail.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "    {}", detail);
    }
    out
}

// endregion: --- Goods Table


// endregion: --- Tests
