// region:    --- Imports
use crate::format::{format_optional_date, format_optional_number, format_price};
use crate::goods::Goods;
use std::fmt::Write;

// endregion: --- Imports

/// 물건 카드 (상세 펼침 토글 포함)
#[derive(Debug)]
pub struct GoodsCard<'a> {
    goods: &'a Goods,
    show_details: bool,
}

impl<'a> GoodsCard<'a> {
    pub fn new(goods: &'a Goods) -> Self {
        Self {
            goods,
            show_details: false,
        }
    }

    pub fn toggle_details(&mut self) -> bool {
        self.show_details = !self.show_details;
        self.show_details
    }

    pub fn show_details(&self) -> bool {
        self.show_details
    }

    pub fn render(&self) -> String {
        let goods = self.goods;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "[{}] {}",
            or_dash(goods.status_name.as_deref()),
            or_dash(goods.goods_name.as_deref())
        );
        let _ = writeln!(
            out,
            "  최저입찰가 {}  (감정가 {})",
            format_price(goods.min_bid_price),
            format_price(goods.appraisal_price)
        );
        let _ = writeln!(out, "  수수료율 {}", or_dash(goods.fee_rate.as_deref()));
        let _ = writeln!(
            out,
            "  입찰기간 {} ~ {}",
            format_optional_date(goods.bid_start_date.as_deref()),
            format_optional_date(goods.bid_close_date.as_deref())
        );
        let _ = writeln!(out, "  주소 {}", or_dash(goods.display_address()));
        let _ = writeln!(out, "  분류 {}", or_dash(goods.category_name.as_deref()));
        let _ = writeln!(
            out,
            "  조회 {} · 관심 {}",
            format_optional_number(goods.inquiry_count),
            format_optional_number(goods.favorite_count)
        );

        if self.show_details {
            if let Some(no) = &goods.history_no {
                let _ = writeln!(out, "  물건이력번호 {}", no);
            }
            let _ = writeln!(out, "  물건관리번호 {}", or_dash(goods.goods_no.as_deref()));
            let _ = writeln!(out, "  공고번호 {}", or_dash(goods.notice_no.as_deref()));
            let _ = writeln!(
                out,
                "  처분방식 {} / 입찰방식 {}",
                or_dash(goods.sale_type_name.as_deref()),
                or_dash(goods.bid_method_name.as_deref())
            );
            if let Some(detail) = goods.goods_detail.as_deref() {
                let _ = writeln!(out, "  {}", detail);
            }
        }
        out
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}
