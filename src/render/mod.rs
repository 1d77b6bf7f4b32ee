//! 터미널 출력용 목록 표/카드/페이지 바
pub mod card;
pub mod table;

pub use card::GoodsCard;
pub use table::GoodsTable;

use crate::listing::view::page_window;

/// `«« 이전 1 2 [3] 4 다음 »»` (페이지가 없으면 빈 문자열)
pub fn pagination_bar(current: usize, total_pages: usize) -> String {
    let pages = page_window(current, total_pages);
    if pages.is_empty() {
        return String::new();
    }

    let mut parts = vec!["««".to_string(), "이전".to_string()];
    parts.extend(pages.iter().map(|&page| {
        if page == current {
            format!("[{}]", page)
        } else {
            page.to_string()
        }
    }));
    parts.push("다음".to_string());
    parts.push("»»".to_string());
    parts.join(" ")
}
