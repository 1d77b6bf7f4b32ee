//! 회차 축약
//! 같은 물건관리번호를 가진 회차들 중 물건이력번호가 가장 큰 회차만 남긴다.
// region:    --- Imports
use super::model::Goods;
use std::collections::HashMap;

// endregion: --- Imports

/// 축약 결과 최대 건수
pub const LATEST_ROUND_LIMIT: usize = 100;

// region:    --- Reduce
/// 물건별 최신 회차 추출
///
/// 그룹 순서는 처음 등장한 순서를 따르고, 결과는 `limit` 건으로 자른다.
/// 이력번호가 같은 회차가 여럿이면 먼저 나온 것을 유지한다.
/// 물건관리번호가 없는 항목은 각각 독립된 그룹으로 취급한다.
pub fn reduce_to_latest_rounds(items: &[Goods], limit: usize) -> Vec<Goods> {
    let mut order: Vec<&Goods> = Vec::new();
    let mut slot_by_goods_no: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let Some(goods_no) = item.goods_no.as_deref() else {
            order.push(item);
            continue;
        };

        match slot_by_goods_no.get(goods_no) {
            Some(&slot) => {
                if is_later_round(item, order[slot]) {
                    order[slot] = item;
                }
            }
            None => {
                slot_by_goods_no.insert(goods_no, order.len());
                order.push(item);
            }
        }
    }

    order.into_iter().take(limit).cloned().collect()
}

/// `candidate`가 `current`보다 뒤 회차인지 (이력번호 없는 쪽이 가장 앞)
fn is_later_round(candidate: &Goods, current: &Goods) -> bool {
    match (&candidate.history_no, &current.history_no) {
        (Some(a), Some(b)) => a > b,
        (Some(_), None) => true,
        _ => false,
    }
}

// endregion: --- Reduce
