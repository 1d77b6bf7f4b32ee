use crate::goods::HistoryNo;

/// 온비드 물건 목록 조회 (외부 API 직접 호출)
pub const GOODS: &str = "/goods";

/// DB 물건 목록 조회
pub const GOODS_DB: &str = "/goods/db";

/// DB 물건 일괄 저장 (기존 데이터 삭제 후 저장)
pub const GOODS_DB_BATCH: &str = "/goods/db/batch";

/// DB 물건 전체 삭제
pub const GOODS_DB_ALL: &str = "/goods/db/all";

/// DB 동기화 상태 조회
pub const GOODS_REFRESH_STATUS: &str = "/goods/refresh-status";

/// 구매 생성 / 전체 구매 이력 조회
pub const PURCHASES: &str = "/purchases";

/// 구매 이력 초기화
pub const PURCHASES_RESET: &str = "/purchases/reset";

/// 회원가입
pub const USERS_REGISTER: &str = "/users/register";

/// 로그인
pub const USERS_LOGIN: &str = "/users/login";

/// 내 정보 조회 / 수정 / 탈퇴
pub const USERS_ME: &str = "/users/me";

/// 관심물건 목록 / 등록
pub const FAVORITES: &str = "/favorites";

/// DB 물건 상세 조회
pub fn goods_db_detail(history_no: &HistoryNo) -> String {
    format!("{}/{}", GOODS_DB, history_no)
}

/// 물건별 구매 이력 조회
pub fn purchases_by_history_no(history_no: &HistoryNo) -> String {
    format!("{}/{}", PURCHASES, history_no)
}

/// 관심물건 삭제 (ID)
pub fn favorite_by_id(id: i64) -> String {
    format!("{}/{}", FAVORITES, id)
}

/// 관심물건 삭제 (물건관리번호)
pub fn favorite_by_goods_no(goods_no: &str) -> String {
    format!("{}/goods/{}", FAVORITES, goods_no)
}

/// 관심물건 여부 확인
pub fn favorite_check(history_no: &HistoryNo) -> String {
    format!("{}/check/{}", FAVORITES, history_no)
}
