use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

// region:    --- History No
/// 물건이력번호 (회차별 식별자)
///
/// 서버는 숫자로, 일부 응답은 문자열로 내려준다. 둘 다 부호 없는 정수이면
/// 숫자로 비교하고, 숫자는 비숫자보다 앞에 오며, 비숫자끼리는 사전순으로 비교한다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryNo(String);

impl HistoryNo {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 정수 값 (정수가 아니면 None)
    pub fn numeric(&self) -> Option<u64> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl Ord for HistoryNo {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for HistoryNo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HistoryNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HistoryNo {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for HistoryNo {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

impl Serialize for HistoryNo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // 서버 컬럼은 long 이므로 정규형 정수는 숫자로 보낸다
        match self.numeric() {
            Some(n) if n.to_string() == self.0 => serializer.serialize_u64(n),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for HistoryNo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => HistoryNo::from(n),
            Raw::Text(s) => HistoryNo::new(s),
        })
    }
}

// endregion: --- History No

// region:    --- Goods
/// 공매물건 모델
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goods {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_no: Option<HistoryNo>,
    /// 물건관리번호 (예: 2025-09090-001), 회차 공통
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goods_detail: Option<String>,
    /// 감정가
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appraisal_price: Option<i64>,
    /// 최저입찰가
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_bid_price: Option<i64>,
    /// 입찰시작일시 (YYYYMMDDHHmmss)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_start_date: Option<String>,
    /// 입찰마감일시 (YYYYMMDDHHmmss)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_close_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_no: Option<String>,
    /// 물건진행상태명 (예: 인터넷입찰진행중)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_name: Option<String>,
    /// 지번 주소
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// 도로명 주소
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_type_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bid_method_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// 조회수
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_count: Option<i64>,
    /// 관심물건 등록 수
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_files: Option<String>,
}

impl Goods {
    /// 표시용 주소 (도로명 우선)
    pub fn display_address(&self) -> Option<&str> {
        self.road_address
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.address.as_deref().filter(|s| !s.is_empty()))
    }
}

// endregion: --- Goods


// endregion: --- Tests
