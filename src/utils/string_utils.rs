//! # 문자열 유틸리티
//!
//! 요청 입력을 서비스에 넘기기 전에 정리하는 함수들입니다.

use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 그 외에는 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Hi  ".to_string())), Some("Hi".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일 비교/저장용 정규화 (앞뒤 공백 제거 + 소문자)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 쉼표로 구분된 사용자 ID 목록 파싱
///
/// 목록이 비었거나 항목 중 하나라도 ObjectId 형식이 아니면 `Bad request`.
/// 중복 ID는 한 번만 남깁니다.
pub fn parse_user_id_list(raw: Option<&str>) -> Result<Vec<ObjectId>, AppError> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(AppError::bad_request)?;

    let mut ids: Vec<ObjectId> = Vec::new();
    for part in raw.split(',') {
        let id = ObjectId::parse_str(part.trim()).map_err(|_| AppError::bad_request())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    Ok(ids)
}

/// 저장된 인증 코드와 제출된 코드 비교
///
/// 공백을 제거한 문자열이 같거나, 둘 다 정수로 해석되어 값이 같으면 일치로 봅니다.
/// 따라서 숫자로 제출된 `1234`는 저장된 `"00001234"`와 일치합니다.
pub fn codes_match(stored: &str, submitted: &str) -> bool {
    let stored = stored.trim();
    let submitted = submitted.trim();

    if stored.is_empty() || submitted.is_empty() {
        return false;
    }
    if stored == submitted {
        return true;
    }

    match (stored.parse::<u64>(), submitted.parse::<u64>()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
