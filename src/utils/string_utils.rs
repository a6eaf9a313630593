//! 문자열 처리 유틸리티
//!
//! 요청 파라미터 정리, 쉼표 구분 목록 파싱, 로그용 마스킹, 금액 포맷팅 등
//! 여러 계층에서 공통으로 쓰는 문자열 함수들입니다.

use serde::Deserialize;

use crate::errors::errors::AppError;

/// 필수 문자열 필드를 검증하고 공백을 제거합니다
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 빈 문자열이나 공백만 있는 값을 `None`으로 정리합니다
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

/// serde 필드용: 빈 문자열을 `None`으로 역직렬화합니다
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `a,b, c` 형태의 목록을 분리합니다. 빈 항목은 버립니다.
///
/// Spring의 `@RequestParam List<String>`이 쉼표 구분 값을 받는 방식과 같습니다.
pub fn split_comma_separated(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// 로그 출력용 전화번호 마스킹 (`01012345678` → `010****5678`)
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 7 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 7), tail)
}

/// 천 단위 구분 기호를 넣습니다 (`1234567` → `1,234,567`)
pub fn format_thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  World  ", "name").unwrap(), "World");
        assert!(validate_required_string("\t\n", "name").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        #[derive(Deserialize)]
        struct Form {
            #[serde(default, deserialize_with = "deserialize_optional_string")]
            name: Option<String>,
        }

        let blank: Form = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        let filled: Form = serde_json::from_str(r#"{"name": " Kim "}"#).unwrap();
        let missing: Form = serde_json::from_str("{}").unwrap();

        assert_eq!(blank.name, None);
        assert_eq!(filled.name, Some("Kim".to_string()));
        assert_eq!(missing.name, None);
    }

    #[test]
    fn test_split_comma_separated() {
        assert_eq!(
            split_comma_separated("uuid-1, uuid-2,,uuid-3 "),
            vec!["uuid-1", "uuid-2", "uuid-3"]
        );
        assert!(split_comma_separated(" , ").is_empty());
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("01012345678"), "010****5678");
        assert_eq!(mask_phone("12345"), "*****");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-45000), "-45,000");
    }
}
