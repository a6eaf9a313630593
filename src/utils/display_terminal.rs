//! 터미널 출력 포맷팅 유틸리티
//!
//! 애플리케이션 초기화 과정(서비스 레지스트리, 메시지 브로커 토폴로지, 배치 잡 등록)에서
//! 사용되는 터미널 출력 함수들을 제공합니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                  System Started                  ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{}║", center(title, BOX_WIDTH));
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 하위 작업의 진행 상태를 트리 형태로 출력합니다
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 초기화 결과 요약
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// 이름-값 목록을 출력합니다 (큐 바인딩, 등록된 배치 잡 등)
pub fn print_key_values(title: &str, entries: &[(&str, String)]) {
    print_boxed_title(title);
    for (key, value) in entries {
        print_sub_task(key, value);
    }
    println!();
}

/// 표시 폭 기준으로 가운데 정렬합니다.
///
/// 이모지와 한글은 터미널에서 두 칸을 차지하므로 폭을 2로 계산합니다.
fn center(text: &str, width: usize) -> String {
    let text_width: usize = text.chars().map(display_width).sum();
    if text_width >= width {
        return text.to_string();
    }

    let left = (width - text_width) / 2;
    let right = width - text_width - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn display_width(c: char) -> usize {
    match c as u32 {
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 | 0x1F300..=0x1FAFF => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ascii() {
        let centered = center("abc", 9);
        assert_eq!(centered, "   abc   ");
    }

    #[test]
    fn test_center_counts_wide_characters() {
        // "배치" = 4 columns
        let centered = center("배치", 8);
        assert_eq!(centered, "  배치  ");
    }

    #[test]
    fn test_center_overflow_returns_input() {
        assert_eq!(center("too long", 3), "too long");
    }
}
