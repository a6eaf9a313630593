//! HTML 메일 템플릿

pub const APP_URL: &str = "https://example.com/app";
pub const RESET_PASSWORD_URL: &str = "https://example.com/reset-password";

pub fn welcome_subject(name: &str) -> String {
    format!("환영합니다! {}님", name)
}

pub const PASSWORD_RESET_SUBJECT: &str = "비밀번호 재설정 요청";

pub fn welcome_email(name: &str, service_name: &str) -> String {
    format!(
        r#"<html>
<body>
    <h1>환영합니다, {name}님!</h1>
    <p>{service_name}에 가입해주셔서 감사합니다.</p>
    <p>지금 바로 서비스를 시작해보세요!</p>
    <a href="{APP_URL}" style="background-color: #4CAF50; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px;">서비스 시작하기</a>
</body>
</html>
"#
    )
}

pub fn password_reset_email(token: &str) -> String {
    let token = urlencoding::encode(token);
    format!(
        r#"<html>
<body>
    <h1>비밀번호 재설정</h1>
    <p>비밀번호 재설정을 요청하셨습니다.</p>
    <p>아래 링크를 클릭하여 비밀번호를 재설정하세요:</p>
    <a href="{RESET_PASSWORD_URL}?token={token}" style="background-color: #008CBA; color: white; padding: 10px 20px; text-decoration: none; border-radius: 5px;">비밀번호 재설정</a>
    <p>이 링크는 24시간 동안 유효합니다.</p>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_email() {
        let html = welcome_email("홍길동", "My API Server");

        assert!(html.contains("환영합니다, 홍길동님!"));
        assert!(html.contains("My API Server에 가입해주셔서"));
        assert!(html.contains(r#"href="https://example.com/app""#));
        assert_eq!(welcome_subject("홍길동"), "환영합니다! 홍길동님");
    }

    #[test]
    fn test_password_reset_email_links_token() {
        let html = password_reset_email("abc123");

        assert!(html.contains("https://example.com/reset-password?token=abc123"));
        assert!(html.contains("24시간"));
    }
}
