/// 보호된 경로에 접근하는 데 필요한 역할
#[derive(Debug, Clone, PartialEq)]
pub struct RequiredRole(String);

impl RequiredRole {
    pub fn new(role: &str) -> Self {
        Self(role.to_string())
    }

    /// 사용자 역할이 요구사항을 만족하는지 확인
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        user_roles.contains(&self.0)
    }

    pub fn describe(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_role_satisfaction() {
        let roles = vec!["user".to_string()];

        assert!(RequiredRole::new("user").is_satisfied(&roles));
        assert!(!RequiredRole::new("admin").is_satisfied(&roles));
        assert!(!RequiredRole::new("admin").is_satisfied(&[]));
        assert_eq!(RequiredRole::new("admin").describe(), "admin");
    }
}
