//! 사전 승인된 알림톡 템플릿

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KakaoTemplateCode {
    Welcome,
    OrderConfirmation,
    PaymentConfirmation,
    ShippingNotification,
    DeliveryComplete,
    PasswordReset,
    Notification,
}

impl KakaoTemplateCode {
    pub const ALL: [KakaoTemplateCode; 7] = [
        KakaoTemplateCode::Welcome,
        KakaoTemplateCode::OrderConfirmation,
        KakaoTemplateCode::PaymentConfirmation,
        KakaoTemplateCode::ShippingNotification,
        KakaoTemplateCode::DeliveryComplete,
        KakaoTemplateCode::PasswordReset,
        KakaoTemplateCode::Notification,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            KakaoTemplateCode::Welcome => "WELCOME_TEMPLATE",
            KakaoTemplateCode::OrderConfirmation => "ORDER_CONFIRMATION_TEMPLATE",
            KakaoTemplateCode::PaymentConfirmation => "PAYMENT_CONFIRMATION_TEMPLATE",
            KakaoTemplateCode::ShippingNotification => "SHIPPING_NOTIFICATION_TEMPLATE",
            KakaoTemplateCode::DeliveryComplete => "DELIVERY_COMPLETE_TEMPLATE",
            KakaoTemplateCode::PasswordReset => "PASSWORD_RESET_TEMPLATE",
            KakaoTemplateCode::Notification => "NOTIFICATION_TEMPLATE",
        }
    }

    /// 카카오 비즈메시지에 등록된 템플릿 코드
    pub fn code(&self) -> &'static str {
        match self {
            KakaoTemplateCode::Welcome => "WELCOME_001",
            KakaoTemplateCode::OrderConfirmation => "ORDER_001",
            KakaoTemplateCode::PaymentConfirmation => "PAYMENT_001",
            KakaoTemplateCode::ShippingNotification => "SHIPPING_001",
            KakaoTemplateCode::DeliveryComplete => "DELIVERY_001",
            KakaoTemplateCode::PasswordReset => "PASSWORD_001",
            KakaoTemplateCode::Notification => "NOTIFICATION_001",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            KakaoTemplateCode::Welcome => "회원가입 환영 메시지",
            KakaoTemplateCode::OrderConfirmation => "주문 확인 메시지",
            KakaoTemplateCode::PaymentConfirmation => "결제 완료 메시지",
            KakaoTemplateCode::ShippingNotification => "배송 시작 알림",
            KakaoTemplateCode::DeliveryComplete => "배송 완료 알림",
            KakaoTemplateCode::PasswordReset => "비밀번호 재설정",
            KakaoTemplateCode::Notification => "일반 알림",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// 템플릿 이름이면 코드로 바꾸고, 그 외 값은 그대로 돌려줍니다.
    pub fn resolve(value: &str) -> String {
        Self::from_name(value)
            .map(|t| t.code().to_string())
            .unwrap_or_else(|| value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_template_names() {
        assert_eq!(KakaoTemplateCode::resolve("WELCOME_TEMPLATE"), "WELCOME_001");
        assert_eq!(KakaoTemplateCode::resolve("NOTIFICATION_TEMPLATE"), "NOTIFICATION_001");
        assert_eq!(KakaoTemplateCode::resolve("ORDER_001"), "ORDER_001");
        assert_eq!(KakaoTemplateCode::resolve("CUSTOM_42"), "CUSTOM_42");
    }

    #[test]
    fn test_every_template_round_trips_by_name() {
        for template in KakaoTemplateCode::ALL {
            assert_eq!(KakaoTemplateCode::from_name(template.name()), Some(template));
            assert!(!template.description().is_empty());
        }
    }
}
