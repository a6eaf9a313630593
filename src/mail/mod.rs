//! # 메일 발송
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `JavaMailSender` | `MailTransport` / `SmtpMailer` (lettre) |
//! | `MimeMessageHelper(message, true, "UTF-8")` | `build_message` (`text/html; charset=utf-8`) |
//! | `spring.mail.*` | `SMTP_HOST`, `SMTP_PORT`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_STARTTLS` |

pub mod mailer;
pub mod templates;

pub use mailer::{MailTransport, SmtpMailer};
