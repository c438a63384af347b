//! 外部服务集成
//!
//! - [`mailer`] - SMTP 邮件发送（订单确认、后台通知）
//! - [`instagram`] - Instagram oEmbed 抓取

pub mod instagram;
pub mod mail_templates;
pub mod mailer;

pub use instagram::{InstagramClient, InstagramEmbed};
pub use mailer::Mailer;
