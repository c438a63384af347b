//! Bakehouse Storefront - 定制蛋糕店面后端
//!
//! # 架构概述
//!
//! 本模块是店面后端的主入口，提供以下核心功能：
//!
//! - **定价引擎** (`pricing`): 纯函数报价计算 + 文件备份式定价文档存储
//! - **数据库** (`db`): 嵌入式 SQLite 存储（订单、图库、文案、留言）
//! - **认证** (`auth`): 会话令牌 + Argon2 管理员认证
//! - **邮件** (`services/mailer`): SMTP 订单确认/通知（尽力而为）
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! storefront/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── auth/          # 会话存储、认证中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── pricing/       # 报价计算器、定价文档存储
//! ├── services/      # 邮件、Instagram oEmbed
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentAdmin, MemorySessionStore, SessionStore};
pub use core::config::setup_environment;
pub use core::{Config, Server, ServerState};
pub use pricing::PricingStore;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____        __        __
   / __ )____ _/ /_____  / /_  ____  __  __________
  / __  / __ `/ //_/ _ \/ __ \/ __ \/ / / / ___/ _ \
 / /_/ / /_/ / ,< /  __/ / / / /_/ / /_/ (__  )  __/
/_____/\__,_/_/|_|\___/_/ /_/\____/\__,_/____/\___/
    "#
    );
}
