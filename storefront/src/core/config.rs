use std::path::PathBuf;

/// 服务器配置 - 店面后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/bakehouse | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | CORS_ORIGIN | (无) | 允许的前端源，未设置则放开 |
/// | SESSION_TTL_HOURS | 24 | 管理员会话有效期 |
/// | ADMIN_USERNAME | admin | 引导管理员用户名 |
/// | ADMIN_PASSWORD | (无) | 引导管理员密码，未设置则不创建账号 |
/// | SMTP_HOST | (无) | SMTP 主机，未设置则禁用邮件 |
/// | SMTP_PORT | 587 | SMTP 端口 |
/// | SMTP_USERNAME / SMTP_PASSWORD | (无) | SMTP 凭据 |
/// | SMTP_FROM | (无) | 发件人地址 |
/// | ADMIN_EMAIL | (无) | 接收订单/留言通知的邮箱 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/bakehouse HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储定价文档、数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 允许跨域的前端源 (未设置则 permissive，开发用)
    pub cors_origin: Option<String>,
    /// 管理员会话有效期 (小时)
    pub session_ttl_hours: i64,
    /// 引导管理员用户名
    pub admin_username: String,
    /// 引导管理员密码 (未设置则不做引导)
    pub admin_password: Option<String>,
    /// SMTP 邮件配置
    pub smtp: SmtpConfig,
}

/// SMTP 邮件配置
///
/// `host` 为 None 时邮件整体禁用：订单照常成功，只记录 debug 日志。
#[derive(Debug, Clone, Default)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 发件人地址 ("Bakehouse <orders@example.com>")
    pub from_address: Option<String>,
    /// 接收订单/留言通知的收件人
    pub admin_email: Option<String>,
}

impl SmtpConfig {
    fn from_env() -> Self {
        Self {
            host: std::env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: std::env::var("SMTP_USERNAME").ok(),
            password: std::env::var("SMTP_PASSWORD").ok(),
            from_address: std::env::var("SMTP_FROM").ok(),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/bakehouse".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|s| !s.is_empty()),
            session_ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(24),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp: SmtpConfig::from_env(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    // ── Work-dir layout ─────────────────────────────────────────────

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 定价文档目录 (work_dir/pricing, 备份在其 backups/ 子目录)
    pub fn pricing_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("pricing")
    }

    /// 日志目录 (work_dir/logs)
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.pricing_dir().join("backups"))?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 设置进程环境：加载 .env、初始化日志
///
/// 在读取 [`Config`] 之前调用，保证 .env 中的变量生效。
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    crate::utils::logger::init_logger_with_file(None, log_dir.as_deref());

    Ok(())
}
