use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::{MemorySessionStore, SessionStore};
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::Config;
use crate::db::repository::admin_user;
use crate::db::DbService;
use crate::pricing::PricingStore;
use crate::services::{InstagramClient, Mailer};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是店面后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | sessions | Arc<dyn SessionStore> | 管理员会话存储 (可注入) |
/// | pricing | PricingStore | 定价文档存储 |
/// | mailer | Arc<Mailer> | SMTP 邮件服务 |
/// | instagram | Arc<InstagramClient> | Instagram oEmbed 客户端 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 管理员会话存储
    pub sessions: Arc<dyn SessionStore>,
    /// 定价文档存储
    pub pricing: PricingStore,
    /// 邮件服务
    pub mailer: Arc<Mailer>,
    /// Instagram oEmbed 客户端
    pub instagram: Arc<InstagramClient>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试用这个注入
    /// 内存数据库和自定义会话存储。
    pub fn new(
        config: Config,
        pool: SqlitePool,
        sessions: Arc<dyn SessionStore>,
        pricing: PricingStore,
        mailer: Arc<Mailer>,
        instagram: Arc<InstagramClient>,
    ) -> Self {
        Self {
            config,
            pool,
            sessions,
            pricing,
            mailer,
            instagram,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/storefront.db) + 迁移
    /// 3. 定价文档 (首次启动写入默认文档)
    /// 4. 会话存储、邮件、Instagram 客户端
    /// 5. 引导管理员账号 (ADMIN_PASSWORD 已设置时)
    ///
    /// # Panics
    ///
    /// 目录创建、数据库或定价文档初始化失败时 panic。
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("storefront.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let pricing = PricingStore::new(config.pricing_dir());
        pricing
            .ensure_seeded()
            .await
            .expect("Failed to seed pricing document");

        let ttl = Duration::from_secs(config.session_ttl_hours.max(1) as u64 * 3600);
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(ttl));

        let mailer = Arc::new(Mailer::from_config(&config.smtp));
        let instagram = Arc::new(InstagramClient::new());

        let state = Self::new(
            config.clone(),
            db_service.pool,
            sessions,
            pricing,
            mailer,
            instagram,
        );

        state.seed_admin_account().await;

        state
    }

    /// 引导管理员账号
    ///
    /// ADMIN_PASSWORD 已设置时创建/更新账号；未设置且库里也没有账号时
    /// 记录警告（后台登录不可用，但店面照常工作）。
    async fn seed_admin_account(&self) {
        match &self.config.admin_password {
            Some(password) => {
                if let Err(e) =
                    admin_user::upsert(&self.pool, &self.config.admin_username, password).await
                {
                    tracing::error!(error = %e, "Failed to seed admin account");
                } else {
                    tracing::info!(username = %self.config.admin_username, "Admin account ready");
                }
            }
            None => {
                let existing = admin_user::find_by_username(&self.pool, &self.config.admin_username)
                    .await
                    .ok()
                    .flatten();
                if existing.is_none() {
                    tracing::warn!(
                        "No ADMIN_PASSWORD set and no admin account exists; admin login is disabled"
                    );
                }
            }
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 开始服务前调用。
    ///
    /// 启动的任务：
    /// - 会话清扫 (每小时清理过期管理员会话)
    pub fn start_background_tasks(&self, tasks: &mut BackgroundTasks) {
        let sessions = self.sessions.clone();
        let token = tasks.shutdown_token();
        tasks.spawn("session_sweep", TaskKind::Periodic, async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let removed = sessions.purge_expired().await;
                        if removed > 0 {
                            tracing::info!(removed, "Swept expired admin sessions");
                        }
                    }
                }
            }
        });
    }

    /// 获取数据库连接池
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.config.work_dir)
    }
}
