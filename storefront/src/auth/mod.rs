//! 管理员认证模块
//!
//! Bearer 令牌 → 会话的映射。会话存储是一个注入的抽象
//! ([`SessionStore`])，测试和单实例部署用内存实现
//! ([`MemorySessionStore`])，多实例部署可换共享存储而不动调用方。

pub mod middleware;
pub mod session;

pub use middleware::{CurrentAdmin, extract_bearer, require_admin};
pub use session::{MemorySessionStore, Session, SessionStore};
