//! livepreview - 实时预览内核
//!
//! 模块结构：
//! - models: 数据模型（FileTree, DocumentHistory, Debouncer）
//! - preview: 预览打包（扫描、选入口、注入、变更检测）
//! - kernel: 项目会话与服务（配置、会话持久化、后台打包、事件总线）

pub mod kernel;
pub mod models;
pub mod preview;
