//! HwProj Next - 课程作业管理平台后端服务
//!
//! 基于 Actix Web 构建的作业提交与评分系统后端。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `events`: 课程领域事件总线
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `rating`: 评分组件状态机与评分草稿
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod events;
pub mod middlewares;
pub mod models;
pub mod rating;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
