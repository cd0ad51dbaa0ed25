//! 智巡煤矿：煤矿安全巡检记录管理
//!
//! 应用侧由四块组成：可替换的记录存储（db）、点位库硬件绑定
//! 操作（catalog）、把状态机与存储组合起来的业务操作（workflow）、
//! 文字报告渲染（report）。领域类型与状态机本体在 mine-patrol-common。

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod report;
pub mod workflow;

pub use error::{PatrolError, Result};
