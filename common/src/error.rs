//! 校验错误类型定义

use thiserror::Error;

/// 状态机与输入校验错误
///
/// 所有校验在写入之前同步完成：被拒绝即表示没有任何状态被修改。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("巡检地点不能为空")]
    EmptyLocation,

    #[error("整改说明不能为空")]
    EmptyRemark,

    #[error("该提交流程要求签名确认，请先完成签名")]
    MissingSignature,

    #[error("当前状态「{status}」不允许执行: {action}")]
    InvalidTransition { status: String, action: String },
}

/// Result型别名
pub type Result<T> = std::result::Result<T, ValidationError>;
