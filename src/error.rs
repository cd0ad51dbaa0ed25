use mine_patrol_common::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatrolError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("巡检记录不存在: {0}")]
    RecordNotFound(String),

    #[error("点位不存在: {0}")]
    LocationNotFound(String),

    #[error("点位档案不完整: {0}")]
    IncompleteLocation(String),

    #[error("标签 {tag} 已绑定到点位「{location}」，请先解绑")]
    TagAlreadyBound { tag: String, location: String },

    #[error("模板不存在: {0}")]
    TemplateNotFound(String),

    #[error("尚未登录，无法提交记录")]
    NotLoggedIn,

    #[error("设置错误: {0}")]
    Config(String),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PatrolError>;
