//! 领域数据模型
//!
//! CLI与Web前端共享的类型：
//! - InspectionRecord: 一次巡检记录（含检查项与整改日志）
//! - 点位档案 LocationDef 见 location 模块
//! - 字段命名与前端 JSON 保持 camelCase 一致

use serde::{Deserialize, Serialize};

/// 巡检记录整体状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionStatus {
    /// 一切正常
    #[default]
    Normal,
    /// 发现隐患，等待整改
    Abnormal,
    /// 持续整改中
    Rectifying,
    /// 复查闭环，流程终结
    Reviewed,
}

impl InspectionStatus {
    /// 展示用状态文案
    pub fn label(&self) -> &'static str {
        match self {
            InspectionStatus::Normal => "正常",
            InspectionStatus::Abnormal => "异常",
            InspectionStatus::Rectifying => "待整改",
            InspectionStatus::Reviewed => "已复查",
        }
    }

    /// 终态：不再有任何出边迁移
    pub fn is_terminal(&self) -> bool {
        matches!(self, InspectionStatus::Normal | InspectionStatus::Reviewed)
    }
}

impl std::str::FromStr for InspectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" | "正常" => Ok(InspectionStatus::Normal),
            "ABNORMAL" | "异常" => Ok(InspectionStatus::Abnormal),
            "RECTIFYING" | "待整改" => Ok(InspectionStatus::Rectifying),
            "REVIEWED" | "已复查" => Ok(InspectionStatus::Reviewed),
            _ => Err(format!("未知状态: {}", s)),
        }
    }
}

/// 班次
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftType {
    #[default]
    #[serde(rename = "早班")]
    Morning,
    #[serde(rename = "中班")]
    Afternoon,
    #[serde(rename = "夜班")]
    Night,
}

impl ShiftType {
    pub fn label(&self) -> &'static str {
        match self {
            ShiftType::Morning => "早班",
            ShiftType::Afternoon => "中班",
            ShiftType::Night => "夜班",
        }
    }
}

impl std::str::FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "早班" | "morning" => Ok(ShiftType::Morning),
            "中班" | "afternoon" => Ok(ShiftType::Afternoon),
            "夜班" | "night" => Ok(ShiftType::Night),
            _ => Err(format!("未知班次: {}。可选: 早班/中班/夜班", s)),
        }
    }
}

/// 异常类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbnormalType {
    #[serde(rename = "安全隐患")]
    Safety,
    #[serde(rename = "设备缺陷")]
    Equipment,
    #[serde(rename = "管理问题")]
    Management,
    #[serde(rename = "其他")]
    Other,
}

/// 异常等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbnormalLevel {
    #[serde(rename = "一般")]
    General,
    #[serde(rename = "较大")]
    Large,
    #[serde(rename = "重大")]
    Critical,
}

/// 单项检查结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemResult {
    #[default]
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "ABNORMAL")]
    Abnormal,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ItemResult {
    pub fn label(&self) -> &'static str {
        match self {
            ItemResult::Normal => "正常",
            ItemResult::Abnormal => "异常",
            ItemResult::NotApplicable => "不适用",
        }
    }
}

/// 复查结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewResult {
    Pass,
    Fail,
}

impl ReviewResult {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewResult::Pass => "通过",
            ReviewResult::Fail => "未通过",
        }
    }
}

/// 一条整改提交记录
///
/// 只追加，不修改：已提交的整改说明与时间戳永不变更。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectifyLog {
    /// 提交时间（epoch 毫秒）
    pub timestamp: i64,
    pub remark: String,
    /// 现场照片（base64 或 URI，引擎不解析内容）
    pub photos: Vec<String>,
}

/// 记录内的一条检查项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionItem {
    pub id: String,
    pub name: String,
    pub result: ItemResult,
    pub abnormal_type: Option<AbnormalType>,
    pub abnormal_level: Option<AbnormalLevel>,
    pub remark: Option<String>,
    pub photos: Vec<String>,
}

/// 一次巡检记录
///
/// 地点信息在创建时快照到记录上（location/locationCode），
/// 后续点位库的修改不会回写历史记录。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionRecord {
    /// 创建时分配，之后不变（epoch 毫秒字符串）
    pub id: String,
    pub location: String,
    pub location_code: Option<String>,
    pub team: String,
    pub shift: ShiftType,
    pub inspector: String,
    /// 创建时间（epoch 毫秒），创建后不变，亦是时间筛选的依据
    pub timestamp: i64,
    pub template_name: Option<String>,
    pub overall_status: InspectionStatus,
    pub remark: Option<String>,
    pub items: Vec<InspectionItem>,
    pub rectify_logs: Vec<RectifyLog>,
    pub review_result: Option<ReviewResult>,
    /// 巡检员签名图像（base64，由签名板组件产生）
    pub signature: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// 登录用户（仅进程内会话，不持久化）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub username: String,
    pub team: String,
    pub role: String,
}

/// 巡检模板
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub category: String,
    pub items: Vec<String>,
}
