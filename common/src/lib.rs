//! Mine Patrol Common Library
//!
//! CLI与Web前端共享的领域类型与核心逻辑

pub mod types;
pub mod error;
pub mod lifecycle;
pub mod location;
pub mod query;
pub mod templates;

pub use types::{
    AbnormalLevel, AbnormalType, InspectionItem, InspectionRecord, InspectionStatus, ItemResult,
    RectifyLog, ReviewResult, ShiftType, Template, User,
};
pub use error::{Result, ValidationError};
pub use lifecycle::{
    confirm_review, create_inspection, derive_overall_status, submit_rectification, CreatePolicy,
    InspectionDraft, Stats, Submission, ON_SITE_FIX_PREFIX,
};
pub use location::LocationDef;
pub use query::{RecordFilter, TimeFilter};
pub use templates::{builtin_templates, find_template, AREAS, DEFAULT_AREA, TEAMS};
