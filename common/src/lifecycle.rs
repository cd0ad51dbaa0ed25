//! 巡检生命周期状态机
//!
//! 记录在 NORMAL / ABNORMAL / RECTIFYING / REVIEWED 四个状态间的
//! 全部合法迁移都集中在本模块：创建、提交整改、复查闭环。
//! 校验失败时同步返回错误，不产生任何副作用；NORMAL 与 REVIEWED
//! 为终态，之后任何状态变更操作都会被拒绝。

use crate::error::{Result, ValidationError};
use crate::types::{
    InspectionItem, InspectionRecord, InspectionStatus, ItemResult, RectifyLog, ReviewResult,
    ShiftType, User,
};

/// 现场立即整改日志的说明前缀，用于和事后整改区分
pub const ON_SITE_FIX_PREFIX: &str = "【现场立即整改】";

/// 快速模式下唯一检查项的名称
pub const QUICK_ITEM_NAME: &str = "全项检查";

/// 创建方式：快速结论或模板检查单
#[derive(Debug, Clone)]
pub enum Submission {
    /// 快速模式：只给出整体结论
    Quick { conclusion: ItemResult },
    /// 高级模板模式：逐项检查
    Template {
        template_name: String,
        items: Vec<InspectionItem>,
    },
}

/// 创建巡检记录的输入
#[derive(Debug, Clone)]
pub struct InspectionDraft {
    pub location: String,
    /// 点位编码；允许手工填写，不要求点位库中存在
    pub location_code: Option<String>,
    pub shift: ShiftType,
    pub remark: Option<String>,
    pub submission: Submission,
    /// 发现的异常已在现场当场处理完毕
    pub on_site_fixed: bool,
    /// 现场处理情况说明（on_site_fixed 时必填）
    pub on_site_remark: Option<String>,
    /// 签名图像数据（base64）
    pub signature: Option<String>,
}

impl InspectionDraft {
    /// 快速模式草稿
    pub fn quick(location: impl Into<String>, shift: ShiftType, conclusion: ItemResult) -> Self {
        Self {
            location: location.into(),
            location_code: None,
            shift,
            remark: None,
            submission: Submission::Quick { conclusion },
            on_site_fixed: false,
            on_site_remark: None,
            signature: None,
        }
    }

    /// 模板模式草稿
    pub fn from_template(
        location: impl Into<String>,
        shift: ShiftType,
        template_name: impl Into<String>,
        items: Vec<InspectionItem>,
    ) -> Self {
        Self {
            location: location.into(),
            location_code: None,
            shift,
            remark: None,
            submission: Submission::Template {
                template_name: template_name.into(),
                items,
            },
            on_site_fixed: false,
            on_site_remark: None,
            signature: None,
        }
    }
}

/// 创建策略，由调用方配置而非硬编码在某个流程里
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatePolicy {
    /// 提交时必须携带签名
    pub require_signature: bool,
}

/// 汇总统计（派生值，每次调用重新计算，不缓存）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub abnormal: usize,
    pub rectifying: usize,
}

impl Stats {
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a InspectionRecord>) -> Self {
        let mut stats = Stats::default();
        for record in records {
            stats.total += 1;
            match record.overall_status {
                InspectionStatus::Abnormal => stats.abnormal += 1,
                InspectionStatus::Rectifying => stats.rectifying += 1,
                _ => {}
            }
        }
        stats
    }
}

/// 由检查项推导整体状态。
///
/// 任何一项异常即整体异常（“异常粘性”）：逐项勾选会把整体结论
/// 拉到 ABNORMAL，但把项改回正常不会自动回落。
pub fn derive_overall_status(
    items: &[InspectionItem],
    declared: InspectionStatus,
) -> InspectionStatus {
    if items.iter().any(|item| item.result == ItemResult::Abnormal) {
        InspectionStatus::Abnormal
    } else {
        declared
    }
}

/// 创建一条巡检记录
///
/// - 地点为空 → 拒绝
/// - 策略要求签名而草稿没有 → 拒绝
/// - 任一检查项异常 → 整体状态强制 ABNORMAL
/// - 异常且声明“现场已处理” → 直接生成 REVIEWED 记录，附带一条
///   前缀标记的合成整改日志，不经过 ABNORMAL / RECTIFYING
pub fn create_inspection(
    draft: InspectionDraft,
    user: &User,
    policy: CreatePolicy,
    now_ms: i64,
) -> Result<InspectionRecord> {
    let location = draft.location.trim();
    if location.is_empty() {
        return Err(ValidationError::EmptyLocation);
    }

    if policy.require_signature {
        let signed = draft
            .signature
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        if !signed {
            return Err(ValidationError::MissingSignature);
        }
    }

    let (template_name, items, declared) = match draft.submission {
        Submission::Quick { conclusion } => {
            let declared = match conclusion {
                ItemResult::Abnormal => InspectionStatus::Abnormal,
                _ => InspectionStatus::Normal,
            };
            let item = InspectionItem {
                id: "q1".to_string(),
                name: QUICK_ITEM_NAME.to_string(),
                result: conclusion,
                ..Default::default()
            };
            (None, vec![item], declared)
        }
        Submission::Template {
            template_name,
            items,
        } => {
            // 模板模式的整体结论完全由检查项推导
            let items = items
                .into_iter()
                .enumerate()
                .map(|(idx, mut item)| {
                    if item.id.is_empty() {
                        item.id = format!("i{}", idx + 1);
                    }
                    item
                })
                .collect();
            (Some(template_name), items, InspectionStatus::Normal)
        }
    };

    let mut overall_status = derive_overall_status(&items, declared);
    let mut rectify_logs = Vec::new();
    let mut review_result = None;

    // 现场立即整改：跳过 ABNORMAL/RECTIFYING，记录直接闭环
    if draft.on_site_fixed && overall_status == InspectionStatus::Abnormal {
        let fix_remark = draft.on_site_remark.as_deref().unwrap_or("").trim();
        if fix_remark.is_empty() {
            return Err(ValidationError::EmptyRemark);
        }
        rectify_logs.push(RectifyLog {
            timestamp: now_ms,
            remark: format!("{}{}", ON_SITE_FIX_PREFIX, fix_remark),
            photos: Vec::new(),
        });
        overall_status = InspectionStatus::Reviewed;
        review_result = Some(ReviewResult::Pass);
    }

    Ok(InspectionRecord {
        id: now_ms.to_string(),
        location: location.to_string(),
        location_code: draft.location_code,
        team: user.team.clone(),
        shift: draft.shift,
        inspector: user.username.clone(),
        timestamp: now_ms,
        template_name,
        overall_status,
        remark: draft.remark,
        items,
        rectify_logs,
        review_result,
        signature: draft.signature,
        latitude: None,
        longitude: None,
    })
}

/// 提交一次整改
///
/// 仅允许 ABNORMAL（首次整改）或 RECTIFYING（追加进展）状态；
/// 说明为空时拒绝，日志只追加不修改。
pub fn submit_rectification(
    record: &mut InspectionRecord,
    remark: &str,
    photos: Vec<String>,
    now_ms: i64,
) -> Result<()> {
    match record.overall_status {
        InspectionStatus::Abnormal | InspectionStatus::Rectifying => {}
        status => {
            return Err(ValidationError::InvalidTransition {
                status: status.label().to_string(),
                action: "提交整改".to_string(),
            });
        }
    }

    let remark = remark.trim();
    if remark.is_empty() {
        return Err(ValidationError::EmptyRemark);
    }

    record.rectify_logs.push(RectifyLog {
        timestamp: now_ms,
        remark: remark.to_string(),
        photos,
    });
    record.overall_status = InspectionStatus::Rectifying;
    Ok(())
}

/// 复查闭环
///
/// 仅允许 RECTIFYING 状态；写入复查结论并进入终态 REVIEWED，
/// 不追加整改日志。
pub fn confirm_review(record: &mut InspectionRecord, pass: bool) -> Result<()> {
    if record.overall_status != InspectionStatus::Rectifying {
        return Err(ValidationError::InvalidTransition {
            status: record.overall_status.label().to_string(),
            action: "复查闭环".to_string(),
        });
    }

    record.review_result = Some(if pass {
        ReviewResult::Pass
    } else {
        ReviewResult::Fail
    });
    record.overall_status = InspectionStatus::Reviewed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            username: "张三".to_string(),
            team: "采煤一队".to_string(),
            role: "巡检员".to_string(),
        }
    }

    fn abnormal_item(name: &str) -> InspectionItem {
        InspectionItem {
            name: name.to_string(),
            result: ItemResult::Abnormal,
            remark: Some("温度偏高，需注油".to_string()),
            ..Default::default()
        }
    }

    fn normal_item(name: &str) -> InspectionItem {
        InspectionItem {
            name: name.to_string(),
            result: ItemResult::Normal,
            ..Default::default()
        }
    }

    #[test]
    fn test_create_quick_normal() {
        let draft = InspectionDraft::quick("1201综采工作面", ShiftType::Morning, ItemResult::Normal);
        let record =
            create_inspection(draft, &test_user(), CreatePolicy::default(), 1700000000000)
                .expect("创建失败");

        assert_eq!(record.overall_status, InspectionStatus::Normal);
        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].name, QUICK_ITEM_NAME);
        assert!(record.rectify_logs.is_empty());
        assert_eq!(record.id, "1700000000000");
        assert_eq!(record.team, "采煤一队");
    }

    #[test]
    fn test_create_with_abnormal_item() {
        let draft = InspectionDraft::from_template(
            "主斜井皮带机房",
            ShiftType::Morning,
            "采煤工作面日常巡检",
            vec![abnormal_item("电机温度")],
        );
        let record =
            create_inspection(draft, &test_user(), CreatePolicy::default(), 1700000000000)
                .expect("创建失败");

        assert_eq!(record.overall_status, InspectionStatus::Abnormal);
        assert!(record.rectify_logs.is_empty());
        assert_eq!(record.template_name.as_deref(), Some("采煤工作面日常巡检"));
    }

    #[test]
    fn test_sticky_abnormal_overrides_declared() {
        // 模板中混有异常项时，整体状态不可能是 NORMAL
        let items = vec![normal_item("支架压力"), abnormal_item("刮板机运转")];
        assert_eq!(
            derive_overall_status(&items, InspectionStatus::Normal),
            InspectionStatus::Abnormal
        );

        // 反向不自动回落：全部正常时保持声明值
        let items = vec![normal_item("支架压力")];
        assert_eq!(
            derive_overall_status(&items, InspectionStatus::Abnormal),
            InspectionStatus::Abnormal
        );
    }

    #[test]
    fn test_create_rejects_empty_location() {
        let draft = InspectionDraft::quick("   ", ShiftType::Morning, ItemResult::Normal);
        let result = create_inspection(draft, &test_user(), CreatePolicy::default(), 1);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyLocation);
    }

    #[test]
    fn test_create_requires_signature_by_policy() {
        let policy = CreatePolicy {
            require_signature: true,
        };

        let draft = InspectionDraft::quick("中央泵房", ShiftType::Night, ItemResult::Normal);
        let result = create_inspection(draft, &test_user(), policy, 1);
        assert_eq!(result.unwrap_err(), ValidationError::MissingSignature);

        let mut draft = InspectionDraft::quick("中央泵房", ShiftType::Night, ItemResult::Normal);
        draft.signature = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        let record = create_inspection(draft, &test_user(), policy, 1).expect("带签名应能创建");
        assert!(record.signature.is_some());
    }

    #[test]
    fn test_on_site_fix_creates_reviewed_record() {
        let mut draft =
            InspectionDraft::quick("主斜井皮带机房", ShiftType::Morning, ItemResult::Abnormal);
        draft.on_site_fixed = true;
        draft.on_site_remark = Some("发现隐患并当场处理完毕".to_string());

        let record =
            create_inspection(draft, &test_user(), CreatePolicy::default(), 1700000000000)
                .expect("创建失败");

        // 不经过 ABNORMAL / RECTIFYING，直接闭环
        assert_eq!(record.overall_status, InspectionStatus::Reviewed);
        assert_eq!(record.review_result, Some(ReviewResult::Pass));
        assert_eq!(record.rectify_logs.len(), 1);
        assert!(record.rectify_logs[0].remark.starts_with(ON_SITE_FIX_PREFIX));
        assert!(record.rectify_logs[0].remark.contains("发现隐患并当场处理完毕"));
    }

    #[test]
    fn test_on_site_fix_requires_remark() {
        let mut draft =
            InspectionDraft::quick("主斜井皮带机房", ShiftType::Morning, ItemResult::Abnormal);
        draft.on_site_fixed = true;
        draft.on_site_remark = Some("   ".to_string());

        let result = create_inspection(draft, &test_user(), CreatePolicy::default(), 1);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyRemark);
    }

    #[test]
    fn test_on_site_fix_ignored_when_normal() {
        // 结论正常时“现场已处理”标记没有意义，按普通正常记录处理
        let mut draft = InspectionDraft::quick("中央泵房", ShiftType::Morning, ItemResult::Normal);
        draft.on_site_fixed = true;

        let record = create_inspection(draft, &test_user(), CreatePolicy::default(), 1)
            .expect("创建失败");
        assert_eq!(record.overall_status, InspectionStatus::Normal);
        assert!(record.rectify_logs.is_empty());
    }

    #[test]
    fn test_rectification_flow() {
        let draft = InspectionDraft::quick("主斜井皮带机房", ShiftType::Morning, ItemResult::Abnormal);
        let mut record =
            create_inspection(draft, &test_user(), CreatePolicy::default(), 1700000000000)
                .expect("创建失败");
        assert_eq!(record.overall_status, InspectionStatus::Abnormal);

        // 首次整改: ABNORMAL -> RECTIFYING
        submit_rectification(&mut record, "已重新紧固螺丝", Vec::new(), 1700000300000)
            .expect("首次整改失败");
        assert_eq!(record.overall_status, InspectionStatus::Rectifying);
        assert_eq!(record.rectify_logs.len(), 1);

        // 追加进展: 状态不变，日志追加
        submit_rectification(&mut record, "更换了备用托辊", Vec::new(), 1700000600000)
            .expect("追加整改失败");
        assert_eq!(record.overall_status, InspectionStatus::Rectifying);
        assert_eq!(record.rectify_logs.len(), 2);

        // 先前的日志内容不被触碰
        assert_eq!(record.rectify_logs[0].remark, "已重新紧固螺丝");
        assert_eq!(record.rectify_logs[0].timestamp, 1700000300000);

        // 复查闭环: RECTIFYING -> REVIEWED，不追加日志
        confirm_review(&mut record, true).expect("复查失败");
        assert_eq!(record.overall_status, InspectionStatus::Reviewed);
        assert_eq!(record.review_result, Some(ReviewResult::Pass));
        assert_eq!(record.rectify_logs.len(), 2);
    }

    #[test]
    fn test_rectification_rejects_blank_remark() {
        let draft = InspectionDraft::quick("主斜井皮带机房", ShiftType::Morning, ItemResult::Abnormal);
        let mut record = create_inspection(draft, &test_user(), CreatePolicy::default(), 1)
            .expect("创建失败");

        let result = submit_rectification(&mut record, "  \t ", Vec::new(), 2);
        assert_eq!(result.unwrap_err(), ValidationError::EmptyRemark);

        // 拒绝即无副作用
        assert_eq!(record.overall_status, InspectionStatus::Abnormal);
        assert!(record.rectify_logs.is_empty());
    }

    #[test]
    fn test_reviewed_is_terminal() {
        let draft = InspectionDraft::quick("主斜井皮带机房", ShiftType::Morning, ItemResult::Abnormal);
        let mut record = create_inspection(draft, &test_user(), CreatePolicy::default(), 1)
            .expect("创建失败");
        submit_rectification(&mut record, "已处理", Vec::new(), 2).expect("整改失败");
        confirm_review(&mut record, false).expect("复查失败");
        assert_eq!(record.review_result, Some(ReviewResult::Fail));

        let snapshot = record.clone();
        assert!(submit_rectification(&mut record, "再次整改", Vec::new(), 3).is_err());
        assert!(confirm_review(&mut record, true).is_err());
        assert_eq!(record, snapshot);
    }

    #[test]
    fn test_normal_is_terminal() {
        let draft = InspectionDraft::quick("1201综采工作面", ShiftType::Morning, ItemResult::Normal);
        let mut record = create_inspection(draft, &test_user(), CreatePolicy::default(), 1)
            .expect("创建失败");

        assert!(submit_rectification(&mut record, "无中生有的整改", Vec::new(), 2).is_err());
        assert!(confirm_review(&mut record, true).is_err());
        assert_eq!(record.overall_status, InspectionStatus::Normal);
    }

    #[test]
    fn test_review_not_allowed_before_rectifying() {
        let draft = InspectionDraft::quick("主斜井皮带机房", ShiftType::Morning, ItemResult::Abnormal);
        let mut record = create_inspection(draft, &test_user(), CreatePolicy::default(), 1)
            .expect("创建失败");

        // ABNORMAL 状态下还没有整改，不能直接复查
        assert!(confirm_review(&mut record, true).is_err());
        assert_eq!(record.overall_status, InspectionStatus::Abnormal);
    }

    #[test]
    fn test_template_items_get_sequential_ids() {
        let draft = InspectionDraft::from_template(
            "配电室",
            ShiftType::Afternoon,
            "配电室机电安全巡检",
            vec![normal_item("电缆绝缘状态"), normal_item("开关柜指示灯")],
        );
        let record = create_inspection(draft, &test_user(), CreatePolicy::default(), 1)
            .expect("创建失败");

        assert_eq!(record.items[0].id, "i1");
        assert_eq!(record.items[1].id, "i2");
    }

    #[test]
    fn test_stats_collect() {
        let user = test_user();
        let make = |conclusion, at| {
            create_inspection(
                InspectionDraft::quick("某地点", ShiftType::Morning, conclusion),
                &user,
                CreatePolicy::default(),
                at,
            )
            .expect("创建失败")
        };

        let mut records = vec![
            make(ItemResult::Normal, 1),
            make(ItemResult::Abnormal, 2),
            make(ItemResult::Abnormal, 3),
        ];
        submit_rectification(&mut records[2], "处理中", Vec::new(), 4).expect("整改失败");

        let stats = Stats::collect(records.iter());
        assert_eq!(
            stats,
            Stats {
                total: 3,
                abnormal: 1,
                rectifying: 1
            }
        );
    }
}
