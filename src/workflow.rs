//! 面向存储的巡检业务操作
//!
//! 生命周期引擎（common::lifecycle）是纯函数；这里把它与显式传入的
//! 存储实例组合成“读取—迁移—写回”的完整操作。存储实例永远由调用方
//! 传入，没有进程级单例。

use crate::db::PatrolDb;
use crate::error::{PatrolError, Result};
use chrono::Local;
use mine_patrol_common::{
    lifecycle, CreatePolicy, InspectionDraft, InspectionRecord, RecordFilter, Stats,
};

fn load_record(db: &dyn PatrolDb, id: &str) -> Result<InspectionRecord> {
    db.list_inspections()
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| PatrolError::RecordNotFound(id.to_string()))
}

/// 创建并保存一条巡检记录
///
/// 草稿未手工填写点位编码时，对照点位库做一次名称匹配，把编码
/// 快照到记录上（只是快照，之后点位库变更不回写）。
pub fn create_inspection(
    db: &mut dyn PatrolDb,
    mut draft: InspectionDraft,
    policy: CreatePolicy,
    now_ms: i64,
) -> Result<InspectionRecord> {
    let user = db.current_user().ok_or(PatrolError::NotLoggedIn)?;

    if draft.location_code.is_none() {
        draft.location_code = db
            .list_locations()
            .into_iter()
            .find(|l| l.name == draft.location.trim())
            .map(|l| l.code);
    }

    let record = lifecycle::create_inspection(draft, &user, policy, now_ms)?;
    db.save_inspection(record.clone());
    log::info!(
        "新建巡检记录 {} ({} / {})",
        record.id,
        record.location,
        record.overall_status.label()
    );
    Ok(record)
}

/// 对指定记录提交一次整改
pub fn add_rectification(
    db: &mut dyn PatrolDb,
    id: &str,
    remark: &str,
    photos: Vec<String>,
    now_ms: i64,
) -> Result<InspectionRecord> {
    let mut record = load_record(db, id)?;
    lifecycle::submit_rectification(&mut record, remark, photos, now_ms)?;
    db.save_inspection(record.clone());
    Ok(record)
}

/// 对指定记录执行复查闭环
pub fn finish_review(db: &mut dyn PatrolDb, id: &str, pass: bool) -> Result<InspectionRecord> {
    let mut record = load_record(db, id)?;
    lifecycle::confirm_review(&mut record, pass)?;
    db.save_inspection(record.clone());
    log::info!("巡检记录 {} 已复查闭环", record.id);
    Ok(record)
}

/// 查询单条记录
pub fn get_inspection(db: &dyn PatrolDb, id: &str) -> Result<InspectionRecord> {
    load_record(db, id)
}

/// 汇总统计（每次调用基于当前全量记录重新计算）
pub fn stats(db: &dyn PatrolDb) -> Stats {
    let records = db.list_inspections();
    Stats::collect(records.iter())
}

/// 按筛选条件列出记录，保持存储顺序
pub fn list_filtered(db: &dyn PatrolDb, filter: &RecordFilter) -> Vec<InspectionRecord> {
    let now = Local::now();
    db.list_inspections()
        .into_iter()
        .filter(|r| filter.matches(r, now))
        .collect()
}
