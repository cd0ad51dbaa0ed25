//! 点位库与硬件绑定操作
//!
//! 绑定/解绑走这里（以及 LocationDef 自身的方法），是绑定字段唯一的
//! 写入途径。批量操作尽力而为、无事务：逐个执行并返回成功/失败计数。
//! 同一 NFC 标签或外部资产码同时只允许绑定到一个点位。

use crate::db::PatrolDb;
use crate::error::{PatrolError, Result};
use mine_patrol_common::{LocationDef, DEFAULT_AREA};

/// 硬件类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hardware {
    Nfc,
    Qr,
}

impl Hardware {
    pub fn label(&self) -> &'static str {
        match self {
            Hardware::Nfc => "NFC",
            Hardware::Qr => "二维码",
        }
    }
}

impl std::str::FromStr for Hardware {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nfc" => Ok(Hardware::Nfc),
            "qr" | "二维码" => Ok(Hardware::Qr),
            _ => Err(format!("未知硬件类别: {}。可选: nfc/qr", s)),
        }
    }
}

/// 批量操作的汇总结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// 新增或编辑点位档案
///
/// 名称与编码必填；区域留空时归入默认分类；id 留空时按时间生成。
pub fn upsert_location(
    db: &mut dyn PatrolDb,
    mut location: LocationDef,
    now_ms: i64,
) -> Result<LocationDef> {
    if location.name.trim().is_empty() || location.code.trim().is_empty() {
        return Err(PatrolError::IncompleteLocation(
            "名称与编码不能为空".to_string(),
        ));
    }
    location.name = location.name.trim().to_string();
    location.code = location.code.trim().to_string();
    if location.area.trim().is_empty() {
        location.area = DEFAULT_AREA.to_string();
    }
    if location.id.is_empty() {
        location.id = format!("loc-{}", now_ms);
    }

    db.save_location(location.clone());
    Ok(location)
}

fn find_location(db: &dyn PatrolDb, id: &str) -> Result<LocationDef> {
    db.list_locations()
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| PatrolError::LocationNotFound(id.to_string()))
}

/// 标签唯一性检查：同一标签不允许同时指向两个点位
fn ensure_tag_free(db: &dyn PatrolDb, hardware: Hardware, tag: &str, self_id: &str) -> Result<()> {
    let holder = db.list_locations().into_iter().find(|l| {
        l.id != self_id
            && match hardware {
                Hardware::Nfc => l.nfc_tag_id() == Some(tag),
                Hardware::Qr => l.qr_tag_id() == Some(tag),
            }
    });

    match holder {
        Some(other) => Err(PatrolError::TagAlreadyBound {
            tag: tag.to_string(),
            location: other.name,
        }),
        None => Ok(()),
    }
}

/// 绑定（或更换）NFC 标签
pub fn bind_nfc(
    db: &mut dyn PatrolDb,
    location_id: &str,
    tag_id: &str,
    now_ms: i64,
) -> Result<LocationDef> {
    ensure_tag_free(db, Hardware::Nfc, tag_id, location_id)?;
    let mut location = find_location(db, location_id)?;
    location.bind_nfc(tag_id, now_ms);
    db.save_location(location.clone());
    Ok(location)
}

/// 解除 NFC 绑定（对未绑定的点位是幂等操作）
pub fn unbind_nfc(db: &mut dyn PatrolDb, location_id: &str) -> Result<LocationDef> {
    let mut location = find_location(db, location_id)?;
    location.unbind_nfc();
    db.save_location(location.clone());
    Ok(location)
}

/// 绑定外部资产二维码
pub fn bind_external_qr(
    db: &mut dyn PatrolDb,
    location_id: &str,
    asset_code: &str,
    now_ms: i64,
) -> Result<LocationDef> {
    ensure_tag_free(db, Hardware::Qr, asset_code, location_id)?;
    let mut location = find_location(db, location_id)?;
    location.bind_external_qr(asset_code, now_ms);
    db.save_location(location.clone());
    Ok(location)
}

/// 解除外部资产二维码绑定
pub fn unbind_external_qr(db: &mut dyn PatrolDb, location_id: &str) -> Result<LocationDef> {
    let mut location = find_location(db, location_id)?;
    location.unbind_external_qr();
    db.save_location(location.clone());
    Ok(location)
}

/// 批量绑定：为每个点位生成批次标签号（BATCH_NFC_<时间戳>_<序号>）
pub fn batch_bind(
    db: &mut dyn PatrolDb,
    hardware: Hardware,
    ids: &[String],
    now_ms: i64,
) -> BatchReport {
    let mut report = BatchReport::default();
    for (index, id) in ids.iter().enumerate() {
        let prefix = match hardware {
            Hardware::Nfc => "BATCH_NFC",
            Hardware::Qr => "BATCH_QR",
        };
        let tag = format!("{}_{}_{}", prefix, now_ms, index + 1);
        let outcome = match hardware {
            Hardware::Nfc => bind_nfc(db, id, &tag, now_ms),
            Hardware::Qr => bind_external_qr(db, id, &tag, now_ms),
        };
        match outcome {
            Ok(_) => report.succeeded += 1,
            Err(e) => {
                log::warn!("批量绑定失败 ({}): {}", id, e);
                report.failed += 1;
            }
        }
    }
    report
}

/// 批量解绑
pub fn batch_unbind(db: &mut dyn PatrolDb, hardware: Hardware, ids: &[String]) -> BatchReport {
    let mut report = BatchReport::default();
    for id in ids {
        let outcome = match hardware {
            Hardware::Nfc => unbind_nfc(db, id),
            Hardware::Qr => unbind_external_qr(db, id),
        };
        match outcome {
            Ok(_) => report.succeeded += 1,
            Err(e) => {
                log::warn!("批量解绑失败 ({}): {}", id, e);
                report.failed += 1;
            }
        }
    }
    report
}

/// 按关键字搜索点位（名称 / 编码 / 区域子串）
pub fn search_locations(db: &dyn PatrolDb, keyword: &str) -> Vec<LocationDef> {
    let keyword = keyword.trim();
    db.list_locations()
        .into_iter()
        .filter(|l| keyword.is_empty() || l.matches_keyword(keyword))
        .collect()
}

/// 生成点位库明细 CSV 文本
///
/// 仅生成内容字符串供展示/日志，不落盘（导出是模拟的）。
pub fn locations_csv(db: &dyn PatrolDb) -> String {
    let mut lines = vec!["ID,名称,编码,区域,NFC_UID,QR_资产ID".to_string()];
    for l in db.list_locations() {
        lines.push(format!(
            "{},{},{},{},{},{}",
            l.id,
            l.name,
            l.code,
            l.area,
            l.nfc_tag_id().unwrap_or(""),
            l.qr_tag_id().unwrap_or("")
        ));
    }
    lines.join("\n")
}
