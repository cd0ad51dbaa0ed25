//! 文字版巡检报告
//!
//! 把单条记录渲染成纯文本报告（对应前端的报告预览），供终端
//! 展示。不生成 Word/PDF 等实际文档。

use chrono::{Local, TimeZone};
use mine_patrol_common::{InspectionRecord, InspectionStatus};

/// epoch 毫秒格式化为本地时间文案
pub fn format_ms(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).earliest() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => format!("#{}", ms),
    }
}

/// 渲染完整报告文本
pub fn render(record: &InspectionRecord) -> String {
    let mut out = String::new();
    let push = |out: &mut String, line: &str| {
        out.push_str(line);
        out.push('\n');
    };

    push(&mut out, "====== 巡检报告 ======");
    push(&mut out, &format!("地点: {}", record.location));
    push(
        &mut out,
        &format!(
            "编码: {}",
            record.location_code.as_deref().unwrap_or("NO_CODE")
        ),
    );
    push(
        &mut out,
        &format!("时间: {}", format_ms(record.timestamp)),
    );
    push(
        &mut out,
        &format!(
            "班组: {} / {} / {}",
            record.team,
            record.shift.label(),
            record.inspector
        ),
    );
    if let Some(name) = &record.template_name {
        push(&mut out, &format!("模板: {}", name));
    }
    push(
        &mut out,
        &format!("状态: {}", record.overall_status.label()),
    );
    if let Some(remark) = record.remark.as_deref().filter(|r| !r.trim().is_empty()) {
        push(&mut out, &format!("备注: {}", remark));
    }

    push(&mut out, "");
    push(
        &mut out,
        &format!("—— 检查细项 ({}) ——", record.items.len()),
    );
    for (index, item) in record.items.iter().enumerate() {
        push(
            &mut out,
            &format!("{}. {} [{}]", index + 1, item.name, item.result.label()),
        );
        if let Some(remark) = item.remark.as_deref().filter(|r| !r.trim().is_empty()) {
            push(&mut out, &format!("   备注: {}", remark));
        }
        if !item.photos.is_empty() {
            push(&mut out, &format!("   照片: {} 张", item.photos.len()));
        }
    }

    if !record.rectify_logs.is_empty() || record.overall_status != InspectionStatus::Normal {
        push(&mut out, "");
        push(&mut out, "—— 全周期整改记录 ——");
        if record.overall_status != InspectionStatus::Normal {
            push(
                &mut out,
                &format!("[{}] 异常发现，等待整改响应", format_ms(record.timestamp)),
            );
        }
        for (index, log) in record.rectify_logs.iter().enumerate() {
            push(
                &mut out,
                &format!(
                    "[{}] 整改提交 #{}: {}",
                    format_ms(log.timestamp),
                    index + 1,
                    log.remark
                ),
            );
            if !log.photos.is_empty() {
                push(&mut out, &format!("   照片: {} 张", log.photos.len()));
            }
        }
        if record.overall_status == InspectionStatus::Reviewed {
            let verdict = record
                .review_result
                .map(|r| r.label())
                .unwrap_or("通过");
            push(
                &mut out,
                &format!("流程终结：复查{}，任务已闭环", verdict),
            );
        }
    }

    if record.signature.is_some() {
        push(&mut out, "");
        push(&mut out, "巡检员已签名确认。");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mine_patrol_common::{
        confirm_review, create_inspection, submit_rectification, CreatePolicy, InspectionDraft,
        ItemResult, ShiftType, User,
    };

    fn sample_record() -> mine_patrol_common::InspectionRecord {
        let user = User {
            username: "张三".to_string(),
            team: "采煤一队".to_string(),
            role: "巡检员".to_string(),
        };
        let draft =
            InspectionDraft::quick("主斜井皮带机房", ShiftType::Morning, ItemResult::Abnormal);
        let mut record =
            create_inspection(draft, &user, CreatePolicy::default(), 1700000000000).unwrap();
        submit_rectification(&mut record, "已重新紧固螺丝", Vec::new(), 1700000300000).unwrap();
        confirm_review(&mut record, true).unwrap();
        record
    }

    #[test]
    fn test_render_contains_key_sections() {
        let text = render(&sample_record());

        assert!(text.contains("主斜井皮带机房"));
        assert!(text.contains("状态: 已复查"));
        assert!(text.contains("整改提交 #1: 已重新紧固螺丝"));
        assert!(text.contains("复查通过"));
    }

    #[test]
    fn test_render_normal_record_has_no_timeline() {
        let user = User {
            username: "张三".to_string(),
            team: "采煤一队".to_string(),
            role: "巡检员".to_string(),
        };
        let draft = InspectionDraft::quick("中央泵房", ShiftType::Night, ItemResult::Normal);
        let record = create_inspection(draft, &user, CreatePolicy::default(), 1).unwrap();

        let text = render(&record);
        assert!(!text.contains("全周期整改记录"));
    }
}
