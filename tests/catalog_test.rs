//! 点位库与硬件绑定的集成测试

use mine_patrol_common::LocationDef;
use mine_patrol_rust::catalog::{self, Hardware};
use mine_patrol_rust::db::{MemoryDb, PatrolDb};
use mine_patrol_rust::error::PatrolError;

const T0: i64 = 1700000000000;

fn db_with_locations() -> MemoryDb {
    let mut db = MemoryDb::new();
    db.save_location(LocationDef::new("l1", "主斜井皮带机房", "S-01-A", "运输线"));
    db.save_location(LocationDef::new("l2", "1201综采工作面", "W-12-C", "采煤区"));
    db.save_location(LocationDef::new("l3", "中央泵房", "P-03-B", "其他"));
    db
}

fn find(db: &MemoryDb, id: &str) -> LocationDef {
    db.list_locations()
        .into_iter()
        .find(|l| l.id == id)
        .expect("点位缺失")
}

fn binding_consistent(loc: &LocationDef) -> bool {
    loc.has_nfc() == loc.nfc_tag_id().is_some() && loc.has_qr() == loc.qr_tag_id().is_some()
}

#[test]
fn test_bind_replace_unbind_nfc() {
    let mut db = db_with_locations();

    let loc = catalog::bind_nfc(&mut db, "l1", "UID_100001", T0).expect("绑定失败");
    assert!(loc.has_nfc());
    assert_eq!(loc.nfc_bind_date(), Some(T0));
    assert!(binding_consistent(&loc));

    // 更换即覆盖，不保留旧标签
    let loc = catalog::bind_nfc(&mut db, "l1", "UID_100002", T0 + 1000).expect("更换失败");
    assert_eq!(loc.nfc_tag_id(), Some("UID_100002"));
    assert_eq!(loc.nfc_bind_date(), Some(T0 + 1000));

    let loc = catalog::unbind_nfc(&mut db, "l1").expect("解绑失败");
    assert!(!loc.has_nfc());
    assert_eq!(loc.nfc_tag_id(), None);
    assert_eq!(loc.nfc_bind_date(), None);
    assert!(binding_consistent(&find(&db, "l1")));
}

#[test]
fn test_nfc_tag_uniqueness() {
    let mut db = db_with_locations();
    catalog::bind_nfc(&mut db, "l1", "UID_SHARED", T0).expect("绑定失败");

    // 同一标签不能再指向另一个点位
    let result = catalog::bind_nfc(&mut db, "l2", "UID_SHARED", T0 + 1);
    assert!(matches!(result, Err(PatrolError::TagAlreadyBound { .. })));
    assert!(!find(&db, "l2").has_nfc());

    // 同一点位重复绑定同一标签则允许（等价于更换）
    catalog::bind_nfc(&mut db, "l1", "UID_SHARED", T0 + 2).expect("重复绑定自身应允许");

    // 解绑后标签可以被别的点位使用
    catalog::unbind_nfc(&mut db, "l1").expect("解绑失败");
    catalog::bind_nfc(&mut db, "l2", "UID_SHARED", T0 + 3).expect("解绑后应可重新绑定");
}

#[test]
fn test_qr_binding_symmetric() {
    let mut db = db_with_locations();

    let loc = catalog::bind_external_qr(&mut db, "l3", "ASSET-0042", T0).expect("绑定失败");
    assert!(loc.has_qr());
    assert!(!loc.has_nfc());

    let result = catalog::bind_external_qr(&mut db, "l1", "ASSET-0042", T0 + 1);
    assert!(matches!(result, Err(PatrolError::TagAlreadyBound { .. })));

    let loc = catalog::unbind_external_qr(&mut db, "l3").expect("解绑失败");
    assert!(binding_consistent(&loc));
}

#[test]
fn test_bind_missing_location() {
    let mut db = db_with_locations();
    let result = catalog::bind_nfc(&mut db, "l9", "UID_X", T0);
    assert!(matches!(result, Err(PatrolError::LocationNotFound(_))));
}

#[test]
fn test_batch_bind_reports_partial_failure() {
    let mut db = db_with_locations();

    let ids = vec!["l1".to_string(), "l9".to_string(), "l3".to_string()];
    let report = catalog::batch_bind(&mut db, Hardware::Nfc, &ids, T0);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);

    // 批次标签各不相同且满足一致性
    let l1 = find(&db, "l1");
    let l3 = find(&db, "l3");
    assert!(l1.nfc_tag_id().unwrap().starts_with("BATCH_NFC_"));
    assert_ne!(l1.nfc_tag_id(), l3.nfc_tag_id());
    assert!(binding_consistent(&l1) && binding_consistent(&l3));
}

#[test]
fn test_batch_unbind_is_best_effort() {
    let mut db = db_with_locations();
    catalog::bind_nfc(&mut db, "l1", "UID_1", T0).expect("绑定失败");

    let ids = vec!["l1".to_string(), "l2".to_string(), "l9".to_string()];
    let report = catalog::batch_unbind(&mut db, Hardware::Nfc, &ids);

    // 未绑定的点位解绑是幂等成功；不存在的点位计入失败
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert!(!find(&db, "l1").has_nfc());
}

#[test]
fn test_upsert_location_validation() {
    let mut db = MemoryDb::new();

    let result = catalog::upsert_location(&mut db, LocationDef::new("", " ", "X-1", "其他"), T0);
    assert!(matches!(result, Err(PatrolError::IncompleteLocation(_))));
    assert!(db.list_locations().is_empty());

    // 区域留空归入默认分类，id 留空按时间生成
    let saved = catalog::upsert_location(&mut db, LocationDef::new("", "新点位", "N-01", ""), T0)
        .expect("保存失败");
    assert_eq!(saved.area, "未分类");
    assert_eq!(saved.id, format!("loc-{}", T0));
    assert_eq!(db.list_locations().len(), 1);
}

#[test]
fn test_delete_location_does_not_cascade() {
    use mine_patrol_common::{CreatePolicy, InspectionDraft, ItemResult, ShiftType, User};
    use mine_patrol_rust::workflow;

    let mut db = db_with_locations();
    db.set_current_user(Some(User {
        username: "张三".to_string(),
        team: "采煤一队".to_string(),
        role: "巡检员".to_string(),
    }));

    let record = workflow::create_inspection(
        &mut db,
        InspectionDraft::quick("中央泵房", ShiftType::Morning, ItemResult::Normal),
        CreatePolicy::default(),
        T0,
    )
    .expect("创建失败");
    assert_eq!(record.location_code.as_deref(), Some("P-03-B"));

    // 删除点位后，历史记录保留自己的快照
    db.delete_location("l3");
    let stored = workflow::get_inspection(&db, &record.id).expect("查询失败");
    assert_eq!(stored.location, "中央泵房");
    assert_eq!(stored.location_code.as_deref(), Some("P-03-B"));
}

#[test]
fn test_search_and_csv() {
    let mut db = db_with_locations();
    catalog::bind_nfc(&mut db, "l1", "UID_508761", T0).expect("绑定失败");

    let hits = catalog::search_locations(&db, "采煤区");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "1201综采工作面");

    let csv = catalog::locations_csv(&db);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("ID,名称,编码,区域,NFC_UID,QR_资产ID"));
    assert!(csv.contains("主斜井皮带机房"));
    assert!(csv.contains("UID_508761"));
    // 三个点位 + 表头
    assert_eq!(csv.lines().count(), 4);
}
