//! 内存存储实现
//!
//! 进程生命周期内有效，重启即重置，与参考实现一致。

use super::PatrolDb;
use mine_patrol_common::{
    InspectionItem, InspectionRecord, InspectionStatus, ItemResult, LocationDef, ShiftType, User,
};

/// 内存表
#[derive(Debug, Default)]
pub struct MemoryDb {
    records: Vec<InspectionRecord>,
    locations: Vec<LocationDef>,
    user: Option<User>,
}

impl MemoryDb {
    /// 空库
    pub fn new() -> Self {
        Self::default()
    }

    /// 带演示种子数据的库（两条巡检记录、三个点位、已登录用户）
    pub fn with_seed(now_ms: i64) -> Self {
        let mut db = Self::new();

        db.save_inspection(InspectionRecord {
            id: "2".to_string(),
            location: "1201综采工作面".to_string(),
            location_code: Some("W-12-C".to_string()),
            team: "采煤一队".to_string(),
            shift: ShiftType::Morning,
            inspector: "张三".to_string(),
            timestamp: now_ms - 1000 * 60 * 120,
            overall_status: InspectionStatus::Normal,
            items: vec![InspectionItem {
                id: "i2".to_string(),
                name: "支架压力".to_string(),
                result: ItemResult::Normal,
                ..Default::default()
            }],
            ..Default::default()
        });

        db.save_inspection(InspectionRecord {
            id: "1".to_string(),
            location: "主斜井皮带机房".to_string(),
            location_code: Some("S-01-A".to_string()),
            team: "采煤一队".to_string(),
            shift: ShiftType::Morning,
            inspector: "张三".to_string(),
            timestamp: now_ms - 1000 * 60 * 60,
            overall_status: InspectionStatus::Abnormal,
            items: vec![InspectionItem {
                id: "i1".to_string(),
                name: "电机温度".to_string(),
                result: ItemResult::Abnormal,
                remark: Some("温度偏高，需注油".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        });

        let mut belt_room = LocationDef::new("l1", "主斜井皮带机房", "S-01-A", "运输线");
        belt_room.bind_nfc("UID_508761", now_ms - 1000 * 60 * 60 * 24 * 30);
        db.save_location(belt_room);
        db.save_location(LocationDef::new("l2", "1201综采工作面", "W-12-C", "采煤区"));
        db.save_location(LocationDef::new("l3", "中央泵房", "P-03-B", "其他"));

        db.set_current_user(Some(User {
            username: "张三".to_string(),
            team: "采煤一队".to_string(),
            role: "巡检员".to_string(),
        }));

        db
    }

    /// 清空全部数据（保留登录状态）
    pub fn clear_all(&mut self) {
        self.records.clear();
        self.locations.clear();
    }
}

impl PatrolDb for MemoryDb {
    fn list_inspections(&self) -> Vec<InspectionRecord> {
        self.records.clone()
    }

    fn save_inspection(&mut self, record: InspectionRecord) {
        log::debug!("保存巡检记录: {} ({})", record.id, record.location);
        match self.records.iter().position(|r| r.id == record.id) {
            Some(index) => self.records[index] = record,
            None => self.records.insert(0, record),
        }
    }

    fn delete_inspection(&mut self, id: &str) {
        self.records.retain(|r| r.id != id);
    }

    fn list_locations(&self) -> Vec<LocationDef> {
        self.locations.clone()
    }

    fn save_location(&mut self, location: LocationDef) {
        log::debug!("保存点位: {} ({})", location.id, location.name);
        match self.locations.iter().position(|l| l.id == location.id) {
            Some(index) => self.locations[index] = location,
            None => self.locations.insert(0, location),
        }
    }

    fn delete_location(&mut self, id: &str) {
        self.locations.retain(|l| l.id != id);
    }

    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    fn set_current_user(&mut self, user: Option<User>) {
        self.user = user;
    }
}
