//! 记录存储
//!
//! 存储层只按 id 维护集合，不做任何业务校验；校验发生在生命周期
//! 引擎中、写入之前。所有操作同步完成，调用方观察不到半应用状态。

mod memory;

pub use memory::MemoryDb;

use mine_patrol_common::{InspectionRecord, LocationDef, User};

/// 存储契约
///
/// 实现可替换（测试用内存表，生产可接真实数据库），调用方持有
/// 显式的实例而不是进程级单例。
pub trait PatrolDb {
    /// 返回防御性拷贝，调用方修改返回值不影响存储
    fn list_inspections(&self) -> Vec<InspectionRecord>;

    /// 按 id upsert：已存在则原位替换，否则插到队首
    /// （默认展示顺序因此是“最近保存在前”）
    fn save_inspection(&mut self, record: InspectionRecord);

    /// 删除；id 不存在时静默无操作
    fn delete_inspection(&mut self, id: &str);

    fn list_locations(&self) -> Vec<LocationDef>;
    fn save_location(&mut self, location: LocationDef);
    fn delete_location(&mut self, id: &str);

    /// 会话内的当前用户（单槽位，不持久化）
    fn current_user(&self) -> Option<User>;
    fn set_current_user(&mut self, user: Option<User>);
}
