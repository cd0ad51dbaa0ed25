//! 巡检点位档案
//!
//! 点位与 NFC 标签 / 外部资产二维码的绑定关系。绑定相关字段只能
//! 通过 bind/unbind 方法成对写入，标志位与标签号因此不会失配。

use serde::{Deserialize, Serialize};

/// 一个物理巡检点位
///
/// 与巡检记录之间没有外键关系：记录在创建时快照点位名称与编码，
/// 删除点位不影响既有记录。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationDef {
    pub id: String,
    pub name: String,
    /// 人工可读编码，如 S-01-A
    pub code: String,
    /// 所属区域标签
    pub area: String,
    #[serde(rename = "hasNFC")]
    has_nfc: bool,
    #[serde(rename = "hasQR")]
    has_qr: bool,
    nfc_tag_id: Option<String>,
    qr_tag_id: Option<String>,
    nfc_bind_date: Option<i64>,
    qr_bind_date: Option<i64>,
}

impl LocationDef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            area: area.into(),
            ..Default::default()
        }
    }

    /// 绑定（或更换）NFC 标签。旧标签号直接被覆盖，不保留历史。
    pub fn bind_nfc(&mut self, tag_id: impl Into<String>, now_ms: i64) {
        self.has_nfc = true;
        self.nfc_tag_id = Some(tag_id.into());
        self.nfc_bind_date = Some(now_ms);
    }

    /// 解除 NFC 绑定。解绑后原物理标签失效，只能重新绑定恢复。
    pub fn unbind_nfc(&mut self) {
        self.has_nfc = false;
        self.nfc_tag_id = None;
        self.nfc_bind_date = None;
    }

    /// 绑定外部资产二维码（如设备名牌上的资产码）
    pub fn bind_external_qr(&mut self, asset_code: impl Into<String>, now_ms: i64) {
        self.has_qr = true;
        self.qr_tag_id = Some(asset_code.into());
        self.qr_bind_date = Some(now_ms);
    }

    /// 解除外部资产二维码绑定
    pub fn unbind_external_qr(&mut self) {
        self.has_qr = false;
        self.qr_tag_id = None;
        self.qr_bind_date = None;
    }

    pub fn has_nfc(&self) -> bool {
        self.has_nfc
    }

    pub fn has_qr(&self) -> bool {
        self.has_qr
    }

    pub fn nfc_tag_id(&self) -> Option<&str> {
        self.nfc_tag_id.as_deref()
    }

    pub fn qr_tag_id(&self) -> Option<&str> {
        self.qr_tag_id.as_deref()
    }

    pub fn nfc_bind_date(&self) -> Option<i64> {
        self.nfc_bind_date
    }

    pub fn qr_bind_date(&self) -> Option<i64> {
        self.qr_bind_date
    }

    /// 名称 / 编码 / 区域的子串匹配（点位库搜索用）
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.name.contains(keyword) || self.code.contains(keyword) || self.area.contains(keyword)
    }
}
