use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use mine_patrol_common::{InspectionStatus, ShiftType};

#[derive(Parser)]
#[command(name = "mine-patrol")]
#[command(about = "智巡煤矿：煤矿安全巡检记录管理工具", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 输出详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 列出巡检记录（可组合关键字/状态/时间筛选）
    List {
        /// 关键字（匹配地点名称或点位编码）
        #[arg(short, long)]
        keyword: Option<String>,

        /// 状态筛选 (normal/abnormal/rectifying/reviewed)
        #[arg(short, long)]
        status: Option<InspectionStatus>,

        /// 时间筛选 (all/today/yesterday/week/month/custom)
        #[arg(short, long, default_value = "all")]
        time: TimeArg,

        /// 自定义开始日期 (YYYY-MM-DD，仅 custom 模式)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// 自定义结束日期 (YYYY-MM-DD，仅 custom 模式)
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// 查看单条巡检记录
    Show {
        /// 记录 id
        #[arg(required = true)]
        id: String,
    },

    /// 生成文字版巡检报告（导出为模拟行为，不落盘）
    Report {
        /// 记录 id
        #[arg(required = true)]
        id: String,
    },

    /// 新建巡检记录
    Create {
        /// 巡检地点
        #[arg(required = true)]
        location: String,

        /// 点位编码（留空时自动对照点位库快照）
        #[arg(long)]
        code: Option<String>,

        /// 班次 (早班/中班/夜班)
        #[arg(long)]
        shift: Option<ShiftType>,

        /// 使用内置模板创建（模板 id，如 t1）
        #[arg(short, long)]
        template: Option<String>,

        /// 模板模式下判定为异常的检查项序号（从 1 开始，可重复指定）
        #[arg(long = "abnormal-item")]
        abnormal_items: Vec<usize>,

        /// 快速模式下整体结论为异常
        #[arg(long)]
        abnormal: bool,

        /// 备注说明
        #[arg(short, long)]
        remark: Option<String>,

        /// 异常已当场处理完毕（记录直接闭环）
        #[arg(long)]
        on_site_fixed: bool,

        /// 现场处理情况说明（--on-site-fixed 时必填）
        #[arg(long)]
        fix_remark: Option<String>,

        /// 签名图像数据（base64，模拟签名板输出）
        #[arg(long)]
        signature: Option<String>,
    },

    /// 提交整改进展
    Rectify {
        /// 记录 id
        #[arg(required = true)]
        id: String,

        /// 整改说明（省略时交互输入）
        #[arg(short, long)]
        remark: Option<String>,

        /// 现场照片引用（可重复指定）
        #[arg(long)]
        photo: Vec<String>,
    },

    /// 复查闭环
    Review {
        /// 记录 id
        #[arg(required = true)]
        id: String,

        /// 复查未通过
        #[arg(long)]
        fail: bool,
    },

    /// 删除巡检记录
    Delete {
        /// 记录 id
        #[arg(required = true)]
        id: String,

        /// 跳过确认
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 巡检汇总统计
    Stats,

    /// 点位库列表/搜索
    Locations {
        /// 搜索关键字（名称/编码/区域）
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// 新增或编辑点位档案
    LocAdd {
        /// 点位名称
        #[arg(required = true)]
        name: String,

        /// 点位编码
        #[arg(required = true)]
        code: String,

        /// 所属区域（留空归入默认分类）
        #[arg(long)]
        area: Option<String>,

        /// 指定 id 时为编辑既有点位
        #[arg(long)]
        id: Option<String>,
    },

    /// 删除点位档案
    LocDelete {
        /// 点位 id
        #[arg(required = true)]
        id: String,

        /// 跳过确认
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 绑定（或更换）NFC 标签
    BindNfc {
        /// 点位 id
        #[arg(required = true)]
        id: String,

        /// NFC 标签 UID
        #[arg(required = true)]
        tag: String,
    },

    /// 解除 NFC 绑定
    UnbindNfc {
        /// 点位 id
        #[arg(required = true)]
        id: String,

        /// 跳过确认
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 绑定外部资产二维码
    BindQr {
        /// 点位 id
        #[arg(required = true)]
        id: String,

        /// 扫描得到的资产码
        #[arg(required = true)]
        asset_code: String,
    },

    /// 解除外部资产二维码绑定
    UnbindQr {
        /// 点位 id
        #[arg(required = true)]
        id: String,

        /// 跳过确认
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 批量绑定/解绑硬件
    Batch {
        /// 硬件类别 (nfc/qr)
        #[arg(required = true)]
        hardware: crate::catalog::Hardware,

        /// 操作 (bind/unbind)
        #[arg(required = true)]
        action: BatchAction,

        /// 点位 id 列表
        #[arg(required = true)]
        ids: Vec<String>,

        /// 跳过确认
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// 导出点位库明细 CSV（模拟，仅输出内容）
    ExportCsv,

    /// 显示或修改设置
    Config {
        /// 打开/关闭提交签名要求
        #[arg(long)]
        set_require_signature: Option<bool>,

        /// 显示当前设置
        #[arg(long)]
        show: bool,
    },
}

/// 时间筛选参数
#[derive(Clone, Copy, Debug, Default)]
pub enum TimeArg {
    #[default]
    All,
    Today,
    Yesterday,
    Week,
    Month,
    Custom,
}

impl std::str::FromStr for TimeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "全部" => Ok(TimeArg::All),
            "today" | "今日" => Ok(TimeArg::Today),
            "yesterday" | "昨日" => Ok(TimeArg::Yesterday),
            "week" | "本周" => Ok(TimeArg::Week),
            "month" | "本月" => Ok(TimeArg::Month),
            "custom" | "自定义" => Ok(TimeArg::Custom),
            _ => Err(format!(
                "未知时间筛选: {}。可选: all/today/yesterday/week/month/custom",
                s
            )),
        }
    }
}

/// 批量操作类型
#[derive(Clone, Copy, Debug)]
pub enum BatchAction {
    Bind,
    Unbind,
}

impl std::str::FromStr for BatchAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bind" | "绑定" => Ok(BatchAction::Bind),
            "unbind" | "解绑" => Ok(BatchAction::Unbind),
            _ => Err(format!("未知操作: {}。可选: bind/unbind", s)),
        }
    }
}
