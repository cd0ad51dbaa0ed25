//! 内置巡检模板与基础字典数据

use crate::types::Template;

/// 班组列表
pub const TEAMS: &[&str] = &["采煤一队", "采煤二队", "机电科", "通风科", "运输队"];

/// 点位区域标签
pub const AREAS: &[&str] = &["采煤区", "变电所", "运输线", "通风部", "其他"];

/// 新建点位未填写区域时的默认值
pub const DEFAULT_AREA: &str = "未分类";

/// 预置巡检模板
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "t1".to_string(),
            name: "采煤工作面日常巡检".to_string(),
            category: "采煤".to_string(),
            items: vec![
                "液压支架压力".to_string(),
                "采煤机喷雾".to_string(),
                "刮板机运转".to_string(),
                "通风断面瓦斯".to_string(),
            ],
        },
        Template {
            id: "t2".to_string(),
            name: "配电室机电安全巡检".to_string(),
            category: "机电".to_string(),
            items: vec![
                "电缆绝缘状态".to_string(),
                "开关柜指示灯".to_string(),
                "绝缘工器具".to_string(),
                "灭火器效期".to_string(),
            ],
        },
        Template {
            id: "t3".to_string(),
            name: "通风系统专项排查".to_string(),
            category: "通风".to_string(),
            items: vec![
                "主扇运行参数".to_string(),
                "风门密闭程度".to_string(),
                "局部通风机状态".to_string(),
                "测风点风速".to_string(),
            ],
        },
    ]
}

/// 按 id 查找内置模板
pub fn find_template(id: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.id == id)
}
