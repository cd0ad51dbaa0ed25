use chrono::{Local, NaiveDate};
use clap::Parser;
use dialoguer::{Confirm, Input};
use mine_patrol_rust::{catalog, cli, config, db, error, report, workflow};

use cli::{BatchAction, Cli, Commands, TimeArg};
use config::Config;
use db::{MemoryDb, PatrolDb};
use error::{PatrolError, Result};
use mine_patrol_common::{
    find_template, CreatePolicy, InspectionDraft, InspectionItem, ItemResult, LocationDef,
    RecordFilter, Submission, TimeFilter,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let config = Config::load()?;
    let now_ms = Local::now().timestamp_millis();

    // 内存库与参考实现一样随进程重置，每次运行从演示数据出发
    let mut db = MemoryDb::with_seed(now_ms);

    match cli.command {
        Commands::List {
            keyword,
            status,
            time,
            start,
            end,
        } => {
            let filter = RecordFilter {
                keyword: keyword.unwrap_or_default(),
                status,
                time: build_time_filter(time, start, end),
            };

            let records = workflow::list_filtered(&db, &filter);
            let stats = workflow::stats(&db);
            println!(
                "总任务 {} | 异常项 {} | 待复查 {}\n",
                stats.total, stats.abnormal, stats.rectifying
            );

            if records.is_empty() {
                println!("没有找到匹配的记录，请尝试调整筛选条件或搜索关键字");
            } else {
                for record in &records {
                    println!(
                        "{}  {}  [{}]  {} {}",
                        record.id,
                        report::format_ms(record.timestamp),
                        record.overall_status.label(),
                        record.location,
                        record.location_code.as_deref().unwrap_or("")
                    );
                }
                println!("\n共 {} 条", records.len());
            }
        }

        Commands::Show { id } => {
            let record = workflow::get_inspection(&db, &id)?;
            let json = serde_json::to_string_pretty(&record)?;
            println!("{}", json);
        }

        Commands::Report { id } => {
            let record = workflow::get_inspection(&db, &id)?;
            print!("{}", report::render(&record));
            println!("\n(模拟导出：仅生成文本内容，不写入文件)");
        }

        Commands::Create {
            location,
            code,
            shift,
            template,
            abnormal_items,
            abnormal,
            remark,
            on_site_fixed,
            fix_remark,
            signature,
        } => {
            let shift = shift.unwrap_or(config.default_shift);

            let submission = match &template {
                Some(template_id) => {
                    let template = find_template(template_id)
                        .ok_or_else(|| PatrolError::TemplateNotFound(template_id.clone()))?;
                    let items = template
                        .items
                        .iter()
                        .enumerate()
                        .map(|(index, name)| InspectionItem {
                            name: name.clone(),
                            result: if abnormal_items.contains(&(index + 1)) {
                                ItemResult::Abnormal
                            } else {
                                ItemResult::Normal
                            },
                            ..Default::default()
                        })
                        .collect();
                    Submission::Template {
                        template_name: template.name,
                        items,
                    }
                }
                None => Submission::Quick {
                    conclusion: if abnormal {
                        ItemResult::Abnormal
                    } else {
                        ItemResult::Normal
                    },
                },
            };

            let draft = InspectionDraft {
                location,
                location_code: code,
                shift,
                remark,
                submission,
                on_site_fixed,
                on_site_remark: fix_remark,
                signature,
            };
            let policy = CreatePolicy {
                require_signature: config.require_signature,
            };

            println!("正在上传同步...");
            let record = workflow::create_inspection(&mut db, draft, policy, now_ms)?;
            println!(
                "✔ 提交成功: {} [{}] (id: {})",
                record.location,
                record.overall_status.label(),
                record.id
            );
            if !record.rectify_logs.is_empty() {
                println!("  已附现场整改日志: {}", record.rectify_logs[0].remark);
            }
        }

        Commands::Rectify { id, remark, photo } => {
            let remark = match remark {
                Some(r) => r,
                None => Input::new()
                    .with_prompt("描述当前整改进展或结果")
                    .interact_text()
                    .map_err(|e| PatrolError::Config(format!("读取输入失败: {}", e)))?,
            };

            let record = workflow::add_rectification(&mut db, &id, &remark, photo, now_ms)?;
            println!(
                "✔ 整改已提交 (第 {} 次)，当前状态: {}",
                record.rectify_logs.len(),
                record.overall_status.label()
            );
        }

        Commands::Review { id, fail } => {
            let record = workflow::finish_review(&mut db, &id, !fail)?;
            let verdict = record
                .review_result
                .map(|r| r.label())
                .unwrap_or("通过");
            println!("✔ 复查{}，此巡检记录已闭环归档", verdict);
        }

        Commands::Delete { id, yes } => {
            if !yes && !confirm("确定要删除此巡检记录吗？此操作不可撤销。")? {
                println!("已取消");
                return Ok(());
            }
            db.delete_inspection(&id);
            println!("✔ 删除记录: {}", id);
        }

        Commands::Stats => {
            let stats = workflow::stats(&db);
            println!("巡检统计:");
            println!("  总任务: {}", stats.total);
            println!("  异常项: {}", stats.abnormal);
            println!("  待复查: {}", stats.rectifying);
        }

        Commands::Locations { keyword } => {
            let locations = catalog::search_locations(&db, keyword.as_deref().unwrap_or(""));
            if locations.is_empty() {
                println!("点位库为空或无匹配");
            }
            for l in &locations {
                println!(
                    "{}  {} #{} [{}]  NFC:{}  QR:{}",
                    l.id,
                    l.name,
                    l.code,
                    l.area,
                    l.nfc_tag_id().unwrap_or("-"),
                    l.qr_tag_id().unwrap_or("-")
                );
            }
        }

        Commands::LocAdd { name, code, area, id } => {
            let location = LocationDef::new(
                id.unwrap_or_default(),
                name,
                code,
                area.unwrap_or_else(|| config.default_area.clone()),
            );
            let saved = catalog::upsert_location(&mut db, location, now_ms)?;
            println!("✔ 保存并生效: {} #{} ({})", saved.name, saved.code, saved.id);
        }

        Commands::LocDelete { id, yes } => {
            if !yes && !confirm("确定要删除此点位档案吗？此操作不可撤销。")? {
                println!("已取消");
                return Ok(());
            }
            db.delete_location(&id);
            println!("✔ 删除点位: {}", id);
        }

        Commands::BindNfc { id, tag } => {
            let location = catalog::bind_nfc(&mut db, &id, &tag, now_ms)?;
            println!(
                "✔ 已建立物理映射: {} ← UID {}",
                location.name,
                location.nfc_tag_id().unwrap_or("")
            );
        }

        Commands::UnbindNfc { id, yes } => {
            if !yes && !confirm("解绑后，现有的物理 NFC 标签将失效。确定继续？")? {
                println!("已取消");
                return Ok(());
            }
            let location = catalog::unbind_nfc(&mut db, &id)?;
            println!("✔ 已解除 NFC 绑定: {}", location.name);
        }

        Commands::BindQr { id, asset_code } => {
            let location = catalog::bind_external_qr(&mut db, &id, &asset_code, now_ms)?;
            println!(
                "✔ 已绑定资产码: {} ← {}",
                location.name,
                location.qr_tag_id().unwrap_or("")
            );
        }

        Commands::UnbindQr { id, yes } => {
            if !yes && !confirm("解绑后，该资产二维码将不再指向此巡检点。确定解绑？")? {
                println!("已取消");
                return Ok(());
            }
            let location = catalog::unbind_external_qr(&mut db, &id)?;
            println!("✔ 已解除二维码绑定: {}", location.name);
        }

        Commands::Batch {
            hardware,
            action,
            ids,
            yes,
        } => {
            if matches!(action, BatchAction::Unbind)
                && !yes
                && !confirm(&format!(
                    "确定要批量解除 {} 个点位的硬件绑定吗？",
                    ids.len()
                ))?
            {
                println!("已取消");
                return Ok(());
            }

            let report = match action {
                BatchAction::Bind => catalog::batch_bind(&mut db, hardware, &ids, now_ms),
                BatchAction::Unbind => catalog::batch_unbind(&mut db, hardware, &ids),
            };
            println!(
                "✔ 批量{}操作完成: 成功 {} / 失败 {}",
                hardware.label(),
                report.succeeded,
                report.failed
            );
        }

        Commands::ExportCsv => {
            println!("正在生成地点库报表...(模拟下载 地点库详情.csv)\n");
            println!("{}", catalog::locations_csv(&db));
        }

        Commands::Config {
            set_require_signature,
            show,
        } => {
            let mut config = config;

            if let Some(value) = set_require_signature {
                config.set_require_signature(value)?;
                println!(
                    "✔ 提交签名要求已{}",
                    if value { "开启" } else { "关闭" }
                );
            }

            if show || set_require_signature.is_none() {
                println!("设置:");
                println!(
                    "  提交须签名: {}",
                    if config.require_signature { "是" } else { "否" }
                );
                println!("  默认班次: {}", config.default_shift.label());
                println!("  默认区域: {}", config.default_area);
            }
        }
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| PatrolError::Config(format!("读取输入失败: {}", e)))
}

fn build_time_filter(time: TimeArg, start: Option<NaiveDate>, end: Option<NaiveDate>) -> TimeFilter {
    match time {
        TimeArg::All => TimeFilter::All,
        TimeArg::Today => TimeFilter::Today,
        TimeArg::Yesterday => TimeFilter::Yesterday,
        TimeArg::Week => TimeFilter::Week,
        TimeArg::Month => TimeFilter::Month,
        TimeArg::Custom => TimeFilter::Custom { start, end },
    }
}
