// ==========================================
// 坐标测量质检系统 - 命令行入口
// ==========================================
// 用法:
//   cmm-qc import <path>...        导入测量文件
//   cmm-qc report <file_id>...     输出检测报告（多个文件并发组装）
//   cmm-qc bands                   输出当前生效方案的公差表
//   cmm-qc files                   列出已导入的测量文件
//   cmm-qc file <file_id>          查看单个测量文件的导入信息
//   cmm-qc delete <file_id>        删除测量文件
//   cmm-qc profiles                方案概览
//   cmm-qc save-profile <json>     从 JSON 文件保存质检方案
//   cmm-qc use-profile <name>      切换生效方案
//   cmm-qc k-axis <x|y>            设置 K 检测点取值轴
// 数据库: 环境变量 CMM_QC_DB_PATH，或用户数据目录
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use serde_json::{json, Value};

use cmm_qc::api::ApiResult;
use cmm_qc::app::{get_default_db_path, AppState};
use cmm_qc::logging;

const USAGE: &str = "用法: cmm-qc <import|report|bands|files|file|delete|profiles|save-profile|use-profile|k-axis> [参数...]";

/// 单项结果转 JSON（失败时输出错误信息）
fn entry_json<T: serde::Serialize>(key: &str, id: &str, result: ApiResult<T>) -> Result<Value> {
    Ok(match result {
        Ok(value) => json!({ key: id, "ok": true, "data": serde_json::to_value(value)? }),
        Err(e) => json!({ key: id, "ok": false, "error": e.to_string() }),
    })
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let rest: Vec<String> = args.collect();

    let db_path = get_default_db_path();
    tracing::info!("{} v{}，数据库: {}", cmm_qc::APP_NAME, cmm_qc::VERSION, db_path);
    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    match command.as_str() {
        "import" => {
            if rest.is_empty() {
                bail!("import 需要至少一个文件路径");
            }
            let results = state.import_api.import_files(rest).await;
            let entries = results
                .into_iter()
                .map(|(path, r)| entry_json("path", &path, r))
                .collect::<Result<Vec<_>>>()?;
            print_json(&Value::Array(entries))?;
        }
        "report" => {
            if rest.is_empty() {
                bail!("report 需要至少一个文件ID");
            }
            let results = state.report_api.get_batch_report(rest).await?;
            let entries = results
                .into_iter()
                .map(|(file_id, r)| entry_json("fileId", &file_id, r))
                .collect::<Result<Vec<_>>>()?;
            print_json(&Value::Array(entries))?;
        }
        "bands" => {
            let table = state.report_api.get_tolerance_table()?;
            print_json(&serde_json::to_value(table)?)?;
        }
        "files" => {
            let files = state.import_api.list_files()?;
            print_json(&serde_json::to_value(files)?)?;
        }
        "file" => {
            let file_id = rest.first().context("file 需要文件ID")?;
            let file = state.import_api.get_file(file_id)?;
            print_json(&serde_json::to_value(file)?)?;
        }
        "delete" => {
            let file_id = rest.first().context("delete 需要文件ID")?;
            state.import_api.delete_file(file_id)?;
            print_json(&json!({ "fileId": file_id, "deleted": true }))?;
        }
        "profiles" => {
            let summary = state.config_api.get_profile_summary()?;
            print_json(&serde_json::to_value(summary)?)?;
        }
        "save-profile" => {
            let path = rest.first().context("save-profile 需要 JSON 文件路径")?;
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("无法读取方案文件: {}", path))?;
            let name = state.config_api.save_profile_json(&text)?;
            print_json(&json!({ "saved": name }))?;
        }
        "use-profile" => {
            let name = rest.first().context("use-profile 需要方案名称")?;
            state.config_api.set_active_profile(name)?;
            print_json(&json!({ "active": name }))?;
        }
        "k-axis" => {
            let axis = rest.first().context("k-axis 需要 x 或 y")?;
            state.config_api.set_k_axis(axis)?;
            print_json(&json!({ "kAxis": axis.to_lowercase() }))?;
        }
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }

    Ok(())
}
