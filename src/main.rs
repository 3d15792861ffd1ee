/// 应用程序主入口
///
/// 命令行驱动：列出收发器、比较最多四个收发器并导出结果

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use compare_lib::commands::{self, ComparisonSnapshot};
use compare_lib::logging::init_logger;
use compare_lib::models::{DataSourceKind, ExportFormat};
use compare_lib::services::domain::SlotStatus;
use compare_lib::utils::config::{ConfigManager, MAX_COMPARISON_SLOTS};
use compare_lib::utils::time_utils::format_local;
use compare_lib::{AppConfig, AppState};

#[derive(Debug, Parser)]
#[command(
    name = "interconnect-compare",
    about = "Compare graded test reports of interconnect transceivers",
    version
)]
struct Cli {
    /// JSON 配置文件路径
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 从本地目录读取数据，覆盖配置中的数据源
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// HTTP 数据源地址，覆盖配置中的数据源
    #[arg(long, global = true, conflicts_with = "data_dir")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List transceivers sorted by name.
    List,

    /// Assemble and compare up to four transceivers.
    Compare {
        /// Transceiver ids, one per comparison slot.
        #[arg(required = true, num_args = 1..=MAX_COMPARISON_SLOTS)]
        ids: Vec<String>,

        /// Export the resolved reports after comparing.
        #[arg(long)]
        export: Option<ExportFormat>,
    },

    /// Write the default configuration to a JSON file.
    #[command(name = "init-config")]
    InitConfig {
        #[arg(default_value = "interconnect-compare.json")]
        path: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    if let Some(path) = &cli.config {
        if !path.exists() {
            compare_lib::log_config_warning!("配置文件 {:?} 不存在，使用默认配置", path);
        }
    }

    let mut manager = ConfigManager::new(cli.config.clone());
    manager.load().context("加载配置失败")?;

    let mut config = manager.get_config().clone();
    if let Some(dir) = &cli.data_dir {
        config.data_source.kind = DataSourceKind::Directory;
        config.data_source.directory = dir.clone();
    }
    if let Some(url) = &cli.base_url {
        config.data_source.kind = DataSourceKind::Http;
        config.data_source.base_url = url.clone();
    }
    Ok(config)
}

fn print_snapshot(snapshot: &ComparisonSnapshot) {
    for (index, slot) in snapshot.slots.iter().enumerate() {
        let Some(id) = &slot.active_id else { continue };
        match &slot.status {
            SlotStatus::Ready(results) => {
                println!(
                    "[{}] {} ({} / {}) 总体 {} {}% 已测 {}/{}",
                    index + 1,
                    results.transceiver.name,
                    results.transceiver.manufacturer,
                    results.transceiver.transceiver_type,
                    results.overall_grade,
                    results.overall_pass_rate,
                    results.tested_count(),
                    results.all_tests().count()
                );
                for category in &results.category_results {
                    println!(
                        "      {:<28} {} {:>3}% ({}/{})",
                        category.category.name,
                        category.grade,
                        category.pass_rate,
                        category.passed_count(),
                        category.tested_count()
                    );
                }
            }
            SlotStatus::Failed(err) => println!("[{}] {} 失败: {}", index + 1, id, err),
            SlotStatus::Loading | SlotStatus::Idle => println!("[{}] {} 无结果", index + 1, id),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::InitConfig { path } = &cli.command {
        let manager = ConfigManager::new(Some(path.clone()));
        manager.save_to_file().await.context("写入配置文件失败")?;
        println!("已写入默认配置: {}", path.display());
        return Ok(());
    }

    let config = load_config(&cli)?;
    init_logger(&config.logging_config).context("初始化日志失败")?;
    let state = AppState::new(config).context("初始化应用状态失败")?;

    match cli.command {
        Command::List => {
            let transceivers = commands::get_transceivers(&state).await.map_err(|e| anyhow!(e))?;
            for t in transceivers {
                println!("{:<16} {:<28} {:<20} {}", t.id, t.name, t.manufacturer, t.transceiver_type);
            }
        }
        Command::Compare { ids, export } => {
            for (slot, id) in ids.into_iter().enumerate() {
                commands::select_transceiver(&state, slot, Some(id))
                    .await
                    .map_err(|e| anyhow!(e))?;
            }
            let snapshot = commands::compare_selected(&state).await.map_err(|e| anyhow!(e))?;
            print_snapshot(&snapshot);

            if let Some(format) = export {
                let exported = commands::export_comparison(&state, format)
                    .await
                    .map_err(|e| anyhow!(e))?;
                println!(
                    "已导出 {} 行到 {} ({})",
                    exported.row_count,
                    exported.path.display(),
                    format_local(chrono::Utc::now(), "%Y-%m-%d %H:%M:%S")
                );
            }

            if snapshot.slots.iter().all(|s| s.results().is_none()) {
                bail!("没有任何收发器组装成功");
            }
        }
        Command::InitConfig { .. } => {}
    }

    Ok(())
}
