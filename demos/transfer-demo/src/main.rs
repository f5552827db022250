//! # 转账示例
//!
//! 演示容器的完整启动流程：
//! 配置文档装配 DAO、事务管理器和代理工厂，扫描发现控制器与事务服务，
//! 事务服务被代理替换后，一次成功转账提交，一次失败转账回滚。

mod controller;
mod dao;
mod service;
mod tx;

use anyhow::Context;
use clap::Parser;
use controller::TransferController;
use ioc_composition::{global, ContainerBuilder, LoggingConfig};
use service::TransferService;
use tracing::{error, info};
use tx::MemoryTransactionManager;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "transfer-demo")]
#[command(about = "IoC 容器转账示例")]
struct Args {
    /// 配置文档路径
    #[arg(short, long, default_value = "demos/transfer-demo/config/beans.toml")]
    config: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// 转出账户
    #[arg(long, default_value = "6029621011000")]
    from: String,

    /// 转入账户
    #[arg(long, default_value = "6029621011001")]
    to: String,

    /// 转账金额
    #[arg(long, default_value_t = 100)]
    amount: i64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let report = global::initialize(
        ContainerBuilder::new()
            .with_document(&args.config)
            .with_logging(LoggingConfig::development().with_level(args.log_level)),
    )
    .context("容器启动失败")?;
    info!("{}", report);
    for failure in &report.errors {
        error!("启动错误: {}", failure);
    }

    let service = global::get::<dyn TransferService>("transferServiceImpl")
        .context("容器中没有 transferServiceImpl")?;
    let controller = global::container()
        .and_then(|container| container.get_concrete::<TransferController>("transferController"))
        .context("容器中没有 transferController")?;

    info!("转账前余额: {:?}", controller.balances());

    match service.transfer(&args.from, &args.to, args.amount) {
        Ok(()) => info!("转账成功: {} -> {}, 金额 {}", args.from, args.to, args.amount),
        Err(err) => error!("转账失败: {}", err),
    }
    info!("第一次转账后余额: {:?}", controller.balances());

    // 转入不存在的账户：扣款已经发生，入账失败后由事务回滚恢复
    let missing = "6029621019999";
    if let Err(err) = service.transfer(&args.from, missing, args.amount) {
        error!("转账失败: {}", err);
    }
    info!("回滚后余额: {:?}", controller.balances());

    if let Some(manager) = global::container()
        .and_then(|container| container.get_concrete::<MemoryTransactionManager>("transactionManager"))
    {
        info!("事务记录: {:?}", manager.journal());
    }

    Ok(())
}
