//! 进程级容器
//!
//! [`initialize`] 在进程内只会成功一次：完整构建容器后再一次性发布，
//! 其他线程要么看不到容器，要么看到完整的容器。

use crate::builder::{Bootstrapped, ContainerBuilder};
use ioc_common::{Bean, BootstrapError};
use ioc_impl::{BootstrapReport, Container};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

static GLOBAL_CONTAINER: OnceCell<Container> = OnceCell::new();

/// 串行化初始化过程
static INITIALIZATION: Mutex<()> = parking_lot::const_mutex(());

/// 启动并发布进程级容器
///
/// 已经初始化过时返回 [`BootstrapError::AlreadyInitialized`]，不会再次执行装配。
/// 启动失败时容器保持未初始化状态。
pub fn initialize(builder: ContainerBuilder) -> Result<BootstrapReport, BootstrapError> {
    let _guard = INITIALIZATION.lock();
    if GLOBAL_CONTAINER.get().is_some() {
        warn!("进程级容器已经初始化");
        return Err(BootstrapError::AlreadyInitialized);
    }

    let Bootstrapped { container, report } = builder.bootstrap()?;
    GLOBAL_CONTAINER
        .set(container)
        .map_err(|_| BootstrapError::AlreadyInitialized)?;

    info!("进程级容器已发布");
    Ok(report)
}

/// 是否已经初始化
pub fn is_initialized() -> bool {
    GLOBAL_CONTAINER.get().is_some()
}

/// 进程级容器
pub fn container() -> Option<&'static Container> {
    GLOBAL_CONTAINER.get()
}

/// 按 id 查询组件，未初始化时返回 `None`
pub fn lookup(id: &str) -> Option<Bean> {
    GLOBAL_CONTAINER.get()?.lookup(id)
}

/// 按 id 查询能力视图，未初始化时返回 `None`
pub fn get<C: ?Sized + 'static>(id: &str) -> Option<Arc<C>> {
    GLOBAL_CONTAINER.get()?.get::<C>(id)
}
