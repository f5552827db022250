//! # Bean Macros
//!
//! `#[derive(Bean)]` 在编译期为结构体生成 `ioc_common::TypeDescriptor`，
//! 并在程序启动时（借助 `ctor`）把它注册进全局类型目录，
//! 容器随后可以按类型名称实例化它，或通过扫描发现它。
//!
//! 使用方 crate 需要依赖 `ioc-common` 和 `ctor`。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use bean_macros::Bean;
//! use ioc_common::Injected;
//!
//! #[derive(Bean, Default)]
//! #[bean(component, transactional, exposes = dyn TransferService)]
//! pub struct TransferServiceImpl {
//!     #[property]
//!     account_dao: Injected<dyn AccountDao>,
//! }
//!
//! #[derive(Bean, Default)]
//! #[bean(component = "transferController")]
//! pub struct TransferController {
//!     #[inject]
//!     transfer_service: Injected<dyn TransferService>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod bean;
mod utils;

/// 组件派生宏
///
/// # 类型属性 `#[bean(...)]`
///
/// - `component` / `component = "id"` - 组件标记，参与扫描发现
/// - `transactional` - 事务标记，扫描后被事务代理替换
/// - `exposes = dyn Trait` - 暴露能力视图，可重复；带事务标记时这些能力都可被事务装饰
/// - `name = "a::b::Type"` - 覆盖类型名称（默认 `module_path!()::Type`）
/// - `constructor = path` - 默认构造函数 `fn() -> Result<Self, BoxError>`
/// - `no_default` - 没有默认构造器
///
/// # 字段属性
///
/// - `#[inject]` / `#[inject(id = "x")]` - 扫描阶段按约定（或显式 id）注入
/// - `#[property]` / `#[property(setter = "set_x")]` - 生成供显式装配调用的 setter
///
/// 带属性的字段类型必须是 `Injected<T>`。
#[proc_macro_derive(Bean, attributes(bean, inject, property))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    bean::expand_bean(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
