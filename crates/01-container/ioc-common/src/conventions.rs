//! 约定规范定义
//!
//! 组件 id、依赖 id 和 setter 名称的推导规则

/// 命名约定规范
#[derive(Debug)]
pub struct NamingConventions;

impl NamingConventions {
    /// 首字母小写：`OrderService` → `orderService`
    pub fn lower_first(name: &str) -> String {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// 从类型名称中提取简单名称
    ///
    /// 去掉 `dyn ` 前缀、附加的 `+ Send` 等约束、泛型参数和模块路径：
    /// `dyn bank::dao::AccountDao + Send` → `AccountDao`
    pub fn simple_type_name(type_name: &str) -> &str {
        let name = type_name.trim();
        let name = name.strip_prefix("dyn ").unwrap_or(name);
        let name = name.split('<').next().unwrap_or(name);
        let name = name.split(" +").next().unwrap_or(name).trim();
        name.rsplit("::").next().unwrap_or(name)
    }

    /// 类型所在的模块路径：`bank::dao::JdbcAccountDao` → `bank::dao`
    pub fn module_path(type_name: &str) -> &str {
        let name = type_name.split('<').next().unwrap_or(type_name);
        match name.rfind("::") {
            Some(index) => &name[..index],
            None => "",
        }
    }

    /// 按约定推导组件 id
    pub fn component_id(type_name: &str) -> String {
        Self::lower_first(Self::simple_type_name(type_name))
    }

    /// 统一路径分隔符：`bank.service` → `bank::service`
    pub fn normalize_path(path: &str) -> String {
        path.trim()
            .replace("::", ".")
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("::")
    }

    /// 模块是否位于扫描根之下（包含根本身）
    pub fn is_within(module_path: &str, root: &str) -> bool {
        if root.is_empty() {
            return true;
        }
        module_path == root
            || module_path
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with("::"))
    }

    /// setter 名称是否匹配 `set<Name>`（忽略大小写与下划线）
    ///
    /// `set_account_dao` 与属性名 `AccountDao` 匹配。
    pub fn setter_matches(setter_name: &str, property_name: &str) -> bool {
        Self::fold_member(setter_name) == Self::fold_member(&format!("set{}", property_name))
    }

    fn fold_member(name: &str) -> String {
        name.chars()
            .filter(|ch| *ch != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }
}
