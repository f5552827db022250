//! 类型元数据
//!
//! [`TypeDescriptor`] 描述一个可由容器实例化的类型：类型名称、标记、
//! 默认构造器、setter 表以及需要注入的字段。描述符在编译期生成
//! （`#[derive(Bean)]`）或通过 [`TypeDescriptorBuilder`] 手动构建，
//! 取代运行时反射。

use crate::bean::Bean;
use crate::conventions::NamingConventions;
use crate::errors::{BoxError, InstantiationError, ReflectionAccessError};
use crate::transaction::Transactional;
use crate::wiring::Injected;
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 默认构造器
pub type ConstructorFn = Arc<dyn Fn() -> Result<Bean, InstantiationError> + Send + Sync>;

/// 注入函数：`(目标实例, 依赖实例或空值)`
pub type AssignFn =
    Arc<dyn Fn(&Bean, Option<&Bean>) -> Result<(), ReflectionAccessError> + Send + Sync>;

/// 能力视图追加函数
type ViewFn<T> = Arc<dyn Fn(Bean, &Arc<T>) -> Bean + Send + Sync>;

/// 用户构造函数
type MakeFn<T> = Arc<dyn Fn() -> Result<T, BoxError> + Send + Sync>;

/// 类型级标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// 组件标记，参与扫描发现与字段注入
    Component,
    /// 事务标记，扫描后被事务代理替换
    Transactional,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component => f.write_str("component"),
            Self::Transactional => f.write_str("transactional"),
        }
    }
}

/// 组件标记属性
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMarker {
    /// 显式指定的组件 id，空字符串等同于未指定
    pub id: Option<String>,
}

/// setter 描述
#[derive(Clone)]
pub struct SetterDescriptor {
    name: String,
    parameter_type: &'static str,
    invoke: AssignFn,
}

impl SetterDescriptor {
    /// setter 名称，例如 `set_account_dao`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 参数类型名称
    pub fn parameter_type(&self) -> &'static str {
        self.parameter_type
    }

    /// 调用 setter
    pub fn invoke(&self, target: &Bean, value: Option<&Bean>) -> Result<(), ReflectionAccessError> {
        (self.invoke)(target, value)
    }
}

impl fmt::Debug for SetterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetterDescriptor")
            .field("name", &self.name)
            .field("parameter_type", &self.parameter_type)
            .finish()
    }
}

/// 字段注入点
#[derive(Clone)]
pub struct InjectionPoint {
    field: String,
    declared_type: &'static str,
    qualifier: Option<String>,
    assign: AssignFn,
}

impl InjectionPoint {
    /// 字段名称
    pub fn field(&self) -> &str {
        &self.field
    }

    /// 字段声明的依赖类型名称
    pub fn declared_type(&self) -> &'static str {
        self.declared_type
    }

    /// 显式指定的依赖 id
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// 依赖 id：显式 id 优先，否则取声明类型简单名称的首字母小写形式
    pub fn dependency_id(&self) -> String {
        match &self.qualifier {
            Some(id) => id.clone(),
            None => NamingConventions::component_id(self.declared_type),
        }
    }

    /// 写入字段
    pub fn assign(&self, target: &Bean, value: Option<&Bean>) -> Result<(), ReflectionAccessError> {
        (self.assign)(target, value)
    }
}

impl fmt::Debug for InjectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("field", &self.field)
            .field("declared_type", &self.declared_type)
            .field("qualifier", &self.qualifier)
            .finish()
    }
}

/// 类型描述符
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    simple_name: String,
    module_path: String,
    component: Option<ComponentMarker>,
    transactional: bool,
    constructor: Option<ConstructorFn>,
    setters: Vec<SetterDescriptor>,
    injections: Vec<InjectionPoint>,
}

impl TypeDescriptor {
    /// 为类型 `T` 创建描述符构建器
    pub fn builder<T: Send + Sync + 'static>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new()
    }

    /// 完整类型名称（`::` 分隔）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 简单类型名称
    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// 所在模块路径
    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    /// 组件标记
    pub fn component_marker(&self) -> Option<&ComponentMarker> {
        self.component.as_ref()
    }

    /// 是否带事务标记
    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    /// 是否带有指定标记
    pub fn has_marker(&self, marker: Marker) -> bool {
        match marker {
            Marker::Component => self.component.is_some(),
            Marker::Transactional => self.transactional,
        }
    }

    /// 按约定推导的 id（简单名称首字母小写）
    pub fn convention_id(&self) -> String {
        NamingConventions::lower_first(&self.simple_name)
    }

    /// 组件 id：组件标记上的显式 id 非空时使用显式 id，否则按约定推导
    pub fn component_id(&self) -> String {
        self.component
            .as_ref()
            .and_then(|marker| marker.id.as_deref())
            .filter(|id| !id.is_empty())
            .map_or_else(|| self.convention_id(), str::to_string)
    }

    /// 是否有默认构造器
    pub fn has_default_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// 调用默认构造器创建实例
    pub fn instantiate(&self) -> Result<Bean, InstantiationError> {
        match &self.constructor {
            Some(constructor) => constructor(),
            None => Err(InstantiationError::NoDefaultConstructor {
                type_name: self.name.clone(),
            }),
        }
    }

    /// setter 表（声明顺序）
    pub fn setters(&self) -> &[SetterDescriptor] {
        &self.setters
    }

    /// 查找匹配 `set<property>` 的 setter，多个匹配时取第一个
    pub fn find_setter(&self, property: &str) -> Option<&SetterDescriptor> {
        self.setters
            .iter()
            .find(|setter| NamingConventions::setter_matches(&setter.name, property))
    }

    /// 字段注入点（声明顺序）
    pub fn injections(&self) -> &[InjectionPoint] {
        &self.injections
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("component", &self.component)
            .field("transactional", &self.transactional)
            .field("has_default_constructor", &self.constructor.is_some())
            .field("setters", &self.setters)
            .field("injections", &self.injections)
            .finish()
    }
}

/// 编译期生成描述符的类型
///
/// 由 `#[derive(Bean)]` 实现。
pub trait BeanType: Send + Sync + 'static {
    /// 类型描述符
    fn descriptor() -> TypeDescriptor;
}

/// 类型描述符构建器
pub struct TypeDescriptorBuilder<T> {
    name: String,
    component: Option<ComponentMarker>,
    transactional: bool,
    make: Option<MakeFn<T>>,
    views: Vec<ViewFn<T>>,
    setters: Vec<SetterDescriptor>,
    injections: Vec<InjectionPoint>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeDescriptorBuilder<T> {
    fn new() -> Self {
        Self {
            name: type_name::<T>().to_string(),
            component: None,
            transactional: false,
            make: None,
            views: Vec::new(),
            setters: Vec::new(),
            injections: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// 覆盖类型名称（默认取 `std::any::type_name`）
    pub fn named(mut self, name: impl AsRef<str>) -> Self {
        self.name = NamingConventions::normalize_path(name.as_ref());
        self
    }

    /// 添加组件标记，id 按约定推导
    pub fn component(mut self) -> Self {
        self.component = Some(ComponentMarker::default());
        self
    }

    /// 添加带显式 id 的组件标记
    pub fn component_named(mut self, id: impl Into<String>) -> Self {
        self.component = Some(ComponentMarker { id: Some(id.into()) });
        self
    }

    /// 添加事务标记
    pub fn transactional(mut self) -> Self {
        self.transactional = true;
        self
    }

    /// 使用 `Default` 作为默认构造器
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(|| Ok(T::default()))
    }

    /// 指定默认构造器
    pub fn constructor<F>(mut self, make: F) -> Self
    where
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.make = Some(Arc::new(make));
        self
    }

    /// 暴露能力视图
    pub fn exposes<C>(mut self, cast: fn(Arc<T>) -> Arc<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.views
            .push(Arc::new(move |bean: Bean, object: &Arc<T>| bean.exposing(cast(object.clone()))));
        self
    }

    /// 暴露可被事务装饰的能力视图
    pub fn exposes_transactional<C>(mut self, cast: fn(Arc<T>) -> Arc<C>) -> Self
    where
        C: ?Sized + Transactional,
    {
        self.views.push(Arc::new(move |bean: Bean, object: &Arc<T>| {
            bean.exposing_transactional(cast(object.clone()))
        }));
        self
    }

    /// 注册 setter
    pub fn setter<C>(mut self, name: impl Into<String>, accessor: fn(&T) -> &Injected<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        let name = name.into();
        self.setters.push(SetterDescriptor {
            invoke: assign_fn::<T, C>(name.clone(), accessor),
            name,
            parameter_type: type_name::<C>(),
        });
        self
    }

    /// 注册按约定解析依赖 id 的注入字段
    pub fn inject<C>(self, field: impl Into<String>, accessor: fn(&T) -> &Injected<C>) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.push_injection(field.into(), None, accessor)
    }

    /// 注册显式指定依赖 id 的注入字段
    pub fn inject_qualified<C>(
        self,
        field: impl Into<String>,
        id: impl Into<String>,
        accessor: fn(&T) -> &Injected<C>,
    ) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.push_injection(field.into(), Some(id.into()), accessor)
    }

    fn push_injection<C>(
        mut self,
        field: String,
        qualifier: Option<String>,
        accessor: fn(&T) -> &Injected<C>,
    ) -> Self
    where
        C: ?Sized + Send + Sync + 'static,
    {
        self.injections.push(InjectionPoint {
            assign: assign_fn::<T, C>(field.clone(), accessor),
            field,
            declared_type: type_name::<C>(),
            qualifier,
        });
        self
    }

    /// 构建描述符
    pub fn build(self) -> TypeDescriptor {
        let name = NamingConventions::normalize_path(&self.name);
        let views = Arc::new(self.views);
        let constructor = self.make.map(|make| {
            let type_name = name.clone();
            Arc::new(move || -> Result<Bean, InstantiationError> {
                let object = Arc::new(make().map_err(|source| {
                    InstantiationError::ConstructorFailed {
                        type_name: type_name.clone(),
                        source,
                    }
                })?);
                Ok(views
                    .iter()
                    .fold(Bean::new(object.clone()), |bean, view| view(bean, &object)))
            }) as ConstructorFn
        });

        TypeDescriptor {
            simple_name: NamingConventions::simple_type_name(&name).to_string(),
            module_path: NamingConventions::module_path(&name).to_string(),
            name,
            component: self.component,
            transactional: self.transactional,
            constructor,
            setters: self.setters,
            injections: self.injections,
        }
    }
}

fn assign_fn<T, C>(member: String, accessor: fn(&T) -> &Injected<C>) -> AssignFn
where
    T: Send + Sync + 'static,
    C: ?Sized + Send + Sync + 'static,
{
    Arc::new(move |target: &Bean, value: Option<&Bean>| {
        let this = target
            .downcast::<T>()
            .ok_or_else(|| ReflectionAccessError::TargetTypeMismatch {
                member: member.clone(),
                expected: type_name::<T>().to_string(),
                actual: target.type_name().to_string(),
            })?;

        let dependency = match value {
            Some(bean) => Some(bean.capability::<C>().ok_or_else(|| {
                ReflectionAccessError::IncompatibleValue {
                    member: member.clone(),
                    expected: type_name::<C>().to_string(),
                    actual: bean.type_name().to_string(),
                }
            })?),
            None => None,
        };

        accessor(this.as_ref()).set(dependency);
        Ok(())
    })
}
