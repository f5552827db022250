//! 注解扫描装配
//!
//! 对每个扫描根依次执行：
//!
//! 1. 组件发现：实例化（或复用已注册的）全部组件类型，然后再为它们注入字段，
//!    同一扫描根内的组件之间互相引用不受扫描顺序影响；
//! 2. 事务装饰：用注册在 `proxyFactory` 下的代理工厂包装事务类型，覆盖原有注册。
//!
//! 字段注入发生在事务装饰之前，所以扫描组件持有的是被装饰目标本身，
//! 通过 `lookup` 取得的才是代理。

use crate::registry::BeanRegistry;
use crate::report::Diagnostics;
use ioc_abstractions::{ClassScanner, ProxyFactory, PROXY_FACTORY_ID};
use ioc_common::{
    Bean, BootstrapError, BootstrapPhase, Marker, MissingRefPolicy, ProxyError,
    ReflectionAccessError, ScanRoot, TypeDescriptor,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 扫描装配结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// 发现并注册（或复用）的组件数量
    pub components: usize,
    /// 注入成功的字段数量
    pub fields_injected: usize,
    /// 被事务代理替换的组件数量
    pub decorated: usize,
}

impl ScanOutcome {
    fn absorb(&mut self, other: ScanOutcome) {
        self.components += other.components;
        self.fields_injected += other.fields_injected;
        self.decorated += other.decorated;
    }
}

/// 注解扫描阶段
pub struct AnnotationScanPass {
    scanner: Arc<dyn ClassScanner>,
    missing_ref: MissingRefPolicy,
}

impl AnnotationScanPass {
    /// 使用指定的扫描器创建
    pub fn new(scanner: Arc<dyn ClassScanner>) -> Self {
        Self {
            scanner,
            missing_ref: MissingRefPolicy::default(),
        }
    }

    /// 设置依赖缺失策略
    pub fn with_missing_ref_policy(mut self, policy: MissingRefPolicy) -> Self {
        self.missing_ref = policy;
        self
    }

    /// 按顺序处理全部扫描根
    pub fn run(
        &self,
        roots: &[ScanRoot],
        registry: &mut BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<ScanOutcome, BootstrapError> {
        let mut outcome = ScanOutcome::default();
        for root in roots {
            outcome.absorb(self.run_root(root, registry, diagnostics)?);
        }
        info!(
            "扫描装配完成: {} 个组件, {} 个字段, {} 个事务代理",
            outcome.components, outcome.fields_injected, outcome.decorated
        );
        Ok(outcome)
    }

    fn run_root(
        &self,
        root: &ScanRoot,
        registry: &mut BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<ScanOutcome, BootstrapError> {
        info!("扫描根: {}", root.package_path);
        let mut outcome = ScanOutcome::default();

        if let Some(components) = self.scan(root, Marker::Component, diagnostics)? {
            let discovered = self.discover(&components, registry, diagnostics)?;
            outcome.components = discovered.len();
            outcome.fields_injected = self.inject_fields(&discovered, registry, diagnostics)?;
        }

        if let Some(transactional) = self.scan(root, Marker::Transactional, diagnostics)? {
            outcome.decorated = self.decorate(&transactional, registry, diagnostics)?;
        }

        Ok(outcome)
    }

    fn scan(
        &self,
        root: &ScanRoot,
        marker: Marker,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Vec<Arc<TypeDescriptor>>>, BootstrapError> {
        match self.scanner.scan(&root.package_path, marker) {
            Ok(found) => Ok(Some(found)),
            Err(source) => {
                diagnostics.record(BootstrapError::Scan {
                    root: root.package_path.clone(),
                    source,
                })?;
                Ok(None)
            }
        }
    }

    /// 子阶段 1a：实例化或复用
    fn discover(
        &self,
        components: &[Arc<TypeDescriptor>],
        registry: &mut BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<(String, Arc<TypeDescriptor>, Bean)>, BootstrapError> {
        let mut discovered = Vec::with_capacity(components.len());

        for descriptor in components {
            let id = descriptor.component_id();

            if let Some(existing) = registry.get(&id) {
                debug!("复用已注册的组件 {} ({})", id, existing.type_name());
                discovered.push((id, descriptor.clone(), existing.clone()));
                continue;
            }

            match descriptor.instantiate() {
                Ok(bean) => {
                    debug!("发现组件 {} ({})", id, descriptor.name());
                    registry.insert(id.clone(), bean.clone());
                    discovered.push((id, descriptor.clone(), bean));
                }
                Err(source) => {
                    diagnostics.record(BootstrapError::Instantiation {
                        bean_id: id,
                        phase: BootstrapPhase::ComponentDiscovery,
                        source,
                    })?;
                }
            }
        }

        Ok(discovered)
    }

    /// 子阶段 1b：字段注入
    fn inject_fields(
        &self,
        discovered: &[(String, Arc<TypeDescriptor>, Bean)],
        registry: &BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<usize, BootstrapError> {
        let mut injected = 0;

        for (id, descriptor, bean) in discovered {
            if bean.is_decorated() {
                debug!("组件 {} 已被事务代理替换，跳过字段注入", id);
                continue;
            }

            for point in descriptor.injections() {
                let dependency_id = point.dependency_id();
                let value = registry.get(&dependency_id);

                if value.is_none() {
                    match self.missing_ref {
                        MissingRefPolicy::InjectAbsent => {
                            warn!("{}.{} 依赖的 {} 不存在，注入空值", id, point.field(), dependency_id);
                        }
                        MissingRefPolicy::Skip => {
                            warn!("{}.{} 依赖的 {} 不存在，跳过", id, point.field(), dependency_id);
                            continue;
                        }
                        MissingRefPolicy::Fail => {
                            diagnostics.record(BootstrapError::ReflectionAccess {
                                bean_id: id.clone(),
                                phase: BootstrapPhase::FieldInjection,
                                source: ReflectionAccessError::MissingReference {
                                    member: point.field().to_string(),
                                    reference: dependency_id,
                                },
                            })?;
                            continue;
                        }
                    }
                }

                match point.assign(bean, value) {
                    Ok(()) => {
                        debug!("注入 {}.{} <- {}", id, point.field(), dependency_id);
                        injected += 1;
                    }
                    Err(source) => {
                        diagnostics.record(BootstrapError::ReflectionAccess {
                            bean_id: id.clone(),
                            phase: BootstrapPhase::FieldInjection,
                            source,
                        })?;
                    }
                }
            }
        }

        Ok(injected)
    }

    /// 子阶段 2：事务装饰
    fn decorate(
        &self,
        transactional: &[Arc<TypeDescriptor>],
        registry: &mut BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<usize, BootstrapError> {
        let mut decorated = 0;

        for descriptor in transactional {
            // 事务标记始终按简单名称推导 id，组件标记上的显式 id 不参与
            let id = descriptor.convention_id();

            let target = match registry.get(&id) {
                Some(existing) => existing.clone(),
                None => match descriptor.instantiate() {
                    Ok(bean) => bean,
                    Err(source) => {
                        diagnostics.record(BootstrapError::Instantiation {
                            bean_id: id,
                            phase: BootstrapPhase::TransactionalDecoration,
                            source,
                        })?;
                        continue;
                    }
                },
            };

            if target.is_decorated() {
                debug!("组件 {} 已经是事务代理，不重复包装", id);
                continue;
            }

            match Self::wrap(registry, &target) {
                Ok(proxy) => {
                    info!("组件 {} 已替换为事务代理", id);
                    registry.insert(id, proxy);
                    decorated += 1;
                }
                Err(source) => {
                    diagnostics.record(BootstrapError::Proxy { bean_id: id, source })?;
                }
            }
        }

        Ok(decorated)
    }

    fn wrap(registry: &BeanRegistry, target: &Bean) -> Result<Bean, ProxyError> {
        let factory_bean = registry
            .get(PROXY_FACTORY_ID)
            .ok_or_else(|| ProxyError::FactoryMissing {
                id: PROXY_FACTORY_ID.to_string(),
            })?;
        let factory = factory_bean
            .capability::<dyn ProxyFactory>()
            .ok_or_else(|| ProxyError::FactoryNotCapable {
                id: PROXY_FACTORY_ID.to_string(),
                actual: factory_bean.type_name().to_string(),
            })?;
        factory.wrap(target)
    }
}
