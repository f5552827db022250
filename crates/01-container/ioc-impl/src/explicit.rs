//! 显式装配
//!
//! 按配置文档中的组件定义创建实例并装配属性引用。分两个阶段：
//! 阶段 A 实例化全部定义；阶段 B 再逐个调用 `set<Name>` setter。
//! 阶段 B 开始前所有定义都已完成实例化，因此属性可以引用文档中靠后的组件。

use crate::registry::BeanRegistry;
use crate::report::Diagnostics;
use ioc_abstractions::TypeResolver;
use ioc_common::{
    BeanDefinition, BootstrapError, BootstrapPhase, MissingRefPolicy, PropertyReference,
    ReflectionAccessError, TypeDescriptor,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 显式装配结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExplicitOutcome {
    /// 成功实例化的组件数量
    pub instantiated: usize,
    /// 成功调用的 setter 数量
    pub properties_wired: usize,
}

/// 显式装配阶段
pub struct ExplicitWiringPass {
    resolver: Arc<dyn TypeResolver>,
    missing_ref: MissingRefPolicy,
}

impl ExplicitWiringPass {
    /// 使用指定的类型解析器创建
    pub fn new(resolver: Arc<dyn TypeResolver>) -> Self {
        Self {
            resolver,
            missing_ref: MissingRefPolicy::default(),
        }
    }

    /// 设置引用缺失策略
    pub fn with_missing_ref_policy(mut self, policy: MissingRefPolicy) -> Self {
        self.missing_ref = policy;
        self
    }

    /// 执行显式装配
    pub fn run(
        &self,
        definitions: &[BeanDefinition],
        registry: &mut BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<ExplicitOutcome, BootstrapError> {
        info!("显式装配开始: {} 个组件定义", definitions.len());

        let (instantiated, descriptors) = self.instantiate_all(definitions, registry, diagnostics)?;
        let properties_wired = self.wire_all(definitions, &descriptors, registry, diagnostics)?;

        info!(
            "显式装配完成: 实例化 {} 个组件, 装配 {} 个属性",
            instantiated, properties_wired
        );
        Ok(ExplicitOutcome {
            instantiated,
            properties_wired,
        })
    }

    /// 阶段 A：实例化
    fn instantiate_all(
        &self,
        definitions: &[BeanDefinition],
        registry: &mut BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<(usize, HashMap<String, Arc<TypeDescriptor>>), BootstrapError> {
        let mut descriptors = HashMap::new();
        let mut instantiated = 0;

        for definition in definitions {
            let descriptor = match self.resolver.resolve(&definition.type_ref) {
                Ok(descriptor) => descriptor,
                Err(source) => {
                    diagnostics.record(BootstrapError::ClassResolution {
                        bean_id: definition.id.clone(),
                        source,
                    })?;
                    continue;
                }
            };

            match descriptor.instantiate() {
                Ok(bean) => {
                    debug!("实例化组件 {} ({})", definition.id, descriptor.name());
                    registry.insert(definition.id.clone(), bean);
                    descriptors.insert(definition.id.clone(), descriptor);
                    instantiated += 1;
                }
                Err(source) => {
                    diagnostics.record(BootstrapError::Instantiation {
                        bean_id: definition.id.clone(),
                        phase: BootstrapPhase::Instantiation,
                        source,
                    })?;
                }
            }
        }

        Ok((instantiated, descriptors))
    }

    /// 阶段 B：属性装配
    fn wire_all(
        &self,
        definitions: &[BeanDefinition],
        descriptors: &HashMap<String, Arc<TypeDescriptor>>,
        registry: &BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<usize, BootstrapError> {
        let mut wired = 0;

        for definition in definitions.iter().filter(|d| !d.properties.is_empty()) {
            let (Some(target), Some(descriptor)) =
                (registry.get(&definition.id), descriptors.get(&definition.id))
            else {
                warn!("组件 {} 未能实例化，跳过属性装配", definition.id);
                continue;
            };

            for property in &definition.properties {
                if self.wire_property(definition, property, descriptor, target, registry, diagnostics)? {
                    wired += 1;
                }
            }
        }

        Ok(wired)
    }

    fn wire_property(
        &self,
        definition: &BeanDefinition,
        property: &PropertyReference,
        descriptor: &TypeDescriptor,
        target: &ioc_common::Bean,
        registry: &BeanRegistry,
        diagnostics: &mut Diagnostics,
    ) -> Result<bool, BootstrapError> {
        let Some(setter) = descriptor.find_setter(&property.name) else {
            warn!(
                "组件 {} 没有匹配 set{} 的 setter，跳过",
                definition.id, property.name
            );
            return Ok(false);
        };

        let value = registry.get(&property.reference);
        if value.is_none() {
            match self.missing_ref {
                MissingRefPolicy::InjectAbsent => {
                    warn!(
                        "组件 {} 引用的 {} 不存在，注入空值",
                        definition.id, property.reference
                    );
                }
                MissingRefPolicy::Skip => {
                    warn!(
                        "组件 {} 引用的 {} 不存在，跳过注入",
                        definition.id, property.reference
                    );
                    return Ok(false);
                }
                MissingRefPolicy::Fail => {
                    diagnostics.record(BootstrapError::ReflectionAccess {
                        bean_id: definition.id.clone(),
                        phase: BootstrapPhase::PropertyWiring,
                        source: ReflectionAccessError::MissingReference {
                            member: setter.name().to_string(),
                            reference: property.reference.clone(),
                        },
                    })?;
                    return Ok(false);
                }
            }
        }

        match setter.invoke(target, value) {
            Ok(()) => {
                debug!(
                    "装配 {}.{} <- {}",
                    definition.id,
                    setter.name(),
                    property.reference
                );
                Ok(true)
            }
            Err(source) => {
                diagnostics.record(BootstrapError::ReflectionAccess {
                    bean_id: definition.id.clone(),
                    phase: BootstrapPhase::PropertyWiring,
                    source,
                })?;
                Ok(false)
            }
        }
    }
}
