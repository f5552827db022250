//! `#[derive(Bean)]` 实现

use crate::utils::{injected_inner, registration_fn_ident};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Error, Fields, Ident, LitStr, Meta, Path, Result, Type,
};

/// 类型级参数
#[derive(Default)]
struct BeanArgs {
    /// `None` 表示没有组件标记，`Some(None)` 表示按约定推导 id
    component: Option<Option<String>>,
    transactional: bool,
    exposes: Vec<Type>,
    name: Option<String>,
    constructor: Option<Path>,
    no_default: bool,
}

impl BeanArgs {
    fn from_attributes(attrs: &[Attribute]) -> Result<Self> {
        let mut args = Self::default();

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("bean")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("component") {
                    args.component = Some(if meta.input.peek(syn::Token![=]) {
                        Some(meta.value()?.parse::<LitStr>()?.value())
                    } else {
                        None
                    });
                } else if meta.path.is_ident("transactional") {
                    args.transactional = true;
                } else if meta.path.is_ident("exposes") {
                    args.exposes.push(meta.value()?.parse::<Type>()?);
                } else if meta.path.is_ident("name") {
                    args.name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("constructor") {
                    args.constructor = Some(meta.value()?.parse::<Path>()?);
                } else if meta.path.is_ident("no_default") {
                    args.no_default = true;
                } else {
                    return Err(meta.error("未知的 bean 参数"));
                }
                Ok(())
            })?;
        }

        if args.no_default && args.constructor.is_some() {
            return Err(Error::new_spanned(
                &attrs[0],
                "no_default 与 constructor 不能同时使用",
            ));
        }

        Ok(args)
    }
}

/// 字段注入方式
enum FieldRole {
    Inject { qualifier: Option<String> },
    Property { setter: Option<String> },
}

struct WiredField<'a> {
    ident: &'a Ident,
    dependency: &'a Type,
    roles: Vec<FieldRole>,
}

fn field_roles(attrs: &[Attribute]) -> Result<Vec<FieldRole>> {
    let mut roles = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("inject") {
            let mut qualifier = None;
            if !matches!(attr.meta, Meta::Path(_)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("id") {
                        qualifier = Some(meta.value()?.parse::<LitStr>()?.value());
                        Ok(())
                    } else {
                        Err(meta.error("未知的 inject 参数"))
                    }
                })?;
            }
            roles.push(FieldRole::Inject { qualifier });
        } else if attr.path().is_ident("property") {
            let mut setter = None;
            if !matches!(attr.meta, Meta::Path(_)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("setter") {
                        setter = Some(meta.value()?.parse::<LitStr>()?.value());
                        Ok(())
                    } else {
                        Err(meta.error("未知的 property 参数"))
                    }
                })?;
            }
            roles.push(FieldRole::Property { setter });
        }
    }

    Ok(roles)
}

fn wired_fields(input: &DeriveInput) -> Result<Vec<WiredField<'_>>> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "#[derive(Bean)] 只支持结构体"));
    };

    let Fields::Named(fields) = &data.fields else {
        return Ok(Vec::new());
    };

    let mut wired = Vec::new();
    for field in &fields.named {
        let roles = field_roles(&field.attrs)?;
        if roles.is_empty() {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        wired.push(WiredField {
            ident,
            dependency: injected_inner(&field.ty)?,
            roles,
        });
    }
    Ok(wired)
}

/// 生成描述符与注册代码
pub fn expand_bean(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Bean)] 不支持泛型结构体",
        ));
    }

    let args = BeanArgs::from_attributes(&input.attrs)?;
    if args.transactional && args.exposes.is_empty() {
        return Err(Error::new_spanned(
            &input.ident,
            "transactional 组件至少需要一个 exposes = dyn Trait",
        ));
    }

    let struct_name = &input.ident;
    let struct_name_string = struct_name.to_string();

    let name = match &args.name {
        Some(name) => quote! { #name },
        None => quote! { concat!(module_path!(), "::", #struct_name_string) },
    };

    let component = match &args.component {
        Some(Some(id)) => quote! { .component_named(#id) },
        Some(None) => quote! { .component() },
        None => quote! {},
    };

    let transactional = if args.transactional {
        quote! { .transactional() }
    } else {
        quote! {}
    };

    let constructor = match (&args.constructor, args.no_default) {
        (Some(path), _) => quote! { .constructor(#path) },
        (None, true) => quote! {},
        (None, false) => quote! { .default_constructor() },
    };

    let exposes = args.exposes.iter().map(|capability| {
        if args.transactional {
            quote! { .exposes_transactional::<#capability>(|this| this) }
        } else {
            quote! { .exposes::<#capability>(|this| this) }
        }
    });

    let fields = wired_fields(input)?;
    let wiring = fields.iter().flat_map(|field| {
        let ident = field.ident;
        let dependency = field.dependency;
        let field_name = ident.to_string();
        field.roles.iter().map(move |role| match role {
            FieldRole::Inject { qualifier: Some(id) } => quote! {
                .inject_qualified::<#dependency>(#field_name, #id, |this| &this.#ident)
            },
            FieldRole::Inject { qualifier: None } => quote! {
                .inject::<#dependency>(#field_name, |this| &this.#ident)
            },
            FieldRole::Property { setter } => {
                let setter = setter
                    .clone()
                    .unwrap_or_else(|| format!("set_{}", field_name));
                quote! {
                    .setter::<#dependency>(#setter, |this| &this.#ident)
                }
            }
        })
    });

    let register_fn = registration_fn_ident(struct_name);

    Ok(quote! {
        impl ::ioc_common::BeanType for #struct_name {
            fn descriptor() -> ::ioc_common::TypeDescriptor {
                ::ioc_common::TypeDescriptor::builder::<Self>()
                    .named(#name)
                    #component
                    #transactional
                    #constructor
                    #(#exposes)*
                    #(#wiring)*
                    .build()
            }
        }

        // 使用 ctor 在程序启动时注册到全局类型目录
        #[doc(hidden)]
        #[allow(non_snake_case)]
        #[::ctor::ctor]
        fn #register_fn() {
            ::ioc_common::TypeCatalog::global()
                .register_type::<#struct_name>();
        }
    })
}
