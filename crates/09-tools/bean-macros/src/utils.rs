//! 宏工具函数

use proc_macro2::Span;
use syn::{Error, GenericArgument, Ident, PathArguments, Result, Type};

/// 从类型中提取第一个泛型参数
pub fn extract_generic_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// 检查类型是否为 `Injected<T>`，返回 `T`
pub fn injected_inner(ty: &Type) -> Result<&Type> {
    let is_injected = match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Injected"),
        _ => false,
    };

    match extract_generic_type(ty) {
        Some(inner) if is_injected => Ok(inner),
        _ => Err(Error::new_spanned(
            ty,
            "带 #[inject] 或 #[property] 的字段类型必须是 Injected<T>",
        )),
    }
}

/// 驼峰转蛇形：`TransferService` → `transfer_service`
pub fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (index, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if index > 0 {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
        } else {
            snake.push(ch);
        }
    }
    snake
}

/// 生成注册函数名称
pub fn registration_fn_ident(struct_name: &Ident) -> Ident {
    Ident::new(
        &format!("__register_bean_{}", to_snake_case(&struct_name.to_string())),
        Span::call_site(),
    )
}
