//! Type helper utilities for syn type analysis.

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// `String` or `std::string::String`.
pub fn is_string(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else {
        return false;
    };
    type_path.qself.is_none()
        && type_path
            .path
            .segments
            .last()
            .is_some_and(|seg| seg.ident == "String" && seg.arguments.is_none())
}

/// How a sort field is stored on the struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextShape {
    /// `String`
    Owned,
    /// `Option<String>`
    Optional,
}

pub fn text_shape(ty: &syn::Type) -> Option<TextShape> {
    if is_string(ty) {
        return Some(TextShape::Owned);
    }
    option_inner(ty).filter(|inner| is_string(inner)).map(|_| TextShape::Optional)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_option_inner() {
        let ty: syn::Type = parse_quote!(Option<String>);
        assert!(option_inner(&ty).is_some());

        let ty: syn::Type = parse_quote!(std::option::Option<i32>);
        assert!(option_inner(&ty).is_some());

        let ty: syn::Type = parse_quote!(String);
        assert!(option_inner(&ty).is_none());

        let ty: syn::Type = parse_quote!(Vec<String>);
        assert!(option_inner(&ty).is_none());
    }

    #[test]
    fn test_text_shape() {
        let ty: syn::Type = parse_quote!(String);
        assert_eq!(text_shape(&ty), Some(TextShape::Owned));

        let ty: syn::Type = parse_quote!(Option<std::string::String>);
        assert_eq!(text_shape(&ty), Some(TextShape::Optional));

        let ty: syn::Type = parse_quote!(Option<i32>);
        assert_eq!(text_shape(&ty), None);

        let ty: syn::Type = parse_quote!(&'static str);
        assert_eq!(text_shape(&ty), None);
    }
}
