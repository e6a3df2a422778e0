//! Artifact ids and Rust identifiers for generated code

use heck::{ToSnakeCase, ToUpperCamelCase};
use sha2::{Digest, Sha256};

use crate::{GenerationError, GenerationResult};

/// Default module path of the generated code
pub const DEFAULT_NAMESPACE: &str = "crate::generated";

const RESERVED: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Module name of the factory for `type_name`.
///
/// The snake_case form of the name is suffixed with the first 8 hex digits
/// of its SHA-256, so distinct type ids never share a module even when
/// their readable parts agree.
pub fn artifact_id(type_name: &str) -> String {
    let digest = Sha256::digest(type_name.as_bytes());
    let hash = hex::encode(&digest[..4]);

    let readable = sanitize(&type_name.to_snake_case());
    let readable = match readable.chars().next() {
        None => "anonymous".to_string(),
        Some(c) if c.is_ascii_digit() => format!("t_{}", readable),
        Some(_) => readable,
    };
    format!("{}_{}", readable, hash)
}

/// Struct name of the factory for `type_name`
pub fn factory_struct_name(type_name: &str) -> String {
    let readable = sanitize(&type_name.to_upper_camel_case());
    match readable.chars().next() {
        None => "AnonymousFactory".to_string(),
        Some(c) if c.is_ascii_digit() => format!("T{}Factory", readable),
        Some(_) => format!("{}Factory", readable),
    }
}

/// Relative path of a factory artifact
pub fn artifact_path(artifact_id: &str) -> String {
    format!("factory/{}.rs", artifact_id)
}

/// Checks that `namespace` is a module path usable in generated `use` items
pub fn validate_namespace(namespace: &str) -> GenerationResult<()> {
    let valid = !namespace.is_empty()
        && namespace.split("::").enumerate().all(|(i, segment)| {
            let path_root = matches!(segment, "crate" | "self" | "super");
            (path_root && (i == 0 || segment == "super"))
                || (is_identifier(segment) && !RESERVED.contains(&segment))
        });

    if valid {
        Ok(())
    } else {
        Err(GenerationError::InvalidNamespace(namespace.to_string()))
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    segment != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
