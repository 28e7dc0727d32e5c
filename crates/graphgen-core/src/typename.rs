//! Typename and type path string utilities.
//!
//! A type path is absolute and slash delimited (`/std/vector`). Instance paths
//! carry their resolved parameters (`/std/vector</render/Pass>`). A dependent
//! name is relative and is resolved against a scope by the resolver.

use crate::{Error, Result};

fn is_tight(c: char) -> bool {
    matches!(c, ',' | '<' | '>' | '/' | '=' | '&' | '*' | '[' | ']')
}

/// Strips surrounding whitespace and wrapping parentheses.
pub fn remove_parenthesis(name: &str) -> &str {
    let mut name = name.trim();
    while name.len() >= 2 && name.starts_with('(') && name.ends_with(')') {
        name = name[1..name.len() - 1].trim();
    }
    name
}

/// Normalizes a user typename: `::` becomes `/`, whitespace is collapsed and
/// dropped around punctuation.
pub fn convert_typename(name: &str) -> String {
    let replaced = name.replace("::", "/").replace(['\t', '\n', '\r'], " ");
    let chars: Vec<char> = remove_parenthesis(&replaced).chars().collect();
    let mut out = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = out.chars().last();
            let next = chars.get(i + 1).copied();
            if prev.is_none_or(|p| p == ' ' || is_tight(p))
                || next.is_none_or(|n| n == ' ' || is_tight(n))
            {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Returns false for names that cannot be a converted typename.
pub fn validate_typename(name: &str) -> bool {
    if name.contains("::") || name.contains(['\t', '\n', '\r', '{', '}', '[', ']']) {
        return false;
    }
    let mut parens = 0i32;
    let mut angles = 0i32;
    for c in name.chars() {
        match c {
            '(' => parens += 1,
            ')' => parens -= 1,
            '<' => angles += 1,
            '>' => angles -= 1,
            _ => {}
        }
        if parens < 0 || angles < 0 {
            return false;
        }
    }
    parens == 0 && angles == 0
}

pub fn validate(name: &str) -> Result<()> {
    if validate_typename(name) {
        Ok(())
    } else {
        Err(Error::InvalidTypename(name.to_owned()))
    }
}

/// Path of the enclosing scope; empty for a root level path.
pub fn parent_path(path: &str) -> &str {
    let head = path.split_once('<').map_or(path, |(head, _)| head);
    let head = head.strip_suffix('/').unwrap_or(head);
    match head.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

pub fn is_type_path(name: &str) -> bool {
    name.is_empty() || name.starts_with('/')
}

pub fn is_instance(name: &str) -> bool {
    name.ends_with('>')
}

/// Template part of an instance name: `vector<int>` gives `vector`.
pub fn get_template_name(instance: &str) -> Result<&str> {
    match instance.find('<') {
        Some(pos) if is_instance(instance) => Ok(&instance[..pos]),
        _ => Err(Error::InvalidTypename(instance.to_owned())),
    }
}

/// Splits `tmpl<a, b<c, d>>` into `tmpl` and the top level parameters.
pub fn extract_template(instance: &str) -> Result<(&str, Vec<&str>)> {
    let name = get_template_name(instance)?;
    let inner = &instance[name.len() + 1..instance.len() - 1];

    let mut params = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                params.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        if depth < 0 {
            return Err(Error::InvalidTypename(instance.to_owned()));
        }
    }
    if depth != 0 {
        return Err(Error::InvalidTypename(instance.to_owned()));
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        params.push(last);
    }
    Ok((name, params))
}

/// Last path segment. Parameters of an instance stay attached.
pub fn extract_name(path: &str) -> &str {
    let head = path.split_once('<').map_or(path, |(head, _)| head);
    match head.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// Splits an absolute path into its parent scope and last segment.
pub fn split_type_path(path: &str) -> (&str, &str) {
    let parent = parent_path(path);
    (parent, extract_name(path))
}

/// Shortest relative form of `type_path` as seen from `scope`.
///
/// Only strips the shared namespace prefix; instance parameters are handled
/// by the resolver.
pub fn get_dependent_path<'a>(scope: &str, type_path: &'a str) -> &'a str {
    if scope.is_empty() || !type_path.starts_with('/') {
        return type_path;
    }
    let mut pos = 1;
    while pos < scope.len() {
        if pos > type_path.len() {
            return &type_path[1..];
        }
        let end0 = scope[pos..].find('/').map(|i| i + pos);
        let end1 = type_path[pos..].find('/').map(|i| i + pos);
        let ns0 = &scope[pos..end0.unwrap_or(scope.len())];
        let ns1 = &type_path[pos..end1.unwrap_or(type_path.len())];
        if ns0 != ns1 {
            return &type_path[pos..];
        }
        match (end0, end1) {
            (None, None) => return "",
            (None, Some(end1)) => return &type_path[end1 + 1..],
            (Some(end0), _) => pos = end0 + 1,
        }
    }
    type_path
}

/// Qualifiers peeled from a member or parameter typename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifiers {
    pub is_const: bool,
    pub is_volatile: bool,
    pub pointer: bool,
    pub reference: bool,
}

impl Qualifiers {
    /// Reattaches the qualifiers to a resolved name.
    pub fn apply(&self, name: &str) -> String {
        let mut out = String::new();
        if self.is_const {
            out.push_str("const ");
        }
        if self.is_volatile {
            out.push_str("volatile ");
        }
        out.push_str(name);
        if self.pointer {
            out.push('*');
        }
        if self.reference {
            out.push('&');
        }
        out
    }
}

/// Peels `const `/`volatile ` prefixes and `&`/`*` suffixes.
pub fn peel_qualifiers(name: &str) -> Result<(Qualifiers, &str)> {
    let mut q = Qualifiers::default();
    let mut rest = name.trim();
    if let Some(stripped) = rest.strip_prefix("const ") {
        q.is_const = true;
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix("volatile ") {
        q.is_volatile = true;
        rest = stripped.trim_start();
    }
    if q.is_const && q.is_volatile {
        return Err(Error::ConstVolatile(name.to_owned()));
    }
    if rest.starts_with("const ") {
        return Err(Error::ConstVolatile(name.to_owned()));
    }
    if let Some(stripped) = rest.strip_suffix('&') {
        q.reference = true;
        rest = stripped.trim_end();
    }
    if let Some(stripped) = rest.strip_suffix('*') {
        q.pointer = true;
        rest = stripped.trim_end();
    }
    Ok((q, rest))
}

pub fn remove_cv_pointer_ref(name: &str) -> Result<&str> {
    peel_qualifiers(name).map(|(_, rest)| rest)
}

/// C++ spelling of a type path: `/std/pmr/string` gives `std::pmr::string`.
pub fn get_cpp_path(type_path: &str) -> String {
    type_path
        .strip_prefix('/')
        .unwrap_or(type_path)
        .replace('/', "::")
}

/// Joins a scope path and a relative name.
pub fn join_path(scope: &str, name: &str) -> String {
    let mut path = String::with_capacity(scope.len() + name.len() + 1);
    path.push_str(scope);
    path.push('/');
    path.push_str(name);
    path
}
