//! Identifier conventions shared by the emitters.
//!
//! Members are declared as `mName`. Constructor parameters become `nameIn`,
//! public TypeScript fields `name`, private ones `_name`.

use crate::{Error, Result};

/// Lowercases a leading run of capitals, keeping the last one when it
/// starts a word: `UIName` gives `uiName`, `Pass` gives `pass`.
pub fn camel_to_variable(name: &str) -> String {
    let mut chars: Vec<char> = name.chars().collect();
    let n = chars.len();
    for i in 0..n {
        if !chars[i].is_ascii_uppercase() {
            break;
        }
        let next_upper = chars.get(i + 1).is_some_and(|c| c.is_ascii_uppercase());
        if i == 0 || next_upper || i + 1 == n {
            chars[i] = chars[i].to_ascii_lowercase();
        } else {
            break;
        }
    }
    chars.into_iter().collect()
}

fn member_stem(member: &str) -> Result<&str> {
    match member.strip_prefix('m') {
        Some(stem) if !stem.is_empty() => Ok(stem),
        _ => Err(Error::InvalidMemberName(member.to_owned())),
    }
}

/// `mPassID` gives `passIDIn`.
pub fn get_parameter_name(member: &str) -> Result<String> {
    let mut name = camel_to_variable(member_stem(member)?);
    name.push_str("In");
    Ok(name)
}

/// Lowercases the first character of a type name.
pub fn get_variable_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Tags are declared with a trailing underscore (`Render_`).
pub fn convert_tag(tag: &str) -> &str {
    tag.strip_suffix('_').unwrap_or(tag)
}

pub fn get_tag_type(tag: &str) -> String {
    format!("{}Tag", convert_tag(tag))
}

pub fn get_typescript_tag_type(tag: &str) -> &str {
    convert_tag(tag)
}

pub fn get_tag_variable_name(tag: &str) -> String {
    get_variable_name(convert_tag(tag))
}

/// Field name as seen from TypeScript or a public accessor.
///
/// Public `mPassID` gives `passID`, private gives `_passID`.
pub fn get_member_name(member: &str, public: bool) -> Result<String> {
    let stem = get_variable_name(member_stem(member)?);
    Ok(if public { stem } else { format!("_{stem}") })
}

/// Relative import path from file `current` to file `target`.
///
/// Both are slash separated and relative to the same output root.
pub fn get_relative_path(current: &str, target: &str) -> String {
    let current_dir = current.rfind('/').map_or("", |pos| &current[..pos]);
    let (target_dir, target_file) = match target.rfind('/') {
        Some(pos) => (&target[..pos], &target[pos + 1..]),
        None => ("", target),
    };
    let cur: Vec<&str> = current_dir.split('/').filter(|s| !s.is_empty()).collect();
    let tgt: Vec<&str> = target_dir.split('/').filter(|s| !s.is_empty()).collect();
    let common = cur.iter().zip(&tgt).take_while(|(a, b)| a == b).count();

    let mut path = String::new();
    if common == cur.len() {
        path.push_str("./");
    } else {
        for _ in common..cur.len() {
            path.push_str("../");
        }
    }
    for segment in &tgt[common..] {
        path.push_str(segment);
        path.push('/');
    }
    path.push_str(target_file);
    path
}

/// Convert snake_case, kebab-case or a path segment to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if matches!(c, '_' | '-' | '.' | '/' | ' ') {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}
