//! Script engine bindings.
//!
//! `Jsb.h`/`Jsb.cpp` convert flagged structs and tag variants between native
//! values and `se::Value`; structs become plain objects keyed by their
//! TypeScript field names, tag variants become their alternative index.
//! The ToJs ini drives the bindings generator over `Types.h`.

use graphgen_core::naming::{camel_to_variable, get_member_name};
use graphgen_core::syntax::{Composition, Member};
use graphgen_core::{Features, GenerationFlags, Kind, VertexId};
use indexmap::IndexSet;

use crate::cpp::{CppContext, include};
use crate::{CodeWriter, Result};

/// One converted declaration.
enum Conversion<'a> {
    Object(&'a Composition),
    Index,
}

/// Flagged, concrete, root-level types in declaration order.
fn conversions<'a>(ctx: &CppContext<'a>) -> Vec<(VertexId, Conversion<'a>)> {
    let syntax = ctx.syntax;
    ctx.compiled
        .module_vertices(ctx.module_path)
        .filter(|&v| {
            syntax.is_jsb(v)
                && !syntax.has_flag(v, GenerationFlags::IMPL_DETAIL)
                && !syntax.is_interface(v)
                && !syntax.is_derived(v)
        })
        .filter_map(|v| match syntax.kind(v) {
            Kind::Struct(c) => Some((v, Conversion::Object(c))),
            Kind::Variant(_) if syntax.is_tag(v) => Some((v, Conversion::Index)),
            _ => None,
        })
        .collect()
}

fn cpp_name(ctx: &CppContext<'_>, v: VertexId) -> String {
    ctx.syntax.get_cpp_name("", v)
}

/// Property key of a member, as seen from scripts.
fn property_name(ctx: &CppContext<'_>, m: &Member) -> Result<String> {
    Ok(get_member_name(
        &m.member_name,
        m.public || !ctx.config.underscore_member_names,
    )?)
}

fn converted_members(c: &Composition) -> impl Iterator<Item = &Member> {
    c.members
        .iter()
        .filter(|m| !m.flags.contains(GenerationFlags::IMPL_DETAIL))
}

fn to_se_signature(name: &str) -> String {
    format!("bool nativevalue_to_se(const {name} &from, se::Value &to, se::Object *ctx)")
}

fn to_native_signature(name: &str) -> String {
    format!("bool sevalue_to_native(const se::Value &from, {name} *to, se::Object *ctx)")
}

/// `<prefix>Jsb.h`.
pub fn emit_jsb_header(ctx: &CppContext<'_>) -> Result<String> {
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line("#pragma once");
    include(&mut w, &ctx.config.jsb_header);
    include(&mut w, &ctx.module.file_path("Types.h"));

    let items = conversions(ctx);
    for (v, _) in &items {
        w.blank();
        w.line(format!("{}; // NOLINT", to_se_signature(&cpp_name(ctx, *v))));
    }
    for (v, _) in &items {
        w.blank();
        w.line(format!("{}; // NOLINT", to_native_signature(&cpp_name(ctx, *v))));
    }
    ctx.footer(&mut w);
    Ok(w.finish())
}

/// `<prefix>Jsb.cpp`.
pub fn emit_jsb_source(ctx: &CppContext<'_>) -> Result<String> {
    let items = conversions(ctx);
    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    include(&mut w, &ctx.module.file_path("Jsb.h"));
    if items.iter().any(|(_, c)| matches!(c, Conversion::Index)) {
        include(&mut w, &ctx.config.overload_header);
    }
    for dep in ctx.dependency_files(Features::JSB, "Jsb.h") {
        include(&mut w, &dep);
    }

    for (v, conversion) in &items {
        let name = cpp_name(ctx, *v);
        w.blank();
        w.open(format!("{} {{ // NOLINT", to_se_signature(&name)));
        match conversion {
            Conversion::Object(c) => emit_object_to_se(ctx, &mut w, c)?,
            Conversion::Index => {
                w.line("to.setInt32(static_cast<int32_t>(from.index()));");
                w.line("return true;");
            }
        }
        w.close("}");
    }

    for (v, conversion) in &items {
        let name = cpp_name(ctx, *v);
        let short = &ctx.syntax.vertex(*v).name;
        w.blank();
        w.open(format!("{} {{ // NOLINT", to_native_signature(&name)));
        match conversion {
            Conversion::Object(c) => {
                w.line(format!(
                    "SE_PRECONDITION2(from.isObject(), false, \" Convert parameter to {short} failed !\");"
                ));
                w.blank();
                w.line("auto *obj = const_cast<se::Object *>(from.toObject());");
                w.line("bool ok = true;");
                w.line("se::Value field;");
                for m in converted_members(c) {
                    w.line(format!(
                        "obj->getProperty(\"{}\", &field, true);",
                        property_name(ctx, m)?
                    ));
                    w.open("if (!field.isNullOrUndefined()) {");
                    w.line(format!("ok &= sevalue_to_native(field, &(to->{}), ctx);", m.member_name));
                    w.close("}");
                }
                w.line("return ok;");
            }
            Conversion::Index => {
                w.line(format!(
                    "SE_PRECONDITION2(from.isNumber(), false, \" Convert parameter to {short} failed !\");"
                ));
                w.line("size_t id = from.toInt32();");
                w.line(format!("*to = cc::variant_from_index<{name}>(id);"));
                w.line("return true;");
            }
        }
        w.close("}");
    }
    ctx.footer(&mut w);
    Ok(w.finish())
}

fn emit_object_to_se(ctx: &CppContext<'_>, w: &mut CodeWriter, c: &Composition) -> Result<()> {
    w.line("se::HandleObject obj(se::Object::createPlainObject());");
    if converted_members(c).next().is_some() {
        w.line("se::Value        tmp;");
    }
    for m in converted_members(c) {
        w.blank();
        w.line(format!("nativevalue_to_se(from.{}, tmp, ctx);", m.member_name));
        w.line(format!("obj->setProperty(\"{}\", tmp);", property_name(ctx, m)?));
    }
    w.blank();
    w.line("to.setObject(obj);");
    w.line("return true;");
    Ok(())
}

// ============================================================
// ToJs
// ============================================================

const TO_JS_PREFIX_HELP: &str = "\
# the prefix to be added to the generated functions. You might or might not use this in your own
# templates";

const TO_JS_NAMESPACE_HELP: &str = "\
# create a target namespace (in javascript, this would create some code like the equiv. to `ns = ns || {}`)
# all classes will be embedded in that namespace";

const TO_JS_TOOLCHAIN: &str = "\
macro_judgement  =

android_headers =

android_flags = -target armv7-none-linux-androideabi -D_LIBCPP_DISABLE_VISIBILITY_ANNOTATIONS -DANDROID -D__ANDROID_API__=14 -gcc-toolchain %(gcc_toolchain_dir)s --sysroot=%(androidndkdir)s/platforms/android-14/arch-arm  -idirafter %(androidndkdir)s/sources/android/support/include -idirafter %(androidndkdir)s/sysroot/usr/include -idirafter %(androidndkdir)s/sysroot/usr/include/arm-linux-androideabi -idirafter %(clangllvmdir)s/lib64/clang/5.0/include -I%(androidndkdir)s/sources/cxx-stl/llvm-libc++/include

clang_headers =
clang_flags = -nostdinc -x c++ -std=c++17 -fsigned-char -mfloat-abi=soft -U__SSE__

cocos_headers = -I%(cocosdir)s -I%(cocosdir)s/cocos -I%(cocosdir)s/cocos/renderer -I%(cocosdir)s/cocos/platform/android -I%(cocosdir)s/external/sources
cocos_flags = -DANDROID -DCC_PLATFORM=3 -DCC_PLATFORM_IOS=1 -DCC_PLATFORM_MACOS=4 -DCC_PLATFORM_WINDOWS=2 -DCC_PLATFORM_ANDROID=3


cxxgenerator_headers =

# extra arguments for clang
extra_arguments = %(android_headers)s %(clang_headers)s %(cxxgenerator_headers)s %(cocos_headers)s %(android_flags)s %(clang_flags)s %(cocos_flags)s %(extra_flags)s

# what headers to parse";

const TO_JS_CLASSES_HELP: &str = "\
replace_headers =

# what classes to produce code for. You can use regular expressions here. When testing the regular
# expression, it will be enclosed in \"^$\", like this: \"^Menu.*$\".
";

const TO_JS_SKIP_HELP: &str = "\
classes_need_extend =

# what should we skip? in the format ClassName::[function function]
# ClassName is a regular expression, but will be used like this: \"^ClassName$\" functions are also
# regular expressions, they will not be surrounded by \"^$\". If you want to skip a whole class, just
# add a single \"*\" as functions. See bellow for several examples. A special class name is \"*\", which
# will apply to all class names. This is a convenience wildcard to be able to skip similar named
# functions from all classes.
";

const TO_JS_RENAMES: &str = "\
rename_functions =

rename_classes =

# for all class names, should we remove something when registering in the target VM?
remove_prefix =

# classes for which there will be no \"parent\" lookup
classes_have_no_parents =

# base classes which will be skipped when their sub-classes found them.
base_classes_to_skip =

# classes that create no constructor
# Set is special and we will use a hand-written constructor";

const TO_JS_TAIL: &str = "\
persistent_classes =

classes_owned_by_cpp =

obtain_return_value =";

/// Bound compositions of the module.
fn bound(ctx: &CppContext<'_>) -> Vec<VertexId> {
    let syntax = ctx.syntax;
    ctx.compiled
        .module_vertices(ctx.module_path)
        .filter(|&v| syntax.is_composition(v) && !syntax.has_flag(v, GenerationFlags::IMPL_DETAIL))
        .collect()
}

/// `Name::[a b]` over the struct methods `select` keeps, or `None`.
fn method_list(
    ctx: &CppContext<'_>,
    v: VertexId,
    select: impl Fn(&graphgen_core::syntax::Method) -> Option<String>,
) -> Option<String> {
    let Kind::Struct(c) = ctx.syntax.kind(v) else {
        return None;
    };
    let names: IndexSet<String> = c.methods.iter().filter_map(select).collect();
    if names.is_empty() {
        return None;
    }
    let joined: Vec<&str> = names.iter().map(String::as_str).collect();
    Some(format!("{}::[{}]", ctx.syntax.vertex(v).name, joined.join(" ")))
}

/// `key = a,\n<pad> b` with continuation lines aligned under the first entry.
fn aligned_list(w: &mut CodeWriter, key: &str, entries: &[String]) {
    let mut text = format!("{key} =");
    let pad = " ".repeat(key.len() + 2);
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            text.push_str(",\n");
            text.push_str(&pad);
        }
        text.push(' ');
        text.push_str(entry);
    }
    w.push(&text);
    w.push("\n");
}

/// `<prefix>.ini` for the ToJs bindings generator.
pub fn emit_to_js_ini(ctx: &CppContext<'_>) -> Result<String> {
    let module = ctx.module;
    let syntax = ctx.syntax;
    let mut w = CodeWriter::new();
    w.line(format!("[{}]", module.to_js_prefix));
    w.text(TO_JS_PREFIX_HELP);
    w.line(format!("prefix = {}", module.to_js_prefix));
    w.blank();
    w.text(TO_JS_NAMESPACE_HELP);
    w.line(format!("target_namespace = {}", module.to_js_namespace));
    w.blank();
    w.text(TO_JS_TOOLCHAIN);
    w.line(format!(
        "headers = %(cocosdir)s/{}",
        module.file_path("Types.h")
    ));
    w.blank();

    let mut hpp = String::from("hpp_headers =");
    for header in &module.hpp_headers {
        hpp.push(' ');
        hpp.push_str(header);
    }
    w.line(hpp);
    w.blank();

    let mut cpp = String::from("cpp_headers =");
    for header in module
        .cpp_headers
        .iter()
        .cloned()
        .chain(ctx.dependency_files(Features::JSB, "Jsb.h"))
    {
        cpp.push(' ');
        cpp.push_str(&header);
    }
    w.line(cpp);
    w.blank();

    w.text(TO_JS_CLASSES_HELP);
    let bound = bound(ctx);
    let mut classes = String::from("classes =");
    for &v in &bound {
        classes.push(' ');
        classes.push_str(&syntax.vertex(v).name);
    }
    w.line(classes);
    w.blank();

    w.text(TO_JS_SKIP_HELP);
    let skipped: Vec<String> = bound
        .iter()
        .filter_map(|&v| {
            method_list(ctx, v, |m| m.skip.then(|| m.function_name.clone()))
        })
        .collect();
    aligned_list(&mut w, "skip", &skipped);
    w.blank();
    w.line("skip_public_fields =");
    w.blank();

    let accessors: Vec<String> = bound
        .iter()
        .filter_map(|&v| {
            method_list(ctx, v, |m| {
                if !(m.getter || m.setter) {
                    return None;
                }
                m.function_name
                    .get(3..)
                    .filter(|stem| !stem.is_empty())
                    .map(camel_to_variable)
            })
        })
        .collect();
    aligned_list(&mut w, "getter_setter", &accessors);
    w.blank();

    w.text(TO_JS_RENAMES);
    let mut abstracts = String::from("abstract_classes =");
    for &v in bound.iter().filter(|&&v| syntax.is_interface(v)) {
        abstracts.push(' ');
        abstracts.push_str(&syntax.vertex(v).name);
    }
    w.line(abstracts);
    w.blank();
    w.text(TO_JS_TAIL);
    if !module.to_js_configs.is_empty() {
        w.text(&module.to_js_configs);
    }
    Ok(w.finish())
}
