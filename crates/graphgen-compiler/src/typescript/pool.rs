//! `<prefix>ObjectPool.ts`: recycling factories for pool-object classes.

use graphgen_core::naming::{get_relative_path, get_variable_name};

use super::TsContext;
use super::structs::ClassBody;
use crate::{CodeWriter, Result};

const POOL_SIZE: u32 = 16;

pub fn emit_object_pool(ctx: &TsContext<'_>) -> Result<String> {
    let syntax = ctx.syntax;
    let objects = ctx.pool_objects();
    let file = ctx.module.file_path("ObjectPool.ts");

    let mut w = CodeWriter::new();
    ctx.banner(&mut w);
    w.line(format!(
        "import {{ RecyclePool }} from '{}';",
        ctx.config.typescript_pool_import
    ));
    if !objects.is_empty() {
        let names: Vec<String> = objects
            .iter()
            .map(|&v| syntax.get_typescript_typename(v))
            .collect();
        let target = get_relative_path(&file, &ctx.module.file_path(""));
        w.line(format!("import {{ {} }} from '{target}';", names.join(", ")));
    }
    w.blank();

    w.open(format!("export class {}ObjectPool {{", ctx.module.file_prefix));
    w.open("reset (): void {");
    for &v in &objects {
        let pool = get_variable_name(&syntax.get_typescript_typename(v));
        w.line(format!("this._{pool}.reset();"));
    }
    w.close("}");

    for &v in &objects {
        let name = syntax.get_typescript_typename(v);
        let pool = get_variable_name(&name);
        let body = ClassBody::new(ctx, v, syntax.composition(v), None);
        let ctor = syntax.composition(v).constructors.first();
        let params = match ctor {
            Some(c) => body.parameters(c)?,
            None => Vec::new(),
        };
        let args: Vec<&str> = params
            .iter()
            .map(|p| p.split([' ', ':', '=']).next().unwrap_or_default())
            .collect();
        w.open(format!("create{name} ({}): {name} {{", params.join(", ")));
        w.line(format!("const v = this._{pool}.add();"));
        w.line(format!("v.reset({});", args.join(", ")));
        w.line("return v;");
        w.close("}");
    }

    for &v in &objects {
        let name = syntax.get_typescript_typename(v);
        let pool = get_variable_name(&name);
        let c = syntax.composition(v);
        let init: Vec<String> = match c.constructors.first() {
            Some(ctor) if !ctor.has_default => ctor
                .indices
                .iter()
                .filter_map(|&i| c.members.get(i as usize))
                .map(|m| ctx.initial_value(m))
                .collect(),
            _ => Vec::new(),
        };
        w.line(format!(
            "private readonly _{pool}: RecyclePool<{name}> = new RecyclePool<{name}>(() => new {name}({}), {POOL_SIZE});",
            init.join(", ")
        ));
    }
    w.close("}");
    Ok(w.finish())
}
