//! Struct declarations and out-of-line definitions.
//!
//! Special member functions follow `ImplEnum`: `Inline` bodies stay in the
//! header, `Separated` ones are declared here and defined in `Types.cpp`
//! (unless the user provides them through `custom_cntr`/`custom_dtor`).

use graphgen_core::syntax::{Composition, Member, is_pmr_string};
use graphgen_core::{GenerationFlags, ImplEnum, VertexId};
use graphgen_core::naming::get_parameter_name;

use super::{ALLOCATOR_TYPE, CppContext, DEFAULT_RESOURCE};
use crate::writer::Separator;
use crate::{CodeWriter, Error, Result};

/// Tokens in verbatim member functions replaced by the export macro.
const API_TOKENS: &[&str] = &["[[dll]] ", "[[sender]] ", "[[no_sender]] "];

pub(super) struct StructEmitter<'a> {
    ctx: &'a CppContext<'a>,
    v: VertexId,
    name: &'a str,
    /// Path of the struct; member types resolve from inside it.
    scope: String,
    /// Spelling of the struct from its namespace (`Outer::Inner`).
    qualified: String,
    composition: &'a Composition,
    pmr: bool,
}

impl<'a> StructEmitter<'a> {
    pub(super) fn new(ctx: &'a CppContext<'a>, v: VertexId) -> Self {
        let syntax = ctx.syntax;
        let ns = syntax.get_namespace(v);
        Self {
            ctx,
            v,
            name: &syntax.vertex(v).name,
            scope: syntax.get_path(v),
            qualified: syntax.get_cpp_name(&ns, v),
            composition: syntax.composition(v),
            pmr: syntax.is_pmr(v),
        }
    }

    /// Rejects constructors naming missing members, and allocator aware
    /// structs with nothing to take the allocator from.
    pub(super) fn validate(&self) -> Result<()> {
        for constructor in &self.composition.constructors {
            if let Some(&index) = constructor
                .indices
                .iter()
                .find(|&&i| i as usize >= self.composition.members.len())
            {
                return Err(Error::InvalidConstructor {
                    owner: self.scope.clone(),
                    index,
                });
            }
        }
        if self.needs_get_allocator() && self.allocator_member().is_none() {
            return Err(Error::NoAllocatorMember(self.scope.clone()));
        }
        Ok(())
    }

    fn has(&self, flag: GenerationFlags) -> bool {
        self.ctx.syntax.has_flag(self.v, flag)
    }

    fn needs_get_allocator(&self) -> bool {
        self.pmr && !self.ctx.syntax.is_derived(self.v)
    }

    fn allocator_member(&self) -> Option<&'a Member> {
        self.composition
            .members
            .iter()
            .find(|m| self.ctx.is_pmr_member(m))
    }

    fn noexcept(&self) -> &'static str {
        if self.ctx.syntax.is_noexcept(self.v) {
            " noexcept"
        } else {
            ""
        }
    }

    fn member(&self, index: u32) -> Result<&'a Member> {
        self.composition
            .members
            .get(index as usize)
            .ok_or_else(|| Error::InvalidConstructor {
                owner: self.scope.clone(),
                index,
            })
    }

    fn param_type(&self, m: &Member) -> String {
        if is_pmr_string(&m.type_path) && !m.pointer {
            return "std::string_view".to_owned();
        }
        let mut ty = self.ctx.type_name(&self.scope, &m.type_path);
        if m.pointer {
            ty.push('*');
        }
        ty
    }

    /// Parameter list of a member constructor, with defaults in the header.
    fn params(&self, indices: &[u32], defaults: bool) -> Result<Vec<String>> {
        let mut params = Vec::with_capacity(indices.len() + 1);
        for &i in indices {
            let m = self.member(i)?;
            let mut param = format!("{} {}", self.param_type(m), get_parameter_name(&m.member_name)?);
            if defaults && !m.default_value.is_empty() {
                param.push_str(" = ");
                param.push_str(&m.default_value);
            }
            params.push(param);
        }
        if self.pmr {
            let mut alloc = "const allocator_type& alloc".to_owned();
            if defaults && self.has(GenerationFlags::PMR_DEFAULT) {
                alloc.push_str(" = ");
                alloc.push_str(DEFAULT_RESOURCE);
            }
            params.push(alloc);
        }
        Ok(params)
    }

    fn is_ctor_noexcept(&self, indices: &[u32]) -> Result<bool> {
        if !self.ctx.syntax.is_noexcept(self.v) {
            return Ok(false);
        }
        for &i in indices {
            if is_pmr_string(&self.member(i)?.type_path) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Initializer entries of a constructor taking `indices`.
    fn init_list(&self, indices: &[u32]) -> Result<Vec<String>> {
        let mut entries = Vec::new();
        for (i, m) in self.composition.members.iter().enumerate() {
            let name = &m.member_name;
            if indices.contains(&(i as u32)) {
                let param = get_parameter_name(name)?;
                let entry = if !self.pmr {
                    format!("{name}(std::move({param}))")
                } else if is_pmr_string(&m.type_path) && !m.pointer {
                    format!("{name}({param}, alloc)")
                } else if self.ctx.is_pmr_optional_member(m) {
                    let ty = self.ctx.type_name(&self.scope, &m.type_path);
                    format!(
                        "{name}({param} ? {ty}(std::in_place, std::move(*{param}), alloc) : std::nullopt)"
                    )
                } else if self.ctx.is_pmr_member(m) {
                    format!("{name}(std::move({param}), alloc)")
                } else {
                    format!("{name}(std::move({param}))")
                };
                entries.push(entry);
            } else if self.pmr && self.ctx.is_pmr_member(m) {
                entries.push(format!("{name}(alloc)"));
            }
        }
        Ok(entries)
    }

    /// Initializer entries of the allocator-extended move or copy
    /// constructor.
    fn transfer_list(&self, moving: bool) -> Vec<String> {
        self.composition
            .members
            .iter()
            .map(|m| {
                let name = &m.member_name;
                let source = if moving {
                    format!("std::move(rhs.{name})")
                } else {
                    format!("rhs.{name}")
                };
                if self.ctx.is_pmr_member(m) {
                    format!("{name}({source}, alloc)")
                } else {
                    format!("{name}({source})")
                }
            })
            .collect()
    }

    // ========================================================================
    // Header
    // ========================================================================

    pub(super) fn emit_declaration(&self, w: &mut CodeWriter) -> Result<()> {
        self.validate()?;
        let syntax = self.ctx.syntax;
        let traits = syntax.traits(self.v);
        let keyword = if traits.class { "class" } else { "struct" };
        let api = if self.separated_anything() {
            self.ctx.api()
        } else {
            String::new()
        };

        let mut head = format!("{keyword} {api}{}", self.name);
        let bases: Vec<String> = syntax
            .vertex(self.v)
            .inherits
            .iter()
            .map(|b| format!("public {}", self.ctx.type_name(&syntax.get_namespace(self.v), b)))
            .collect();
        if !bases.is_empty() {
            head.push_str(" : ");
            head.push_str(&bases.join(", "));
        }
        head.push_str(" {");
        w.open(head);
        if traits.class {
            w.dedent();
            w.line("public:");
            w.indent();
        }

        let mut sep = Separator::new();
        let nested = self.ctx.nested(self.v);
        for child in nested {
            sep.next(w);
            super::types::emit_declaration(self.ctx, w, child)?;
        }
        if self.pmr {
            sep.next(w);
            self.emit_allocator(w)?;
        }
        let mut ctors = CodeWriter::new();
        self.emit_special_members(&mut ctors)?;
        if !ctors.is_empty() {
            sep.next(w);
            w.text(ctors.as_str());
        }
        if !self.composition.member_functions.is_empty() {
            sep.next(w);
            let api = self.ctx.api();
            for f in &self.composition.member_functions {
                let mut text = f.clone();
                for token in API_TOKENS {
                    text = text.replace(token, &api);
                }
                w.text(&text);
            }
        }
        if traits.class && self.has_operators() {
            sep.next(w);
            self.emit_member_operators(w);
        }
        if self.composition.has_members() {
            sep.next(w);
            for m in &self.composition.members {
                w.line(self.member_declaration(m));
            }
        }
        w.close("};");

        if !traits.class {
            self.emit_free_operators(w);
        }
        if syntax.need_dtor(self.v) == ImplEnum::Inline {
            w.blank();
            w.line(format!(
                "inline {q}::~{n}() noexcept = default;",
                q = self.qualified,
                n = self.name
            ));
        }
        Ok(())
    }

    fn separated_anything(&self) -> bool {
        let syntax = self.ctx.syntax;
        [
            syntax.need_default_cntr(self.v),
            syntax.need_move_cntr(self.v),
            syntax.need_copy_cntr(self.v),
        ]
        .contains(&ImplEnum::Separated)
    }

    fn member_declaration(&self, m: &Member) -> String {
        let ty = self.ctx.member_type(&self.scope, m);
        if m.default_value.is_empty() {
            format!("{ty} {};", m.member_name)
        } else {
            format!("{ty} {} = {};", m.member_name, m.default_value)
        }
    }

    fn emit_allocator(&self, w: &mut CodeWriter) -> Result<()> {
        w.line(format!("using allocator_type = {ALLOCATOR_TYPE};"));
        if !self.needs_get_allocator() {
            return Ok(());
        }
        let m = self
            .allocator_member()
            .ok_or_else(|| Error::NoAllocatorMember(self.scope.clone()))?;
        if self.ctx.module.api.is_empty() {
            w.open("allocator_type get_allocator() const noexcept { // NOLINT");
            w.line(format!("return {{{}.get_allocator().resource()}};", m.member_name));
            w.close("}");
        } else {
            w.line("allocator_type get_allocator() const noexcept;");
        }
        Ok(())
    }

    fn emit_special_members(&self, w: &mut CodeWriter) -> Result<()> {
        let syntax = self.ctx.syntax;
        let name = self.name;
        let api = self.ctx.api();
        let noexcept = self.noexcept();

        match syntax.need_default_cntr(self.v) {
            ImplEnum::None => {}
            ImplEnum::Delete => w.line(format!("{name}() = delete;")),
            ImplEnum::Inline => w.line(format!("{name}() = default;")),
            ImplEnum::Separated if self.pmr => {
                let params = self.params(&[], true)?;
                w.line(format!("{name}({}){noexcept}; // NOLINT", params.join(", ")));
            }
            ImplEnum::Separated => {
                if self.ctx.module.api.is_empty() && !self.has(GenerationFlags::CUSTOM_CNTR) {
                    w.line(format!("{name}() noexcept = default;"));
                } else {
                    w.line(format!("{api}{name}(){noexcept};"));
                }
            }
        }

        for constructor in &self.composition.constructors {
            let indices = &constructor.indices;
            let params = self.params(indices, constructor.has_default)?;
            let noexcept = if self.is_ctor_noexcept(indices)? {
                " noexcept"
            } else {
                ""
            };
            let signature = format!("{name}({}){noexcept}", params.join(", "));
            if self.pmr {
                w.line(format!("{signature};"));
            } else {
                write_init_list(w, &signature, &self.init_list(indices)?);
            }
        }

        let mv = syntax.need_move_cntr(self.v);
        let cp = syntax.need_copy_cntr(self.v);
        if mv == ImplEnum::Separated {
            w.line(format!("{name}({name}&& rhs, const allocator_type& alloc);"));
        }
        if cp == ImplEnum::Separated {
            w.line(format!("{name}({name} const& rhs, const allocator_type& alloc);"));
        }

        let mut lines = Vec::new();
        let dll = !self.ctx.module.api.is_empty();
        match mv {
            ImplEnum::Delete => lines.push(format!("{name}({name}&& rhs) = delete;")),
            ImplEnum::Separated if dll => lines.push(format!("{name}({name}&& rhs) noexcept;")),
            ImplEnum::Inline | ImplEnum::Separated => {
                lines.push(format!("{name}({name}&& rhs) noexcept = default;"));
            }
            ImplEnum::None if cp == ImplEnum::Delete => {
                lines.push(format!("{name}({name}&& rhs) noexcept = default;"));
            }
            ImplEnum::None => {}
        }
        match cp {
            ImplEnum::Delete | ImplEnum::Separated => {
                lines.push(format!("{name}({name} const& rhs) = delete;"));
            }
            ImplEnum::Inline => lines.push(format!("{name}({name} const& rhs) = default;")),
            ImplEnum::None => {}
        }
        match mv {
            ImplEnum::Delete => lines.push(format!("{name}& operator=({name}&& rhs) = delete;")),
            ImplEnum::Inline | ImplEnum::Separated => {
                lines.push(format!("{name}& operator=({name}&& rhs) = default;"));
            }
            ImplEnum::None if cp == ImplEnum::Delete => {
                lines.push(format!("{name}& operator=({name}&& rhs) = default;"));
            }
            ImplEnum::None => {}
        }
        match cp {
            ImplEnum::Delete => lines.push(format!("{name}& operator=({name} const& rhs) = delete;")),
            ImplEnum::Inline | ImplEnum::Separated => {
                lines.push(format!("{name}& operator=({name} const& rhs) = default;"));
            }
            ImplEnum::None => {}
        }
        if !lines.is_empty() {
            if !w.is_empty() {
                w.blank();
            }
            for line in lines {
                w.line(line);
            }
        }

        let virt = if syntax.is_interface(self.v) && !syntax.is_derived(self.v) {
            "virtual "
        } else {
            ""
        };
        let over = if syntax.is_derived(self.v) && syntax.is_interface(self.v) {
            " override"
        } else {
            ""
        };
        let dtor = match syntax.need_dtor(self.v) {
            ImplEnum::Inline => Some(format!("{virt}~{name}() noexcept{over} = 0;")),
            ImplEnum::Separated => Some(format!("{virt}~{name}() noexcept{over};")),
            ImplEnum::None | ImplEnum::Delete => None,
        };
        if let Some(dtor) = dtor {
            if !w.is_empty() {
                w.blank();
            }
            w.line(dtor);
        }
        Ok(())
    }

    // ========================================================================
    // Operators
    // ========================================================================

    fn has_operators(&self) -> bool {
        self.has(GenerationFlags::EQUAL)
            || self.has(GenerationFlags::LESS)
            || self.has(GenerationFlags::SPACESHIP)
    }

    fn tuple(&self, prefix: &str) -> String {
        let members: Vec<String> = self
            .composition
            .members
            .iter()
            .map(|m| format!("{prefix}{}", m.member_name))
            .collect();
        format!("std::forward_as_tuple({})", members.join(", "))
    }

    fn comparison(&self, w: &mut CodeWriter, op: &str, lhs: &str, rhs: &str, empty: &str) {
        if self.composition.has_members() {
            w.line(format!("return {} {op}", self.tuple(lhs)));
            w.line(format!("       {};", self.tuple(rhs)));
        } else {
            w.line(format!("return {empty};"));
        }
    }

    fn emit_member_operators(&self, w: &mut CodeWriter) {
        let name = self.name;
        let mut sep = Separator::new();
        if self.has(GenerationFlags::EQUAL) {
            sep.next(w);
            w.open(format!("bool operator==(const {name}& rhs) const noexcept {{"));
            self.comparison(w, "==", "", "rhs.", "true");
            w.close("}");
            w.blank();
            w.open(format!("bool operator!=(const {name}& rhs) const noexcept {{"));
            w.line("return !(*this == rhs);");
            w.close("}");
        }
        if self.has(GenerationFlags::LESS) {
            sep.next(w);
            w.open(format!("bool operator<(const {name}& rhs) const noexcept {{"));
            self.comparison(w, "<", "", "rhs.", "false");
            w.close("}");
        }
        if self.has(GenerationFlags::SPACESHIP) {
            sep.next(w);
            w.open(format!("auto operator<=>(const {name}& rhs) const noexcept {{"));
            self.comparison(w, "<=>", "", "rhs.", "std::strong_ordering::equal");
            w.close("}");
        }
    }

    fn emit_free_operators(&self, w: &mut CodeWriter) {
        let name = &self.qualified;
        if self.has(GenerationFlags::EQUAL) {
            w.blank();
            w.open(format!(
                "inline bool operator==(const {name}& lhs, const {name}& rhs) noexcept {{"
            ));
            self.comparison(w, "==", "lhs.", "rhs.", "true");
            w.close("}");
            w.blank();
            w.open(format!(
                "inline bool operator!=(const {name}& lhs, const {name}& rhs) noexcept {{"
            ));
            w.line("return !(lhs == rhs);");
            w.close("}");
        }
        if self.has(GenerationFlags::LESS) {
            w.blank();
            w.open(format!(
                "inline bool operator<(const {name}& lhs, const {name}& rhs) noexcept {{"
            ));
            self.comparison(w, "<", "lhs.", "rhs.", "false");
            w.close("}");
        }
        if self.has(GenerationFlags::SPACESHIP) {
            w.blank();
            w.open(format!(
                "inline auto operator<=>(const {name}& lhs, const {name}& rhs) noexcept {{"
            ));
            self.comparison(w, "<=>", "lhs.", "rhs.", "std::strong_ordering::equal");
            w.close("}");
        }
    }

    /// `std::hash` specialization, emitted after the namespaces close.
    pub(super) fn emit_hash(&self, w: &mut CodeWriter) {
        let full = self.ctx.syntax.get_cpp_name("", self.v);
        w.line("template <>");
        w.open(format!("struct hash<{full}> {{"));
        w.open(format!("size_t operator()(const {full}& val) const noexcept {{"));
        w.line("size_t seed = 0;");
        for m in &self.composition.members {
            w.line(format!("boost::hash_combine(seed, val.{});", m.member_name));
        }
        w.line("return seed;");
        w.close("}");
        w.close("};");
    }

    // ========================================================================
    // Source
    // ========================================================================

    /// Out-of-line definitions; nothing when every member is inline.
    pub(super) fn emit_definitions(&self, w: &mut CodeWriter) -> Result<()> {
        self.validate()?;
        let syntax = self.ctx.syntax;
        let q = &self.qualified;
        let name = self.name;
        let custom = self.has(GenerationFlags::CUSTOM_CNTR);
        let dll = !self.ctx.module.api.is_empty();
        let mut sep = Separator::new();

        if syntax.need_default_cntr(self.v) == ImplEnum::Separated && !custom {
            if self.pmr {
                sep.next(w);
                let signature = format!(
                    "{q}::{name}(const allocator_type& alloc){}",
                    self.noexcept()
                );
                write_init_list(w, &signature, &self.init_list(&[])?);
            } else if dll {
                sep.next(w);
                w.line(format!("{q}::{name}(){} = default;", self.noexcept()));
            }
        }

        if self.pmr {
            for constructor in &self.composition.constructors {
                sep.next(w);
                let indices = &constructor.indices;
                let noexcept = if self.is_ctor_noexcept(indices)? {
                    " noexcept"
                } else {
                    ""
                };
                let signature = format!(
                    "{q}::{name}({}){noexcept}",
                    self.params(indices, false)?.join(", ")
                );
                write_init_list(w, &signature, &self.init_list(indices)?);
            }
        }

        let mv = syntax.need_move_cntr(self.v);
        if mv == ImplEnum::Separated {
            sep.next(w);
            let signature = format!("{q}::{name}({name}&& rhs, const allocator_type& alloc)");
            write_init_list(w, &signature, &self.transfer_list(true));
        }
        if syntax.need_copy_cntr(self.v) == ImplEnum::Separated {
            sep.next(w);
            let signature = format!("{q}::{name}({name} const& rhs, const allocator_type& alloc)");
            write_init_list(w, &signature, &self.transfer_list(false));
        }
        if mv == ImplEnum::Separated && dll {
            sep.next(w);
            w.line(format!("{q}::{name}({name}&& rhs) noexcept = default;"));
        }
        if self.needs_get_allocator() && dll {
            sep.next(w);
            let m = self
                .allocator_member()
                .ok_or_else(|| Error::NoAllocatorMember(self.scope.clone()))?;
            w.open(format!("{q}::allocator_type {q}::get_allocator() const noexcept {{"));
            w.line(format!("return {{{}.get_allocator().resource()}};", m.member_name));
            w.close("}");
        }
        Ok(())
    }
}

/// Constructor signature followed by `: a(..)` / `, b(..)` lines and `{}`.
pub(super) fn write_init_list(w: &mut CodeWriter, signature: &str, entries: &[String]) {
    if entries.is_empty() {
        w.line(format!("{signature} {{}}"));
        return;
    }
    w.line(signature);
    let last = entries.len() - 1;
    for (i, entry) in entries.iter().enumerate() {
        let lead = if i == 0 { ": " } else { ", " };
        let tail = if i == last { " {}" } else { "" };
        w.line(format!("{lead}{entry}{tail}"));
    }
}
