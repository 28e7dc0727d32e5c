//! Per-vertex trait bag and generation flags.

use serde::Serialize;

flag_set! {
    /// Per-vertex and per-member code generation switches.
    pub struct GenerationFlags: u32 {
        const NO_DEFAULT_CNTR = 0, "no_default_cntr";
        const NO_MOVE_NO_COPY = 1, "no_move_no_copy";
        const NO_COPY = 2, "no_copy";
        const CUSTOM_CNTR = 3, "custom_cntr";
        const CUSTOM_DTOR = 4, "custom_dtor";
        /// Default the allocator argument to `get_default_resource()`.
        const PMR_DEFAULT = 5, "pmr_default";
        const EQUAL = 6, "equal";
        const LESS = 7, "less";
        const SPACESHIP = 8, "spaceship";
        const HASH_COMBINE = 9, "hash_combine";
        const JSB = 10, "jsb";
        const IMPL_DETAIL = 11, "impl_detail";
        const POOL_OBJECT = 12, "pool_object";
        const NO_SERIALIZATION = 13, "no_serialization";
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Traits {
    /// Declared elsewhere; never emitted.
    pub import: bool,
    pub pmr: bool,
    pub interface: bool,
    /// `class` instead of `struct`, `enum class` for enums.
    pub class: bool,
    /// Opaque to trait inference.
    pub unknown: bool,
    pub flags: GenerationFlags,
}

impl Traits {
    pub fn has(&self, flag: GenerationFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// TypeScript projection of a vertex.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Typescript {
    pub name: String,
    pub array: bool,
}
