//! A two-module sample: shared render types and a scene graph using them.

pub const DEMO: &str = r#"{
    "modules": [
        {
            "name": "Common",
            "folder": "renderer/common",
            "prefix": "RenderCommon",
            "features": "fwd|types|names|typescripts|serialization",
            "namespaces": [
                {
                    "name": "render",
                    "declarations": [
                        {
                            "kind": "enum",
                            "name": "LightType",
                            "values": [{ "name": "Spot" }, { "name": "Sphere" }]
                        },
                        {
                            "kind": "struct",
                            "name": "Light",
                            "members": [
                                { "type": "LightType", "name": "mType" },
                                { "type": "float", "name": "mIntensity", "default": "1" }
                            ],
                            "constructors": [{ "members": ["mType", "mIntensity"], "has_default": true }]
                        }
                    ]
                }
            ]
        },
        {
            "name": "Scene",
            "folder": "renderer/scene",
            "prefix": "Scene",
            "features": "fwd|types|names|reflection|graphs|typescripts|jsb|to_js|ts_pool|serialization|wasm",
            "to_js_prefix": "scene",
            "to_js_namespace": "render",
            "namespaces": [
                {
                    "name": "render",
                    "declarations": [
                        {
                            "kind": "struct",
                            "name": "Camera",
                            "traits": { "flags": "jsb|pool_object" },
                            "members": [
                                { "type": "float", "name": "mFov", "default": "45" },
                                { "type": "float", "name": "mAspect", "default": "1", "public": false }
                            ],
                            "constructors": [{ "members": ["mFov"], "has_default": true }],
                            "methods": [
                                { "function_name": "getAspect", "getter": true },
                                { "function_name": "setAspect", "setter": true }
                            ]
                        },
                        {
                            "kind": "graph",
                            "name": "SceneGraph",
                            "vertex": "Light",
                            "ownership": "reference",
                            "members": [{ "type": "uint32_t", "name": "mVersion" }]
                        }
                    ]
                }
            ]
        }
    ]
}"#;

pub fn run() {
    println!("{}", DEMO);
}
