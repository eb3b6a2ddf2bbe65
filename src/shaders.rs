//! SkSL paint passes for the glass treatment.

/// Faint white speckle suggesting frosted texture. Output is premultiplied.
pub const FROST_SPECKLE: &str = r#"
    uniform float intensity; // 0.0 to 1.0

    half4 main(float2 p) {
        // Hash noise
        float n = fract(sin(dot(p, float2(12.9898, 78.233))) * 43758.5453);
        half a = half(n * intensity);
        return half4(half3(a), a);
    }
"#;
