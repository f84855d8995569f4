//! Shader program builder.
//!
//! Renderers bind uniforms, textures and entry points by fixed names. Those
//! names are checked against the WGSL source before the module is created,
//! so a renamed binding fails initialization with a named error instead of
//! a wgpu validation panic at pipeline creation.

use crate::error::GridError;

/// WGSL source plus the symbols the renderer expects to find in it.
#[derive(Debug, Copy, Clone)]
pub struct ProgramSource {
    pub label: &'static str,
    pub wgsl: &'static str,
    pub required: &'static [&'static str],
}

impl ProgramSource {
    /// Per-vertex color (or flat white) quads with a per-cell tint.
    pub const COLORED: ProgramSource = ProgramSource {
        label: "quadgrid colored",
        wgsl: include_str!("shaders/colored.wgsl"),
        required: &["vs_main", "fs_main", "u_cell", "model", "tint"],
    };

    /// Textured quads with a per-cell UV scale and sampler.
    pub const TEXTURED: ProgramSource = ProgramSource {
        label: "quadgrid textured",
        wgsl: include_str!("shaders/textured.wgsl"),
        required: &["vs_main", "fs_main", "u_cell", "model", "uv_scale", "t_row", "s_wrap"],
    };

    /// First required symbol that does not appear in the source.
    pub fn missing_symbol(&self) -> Option<&'static str> {
        let idents = identifiers(self.wgsl);
        self.required
            .iter()
            .copied()
            .find(|name| !idents.iter().any(|id| id == name))
    }
}

/// Identifiers in `src`, with `//` line comments and `/* */` block comments removed.
fn identifiers(src: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let bytes = src.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i += 2;
            while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                i += 1;
            }
            i += 2;
        } else if b.is_ascii_alphabetic() || b == b'_' {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            out.push(&src[start..i]);
        } else {
            i += 1;
        }
    }
    out
}

/// Checks required symbols, then creates the shader module.
pub fn build_program(
    device: &wgpu::Device,
    source: &ProgramSource,
) -> Result<wgpu::ShaderModule, GridError> {
    if let Some(name) = source.missing_symbol() {
        return Err(GridError::MissingUniform {
            program: source.label.to_string(),
            name: name.to_string(),
        });
    }

    log::debug!("building shader program `{}`", source.label);
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(source.label),
        source: wgpu::ShaderSource::Wgsl(source.wgsl.into()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_programs_have_every_symbol() {
        assert_eq!(ProgramSource::COLORED.missing_symbol(), None);
        assert_eq!(ProgramSource::TEXTURED.missing_symbol(), None);
    }

    #[test]
    fn missing_binding_is_named() {
        let src = ProgramSource {
            label: "broken",
            wgsl: "@vertex fn vs_main() {} @fragment fn fs_main() {}",
            required: &["vs_main", "fs_main", "u_cell"],
        };
        assert_eq!(src.missing_symbol(), Some("u_cell"));
    }

    #[test]
    fn comments_do_not_count() {
        let src = ProgramSource {
            label: "commented",
            wgsl: "// var u_cell\n/* t_row */ fn vs_main() {}",
            required: &["vs_main", "u_cell"],
        };
        assert_eq!(src.missing_symbol(), Some("u_cell"));
        let src = ProgramSource { required: &["t_row"], ..src };
        assert_eq!(src.missing_symbol(), Some("t_row"));
    }

    #[test]
    fn prefix_is_not_a_match() {
        let src = ProgramSource {
            label: "prefix",
            wgsl: "var<uniform> u_cell_extra: f32;",
            required: &["u_cell"],
        };
        assert_eq!(src.missing_symbol(), Some("u_cell"));
    }

    #[test]
    fn identifiers_split_on_punctuation() {
        assert_eq!(
            identifiers("a.b_c(d0, _e) /* x */ // y\nf"),
            vec!["a", "b_c", "d0", "_e", "f"]
        );
    }
}
