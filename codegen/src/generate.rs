use crate::error::Error;
use crate::helper::format_bytes;
use crate::shaders::CompiledShader;
use std::path::Path;

pub const HEADER_FILE: &str = "shaders.hpp";
pub const SOURCE_FILE: &str = "shaders.cpp";

#[derive(Clone, Copy, Debug)]
pub struct Layout {
    pub columns: usize,
    pub indent: usize,
}

impl Default for Layout {
    fn default() -> Layout {
        Layout {
            columns: 16,
            indent: 2,
        }
    }
}

pub fn render_header(shaders: &[CompiledShader], tag: &str) -> String {
    let declarations: Vec<String> = shaders
        .iter()
        .map(|shader| {
            format!(
                "  extern uint8_t g_{}[ {} ];",
                shader.identifier,
                shader.bytes.len()
            )
        })
        .collect();
    format!(
        r#"#pragma once
#include <cstdint>

namespace shaders::{tag} {{
{}
}} // namespace shaders::{tag}
"#,
        declarations.join("\n")
    )
}

pub fn render_source(shaders: &[CompiledShader], tag: &str, layout: Layout) -> String {
    let definitions: Vec<String> = shaders
        .iter()
        .map(|shader| {
            format!(
                "uint8_t shaders::{tag}::g_{}[ {} ] = {{\n{}\n}};",
                shader.identifier,
                shader.bytes.len(),
                format_bytes(&shader.bytes, layout.columns, layout.indent)
            )
        })
        .collect();
    format!(
        "#include \"{HEADER_FILE}\"\n\n{}\n",
        definitions.join("\n\n")
    )
}

/// Writes the declaration and definition files into `dir`, replacing any previous ones. Both are
/// rendered before either is written.
pub fn write_bundle(
    shaders: &[CompiledShader],
    dir: &Path,
    tag: &str,
    layout: Layout,
) -> Result<(), Error> {
    let header = render_header(shaders, tag);
    let source = render_source(shaders, tag, layout);
    for (name, text) in [(HEADER_FILE, header), (SOURCE_FILE, source)] {
        let path = dir.join(name);
        std::fs::write(&path, text).map_err(Error::io(&path))?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::ScratchFiles;
    use std::path::PathBuf;

    fn shader(identifier: &str, bytes: &[u8]) -> CompiledShader {
        CompiledShader {
            identifier: identifier.to_owned(),
            input: PathBuf::from(format!("{identifier}.hlsl")),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn header_declares_every_shader_in_order() {
        let header = render_header(&[shader("a_vs", &[1, 2]), shader("b_ps", &[3])], "dx");
        assert_eq!(
            header,
            r#"#pragma once
#include <cstdint>

namespace shaders::dx {
  extern uint8_t g_a_vs[ 2 ];
  extern uint8_t g_b_ps[ 1 ];
} // namespace shaders::dx
"#
        );
    }

    #[test]
    fn source_defines_every_shader_in_order() {
        let source = render_source(
            &[shader("a_vs", &[1, 2]), shader("b_ps", &[3])],
            "dx",
            Layout::default(),
        );
        assert_eq!(
            source,
            r#"#include "shaders.hpp"

uint8_t shaders::dx::g_a_vs[ 2 ] = {
  0x01, 0x02,
};

uint8_t shaders::dx::g_b_ps[ 1 ] = {
  0x03,
};
"#
        );
    }

    #[test]
    fn long_arrays_wrap() {
        let bytes: Vec<u8> = (0..=0x10).collect();
        let source = render_source(&[shader("big_cs", &bytes)], "vk", Layout::default());
        let body: Vec<&str> = source
            .lines()
            .skip_while(|line| !line.ends_with("= {"))
            .skip(1)
            .take_while(|line| *line != "};")
            .collect();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].split(", ").count(), 16);
        assert_eq!(body[1], "  0x10,");
    }

    #[test]
    fn rewriting_is_idempotent() {
        let scratch = ScratchFiles::new();
        let dir = scratch.allocate_dir("-out").unwrap();
        let shaders = [shader("a_vs", &[1, 2]), shader("b_ps", &[3])];
        std::fs::write(dir.join(HEADER_FILE), "stale").unwrap();

        write_bundle(&shaders, &dir, "gl", Layout::default()).unwrap();
        let first = (
            std::fs::read(dir.join(HEADER_FILE)).unwrap(),
            std::fs::read(dir.join(SOURCE_FILE)).unwrap(),
        );
        write_bundle(&shaders, &dir, "gl", Layout::default()).unwrap();
        let second = (
            std::fs::read(dir.join(HEADER_FILE)).unwrap(),
            std::fs::read(dir.join(SOURCE_FILE)).unwrap(),
        );
        assert_eq!(first, second);
        assert!(String::from_utf8(first.0).unwrap().contains("namespace shaders::gl {"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let scratch = ScratchFiles::new();
        let dir = scratch.allocate("-missing");
        let result = write_bundle(&[shader("a_vs", &[1])], &dir, "dx", Layout::default());
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
