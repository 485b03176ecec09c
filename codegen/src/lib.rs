mod config;
mod error;
mod generate;
mod helper;
mod orchestrate;
mod process;
mod scratch;
mod shaders;
mod tools;
mod types;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::generate::{
    render_header, render_source, write_bundle, Layout, HEADER_FILE, SOURCE_FILE,
};
pub use crate::helper::{format_bytes, identifier_from_path};
pub use crate::orchestrate::run_all;
pub use crate::process::{ProcessRunner, Runner};
pub use crate::scratch::ScratchFiles;
pub use crate::shaders::{CompiledShader, Pipeline, ShaderJob, Toolchain};
pub use crate::tools::ToolResolver;
pub use crate::types::{Compiler, GlslTarget, ShaderModel, Target};

use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Compiles every input for `target` (`Vulkan`, `OpenGL` or an HLSL shader model) and writes the
/// generated `shaders.hpp`/`shaders.cpp` into `out_dir`. Nothing is written unless every shader
/// compiles.
pub fn build_shaders(
    target: &str,
    out_dir: &Path,
    inputs: &[PathBuf],
    config: &Config,
) -> Result<(), Error> {
    let target = Target::parse(target)?;
    let resolver = ToolResolver::new(&config.sdk_env, config.tools_dir());
    let tools = resolve_toolchain(target, &resolver, config.reflect)?;
    let scratch = ScratchFiles::new();
    let runner = ProcessRunner;
    let result = compile_and_emit(target, tools, out_dir, inputs, config, &runner, &scratch);
    scratch.cleanup();
    result
}

pub fn resolve_toolchain(
    target: Target,
    resolver: &ToolResolver,
    reflect: bool,
) -> Result<Toolchain, Error> {
    let compiler = resolver.require(target.compiler().tool_name())?;
    let reflector = if reflect && target.supports_reflection() {
        resolver.optional("spirv-cross")
    } else {
        None
    };
    Ok(Toolchain {
        compiler,
        reflector,
    })
}

/// The part of [`build_shaders`] after tools are resolved.
pub fn compile_and_emit<R: Runner>(
    target: Target,
    tools: Toolchain,
    out_dir: &Path,
    inputs: &[PathBuf],
    config: &Config,
    runner: &R,
    scratch: &ScratchFiles,
) -> Result<(), Error> {
    if !out_dir.is_dir() {
        return Err(Error::OutputDirMissing(out_dir.to_owned()));
    }
    let jobs: Vec<ShaderJob> = inputs
        .iter()
        .map(|input| ShaderJob::new(input.clone(), target))
        .collect();
    let concurrency = config.concurrency();
    info!(
        "compiling {} shaders for {} with {} threads",
        jobs.len(),
        target.group_tag(),
        concurrency
    );

    let pipeline = Pipeline::new(tools, runner, scratch);
    let shaders = run_all(&jobs, concurrency, |job| pipeline.compile(job))?;
    check_unique_identifiers(&shaders)?;

    let layout = Layout {
        columns: config.columns.max(1) as usize,
        indent: config.indent as usize,
    };
    write_bundle(&shaders, out_dir, target.group_tag(), layout)?;
    info!(
        "wrote {} and {} to {}",
        HEADER_FILE,
        SOURCE_FILE,
        out_dir.display()
    );
    Ok(())
}

fn check_unique_identifiers(shaders: &[CompiledShader]) -> Result<(), Error> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for shader in shaders {
        if let Some(first) = seen.insert(&shader.identifier, &shader.input) {
            return Err(Error::DuplicateIdentifier {
                identifier: shader.identifier.clone(),
                first: first.to_owned(),
                second: shader.input.clone(),
            });
        }
    }
    Ok(())
}
