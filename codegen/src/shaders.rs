use crate::error::Error;
use crate::helper::identifier_from_path;
use crate::process::Runner;
use crate::scratch::ScratchFiles;
use crate::types::Target;
use log::{debug, info};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct ShaderJob {
    pub input: PathBuf,
    pub target: Target,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledShader {
    pub identifier: String,
    pub input: PathBuf,
    pub bytes: Vec<u8>,
}

/// Executables used by a [`Pipeline`].
#[derive(Clone, Debug)]
pub struct Toolchain {
    pub compiler: PathBuf,
    pub reflector: Option<PathBuf>,
}

/// Compiles single shader files, writing compiler output to scratch files.
pub struct Pipeline<'a, R: Runner> {
    tools: Toolchain,
    runner: &'a R,
    scratch: &'a ScratchFiles,
}

struct SourceName<'a> {
    stage: &'a str,
}

impl ShaderJob {
    pub fn new(input: impl Into<PathBuf>, target: Target) -> ShaderJob {
        ShaderJob {
            input: input.into(),
            target,
        }
    }

    /// Checks the `<name>.<stage>.<ext>` naming and extracts the stage tag.
    fn source_name(&self) -> Result<SourceName, Error> {
        let extension = self.target.source_extension();
        let invalid = || Error::InvalidShaderPath {
            path: self.input.clone(),
            expected: format!("some-shader.vs.{extension}"),
        };
        let name = self
            .input
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(invalid)?;
        let segments: Vec<&str> = name.split('.').collect();
        match segments.as_slice() {
            [first, .., stage, ext]
                if *ext == extension && !first.is_empty() && !stage.is_empty() =>
            {
                Ok(SourceName { stage: *stage })
            }
            _ => Err(invalid()),
        }
    }

    pub fn identifier(&self) -> String {
        identifier_from_path(&self.input.with_extension(""))
    }
}

impl<'a, R: Runner> Pipeline<'a, R> {
    pub fn new(tools: Toolchain, runner: &'a R, scratch: &'a ScratchFiles) -> Pipeline<'a, R> {
        Pipeline {
            tools,
            runner,
            scratch,
        }
    }

    pub fn compile(&self, job: &ShaderJob) -> Result<CompiledShader, Error> {
        let source = job.source_name()?;
        let profile = match job.target {
            Target::Hlsl(model) => model.profile(source.stage),
            Target::Glsl(_) => source.stage.to_owned(),
        };

        let output = self.scratch.allocate(job.target.output_extension());
        let args = job.target.compiler().args(&job.input, &profile, &output);
        self.runner.run(&self.tools.compiler, &args)?;

        if let Some(reflector) = &self.tools.reflector {
            self.reflect(reflector, &output)?;
        }

        let bytes = std::fs::read(&output).map_err(Error::io(&output))?;
        let identifier = job.identifier();
        info!("{}: {} -> {identifier}", profile, job.input.display());
        Ok(CompiledShader {
            identifier,
            input: job.input.clone(),
            bytes,
        })
    }

    fn reflect(&self, reflector: &Path, spirv: &Path) -> Result<(), Error> {
        let json = self.scratch.allocate(".json");
        let args: Vec<OsString> = vec![
            spirv.into(),
            "--reflect".into(),
            "--output".into(),
            json.clone().into(),
        ];
        let tool = reflector.file_stem().unwrap_or_default().to_string_lossy();
        for line in self.runner.run(reflector, &args)? {
            println!("[{tool}] {line}");
        }
        if let Ok(reflection) = std::fs::read_to_string(&json) {
            debug!("reflection of {}: {reflection}", spirv.display());
        }
        Ok(())
    }
}
