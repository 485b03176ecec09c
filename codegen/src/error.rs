use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid path '{}', should be like '{expected}'", path.display())]
    InvalidShaderPath { path: PathBuf, expected: String },
    #[error("unknown shader type {0}, expected Vulkan, OpenGL or a shader model like 5.0")]
    UnknownShaderType(String),
    #[error("tool {name} not found, install the SDK or point the {env} environment variable at it")]
    ToolNotFound { name: String, env: String },
    #[error("failed to start {}: {source}", program.display())]
    ProcessSpawnFailed {
        program: PathBuf,
        source: std::io::Error,
    },
    #[error("process {} exited with {}\noutput was:\n{}", program.display(), exit_status(*code), output.join("\n"))]
    ProcessFailed {
        program: PathBuf,
        code: Option<i32>,
        output: Vec<String>,
    },
    #[error("io on {} failed with {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("output directory {} does not exist", .0.display())]
    OutputDirMissing(PathBuf),
    #[error("{} and {} both produce symbol g_{identifier}", first.display(), second.display())]
    DuplicateIdentifier {
        identifier: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] knuffel::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

fn exit_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_owned(),
    }
}
