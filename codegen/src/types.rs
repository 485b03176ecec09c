use crate::error::Error;
use std::cmp::Ordering;
use std::ffi::OsString;
use std::path::Path;

/// Shader models above this one are compiled with dxc, the rest with fxc.
pub const MODERN_SHADER_MODEL: ShaderModel = ShaderModel {
    major: 5,
    minor: 5,
    major_digits: 1,
    minor_digits: 1,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    Hlsl(ShaderModel),
    Glsl(GlslTarget),
}

/// A `major.minor` shader model. The minor part is a decimal fraction, so `5.10` is below `5.5`,
/// and digit counts are kept to reproduce the version in profiles as written.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShaderModel {
    major: u32,
    minor: u32,
    major_digits: u32,
    minor_digits: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GlslTarget {
    Vulkan,
    OpenGL,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Compiler {
    Fxc,
    Dxc,
    GlslangValidator(GlslTarget),
}

impl Target {
    pub fn parse(text: &str) -> Result<Target, Error> {
        match text {
            "Vulkan" => Ok(Target::Glsl(GlslTarget::Vulkan)),
            "OpenGL" => Ok(Target::Glsl(GlslTarget::OpenGL)),
            _ => ShaderModel::parse(text)
                .map(Target::Hlsl)
                .ok_or_else(|| Error::UnknownShaderType(text.to_owned())),
        }
    }

    /// Namespace the generated symbols are grouped under.
    pub fn group_tag(&self) -> &'static str {
        match self {
            Target::Hlsl(_) => "dx",
            Target::Glsl(GlslTarget::Vulkan) => "vk",
            Target::Glsl(GlslTarget::OpenGL) => "gl",
        }
    }

    pub fn source_extension(&self) -> &'static str {
        match self {
            Target::Hlsl(_) => "hlsl",
            Target::Glsl(_) => "glsl",
        }
    }

    pub fn output_extension(&self) -> &'static str {
        match self {
            Target::Hlsl(_) => ".cso",
            Target::Glsl(_) => ".spv",
        }
    }

    pub fn compiler(&self) -> Compiler {
        match *self {
            Target::Hlsl(model) if model.compare(&MODERN_SHADER_MODEL) == Ordering::Greater => {
                Compiler::Dxc
            }
            Target::Hlsl(_) => Compiler::Fxc,
            Target::Glsl(target) => Compiler::GlslangValidator(target),
        }
    }

    /// Only SPIR-V output can be fed to the reflection pass.
    pub fn supports_reflection(&self) -> bool {
        matches!(self, Target::Glsl(_))
    }
}

impl ShaderModel {
    fn parse(text: &str) -> Option<ShaderModel> {
        let (major, minor) = text.split_once('.')?;
        let digits =
            |s: &str| (1..=9).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit());
        if !digits(major) || !digits(minor) {
            return None;
        }
        Some(ShaderModel {
            major: major.parse().ok()?,
            minor: minor.parse().ok()?,
            major_digits: major.len() as u32,
            minor_digits: minor.len() as u32,
        })
    }

    /// Numeric comparison of the two versions as decimals.
    pub fn compare(&self, other: &ShaderModel) -> Ordering {
        let scaled = |model: &ShaderModel, digits: u32| {
            u128::from(model.minor) * 10u128.pow(digits)
        };
        self.major.cmp(&other.major).then_with(|| {
            scaled(self, other.minor_digits).cmp(&scaled(other, self.minor_digits))
        })
    }

    /// Compiler profile for the given stage, like `vs_5_0`.
    pub fn profile(&self, stage: &str) -> String {
        let major_digits = self.major_digits as usize;
        let minor_digits = self.minor_digits as usize;
        format!(
            "{stage}_{:0major_digits$}_{:0minor_digits$}",
            self.major, self.minor
        )
    }
}

impl Compiler {
    pub fn tool_name(&self) -> &'static str {
        match self {
            Compiler::Fxc => "fxc",
            Compiler::Dxc => "dxc",
            Compiler::GlslangValidator(_) => "glslangValidator",
        }
    }

    /// Arguments compiling `input` into `output`. `profile` is the full target profile for the HLSL
    /// compilers and the bare stage tag for glslangValidator.
    pub fn args(&self, input: &Path, profile: &str, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            Compiler::Dxc => ["-Ges", "-WX", "-Zi", "-Qembed_debug", "-T", profile, "-Fo"]
                .map(OsString::from)
                .into(),
            Compiler::Fxc => ["/nologo", "/Ges", "/WX", "/Zi", "/T", profile, "/Fo"]
                .map(OsString::from)
                .into(),
            Compiler::GlslangValidator(target) => {
                let api = match target {
                    GlslTarget::Vulkan => "-V",
                    GlslTarget::OpenGL => "-G",
                };
                ["-g", api, "-S", profile, "-o"].map(OsString::from).into()
            }
        };
        args.push(output.into());
        args.push(input.into());
        args
    }
}
