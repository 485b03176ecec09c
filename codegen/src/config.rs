use crate::error::Error;
use knuffel::Decode;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "SHADERPACK_CONFIG";
pub const CONFIG_PATH: &str = "shaderpack.kdl";

#[derive(Debug, Decode)]
pub struct Config {
    #[knuffel(child, unwrap(argument), default = "VULKAN_SDK".into())]
    pub sdk_env: String,
    #[knuffel(child, unwrap(argument))]
    pub tools_dir: Option<String>,
    #[knuffel(child, unwrap(argument), default = 16)]
    pub columns: u32,
    #[knuffel(child, unwrap(argument), default = 2)]
    pub indent: u32,
    #[knuffel(child, unwrap(argument))]
    pub jobs: Option<u32>,
    #[knuffel(child, unwrap(argument), default = true)]
    pub reflect: bool,
}

impl Config {
    /// Reads the file named by `SHADERPACK_CONFIG`, or `shaderpack.kdl` in the working directory
    /// if there is one. Without either, everything is left at defaults.
    pub fn load() -> Result<Config, Error> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None if Path::new(CONFIG_PATH).exists() => PathBuf::from(CONFIG_PATH),
            None => return Ok(Config::default()),
        };
        let text = std::fs::read_to_string(&path).map_err(Error::io(&path))?;
        Config::parse(&path.to_string_lossy(), &text)
    }

    pub fn parse(file_name: &str, text: &str) -> Result<Config, Error> {
        let config: Config = knuffel::parse(file_name, text)?;
        log::debug!("loaded configuration {file_name}: {config:?}");
        Ok(config)
    }

    /// Directory searched for tools after the SDK, `bin` next to the running executable unless
    /// configured otherwise.
    pub fn tools_dir(&self) -> PathBuf {
        match &self.tools_dir {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(|dir| dir.join("bin")))
                .unwrap_or_else(|| PathBuf::from("bin")),
        }
    }

    pub fn concurrency(&self) -> usize {
        match self.jobs {
            Some(jobs) => jobs.max(1) as usize,
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            sdk_env: "VULKAN_SDK".to_owned(),
            tools_dir: None,
            columns: 16,
            indent: 2,
            jobs: None,
            reflect: true,
        }
    }
}
