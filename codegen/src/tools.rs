use crate::error::Error;
use log::{info, warn};
use std::path::PathBuf;

/// Subdirectories of the SDK root that may hold its executables.
const SDK_BIN_DIRS: [&str; 2] = ["Bin", "bin"];

/// Finds compiler executables, looking in the SDK named by an environment variable before the
/// bundled tools directory.
pub struct ToolResolver {
    sdk_env: String,
    search_dirs: Vec<PathBuf>,
}

impl ToolResolver {
    pub fn new(sdk_env: &str, tools_dir: PathBuf) -> ToolResolver {
        let mut search_dirs = Vec::new();
        match std::env::var_os(sdk_env) {
            Some(sdk_root) => {
                let sdk_root = PathBuf::from(sdk_root);
                match SDK_BIN_DIRS
                    .iter()
                    .map(|dir| sdk_root.join(dir))
                    .find(|dir| dir.is_dir())
                {
                    Some(bin) => search_dirs.push(bin),
                    None => warn!(
                        "{sdk_env} environment variable is set but does not contain a Bin directory"
                    ),
                }
            }
            None => warn!("{sdk_env} environment variable not set"),
        }
        search_dirs.push(tools_dir);
        ToolResolver {
            sdk_env: sdk_env.to_owned(),
            search_dirs,
        }
    }

    /// Resolver searching exactly the given directories.
    pub fn with_dirs(sdk_env: &str, search_dirs: Vec<PathBuf>) -> ToolResolver {
        ToolResolver {
            sdk_env: sdk_env.to_owned(),
            search_dirs,
        }
    }

    pub fn require(&self, name: &str) -> Result<PathBuf, Error> {
        self.find(name).ok_or_else(|| Error::ToolNotFound {
            name: name.to_owned(),
            env: self.sdk_env.clone(),
        })
    }

    /// Like [`ToolResolver::require`], for tools whose absence only disables a feature.
    pub fn optional(&self, name: &str) -> Option<PathBuf> {
        self.find(name)
    }

    fn find(&self, name: &str) -> Option<PathBuf> {
        let bin_name = format!("{name}{}", std::env::consts::EXE_SUFFIX);
        let path = self
            .search_dirs
            .iter()
            .map(|dir| dir.join(&bin_name))
            .find(|path| path.is_file())?;
        info!("found suitable tool {}", path.display());
        Some(path)
    }

    #[cfg(test)]
    fn search_dirs(&self) -> impl Iterator<Item = &std::path::Path> {
        self.search_dirs.iter().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::ScratchFiles;
    use std::path::Path;

    fn touch_tool(dir: &Path, name: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(format!("{name}{}", std::env::consts::EXE_SUFFIX));
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn first_directory_wins() {
        let scratch = ScratchFiles::new();
        let sdk = scratch.allocate_dir("-sdk").unwrap();
        let bundled = scratch.allocate_dir("-bundled").unwrap();
        touch_tool(&bundled, "dxc");
        let expected = touch_tool(&sdk, "dxc");
        touch_tool(&bundled, "spirv-cross");

        let resolver = ToolResolver::with_dirs("TEST_SDK", vec![sdk.clone(), bundled.clone()]);
        assert_eq!(resolver.require("dxc").unwrap(), expected);
        assert_eq!(
            resolver.optional("spirv-cross").unwrap(),
            bundled.join(format!("spirv-cross{}", std::env::consts::EXE_SUFFIX))
        );
    }

    #[test]
    fn missing_tool() {
        let scratch = ScratchFiles::new();
        let empty = scratch.allocate_dir("-empty").unwrap();
        let resolver = ToolResolver::with_dirs("TEST_SDK", vec![empty]);
        assert!(resolver.optional("spirv-lint").is_none());
        match resolver.require("fxc") {
            Err(Error::ToolNotFound { name, env }) => {
                assert_eq!(name, "fxc");
                assert_eq!(env, "TEST_SDK");
            }
            other => panic!("expected ToolNotFound, got {other:?}"),
        }
    }

    #[test]
    fn sdk_bin_directory_comes_first() {
        let scratch = ScratchFiles::new();
        let sdk = scratch.allocate_dir("-sdk").unwrap();
        std::fs::create_dir_all(sdk.join("Bin")).unwrap();
        let env = "SHADERPACK_TEST_SDK_ROOT";
        std::env::set_var(env, &sdk);
        let resolver = ToolResolver::new(env, PathBuf::from("bundled"));
        std::env::remove_var(env);
        let dirs: Vec<&Path> = resolver.search_dirs().collect();
        assert_eq!(dirs, [sdk.join("Bin").as_path(), Path::new("bundled")]);
    }

    #[test]
    fn unset_sdk_falls_back_to_bundled() {
        let resolver = ToolResolver::new("SHADERPACK_TEST_UNSET_SDK", PathBuf::from("bundled"));
        let dirs: Vec<&Path> = resolver.search_dirs().collect();
        assert_eq!(dirs, [Path::new("bundled")]);
    }
}
