use std::path::PathBuf;

pub const USAGE: &str = "usage: shaderpack <Vulkan|OpenGL|shader model> <output dir> <input file>...";

pub struct Args {
    pub target: String,
    pub out_dir: PathBuf,
    pub inputs: Vec<PathBuf>,
}

impl Args {
    pub fn parse() -> Option<Args> {
        Args::from_args(std::env::args().skip(1))
    }

    fn from_args(mut args: impl Iterator<Item = String>) -> Option<Args> {
        let target = args.next()?;
        let out_dir = PathBuf::from(args.next()?);
        let inputs: Vec<PathBuf> = args.map(PathBuf::from).collect();
        if inputs.is_empty() {
            return None;
        }
        Some(Args {
            target,
            out_dir,
            inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Args> {
        Args::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn positional_arguments() {
        let args = parse(&["5.0", "gen", "a.vs.hlsl", "b.ps.hlsl"]).unwrap();
        assert_eq!(args.target, "5.0");
        assert_eq!(args.out_dir, PathBuf::from("gen"));
        assert_eq!(
            args.inputs,
            [PathBuf::from("a.vs.hlsl"), PathBuf::from("b.ps.hlsl")]
        );
    }

    #[test]
    fn too_few_arguments() {
        assert!(parse(&[]).is_none());
        assert!(parse(&["Vulkan"]).is_none());
        assert!(parse(&["Vulkan", "gen"]).is_none());
    }
}
