use anyhow::{bail, Context};
use focusstack::config::StackConfig;
use focusstack::io::{create_output, load_image, sort_paths, stack_images, write_png};
use std::env;
use std::path::PathBuf;

const USAGE: &str = "Usage: focusstack [-o stacked.png] [-d depth.png] [--config FILE] \
[--kernel-size N] [--sigma S] [--json] FILES...";

struct Args {
    output: PathBuf,
    depth: PathBuf,
    config: Option<PathBuf>,
    kernel_size: Option<usize>,
    sigma: Option<f64>,
    json: bool,
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    focusstack::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    run(args)
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut parsed = Args {
        output: PathBuf::from("stacked.png"),
        depth: PathBuf::from("depth.png"),
        config: None,
        kernel_size: None,
        sigma: None,
        json: false,
        files: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" => parsed.output = PathBuf::from(value(args, &mut i, "-o")?),
            "-d" => parsed.depth = PathBuf::from(value(args, &mut i, "-d")?),
            "--config" => parsed.config = Some(PathBuf::from(value(args, &mut i, "--config")?)),
            "--kernel-size" => {
                let raw = value(args, &mut i, "--kernel-size")?;
                let size = raw
                    .parse::<usize>()
                    .with_context(|| format!("invalid --kernel-size {:?}", raw))?;
                parsed.kernel_size = Some(size);
            }
            "--sigma" => {
                let raw = value(args, &mut i, "--sigma")?;
                let sigma = raw
                    .parse::<f64>()
                    .with_context(|| format!("invalid --sigma {:?}", raw))?;
                parsed.sigma = Some(sigma);
            }
            "--json" => parsed.json = true,
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option {}", flag),
            file => parsed.files.push(PathBuf::from(file)),
        }
        i += 1;
    }

    Ok(parsed)
}

fn value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> anyhow::Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.as_str()),
        None => bail!("{} requires a value", flag),
    }
}

/// A named `--config` must exist; otherwise `focusstack.toml` is optional.
/// Flags override whatever the file says.
fn resolve_config(args: &Args) -> anyhow::Result<StackConfig> {
    let mut config = match &args.config {
        Some(path) => StackConfig::load_existing(path)
            .with_context(|| format!("couldn't load config {:?}", path))?,
        None => StackConfig::load_or_default(),
    };
    if let Some(kernel_size) = args.kernel_size {
        config.kernel_size = kernel_size;
    }
    if let Some(sigma) = args.sigma {
        config.sigma = sigma;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;

    // Open outputs first so an unwritable destination fails before decoding.
    let stacked_file = create_output(&args.output)
        .with_context(|| format!("couldn't open {:?}", args.output))?;
    let depth_file = create_output(&args.depth)
        .with_context(|| format!("couldn't open {:?}", args.depth))?;

    if args.files.is_empty() {
        bail!("require at least one image argument");
    }

    let images = sort_paths(&args.files)
        .iter()
        .map(|path| load_image(path).with_context(|| format!("couldn't decode image {:?}", path)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let output = stack_images(&images, &config).context("couldn't create focus stack")?;

    write_png(&output.stacked, stacked_file, &args.output)?;
    write_png(&output.depth, depth_file, &args.depth)?;

    if args.json {
        println!("{}", serde_json::to_string(&output.summary)?);
    } else {
        log::info!(
            "Stacked {} images ({}x{}) into {:?} and {:?}",
            output.summary.num_images,
            output.summary.width,
            output.summary.height,
            args.output,
            args.depth
        );
    }

    Ok(())
}
