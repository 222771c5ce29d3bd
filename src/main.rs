use std::path::{Path, PathBuf};

use acme_oma_rs::image_pipeline::{
    ConversionConfig, HobjToOmaPipeline, OmaHeader, OmaVariant, read_hobj, read_oma_frame,
    write_oma,
};
use acme_oma_rs::logger;

use anyhow::{Context, bail};
use tracing::{error, info};

const USAGE: &str = "usage: acme_oma <input.hobj|input.o2d> [output] [--legacy]";

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
    variant: OmaVariant,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut input = None;
    let mut output = None;
    let mut variant = OmaVariant::Tagged;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--legacy" => variant = OmaVariant::Legacy,
            "-h" | "--help" => bail!(USAGE),
            _ if input.is_none() => input = Some(PathBuf::from(&arg)),
            _ if output.is_none() => output = Some(PathBuf::from(&arg)),
            _ => bail!("unexpected argument {arg:?}\n{USAGE}"),
        }
    }

    let input = input.context(USAGE)?;
    Ok(Args { input, output, variant })
}

fn is_hobj(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("hobj"))
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = ConversionConfig::builder().variant(args.variant).build();

    if is_hobj(&args.input) {
        match &args.output {
            Some(output) => {
                let pipeline = HobjToOmaPipeline::new(config);
                let written = pipeline
                    .convert_file(&args.input, output)
                    .with_context(|| format!("converting {}", args.input.display()))?;
                info!("Wrote {}", written.display());
            }
            None => {
                let image = read_hobj(&args.input)
                    .with_context(|| format!("reading {}", args.input.display()))?;
                info!("HOBJ frame: {} rows x {} cols", image.rows(), image.cols());
            }
        }
        return Ok(());
    }

    let frame = read_oma_frame(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    info!(
        "OMA2 {:?} frame: shape {:?}",
        frame.header.variant(),
        frame.image.shape()
    );
    if let OmaHeader::Tagged(header) = &frame.header {
        if !header.comment.is_empty() {
            info!("Comment: {}", String::from_utf8_lossy(&header.comment));
        }
    }

    if let Some(output) = &args.output {
        let written = write_oma(output, &frame.image, &config)
            .with_context(|| format!("writing {}", output.display()))?;
        info!("Wrote {}", written.display());
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = parse_args()?;
    info!("Starting acme_oma...");

    if let Err(e) = run(args) {
        error!("{:#}", e);
        return Err(e);
    }

    Ok(())
}
