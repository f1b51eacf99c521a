use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;

use tracing::info;

use parbrot_core::{Complex, PixelCoord, Viewport};
use parbrot_render::{
    render_frame, write_png, FrameBuffer, SnapshotInfo, StrategyKind, REGISTRY,
};

/// Parsed command description: where to write the frame, how big it is, and
/// the view to render.
#[derive(Debug)]
struct Args {
    out: PathBuf,
    width: u32,
    height: u32,
    strategy: StrategyKind,
    center: Option<Complex>,
    zoom: f64,
    max_count: Option<u32>,
}

/// Parse a pair like `640x480` or `-0.5,0.25` separated by `sep`.
fn parse_pair<T: FromStr>(s: &str, sep: char) -> Option<(T, T)> {
    let (left, right) = s.split_once(sep)?;
    match (T::from_str(left), T::from_str(right)) {
        (Ok(l), Ok(r)) => Some((l, r)),
        _ => None,
    }
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    if args.len() < 3 || args.len() > 7 {
        return Err(format!("expected 2 to 6 arguments, got {}", args.len() - 1));
    }
    let out = PathBuf::from(&args[1]);
    let (width, height) = parse_pair::<u32>(&args[2], 'x')
        .ok_or_else(|| format!("bad resolution {:?} (expected WIDTHxHEIGHT)", args[2]))?;
    let strategy = match args.get(3) {
        Some(key) => StrategyKind::from_key(key).map_err(|e| e.to_string())?,
        None => StrategyKind::RowParallel,
    };
    let center = match args.get(4) {
        Some(s) => Some(
            parse_pair::<f64>(s, ',')
                .map(|(re, im)| Complex::new(re, im))
                .ok_or_else(|| format!("bad centre {s:?} (expected RE,IM)"))?,
        ),
        None => None,
    };
    let zoom = match args.get(5) {
        Some(s) => {
            let z: f64 = s.parse().map_err(|_| format!("bad zoom {s:?}"))?;
            if !z.is_finite() || z <= 0.0 {
                return Err(format!("zoom must be positive and finite, got {z}"));
            }
            z
        }
        None => 1.0,
    };
    let max_count = match args.get(6) {
        Some(s) => {
            let cap: u32 = s
                .parse()
                .map_err(|_| format!("bad iteration cap {s:?}"))?;
            if cap == 0 {
                return Err("iteration cap must be at least 1".to_string());
            }
            Some(cap)
        }
        None => None,
    };
    Ok(Args {
        out,
        width,
        height,
        strategy,
        center,
        zoom,
        max_count,
    })
}

/// Build the requested view by driving the same operations the interactive
/// controls use: pan to the centre, zoom about the centre pixel, adjust the
/// cap.
fn assemble_viewport(args: &Args) -> Viewport {
    let mut viewport = Viewport::home(args.width, args.height);
    let centre_px = PixelCoord::new(args.width / 2, args.height / 2);
    if let Some(centre) = args.center {
        let current = viewport.world_at(centre_px);
        viewport.pan(
            (centre.re - current.re) / viewport.scale.x,
            (centre.im - current.im) / viewport.scale.y,
        );
    }
    if args.zoom != 1.0 {
        viewport.zoom_about(1.0 / args.zoom, centre_px);
    }
    if let Some(cap) = args.max_count {
        viewport.adjust_max_count(i64::from(cap) - i64::from(viewport.max_count));
    }
    viewport
}

fn run(args: Args) -> parbrot_render::Result<()> {
    let viewport = assemble_viewport(&args);
    info!(
        offset = %viewport.offset,
        scale_x = viewport.scale.x,
        max_count = viewport.max_count,
        strategy = %args.strategy,
        "view assembled"
    );

    let sink = FrameBuffer::new(args.width, args.height);
    let stats = render_frame(&viewport, args.width, args.height, args.strategy, &sink);

    write_png(
        &sink.to_rgba(),
        args.width,
        args.height,
        &args.out,
        &SnapshotInfo {
            viewport,
            strategy: args.strategy,
        },
    )?;
    info!(
        path = %args.out.display(),
        elapsed_ms = stats.elapsed.as_millis(),
        pixels = stats.pixels,
        "wrote frame"
    );
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: parbrot FILE WIDTHxHEIGHT [STRATEGY] [CENTER] [ZOOM] [MAXCOUNT]");
    eprintln!();
    eprintln!("Renders one frame of the Mandelbrot set to FILE as a PNG.");
    eprintln!();
    eprintln!("  FILE          output path, e.g. frame.png");
    eprintln!("  WIDTHxHEIGHT  image size in pixels, e.g. 1280x720");
    eprintln!("  STRATEGY      row scheduling policy (default row-parallel):");
    for entry in REGISTRY.iter() {
        eprintln!("                  {:<16}{}", entry.key, entry.label);
    }
    eprintln!("  CENTER        world point at the image centre as RE,IM");
    eprintln!("  ZOOM          magnification relative to the home view (default 1)");
    eprintln!(
        "  MAXCOUNT      escape iteration cap (default {})",
        Viewport::DEFAULT_MAX_COUNT
    );
    eprintln!();
    eprintln!("Example: parbrot seahorse.png 1920x1080 index-parallel -0.746,0.11 200 1500");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(msg) => {
            eprintln!("parbrot: {msg}");
            eprintln!();
            print_usage();
            exit(1);
        }
    };

    if let Err(err) = run(parsed) {
        eprintln!("parbrot: {err}");
        exit(1);
    }
}
