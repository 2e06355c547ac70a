//! rtow - render a sphere scene to an image file.
//!
//! Without `--scene` the random cover scene is generated from `--seed`.

mod output;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rtow_renderer::{
    render, render_parallel, Camera, HittableList, ImageBuffer, DEFAULT_BUCKET_SIZE,
};
use rtow_scene::{cover_scene, SceneDescription};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "rtow", version, about = "Monte Carlo path tracer for sphere scenes")]
struct Args {
    /// JSON scene description (defaults to the random cover scene)
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output image; `.ppm` is written as text, other extensions via `image`
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Override the image width in pixels
    #[arg(short, long)]
    width: Option<u32>,

    /// Override samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    /// Seed for scene generation and sampling
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads for the parallel renderer (defaults to all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Render on the calling thread from a single random stream
    #[arg(long, conflicts_with = "threads")]
    single_threaded: bool,

    /// Bucket edge length for the parallel renderer
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,

    /// Render the scene this many times and report the mean frame time
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Write the scene description as JSON and exit without rendering
    #[arg(long)]
    dump_scene: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting rtow");

    let description = load_description(&args)?;

    if let Some(path) = &args.dump_scene {
        let json = description.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Wrote scene description to {}", path.display());
        return Ok(());
    }

    let scene = description.build().context("invalid scene")?;
    let camera = scene.camera.build().context("invalid camera settings")?;
    log::info!(
        "Rendering {} objects at {}x{}, {} spp, depth {}",
        scene.object_count(),
        camera.image_width(),
        camera.image_height(),
        camera.samples_per_pixel(),
        camera.max_depth()
    );

    let pool = match args.threads {
        Some(threads) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("failed to build thread pool")?,
        ),
        None => None,
    };

    let frames = args.frames.max(1);
    let start = Instant::now();
    let mut image = render_frame(&args, &camera, &scene.world, pool.as_ref(), args.seed);
    for frame in 1..frames {
        let seed = args.seed.wrapping_add(u64::from(frame));
        image = render_frame(&args, &camera, &scene.world, pool.as_ref(), seed);
    }

    let elapsed = start.elapsed();
    if frames > 1 {
        log::info!(
            "Rendered {} frames in {:.2?} ({:.2?} per frame)",
            frames,
            elapsed,
            elapsed / frames
        );
    }

    output::save_image(&image, &args.output)
}

fn render_frame(
    args: &Args,
    camera: &Camera,
    world: &HittableList,
    pool: Option<&rayon::ThreadPool>,
    seed: u64,
) -> ImageBuffer {
    if args.single_threaded {
        let mut rng = StdRng::seed_from_u64(seed);
        return render(camera, world, &mut rng);
    }

    let render_buckets = || render_parallel(camera, world, seed, args.bucket_size);
    match pool {
        Some(pool) => pool.install(render_buckets),
        None => render_buckets(),
    }
}

/// Read the scene file, or generate the cover scene, then apply the
/// command line overrides to its camera.
fn load_description(args: &Args) -> Result<SceneDescription> {
    let mut description = match &args.scene {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SceneDescription::from_json(&json)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => {
            log::info!("Generating cover scene with seed {}", args.seed);
            let mut rng = StdRng::seed_from_u64(args.seed);
            cover_scene(&mut rng)
        }
    };

    let camera = &mut description.camera;
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(samples) = args.samples {
        camera.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        camera.max_depth = depth;
    }

    Ok(description)
}
