//! Icosphere-unwrap CLI.
//!
//! Unwraps an equirectangular panorama onto the net of an icosahedron.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use icosphere_unwrap::export::{
    export_face_pngs, export_net_png, load_source, ImageIoError, PngExportOptions,
};
use icosphere_unwrap::geometry::{to_lat_lon, Icosahedron, FACE_COUNT};
use icosphere_unwrap::layout::NetLayout;
use icosphere_unwrap::projection::TriangleRaster;
use icosphere_unwrap::{IcosahedralSampler, Orientation, UnwrapConfig};

/// Equirectangular panorama to icosahedral net unwrapper.
#[derive(Parser)]
#[command(name = "icosphere-unwrap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unwrap a panorama into an icosahedral net.
    Unwrap {
        /// Equirectangular input image (2:1 aspect ratio).
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG path.
        #[arg(short, long)]
        output: PathBuf,

        /// Width of one triangular face in pixels.
        #[arg(short = 'r', long, default_value = "600")]
        face_resolution: u32,

        /// Net rotation (0-4), selecting the face column the net starts at.
        /// 2 puts face column 0 in the middle of the net.
        #[arg(short = 'f', long, default_value = "0")]
        face_offset: u32,

        /// Background colour as R,G,B.
        #[arg(long, default_value = "255,255,255", value_parser = parse_rgb)]
        background: [u8; 3],
    },

    /// Write the twenty faces as separate images.
    Faces {
        /// Equirectangular input image (2:1 aspect ratio).
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory.
        #[arg(short, long)]
        output: PathBuf,

        /// Width of one triangular face in pixels.
        #[arg(short = 'r', long, default_value = "600")]
        face_resolution: u32,

        /// Base name for output files.
        #[arg(short, long, default_value = "face")]
        name: String,
    },

    /// Display face and net sizes for a face resolution.
    Info {
        /// Width of one triangular face in pixels.
        #[arg(short = 'r', long, default_value = "600")]
        face_resolution: u32,
    },
}

fn parse_rgb(value: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected R,G,B but got '{}'", value));
    }
    let mut rgb = [0u8; 3];
    for (channel, part) in rgb.iter_mut().zip(&parts) {
        *channel = part
            .parse()
            .map_err(|_| format!("'{}' is not a value in 0-255", part))?;
    }
    Ok(rgb)
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Unwrap {
            input,
            output,
            face_resolution,
            face_offset,
            background,
        } => {
            let config = UnwrapConfig {
                face_resolution,
                face_offset,
                background,
            };
            run_unwrap(&input, &output, &config)
        }
        Commands::Faces {
            input,
            output,
            face_resolution,
            name,
        } => run_faces(&input, &output, face_resolution, &name),
        Commands::Info { face_resolution } => run_info(face_resolution),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_unwrap(
    input: &Path,
    output: &Path,
    config: &UnwrapConfig,
) -> Result<(), ImageIoError> {
    config.validate()?;

    println!("Icosphere Unwrap");
    println!("================");
    println!("Input:           {}", input.display());
    println!("Output:          {}", output.display());
    println!("Face resolution: {}", config.face_resolution);
    println!("Face offset:     {}", config.face_offset);

    let start = Instant::now();
    let source = load_source(input)?;
    println!("Source:          {}x{}", source.width(), source.height());

    let sampler = IcosahedralSampler::from_config(config)?;
    let net = sampler.unwrap(&source, config.face_offset)?;
    println!("Unwrapped in {:.2?}", start.elapsed());

    export_net_png(&net, output, &PngExportOptions::default())?;
    println!("Wrote {}x{} net to {}", net.width(), net.height(), output.display());
    Ok(())
}

fn run_faces(
    input: &Path,
    output: &Path,
    face_resolution: u32,
    name: &str,
) -> Result<(), ImageIoError> {
    UnwrapConfig::new(face_resolution, 0).validate()?;

    let start = Instant::now();
    let source = load_source(input)?;
    let sampler = IcosahedralSampler::new(face_resolution)?;
    let faces = sampler.face_images(&source)?;
    println!("Rendered {} faces in {:.2?}", faces.len(), start.elapsed());

    let paths = export_face_pngs(&faces, output, name, &PngExportOptions::default())?;
    println!("  Exported {} PNG files: {}/{}_*.png", paths.len(), output.display(), name);
    Ok(())
}

fn run_info(face_resolution: u32) -> Result<(), ImageIoError> {
    let layout = NetLayout::new(face_resolution, 0)?;
    let up = TriangleRaster::new(face_resolution, Orientation::Up)?;
    let ico = Icosahedron::shared()?;

    println!("Icosphere Unwrap - Layout Info");
    println!("==============================");
    println!();
    println!("Face raster:   {}x{}", up.width(), up.height());
    println!("Face pixels:   {} inside the triangle", up.inside_count());
    println!("Net size:      {}x{}", layout.width(), layout.height());
    println!(
        "Net coverage:  {:.1}%",
        100.0 * (up.inside_count() * FACE_COUNT) as f64
            / (layout.width() as f64 * layout.height() as f64)
    );
    println!("Edge length:   {:.6} (unit sphere chord)", ico.edge_length());
    println!();
    println!("Faces (offset 0):");
    println!("  idx  band   orient  slot  position      centre lat/lon (deg)");
    for face in ico.faces() {
        let p = layout.placement(face.index)?;
        let (lat, lon) = to_lat_lon(ico.face_center(face));
        println!(
            "  {:>3}  {:<5}  {:<6}  {:>4}  ({:>5}, {:>5})  {:>7.2} {:>7.2}",
            face.index,
            face.band.short_name(),
            format!("{:?}", face.orientation()),
            p.slot,
            p.x,
            p.y,
            lat.to_degrees(),
            lon.to_degrees()
        );
    }
    Ok(())
}
