//! trailstitch CLI - Debug tool for route stitching and POI placement
//!
//! Usage:
//!   trailstitch-cli stitch <input> [--output <file>] [--tolerant] [--no-m]
//!   trailstitch-cli pois <route> <pois> [--output <file>] [--tolerance-km <km>]
//!   trailstitch-cli clip <input> --left <x> --right <x> --top <y> --bottom <y>
//!
//! The tool reads GeoJSON (a FeatureCollection, a single Feature or a bare
//! geometry), runs the requested pipeline step with verbose output of what
//! the stitcher did, and optionally writes GeoJSON back out.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use trailstitch::{
    add_m, annotate_pois, ascent_descent, clip, stitch, stitch_all, BBox, Feature,
    FeatureCollection, Geometry, Route, DEFAULT_SNAP_TOLERANCE_KM,
};

#[derive(Parser)]
#[command(name = "trailstitch-cli")]
#[command(about = "Debug tool for route stitching and linear referencing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose per-segment output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Stitch a route relation's ways into a continuous line
    Stitch {
        /// GeoJSON file with the route ways
        input: PathBuf,

        /// Output file for the stitched GeoJSON feature
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep every chain instead of failing on disconnected ways
        #[arg(long)]
        tolerant: bool,

        /// Skip writing m-values onto the stitched line
        #[arg(long)]
        no_m: bool,
    },

    /// Project POI features onto a stitched route
    Pois {
        /// GeoJSON file with the route ways
        route: PathBuf,

        /// GeoJSON file with the POI features
        pois: PathBuf,

        /// Output file for the annotated POI collection
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Snap tolerance in kilometers
        #[arg(long, default_value_t = DEFAULT_SNAP_TOLERANCE_KM)]
        tolerance_km: f64,
    },

    /// Keep the route segments that touch a bounding box
    Clip {
        /// GeoJSON file with the route ways
        input: PathBuf,

        /// West bound (lon)
        #[arg(long)]
        left: f64,

        /// East bound (lon)
        #[arg(long)]
        right: f64,

        /// Smaller lat bound (screen-space top)
        #[arg(long)]
        top: f64,

        /// Larger lat bound
        #[arg(long)]
        bottom: f64,

        /// Output file for the clipped GeoJSON feature
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stitch {
            input,
            output,
            tolerant,
            no_m,
        } => {
            run_stitch(&input, output.as_ref(), tolerant, no_m, cli.verbose);
        }
        Commands::Pois {
            route,
            pois,
            output,
            tolerance_km,
        } => {
            run_pois(&route, &pois, output.as_ref(), tolerance_km);
        }
        Commands::Clip {
            input,
            left,
            right,
            top,
            bottom,
            output,
        } => {
            run_clip(&input, BBox::new(left, right, top, bottom), output.as_ref());
        }
    }
}

/// Run the stitch pipeline on one route file
fn run_stitch(
    input: &PathBuf,
    output: Option<&PathBuf>,
    tolerant: bool,
    no_m: bool,
    verbose: bool,
) {
    println!("\n{}", "=".repeat(60));
    println!("ROUTE STITCHING");
    println!("{}", "=".repeat(60));

    let geometry = match load_route_geometry(input) {
        Some(g) => g,
        None => return,
    };
    let way_count = match geometry.multi_line_coordinates() {
        Ok(ways) => {
            if verbose {
                for (i, way) in ways.iter().enumerate() {
                    println!("  Way {}: {} points", i, way.len());
                }
            }
            ways.len()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    println!("\n[Step 1] Stitching {} way segments...", way_count);
    let result = if tolerant {
        stitch_all(&geometry)
    } else {
        stitch(&geometry)
    };
    let mut stitched = match result {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: {}", e);
            println!("  [WARN] Stitching failed; --tolerant keeps disconnected chains");
            return;
        }
    };
    match &stitched {
        Geometry::LineString { coordinates } => {
            println!("  [OK] Single chain with {} points", coordinates.len());
        }
        Geometry::MultiLineString { coordinates } => {
            println!("  [OK] {} chains", coordinates.len());
        }
        _ => {}
    }

    if !no_m {
        println!("\n[Step 2] Writing m-values...");
        match &mut stitched {
            Geometry::LineString { coordinates } => {
                add_m(coordinates);
                let length = coordinates.last().and_then(|p| p.m).unwrap_or(0.0);
                let gain = ascent_descent(coordinates);
                println!("  Length: {:.2} km", length);
                println!(
                    "  Ascent: {:.0} m, descent: {:.0} m",
                    gain.ascent, gain.descent
                );
            }
            Geometry::MultiLineString { coordinates } => {
                // Each chain is referenced from its own start.
                for (i, chain) in coordinates.iter_mut().enumerate() {
                    add_m(chain);
                    let length = chain.last().and_then(|p| p.m).unwrap_or(0.0);
                    println!("  Chain {}: {:.2} km, {} points", i + 1, length, chain.len());
                }
            }
            _ => {}
        }
    }

    if let Some(path) = output {
        write_geojson(&Feature::new(stitched), path);
    }
}

/// Stitch a route, then project a POI collection onto it
fn run_pois(route_path: &PathBuf, pois_path: &PathBuf, output: Option<&PathBuf>, tolerance_km: f64) {
    println!("\n{}", "=".repeat(60));
    println!("POI PLACEMENT");
    println!("{}", "=".repeat(60));

    println!("\n[Step 1] Loading route from: {}", route_path.display());
    let geometry = match load_route_geometry(route_path) {
        Some(g) => g,
        None => return,
    };
    let route = match Route::from_geometry(&geometry) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    println!(
        "  [OK] {:.2} km, {} points",
        route.length_km(),
        route.coords().len()
    );

    println!("\n[Step 2] Loading POIs from: {}", pois_path.display());
    let mut pois = match load_collection(pois_path) {
        Some(c) => c,
        None => return,
    };
    println!("  [OK] {} features", pois.features.len());

    println!("\n[Step 3] Projecting POIs onto route...");
    let snapped = annotate_pois(route.coords(), &mut pois, tolerance_km);
    println!(
        "  [OK] {} of {} snapped within {:.0} m",
        snapped,
        pois.features.len(),
        tolerance_km * 1000.0
    );

    println!("\n{}", "-".repeat(60));
    println!("RESULTS");
    println!("{}", "-".repeat(60));
    for feature in &pois.features {
        let name = feature
            .properties
            .tags
            .get("name")
            .map(String::as_str)
            .unwrap_or("(unnamed)");
        match (feature.properties.index, feature.properties.distance_km) {
            (Some(index), Some(km)) => {
                println!("  {:>8.2} km  vertex {:>6}  {}", km, index, name)
            }
            _ => println!("        --   off route     {}", name),
        }
    }

    if let Some(path) = output {
        write_geojson(&pois, path);
    }
}

/// Clip route ways against a viewport box
fn run_clip(input: &PathBuf, viewport: BBox, output: Option<&PathBuf>) {
    println!("\n{}", "=".repeat(60));
    println!("VIEWPORT CLIP");
    println!("{}", "=".repeat(60));

    let geometry = match load_route_geometry(input) {
        Some(g) => g,
        None => return,
    };
    let total = geometry
        .multi_line_coordinates()
        .map(|ways| ways.len())
        .unwrap_or(0);

    println!(
        "\n[Step 1] Clipping against x [{}, {}], y [{}, {}]...",
        viewport.left, viewport.right, viewport.top, viewport.bottom
    );
    let kept = match clip(&geometry, &viewport) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    println!("  [OK] Kept {} of {} segments", kept.len(), total);

    if let Some(path) = output {
        let clipped = Geometry::MultiLineString { coordinates: kept };
        write_geojson(&Feature::new(clipped), path);
    }
}

/// Parse a GeoJSON file that may be a FeatureCollection, a Feature or a
/// bare geometry, normalized into a collection
fn load_collection(path: &PathBuf) -> Option<FeatureCollection> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", path.display(), e);
            return None;
        }
    };
    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error parsing {}: {}", path.display(), e);
            return None;
        }
    };

    let parsed = match value.get("type").and_then(|t| t.as_str()) {
        Some("FeatureCollection") => serde_json::from_value::<FeatureCollection>(value),
        Some("Feature") => serde_json::from_value::<Feature>(value).map(|feature| {
            let mut collection = FeatureCollection::empty();
            collection.features.push(feature);
            collection
        }),
        Some(_) => serde_json::from_value::<Geometry>(value).map(|geometry| {
            let mut collection = FeatureCollection::empty();
            collection.features.push(Feature::new(geometry));
            collection
        }),
        None => {
            eprintln!("Error: {} is not GeoJSON (no type member)", path.display());
            return None;
        }
    };
    match parsed {
        Ok(collection) => Some(collection),
        Err(e) => {
            eprintln!("Error parsing {}: {}", path.display(), e);
            None
        }
    }
}

/// Pull the route geometry out of a GeoJSON file
fn load_route_geometry(path: &PathBuf) -> Option<Geometry> {
    let collection = load_collection(path)?;
    let feature = collection.route().or_else(|| {
        collection
            .features
            .iter()
            .find(|f| !matches!(f.geometry, Geometry::Point { .. }))
    });
    match feature {
        Some(f) => Some(as_way_batch(f.geometry.clone())),
        None => {
            eprintln!("Error: no route geometry in {}", path.display());
            None
        }
    }
}

/// A pre-stitched LineString is accepted as a single-way batch
fn as_way_batch(geometry: Geometry) -> Geometry {
    match geometry {
        Geometry::LineString { coordinates } => Geometry::MultiLineString {
            coordinates: vec![coordinates],
        },
        other => other,
    }
}

/// Write any serializable value as pretty-printed GeoJSON
fn write_geojson<T: serde::Serialize>(value: &T, path: &PathBuf) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing {}: {}", path.display(), e);
            return;
        }
    };
    match fs::write(path, json) {
        Ok(()) => println!("\n  [OK] Wrote {}", path.display()),
        Err(e) => eprintln!("Error writing {}: {}", path.display(), e),
    }
}
