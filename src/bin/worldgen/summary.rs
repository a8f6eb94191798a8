use trailhead::routes::{DayHike, RouteEstimate};
use trailhead::WorldMap;

pub fn print_world_summary(world: &WorldMap, output: Option<&std::path::Path>) {
    if let Some(path) = output {
        println!("World saved successfully to: {}", path.display());
    }
    let (min, max) = world.heightmap.min_max();

    println!("\nWorld summary:");
    println!("  Seed: {}", world.seed);
    println!(
        "  Terrain: {}x{} (heights {min:.3}..{max:.3})",
        world.width(),
        world.height()
    );

    println!("  Lakes: {}", world.lakes.len());
    for lake in &world.lakes {
        println!(
            "    {} at ({}, {}), size {}, {}",
            lake.name,
            lake.cell.x,
            lake.cell.y,
            lake.base_size,
            lake.shape.label()
        );
    }

    println!("  Peaks: {}", world.peaks.len());
    for peak in &world.peaks {
        println!(
            "    {} at ({}, {}), {} ft",
            peak.name,
            peak.cell.x,
            peak.cell.y,
            peak.elevation_feet()
        );
    }

    println!("  Settlements: {}", world.settlements.len());
    for settlement in &world.settlements {
        println!(
            "    {} at ({}, {}), {} ft",
            settlement.name, settlement.cell.x, settlement.cell.y, settlement.elevation_feet
        );
    }
}

pub fn print_day_hikes(hikes: &[DayHike]) {
    println!("  Day hikes: {}", hikes.len());
    for hike in hikes {
        println!(
            "    {} ({}, {:.1} mi)",
            hike.name(),
            hike.destination,
            hike.miles()
        );
    }
}

pub fn print_route(route: &RouteEstimate) {
    println!(
        "\nTrail from ({}, {}) to ({}, {}):",
        route.from.x, route.from.y, route.to.x, route.to.y
    );
    if route.direct {
        println!("  No passable trail, using a direct connector");
    } else {
        println!(
            "  {} cells, {:.1} grid units",
            route.cells.len(),
            route.raw_units
        );
    }
    println!("  {:.1} mi as a {} route", route.miles, route.difficulty);
}
