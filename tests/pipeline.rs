//! Integration tests for the full generation pipeline

use proptest::prelude::*;

use realmgen::grid::Cell;
use realmgen::noise::NoiseField;
use realmgen::terrain::generate_terrain;
use realmgen::territory::graph::neighbors_are_symmetric;
use realmgen::territory::merge::merge_small_regions;
use realmgen::water::{land_component_sizes, ocean_is_connected, repair_connectivity};
use realmgen::{
    GenerationError, Grid, World, WorldGenerationParams, generate_world, generate_world_on_terrain,
};

fn scenario_params() -> WorldGenerationParams {
    let mut params = WorldGenerationParams {
        seed: Some(42),
        width: 100,
        height: 100,
        country_count: 5,
        ..Default::default()
    };
    params.growth.min_country_size = 50;
    params
}

fn assert_world_sound(world: &World, params: &WorldGenerationParams) {
    // Ни одной нераспределённой клетки суши
    assert!(world.grid.data.iter().all(|&c| c != Cell::Land));
    for &cell in &world.grid.data {
        if let Cell::Region(id) = cell {
            assert!((id as usize) < world.regions.len());
        }
    }

    assert!(ocean_is_connected(&world.grid));
    assert!(
        land_component_sizes(&world.grid)
            .iter()
            .all(|&s| s >= params.islands.min_island_size)
    );
    assert!(neighbors_are_symmetric(&world.regions));

    for region in &world.regions {
        assert!(!region.cells.is_empty());
        assert!(
            region.area() >= params.growth.min_country_size || region.neighbors.is_empty(),
            "region {} has {} cells and neighbors {:?}",
            region.id,
            region.area(),
            region.neighbors
        );
        for &(x, y) in &region.border {
            let has_outside = world
                .grid
                .neighbors(x, y)
                .any(|n| n.is_none_or(|(nx, ny)| world.grid.get(nx, ny) != Cell::Region(region.id)));
            assert!(has_outside, "({x}, {y}) is interior");
        }
        for cell in &region.ocean_border {
            assert!(region.border.contains(cell));
        }
    }

    world.verify(params).unwrap();
}

#[test]
fn hundred_by_hundred_five_countries() {
    let params = scenario_params();
    let world = generate_world(&params).unwrap();

    assert_eq!(world.grid.width, 100);
    assert_eq!(world.grid.rows().len(), 100);
    assert!(!world.regions.is_empty());
    assert!(world.regions.len() <= 5);
    assert_world_sound(&world, &params);
}

#[test]
fn same_seed_gives_identical_world() {
    let params = scenario_params();
    let a = generate_world(&params).unwrap();
    let b = generate_world(&params).unwrap();
    assert_eq!(a.grid, b.grid);
    assert_eq!(a.regions, b.regions);
}

#[test]
fn different_seeds_give_different_worlds() {
    let a = generate_world(&scenario_params()).unwrap();
    let b = generate_world(&WorldGenerationParams {
        seed: Some(43),
        ..scenario_params()
    })
    .unwrap();
    assert_ne!(a.grid, b.grid);
}

#[test]
fn consolidation_is_idempotent() {
    let params = scenario_params();
    let mut world = generate_world(&params).unwrap();
    let before = world.regions.clone();
    let merges = merge_small_regions(
        &mut world.grid,
        &mut world.regions,
        params.growth.min_country_size,
    );
    assert_eq!(merges, 0);
    assert_eq!(world.regions, before);
}

#[test]
fn more_countries_than_land_is_a_configuration_error() {
    let mut params = WorldGenerationParams {
        seed: Some(1),
        width: 10,
        height: 10,
        country_count: 101,
        ..Default::default()
    };
    params.terrain.threshold = -2.0;
    params.terrain.border_strength = 0.0;
    params.islands.min_island_size = 1;

    let err = generate_world(&params).unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(
        err,
        GenerationError::NotEnoughLand {
            requested: 101,
            available: 100
        }
    ));
}

#[test]
fn island_threshold_above_map_area_drowns_everything() {
    let params = WorldGenerationParams {
        seed: Some(42),
        width: 30,
        height: 20,
        ..Default::default()
    };
    let noise = NoiseField::new(42);
    let mut terrain = generate_terrain(&noise, &params.terrain, params.width, params.height);
    repair_connectivity(&mut terrain, 30 * 20 + 1);
    assert_eq!(terrain.count(Cell::is_land), 0);

    let mut params = params;
    params.islands.min_island_size = 30 * 20 + 1;
    assert!(matches!(
        generate_world(&params).unwrap_err(),
        GenerationError::NotEnoughLand { available: 0, .. }
    ));
}

#[test]
fn unseeded_landmass_is_drowned_and_world_stays_sound() {
    // Два одинаковых материка по 150 клеток и всего одна страна
    let mut terrain = Grid::new(30, 20, Cell::Ocean);
    for y in 2..17 {
        for x in (2..12).chain(17..27) {
            terrain.set(x, y, Cell::Land);
        }
    }
    let mut params = WorldGenerationParams {
        seed: Some(11),
        width: 30,
        height: 20,
        country_count: 1,
        ..Default::default()
    };
    params.islands.min_island_size = 10;
    params.growth.min_country_size = 50;

    let world = generate_world_on_terrain(terrain, &params).unwrap();

    assert_eq!(world.regions.len(), 1);
    assert_eq!(world.regions[0].area(), 150);
    assert_eq!(world.land_cells(), 150);
    assert_eq!(land_component_sizes(&world.grid), vec![150]);
    assert_world_sound(&world, &params);
}

#[test]
fn prepared_terrain_must_not_contain_regions() {
    let mut terrain = Grid::new(8, 8, Cell::Ocean);
    terrain.set(3, 3, Cell::Region(0));
    let params = WorldGenerationParams {
        seed: Some(1),
        country_count: 1,
        ..Default::default()
    };
    assert!(generate_world_on_terrain(terrain, &params).unwrap_err().is_configuration());
}

#[test]
fn world_survives_json_round_trip() {
    let world = generate_world(&scenario_params()).unwrap();
    let json = serde_json::to_string(&world).unwrap();
    let back: World = serde_json::from_str(&json).unwrap();
    assert_eq!(back, world);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn generated_worlds_hold_invariants(
        seed in any::<u64>(),
        width in 16u32..48,
        height in 16u32..48,
        country_count in 1usize..8,
        threshold in -0.6f32..0.1,
        min_island_size in 1usize..80,
        min_country_size in 1usize..60,
        skip_probability in 0.0f64..0.99,
    ) {
        let mut params = WorldGenerationParams {
            seed: Some(seed),
            width,
            height,
            country_count,
            ..Default::default()
        };
        params.terrain.threshold = threshold;
        params.islands.min_island_size = min_island_size;
        params.growth.min_country_size = min_country_size;
        params.growth.skip_probability = skip_probability;

        match generate_world(&params) {
            Ok(world) => {
                prop_assert!(world.regions.len() <= country_count);
                assert_world_sound(&world, &params);
            }
            Err(err) => prop_assert!(err.is_configuration(), "unexpected error: {err}"),
        }
    }

    #[test]
    fn fixed_seed_is_deterministic(seed in any::<u64>(), country_count in 1usize..6) {
        let mut params = WorldGenerationParams {
            seed: Some(seed),
            width: 32,
            height: 24,
            country_count,
            ..Default::default()
        };
        params.terrain.threshold = -0.3;
        params.islands.min_island_size = 10;
        params.growth.min_country_size = 8;

        let a = generate_world(&params);
        let b = generate_world(&params);
        match (a, b) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "runs disagree"),
        }
    }
}
