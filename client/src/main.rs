//! First-person controller sandbox - hosts the gameplay controllers in a small test scene

mod camera;
mod hud;
mod input;
mod physics;
mod player;
mod states;
mod weapons;
mod world;

use std::path::Path;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;
use gameplay::{load_gameplay_config_from_file, GameplayConfig};
use states::GameState;

/// Tunables file inside the asset folder
const CONFIG_FILE: &str = "gameplay.ron";

/// Get the asset path - for bundled macOS apps, use path relative to executable
fn get_asset_path() -> String {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                info!("Using bundled assets at: {:?}", bundled_assets);
                return bundled_assets.to_string_lossy().to_string();
            }
        }
    }
    // `cargo run` from anywhere in the workspace
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return Path::new(&manifest_dir)
            .join("assets")
            .to_string_lossy()
            .to_string();
    }
    // Fall back to default "assets" folder (for development)
    "assets".to_string()
}

/// Read the tunables, falling back to the built-in defaults.
fn load_config(asset_path: &str) -> GameplayConfig {
    let path = Path::new(asset_path).join(CONFIG_FILE);
    match load_gameplay_config_from_file(&path) {
        Ok(config) => {
            info!("Loaded gameplay config from {:?}", path);
            config
        }
        Err(e) => {
            warn!("Using default gameplay config: {}", e);
            GameplayConfig::default()
        }
    }
}

fn main() {
    let asset_path = get_asset_path();

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "First Person Controller".to_string(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_path.clone(),
                ..default()
            }),
    );

    // LogPlugin is installed by DefaultPlugins, so config loading logs after this point
    app.insert_resource(load_config(&asset_path));

    app.init_state::<GameState>();

    app.init_resource::<input::Controls>();
    app.init_resource::<input::FrameInput>();
    app.init_resource::<physics::StaticWorld>();

    app.add_systems(
        Startup,
        (world::spawn_world, player::spawn_player, hud::spawn_hud),
    );

    app.add_systems(OnEnter(GameState::Playing), states::enter_playing);
    app.add_systems(OnEnter(GameState::Paused), states::enter_paused);

    app.add_systems(
        Update,
        (
            input::poll_keyboard,
            input::poll_mouse,
            states::toggle_pause,
            player::climb_ladders,
            player::drive_player,
            weapons::drive_gun.run_if(in_state(GameState::Playing)),
            weapons::update_muzzle_flash,
            hud::update_hud,
            hud::update_pause_banner,
        )
            .chain(),
    );
    app.add_systems(
        Update,
        states::grab_cursor.run_if(in_state(GameState::Playing)),
    );

    app.run();
}
