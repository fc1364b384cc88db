//! Scene file handling

use anyhow::{Context, Result};
use flick_animation::SceneConfig;
use std::fs;
use std::path::Path;

/// Default scene file name when a directory is given
pub const SCENE_FILE: &str = "scene.toml";

/// Load a scene from a file, or from `scene.toml` inside a directory
pub fn load_scene(path: &Path) -> Result<SceneConfig> {
    let scene_path = if path.is_dir() {
        path.join(SCENE_FILE)
    } else {
        path.to_path_buf()
    };

    if !scene_path.exists() {
        anyhow::bail!(
            "No scene found at {}. Run `flick init` to create one.",
            scene_path.display()
        );
    }

    let content = fs::read_to_string(&scene_path)
        .with_context(|| format!("Failed to read {}", scene_path.display()))?;

    parse_scene(&content).with_context(|| format!("Failed to parse {}", scene_path.display()))
}

pub fn parse_scene(content: &str) -> Result<SceneConfig> {
    Ok(toml::from_str(content)?)
}

/// Serialize to TOML string
pub fn to_toml(scene: &SceneConfig) -> Result<String> {
    toml::to_string_pretty(scene).context("Failed to serialize scene")
}

/// Write the starter scene into `dir`
pub fn create_scene(dir: &Path) -> Result<()> {
    let scene_path = dir.join(SCENE_FILE);
    if scene_path.exists() {
        anyhow::bail!("{} already exists", scene_path.display());
    }
    fs::create_dir_all(dir)?;
    fs::write(&scene_path, STARTER_SCENE)
        .with_context(|| format!("Failed to write {}", scene_path.display()))?;
    Ok(())
}

const STARTER_SCENE: &str = r#"# Flick scene
frames = 120
frame_ms = 16.0

[surface]
width = 480.0
height = 320.0

[[images]]
key = "ball"
width = 32
height = 32

[[images]]
key = "coin"
width = 64
height = 16

# A ball thrown to the right, bouncing off the floor and walls
[[objects]]
kind = "parabolic_bitmap"
image = "ball"
motion = { x = 20.0, y = 40.0, velocity_x = 4.0, restitution_y = 0.7 }

# A spinning coin sliding in, then fading out
[[objects]]
kind = "tween_sprite"
image = "coin"
sheet = { frame_width = 16.0, frame_height = 16.0, frame_num = 4, frame_num_per_line = 4, frequency = 4 }
transform = { x = -16.0, y = 150.0 }
steps = [
    { duration_ms = 800, x = 232.0, easing = "ease_out_back" },
    { duration_ms = 400 },
    { duration_ms = 600, alpha = 0.0, easing = "ease_in_quad" },
]
"#;
