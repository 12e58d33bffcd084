//! Scene loading and saving
//!
//! Two formats: the compact command text (`v,x,y,r,g,b;`, `l,i,j;`, `t,i,j,k;`)
//! and RON for scenes saved from code.

use std::fs;
use std::path::Path;

use log::debug;

use super::{Command, Scene};
use crate::rasterizer::Vertex;

/// Built-in demo scene for a 64x64 canvas
pub const DEFAULT_SCENE: &str = "\
// sun
v,0,0,1.0,0.5,0.0;
v,15,0,1.0,0.8,0.0;
v,0,15,1.0,1.0,0.0;
t,0,1,2;

// mountains, back to front
v,5,45,0.0,0.5,0.3;
v,15,35,0.0,0.6,0.2;
v,25,45,0.0,0.5,0.3;
t,3,4,5;
v,25,40,0.5,0.65,0.3;
v,35,15,0.2,0.75,0.4;
v,45,40,0.5,0.55,0.3;
t,6,7,8;
v,15,45,0.4,0.45,0.3;
v,25,25,0.2,0.55,0.4;
v,35,45,0.0,0.45,0.2;
t,9,10,11;
v,40,45,0.5,0.55,0.3;
v,52,20,0.2,0.65,0.4;
v,64,45,0.5,0.45,0.3;
t,12,13,14;

// river
v,10,55,0.0,0.6,1.0;
v,20,55,0.0,0.8,1.0;
v,30,59,0.2,0.6,1.0;
v,50,59,0.3,0.8,1.0;
v,50,47,0.2,0.4,1.0;
v,63,47,0.3,0.5,0.8;
v,5,50,0.0,0.7,1.0;
v,17,50,0.0,0.5,0.8;
v,25,52,0.0,1.0,1.0;
v,45,52,0.0,0.6,0.8;
v,40,46,0.0,0.7,0.9;
v,45,46,0.0,0.4,0.6;
l,15,16;
l,17,18;
l,19,20;
l,21,22;
l,23,24;
l,25,26;
";

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    UnknownCommand { command: usize, tag: String },
    FieldCount { command: usize, expected: usize, found: usize },
    InvalidNumber { command: usize, field: String },
    UndefinedVertex { index: usize, defined: usize },
    VertexTableMismatch,
    /// Wraps an error with the 1-based number of the command that caused it
    AtCommand { command: usize, source: Box<SceneError> },
}

impl SceneError {
    pub(super) fn at(self, command: usize) -> Self {
        SceneError::AtCommand {
            command,
            source: Box::new(self),
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SceneError::UnknownCommand { command, tag } => {
                write!(f, "Command {}: unknown command '{}'", command, tag)
            }
            SceneError::FieldCount { command, expected, found } => write!(
                f,
                "Command {}: expected {} fields, found {}",
                command, expected, found
            ),
            SceneError::InvalidNumber { command, field } => {
                write!(f, "Command {}: '{}' is not a valid number", command, field)
            }
            SceneError::UndefinedVertex { index, defined } => write!(
                f,
                "Vertex {} is not defined ({} vertices so far)",
                index, defined
            ),
            SceneError::VertexTableMismatch => {
                write!(f, "Vertex table does not match the vertex commands")
            }
            SceneError::AtCommand { command, source } => write!(f, "Command {}: {}", command, source),
        }
    }
}

impl std::error::Error for SceneError {}

/// Drop `//` comments, then split into trimmed, non-empty command entries
fn entries(s: &str) -> impl Iterator<Item = &str> {
    s.lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

fn parse_f64(command: usize, field: &str) -> Result<f64, SceneError> {
    field.parse().map_err(|_| SceneError::InvalidNumber {
        command,
        field: field.to_string(),
    })
}

fn parse_index(command: usize, field: &str) -> Result<usize, SceneError> {
    field.parse().map_err(|_| SceneError::InvalidNumber {
        command,
        field: field.to_string(),
    })
}

/// Parse one entry such as `l,0,1` into a command
fn parse_command(command: usize, entry: &str) -> Result<Command, SceneError> {
    let fields: Vec<&str> = entry.split(',').map(str::trim).collect();
    let (tag, args) = fields.split_first().ok_or(SceneError::FieldCount {
        command,
        expected: 1,
        found: 0,
    })?;

    let expected = match *tag {
        "v" => 5,
        "l" => 2,
        "t" => 3,
        _ => {
            return Err(SceneError::UnknownCommand {
                command,
                tag: tag.to_string(),
            })
        }
    };
    if args.len() != expected {
        return Err(SceneError::FieldCount {
            command,
            expected,
            found: args.len(),
        });
    }

    match *tag {
        "v" => {
            let n = args
                .iter()
                .map(|a| parse_f64(command, a))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::DefineVertex(Vertex::from_parts(n[0], n[1], n[2], n[3], n[4])))
        }
        "l" => Ok(Command::DrawLine(
            parse_index(command, args[0])?,
            parse_index(command, args[1])?,
        )),
        _ => Ok(Command::DrawTriangle(
            parse_index(command, args[0])?,
            parse_index(command, args[1])?,
            parse_index(command, args[2])?,
        )),
    }
}

/// Parse a scene from command text
pub fn parse_scene(s: &str) -> Result<Scene, SceneError> {
    let mut scene = Scene::new();

    for (n, entry) in entries(s).enumerate() {
        let command = n + 1;
        let cmd = parse_command(command, entry)?;
        scene.push(cmd).map_err(|e| e.at(command))?;
    }

    debug!(
        "Parsed scene: {} vertices, {} commands",
        scene.vertices().len(),
        scene.commands().len()
    );
    Ok(scene)
}

/// Load a scene from a file. `.ron` files are read as RON, anything else as command text.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let is_ron = path
        .extension()
        .map(|ext| ext.to_ascii_lowercase() == "ron")
        .unwrap_or(false);

    if is_ron {
        load_scene_from_ron_str(&contents)
    } else {
        parse_scene(&contents)
    }
}

/// Load a scene from a RON string
pub fn load_scene_from_ron_str(s: &str) -> Result<Scene, SceneError> {
    let scene: Scene = ron::from_str(s)?;
    Ok(scene)
}

/// Save a scene to a RON file
pub fn save_scene_ron<P: AsRef<Path>>(scene: &Scene, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, Point};

    #[test]
    fn test_parse_basic() {
        let scene = parse_scene("v,10,10,1.0,0.0,0.0;\nv,52,52,0.0,1.0,0.0;\nv,52,10,0.0,0.0,1.0;\nt,0,1,2;\nl,0,2;").unwrap();
        assert_eq!(scene.vertices().len(), 3);
        assert_eq!(
            scene.vertices()[1],
            Vertex::new(Point::new(52.0, 52.0), Color::GREEN)
        );
        assert_eq!(scene.commands()[3], Command::DrawTriangle(0, 1, 2));
        assert_eq!(scene.commands()[4], Command::DrawLine(0, 2));
    }

    #[test]
    fn test_parse_whitespace_and_comments() {
        let scene = parse_scene("  v, 1.5 , -2 ,0,0,1 ; v,3,4,1,1,1; // two points\n\n l , 0 , 1 ;").unwrap();
        assert_eq!(scene.vertices()[0].pos, Point::new(1.5, -2.0));
        assert_eq!(scene.commands().len(), 3);
    }

    #[test]
    fn test_default_scene_parses() {
        let scene = parse_scene(DEFAULT_SCENE).unwrap();
        assert_eq!(scene.vertices().len(), 27);
        let draws = scene
            .commands()
            .iter()
            .filter(|c| !matches!(c, Command::DefineVertex(_)))
            .count();
        assert_eq!(draws, 11);
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_scene("v,0,0,0,0,0;\nq,1;").unwrap_err();
        assert!(matches!(err, SceneError::UnknownCommand { command: 2, .. }));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_scene("v,0,0,0,0;").unwrap_err();
        assert!(matches!(
            err,
            SceneError::FieldCount { command: 1, expected: 5, found: 4 }
        ));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_scene("v,0,zero,0,0,0;").unwrap_err();
        assert!(matches!(err, SceneError::InvalidNumber { command: 1, .. }));
        let err = parse_scene("v,0,0,0,0,0;l,0,-1;").unwrap_err();
        assert!(matches!(err, SceneError::InvalidNumber { command: 2, .. }));
    }

    #[test]
    fn test_forward_reference_rejected() {
        let err = parse_scene("v,0,0,0,0,0;\nl,0,1;\nv,1,1,0,0,0;").unwrap_err();
        match err {
            SceneError::AtCommand { command, source } => {
                assert_eq!(command, 2);
                assert!(matches!(*source, SceneError::UndefinedVertex { index: 1, defined: 1 }));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_ron_roundtrip() {
        let scene = parse_scene("v,0,0,1,0,0;v,4,0,0,1,0;v,0,4,0,0,1;t,0,1,2;").unwrap();
        let path = std::env::temp_dir().join(format!("vertex_raster_scene_{}.ron", std::process::id()));
        save_scene_ron(&scene, &path).unwrap();
        let loaded = load_scene(&path).unwrap();
        assert_eq!(loaded, scene);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_ron_with_bad_reference_rejected() {
        let ron = "(vertices: [], commands: [DrawLine(0, 1)])";
        let err = load_scene_from_ron_str(ron).unwrap_err();
        assert!(matches!(err, SceneError::ParseError(_)));
        assert!(err.to_string().contains("Command 1: Vertex 0 is not defined"));
    }
}
