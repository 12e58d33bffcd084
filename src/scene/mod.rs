//! Scene module - vertex table plus draw commands
//!
//! A scene is built by appending vertices and issuing draw commands that refer
//! to them by index. Indices are checked when a command is added, so the
//! rasterizer can trust them.

mod loader;

pub use loader::*;

use serde::{Deserialize, Serialize};

use crate::rasterizer::Vertex;

/// One scene command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    DefineVertex(Vertex),
    DrawLine(usize, usize),
    DrawTriangle(usize, usize, usize),
}

/// Append-only vertex table and the ordered command list.
///
/// Deserializing goes through [`SceneData`] and replays the commands, so a
/// loaded scene never holds an out-of-range index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SceneData")]
pub struct Scene {
    vertices: Vec<Vertex>,
    commands: Vec<Command>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Append a vertex and return its index
    pub fn define_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.commands.push(Command::DefineVertex(vertex));
        self.vertices.len() - 1
    }

    pub fn draw_line(&mut self, i: usize, j: usize) -> Result<(), SceneError> {
        self.check_indices(&[i, j])?;
        self.commands.push(Command::DrawLine(i, j));
        Ok(())
    }

    pub fn draw_triangle(&mut self, i: usize, j: usize, k: usize) -> Result<(), SceneError> {
        self.check_indices(&[i, j, k])?;
        self.commands.push(Command::DrawTriangle(i, j, k));
        Ok(())
    }

    /// Add any command, applying the same checks as the typed helpers
    pub fn push(&mut self, command: Command) -> Result<(), SceneError> {
        match command {
            Command::DefineVertex(v) => {
                self.define_vertex(v);
                Ok(())
            }
            Command::DrawLine(i, j) => self.draw_line(i, j),
            Command::DrawTriangle(i, j, k) => self.draw_triangle(i, j, k),
        }
    }

    fn check_indices(&self, indices: &[usize]) -> Result<(), SceneError> {
        match indices.iter().find(|&&i| i >= self.vertices.len()) {
            Some(&index) => Err(SceneError::UndefinedVertex {
                index,
                defined: self.vertices.len(),
            }),
            None => Ok(()),
        }
    }
}

/// Unchecked on-disk form of a [`Scene`]
#[derive(Deserialize)]
pub struct SceneData {
    vertices: Vec<Vertex>,
    commands: Vec<Command>,
}

impl TryFrom<SceneData> for Scene {
    type Error = SceneError;

    /// Rebuild from the commands, then check the stored vertex table agrees
    fn try_from(data: SceneData) -> Result<Self, Self::Error> {
        let mut scene = Scene::new();
        for (n, command) in data.commands.into_iter().enumerate() {
            scene.push(command).map_err(|e| e.at(n + 1))?;
        }
        if scene.vertices != data.vertices {
            return Err(SceneError::VertexTableMismatch);
        }
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, Point};

    #[test]
    fn test_indices_follow_definition_order() {
        let mut scene = Scene::new();
        let a = scene.define_vertex(Vertex::new(Point::new(0.0, 0.0), Color::RED));
        let b = scene.define_vertex(Vertex::new(Point::new(1.0, 0.0), Color::GREEN));
        assert_eq!((a, b), (0, 1));
        assert!(scene.draw_line(a, b).is_ok());
        assert_eq!(scene.commands().len(), 3);
    }

    #[test]
    fn test_undefined_index_rejected() {
        let mut scene = Scene::new();
        scene.define_vertex(Vertex::default());
        let err = scene.draw_triangle(0, 0, 1).unwrap_err();
        assert!(matches!(err, SceneError::UndefinedVertex { index: 1, defined: 1 }));
        assert_eq!(scene.commands().len(), 1);
    }

    #[test]
    fn test_try_from_reports_command_number() {
        let data = SceneData {
            vertices: vec![Vertex::default()],
            commands: vec![
                Command::DefineVertex(Vertex::default()),
                Command::DrawLine(0, 3),
            ],
        };
        match Scene::try_from(data) {
            Err(SceneError::AtCommand { command, source }) => {
                assert_eq!(command, 2);
                assert!(matches!(*source, SceneError::UndefinedVertex { index: 3, defined: 1 }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_try_from_detects_mismatch() {
        let data = SceneData {
            vertices: vec![Vertex::default(), Vertex::default()],
            commands: vec![Command::DefineVertex(Vertex::default())],
        };
        assert!(matches!(Scene::try_from(data), Err(SceneError::VertexTableMismatch)));
    }

    #[test]
    fn test_deserialize_rejects_bad_index() {
        let result: Result<Scene, _> = ron::from_str("(vertices: [], commands: [DrawTriangle(0, 1, 2)])");
        assert!(result.is_err());
    }
}
