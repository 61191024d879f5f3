//! Graph document readers and format dispatch
//!
//! A graph document carries the initial nodes, the edges and (optionally) the
//! layout configuration. JSON and YAML encodings are supported.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::graph::{EdgeSpec, NodeSpec};
use crate::simulation::SimulationBuilder;

/// Nodes, edges and configuration for one simulation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub config: LayoutConfig,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl GraphDocument {
    /// Builder preloaded with this document's configuration
    pub fn builder(&self) -> SimulationBuilder {
        SimulationBuilder::new(self.config.clone())
    }
}

/// A reader parses one encoding of a graph document
pub trait Reader {
    /// Parse document text
    fn parse(&self, content: &str) -> LayoutResult<GraphDocument>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Read and parse a file
    fn read(&self, input: &Path) -> LayoutResult<GraphDocument> {
        let content = fs::read_to_string(input)?;
        self.parse(&content)
    }

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Reader for JSON graph documents
#[derive(Debug, Default)]
pub struct JsonReader;

impl Reader for JsonReader {
    fn parse(&self, content: &str) -> LayoutResult<GraphDocument> {
        serde_json::from_str(content).map_err(|e| LayoutError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Reader for YAML graph documents
#[derive(Debug, Default)]
pub struct YamlReader;

impl Reader for YamlReader {
    fn parse(&self, content: &str) -> LayoutResult<GraphDocument> {
        serde_yaml::from_str(content).map_err(|e| LayoutError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Every reader this crate ships
pub fn readers() -> [&'static dyn Reader; 2] {
    [&JsonReader, &YamlReader]
}

/// Find a reader for the given file extension
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    readers().into_iter().find(|r| r.supports_extension(ext))
}

/// Read a graph document, choosing the reader from the file extension
pub fn read_document(path: &Path) -> LayoutResult<GraphDocument> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| LayoutError::UnsupportedFormat(path.display().to_string()))?;
    let reader =
        reader_for_extension(ext).ok_or_else(|| LayoutError::UnsupportedFormat(ext.to_string()))?;
    reader.read(path)
}
