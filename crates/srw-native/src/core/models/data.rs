use super::mesh::MeshMetadata;

/// Contents of an SRW `.dat` file loaded by the strict loader.
///
/// `header_lines` holds the raw header text (marker stripped, leading whitespace
/// trimmed). `values` keeps file order. Its length is not checked against the
/// mesh; see [`MeshMetadata::matches_value_count`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub metadata: MeshMetadata,
    pub header_lines: Vec<String>,
    pub values: Vec<f64>,
}

impl MeshData {
    /// Label line at header index 0 (units / characteristic), if the file had one.
    pub fn characteristic(&self) -> Option<&str> {
        self.header_lines.first().map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.metadata.matches_value_count(self.values.len())
    }
}

/// Contents of a text file loaded by the lenient loader: every leading comment
/// line and every numeric token that follows, with nothing decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDat {
    pub header_lines: Vec<String>,
    pub values: Vec<f64>,
}
