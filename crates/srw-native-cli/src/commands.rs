pub mod export;
pub mod inspect;
pub mod scale;
pub mod sum;

use crate::error::{CliError, Result};
use srw_native::MeshData;
use std::path::Path;
use tracing::{info, warn};

pub(crate) fn load_mesh(path: &Path) -> Result<MeshData> {
    info!("Loading mesh file from {:?}", path);
    let data = srw_native::load_file(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    if !data.is_complete() {
        warn!(
            "{:?} holds {} value(s) but its header describes {} point(s).",
            path,
            data.values.len(),
            data.metadata.expected_value_count()
        );
    }
    Ok(data)
}
