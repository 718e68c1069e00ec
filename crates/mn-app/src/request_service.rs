//! Design request files: loading, saving and validation.

use std::path::Path;

use mn_synth::DesignRequest;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::microstrip::Substrate;

/// Contents of a request file: the design request plus frontend choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFile {
    #[serde(flatten)]
    pub request: DesignRequest,
    /// 1-based solution to report and sweep; defaults to the engine's pick
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate: Option<Substrate>,
}

impl From<DesignRequest> for DesignFile {
    fn from(request: DesignRequest) -> Self {
        Self {
            request,
            solution: None,
            substrate: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Json,
}

fn file_format(path: &Path) -> AppResult<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        Some("json") => Ok(FileFormat::Json),
        _ => Err(AppError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a request from a YAML or JSON file, chosen by extension.
pub fn load_request(path: &Path) -> AppResult<DesignFile> {
    let format = file_format(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| AppError::RequestFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let parsed: Result<DesignFile, String> = match format {
        FileFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        FileFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| AppError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Save a request in the format implied by the extension.
pub fn save_request(path: &Path, file: &DesignFile) -> AppResult<()> {
    let content = match file_format(path)? {
        FileFormat::Yaml => {
            serde_yaml::to_string(file).map_err(|e| AppError::Serialize(e.to_string()))?
        }
        FileFormat::Json => {
            serde_json::to_string_pretty(file).map_err(|e| AppError::Serialize(e.to_string()))?
        }
    };

    std::fs::write(path, content).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Validate the request and the frontend choices around it.
pub fn validate_request(file: &DesignFile) -> AppResult<()> {
    file.request.validate()?;

    if file.solution == Some(0) {
        return Err(AppError::Validation(
            "solution numbers start at 1".to_string(),
        ));
    }

    if let Some(substrate) = &file.substrate {
        substrate.validate()?;
    }

    Ok(())
}
