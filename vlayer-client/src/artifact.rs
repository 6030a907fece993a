//! Loader for Foundry-style build artifacts.
//!
//! The pipeline deploys contracts from the JSON files `forge build` writes
//! under `out/<Name>.sol/<Name>.json`; only the creation bytecode is needed
//! since calldata is encoded by hand in `abi`.

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("artifact {path} has invalid bytecode hex: {reason}")]
    Bytecode { path: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct BytecodeObject {
    object: String,
}

#[derive(Debug, Deserialize)]
pub struct ContractArtifact {
    bytecode: BytecodeObject,
    #[serde(skip)]
    path: String,
}

impl ContractArtifact {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read(&path).map_err(|source| ArtifactError::Io {
            path: path_str.clone(),
            source,
        })?;
        let mut artifact: ContractArtifact =
            serde_json::from_slice(&raw).map_err(|source| ArtifactError::Parse {
                path: path_str.clone(),
                source,
            })?;
        artifact.path = path_str;
        Ok(artifact)
    }

    /// Creation code for deployment: bytecode followed by the ABI-encoded
    /// constructor arguments.
    pub fn init_code(&self, constructor_args: &[u8]) -> Result<Vec<u8>, ArtifactError> {
        let raw = self.bytecode.object.strip_prefix("0x").unwrap_or(&self.bytecode.object);
        let mut code = hex::decode(raw).map_err(|e| ArtifactError::Bytecode {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        code.extend_from_slice(constructor_args);
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_code_appends_constructor_args() {
        let artifact: ContractArtifact = serde_json::from_value(serde_json::json!({
            "abi": [],
            "bytecode": { "object": "0x6080604052" },
        }))
        .unwrap();
        let code = artifact.init_code(&[0xaa; 32]).unwrap();
        assert_eq!(&code[..5], &[0x60, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(code.len(), 5 + 32);
    }

    #[test]
    fn bad_bytecode_hex_is_rejected() {
        let artifact: ContractArtifact = serde_json::from_value(serde_json::json!({
            "bytecode": { "object": "0xnothex" },
        }))
        .unwrap();
        assert!(artifact.init_code(&[]).is_err());
    }
}
