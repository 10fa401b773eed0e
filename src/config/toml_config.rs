use crate::core::ColorConfig;
use crate::utils::error::{Result, SankeyError};
use crate::utils::validation::{validate_color, validate_non_empty_string, Validate};
use std::path::Path;

impl ColorConfig {
    /// Loads node and flow colors from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SankeyError::file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Parses node and flow colors from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ColorConfig = toml::from_str(content).map_err(|e| SankeyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl Validate for ColorConfig {
    fn validate(&self) -> Result<()> {
        let mut labels: Vec<&String> = self.nodes.keys().collect();
        labels.sort();
        for label in labels {
            let field = format!("nodes.{}", label);
            validate_non_empty_string(&field, label)?;
            validate_color(&field, &self.nodes[label])?;
        }

        for (i, flow) in self.flows.iter().enumerate() {
            validate_non_empty_string(&format!("flows[{}].source", i), &flow.source)?;
            validate_non_empty_string(&format!("flows[{}].target", i), &flow.target)?;
            validate_color(&format!("flows[{}].color", i), &flow.color)?;
        }

        Ok(())
    }
}
