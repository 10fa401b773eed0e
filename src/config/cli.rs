use crate::core::{ColorConfig, ColumnSelection, ConfigProvider, DataMode, OutputTarget};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "sankey-snippets")]
#[command(about = "Turn a CSV of flows into SankeyMATIC, Plotly or networkD3 code")]
pub struct CliConfig {
    /// CSV file with a header row and source, target and value columns
    pub csv_path: PathBuf,

    /// Which snippet(s) to print
    #[arg(long, value_enum)]
    pub output: OutputTarget,

    /// TOML file with node and flow colors
    #[arg(long)]
    pub colors: Option<PathBuf>,

    /// Only use colors from --colors instead of filling in a palette
    #[arg(long)]
    pub no_auto_colors: bool,

    #[arg(long, help = "Header of the source column")]
    pub source_col: Option<String>,

    #[arg(long, help = "Header of the target column")]
    pub target_col: Option<String>,

    #[arg(long, help = "Header of the value column")]
    pub value_col: Option<String>,

    /// Embed the data in Python/R scripts, or have them read the CSV
    #[arg(long, value_enum, default_value_t = DataMode::Inline)]
    pub data_mode: DataMode,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    fn output(&self) -> OutputTarget {
        self.output
    }

    fn columns(&self) -> ColumnSelection {
        ColumnSelection {
            source: self.source_col.clone(),
            target: self.target_col.clone(),
            value: self.value_col.clone(),
        }
    }

    fn color_config(&self) -> Result<ColorConfig> {
        match &self.colors {
            Some(path) => {
                tracing::debug!("Loading colors from {}", path.display());
                ColorConfig::from_file(path)
            }
            None => Ok(ColorConfig::default()),
        }
    }

    fn auto_colors(&self) -> bool {
        !self.no_auto_colors
    }

    fn data_mode(&self) -> DataMode {
        self.data_mode
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("csv_path", &self.csv_path.to_string_lossy())?;
        if let Some(colors) = &self.colors {
            validate_path("colors", &colors.to_string_lossy())?;
        }

        let columns = [
            ("source_col", &self.source_col),
            ("target_col", &self.target_col),
            ("value_col", &self.value_col),
        ];
        for (field, value) in columns {
            if let Some(value) = value {
                validate_non_empty_string(field, value)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_arguments() {
        let config = CliConfig::try_parse_from(["sankey-snippets", "flows.csv", "--output", "all"]).unwrap();

        assert_eq!(config.csv_path, PathBuf::from("flows.csv"));
        assert_eq!(config.output, OutputTarget::All);
        assert_eq!(config.data_mode, DataMode::Inline);
        assert!(config.auto_colors());
        assert_eq!(config.columns(), ColumnSelection::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_is_required_and_checked() {
        assert!(CliConfig::try_parse_from(["sankey-snippets", "flows.csv"]).is_err());
        assert!(CliConfig::try_parse_from(["sankey-snippets", "flows.csv", "--output", "svg"]).is_err());
        for output in ["sankeymatic", "python", "r", "all"] {
            assert!(CliConfig::try_parse_from(["sankey-snippets", "flows.csv", "--output", output]).is_ok());
        }
    }

    #[test]
    fn test_blank_column_name_fails_validation() {
        let config = CliConfig::try_parse_from([
            "sankey-snippets",
            "flows.csv",
            "--output",
            "r",
            "--value-col",
            " ",
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_colors_file_means_default_colors() {
        let config = CliConfig::try_parse_from([
            "sankey-snippets",
            "flows.csv",
            "--output",
            "python",
            "--no-auto-colors",
            "--data-mode",
            "file",
        ])
        .unwrap();
        assert_eq!(config.color_config().unwrap(), ColorConfig::default());
        assert!(!config.auto_colors());
        assert_eq!(config.data_mode(), DataMode::File);
    }
}
