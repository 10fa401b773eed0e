pub mod network_d3;
pub mod plotly;
pub mod sankeymatic;

pub use network_d3::NetworkD3Formatter;
pub use plotly::PlotlyFormatter;
pub use sankeymatic::SankeyMaticFormatter;

use crate::core::{Dialect, Formatter, RenderOptions};
use crate::utils::error::{Result, SankeyError};

pub fn formatter_for(dialect: Dialect) -> Box<dyn Formatter> {
    match dialect {
        Dialect::SankeyMatic => Box::new(SankeyMaticFormatter),
        Dialect::Plotly => Box::new(PlotlyFormatter),
        Dialect::NetworkD3 => Box::new(NetworkD3Formatter),
    }
}

/// A JSON string literal is also a valid Python and R string literal.
pub(crate) fn quote(text: &str) -> Result<String> {
    Ok(serde_json::to_string(text)?)
}

pub(crate) fn list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

pub(crate) fn quote_path(options: &RenderOptions) -> Result<String> {
    let path = options.csv_path.as_ref().ok_or_else(|| SankeyError::ConfigError {
        message: "file data mode needs the path of the CSV file".to_string(),
    })?;
    quote(&path.to_string_lossy())
}
