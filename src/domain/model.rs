use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// A quantity read from a CSV cell. Prints with exactly the digits it was
/// written with, and sums keep every digit of their operands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Amount {
    value: f64,
    exact: Option<ScaledInt>,
    /// Raw cell text, printed when the exact form is unavailable.
    text: Option<String>,
}

/// Beyond this many fractional digits the raw text is kept instead.
const MAX_SCALE: i64 = 1024;

/// `mantissa / 10^scale`, non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct ScaledInt {
    mantissa: u128,
    scale: u32,
}

impl ScaledInt {
    fn parse(text: &str) -> Option<Self> {
        let (body, exponent) = match text.split_once(|c: char| c == 'e' || c == 'E') {
            Some((body, exp)) => (body, exp.parse::<i64>().ok()?),
            None => (text, 0),
        };

        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body.strip_prefix('+').unwrap_or(body)),
        };

        let (int, frac) = body.split_once('.').unwrap_or((body, ""));
        if int.is_empty() && frac.is_empty() {
            return None;
        }

        let mut mantissa: u128 = 0;
        for b in int.bytes().chain(frac.bytes()) {
            if !b.is_ascii_digit() {
                return None;
            }
            mantissa = mantissa.checked_mul(10)?.checked_add(u128::from(b - b'0'))?;
        }

        // -0 is the only negative this type holds
        if negative && mantissa != 0 {
            return None;
        }

        let scale = frac.len() as i64 - exponent;
        if scale > MAX_SCALE {
            return None;
        }
        if scale < 0 {
            let shift = u32::try_from(-scale).ok()?;
            mantissa = mantissa.checked_mul(10u128.checked_pow(shift)?)?;
            return Some(Self { mantissa, scale: 0 });
        }

        Some(Self {
            mantissa,
            scale: u32::try_from(scale).ok()?,
        })
    }

    fn rescaled(&self, scale: u32) -> Option<u128> {
        self.mantissa
            .checked_mul(10u128.checked_pow(scale.checked_sub(self.scale)?)?)
    }

    fn checked_add(&self, other: &ScaledInt) -> Option<ScaledInt> {
        let scale = self.scale.max(other.scale);
        let mantissa = self.rescaled(scale)?.checked_add(other.rescaled(scale)?)?;
        Some(ScaledInt { mantissa, scale })
    }
}

impl fmt::Display for ScaledInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }

        let digits = format!("{:0>width$}", digits, width = scale + 1);
        let (int, frac) = digits.split_at(digits.len() - scale);
        write!(f, "{}.{}", int, frac)
    }
}

impl Amount {
    /// Parses a decimal cell. Returns `None` for anything that is not a finite number.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let value: f64 = text.parse().ok()?;
        if !value.is_finite() {
            return None;
        }

        Some(Self {
            value,
            exact: ScaledInt::parse(text),
            text: Some(text.to_string()),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::ops::AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.value += rhs.value;
        self.exact = match (&self.exact, &rhs.exact) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        self.text = None;
    }
}

impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(mut self, rhs: Amount) -> Amount {
        self += &rhs;
        self
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.exact, &self.text) {
            (Some(exact), _) => write!(f, "{}", exact),
            (None, Some(text)) => f.write_str(text),
            (None, None) => write!(f, "{}", self.value),
        }
    }
}

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRecord {
    pub source: String,
    pub target: String,
    pub value: Amount,
    pub line: u64,
}

/// Header names the records were read from, used by scripts that re-read the CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub source: String,
    pub target: String,
    pub value: String,
}

/// Records in file order plus the columns they came from.
#[derive(Debug, Clone)]
pub struct FlowTable {
    pub path: Option<PathBuf>,
    pub columns: ColumnNames,
    pub records: Vec<FlowRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowNode {
    pub label: String,
    pub color: Option<String>,
}

/// All rows sharing a (source, target) pair, summed.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    pub source: usize,
    pub target: usize,
    pub total: Amount,
    pub rows: usize,
    pub color: Option<String>,
}

/// Nodes in first-seen order and edges in first-seen order; edge endpoints index `nodes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub fn label(&self, index: usize) -> &str {
        &self.nodes[index].label
    }

    pub fn has_node_colors(&self) -> bool {
        self.nodes.iter().any(|n| n.color.is_some())
    }

    pub fn has_flow_colors(&self) -> bool {
        self.edges.iter().any(|e| e.color.is_some())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowColor {
    pub source: String,
    pub target: String,
    pub color: String,
}

/// Colors loaded from the `--colors` TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColorConfig {
    #[serde(default)]
    pub nodes: HashMap<String, String>,
    #[serde(default)]
    pub flows: Vec<FlowColor>,
}

impl ColorConfig {
    pub fn node_color(&self, label: &str) -> Option<&str> {
        self.nodes.get(label).map(String::as_str)
    }

    /// The last matching entry wins, like a later line overriding an earlier one.
    pub fn flow_color(&self, source: &str, target: &str) -> Option<&str> {
        self.flows
            .iter()
            .rev()
            .find(|f| f.source == source && f.target == target)
            .map(|f| f.color.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    SankeyMatic,
    Plotly,
    NetworkD3,
}

impl Dialect {
    pub fn title(&self) -> &'static str {
        match self {
            Dialect::SankeyMatic => "SankeyMATIC Format:",
            Dialect::Plotly => "Python Code for Sankey Diagram:",
            Dialect::NetworkD3 => "R Code for Sankey Diagram:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    Sankeymatic,
    Python,
    R,
    All,
}

impl OutputTarget {
    pub fn dialects(&self) -> &'static [Dialect] {
        match self {
            OutputTarget::Sankeymatic => &[Dialect::SankeyMatic],
            OutputTarget::Python => &[Dialect::Plotly],
            OutputTarget::R => &[Dialect::NetworkD3],
            OutputTarget::All => &[Dialect::SankeyMatic, Dialect::Plotly, Dialect::NetworkD3],
        }
    }
}

/// Whether generated Python/R scripts carry the data or re-read the CSV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    #[default]
    Inline,
    File,
}

/// Explicit header names requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub source: Option<String>,
    pub target: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub data_mode: DataMode,
    pub csv_path: Option<PathBuf>,
    pub columns: ColumnNames,
}
