use crate::constants::{ALL_PAGES_KEYWORD, CURRENCY_SYMBOL};
use crate::range::RangeError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Invalid page selection: {0}")]
    Range(#[from] RangeError),
    #[error("Unknown {kind}: {value}")]
    UnknownIdentifier { kind: &'static str, value: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;

/// How pages are split between the color and black-and-white buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum ColorMode {
    /// Every selected page is black-and-white
    #[default]
    BlackAndWhite,
    /// Every selected page is color
    Color,
    /// Separate color and black-and-white range fields
    Custom,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::BlackAndWhite => "blackAndWhite",
            ColorMode::Color => "color",
            ColorMode::Custom => "custom",
        }
    }
}

impl FromStr for ColorMode {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blackAndWhite" => Ok(ColorMode::BlackAndWhite),
            "color" => Ok(ColorMode::Color),
            "custom" => Ok(ColorMode::Custom),
            _ => Err(QuoteError::UnknownIdentifier {
                kind: "color mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Binding methods offered at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Soft cover binding (flat fee)
    Soft,
    /// Spiral binding (tiered by page count)
    Spiral,
}

/// The `printType` identifier stored with every order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum PrintType {
    #[default]
    BlackAndWhite,
    Color,
    Custom,
    SoftBinding,
    SpiralBinding,
    CustomPrint,
}

impl PrintType {
    pub fn as_str(self) -> &'static str {
        match self {
            PrintType::BlackAndWhite => "blackAndWhite",
            PrintType::Color => "color",
            PrintType::Custom => "custom",
            PrintType::SoftBinding => "softBinding",
            PrintType::SpiralBinding => "spiralBinding",
            PrintType::CustomPrint => "customPrint",
        }
    }
}

impl FromStr for PrintType {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blackAndWhite" => Ok(PrintType::BlackAndWhite),
            "color" => Ok(PrintType::Color),
            "custom" => Ok(PrintType::Custom),
            "softBinding" => Ok(PrintType::SoftBinding),
            "spiralBinding" => Ok(PrintType::SpiralBinding),
            "customPrint" => Ok(PrintType::CustomPrint),
            _ => Err(QuoteError::UnknownIdentifier {
                kind: "print type",
                value: s.to_string(),
            }),
        }
    }
}

/// The kind of order being placed. Exactly one is active per order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    PlainPrint {
        color_mode: ColorMode,
    },
    Binding {
        kind: BindingKind,
        color_mode: ColorMode,
    },
    /// No computed price; the shop quotes manually
    CustomQuote,
}

impl Default for OrderMode {
    fn default() -> Self {
        OrderMode::PlainPrint {
            color_mode: ColorMode::BlackAndWhite,
        }
    }
}

impl OrderMode {
    /// Build a mode from the stored `printType` / `bindingColorType` pair.
    /// A missing binding color type means black-and-white.
    pub fn from_wire(print_type: PrintType, binding_color_type: Option<ColorMode>) -> Self {
        let binding_color = binding_color_type.unwrap_or_default();
        match print_type {
            PrintType::BlackAndWhite => OrderMode::PlainPrint {
                color_mode: ColorMode::BlackAndWhite,
            },
            PrintType::Color => OrderMode::PlainPrint {
                color_mode: ColorMode::Color,
            },
            PrintType::Custom => OrderMode::PlainPrint {
                color_mode: ColorMode::Custom,
            },
            PrintType::SoftBinding => OrderMode::Binding {
                kind: BindingKind::Soft,
                color_mode: binding_color,
            },
            PrintType::SpiralBinding => OrderMode::Binding {
                kind: BindingKind::Spiral,
                color_mode: binding_color,
            },
            PrintType::CustomPrint => OrderMode::CustomQuote,
        }
    }

    pub fn print_type(self) -> PrintType {
        match self {
            OrderMode::PlainPrint { color_mode } => match color_mode {
                ColorMode::BlackAndWhite => PrintType::BlackAndWhite,
                ColorMode::Color => PrintType::Color,
                ColorMode::Custom => PrintType::Custom,
            },
            OrderMode::Binding {
                kind: BindingKind::Soft,
                ..
            } => PrintType::SoftBinding,
            OrderMode::Binding {
                kind: BindingKind::Spiral,
                ..
            } => PrintType::SpiralBinding,
            OrderMode::CustomQuote => PrintType::CustomPrint,
        }
    }

    /// The `bindingColorType` field; only binding orders carry one
    pub fn binding_color_type(self) -> Option<ColorMode> {
        match self {
            OrderMode::Binding { color_mode, .. } => Some(color_mode),
            _ => None,
        }
    }

    pub fn color_mode(self) -> Option<ColorMode> {
        match self {
            OrderMode::PlainPrint { color_mode } | OrderMode::Binding { color_mode, .. } => {
                Some(color_mode)
            }
            OrderMode::CustomQuote => None,
        }
    }

    pub fn binding(self) -> Option<BindingKind> {
        match self {
            OrderMode::Binding { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Whether the separate color / black-and-white range fields are active
    pub fn uses_split_ranges(self) -> bool {
        self.color_mode() == Some(ColorMode::Custom)
    }
}

/// Printed sides per sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PrintSide {
    #[default]
    Single,
    Double,
}

impl PrintSide {
    pub fn is_duplex(self) -> bool {
        self == PrintSide::Double
    }
}

/// Paper sizes stocked by the shop. Carried on orders; does not affect price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
}

/// Everything the price depends on, rebuilt from the live order form
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInput {
    pub mode: OrderMode,
    pub duplex: bool,
    pub copies: u32,
    /// Page count of the uploaded document
    pub total_pages: u32,
    /// Used by the black-and-white and color modes
    pub selected_pages: String,
    /// Used by the custom color mode
    pub color_pages: String,
    /// Used by the custom color mode
    pub bw_pages: String,
}

impl Default for PricingInput {
    fn default() -> Self {
        Self {
            mode: OrderMode::default(),
            duplex: false,
            copies: 1,
            total_pages: 0,
            selected_pages: ALL_PAGES_KEYWORD.to_string(),
            color_pages: String::new(),
            bw_pages: String::new(),
        }
    }
}

/// Page counts per cost bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageBuckets {
    pub color: u32,
    pub bw: u32,
}

impl PageBuckets {
    /// Raw page count across both buckets, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.color.saturating_add(self.bw)
    }
}

/// Outcome of pricing an order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PricingResult {
    /// Unrounded total in currency units
    Priced(f64),
    /// Custom print job; priced manually by the shop
    QuoteRequired,
}

impl PricingResult {
    /// Amount stored with the order; quote-required orders store 0
    pub fn total_cost(&self) -> f64 {
        match self {
            PricingResult::Priced(amount) => *amount,
            PricingResult::QuoteRequired => 0.0,
        }
    }

    pub fn is_quote_required(&self) -> bool {
        matches!(self, PricingResult::QuoteRequired)
    }
}

impl fmt::Display for PricingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingResult::Priced(amount) => write!(f, "{}", format_amount(*amount)),
            PricingResult::QuoteRequired => f.write_str("Quote Required"),
        }
    }
}

/// Render an amount with the currency symbol, rounded to 2 decimals
pub fn format_amount(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}

/// Detailed view of how a price was derived
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    /// Pages in each bucket
    pub buckets: PageBuckets,
    /// Color units billed (sheets after duplex halving, or raw pages)
    pub color_units: u32,
    /// Black-and-white units billed
    pub bw_units: u32,
    /// Rate applied to color units
    pub color_rate: f64,
    /// Rate applied to black-and-white units
    pub bw_rate: f64,
    /// Printing cost of a single copy
    pub print_cost: f64,
    /// Binding surcharge, if any
    pub binding_fee: f64,
    pub copies: u32,
    /// `(print_cost + binding_fee) * copies`
    pub total: f64,
}
