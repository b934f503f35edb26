use chrono::{DateTime, Utc};
use print_quote::classify::effective_selection;
use print_quote::{
    ColorMode, OrderMode, PaperSize, PricingInput, PrintSide, PrintType, QuoteError, RangeError,
    format_amount, range,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Directory prefix for uploaded file paths
pub const UPLOADS_DIR: &str = "/uploads";

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Please upload at least one file to print")]
    NoFiles,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Please enter a valid phone number")]
    InvalidPhone,
    #[error("Please specify either color or black & white pages")]
    MissingPageSelection,
    #[error("Invalid page selection: {0}")]
    InvalidPageSelection(#[from] RangeError),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid admin credentials")]
    Unauthorized,
    #[error("Unsupported document type: {0}")]
    UnsupportedDocument(String),
    #[error("Quote error: {0}")]
    Quote(#[from] QuoteError),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OrderError>;

/// Path an uploaded file is stored under
pub fn upload_path(name: &str) -> String {
    format!("{}/{}", UPLOADS_DIR, name)
}

/// Lifecycle of an order as managed by the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Customer-facing description
    pub fn describe(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Ready for pickup",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(OrderError::Config(format!("Unknown order status: {}", s))),
        }
    }
}

/// A file attached to an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl OrderFile {
    /// Metadata a file will carry once saved under `/uploads/<name>`
    pub fn for_upload(name: &str, mime_type: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime_type: mime_type.to_string(),
            path: Some(upload_path(name)),
        }
    }

    /// Fill in the upload path for records saved without one
    pub fn normalize(&mut self) {
        if self.path.is_none() {
            self.path = Some(upload_path(&self.name));
        }
    }
}

/// A submitted order as persisted in the order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub print_type: PrintType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_color_type: Option<ColorMode>,
    pub copies: u32,
    pub paper_size: PaperSize,
    pub print_side: PrintSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bw_pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub files: Vec<OrderFile>,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub status: OrderStatus,
    pub total_cost: f64,
}

impl OrderRecord {
    pub fn mode(&self) -> OrderMode {
        OrderMode::from_wire(self.print_type, self.binding_color_type)
    }

    /// `Quote Required` for custom print jobs, otherwise the rounded cost
    pub fn cost_label(&self) -> String {
        if self.print_type == PrintType::CustomPrint {
            "Quote Required".to_string()
        } else {
            format_amount(self.total_cost)
        }
    }

    pub(crate) fn normalize(&mut self) {
        for file in &mut self.files {
            file.normalize();
        }
    }
}

/// The order form as submitted by a customer
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub full_name: String,
    pub phone_number: String,
    pub mode: OrderMode,
    pub copies: u32,
    pub paper_size: PaperSize,
    pub print_side: PrintSide,
    pub selected_pages: String,
    pub color_pages: String,
    pub bw_pages: String,
    pub special_instructions: Option<String>,
    pub files: Vec<OrderFile>,
    /// Page count reported for the uploaded document
    pub total_pages: u32,
}

impl Default for OrderRequest {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone_number: String::new(),
            mode: OrderMode::default(),
            copies: 1,
            paper_size: PaperSize::default(),
            print_side: PrintSide::default(),
            selected_pages: "all".to_string(),
            color_pages: String::new(),
            bw_pages: String::new(),
            special_instructions: None,
            files: Vec::new(),
            total_pages: 0,
        }
    }
}

impl OrderRequest {
    /// Submission-time checks. Page ranges are validated strictly here,
    /// unlike the preview price which skips bad tokens.
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(OrderError::NoFiles);
        }
        if self.full_name.trim().chars().count() < 2 {
            return Err(OrderError::NameTooShort);
        }
        if self.phone_number.trim().chars().count() < 10 {
            return Err(OrderError::InvalidPhone);
        }

        match self.mode {
            OrderMode::CustomQuote => Ok(()),
            mode if mode.uses_split_ranges() => {
                if self.color_pages.trim().is_empty() && self.bw_pages.trim().is_empty() {
                    Err(OrderError::MissingPageSelection)
                } else {
                    Ok(())
                }
            }
            _ => {
                range::validate(effective_selection(&self.selected_pages), self.total_pages)?;
                Ok(())
            }
        }
    }

    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            mode: self.mode,
            duplex: self.print_side.is_duplex(),
            copies: self.copies,
            total_pages: self.total_pages,
            selected_pages: self.selected_pages.clone(),
            color_pages: self.color_pages.clone(),
            bw_pages: self.bw_pages.clone(),
        }
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
