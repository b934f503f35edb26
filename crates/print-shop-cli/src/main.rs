mod logger;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use logger::ConsoleLogger;
use print_orders::document::mime_type_for;
use print_orders::{
    Authenticator, FileRegistry, JsonFileStore, OrderBook, OrderError, OrderFile, OrderRecord,
    OrderRequest, OrderStatus, ShopConfig,
};
use print_quote::constants::ALL_PAGES_KEYWORD;
use print_quote::{OrderMode, PricingInput, format_amount, range};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "pshop.json";

#[derive(Parser)]
#[command(name = "pshop", about = "Print shop ordering CLI", version)]
struct Cli {
    /// Shop configuration file (defaults to ./pshop.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the price of an order
    Quote {
        #[command(flatten)]
        print: PrintArgs,

        /// Document to count pages from (PDF only)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Upload documents and place an order
    Submit {
        #[command(flatten)]
        print: PrintArgs,

        /// Documents to print; pages are counted from the first one
        #[arg(short, long, required = true, num_args = 1..)]
        file: Vec<PathBuf>,

        /// Customer name
        #[arg(long)]
        name: String,

        /// Customer phone number
        #[arg(long)]
        phone: String,

        /// Paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Special instructions for the shop
        #[arg(long)]
        instructions: Option<String>,
    },

    /// Look up an order by id
    Track {
        order_id: String,
    },

    /// List all orders (admin)
    Orders {
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Change the status of an order (admin)
    SetStatus {
        order_id: String,

        #[arg(value_enum)]
        status: StatusArg,

        #[command(flatten)]
        admin: AdminArgs,
    },

    /// List uploaded files (admin)
    Files {
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Delete every order (admin)
    ClearOrders {
        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Forget every uploaded file (admin)
    ClearFiles {
        #[command(flatten)]
        admin: AdminArgs,
    },
}

#[derive(Args)]
struct PrintArgs {
    /// Print type
    #[arg(long, default_value = "black-and-white", value_enum)]
    print_type: PrintTypeArg,

    /// Color mode for binding orders
    #[arg(long, default_value = "black-and-white", value_enum)]
    binding_color: ColorArg,

    /// Printed sides
    #[arg(long, default_value = "single", value_enum)]
    side: SideArg,

    /// Number of copies
    #[arg(long, default_value = "1")]
    copies: u32,

    /// Page count of the document (overrides counting the file)
    #[arg(long)]
    pages: Option<u32>,

    /// Pages to print, e.g. "1-5, 8, 11-13" or "all" (defaults to every page)
    #[arg(long)]
    select: Option<String>,

    /// Color pages for custom color orders
    #[arg(long, default_value = "")]
    color_pages: String,

    /// Black & white pages for custom color orders
    #[arg(long, default_value = "")]
    bw_pages: String,
}

impl PrintArgs {
    fn mode(&self) -> OrderMode {
        OrderMode::from_wire(self.print_type.into(), Some(self.binding_color.into()))
    }

    /// Explicit selection, or the whole document once its page count is known
    fn selection(&self, total_pages: u32) -> String {
        match &self.select {
            Some(select) => select.clone(),
            None if total_pages > 0 => range::full_range(total_pages),
            None => ALL_PAGES_KEYWORD.to_string(),
        }
    }

    fn pricing_input(&self, total_pages: u32) -> PricingInput {
        PricingInput {
            mode: self.mode(),
            duplex: self.side == SideArg::Double,
            copies: self.copies,
            total_pages,
            selected_pages: self.selection(total_pages),
            color_pages: self.color_pages.clone(),
            bw_pages: self.bw_pages.clone(),
        }
    }
}

#[derive(Args)]
struct AdminArgs {
    /// Admin username
    #[arg(long)]
    user: String,

    /// Admin password
    #[arg(long)]
    password: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum PrintTypeArg {
    BlackAndWhite,
    Color,
    Custom,
    SoftBinding,
    SpiralBinding,
    CustomPrint,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    BlackAndWhite,
    Color,
    Custom,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum SideArg {
    Single,
    Double,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A3,
    Letter,
    Legal,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl From<PrintTypeArg> for print_quote::PrintType {
    fn from(arg: PrintTypeArg) -> Self {
        match arg {
            PrintTypeArg::BlackAndWhite => Self::BlackAndWhite,
            PrintTypeArg::Color => Self::Color,
            PrintTypeArg::Custom => Self::Custom,
            PrintTypeArg::SoftBinding => Self::SoftBinding,
            PrintTypeArg::SpiralBinding => Self::SpiralBinding,
            PrintTypeArg::CustomPrint => Self::CustomPrint,
        }
    }
}

impl From<ColorArg> for print_quote::ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::BlackAndWhite => Self::BlackAndWhite,
            ColorArg::Color => Self::Color,
            ColorArg::Custom => Self::Custom,
        }
    }
}

impl From<SideArg> for print_quote::PrintSide {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Single => Self::Single,
            SideArg::Double => Self::Double,
        }
    }
}

impl From<PaperArg> for print_quote::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A3 => Self::A3,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl From<StatusArg> for OrderStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Processing => Self::Processing,
            StatusArg::Completed => Self::Completed,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ConsoleLogger::for_verbosity(cli.verbose).init()?;

    let config = match &cli.config {
        Some(path) => ShopConfig::load(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ShopConfig::load_or_default(DEFAULT_CONFIG).await?,
    };

    match cli.command {
        Commands::Quote { print, file } => {
            let total_pages = match (print.pages, &file) {
                (Some(pages), _) => pages,
                (None, Some(path)) => print_orders::count_pages(path).await?,
                (None, None) => 0,
            };
            let input = print.pricing_input(total_pages);

            println!("Quote:");
            println!("  Document pages: {}", total_pages);
            match config.rates.breakdown(&input) {
                Some(breakdown) => {
                    println!("  Color pages: {}", breakdown.buckets.color);
                    println!("  B&W pages: {}", breakdown.buckets.bw);
                    if breakdown.color_units > 0 {
                        println!(
                            "  Color: {} x {}",
                            breakdown.color_units,
                            format_amount(breakdown.color_rate)
                        );
                    }
                    if breakdown.bw_units > 0 {
                        println!(
                            "  B&W: {} x {}",
                            breakdown.bw_units,
                            format_amount(breakdown.bw_rate)
                        );
                    }
                    if breakdown.binding_fee > 0.0 {
                        println!("  Binding: {}", format_amount(breakdown.binding_fee));
                    }
                    println!("  Copies: {}", breakdown.copies);
                    println!("  Total: {}", format_amount(breakdown.total));
                }
                None => println!("  Total: Quote Required"),
            }
        }

        Commands::Submit {
            print,
            file,
            name,
            phone,
            paper,
            instructions,
        } => {
            let mut uploads = Vec::new();
            let mut counted_pages = None;
            for path in &file {
                let data = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let mime_type = mime_type_for(path);
                if counted_pages.is_none() && mime_type == "application/pdf" {
                    counted_pages = Some(print_orders::count_pdf_bytes(data.clone()).await?);
                }
                uploads.push((file_name(path)?, mime_type, data));
            }

            let total_pages = match (print.pages, counted_pages) {
                (Some(pages), _) => pages,
                (None, Some(pages)) => pages,
                (None, None) if print.mode() == OrderMode::CustomQuote => 0,
                (None, None) => bail!("Cannot count pages of non-PDF documents; pass --pages"),
            };

            let request = OrderRequest {
                full_name: name,
                phone_number: phone,
                mode: print.mode(),
                copies: print.copies,
                paper_size: paper.into(),
                print_side: print.side.into(),
                selected_pages: print.selection(total_pages),
                color_pages: print.color_pages,
                bw_pages: print.bw_pages,
                special_instructions: instructions,
                files: uploads
                    .iter()
                    .map(|(name, mime_type, data)| {
                        OrderFile::for_upload(name, mime_type, data.len() as u64)
                    })
                    .collect(),
                total_pages,
            };
            request.validate()?;

            let store = JsonFileStore::open(&config.store_path).await?;
            let mut registry = FileRegistry::open(store, &config.namespace).await?;
            for (name, mime_type, data) in uploads {
                registry.save_file(&name, mime_type, data).await?;
            }

            let mut book = OrderBook::new(registry.into_store(), &config.namespace)
                .with_rates(config.rates);
            let record = book.submit(request).await?;

            println!("Order submitted successfully!");
            println!("  Order ID: {}", record.order_id);
            println!("  Total: {}", record.cost_label());
        }

        Commands::Track { order_id } => {
            let store = JsonFileStore::open(&config.store_path).await?;
            let book = OrderBook::new(store, &config.namespace);
            match book.find(&order_id).await? {
                Some(order) => print_order(&order),
                None => bail!(OrderError::NotFound(order_id.trim().to_string())),
            }
        }

        Commands::Orders { admin } => {
            authenticate(&config, &admin)?;
            let store = JsonFileStore::open(&config.store_path).await?;
            let mut book = OrderBook::new(store, &config.namespace);
            let orders = book.orders().await?;
            if orders.is_empty() {
                println!("No orders yet.");
            }
            for order in &orders {
                println!(
                    "{}  {:<10}  {:<14}  {:<20}  {}",
                    order.order_id,
                    order.status.as_str(),
                    order.print_type.as_str(),
                    order.full_name,
                    order.cost_label()
                );
            }
        }

        Commands::SetStatus {
            order_id,
            status,
            admin,
        } => {
            authenticate(&config, &admin)?;
            let store = JsonFileStore::open(&config.store_path).await?;
            let mut book = OrderBook::new(store, &config.namespace);
            let order = book.update_status(&order_id, status.into()).await?;
            println!("Order {} status updated to {}", order.order_id, order.status);
        }

        Commands::Files { admin } => {
            authenticate(&config, &admin)?;
            let store = JsonFileStore::open(&config.store_path).await?;
            let registry = FileRegistry::open(store, &config.namespace).await?;
            if registry.is_empty() {
                println!("No uploaded files.");
            }
            for stored in registry.files() {
                println!(
                    "{}  {:.2} KB  {}",
                    stored.path,
                    stored.size as f64 / 1024.0,
                    stored.mime_type
                );
            }
        }

        Commands::ClearOrders { admin } => {
            authenticate(&config, &admin)?;
            let store = JsonFileStore::open(&config.store_path).await?;
            OrderBook::new(store, &config.namespace).clear().await?;
            println!("All orders have been cleared");
        }

        Commands::ClearFiles { admin } => {
            authenticate(&config, &admin)?;
            let store = JsonFileStore::open(&config.store_path).await?;
            FileRegistry::open(store, &config.namespace)
                .await?
                .clear_all()
                .await?;
            println!("All uploaded files have been cleared");
        }
    }

    Ok(())
}

fn authenticate(config: &ShopConfig, admin: &AdminArgs) -> Result<()> {
    config.admin.authenticate(&admin.user, &admin.password)?;
    Ok(())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("Invalid file name: {}", path.display()))
}

fn print_order(order: &OrderRecord) {
    println!("Order {}", order.order_id);
    println!("  Status: {}", order.status.describe());
    println!("  Placed: {}", order.order_date.format("%Y-%m-%d %H:%M UTC"));
    println!("  Name: {}", order.full_name);
    println!("  Phone: {}", order.phone_number);
    println!("  Print type: {}", order.print_type.as_str());
    if let Some(color) = order.binding_color_type {
        println!("  Binding color: {}", color.as_str());
    }
    println!("  Copies: {}", order.copies);
    println!("  Paper: {:?}", order.paper_size);
    println!("  Sides: {:?}", order.print_side);
    if let Some(pages) = &order.selected_pages {
        println!("  Pages: {}", pages);
    }
    if let Some(pages) = &order.color_pages {
        println!("  Color pages: {}", pages);
    }
    if let Some(pages) = &order.bw_pages {
        println!("  B&W pages: {}", pages);
    }
    if let Some(notes) = &order.special_instructions {
        println!("  Instructions: {}", notes);
    }
    println!("  Total: {}", order.cost_label());
    for file in &order.files {
        println!("  File: {} ({:.2} KB)", file.name, file.size as f64 / 1024.0);
    }
}
