//! Command-line surface for `scorta-cli`.
//! Kept in one file so tests can reuse the same definitions as the binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "scorta-cli", version, about = "Scorta console headless client", long_about = None)]
pub struct Cli {
    /// API base URL, e.g. <https://stock.example.com>
    #[arg(long, env = "SCORTA_SITE_URL")]
    pub site: Option<String>,

    /// Path to a file containing the API token (takes precedence over env)
    #[arg(long, env = "SCORTA_API_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// API token from env (CLI flag intentionally disabled to avoid shell history leaks)
    #[arg(hide = true, env = "SCORTA_API_KEY")]
    pub api_key_env: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inventory rows (stock per product and warehouse)
    Inventories(InventoriesArgs),
    /// Product management
    Products(ProductsArgs),
    /// Category management
    Categories(CategoriesArgs),
    /// Measurement unit management
    Units(UnitsArgs),
}

/// Shared pagination/search arguments of every `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size
    #[arg(long, default_value_t = 10)]
    pub size: u32,

    /// Keyword, matched server-side as a case-insensitive substring
    #[arg(long)]
    pub keyword: Option<String>,

    /// Additional filters as KEY=VALUE pairs (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct InventoriesArgs {
    #[command(subcommand)]
    pub action: InventoriesAction,
}

#[derive(Subcommand, Debug)]
pub enum InventoriesAction {
    /// List inventory rows
    List(ListArgs),
    /// Create an inventory row
    Create {
        #[arg(long)]
        product_id: Uuid,
        #[arg(long)]
        warehouse: Option<String>,
        #[arg(long)]
        quantity: f64,
    },
    /// Replace an inventory row
    Update {
        id: Uuid,
        #[arg(long)]
        product_id: Uuid,
        #[arg(long)]
        warehouse: Option<String>,
        #[arg(long)]
        quantity: f64,
    },
    /// Delete an inventory row
    Delete { id: Uuid },
}

#[derive(Parser, Debug)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub action: ProductsAction,
}

#[derive(Subcommand, Debug)]
pub enum ProductsAction {
    /// List products
    List(ListArgs),
    /// Create a product
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        category_id: Uuid,
        #[arg(long)]
        unit_id: Uuid,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        remark: Option<String>,
    },
    /// Replace a product
    Update {
        id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long)]
        sku: String,
        #[arg(long)]
        category_id: Uuid,
        #[arg(long)]
        unit_id: Uuid,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        remark: Option<String>,
    },
    /// Delete a product
    Delete { id: Uuid },
}

#[derive(Parser, Debug)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub action: CategoriesAction,
}

#[derive(Subcommand, Debug)]
pub enum CategoriesAction {
    /// List categories
    List(ListArgs),
    /// Create a category
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        remark: Option<String>,
    },
    /// Replace a category
    Update {
        id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long)]
        remark: Option<String>,
    },
    /// Delete a category
    Delete { id: Uuid },
}

#[derive(Parser, Debug)]
pub struct UnitsArgs {
    #[command(subcommand)]
    pub action: UnitsAction,
}

#[derive(Subcommand, Debug)]
pub enum UnitsAction {
    /// List measurement units
    List(ListArgs),
    /// Create a measurement unit
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        abbreviation: Option<String>,
    },
    /// Replace a measurement unit
    Update {
        id: Uuid,
        #[arg(long)]
        name: String,
        #[arg(long)]
        abbreviation: Option<String>,
    },
    /// Delete a measurement unit
    Delete { id: Uuid },
}
