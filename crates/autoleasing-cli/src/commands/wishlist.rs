use clap::{Args, Subcommand};
use serde_json::{json, Value};

use autoleasing_core::LeasingError;

use crate::config::AppConfig;

/// Arguments for wishlist management
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub action: WishlistAction,
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// List saved vehicles
    List,
    /// Add a vehicle, or remove it if already saved
    Toggle {
        /// Vehicle identification number
        vin: String,
    },
}

pub fn run_wishlist(args: WishlistArgs, config: &AppConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let wishlist = config.wishlist();
    match args.action {
        WishlistAction::List => {
            let vins = wishlist.vins()?;
            Ok(json!({ "count": vins.len(), "vins": vins }))
        }
        WishlistAction::Toggle { vin } => {
            let catalog = config.catalog()?;
            if catalog.find(&vin).is_none() {
                return Err(LeasingError::VehicleNotFound(vin).into());
            }
            let wishlisted = wishlist.toggle(&vin)?;
            Ok(json!({
                "vin": vin,
                "wishlisted": wishlisted,
                "count": wishlist.count()?,
            }))
        }
    }
}
