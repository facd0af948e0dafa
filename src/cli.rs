use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use controller::{FormField, PredictionController, ScoringApi};

pub mod commands;

use crate::config::Settings;
use commands::{dashboard, importance, performance, predict};

#[derive(Parser)]
#[command(name = "purchase-pulse")]
#[command(about = "Predict repeat purchases with the PurchasePulse scoring service")]
#[command(version)]
pub struct Cli {
    /// Base URL of the scoring service
    ///
    /// Overrides `api_base_url` from purchase_pulse.toml or PULSE_API_BASE_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Raw customer attributes, validated the same way the dashboard form is.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct CustomerArgs {
    /// Customer age
    #[arg(long, allow_hyphen_values = true)]
    pub age: String,

    /// Total number of purchases
    #[arg(long, allow_hyphen_values = true)]
    pub purchases: String,

    /// Loyalty program membership (1 = yes, 0 = no)
    #[arg(long, allow_hyphen_values = true)]
    pub loyalty: String,

    /// Total number of discounts used
    #[arg(long, allow_hyphen_values = true)]
    pub discounts: String,
}

impl CustomerArgs {
    /// Types the values into the controller's form.
    pub fn fill<A: ScoringApi>(&self, controller: &PredictionController<A>) {
        controller.set_field(FormField::Age, self.age.as_str());
        controller.set_field(FormField::Purchases, self.purchases.as_str());
        controller.set_field(FormField::Loyalty, self.loyalty.as_str());
        controller.set_field(FormField::Discounts, self.discounts.as_str());
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit customer data and print the predicted outcome
    Predict(CustomerArgs),
    /// Show the model's confusion-matrix counts
    Performance,
    /// Show the model's feature importance ranking
    Importance,
    /// Load both charts, optionally submit customer data, and render everything
    ///
    /// The chart loads and the prediction request run concurrently.
    Dashboard {
        /// Customer age
        #[arg(long, allow_hyphen_values = true, requires_all = ["purchases", "loyalty", "discounts"])]
        age: Option<String>,

        /// Total number of purchases
        #[arg(long, allow_hyphen_values = true, requires = "age")]
        purchases: Option<String>,

        /// Loyalty program membership (1 = yes, 0 = no)
        #[arg(long, allow_hyphen_values = true, requires = "age")]
        loyalty: Option<String>,

        /// Total number of discounts used
        #[arg(long, allow_hyphen_values = true, requires = "age")]
        discounts: Option<String>,
    },
}

impl Cli {
    pub async fn run(self, settings: &Settings) -> Result<()> {
        let api_url = self
            .api_url
            .as_deref()
            .unwrap_or_else(|| settings.api_base_url())
            .to_string();
        tracing::debug!("Scoring service: {}", api_url);

        match self.command {
            Commands::Predict(customer) => {
                predict(&api_url, &customer).await?;
            }
            Commands::Performance => {
                performance(&api_url).await?;
            }
            Commands::Importance => {
                importance(&api_url).await?;
            }
            Commands::Dashboard {
                age,
                purchases,
                loyalty,
                discounts,
            } => {
                let customer = match (age, purchases, loyalty, discounts) {
                    (Some(age), Some(purchases), Some(loyalty), Some(discounts)) => {
                        Some(CustomerArgs {
                            age,
                            purchases,
                            loyalty,
                            discounts,
                        })
                    }
                    _ => None,
                };
                dashboard(&api_url, customer.as_ref()).await?;
            }
        }
        Ok(())
    }
}
