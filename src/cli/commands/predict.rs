use anyhow::{Result, bail};
use controller::{PredictionController, PredictionOutcome};
use tracing::{debug, info};

use crate::cli::CustomerArgs;
use crate::http_api::HttpScoringApi;
use crate::render;

pub async fn predict(api_url: &str, customer: &CustomerArgs) -> Result<()> {
    debug!("Customer data: {:?}", customer);
    let controller = PredictionController::new(HttpScoringApi::new(api_url));
    customer.fill(&controller);

    let outcome = controller.submit_prediction().await;
    let state = controller.snapshot();

    if let PredictionOutcome::Rejected(errors) = outcome {
        eprint!("{}", render::render_field_errors(&state));
        bail!("customer data is invalid: {}", errors);
    }

    info!("Prediction finished");
    print!("{}", render::render_prediction(&state));
    Ok(())
}
