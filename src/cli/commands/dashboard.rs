use anyhow::{Result, bail};
use controller::{PredictionController, PredictionOutcome, ScoringApi};
use tracing::{info, trace};

use crate::cli::CustomerArgs;
use crate::http_api::HttpScoringApi;
use crate::render;

pub async fn dashboard(api_url: &str, customer: Option<&CustomerArgs>) -> Result<()> {
    let controller = PredictionController::new(HttpScoringApi::new(api_url));
    let outcome = run_session(&controller, customer).await;
    let state = controller.snapshot();

    if let Some(PredictionOutcome::Rejected(errors)) = outcome {
        print!("{}", render::render_dashboard(&state));
        eprint!("{}", render::render_field_errors(&state));
        bail!("customer data is invalid: {}", errors);
    }

    print!("{}", render::render_dashboard(&state));
    Ok(())
}

/// Fires both chart loads and the optional submit together and waits for
/// all of them to settle.
pub async fn run_session<A: ScoringApi>(
    controller: &PredictionController<A>,
    customer: Option<&CustomerArgs>,
) -> Option<PredictionOutcome> {
    if let Some(customer) = customer {
        customer.fill(controller);
    }

    let submit = async {
        match customer {
            Some(_) => Some(controller.submit_prediction().await),
            None => None,
        }
    };

    trace!("Starting chart loads and submit");
    let (outcome, (), ()) = tokio::join!(
        submit,
        controller.load_performance_summary(),
        controller.load_feature_importance()
    );
    info!("Dashboard session settled");
    outcome
}
