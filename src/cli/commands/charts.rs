use anyhow::Result;
use controller::PredictionController;

use crate::http_api::HttpScoringApi;
use crate::render;

pub async fn performance(api_url: &str) -> Result<()> {
    let controller = PredictionController::new(HttpScoringApi::new(api_url));
    controller.load_performance_summary().await;
    print!("{}", render::render_performance(controller.state().performance()));
    Ok(())
}

pub async fn importance(api_url: &str) -> Result<()> {
    let controller = PredictionController::new(HttpScoringApi::new(api_url));
    controller.load_feature_importance().await;
    print!("{}", render::render_importance(controller.state().importance()));
    Ok(())
}
