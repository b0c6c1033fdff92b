//! Smoke test: post one fixed request and print the raw response.

use anyhow::Result;

use diabetes_client::api::{ApiClient, PredictionPayload};
use diabetes_client::constants;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    constants::init_logging();

    let client = ApiClient::new(constants::get_api_url());
    let response = client.post_predict(&PredictionPayload::sample())?;

    if response.status == 200 {
        println!("Response: {}", response.body);
    } else {
        println!("Response ({}): {}", response.status, response.body);
    }

    Ok(())
}
