//! Diabetes Prediction App - terminal client

use anyhow::Result;

use diabetes_client::{api::ApiClient, app, constants};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    constants::init_logging();

    let client = ApiClient::new(constants::get_api_url());
    log::info!(
        "Starting {} v{} against {}",
        constants::APP_NAME,
        constants::APP_VERSION,
        client.base_url()
    );

    app::run(&client)
}
