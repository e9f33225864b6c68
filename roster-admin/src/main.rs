use env_logger::{Builder, Target};
use log::LevelFilter;

use roster_admin::app::{AdminPanel, AppConfig};
use roster_admin::domains::profile::ProfilePage;
use roster_admin::infra::api_client::ApiClient;
use roster_admin::infra::services::UserAdminApiAdapter;
use roster_admin::subscriptions::Poller;

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("roster_admin", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        init_logger();
        log::warn!("RUST_LOG not set, falling back to default logger");
    } else {
        env_logger::init();
    }

    let config = AppConfig::from_environment();

    if std::env::args().skip(1).any(|arg| arg == "--profile") {
        let client = ApiClient::with_timeout(config.server_url(), config.request_timeout())?;
        let service = UserAdminApiAdapter::new(client.into());
        let profile = ProfilePage::load(&service).await?;
        print!("{profile}");
        return Ok(());
    }

    let panel = AdminPanel::connect(&config)?;
    panel.init().await;

    let mut last = panel.view().await.to_string();
    print!("{last}");

    let poller = Poller::start(panel.clone(), config.poll_interval());
    let mut redraw = tokio::time::interval(config.poll_interval());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = redraw.tick() => {
                let rendered = panel.view().await.to_string();
                if rendered != last {
                    println!();
                    print!("{rendered}");
                    last = rendered;
                }
            }
        }
    }

    log::info!("Shutting down");
    poller.stop().await;
    Ok(())
}
