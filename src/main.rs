use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info};

use ecoleta::app::navigation::DetailParams;
use ecoleta::config::Config;
use ecoleta::context::AppContext;
use ecoleta::infra::http_client::ReqwestHttp;
use ecoleta::infra::link_opener::StdoutLinkOpener;
use ecoleta::infra::location::ConfiguredLocation;
use ecoleta::logging;
use ecoleta::notice::{NoticeReceiver, Severity};
use ecoleta::screens::detail::DetailScreen;
use ecoleta::screens::points::PointsView;
use ecoleta::session::Session;
use ecoleta::types::{CategoryId, PointId, Selection};

#[derive(Parser)]
#[command(name = "ecoleta")]
#[command(about = "Find waste collection points by state, city and accepted materials")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List state codes, sorted
    States,
    /// List the cities of a state
    Cities {
        /// State code, e.g. SP
        uf: String,
    },
    /// List the material categories points can accept
    Items,
    /// Search collection points in a region
    Points {
        #[arg(long)]
        uf: String,
        #[arg(long)]
        city: Option<String>,
        /// Category ids to filter by (comma-separated)
        #[arg(long, value_delimiter = ',')]
        items: Vec<CategoryId>,
    },
    /// Show one point's contact details
    Detail {
        id: PointId,
        /// Open the WhatsApp conversation link
        #[arg(long)]
        whatsapp: bool,
        /// Compose a mail to the point
        #[arg(long)]
        mail: bool,
    },
}

/// Each requested category once; toggling a repeated id would deselect it
fn requested_categories(items: &[CategoryId]) -> BTreeSet<CategoryId> {
    items.iter().copied().collect()
}

fn drain_notices(notices: &mut NoticeReceiver) {
    while let Ok(notice) = notices.try_recv() {
        match notice.severity {
            Severity::Blocking => println!("⛔ {}: {}", notice.title, notice.message),
            Severity::Transient => println!("⚠️  {}", notice.message),
        }
    }
}

fn print_points(view: &PointsView) {
    println!("\n📍 {} point(s) in {}", view.points.len(), describe_region(view));
    for point in &view.points {
        println!(
            "   [{}] {} ({:.5}, {:.5})",
            point.id, point.name, point.latitude, point.longitude
        );
    }
    match &view.map {
        Some(map) => println!(
            "🗺️  Map centered at ({:.5}, {:.5}) with {} pin(s)",
            map.center.latitude,
            map.center.longitude,
            map.pins.len()
        ),
        None => println!("🗺️  Map hidden: device position unresolved"),
    }
}

fn describe_region(view: &PointsView) -> String {
    match &view.region.city_name {
        Some(city) => format!("{}/{}", city, view.region.state_code),
        None => view.region.state_code.clone(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("loading configuration")?;
    info!(api = %config.api.base_url, regions = %config.regions.base_url, "Configuration loaded");

    let http = ReqwestHttp::new(config.request_timeout()).map_err(anyhow::Error::msg)?;
    let (ctx, mut notices) = AppContext::new(
        &config,
        Arc::new(http),
        Arc::new(ConfiguredLocation::from_config(&config.location)),
        Arc::new(StdoutLinkOpener),
    );

    match cli.command {
        Commands::States => {
            let session = Session::start(ctx).await;
            drain_notices(&mut notices);
            for state in session.home().view().states {
                println!("{}", state);
            }
        }
        Commands::Cities { uf } => {
            let session = Session::start(ctx).await;
            session.home().select_state(Selection::Selected(uf)).await;
            drain_notices(&mut notices);
            for city in session.home().view().cities {
                println!("{}", city);
            }
        }
        Commands::Items => {
            let categories = ctx.points.load_categories().await?;
            for category in categories {
                println!("[{}] {}", category.id, category.title);
            }
        }
        Commands::Points { uf, city, items } => {
            let mut session = Session::start(ctx).await;
            let home = session.home();
            home.select_state(Selection::Selected(uf.clone())).await;
            if let Some(city) = city {
                if !home.view().cities.contains(&city) {
                    drain_notices(&mut notices);
                    bail!("unknown city '{}' for state {}", city, uf);
                }
                home.select_city(Selection::Selected(city));
            }

            let points = session.enter_points()?;
            points.settled().await;
            for id in requested_categories(&items) {
                points.toggle(id).await;
            }
            let view = points.view();
            drain_notices(&mut notices);

            let selected: Vec<String> = view
                .categories
                .iter()
                .filter(|chip| chip.selected)
                .map(|chip| chip.category.title.clone())
                .collect();
            if !selected.is_empty() {
                println!("🏷️  Filter: {}", selected.join(", "));
            }
            print_points(&view);
        }
        Commands::Detail { id, whatsapp, mail } => {
            let screen = DetailScreen::mount(ctx, Some(DetailParams { point_id: id })).await?;
            drain_notices(&mut notices);

            let Some(view) = screen.view() else {
                error!(point_id = id, "Point detail unavailable");
                bail!("point {} could not be loaded", id);
            };
            println!("🏠 {}", view.name);
            println!("   {}", view.categories_label);
            println!("   {}", view.address);
            println!("   {} | {}", view.email, view.whatsapp);

            if whatsapp {
                screen.open_whatsapp().await?;
            }
            if mail {
                screen.compose_mail().await?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_item_ids_select_once() {
        let cli = Cli::try_parse_from(["ecoleta", "points", "--uf", "SP", "--items", "1,1,2"])
            .unwrap();
        let Commands::Points { items, .. } = cli.command else {
            panic!("expected the points command");
        };

        assert_eq!(requested_categories(&items), BTreeSet::from([1, 2]));
    }
}
