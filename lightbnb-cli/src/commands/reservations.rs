//! Reservations command - list a guest's reservations

use anyhow::Result;
use clap::Args;
use lightbnb_core::LightbnbConfig;
use lightbnb_db::ReservationRepo;

#[derive(Args, Debug)]
#[command(about = "List reservations for a guest (one row per property review)")]
pub struct ReservationsArgs {
    /// Guest user id
    #[arg(long)]
    pub guest: i32,

    /// Maximum rows to return [default: search.default_limit]
    #[arg(long)]
    pub limit: Option<i64>,
}

impl ReservationsArgs {
    fn limit(&self, config: &LightbnbConfig) -> i64 {
        self.limit.unwrap_or(config.search.default_limit)
    }
}

pub async fn run(args: ReservationsArgs, config: &LightbnbConfig) -> Result<()> {
    let limit = args.limit(config);
    let pool = super::connect(config).await?;
    let rows = ReservationRepo::new(&pool)
        .list_for_guest(args.guest, limit)
        .await?;
    super::print_json(&rows)
}
