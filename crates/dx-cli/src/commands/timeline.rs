use dx_core::query::TimelineFilter;

use super::{rule, Context};

pub async fn run(ctx: &Context, criteria: &TimelineFilter) -> anyhow::Result<()> {
    let view = ctx.backend.timeline(criteria).await?;
    ctx.emit(&view, |view| {
        println!(
            "{} events, {} platforms, peak {}, spread {}",
            view.stats.total_events,
            view.stats.platforms,
            view.stats.peak_activity,
            view.stats.spread_velocity
        );
        println!("{}", rule());
        for e in &view.events {
            println!("{}  {}", e.date.format("%Y-%m-%d %H:%M"), e.title);
            println!("                  {} ({})", e.description, e.platforms.join(", "));
        }
    })
}
