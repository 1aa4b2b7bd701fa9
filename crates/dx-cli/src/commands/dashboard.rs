use super::{rule, Context};

pub async fn run(ctx: &Context, activity_limit: usize) -> anyhow::Result<()> {
    let summary = ctx.backend.dashboard_summary().await?;
    let limit = (activity_limit > 0).then_some(activity_limit);
    let activity = ctx.backend.dashboard_activity(limit).await?;

    if ctx.json {
        let value = serde_json::json!({
            "stats": summary.stats,
            "recentActivity": activity,
            "alerts": summary.alerts,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("dexter dashboard  ({} backend)", ctx.backend.mode());
    println!("{}", rule());
    for stat in &summary.stats {
        println!("{:<20} {}", stat.title, stat.value);
    }
    println!();
    println!("Recent activity");
    for item in &activity {
        println!("  [{}] {}: {}", item.time, item.title, item.description);
    }
    println!();
    println!("Alerts");
    for alert in &summary.alerts {
        println!("  {:<8} {} ({})", alert.severity, alert.title, alert.time);
    }
    Ok(())
}
