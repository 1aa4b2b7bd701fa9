use dx_backend::ReportShelf;
use dx_core::query::ReportFilter;
use dx_core::types::{Report, ReportRequest};

use super::{page_footer, rule, Context};
use crate::ReportCommand;

fn print_report(r: &Report) {
    println!("{} [{}]", r.title, r.id);
    println!("{}", rule());
    println!("{} by {} on {}", r.report_type, r.created_by, r.created_at.format("%Y-%m-%d"));
    println!("\n{}", r.summary);
    println!("\nKey findings");
    for f in &r.key_findings {
        println!("  - {f}");
    }
    if !r.recommendations.is_empty() {
        println!("\nRecommendations");
        for rec in &r.recommendations {
            println!("  - {rec}");
        }
    }
}

pub async fn run(ctx: &Context, cmd: ReportCommand) -> anyhow::Result<()> {
    match cmd {
        ReportCommand::List { search, page } => {
            let result = ctx
                .backend
                .list_reports(&ReportFilter { search }, page.into())
                .await?;
            ctx.emit(&result.items, |items| {
                for r in items {
                    println!("{:<16} {:<24} {}", r.id, r.report_type, r.title);
                }
                page_footer(&result.meta, items.len());
            })
        }
        ReportCommand::Show { id } => {
            let report = ctx.backend.report(&id).await?;
            ctx.emit(&report, print_report)
        }
        ReportCommand::Create {
            title,
            kind,
            timeframe,
            narratives,
            actors,
            no_charts,
            raw_data,
            no_recommendations,
        } => {
            let request = ReportRequest {
                title,
                report_type: kind,
                timeframe,
                narrative_ids: narratives,
                actor_ids: actors,
                include_charts: !no_charts,
                include_raw_data: raw_data,
                include_recommendations: !no_recommendations,
            };
            let mut shelf = ReportShelf::default();
            let report = shelf.create(ctx.backend.as_ref(), &request).await?;
            ctx.emit(report, print_report)
        }
        ReportCommand::Export { id, format } => {
            let ticket = ReportShelf::default()
                .export(ctx.backend.as_ref(), &id, format)
                .await?;
            ctx.emit(&ticket, |t| println!("{} ({}): {}", t.id, t.format, t.url))
        }
    }
}
