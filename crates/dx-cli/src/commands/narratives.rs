use dx_core::query::NarrativeFilter;
use dx_core::types::Narrative;

use super::{page_footer, rule, truncate, Context};
use crate::NarrativeCommand;

fn print_row(n: &Narrative) {
    println!(
        "{:<4} {:<26} {:>5} {:<10} {}",
        n.id,
        n.category,
        n.volume,
        n.trend,
        truncate(&n.title, 48)
    );
}

fn print_detail(n: &Narrative) {
    println!("{} [{}]", n.title, n.id);
    println!("{}", rule());
    println!("{}", n.description);
    println!("category:    {}", n.category);
    println!("confidence:  {}", n.confidence);
    println!("volume:      {} ({})", n.volume, n.trend);
    println!("languages:   {}", n.languages.join(", "));
    println!("platforms:   {}", n.platforms.join(", "));
    println!("detected:    {}", n.first_detected.format("%Y-%m-%d %H:%M UTC"));
    println!("updated:     {}", n.last_updated.format("%Y-%m-%d %H:%M UTC"));
}

pub async fn run(ctx: &Context, cmd: NarrativeCommand) -> anyhow::Result<()> {
    match cmd {
        NarrativeCommand::List {
            category,
            language,
            platform,
            search,
            page,
        } => {
            let criteria = NarrativeFilter {
                category,
                language,
                platform,
                search,
            };
            let result = ctx.backend.list_narratives(&criteria, page.into()).await?;
            ctx.emit(&result.items, |items| {
                for n in items {
                    print_row(n);
                }
                page_footer(&result.meta, items.len());
            })
        }
        NarrativeCommand::Show {
            id,
            related,
            timeline,
        } => {
            let narrative = ctx.backend.narrative(&id).await?;
            ctx.emit(&narrative, print_detail)?;
            if related {
                let items = ctx.backend.related_narratives(&id).await?;
                ctx.emit(&items, |items| {
                    println!("\nRelated");
                    items.iter().for_each(print_row);
                })?;
            }
            if timeline {
                let events = ctx.backend.narrative_timeline(&id).await?;
                ctx.emit(&events, |events| {
                    println!("\nTimeline");
                    for e in events {
                        println!("  {}  {}", e.date.format("%m-%d %H:%M"), e.title);
                    }
                })?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PageArgs;

    #[tokio::test]
    async fn list_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path()).await;
        run(
            &ctx,
            NarrativeCommand::List {
                category: None,
                language: Some("en".into()),
                platform: None,
                search: None,
                page: PageArgs::default(),
            },
        )
        .await
        .unwrap();
        run(
            &ctx,
            NarrativeCommand::Show {
                id: "1".into(),
                related: true,
                timeline: true,
            },
        )
        .await
        .unwrap();
        assert!(run(
            &ctx,
            NarrativeCommand::Show {
                id: "404".into(),
                related: false,
                timeline: false,
            },
        )
        .await
        .is_err());
    }
}
