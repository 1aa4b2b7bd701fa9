use dx_core::query::ActorFilter;
use dx_core::types::Actor;

use super::{page_footer, rule, truncate, Context};
use crate::ActorCommand;

fn print_row(a: &Actor) {
    let flag = if a.coordinated { "coordinated" } else { "" };
    println!(
        "{:<4} {:<28} {:<13} {:<10} {:>8} {}",
        a.id,
        truncate(&a.name, 28),
        a.actor_type,
        a.platform,
        a.followers,
        flag
    );
}

pub async fn run(ctx: &Context, cmd: ActorCommand) -> anyhow::Result<()> {
    match cmd {
        ActorCommand::List {
            actor_type,
            platform,
            coordinated,
            search,
            page,
        } => {
            let criteria = ActorFilter {
                actor_type,
                platform,
                coordinated,
                search,
            };
            let result = ctx.backend.list_actors(&criteria, page.into()).await?;
            ctx.emit(&result.items, |items| {
                items.iter().for_each(print_row);
                page_footer(&result.meta, items.len());
            })
        }
        ActorCommand::Show {
            id,
            network,
            activity,
        } => {
            let actor = ctx.backend.actor(&id).await?;
            ctx.emit(&actor, |a| {
                println!("{} [{}]", a.name, a.id);
                println!("{}", rule());
                println!("type:        {}", a.actor_type);
                println!("platform:    {}", a.platform);
                println!("influence:   {}", a.influence);
                println!("followers:   {}", a.followers);
                println!("activity:    {}", a.activity);
                println!("location:    {}", a.location);
                println!("narratives:  {}", a.narratives.join(", "));
            })?;
            if network {
                let net = ctx.backend.actor_network(&id).await?;
                ctx.emit(&net, |net| {
                    println!("\nNetwork ({} linked)", net.edges.len());
                    for edge in &net.edges {
                        let label = net
                            .nodes
                            .iter()
                            .find(|n| n.id == edge.to)
                            .map(|n| n.label.as_str())
                            .unwrap_or(edge.to.as_str());
                        println!(
                            "  -> {:<28} strength {}  via {}",
                            label,
                            edge.strength,
                            edge.narratives.join(", ")
                        );
                    }
                })?;
            }
            if activity {
                let act = ctx.backend.actor_activity(&id).await?;
                ctx.emit(&act, |act| {
                    println!("\nNarrative share");
                    for share in &act.narrative_distribution {
                        println!("  {:>3}%  {}", share.percentage, share.title);
                    }
                    println!("\nRecent posts");
                    for post in &act.recent_posts {
                        println!("  [{}] {}", post.platform, truncate(&post.content, 60));
                    }
                })?;
            }
            Ok(())
        }
    }
}
