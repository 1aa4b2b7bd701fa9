use dx_backend::AlertBoard;
use dx_core::query::AlertFilter;
use dx_core::types::Alert;

use super::{rule, Context};
use crate::AlertCommand;

fn print_row(a: &Alert) {
    let ack = if a.is_acknowledged { "ack" } else { "" };
    println!(
        "{:<4} {:<9} {:<21} {:<3} {}",
        a.id, a.severity, a.alert_type, ack, a.title
    );
}

pub async fn run(ctx: &Context, cmd: AlertCommand) -> anyhow::Result<()> {
    match cmd {
        AlertCommand::List {
            severity,
            alert_type,
            active,
        } => {
            let criteria = AlertFilter {
                severity,
                alert_type,
                timeframe: None,
            };
            let board = AlertBoard::load(ctx.backend.as_ref(), &criteria).await?;
            let shown: Vec<&Alert> = if active {
                board.active().collect()
            } else {
                board.alerts().iter().collect()
            };
            ctx.emit(&shown, |items| {
                items.iter().for_each(|a| print_row(a));
            })
        }
        AlertCommand::Show { id } => {
            let alert = ctx.backend.alert(&id).await?;
            ctx.emit(&alert, |a| {
                println!("{} [{}]", a.title, a.id);
                println!("{}", rule());
                println!("{}", a.description);
                println!("severity:  {}", a.severity);
                println!("type:      {}", a.alert_type);
                println!("raised:    {}", a.timestamp.format("%Y-%m-%d %H:%M UTC"));
                if !a.recommended_actions.is_empty() {
                    println!("\nRecommended actions");
                    for action in &a.recommended_actions {
                        println!("  - {action}");
                    }
                }
            })
        }
        AlertCommand::Ack { id } => {
            let mut board = AlertBoard::load(ctx.backend.as_ref(), &AlertFilter::default()).await?;
            let ack = board.acknowledge(ctx.backend.as_ref(), &id).await?;
            ctx.emit(&ack, |ack| {
                println!("Alert {} acknowledged.", ack.id);
                println!("{} alerts still active.", board.active().count());
            })
        }
        AlertCommand::Escalate { id } => {
            let esc = ctx.backend.escalate_alert(&id).await?;
            ctx.emit(&esc, |esc| {
                println!("Alert {} escalated to {}.", esc.id, esc.severity);
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ack_and_escalate() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path()).await;
        run(&ctx, AlertCommand::Ack { id: "1".into() }).await.unwrap();
        run(&ctx, AlertCommand::Escalate { id: "2".into() }).await.unwrap();
        assert!(run(&ctx, AlertCommand::Ack { id: "77".into() }).await.is_err());
    }

    #[tokio::test]
    async fn list_active() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::for_tests(dir.path()).await;
        run(
            &ctx,
            AlertCommand::List {
                severity: None,
                alert_type: None,
                active: true,
            },
        )
        .await
        .unwrap();
    }
}
