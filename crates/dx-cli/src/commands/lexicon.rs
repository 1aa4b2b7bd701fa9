use super::Context;

pub async fn run(ctx: &Context, language: Option<&str>) -> anyhow::Result<()> {
    match language {
        None => {
            let lexicons = ctx.backend.lexicons().await?;
            ctx.emit(&lexicons, |items| {
                for l in items {
                    println!("{:<4} {:<16} {:>4} terms  {}", l.id, l.name, l.term_count, l.description);
                }
            })
        }
        Some(lang) => {
            let entries = ctx.backend.lexicon_terms(lang).await?;
            ctx.emit(&entries, |entries| {
                for t in &entries.terms {
                    let translated = t
                        .translations
                        .get(&entries.language)
                        .map(String::as_str)
                        .unwrap_or("-");
                    println!("{:<24} {:<24} {}", t.term, translated, t.category);
                }
            })
        }
    }
}
