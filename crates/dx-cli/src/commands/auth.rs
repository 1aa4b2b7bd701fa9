use dx_core::types::{Credentials, User};

use super::Context;

fn print_user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("  role:          {}", user.role);
    println!("  organization:  {}", user.organization);
    if !user.regions.is_empty() {
        println!("  regions:       {}", user.regions.join(", "));
    }
}

pub async fn login(ctx: &Context, email: &str, password: &str) -> anyhow::Result<()> {
    let user = ctx
        .session
        .login(&Credentials::new(email, password))
        .await?;
    ctx.emit(&user, |u| {
        println!("Signed in as {}", u.name);
    })
}

pub async fn logout(ctx: &Context) -> anyhow::Result<()> {
    if !ctx.session.is_authenticated().await {
        println!("Not signed in.");
        return Ok(());
    }
    ctx.session.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> anyhow::Result<()> {
    match ctx.session.current_user().await {
        Some(user) => ctx.emit(&user, print_user),
        None => {
            anyhow::bail!("not signed in (run `dexter login --email ... --password ...`)")
        }
    }
}
