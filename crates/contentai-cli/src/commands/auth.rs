use anyhow::Result;

use super::App;

pub async fn login(app: &App, credential: &str) -> Result<()> {
    match app.auth.login(credential).await {
        Ok(user) => {
            println!("Signed in as {} <{}>", user.name, user.email);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e.user_message("Sign in"));
            Err(e.into())
        }
    }
}

pub async fn logout(app: &App) -> Result<()> {
    app.auth.logout().await?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(app: &App) {
    match app.auth.context().user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not signed in"),
    }
}
