use vocable_auth::SessionTokens;

use super::{EventContext, build_store};

/// Start the hosted redirect flow. Headless client: we hand the user
/// the authorize URL; the provider redirects back with the tokens.
pub async fn handle_login(ctx: &EventContext) -> anyhow::Result<()> {
    let url = {
        let identity = ctx.state.identity.read().await;
        identity.login_url()
    };

    match url {
        Ok(url) => {
            ctx.show_status(
                ctx.catalog
                    .fmt("auth.login_hint", &[("url", url.as_str())]),
            )
            .await?;
        }
        Err(e) => {
            ctx.show_status(
                ctx.catalog
                    .fmt("auth.login_failed", &[("reason", &e.to_string())]),
            )
            .await?;
        }
    }

    Ok(())
}

/// Install the tokens the provider handed back, then rebuild the store
/// so every following call carries the bearer credential.
pub async fn handle_complete_login(ctx: &mut EventContext, id_token: String) -> anyhow::Result<()> {
    let result = {
        let mut identity = ctx.state.identity.write().await;
        identity
            .begin_session(SessionTokens {
                id_token,
                access_token: None,
            })
            .map(|principal| principal.identifier().to_string())
    };

    match result {
        Ok(identifier) => {
            if let Err(e) = ctx.cache.save_session_hint(&identifier) {
                tracing::warn!("failed to persist session hint: {e:#}");
            }
            ctx.store = build_store(&ctx.state, ctx.cache.load()).await;
            ctx.show_status(ctx.catalog.fmt("auth.welcome", &[("name", &identifier)]))
                .await?;
        }
        Err(e) => {
            tracing::warn!("login failed: {e}");
            ctx.show_status(
                ctx.catalog
                    .fmt("auth.login_failed", &[("reason", &e.to_string())]),
            )
            .await?;
        }
    }

    Ok(())
}

pub async fn handle_logout(ctx: &mut EventContext) -> anyhow::Result<()> {
    let logout_url = {
        let mut identity = ctx.state.identity.write().await;
        identity.clear_session();
        identity.logout_url()
    };
    ctx.store = build_store(&ctx.state, ctx.cache.load()).await;

    let mut message = ctx.catalog.t("auth.logged_out").to_string();
    // Provider-side sign-out still needs the hosted logout redirect.
    if let Ok(url) = logout_url {
        message.push('\n');
        message.push_str(url.as_str());
    }
    ctx.show_status(message).await
}

/// Current principal, or the persisted hint from the last session.
pub async fn handle_whoami(ctx: &EventContext) -> anyhow::Result<()> {
    let identifier = {
        let identity = ctx.state.identity.read().await;
        identity
            .current_principal()
            .map(|p| p.identifier().to_string())
    };

    let message = match identifier {
        Some(name) => ctx.catalog.fmt("auth.welcome", &[("name", &name)]),
        None => match ctx.cache.load_session_hint() {
            Some(hint) => format!(
                "{}\n{}",
                ctx.catalog.t("auth.not_authenticated"),
                ctx.catalog.fmt("auth.last_user", &[("name", &hint)])
            ),
            None => ctx.catalog.t("auth.not_authenticated").to_string(),
        },
    };
    ctx.show_status(message).await
}
