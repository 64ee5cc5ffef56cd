//! Add command: third-party integrations

use anyhow::{Context, Result};
use std::fs;
use tracing::warn;

use crate::app::App;
use crate::cli::AddCommands;
use crate::output;

/// Packages, configuration, and follow-up for one integration
struct Integration {
    title: &'static str,
    /// (workspace member, packages) pairs installed in order
    installs: &'static [(&'static str, &'static [&'static str])],
    env_block: &'static str,
    next_steps: &'static [&'static str],
    docs: &'static str,
    dashboard_prompt: &'static str,
    dashboard_url: &'static str,
}

const STRIPE: Integration = Integration {
    title: "Stripe billing",
    installs: &[
        ("apps/web", &["stripe", "@stripe/stripe-js"]),
        ("apps/api", &["stripe"]),
    ],
    env_block: "# Stripe
STRIPE_SECRET_KEY=sk_test_...
STRIPE_PUBLISHABLE_KEY=pk_test_...
STRIPE_WEBHOOK_SECRET=whsec_...
STRIPE_PRICE_ID_BASIC=price_...
STRIPE_PRICE_ID_PRO=price_...",
    next_steps: &[
        "Create products and prices in the Stripe Dashboard",
        "Set up a webhook endpoint at /api/webhooks/stripe",
    ],
    docs: "https://stripe.com/docs/billing/subscriptions",
    dashboard_prompt: "Open Stripe Dashboard?",
    dashboard_url: "https://dashboard.stripe.com",
};

const EMAILS: Integration = Integration {
    title: "email support with Resend",
    installs: &[(
        "apps/api",
        &["resend", "@react-email/components", "react-email"],
    )],
    env_block: "# Email (Resend)
RESEND_API_KEY=re_...
EMAIL_FROM=noreply@yourdomain.com",
    next_steps: &[
        "Verify your domain in Resend",
        "Create email templates in apps/api/src/emails/",
    ],
    docs: "https://resend.com/docs",
    dashboard_prompt: "Open Resend Dashboard?",
    dashboard_url: "https://resend.com/api-keys",
};

const ANALYTICS: Integration = Integration {
    title: "analytics with PostHog",
    installs: &[("apps/web", &["posthog-js"])],
    env_block: "# Analytics (PostHog)
NEXT_PUBLIC_POSTHOG_KEY=phc_...
NEXT_PUBLIC_POSTHOG_HOST=https://app.posthog.com",
    next_steps: &[
        "Wrap your app with <PostHogProvider> in layout.tsx",
        "Track events: posthog.capture(\"event_name\")",
    ],
    docs: "https://posthog.com/docs/libraries/next-js",
    dashboard_prompt: "Open PostHog signup?",
    dashboard_url: "https://app.posthog.com/signup",
};

/// Where the analytics provider component is written, if its directory exists
const POSTHOG_PROVIDER_DIR: &str = "apps/web/components";
const POSTHOG_PROVIDER_FILE: &str = "posthog-provider.tsx";

const POSTHOG_PROVIDER: &str = r#"'use client';

import posthog from 'posthog-js';
import { PostHogProvider as PHProvider } from 'posthog-js/react';
import { useEffect } from 'react';

export function PostHogProvider({ children }: { children: React.ReactNode }) {
  useEffect(() => {
    if (typeof window !== 'undefined' && process.env.NEXT_PUBLIC_POSTHOG_KEY) {
      posthog.init(process.env.NEXT_PUBLIC_POSTHOG_KEY, {
        api_host: process.env.NEXT_PUBLIC_POSTHOG_HOST || 'https://app.posthog.com',
        capture_pageview: false,
      });
    }
  }, []);

  return <PHProvider client={posthog}>{children}</PHProvider>;
}
"#;

pub async fn run(cmd: AddCommands, app: &App) -> Result<()> {
    app.workspace.require_project_root()?;

    let integration = match cmd {
        AddCommands::Stripe => &STRIPE,
        AddCommands::Emails => &EMAILS,
        AddCommands::Analytics => &ANALYTICS,
    };

    output::header(&format!("Adding {}", integration.title));
    install(app, integration).await?;

    if matches!(cmd, AddCommands::Analytics) {
        write_posthog_provider(app)?;
    }

    output::success("Packages installed!");
    let mut steps = vec![format!("Add these to your .env file:\n\n{}\n", integration.env_block)];
    steps.extend(integration.next_steps.iter().map(|s| s.to_string()));
    output::steps("Next steps:", &steps);
    println!();
    output::hint(&format!("Docs: {}", integration.docs));

    if app.prompter.is_interactive()
        && app.prompter.confirm(integration.dashboard_prompt, false)?
    {
        if let Err(e) = app.prompter.open_url(integration.dashboard_url) {
            warn!(error = %e, "could not open browser");
            output::warning(&format!("Open {} in your browser", integration.dashboard_url));
        }
    }
    Ok(())
}

async fn install(app: &App, integration: &Integration) -> Result<()> {
    let pm = app.workspace.package_manager();
    for &(member, packages) in integration.installs {
        let add = app.workspace.at_root(pm.add_to_workspace(member, packages));
        app.run_inherit(&add)
            .await
            .with_context(|| format!("Failed to install {} packages", integration.title))?;
    }
    Ok(())
}

fn write_posthog_provider(app: &App) -> Result<()> {
    let dir = app.workspace.path(POSTHOG_PROVIDER_DIR);
    if !dir.is_dir() {
        return Ok(());
    }
    let path = dir.join(POSTHOG_PROVIDER_FILE);
    fs::write(&path, POSTHOG_PROVIDER).with_context(|| format!("Failed to write {}", path))?;
    output::success(&format!(
        "Created {}/{}",
        POSTHOG_PROVIDER_DIR, POSTHOG_PROVIDER_FILE
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrations_install_into_generated_services() {
        for integration in [&STRIPE, &EMAILS, &ANALYTICS] {
            assert!(!integration.installs.is_empty());
            for (member, packages) in integration.installs {
                assert!(member.starts_with("apps/"));
                assert!(!packages.is_empty());
            }
            assert!(integration.dashboard_url.starts_with("https://"));
        }
    }

    #[test]
    fn test_stripe_installs_into_both_services() {
        let members: Vec<&str> = STRIPE.installs.iter().map(|(m, _)| *m).collect();
        assert_eq!(members, vec!["apps/web", "apps/api"]);
    }
}
