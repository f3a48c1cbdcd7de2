//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use taskdesk_core::guard::{Layout, Panel};
use taskdesk_core::{Screen, UserProfile};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a hint on stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print the signed-in user's profile.
pub fn profile(profile: &UserProfile) {
    field("Name", profile.display_name());
    if let Some(email) = profile.email() {
        field("Email", email);
    }
    if let Some(id) = profile.id() {
        field("Id", &id.to_string());
    }
    field("Role", &profile.role().to_string());
}

/// Print what a navigation settled on.
pub fn screen(screen: &Screen) {
    match screen {
        Screen::Loading { location } => {
            field("Location", location.as_str());
            field("View", "Loading...");
        }
        Screen::Page {
            location,
            state,
            page,
        } => {
            field("Location", location.as_str());
            field("View", page.view.title());

            if let Some(from) = &state.from {
                field("From", from.as_str());
            }
            if state.just_registered {
                field("Notice", "Registration successful. Please sign in.");
            }

            if let Layout::Authenticated(chrome) = &page.layout {
                field("User", &format!("{} ({})", chrome.user_label, chrome.role));
                let links = chrome
                    .links
                    .iter()
                    .map(|link| {
                        if link.active {
                            format!("[{}]", link.label)
                        } else {
                            link.label.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                field("Nav", &links);
            }

            let panels = page
                .panels
                .iter()
                .map(|p| panel_name(*p))
                .collect::<Vec<_>>()
                .join(", ");
            field("Panels", &panels);
        }
    }
}

fn panel_name(panel: Panel) -> &'static str {
    match panel {
        Panel::SignInForm => "sign-in form",
        Panel::RegisterForm => "registration form",
        Panel::Admin => "admin",
        Panel::TaskForm => "task form",
        Panel::TaskList => "task list",
        Panel::SubmissionList => "submissions",
    }
}
