//! Auth Page Component
//!
//! Login and register forms with a toggle between them.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions::{BrowserAlert, Notifier};
use crate::api::{self, payloads::Credentials};
use crate::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

fn navigate(url: &str) {
    let moved = web_sys::window().map(|window| window.location().set_href(url));
    if !matches!(moved, Some(Ok(()))) {
        tracing::warn!(url, "could not navigate");
    }
}

#[component]
pub fn AuthPage(config: ClientConfig) -> impl IntoView {
    let messages = config.messages();
    let (mode, set_mode) = signal(AuthMode::Login);
    let config = StoredValue::new(config);

    view! {
        <main class="auth-page">
            <Show when=move || mode.get() == AuthMode::Login>
                <CredentialsForm mode=AuthMode::Login config=config.get_value() />
                <a href="#" class="auth-toggle" on:click=move |ev| {
                    ev.prevent_default();
                    set_mode.set(AuthMode::Register);
                }>
                    {messages.to_register}
                </a>
            </Show>
            <Show when=move || mode.get() == AuthMode::Register>
                <CredentialsForm mode=AuthMode::Register config=config.get_value() />
                <a href="#" class="auth-toggle" on:click=move |ev| {
                    ev.prevent_default();
                    set_mode.set(AuthMode::Login);
                }>
                    {messages.to_login}
                </a>
            </Show>
        </main>
    }
}

#[component]
fn CredentialsForm(mode: AuthMode, config: ClientConfig) -> impl IntoView {
    let messages = config.messages();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let config = StoredValue::new(config);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials { username: username.get(), password: password.get() };
        let config = config.get_value();
        spawn_local(async move {
            let result = match mode {
                AuthMode::Login => api::login(&config.login_url(), &credentials).await,
                AuthMode::Register => api::register(&config.register_url(), &credentials).await,
            };
            match result {
                Ok(()) => navigate(&config.board_page()),
                Err(err) => {
                    tracing::error!(?mode, error = %err, "authentication failed");
                    BrowserAlert.alert(messages.login_failed);
                }
            }
        });
    };

    let (form_id, heading) = match mode {
        AuthMode::Login => ("login-form", messages.login),
        AuthMode::Register => ("register-form", messages.register),
    };

    view! {
        <form id=form_id class="auth-form" on:submit=submit>
            <h2>{heading}</h2>
            <input
                type="text"
                placeholder=messages.username
                prop:value=move || username.get()
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder=messages.password
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit">{heading}</button>
        </form>
    }
}
