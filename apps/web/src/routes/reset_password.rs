use crate::app_lib::AppError;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::types::{PasswordResetConfirmRequest, PasswordResetRequest};
use crate::routes::take_fragment_token;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;

const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";
const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

/// Without a `#token=` fragment this page requests a reset email; with one
/// it asks for the new password.
#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let (token, set_token) = signal::<Option<String>>(None);
    Effect::new(move |_| {
        if let Some(value) = take_fragment_token() {
            set_token.set(Some(value));
        }
    });

    view! {
        <AppShell>
            {move || match token.get() {
                Some(token) => view! { <ConfirmForm token=token /> }.into_any(),
                None => view! { <RequestForm /> }.into_any(),
            }}
        </AppShell>
    }
}

#[component]
fn RequestForm() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (submitted, set_submitted) = signal(false);

    let request_action = Action::new_local(move |email: &String| {
        let email = email.clone();
        async move { client::request_password_reset(&PasswordResetRequest { email }).await }
    });

    Effect::new(move |_| {
        if let Some(Ok(())) = request_action.value().get() {
            // Always confirm; the server is deliberately opaque about
            // whether the address exists.
            set_submitted.set(true);
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let email_value = email.get_untracked().trim().to_string();
        if !email_value.is_empty() {
            request_action.dispatch(email_value);
        }
    };

    view! {
        <Show
            when=move || submitted.get()
            fallback=move || {
                view! {
                    <form class="max-w-sm mx-auto" on:submit=on_submit>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="email">
                                "Your email"
                            </label>
                            <input
                                id="email"
                                type="email"
                                class=INPUT_CLASS
                                autocomplete="email"
                                required
                                on:input=move |event| set_email.set(event_target_value(&event))
                            />
                        </div>
                        <Button button_type="submit" disabled=request_action.pending()>
                            "Send reset link"
                        </Button>
                        {move || {
                            request_action
                                .pending()
                                .get()
                                .then_some(view! { <div class="mt-4"><Spinner /></div> })
                        }}
                    </form>
                }
            }
        >
            <div class="max-w-sm mx-auto">
                <Alert
                    kind=AlertKind::Success
                    message="If that address has an account, a reset link is on its way.".to_string()
                />
            </div>
        </Show>
    }
}

#[component]
fn ConfirmForm(token: String) -> impl IntoView {
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<AppError>>(None);
    let (done, set_done) = signal(false);

    let confirm_action = Action::new_local(move |request: &PasswordResetConfirmRequest| {
        let request = request.clone();
        async move { client::confirm_password_reset(&request).await }
    });

    Effect::new(move |_| {
        if let Some(result) = confirm_action.value().get() {
            match result {
                Ok(()) => set_done.set(true),
                Err(err) => set_error.set(Some(err)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let password_value = password.get_untracked();
        if password_value.len() < 8 {
            set_error.set(Some(AppError::Config(
                "Choose a password of at least 8 characters.".to_string(),
            )));
            return;
        }

        confirm_action.dispatch(PasswordResetConfirmRequest {
            token: token.clone(),
            new_password: password_value,
        });
    };

    view! {
        <Show
            when=move || done.get()
            fallback=move || {
                view! {
                    <form class="max-w-sm mx-auto" on:submit=on_submit>
                        <div class="mb-5">
                            <label class=LABEL_CLASS for="new-password">
                                "New password"
                            </label>
                            <input
                                id="new-password"
                                type="password"
                                class=INPUT_CLASS
                                autocomplete="new-password"
                                minlength="8"
                                required
                                on:input=move |event| set_password.set(event_target_value(&event))
                            />
                        </div>
                        <Button button_type="submit" disabled=confirm_action.pending()>
                            "Set new password"
                        </Button>
                        {move || {
                            error
                                .get()
                                .map(|err| {
                                    view! {
                                        <div class="mt-4">
                                            <Alert kind=AlertKind::Error message=err.user_message() />
                                        </div>
                                    }
                                })
                        }}
                    </form>
                }
            }
        >
            <div class="max-w-sm mx-auto space-y-4">
                <Alert
                    kind=AlertKind::Success
                    message="Password updated. Sign in with your new password.".to_string()
                />
                <A
                    href="/login"
                    {..}
                    class="text-blue-700 hover:underline dark:text-blue-500"
                >
                    "Go to sign in"
                </A>
            </div>
        </Show>
    }
}
