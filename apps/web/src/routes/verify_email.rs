use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::client;
use crate::features::auth::types::VerifyEmailRequest;
use crate::routes::take_fragment_token;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

#[derive(Clone, PartialEq)]
enum VerifyState {
    Working,
    Verified,
    Failed(String),
}

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let (state, set_state) = signal(VerifyState::Working);

    // Consume the fragment token once on mount.
    Effect::new(move |_| {
        let Some(token) = take_fragment_token() else {
            set_state.set(VerifyState::Failed(
                "The verification link is missing its token.".to_string(),
            ));
            return;
        };
        spawn_local(async move {
            match client::verify_email(&VerifyEmailRequest { token }).await {
                Ok(()) => set_state.set(VerifyState::Verified),
                Err(err) => set_state.set(VerifyState::Failed(err.user_message())),
            }
        });
    });

    view! {
        <AppShell>
            <div class="max-w-sm mx-auto space-y-4">
                {move || match state.get() {
                    VerifyState::Working => view! { <Spinner /> }.into_any(),
                    VerifyState::Verified => {
                        view! {
                            <Alert
                                kind=AlertKind::Success
                                message="Your email is verified. You can sign in now.".to_string()
                            />
                            <A
                                href="/login"
                                {..}
                                class="text-blue-700 hover:underline dark:text-blue-500"
                            >
                                "Go to sign in"
                            </A>
                        }
                            .into_any()
                    }
                    VerifyState::Failed(message) => {
                        view! {
                            <Alert kind=AlertKind::Error message=message />
                            <p class="text-sm text-gray-500 dark:text-gray-400">
                                "The link may have expired. Request a new one from the sign-up page."
                            </p>
                        }
                            .into_any()
                    }
                }}
            </div>
        </AppShell>
    }
}
