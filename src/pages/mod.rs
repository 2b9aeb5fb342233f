mod dashboard;

pub use dashboard::DashboardPage;

use crate::api::SignupRequest;
use crate::auth::{signup_failure_message, LoginForm, SignupForm, LOGIN_FAILED, SIGNUP_DONE};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardHeader, CardTitle,
    ErrorAlert, Input, Label, NoticeAlert, Spinner,
};
use crate::models::Role;
use crate::state::session::LOGIN_PATH;
use crate::state::AppContext;
use icons::{Moon, Sun};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::{use_navigate, use_query_map};
use std::str::FromStr;

#[component]
pub fn LoginPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    // Set by the signup page after an account was created.
    let query = use_query_map();
    let notice = Signal::derive(move || {
        query
            .with(|q| q.get("registered").is_some())
            .then(|| SIGNUP_DONE.to_string())
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = LoginForm {
            username: username.get(),
            password: password.get(),
        };
        if let Err(e) = form.validate() {
            error.set(Some(e.to_string()));
            return;
        }

        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.login(&form.username, &form.password).await {
                Ok(response) => {
                    app_state.0.sign_in(response.access_token);
                    navigate.with_value(|nav| nav("/dashboard", Default::default()));
                }
                Err(_) => {
                    // Bad credentials and network trouble look the same to the user.
                    error.set(Some(LOGIN_FAILED.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Family Notes"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"🔐 Log in"</CardTitle>
                        <CardDescription class="text-xs">"Use your username (or email) and password."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="username" class="text-xs">"Username"</Label>
                                <Input
                                    id="username"
                                    placeholder="yourname"
                                    bind_value=username
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    class="h-8 text-sm"
                                />
                            </div>

                            <NoticeAlert message=notice />
                            <ErrorAlert message=error />

                            <Button
                                class="w-full"
                                size=ButtonSize::Sm
                                attr:disabled=move || loading.get()
                            >
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Signing in..." } else { "Login" }}
                                </span>
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "Don't have an account? "
                                <a class="text-primary underline underline-offset-4" href="/signup">"Sign up"</a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let username: RwSignal<String> = RwSignal::new(String::new());
    let email: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let role: RwSignal<Role> = RwSignal::new(Role::Child);
    let parent_id: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = SignupForm {
            username: username.get(),
            email: email.get(),
            password: password.get(),
            role: role.get(),
            parent_id: parent_id.get(),
        };
        let req: SignupRequest = match form.into_request() {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };

        let api_client = app_state.0.api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.signup(&req).await {
                Ok(_user) => {
                    // No auto-login: the user signs in with the new account.
                    navigate.with_value(|nav| nav("/login?registered=1", Default::default()));
                }
                Err(e) => {
                    error.set(Some(signup_failure_message(&e)));
                }
            }
            loading.set(false);
        });
    };

    let heading = move || match role.get() {
        Role::Child => "🎨 Join as Child",
        Role::Parent => "👨‍👩‍👧 Parent Registration",
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center">
                    <a href="/" class="text-sm font-medium text-foreground">"Family Notes"</a>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">{heading}</CardTitle>
                        <CardDescription class="text-xs">"Children can link to a parent account by id."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <form class="flex flex-col gap-3" on:submit=on_submit>
                            <div class="flex flex-col gap-1.5">
                                <Label html_for="username" class="text-xs">"Username"</Label>
                                <Input id="username" placeholder="yourname" bind_value=username class="h-8 text-sm" />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="email" class="text-xs">"Email"</Label>
                                <Input
                                    id="email"
                                    r#type="email"
                                    placeholder="you@example.com"
                                    bind_value=email
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="password" class="text-xs">"Password"</Label>
                                <Input
                                    id="password"
                                    r#type="password"
                                    placeholder="••••••••"
                                    bind_value=password
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="flex flex-col gap-1.5">
                                <Label html_for="role" class="text-xs">"Role"</Label>
                                <select
                                    id="role"
                                    class="border-input h-8 rounded-md border bg-transparent px-2 text-sm"
                                    prop:value=move || role.get().to_string()
                                    on:change=move |ev| {
                                        if let Ok(r) = Role::from_str(&event_target_value(&ev)) {
                                            role.set(r);
                                        }
                                    }
                                >
                                    <option value=Role::Child.to_string()>"Child"</option>
                                    <option value=Role::Parent.to_string()>"Parent"</option>
                                </select>
                            </div>

                            <Show when=move || role.get() == Role::Child fallback=|| ().into_view()>
                                <div class="flex flex-col gap-1.5">
                                    <Label html_for="parent_id" class="text-xs">"Parent ID (optional)"</Label>
                                    <Input id="parent_id" placeholder="42" bind_value=parent_id class="h-8 text-sm" />
                                </div>
                            </Show>

                            <ErrorAlert message=error />

                            <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || loading.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || loading.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    {move || if loading.get() { "Creating..." } else { "Signup" }}
                                </span>
                            </Button>

                            <div class="pt-1 text-xs text-muted-foreground">
                                "Already have an account? "
                                <a class="text-primary underline underline-offset-4" href="/login">"Login"</a>
                            </div>
                        </form>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn ThemeToggle(dark: RwSignal<bool>) -> impl IntoView {
    view! {
        <Button
            size=ButtonSize::Icon
            variant=ButtonVariant::Ghost
            attr:title="Toggle Theme"
            on:click=move |_| dark.update(|d| *d = !*d)
        >
            <Show when=move || dark.get() fallback=|| view! { <Moon class="size-4" /> }>
                <Sun class="size-4" />
            </Show>
        </Button>
    }
}

/// Landing page for signed-out visitors.
#[component]
pub fn HomePage() -> impl IntoView {
    let dark: RwSignal<bool> = RwSignal::new(false);

    view! {
        <div class=move || if dark.get() { "dark min-h-screen bg-background text-foreground" } else { "min-h-screen bg-background text-foreground" }>
            <header class="flex items-center justify-between px-6 py-4">
                <span class="text-sm font-semibold">"📝 Family Notes"</span>
                <div class="flex items-center gap-2">
                    <ThemeToggle dark=dark />
                    <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost href="/login">"Login"</Button>
                    <Button size=ButtonSize::Sm href="/signup">"Sign up"</Button>
                </div>
            </header>

            <main class="mx-auto flex max-w-xl flex-col items-center gap-4 px-4 py-24 text-center">
                <h1 class="text-3xl font-bold">"Notes and checklists for the whole family"</h1>
                <p class="text-sm text-muted-foreground">
                    "Kids keep their notes, folders and todo lists. Parents follow along."
                </p>
                <div class="flex gap-2 pt-2">
                    <Button href="/signup">"Get started"</Button>
                    <Button variant=ButtonVariant::Outline href="/login">"I have an account"</Button>
                </div>
            </main>
        </div>
    }
}

/// Renders `children` only with a session; otherwise goes to the login page.
///
/// This is the only redirect taken when a session ends (logout, 401, or a
/// sign-out in another tab).
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.get().is_authenticated();

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    view! {
        <Show when=is_authenticated fallback=|| view! { <Redirect path=LOGIN_PATH /> }>
            {move || children.with_value(|c| c())}
        </Show>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let is_authenticated = move || app_state.0.api_client.get().is_authenticated();

    view! {
        <Show when=is_authenticated fallback=HomePage>
            <Redirect path="/dashboard" />
        </Show>
    }
}
