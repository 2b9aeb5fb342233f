use super::ThemeToggle;
use crate::components::hooks::use_session_expiry;
use crate::components::ui::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, ErrorAlert, Spinner,
};
use crate::components::{FolderList, NoteCard, NoteWizardPanel, TagFilter};
use crate::dashboard::{
    derive_tags, filter_notes, load_dashboard, ChecklistToggle, DashboardLoad, LoadOutcome,
};
use crate::models::{Note, Role, User};
use crate::state::AppContext;
use crate::util::{log_error, log_info, upcoming_days};
use leptos::prelude::*;
use leptos::task::spawn_local;

const UPCOMING_DAYS: u32 = 5;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let expire = use_session_expiry();

    let load: RwSignal<DashboardLoad> = RwSignal::new(DashboardLoad::Loading);
    let notes: RwSignal<Vec<Note>> = RwSignal::new(vec![]);
    let filter_tag: RwSignal<Option<String>> = RwSignal::new(None);
    let folder_filter: RwSignal<Option<Vec<i64>>> = RwSignal::new(None);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let dark: RwSignal<bool> = RwSignal::new(false);

    let fetch_notes = move || {
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.list_notes().await {
                Ok(list) => {
                    log_info("Dashboard", &format!("loaded {} notes", list.len()));
                    notes.set(list);
                }
                Err(e) => {
                    if !expire(&e) {
                        log_error("Dashboard", &format!("failed to fetch notes: {e}"));
                    }
                }
            }
        });
    };

    // The page leaves Loading only once both calls have answered.
    let fetch_data = move || {
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let outcome = load_dashboard(|| api_client.me(), || api_client.list_notes()).await;
            let (next, list, notes_error) = match outcome {
                LoadOutcome::Expired(e) => {
                    expire(&e);
                    return;
                }
                LoadOutcome::Loaded {
                    load,
                    notes,
                    notes_error,
                } => (load, notes, notes_error),
            };

            match (&next, list, notes_error) {
                (DashboardLoad::Failed, _, _) => log_error("Dashboard", "failed to load user"),
                (_, Some(list), _) => notes.set(list),
                (_, None, Some(e)) => {
                    log_error("Dashboard", &format!("failed to fetch notes: {e}"))
                }
                _ => {}
            }

            if load.with_untracked(|l| l.is_loading()) {
                log_info("Dashboard", "initial load finished");
            }
            // Refreshes keep the mounted panels alive unless the user changed.
            if load.with_untracked(|l| l != &next) {
                load.set(next);
            }
        });
    };

    fetch_data();

    let refresh = Callback::new(move |_: ()| fetch_data());

    let on_toggle = Callback::new(move |(note_id, index): (i64, usize)| {
        let Some(role) = load.with_untracked(|l| l.user().map(|u| u.role)) else {
            return;
        };
        let toggle =
            match notes.with_untracked(|n| ChecklistToggle::begin(n, note_id, index, role)) {
                Ok(t) => t,
                Err(e) => {
                    log_info("Dashboard", &format!("toggle ignored: {e}"));
                    return;
                }
            };

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let result = api_client.update_checklist(note_id, toggle.payload()).await;
            // Always notify: a rejected click re-renders its checkbox from the
            // cached, server-confirmed items.
            notes.update(|n| {
                toggle.settle(n, &result);
            });
            if let Err(e) = &result {
                if !expire(e) {
                    log_error(
                        "Dashboard",
                        &format!("checklist update for note {} failed: {e}", toggle.note_id),
                    );
                }
            }
        });
    });

    let on_delete = Callback::new(move |note_id: i64| {
        let confirmed = window()
            .confirm_with_message("Delete this note?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.delete_note(note_id).await {
                Ok(()) => {
                    error.set(None);
                    fetch_notes();
                }
                Err(e) => {
                    if !expire(&e) {
                        log_error("Dashboard", &format!("failed to delete note {note_id}: {e}"));
                        error.set(Some("Failed to delete note".to_string()));
                    }
                }
            }
        });
    });

    let on_folder_filter = Callback::new(move |ids: Vec<i64>| folder_filter.set(Some(ids)));

    // The route guard redirects once the session is gone.
    let on_logout = move |_| app_state.0.sign_out();

    // Chips derived from the loaded notes, independent of the tag catalog.
    let tag_chips = move || {
        let all_variant = if filter_tag.with(|f| f.is_none()) {
            BadgeVariant::Active
        } else {
            BadgeVariant::Outline
        };
        let all = view! {
            <Badge variant=all_variant on:click=move |_| filter_tag.set(None)>"All"</Badge>
        };
        let tags = notes.with(|n| derive_tags(n));
        let chips = tags
            .into_iter()
            .map(|t| {
                let name = t.clone();
                let variant = if filter_tag.with(|f| f.as_deref() == Some(t.as_str())) {
                    BadgeVariant::Active
                } else {
                    BadgeVariant::Outline
                };
                view! {
                    <Badge variant=variant on:click=move |_| filter_tag.set(Some(name.clone()))>
                        {format!("#{t}")}
                    </Badge>
                }
            })
            .collect_view();
        (all, chips)
    };

    let visible_notes = move || {
        let role = load.with(|l| l.user().map(|u| u.role)).unwrap_or_default();
        let list = notes.with(|n| {
            filter_notes(
                n,
                filter_tag.get().as_deref(),
                folder_filter.get().as_deref(),
            )
        });

        if list.is_empty() {
            return view! {
                <div class="col-span-full py-8 text-center text-sm text-muted-foreground">
                    "No notes to show."
                </div>
            }
            .into_any();
        }

        list.into_iter()
            .map(|note| {
                view! { <NoteCard note=note role=role on_toggle=on_toggle on_delete=on_delete /> }
            })
            .collect_view()
            .into_any()
    };

    let days = upcoming_days(UPCOMING_DAYS);

    let body = move |user: User| {
        let (heading, tools) = match user.role {
            Role::Child => (
                "🌟 Fun Notes",
                view! {
                    <FolderList refresh=refresh on_filter=on_folder_filter />
                    <NoteWizardPanel on_created=refresh />
                }
                .into_any(),
            ),
            Role::Parent => ("👨‍👩‍👧 Parent Dashboard", ().into_any()),
        };
        let days = days.clone();

        view! {
            <header class="flex items-center justify-between border-b px-6 py-3">
                <div class="flex flex-col">
                    <span class="text-base font-semibold">{heading}</span>
                    <span class="text-xs text-muted-foreground">
                        {format!("👋 Welcome, {} ({})", user.username, user.role)}
                    </span>
                </div>
                <div class="flex items-center gap-2">
                    <ThemeToggle dark=dark />
                    <Button size=ButtonSize::Sm variant=ButtonVariant::Outline on:click=on_logout>
                        "Logout"
                    </Button>
                </div>
            </header>

            <div class="mx-auto grid max-w-6xl grid-cols-1 gap-6 px-6 py-6 md:grid-cols-[16rem_1fr]">
                <aside class="flex flex-col gap-4">
                    <TagFilter active=filter_tag />
                    <section>
                        <h3 class="mb-2 text-sm font-semibold">"📅 Upcoming days"</h3>
                        <ul class="flex flex-col gap-1 text-xs">
                            {days
                                .into_iter()
                                .enumerate()
                                .map(|(i, label)| {
                                    let label = if i == 0 { format!("Today · {label}") } else { label };
                                    view! { <li class="rounded-md px-2 py-1 hover:bg-accent">{label}</li> }
                                })
                                .collect_view()}
                        </ul>
                    </section>
                </aside>

                <main class="flex flex-col">
                    {tools}

                    <div class="mb-3 flex flex-wrap items-center gap-1">
                        {tag_chips}
                    </div>

                    <Show when=move || folder_filter.with(|f| f.is_some()) fallback=|| ().into_view()>
                        <div class="mb-3 flex items-center gap-2 text-xs text-muted-foreground">
                            "Showing notes from one folder."
                            <Button
                                size=ButtonSize::Sm
                                variant=ButtonVariant::Link
                                on:click=move |_| folder_filter.set(None)
                            >
                                "Show all"
                            </Button>
                        </div>
                    </Show>

                    <ErrorAlert message=error />

                    <div class="grid grid-cols-1 gap-4 sm:grid-cols-2 lg:grid-cols-3">
                        {visible_notes}
                    </div>
                </main>
            </div>
        }
        .into_any()
    };

    view! {
        <div class=move || if dark.get() { "dark min-h-screen bg-background text-foreground" } else { "min-h-screen bg-background text-foreground" }>
            {move || match load.get() {
                DashboardLoad::Loading => view! {
                    <div class="flex min-h-screen items-center justify-center"><Spinner /></div>
                }
                .into_any(),
                DashboardLoad::Failed => view! {
                    <div class="flex min-h-screen items-center justify-center text-sm text-destructive">
                        "Failed to load user"
                    </div>
                }
                .into_any(),
                DashboardLoad::Ready(user) => body(user),
            }}
        </div>
    }
}
