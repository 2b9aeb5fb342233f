use crate::components::hooks::use_session_expiry;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use crate::folders::{create_from_prompt, FolderListState};
use crate::state::AppContext;
use crate::util::{log_error, log_info};
use icons::{ChevronDown, ChevronRight, FileText, Plus};
use leptos::prelude::*;
use leptos::task::spawn_local;

const FOLDER_EMOJIS: [&str; 8] = ["📁", "🧠", "📚", "🏫", "🎯", "💡", "📓", "🗂️"];

#[component]
pub fn FolderList(
    #[prop(into)] refresh: Callback<()>,
    /// Receives the note ids embedded in a clicked folder.
    #[prop(optional)]
    on_filter: Option<Callback<Vec<i64>>>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let expire = use_session_expiry();

    let state: RwSignal<FolderListState> = RwSignal::new(FolderListState::default());
    let loading: RwSignal<bool> = RwSignal::new(true);

    let fetch_folders = move || {
        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            match api_client.list_folders().await {
                Ok(folders) => {
                    log_info("FolderList", &format!("loaded {} folders", folders.len()));
                    state.update(|s| s.replace(folders));
                }
                Err(e) => {
                    if !expire(&e) {
                        log_error("FolderList", &format!("failed to fetch folders: {e}"));
                    }
                }
            }
            loading.set(false);
        });
    };

    // Once per mount.
    fetch_folders();

    let on_create = move |_| {
        let input = window()
            .prompt_with_message("Enter new folder name:")
            .ok()
            .flatten();

        let api_client = app_state.0.api_client.get_untracked();
        spawn_local(async move {
            let created =
                create_from_prompt(input, |name| async move { api_client.create_folder(&name).await })
                    .await;
            match created {
                None => {}
                Some(Ok(_)) => {
                    // Two independent refetches; both converge on server state.
                    refresh.run(());
                    fetch_folders();
                }
                Some(Err(e)) => {
                    if !expire(&e) {
                        log_error("FolderList", &format!("failed to create folder: {e}"));
                    }
                }
            }
        });
    };

    let on_folder_click = move |id: i64| {
        if let Some(cb) = on_filter {
            cb.run(state.with_untracked(|s| s.note_ids(id)));
        }
        state.update(|s| s.toggle(id));
    };

    let folder_rows = move || {
        state
            .with(|s| s.folders().to_vec())
            .into_iter()
            .enumerate()
            .map(|(i, folder)| {
                let id = folder.id;
                let emoji = FOLDER_EMOJIS[i % FOLDER_EMOJIS.len()];
                let is_open = move || state.with(|s| s.is_open(id));
                let notes = folder.notes.clone();

                view! {
                    <li class="border-b last:border-b-0">
                        <button
                            class=move || {
                                format!(
                                    "flex w-full items-center gap-3 rounded-md px-3 py-2 text-left text-sm transition-colors hover:bg-accent {}",
                                    if is_open() { "bg-accent/60" } else { "" },
                                )
                            }
                            on:click=move |_| on_folder_click(id)
                        >
                            <span class="text-lg">{emoji}</span>
                            <span class="flex-1 font-medium">{folder.name.clone()}</span>
                            <Show when=is_open fallback=|| view! { <ChevronRight class="size-4" /> }>
                                <ChevronDown class="size-4" />
                            </Show>
                        </button>

                        <Show when=is_open fallback=|| ().into_view()>
                            <ul class="flex flex-col gap-1 pb-2 pl-10">
                                {if notes.is_empty() {
                                    view! {
                                        <li class="py-1 text-xs text-muted-foreground">"(No notes inside)"</li>
                                    }
                                    .into_any()
                                } else {
                                    notes
                                        .clone()
                                        .into_iter()
                                        .map(|n| {
                                            view! {
                                                <li class="flex items-center gap-2 rounded-md px-2 py-1 text-sm hover:bg-accent/60">
                                                    <FileText class="size-4 text-muted-foreground" />
                                                    <span class="font-medium">{n.title}</span>
                                                    <span class="text-xs text-muted-foreground">
                                                        {if n.is_checklist { "Checklist" } else { "Note" }}
                                                    </span>
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                        .into_any()
                                }}
                            </ul>
                        </Show>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <section class="mb-6">
            <div class="mb-2 flex items-center justify-between">
                <h2 class="text-base font-semibold text-primary">"📂 Your Folders"</h2>
                <Button
                    size=ButtonSize::Sm
                    variant=ButtonVariant::Outline
                    attr:title="Add Folder"
                    on:click=on_create
                >
                    <Plus class="size-4" />
                    "New folder"
                </Button>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="flex justify-center py-4"><Spinner /></div> }
            >
                <Show
                    when=move || !state.with(|s| s.is_empty())
                    fallback=|| view! {
                        <div class="text-xs text-muted-foreground">"No folders yet."</div>
                    }
                >
                    <ul class="rounded-lg border bg-card">{folder_rows}</ul>
                </Show>
            </Show>
        </section>
    }
}
