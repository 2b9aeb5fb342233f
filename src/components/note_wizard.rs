use crate::components::hooks::use_session_expiry;
use crate::components::ui::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, ErrorAlert, Input, Label, NoticeAlert, Spinner, Textarea,
};
use crate::state::AppContext;
use crate::util::log_error;
use crate::wizard::{NoteWizard, WizardStep};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Four-step "new note" card shown to child accounts.
#[component]
pub fn NoteWizardPanel(#[prop(into)] on_created: Callback<()>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let expire = use_session_expiry();

    let wizard: RwSignal<NoteWizard> = RwSignal::new(NoteWizard::new());

    // Text inputs bind to plain signals; they are copied into the draft
    // before every transition.
    let title: RwSignal<String> = RwSignal::new(String::new());
    let content: RwSignal<String> = RwSignal::new(String::new());
    let tag_input: RwSignal<String> = RwSignal::new(String::new());

    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<String>> = RwSignal::new(None);
    let saving: RwSignal<bool> = RwSignal::new(false);

    let sync = move || {
        wizard.update(|w| {
            w.title = title.get_untracked();
            w.content = content.get_untracked();
            w.tag_input = tag_input.get_untracked();
        });
    };

    let step = move || wizard.with(|w| w.step());

    let can_advance = move || {
        // Track the inputs so the Next button re-enables while typing.
        let t = title.get();
        let c = content.get();
        wizard.with(|w| {
            let mut probe = w.clone();
            probe.title = t;
            probe.content = c;
            probe.can_advance()
        })
    };

    let on_next = move |_| {
        sync();
        let mut result = Ok(WizardStep::Title);
        wizard.update(|w| result = w.advance());
        match result {
            Ok(_) => error.set(None),
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let on_back = move |_| {
        sync();
        wizard.update(|w| {
            w.back();
        });
        error.set(None);
    };

    let add_tag = move || {
        sync();
        let mut added = false;
        wizard.update(|w| added = w.add_pending_tag());
        if added {
            tag_input.set(String::new());
        }
    };

    let on_save = move |_| {
        sync();
        let req = match wizard.with_untracked(|w| w.submission()) {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };

        let api_client = app_state.0.api_client.get_untracked();
        saving.set(true);
        error.set(None);
        notice.set(None);

        spawn_local(async move {
            match api_client.create_note(&req).await {
                Ok(_) => {
                    wizard.update(|w| w.reset());
                    title.set(String::new());
                    content.set(String::new());
                    tag_input.set(String::new());
                    notice.set(Some("Note created".to_string()));
                    on_created.run(());
                }
                Err(e) => {
                    // Draft stays as it is so the user can retry.
                    if !expire(&e) {
                        log_error("NoteWizard", &format!("create failed: {e}"));
                        error.set(Some("Failed to create note".to_string()));
                    }
                }
            }
            saving.set(false);
        });
    };

    let stepper = move || {
        let current = step();
        WizardStep::ALL
            .iter()
            .map(|s| {
                let s = *s;
                let class = if s == current {
                    "text-primary font-semibold"
                } else if s < current {
                    "text-foreground hover:cursor-pointer underline-offset-4 hover:underline"
                } else {
                    "text-muted-foreground"
                };
                view! {
                    <li
                        class=format!("flex items-center gap-1 text-xs {class}")
                        on:click=move |_| {
                            sync();
                            if wizard.try_update(|w| w.go_to(s)).map(|r| r.is_ok()).unwrap_or(false) {
                                error.set(None);
                            }
                        }
                    >
                        <span class="inline-flex size-5 items-center justify-center rounded-full border">
                            {s.index() + 1}
                        </span>
                        {s.to_string()}
                    </li>
                }
            })
            .collect_view()
    };

    let tag_chips = move || {
        wizard
            .with(|w| w.tags().to_vec())
            .into_iter()
            .map(|t| {
                let t2 = t.clone();
                view! {
                    <Badge variant=BadgeVariant::Default>
                        {t}
                        <button
                            class="ml-1 text-muted-foreground hover:text-foreground"
                            attr:aria-label="Remove tag"
                            on:click=move |_| {
                                wizard.update(|w| {
                                    w.remove_tag(&t2);
                                });
                            }
                        >
                            "×"
                        </button>
                    </Badge>
                }
            })
            .collect_view()
    };

    let body = move || match step() {
        WizardStep::Title => view! {
            <div class="flex flex-col gap-2">
                <Label html_for="note_title" class="text-xs">"Note Title"</Label>
                <Input id="note_title" bind_value=title autofocus=true class="h-8 text-sm" />
                <div class="flex justify-end pt-2">
                    <Button size=ButtonSize::Sm attr:disabled=move || !can_advance() on:click=on_next>
                        "Next →"
                    </Button>
                </div>
            </div>
        }
        .into_any(),

        WizardStep::Content => view! {
            <div class="flex flex-col gap-2">
                <Label html_for="note_content" class="text-xs">
                    {move || wizard.with(|w| w.content_label())}
                </Label>
                <Textarea id="note_content" bind_value=content rows=3 />
                <label class="flex items-center gap-2 text-xs">
                    <input
                        type="checkbox"
                        prop:checked=move || wizard.with(|w| w.is_todo())
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            wizard.update(|w| w.set_todo(on));
                        }
                    />
                    "Convert into Todo List?"
                </label>
                <div class="flex justify-between pt-2">
                    <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost on:click=on_back>
                        "← Back"
                    </Button>
                    <Button size=ButtonSize::Sm attr:disabled=move || !can_advance() on:click=on_next>
                        "Next →"
                    </Button>
                </div>
            </div>
        }
        .into_any(),

        WizardStep::Tags => view! {
            <div class="flex flex-col gap-2">
                <Label html_for="note_tag" class="text-xs">"Add a Tag"</Label>
                <div class="flex gap-2">
                    <Input
                        id="note_tag"
                        bind_value=tag_input
                        on_enter=Callback::new(move |_| add_tag())
                        class="h-8 text-sm"
                    />
                    <Button size=ButtonSize::Sm variant=ButtonVariant::Outline on:click=move |_| add_tag()>
                        "Add"
                    </Button>
                </div>
                <div class="flex flex-wrap gap-1">{tag_chips}</div>
                <div class="flex justify-between pt-2">
                    <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost on:click=on_back>
                        "← Back"
                    </Button>
                    <Button size=ButtonSize::Sm on:click=on_next>"Next →"</Button>
                </div>
            </div>
        }
        .into_any(),

        WizardStep::Confirm => {
            let draft = wizard.get();
            let is_todo = draft.is_todo();
            let preview = if is_todo {
                view! {
                    <ul class="list-disc pl-5 text-sm">
                        {draft
                            .preview_items()
                            .into_iter()
                            .map(|item| view! { <li>{item}</li> })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            } else {
                view! { <p class="text-sm whitespace-pre-wrap">{draft.content.clone()}</p> }.into_any()
            };

            view! {
                <div class="flex flex-col gap-3">
                    <div class="text-xs text-muted-foreground">"Review your note before saving:"</div>
                    <div class="rounded-md border bg-muted/40 p-3 flex flex-col gap-2">
                        <div class="font-medium">{draft.title.clone()}</div>
                        {preview}
                        <div class="flex flex-wrap gap-1">
                            {draft
                                .tags()
                                .iter()
                                .cloned()
                                .map(|t| view! { <Badge variant=BadgeVariant::Default>{t}</Badge> })
                                .collect_view()}
                        </div>
                        <Show when=move || is_todo fallback=|| ().into_view()>
                            <div class="text-xs text-primary">"This note will be saved as a Todo Checklist"</div>
                        </Show>
                    </div>
                    <div class="flex justify-between">
                        <Button size=ButtonSize::Sm variant=ButtonVariant::Ghost on:click=on_back>
                            "← Back"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            variant=ButtonVariant::Success
                            attr:disabled=move || saving.get()
                            on:click=on_save
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || saving.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                "Save Note"
                            </span>
                        </Button>
                    </div>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <Card class="mb-6">
            <CardHeader>
                <CardTitle class="text-base">"Create a New Note"</CardTitle>
                <ol class="flex flex-wrap gap-4 pt-1">{stepper}</ol>
            </CardHeader>
            <CardContent class="flex flex-col gap-3">
                {body}
                <ErrorAlert message=error />
                <NoticeAlert message=notice />
            </CardContent>
        </Card>
    }
}
