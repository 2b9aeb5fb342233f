use crate::components::ui::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle,
};
use crate::models::{ChecklistItem, Note, Role};
use icons::Trash2;
use leptos::prelude::*;

#[component]
fn ChecklistRows(
    note_id: i64,
    items: Vec<ChecklistItem>,
    editable: bool,
    on_toggle: Callback<(i64, usize)>,
) -> impl IntoView {
    let disabled = !editable;

    view! {
        <ul class="flex flex-col gap-1">
            {items
                .into_iter()
                .enumerate()
                .map(|(idx, item)| {
                    let text_class = if item.done {
                        "text-sm font-medium text-muted-foreground line-through"
                    } else {
                        "text-sm font-medium"
                    };
                    view! {
                        <li class="flex items-center gap-2">
                            <input
                                type="checkbox"
                                prop:checked=item.done
                                disabled=disabled
                                on:change=move |_| on_toggle.run((note_id, idx))
                            />
                            <span class=text_class>{item.task}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

/// One note on the dashboard grid. What the viewer may do depends on `role`.
#[component]
pub fn NoteCard(
    note: Note,
    role: Role,
    #[prop(into)] on_toggle: Callback<(i64, usize)>,
    #[prop(into)] on_delete: Callback<i64>,
) -> impl IntoView {
    let note_id = note.id;

    let (card_class, editable, actions) = match role {
        Role::Child => (
            "bg-primary/5 transition-transform hover:scale-[1.02]",
            true,
            view! {
                <Button
                    size=ButtonSize::Icon
                    variant=ButtonVariant::Ghost
                    attr:title="Delete note"
                    on:click=move |_| on_delete.run(note_id)
                >
                    <Trash2 class="size-4" />
                </Button>
            }
            .into_any(),
        ),
        Role::Parent => ("", false, ().into_any()),
    };

    let body = if note.is_checklist {
        view! {
            <ChecklistRows
                note_id=note_id
                items=note.checklist_items.clone()
                editable=editable
                on_toggle=on_toggle
            />
        }
        .into_any()
    } else {
        view! {
            <p class="text-sm text-muted-foreground whitespace-pre-wrap">
                {note.content.clone().unwrap_or_default()}
            </p>
        }
        .into_any()
    };

    view! {
        <Card class=card_class>
            <CardHeader class="w-full flex-row items-start justify-between">
                <CardTitle class="text-base">{note.title.clone()}</CardTitle>
                {actions}
            </CardHeader>
            <CardContent class="flex flex-col gap-3">
                {body}
                <div class="flex flex-wrap gap-1">
                    {note
                        .tags
                        .iter()
                        .cloned()
                        .map(|t| view! { <Badge variant=BadgeVariant::Default>{t}</Badge> })
                        .collect_view()}
                </div>
            </CardContent>
        </Card>
    }
}
