use crate::components::hooks::use_session_expiry;
use crate::components::ui::{Badge, BadgeVariant};
use crate::models::Tag;
use crate::state::AppContext;
use crate::util::log_error;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Selecting the active tag again clears the filter.
pub(crate) fn next_selection(active: Option<&str>, clicked: Option<&str>) -> Option<String> {
    match (active, clicked) {
        (_, None) => None,
        (Some(a), Some(c)) if a == c => None,
        (_, Some(c)) => Some(c.to_string()),
    }
}

/// Single-select filter backed by the server's `/tags/` catalog.
///
/// This is a separate read model from the tags the dashboard derives from its
/// loaded notes; the two are not reconciled.
#[component]
pub fn TagFilter(
    /// Currently active tag, shared with the caller.
    active: RwSignal<Option<String>>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let expire = use_session_expiry();

    let tags: RwSignal<Vec<Tag>> = RwSignal::new(vec![]);

    let api_client = app_state.0.api_client.get_untracked();
    spawn_local(async move {
        match api_client.list_tags().await {
            Ok(list) => tags.set(list),
            Err(e) => {
                if !expire(&e) {
                    log_error("TagFilter", &format!("failed to load tags: {e}"));
                }
            }
        }
    });

    let select = move |clicked: Option<String>| {
        let next = active.with_untracked(|a| next_selection(a.as_deref(), clicked.as_deref()));
        active.set(next);
    };

    let variant_for = move |name: Option<&str>| {
        let is_active = active.with(|a| a.as_deref() == name);
        if is_active {
            BadgeVariant::Active
        } else {
            BadgeVariant::Outline
        }
    };

    view! {
        <section class="mb-4">
            <h3 class="mb-2 text-sm font-semibold">"🏷️ All tags"</h3>
            <div class="flex flex-wrap gap-1">
                {move || {
                    let all = view! {
                        <Badge variant=variant_for(None) on:click=move |_| select(None)>
                            "All"
                        </Badge>
                    };
                    let chips = tags
                        .get()
                        .into_iter()
                        .map(|t| {
                            let name = t.name.clone();
                            view! {
                                <Badge
                                    variant=variant_for(Some(t.name.as_str()))
                                    on:click=move |_| select(Some(name.clone()))
                                >
                                    {format!("#{}", t.name)}
                                </Badge>
                            }
                        })
                        .collect_view();
                    (all, chips)
                }}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_deselect() {
        assert_eq!(next_selection(None, Some("art")).as_deref(), Some("art"));
        assert_eq!(next_selection(Some("art"), Some("art")), None);
        assert_eq!(next_selection(Some("art"), Some("maths")).as_deref(), Some("maths"));
        assert_eq!(next_selection(Some("art"), None), None);
    }
}
