use crate::api::ApiError;
use crate::models::{ChecklistItem, Note, Role, User};
use std::collections::BTreeSet;
use std::future::Future;

/// Dashboard load sequence: `/users/me`, then `/notes/`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum DashboardLoad {
    #[default]
    Loading,
    Ready(User),
    /// User fetch failed for a reason other than an expired session.
    Failed,
}

impl DashboardLoad {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardLoad::Loading)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            DashboardLoad::Ready(u) => Some(u),
            _ => None,
        }
    }
}

/// Outcome of one dashboard fetch, reduced so the page only has to apply it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LoadStep {
    Show(DashboardLoad),
    /// Session is gone; the caller expires it.
    Expired,
}

pub(crate) fn user_loaded(result: &Result<User, ApiError>) -> LoadStep {
    match result {
        Ok(user) => LoadStep::Show(DashboardLoad::Ready(user.clone())),
        Err(e) if e.is_unauthorized() => LoadStep::Expired,
        Err(_) => LoadStep::Show(DashboardLoad::Failed),
    }
}

/// Every tag used by at least one note. Order is not significant.
pub(crate) fn derive_tags(notes: &[Note]) -> BTreeSet<String> {
    notes.iter().flat_map(|n| n.tags.iter().cloned()).collect()
}

/// Client-side filter. `tag = None` means no tag filter; `folder_ids`
/// restricts to a folder's (possibly stale) note id snapshot.
pub(crate) fn filter_notes(
    notes: &[Note],
    tag: Option<&str>,
    folder_ids: Option<&[i64]>,
) -> Vec<Note> {
    notes
        .iter()
        .filter(|n| tag.map_or(true, |t| n.tags.iter().any(|x| x == t)))
        .filter(|n| folder_ids.map_or(true, |ids| ids.contains(&n.id)))
        .cloned()
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToggleError {
    ReadOnly,
    NoteNotFound,
    NotChecklist,
    IndexOutOfRange,
}

impl std::fmt::Display for ToggleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ToggleError::ReadOnly => "checklists are read-only for this account",
            ToggleError::NoteNotFound => "note is no longer loaded",
            ToggleError::NotChecklist => "note is not a checklist",
            ToggleError::IndexOutOfRange => "checklist item no longer exists",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for ToggleError {}

/// One checklist click in flight.
///
/// The payload is built from the cached items, and the cache only ever holds
/// what the server last confirmed. It changes when the PATCH answers with the
/// stored note; a failed PATCH leaves it as it was, so a click that was never
/// saved cannot leak into the payload of a later one.
///
/// Items are addressed by position, which is only stable within one fetch.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ChecklistToggle {
    pub note_id: i64,
    pub index: usize,
    next: Vec<ChecklistItem>,
}

impl ChecklistToggle {
    pub fn begin(notes: &[Note], note_id: i64, index: usize, role: Role) -> Result<Self, ToggleError> {
        if !role.can_edit() {
            return Err(ToggleError::ReadOnly);
        }
        let note = notes
            .iter()
            .find(|n| n.id == note_id)
            .ok_or(ToggleError::NoteNotFound)?;
        if !note.is_checklist {
            return Err(ToggleError::NotChecklist);
        }
        if index >= note.checklist_items.len() {
            return Err(ToggleError::IndexOutOfRange);
        }

        let mut next = note.checklist_items.clone();
        next[index].done = !next[index].done;

        Ok(Self {
            note_id,
            index,
            next,
        })
    }

    /// Full replacement payload for the server.
    pub fn payload(&self) -> &[ChecklistItem] {
        &self.next
    }

    /// Applies the server's answer. Returns whether the cache changed.
    ///
    /// On success the items the server stored win over the payload.
    pub fn settle(&self, notes: &mut [Note], result: &Result<Note, ApiError>) -> bool {
        let Ok(saved) = result else {
            return false;
        };
        let items = if saved.id == self.note_id {
            &saved.checklist_items
        } else {
            &self.next
        };
        match notes.iter_mut().find(|n| n.id == self.note_id) {
            Some(n) => {
                n.checklist_items = items.clone();
                true
            }
            None => false,
        }
    }
}

/// Outcome of the dashboard load sequence.
pub(crate) enum LoadOutcome {
    /// One of the calls answered 401.
    Expired(ApiError),
    Loaded {
        load: DashboardLoad,
        /// `None` when the notes were never requested or the request failed.
        notes: Option<Vec<Note>>,
        notes_error: Option<ApiError>,
    },
}

/// `/users/me`, then `/notes/` only once the user is known.
pub(crate) async fn load_dashboard<UF, NF>(
    fetch_user: impl FnOnce() -> UF,
    fetch_notes: impl FnOnce() -> NF,
) -> LoadOutcome
where
    UF: Future<Output = Result<User, ApiError>>,
    NF: Future<Output = Result<Vec<Note>, ApiError>>,
{
    let me = fetch_user().await;
    let load = match user_loaded(&me) {
        LoadStep::Expired => {
            return LoadOutcome::Expired(me.err().unwrap_or_else(ApiError::unauthorized));
        }
        LoadStep::Show(load) => load,
    };

    if !matches!(load, DashboardLoad::Ready(_)) {
        return LoadOutcome::Loaded {
            load,
            notes: None,
            notes_error: None,
        };
    }

    match fetch_notes().await {
        Ok(list) => LoadOutcome::Loaded {
            load,
            notes: Some(list),
            notes_error: None,
        },
        Err(e) if e.is_unauthorized() => LoadOutcome::Expired(e),
        Err(e) => LoadOutcome::Loaded {
            load,
            notes: None,
            notes_error: Some(e),
        },
    }
}
