use crate::api::ApiError;
use crate::models::Folder;
use std::collections::HashMap;
use std::future::Future;

/// Folder collection plus independent per-folder expand flags.
/// Not an accordion: opening one folder leaves the others alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FolderListState {
    folders: Vec<Folder>,
    open: HashMap<i64, bool>,
}

impl FolderListState {
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Installs a freshly fetched collection; everything starts collapsed.
    pub fn replace(&mut self, folders: Vec<Folder>) {
        self.open = folders.iter().map(|f| (f.id, false)).collect();
        self.folders = folders;
    }

    pub fn toggle(&mut self, id: i64) {
        let flag = self.open.entry(id).or_insert(false);
        *flag = !*flag;
    }

    pub fn is_open(&self, id: i64) -> bool {
        self.open.get(&id).copied().unwrap_or(false)
    }

    /// Note ids from the folder's embedded snapshot.
    pub fn note_ids(&self, id: i64) -> Vec<i64> {
        self.folders
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.notes.iter().map(|n| n.id).collect())
            .unwrap_or_default()
    }
}

/// Result of the "new folder" prompt. `None` (cancelled or blank) means no
/// request is made.
pub(crate) fn folder_name_from_prompt(input: Option<String>) -> Option<String> {
    input
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Runs `create` with the prompted name. A cancelled or blank prompt
/// returns `None` without calling it.
pub(crate) async fn create_from_prompt<F, Fut>(
    input: Option<String>,
    create: F,
) -> Option<Result<Folder, ApiError>>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<Folder, ApiError>>,
{
    let name = folder_name_from_prompt(input)?;
    Some(create(name).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::block_on_ready;
    use crate::models::FolderNote;

    fn folder(id: i64, note_ids: &[i64]) -> Folder {
        Folder {
            id,
            name: format!("folder {id}"),
            notes: note_ids
                .iter()
                .map(|n| FolderNote {
                    id: *n,
                    title: format!("note {n}"),
                    is_checklist: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_replace_collapses_everything() {
        let mut s = FolderListState::default();
        s.replace(vec![folder(1, &[]), folder(2, &[])]);
        s.toggle(1);
        assert!(s.is_open(1));

        s.replace(vec![folder(1, &[]), folder(2, &[]), folder(3, &[])]);
        assert!(!s.is_open(1));
        assert!(!s.is_open(2));
        assert!(!s.is_open(3));
    }

    #[test]
    fn test_toggle_is_independent_per_folder() {
        let mut s = FolderListState::default();
        s.replace(vec![folder(1, &[]), folder(2, &[])]);

        s.toggle(1);
        s.toggle(2);
        assert!(s.is_open(1));
        assert!(s.is_open(2));

        s.toggle(1);
        assert!(!s.is_open(1));
        assert!(s.is_open(2));
    }

    #[test]
    fn test_note_ids_from_snapshot() {
        let mut s = FolderListState::default();
        s.replace(vec![folder(1, &[10, 11]), folder(2, &[])]);
        assert_eq!(s.note_ids(1), vec![10, 11]);
        assert!(s.note_ids(2).is_empty());
        assert!(s.note_ids(42).is_empty());
    }

    #[test]
    fn test_prompt_cancel_or_blank_means_no_request() {
        assert_eq!(folder_name_from_prompt(None), None);
        assert_eq!(folder_name_from_prompt(Some(String::new())), None);
        assert_eq!(folder_name_from_prompt(Some("   ".to_string())), None);
        assert_eq!(
            folder_name_from_prompt(Some(" School ".to_string())).as_deref(),
            Some("School")
        );
    }

    #[test]
    fn test_aborted_create_makes_no_request() {
        for input in [None, Some(String::new()), Some("   ".to_string())] {
            let mut calls = 0;
            let result = block_on_ready(create_from_prompt(input, |_| {
                calls += 1;
                std::future::ready(Ok(folder(9, &[])))
            }));
            assert!(result.is_none());
            assert_eq!(calls, 0);
        }
    }

    #[test]
    fn test_create_sends_trimmed_name() {
        let mut sent = Vec::new();
        let result = block_on_ready(create_from_prompt(Some(" School ".to_string()), |name| {
            sent.push(name);
            std::future::ready(Ok(folder(9, &[])))
        }));
        assert_eq!(sent, vec!["School".to_string()]);
        assert_eq!(result.map(|r| r.map(|f| f.id).ok()), Some(Some(9)));
    }
}
