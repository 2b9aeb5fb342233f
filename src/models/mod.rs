use serde::{Deserialize, Serialize};

/// Account role. The backend stores it as a lowercase string.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Role {
    Parent,
    #[default]
    Child,
}

impl Role {
    /// Only child accounts own notes, so only they may mutate them.
    pub fn can_edit(self) -> bool {
        match self {
            Role::Child => true,
            Role::Parent => false,
        }
    }
}

/// `GET /users/me`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ChecklistItem {
    pub task: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    pub fn open(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            done: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Note {
    pub id: i64,
    pub title: String,

    /// Free text; only meaningful when `is_checklist` is false.
    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_checklist: bool,

    /// Backend sends `null` for plain notes.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub checklist_items: Vec<ChecklistItem>,

    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Note summary embedded in a folder. May lag behind the dashboard's notes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FolderNote {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub is_checklist: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: Vec<FolderNote>,
}

/// `GET /tags/` catalog entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Tag {
    pub id: i64,
    pub name: String,
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_user_contract_deserialize() {
        let json = r#"{
            "id": 7,
            "username": "kid",
            "email": "kid@example.com",
            "role": "child",
            "parent_id": 3
        }"#;
        let user: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.role, Role::Child);
        assert_eq!(user.parent_id, Some(3));
    }

    #[test]
    fn test_parent_user_without_parent_id() {
        let json = r#"{"id": 3, "username": "mum", "role": "parent", "parent_id": null}"#;
        let user: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.role, Role::Parent);
        assert!(user.parent_id.is_none());
        assert!(user.email.is_none());
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"id": 1, "username": "x", "role": "admin"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_role_strum_strings() {
        assert_eq!(Role::Parent.to_string(), "parent");
        assert_eq!(Role::Child.to_string(), "child");
        assert_eq!(Role::from_str("parent").ok(), Some(Role::Parent));
        assert!(Role::from_str("Parent").is_err());
    }

    #[test]
    fn test_role_edit_gate() {
        assert!(Role::Child.can_edit());
        assert!(!Role::Parent.can_edit());
    }

    #[test]
    fn test_note_contract_deserialize_checklist() {
        // Shape produced by the FastAPI NoteOut schema.
        let json = r#"{
            "id": 12,
            "title": "Chores",
            "content": null,
            "is_checklist": true,
            "checklist_items": [{"task": "dishes", "done": true}, {"task": "bins"}],
            "tags": ["home"],
            "created_at": "2024-05-01T10:00:00",
            "updated_at": null
        }"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert!(note.is_checklist);
        assert!(note.content.is_none());
        assert_eq!(note.checklist_items.len(), 2);
        assert!(note.checklist_items[0].done);
        assert!(!note.checklist_items[1].done);
    }

    #[test]
    fn test_note_null_checklist_items_become_empty() {
        let json = r#"{"id": 1, "title": "t", "content": "c", "checklist_items": null}"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert!(note.checklist_items.is_empty());
        assert!(note.tags.is_empty());
        assert!(!note.is_checklist);
    }

    #[test]
    fn test_folder_without_notes_field() {
        let json = r#"{"id": 4, "name": "School"}"#;
        let folder: Folder = serde_json::from_str(json).expect("folder should parse");
        assert!(folder.notes.is_empty());
    }
}
