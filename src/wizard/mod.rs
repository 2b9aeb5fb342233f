//! Note-creation wizard.
//!
//! A strictly linear flow `Title → Content → Tags → Confirm`. Moving forward
//! is guarded per step, moving back is always allowed, and submission is only
//! reachable from `Confirm`.

use crate::api::CreateNoteRequest;
use crate::models::ChecklistItem;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, strum::Display)]
pub(crate) enum WizardStep {
    #[default]
    Title,
    Content,
    Tags,
    Confirm,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Title,
        WizardStep::Content,
        WizardStep::Tags,
        WizardStep::Confirm,
    ];

    pub fn index(self) -> usize {
        match self {
            WizardStep::Title => 0,
            WizardStep::Content => 1,
            WizardStep::Tags => 2,
            WizardStep::Confirm => 3,
        }
    }

    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Title => Some(WizardStep::Content),
            WizardStep::Content => Some(WizardStep::Tags),
            WizardStep::Tags => Some(WizardStep::Confirm),
            WizardStep::Confirm => None,
        }
    }

    pub fn prev(self) -> Option<WizardStep> {
        match self {
            WizardStep::Title => None,
            WizardStep::Content => Some(WizardStep::Title),
            WizardStep::Tags => Some(WizardStep::Content),
            WizardStep::Confirm => Some(WizardStep::Tags),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WizardError {
    TitleRequired,
    ContentRequired,
    AtLastStep,
    CannotSkipForward,
    NotConfirmed,
    /// The checklist could not be encoded as the note's content.
    Encoding,
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            WizardError::TitleRequired => "Title is required",
            WizardError::ContentRequired => "Content is required",
            WizardError::AtLastStep => "Already at the last step",
            WizardError::CannotSkipForward => "Finish the current step first",
            WizardError::NotConfirmed => "Review the note before saving",
            WizardError::Encoding => "Could not prepare the checklist",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for WizardError {}

/// Wire shape of a checklist note's `content`.
#[derive(Serialize)]
struct TodoContent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    items: &'a [ChecklistItem],
}

/// Splits comma-separated tasks. Segments are trimmed, not filtered.
pub(crate) fn parse_tasks(content: &str) -> Vec<ChecklistItem> {
    content
        .split(',')
        .map(|t| ChecklistItem::open(t.trim()))
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NoteWizard {
    step: WizardStep,
    pub title: String,
    pub content: String,
    tags: Vec<String>,
    pub tag_input: String,
    is_todo: bool,
}

impl NoteWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_todo(&self) -> bool {
        self.is_todo
    }

    pub fn set_todo(&mut self, on: bool) {
        self.is_todo = on;
    }

    pub fn content_label(&self) -> &'static str {
        if self.is_todo {
            "Comma-separated tasks"
        } else {
            "Note Content"
        }
    }

    fn check_title(&self) -> Result<(), WizardError> {
        if self.title.trim().is_empty() {
            Err(WizardError::TitleRequired)
        } else {
            Ok(())
        }
    }

    fn check_content(&self) -> Result<(), WizardError> {
        if self.content.trim().is_empty() {
            Err(WizardError::ContentRequired)
        } else {
            Ok(())
        }
    }

    /// Whether `advance` would succeed right now.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Title => self.check_title().is_ok(),
            WizardStep::Content => self.check_content().is_ok(),
            WizardStep::Tags => true,
            WizardStep::Confirm => false,
        }
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::Title => self.check_title()?,
            WizardStep::Content => self.check_content()?,
            WizardStep::Tags => {}
            WizardStep::Confirm => return Err(WizardError::AtLastStep),
        }
        let next = self.step.next().ok_or(WizardError::AtLastStep)?;
        self.step = next;
        Ok(next)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Jump back to any earlier (or the current) step.
    pub fn go_to(&mut self, step: WizardStep) -> Result<(), WizardError> {
        if step > self.step {
            return Err(WizardError::CannotSkipForward);
        }
        self.step = step;
        Ok(())
    }

    /// Appends a trimmed tag. Blank and already-present tags are ignored.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Adds whatever is typed in the tag input; clears it on success.
    pub fn add_pending_tag(&mut self) -> bool {
        let raw = std::mem::take(&mut self.tag_input);
        if self.add_tag(&raw) {
            true
        } else {
            self.tag_input = raw;
            false
        }
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Tasks shown on the Confirm step.
    pub fn preview_items(&self) -> Vec<String> {
        parse_tasks(&self.content)
            .into_iter()
            .map(|i| i.task)
            .collect()
    }

    pub fn submission(&self) -> Result<CreateNoteRequest, WizardError> {
        if self.step != WizardStep::Confirm {
            return Err(WizardError::NotConfirmed);
        }
        self.check_title()?;
        self.check_content()?;

        let (content, checklist_items) = if self.is_todo {
            let items = parse_tasks(&self.content);
            (encode_todo(&items)?, items)
        } else {
            (self.content.clone(), Vec::new())
        };

        Ok(CreateNoteRequest {
            title: self.title.clone(),
            content,
            tags: self.tags.clone(),
            is_checklist: self.is_todo,
            checklist_items,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `{"type":"todo","items":[...]}`, the content string of a checklist note.
pub(crate) fn encode_todo(items: &[ChecklistItem]) -> Result<String, WizardError> {
    serde_json::to_string(&TodoContent {
        kind: "todo",
        items,
    })
    .map_err(|_| WizardError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_confirm(title: &str, content: &str, todo: bool) -> NoteWizard {
        let mut w = NoteWizard::new();
        w.title = title.to_string();
        w.content = content.to_string();
        w.set_todo(todo);
        w.advance().expect("title step");
        w.advance().expect("content step");
        w.advance().expect("tags step");
        assert_eq!(w.step(), WizardStep::Confirm);
        w
    }

    #[test]
    fn test_cannot_leave_title_step_without_title() {
        let mut w = NoteWizard::new();
        assert_eq!(w.advance(), Err(WizardError::TitleRequired));

        w.title = "   ".to_string();
        assert!(!w.can_advance());
        assert_eq!(w.advance(), Err(WizardError::TitleRequired));
        assert_eq!(w.step(), WizardStep::Title);
    }

    #[test]
    fn test_cannot_leave_content_step_without_content() {
        let mut w = NoteWizard::new();
        w.title = "Homework".to_string();
        assert_eq!(w.advance(), Ok(WizardStep::Content));

        assert_eq!(w.advance(), Err(WizardError::ContentRequired));
        assert_eq!(w.step(), WizardStep::Content);

        w.content = "maths".to_string();
        assert_eq!(w.advance(), Ok(WizardStep::Tags));
    }

    #[test]
    fn test_confirm_has_no_forward_transition() {
        let mut w = at_confirm("t", "c", false);
        assert_eq!(w.advance(), Err(WizardError::AtLastStep));
        assert!(!w.can_advance());
    }

    #[test]
    fn test_back_navigation() {
        let mut w = at_confirm("t", "c", false);
        assert_eq!(w.back(), WizardStep::Tags);
        assert_eq!(w.back(), WizardStep::Content);
        assert_eq!(w.back(), WizardStep::Title);
        assert_eq!(w.back(), WizardStep::Title);
    }

    #[test]
    fn test_go_to_only_backwards() {
        let mut w = at_confirm("t", "c", false);
        assert_eq!(w.go_to(WizardStep::Title), Ok(()));
        assert_eq!(w.go_to(WizardStep::Tags), Err(WizardError::CannotSkipForward));
        assert_eq!(w.step(), WizardStep::Title);
    }

    #[test]
    fn test_step_indices_follow_order() {
        for (i, s) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
        }
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let mut w = NoteWizard::new();
        assert!(w.add_tag(" school "));
        assert!(w.add_tag("fun"));
        assert!(!w.add_tag("school"));
        assert!(!w.add_tag("   "));
        assert_eq!(w.tags().to_vec(), vec!["school".to_string(), "fun".to_string()]);
    }

    #[test]
    fn test_pending_tag_input_cleared_only_when_added() {
        let mut w = NoteWizard::new();
        w.tag_input = "art".to_string();
        assert!(w.add_pending_tag());
        assert!(w.tag_input.is_empty());

        w.tag_input = "art".to_string();
        assert!(!w.add_pending_tag());
        assert_eq!(w.tag_input, "art");
    }

    #[test]
    fn test_remove_tag_preserves_order() {
        let mut w = NoteWizard::new();
        for t in ["a", "b", "c"] {
            w.add_tag(t);
        }
        assert!(!w.remove_tag("zzz"));
        assert_eq!(w.tags().len(), 3);

        assert!(w.remove_tag("b"));
        assert_eq!(w.tags().to_vec(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_content_label_follows_mode() {
        let mut w = NoteWizard::new();
        assert_eq!(w.content_label(), "Note Content");
        w.set_todo(true);
        assert_eq!(w.content_label(), "Comma-separated tasks");
    }

    #[test]
    fn test_encode_todo_reports_instead_of_blanking() {
        let items = vec![ChecklistItem::open("feed cat")];
        assert_eq!(
            encode_todo(&items),
            Ok(r#"{"type":"todo","items":[{"task":"feed cat","done":false}]}"#.to_string())
        );
        assert_eq!(encode_todo(&[]).as_deref(), Ok(r#"{"type":"todo","items":[]}"#));
        assert_eq!(WizardError::Encoding.to_string(), "Could not prepare the checklist");
    }

    #[test]
    fn test_checklist_submission_splits_and_trims() {
        let w = at_confirm("Chores", "a, b ,c", true);
        let req = w.submission().expect("should build request");

        let expected = vec![
            ChecklistItem::open("a"),
            ChecklistItem::open("b"),
            ChecklistItem::open("c"),
        ];
        assert!(req.is_checklist);
        assert_eq!(req.checklist_items, expected);

        let content: serde_json::Value =
            serde_json::from_str(&req.content).expect("content is JSON");
        assert_eq!(content["type"], "todo");
        assert_eq!(
            content["items"],
            serde_json::json!([
                {"task": "a", "done": false},
                {"task": "b", "done": false},
                {"task": "c", "done": false}
            ])
        );
    }

    #[test]
    fn test_plain_submission_keeps_raw_text() {
        let mut w = at_confirm("Diary", "today, was fun", false);
        w.go_to(WizardStep::Tags).expect("back to tags");
        w.add_tag("diary");
        w.advance().expect("to confirm");

        let req = w.submission().expect("should build request");
        assert_eq!(req.content, "today, was fun");
        assert!(!req.is_checklist);
        assert!(req.checklist_items.is_empty());
        assert_eq!(req.tags, vec!["diary".to_string()]);
    }

    #[test]
    fn test_submission_requires_confirm_step() {
        let mut w = NoteWizard::new();
        w.title = "t".to_string();
        w.content = "c".to_string();
        assert_eq!(w.submission(), Err(WizardError::NotConfirmed));
    }

    #[test]
    fn test_preview_items() {
        let mut w = NoteWizard::new();
        w.content = "milk,  eggs".to_string();
        assert_eq!(w.preview_items(), vec!["milk".to_string(), "eggs".to_string()]);
    }

    #[test]
    fn test_reset_restores_initial_draft() {
        let mut w = at_confirm("t", "c", true);
        w.add_tag("x");
        w.tag_input = "pending".to_string();
        w.reset();
        assert_eq!(w, NoteWizard::new());
        assert_eq!(w.step(), WizardStep::Title);
        assert!(!w.is_todo());
    }
}
