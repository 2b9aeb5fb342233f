pub mod hooks;
pub mod ui;

mod folder_list;
mod note_card;
mod note_wizard;
mod tag_filter;

pub(crate) use folder_list::FolderList;
pub(crate) use note_card::NoteCard;
pub(crate) use note_wizard::NoteWizardPanel;
pub(crate) use tag_filter::TagFilter;
