/// Add-memory form
///
/// `Empty -> Converting -> FileSelected -> (submit) -> Empty`. The image is
/// converted to a data URL in the background; submitting is only possible
/// once that conversion has produced a preview.
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

use super::data::ImageRecord;
use super::library::GalleryStore;
use crate::error::MuseumError;

pub const DEFAULT_ALT: &str = "Memory";
pub const DEFAULT_CAPTION: &str = "Our special moment";

pub const MSG_ADDED: &str = "Your memory has been added to the museum!";
pub const MSG_NO_FILE: &str = "Please select an image to upload";
pub const MSG_SAVE_FAILED: &str = "There was a problem adding your memory";

#[derive(Error, Debug)]
pub enum FormError {
    #[error("no image selected")]
    NoFileSelected,

    #[error("could not save memory: {0}")]
    Storage(#[from] MuseumError),
}

impl FormError {
    /// Text shown to the user in the error notification
    pub fn user_message(&self) -> &'static str {
        match self {
            FormError::NoFileSelected => MSG_NO_FILE,
            FormError::Storage(_) => MSG_SAVE_FAILED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Empty,
    /// A file was picked and is being converted
    Converting(PathBuf),
    FileSelected { name: String, data_url: String },
}

#[derive(Debug, Clone)]
pub struct AddMemoryForm {
    selection: Selection,
    caption: String,
}

impl Default for AddMemoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddMemoryForm {
    pub fn new() -> Self {
        Self {
            selection: Selection::Empty,
            caption: String::new(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Preview data URL, available once conversion finished
    pub fn preview(&self) -> Option<&str> {
        match &self.selection {
            Selection::FileSelected { data_url, .. } => Some(data_url),
            _ => None,
        }
    }

    pub fn begin_selection(&mut self, path: PathBuf) {
        self.selection = Selection::Converting(path);
    }

    /// Conversion finished for `path`. Results for a file that is no longer
    /// selected are dropped.
    pub fn file_converted<E: std::fmt::Display>(&mut self, path: PathBuf, result: Result<String, E>) -> Result<(), E> {
        if self.selection != Selection::Converting(path.clone()) {
            return Ok(());
        }
        match result {
            Ok(data_url) => {
                let name = path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string();
                self.selection = Selection::FileSelected { name, data_url };
                Ok(())
            }
            Err(e) => {
                warn!("⚠️  Could not read {}: {}", path.display(), e);
                self.selection = Selection::Empty;
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Empty;
        self.caption.clear();
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.selection, Selection::FileSelected { .. })
    }

    /// Append the selected image to the gallery and reset the form.
    ///
    /// Returns the updated gallery so the carousel can pick it up.
    pub fn submit(&mut self, store: &dyn GalleryStore, now_millis: i64) -> Result<Vec<ImageRecord>, FormError> {
        let data_url = match &self.selection {
            Selection::FileSelected { data_url, .. } => data_url.clone(),
            _ => return Err(FormError::NoFileSelected),
        };

        // Whitespace only decides blankness, the caption is stored as typed
        let blank = self.caption.trim().is_empty();
        let record = ImageRecord {
            id: now_millis,
            src: data_url,
            alt: if blank { DEFAULT_ALT.to_string() } else { self.caption.clone() },
            caption: if blank { DEFAULT_CAPTION.to_string() } else { self.caption.clone() },
        };

        let records = store.append(record)?;
        info!("💾 Memory {} added, gallery has {} entries", now_millis, records.len());
        self.clear();
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MuseumResult;
    use crate::state::library::{Gallery, KeyValueStorage, MemoryStorage, GALLERY_KEY};

    const DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn selected_form() -> AddMemoryForm {
        let mut form = AddMemoryForm::new();
        let path = PathBuf::from("/photos/beach.png");
        form.begin_selection(path.clone());
        form.file_converted::<MuseumError>(path, Ok(DATA_URL.to_string())).unwrap();
        form
    }

    /// Storage whose writes always fail
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> MuseumResult<Option<String>> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> MuseumResult<()> {
            Err(MuseumError::Io(std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded")))
        }
    }

    #[test]
    fn test_submit_without_file_leaves_store_untouched() {
        let gallery = Gallery::new(MemoryStorage::default());
        let mut form = AddMemoryForm::new();
        form.set_caption("no photo");

        let err = form.submit(&gallery, 1).unwrap_err();
        assert!(matches!(err, FormError::NoFileSelected));
        assert_eq!(err.user_message(), MSG_NO_FILE);
        assert_eq!(form.caption(), "no photo");
        assert!(gallery.load().is_empty());
    }

    #[test]
    fn test_submit_while_converting_is_rejected() {
        let storage = MemoryStorage::default();
        let gallery = Gallery::new(storage);
        let mut form = AddMemoryForm::new();
        form.begin_selection(PathBuf::from("/photos/slow.jpg"));

        assert!(!form.can_submit());
        assert!(matches!(form.submit(&gallery, 1), Err(FormError::NoFileSelected)));
        assert!(gallery.load().is_empty());
    }

    #[test]
    fn test_submit_with_caption_appends_one_record() {
        let gallery = Gallery::new(MemoryStorage::default());
        let mut form = selected_form();
        form.set_caption("Our trip");

        let records = form.submit(&gallery, 1700000000123).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1700000000123);
        assert_eq!(records[0].src, DATA_URL);
        assert_eq!(records[0].caption, "Our trip");
        assert_eq!(records[0].alt, "Our trip");
        assert_eq!(form.selection(), &Selection::Empty);
        assert_eq!(form.caption(), "");
    }

    #[test]
    fn test_blank_caption_uses_defaults() {
        let gallery = Gallery::new(MemoryStorage::default());
        let mut form = selected_form();
        form.set_caption("");

        let records = form.submit(&gallery, 5).unwrap();
        assert_eq!(records[0].alt, DEFAULT_ALT);
        assert_eq!(records[0].caption, DEFAULT_CAPTION);
    }

    #[test]
    fn test_caption_is_stored_as_typed() {
        let gallery = Gallery::new(MemoryStorage::default());
        let mut form = selected_form();
        form.set_caption(" Our trip ");

        let records = form.submit(&gallery, 6).unwrap();
        assert_eq!(records[0].caption, " Our trip ");
        assert_eq!(records[0].alt, " Our trip ");
    }

    #[test]
    fn test_whitespace_caption_uses_defaults() {
        let gallery = Gallery::new(MemoryStorage::default());
        let mut form = selected_form();
        form.set_caption("   ");

        let records = form.submit(&gallery, 7).unwrap();
        assert_eq!(records[0].alt, DEFAULT_ALT);
        assert_eq!(records[0].caption, DEFAULT_CAPTION);
    }

    #[test]
    fn test_unreadable_gallery_is_not_overwritten() {
        let stored = r#"[{"id":1,"src":"a.png","caption":"no alt"}]"#;
        let storage = MemoryStorage::default();
        storage.set_item(GALLERY_KEY, stored).unwrap();
        let gallery = Gallery::new(storage);
        let mut form = selected_form();
        form.set_caption("Our trip");

        let err = form.submit(&gallery, 8).unwrap_err();
        assert_eq!(err.user_message(), MSG_SAVE_FAILED);
        assert!(form.can_submit());
        assert_eq!(form.caption(), "Our trip");
    }

    #[test]
    fn test_failed_write_keeps_form() {
        let gallery = Gallery::new(ReadOnlyStorage);
        let mut form = selected_form();

        let err = form.submit(&gallery, 5).unwrap_err();
        assert_eq!(err.user_message(), MSG_SAVE_FAILED);
        assert!(form.can_submit());
    }

    #[test]
    fn test_clear_from_any_state() {
        let mut form = selected_form();
        form.set_caption("draft");
        form.clear();
        assert_eq!(form.selection(), &Selection::Empty);
        assert_eq!(form.caption(), "");

        form.begin_selection(PathBuf::from("/photos/a.jpg"));
        form.clear();
        assert_eq!(form.preview(), None);
    }

    #[test]
    fn test_stale_conversion_is_ignored() {
        let mut form = AddMemoryForm::new();
        form.begin_selection(PathBuf::from("/photos/old.jpg"));
        form.begin_selection(PathBuf::from("/photos/new.jpg"));

        form.file_converted::<MuseumError>(PathBuf::from("/photos/old.jpg"), Ok(DATA_URL.into())).unwrap();
        assert!(!form.can_submit());
    }

    #[test]
    fn test_failed_conversion_returns_to_empty() {
        let mut form = AddMemoryForm::new();
        let path = PathBuf::from("/photos/notes.txt");
        form.begin_selection(path.clone());

        let result = form.file_converted(path, Err(MuseumError::NotAnImage("notes.txt".into())));
        assert!(result.is_err());
        assert_eq!(form.selection(), &Selection::Empty);
    }

    #[test]
    fn test_existing_entries_are_kept() {
        let storage = MemoryStorage::default();
        storage
            .set_item(GALLERY_KEY, r#"[{"id":1,"src":"a.png","alt":"A","caption":"first"}]"#)
            .unwrap();
        let gallery = Gallery::new(storage);
        let mut form = selected_form();

        let records = form.submit(&gallery, 2).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].caption, "first");
    }
}
