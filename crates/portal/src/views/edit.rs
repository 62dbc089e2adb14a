//! Inline edit sections.

use crate::error::Result;

/// Whether an editable section shows its stored value or a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState<T> {
    #[default]
    Viewing,
    Editing(T),
}

impl<T> EditState<T> {
    /// Start editing from `current`. A draft already in progress is kept.
    pub fn begin_edit(&mut self, current: T) {
        if matches!(self, Self::Viewing) {
            *self = Self::Editing(current);
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    #[must_use]
    pub fn draft(&self) -> Option<&T> {
        match self {
            Self::Editing(draft) => Some(draft),
            Self::Viewing => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Editing(draft) => Some(draft),
            Self::Viewing => None,
        }
    }

    /// Hand the draft to `persist` and return to viewing.
    ///
    /// Saving while viewing does nothing and returns `Ok(None)`. If
    /// `persist` fails the draft is kept so it can be corrected.
    ///
    /// # Errors
    ///
    /// Returns whatever `persist` returns.
    pub fn save<R>(&mut self, persist: impl FnOnce(&T) -> Result<R>) -> Result<Option<R>> {
        let Self::Editing(draft) = self else {
            return Ok(None);
        };
        let saved = persist(draft)?;
        *self = Self::Viewing;
        Ok(Some(saved))
    }

    /// Drop the draft without persisting it.
    pub fn cancel(&mut self) -> Option<T> {
        match std::mem::replace(self, Self::Viewing) {
            Self::Editing(draft) => Some(draft),
            Self::Viewing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_save_persists_and_returns_to_viewing() {
        let mut state = EditState::default();
        state.begin_edit("старое".to_string());
        if let Some(draft) = state.draft_mut() {
            *draft = "новое".to_string();
        }

        let mut stored = String::new();
        let saved = state
            .save(|draft| {
                stored.clone_from(draft);
                Ok(())
            })
            .unwrap();

        assert_eq!(saved, Some(()));
        assert_eq!(stored, "новое");
        assert_eq!(state, EditState::Viewing);
    }

    #[test]
    fn test_cancel_discards() {
        let mut state = EditState::default();
        state.begin_edit(5);
        assert!(state.is_editing());

        assert_eq!(state.cancel(), Some(5));
        assert!(!state.is_editing());
        assert_eq!(state.cancel(), None);
    }

    #[test]
    fn test_failed_save_keeps_draft() {
        let mut state = EditState::default();
        state.begin_edit(String::new());

        let result = state.save(|_| -> Result<()> { Err(Error::MissingField { field: "title" }) });
        assert!(result.unwrap_err().is_missing_field());
        assert_eq!(state.draft().map(String::as_str), Some(""));
    }

    #[test]
    fn test_begin_edit_keeps_existing_draft() {
        let mut state = EditState::default();
        state.begin_edit(1);
        state.begin_edit(2);
        assert_eq!(state.draft(), Some(&1));
    }

    #[test]
    fn test_save_while_viewing_is_noop() {
        let mut state: EditState<u8> = EditState::Viewing;
        let saved = state.save(|_| -> Result<u8> { unreachable!() }).unwrap();
        assert_eq!(saved, None);
    }
}
