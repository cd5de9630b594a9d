/// Modal lifecycle: `Closed` or `Open` with the dialog's transient state.
///
/// Opening always replaces the carried state wholesale, so nothing from a
/// previous edit target can leak into the next one. Outside-click dismissal
/// is the view's concern and routes into the same `close`.
#[derive(Debug, Default)]
pub enum Modal<T> {
    #[default]
    Closed,
    Open(T),
}

impl<T> Modal<T> {
    pub fn open_with(&mut self, state: T) {
        *self = Modal::Open(state);
    }

    /// Returns whether the modal was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Modal::Closed;
        was_open
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open(_))
    }

    pub fn state(&self) -> Option<&T> {
        match self {
            Modal::Open(s) => Some(s),
            Modal::Closed => None,
        }
    }

    pub fn state_mut(&mut self) -> Option<&mut T> {
        match self {
            Modal::Open(s) => Some(s),
            Modal::Closed => None,
        }
    }
}
