/// Status reported by a [`PushParser`] after each token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PushStatus {
    /// The token was accepted; keep pushing.
    NeedMoreTokens,
    /// The input forms a complete, valid parse.
    Accepted,
    /// The input cannot be parsed. No further tokens will be accepted.
    Aborted,
}

impl PushStatus {
    /// Returns true once the parser has reached a final verdict.
    #[inline]
    pub fn is_final(self) -> bool {
        !matches!(self, PushStatus::NeedMoreTokens)
    }
}

/// A parser automaton that is handed tokens one at a time.
///
/// Push parsers never pull input. The driver owns the loop and calls
/// [`push`](Self::push) for every token the scanner produces, then
/// [`finish`](Self::finish) once the scanner reports end of input.
pub trait PushParser<T> {
    /// Shift one token.
    fn push(&mut self, token: T) -> PushStatus;

    /// Signal end of input.
    ///
    /// Should return [`PushStatus::Accepted`] or [`PushStatus::Aborted`].
    /// [`PushStatus::NeedMoreTokens`] means the input stopped in the middle
    /// of a construct; a [`Driver`](crate::Driver) reports it as
    /// [`DriveError::IncompleteInput`](crate::DriveError::IncompleteInput).
    fn finish(&mut self) -> PushStatus;
}
