/// A value together with the warnings raised while it was computed.
pub(crate) enum WarningResult<T, W> {
    Ok(T),
    Warned(T, Vec<W>),
}

impl<T, W> WarningResult<T, W> {
    /// Adds a warning.
    pub(crate) fn warn(self, warning: W) -> Self {
        match self {
            WarningResult::Ok(t) => WarningResult::Warned(t, vec![warning]),
            WarningResult::Warned(t, mut w) => {
                w.push(warning);
                WarningResult::Warned(t, w)
            }
        }
    }

    /// Returns the value, after passing the warnings (if any) to the callback.
    pub(crate) fn consume_warnings<F>(self, f: F) -> T
    where
        F: FnOnce(Vec<W>),
    {
        match self {
            WarningResult::Ok(t) => t,
            WarningResult::Warned(t, w) => {
                f(w);
                t
            }
        }
    }
}
