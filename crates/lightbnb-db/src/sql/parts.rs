/// A piece of a statement under construction.
#[derive(Debug, Clone)]
pub(crate) enum SqlPart {
    /// Literal SQL text.
    Raw(String),
    /// A placeholder; numbered at render time.
    Param,
}
