// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Tells the caller whether a widget consumed an input event, and if so, whether it
/// needs to be re-rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventPropagation {
    ConsumedRender,
    Consumed,
    Propagate,
    /// Ctrl + Enter was pressed. The enclosing form should submit itself.
    SubmitForm,
}

impl EventPropagation {
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        matches!(
            self,
            EventPropagation::ConsumedRender | EventPropagation::Consumed
        )
    }

    #[must_use]
    pub fn needs_render(&self) -> bool { matches!(self, EventPropagation::ConsumedRender) }
}
