//! User and system actions.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    OpenPanel,
    ClosePanel,

    Char(char),
    Newline,
    Backspace,
    ClearInput,
    Submit,
    CancelRequest,

    RequestClear,
    Confirm(bool),

    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,

    Click { column: u16, row: u16 },
}
