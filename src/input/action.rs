/// All possible semantic actions in jobdeck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusPrevColumn,
    FocusNextColumn,
    SelectPrevCard,
    SelectNextCard,
    JumpToColumn(usize),
    JumpToFirstCard,
    JumpToLastCard,

    // Card actions
    NewJob,
    EditJob,
    DeleteJob,
    ToggleExpand,
    MoveJobPrevColumn,
    MoveJobNextColumn,

    // Keyboard drag
    BeginDrag,
    DragHoverPrev,
    DragHoverNext,
    Drop,
    CancelDrag,

    // Pointer
    PointerDown { x: u16, y: u16 },
    PointerDrag { x: u16, y: u16 },
    PointerUp { x: u16, y: u16 },

    // Form dialog
    FormNextField,
    FormPrevField,
    FormSubmit,
    FormCancel,

    // Text input
    InputChar(char),
    InputBackspace,
    InputLeft,
    InputRight,
    InputHome,
    InputEnd,
    InputDeleteWord,

    // Confirmation
    Confirm,
    Deny,

    // Mode entry
    EnterGotoMode,

    // Board
    ShowHelp,
    ClosePanel,
    Quit,

    // No-op
    None,
}
