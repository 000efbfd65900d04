use crate::app::editor::CursorMove;
use crate::app::mutation::MutationQuery;
use crate::app::table_view::PageRequest;
use crate::domain::{ColumnInfo, QueryResult, TableInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    Insert,
    Update,
}

impl MutationKind {
    pub fn done_message(self) -> &'static str {
        match self {
            MutationKind::Delete => "Row deleted",
            MutationKind::Insert => "Row inserted",
            MutationKind::Update => "Row updated",
        }
    }

    pub fn failure_prefix(self) -> &'static str {
        match self {
            MutationKind::Delete => "Delete failed",
            MutationKind::Insert => "Insert failed",
            MutationKind::Update => "Update failed",
        }
    }
}

/// A synthesized statement waiting to run against a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    pub connection: String,
    pub kind: MutationKind,
    pub query: MutationQuery,
}

/// Keystroke intents and completion messages. Completions carry the
/// outcome of exactly one effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    Render,
    Resize(u16, u16),
    /// Ctrl+C from anywhere
    Interrupt,
    Quit,

    // Confirmation
    ConfirmAccept,
    ConfirmDecline,

    // Home: connection list
    HomeSelectNext,
    HomeSelectPrevious,
    HomeSelectFirst,
    HomeSelectLast,
    HomeConnect,
    OpenCreateForm,
    OpenEditForm,
    RequestDeleteConnection,
    DeleteConnection { name: String },

    // Home: connection form
    FormNextField,
    FormPrevField,
    FormInput(char),
    FormBackspace,
    FormSubmit,
    FormCancel,

    // Browse: navigation
    GoHome,
    NextPanel,
    PrevPanel,
    ToggleEditor,
    ExecuteEditor,
    Activate,
    MoveDown,
    MoveUp,
    MoveFirst,
    MoveLast,
    HalfPageDown,
    HalfPageUp,
    ScrollLeft,
    ScrollRight,
    NextPage,
    PrevPage,
    StartFilter,
    DisconnectSelected,
    RequestDeleteRow,
    StartInsert,
    SubmitMutation(PendingMutation),

    // Browse: focused input
    Unfocus,
    FilterInput(char),
    FilterBackspace,
    FilterApply,
    CellInput(char),
    CellBackspace,
    CellNextColumn,
    CellPrevColumn,
    CellSubmit,
    InsertInput(char),
    InsertBackspace,
    InsertNextField,
    InsertPrevField,
    /// Enter: next field, or submit from the last one
    InsertAdvance,
    EditorInput(char),
    EditorBackspace,
    EditorDelete,
    EditorNewline,
    EditorTab,
    EditorMove(CursorMove),
    EditorHistoryPrev,
    EditorHistoryNext,

    // Completions
    Connected {
        name: String,
    },
    ConnectFailed {
        name: String,
        error: String,
    },
    Disconnected {
        name: String,
    },
    TablesLoaded {
        name: String,
        tables: Vec<TableInfo>,
    },
    TablesFailed {
        name: String,
        error: String,
    },
    ColumnsLoaded {
        connection: String,
        schema: String,
        table: String,
        columns: Vec<ColumnInfo>,
    },
    ColumnsFailed {
        connection: String,
        error: String,
    },
    TableDataLoaded {
        request: PageRequest,
        result: Box<QueryResult>,
    },
    TableDataFailed {
        request: PageRequest,
        error: String,
    },
    QueryCompleted(Box<QueryResult>),
    QueryFailed {
        error: String,
    },
    MutationApplied {
        kind: MutationKind,
        rows_affected: u64,
    },
    MutationFailed {
        kind: MutationKind,
        error: String,
    },
    ConfigSaved {
        notice: String,
    },
    ConfigSaveFailed {
        error: String,
    },
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}
