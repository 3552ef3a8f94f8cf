//! Таблица ключевых слов CQL
//!
//! Закрытый набор ключевых слов языка и команд оболочки. Поиск не зависит
//! от регистра. Небольшое подмножество зарезервировано: такие слова нельзя
//! использовать как идентификаторы без кавычек. Остальные ключевые слова
//! допустимы везде, где грамматика ожидает имя.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// Ключевое слово CQL
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Keyword {
            $($variant),*
        }

        impl Keyword {
            /// Все ключевые слова в порядке объявления
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),*];

            /// Каноническое написание (верхний регистр)
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text),*
                }
            }
        }
    };
}

keywords! {
    Add => "ADD",
    Aggregate => "AGGREGATE",
    Aggregates => "AGGREGATES",
    All => "ALL",
    Allow => "ALLOW",
    Alter => "ALTER",
    And => "AND",
    Any => "ANY",
    Apply => "APPLY",
    As => "AS",
    Asc => "ASC",
    Ascii => "ASCII",
    Authorize => "AUTHORIZE",
    Autofetch => "AUTOFETCH",
    Batch => "BATCH",
    Begin => "BEGIN",
    By => "BY",
    Called => "CALLED",
    Capture => "CAPTURE",
    Cluster => "CLUSTER",
    Clustering => "CLUSTERING",
    Columnfamily => "COLUMNFAMILY",
    Compact => "COMPACT",
    Consistency => "CONSISTENCY",
    Contains => "CONTAINS",
    Copy => "COPY",
    Counter => "COUNTER",
    Create => "CREATE",
    Csv => "CSV",
    Custom => "CUSTOM",
    Default => "DEFAULT",
    Delete => "DELETE",
    Desc => "DESC",
    Describe => "DESCRIBE",
    Distinct => "DISTINCT",
    Drop => "DROP",
    EachQuorum => "EACH_QUORUM",
    Entries => "ENTRIES",
    Execute => "EXECUTE",
    Exists => "EXISTS",
    Expand => "EXPAND",
    Filtering => "FILTERING",
    Finalfunc => "FINALFUNC",
    From => "FROM",
    Frozen => "FROZEN",
    Full => "FULL",
    Function => "FUNCTION",
    Functions => "FUNCTIONS",
    Grant => "GRANT",
    Help => "HELP",
    Host => "HOST",
    If => "IF",
    In => "IN",
    Index => "INDEX",
    Infinity => "INFINITY",
    Initcond => "INITCOND",
    Input => "INPUT",
    Insert => "INSERT",
    Into => "INTO",
    Is => "IS",
    Json => "JSON",
    Key => "KEY",
    Keys => "KEYS",
    Keyspace => "KEYSPACE",
    Keyspaces => "KEYSPACES",
    Language => "LANGUAGE",
    Like => "LIKE",
    Limit => "LIMIT",
    List => "LIST",
    LocalOne => "LOCAL_ONE",
    LocalQuorum => "LOCAL_QUORUM",
    LocalSerial => "LOCAL_SERIAL",
    Login => "LOGIN",
    Map => "MAP",
    Materialized => "MATERIALIZED",
    Modify => "MODIFY",
    Nan => "NAN",
    Norecursive => "NORECURSIVE",
    Nosuperuser => "NOSUPERUSER",
    Not => "NOT",
    Null => "NULL",
    Of => "OF",
    Off => "OFF",
    On => "ON",
    One => "ONE",
    Options => "OPTIONS",
    Or => "OR",
    Order => "ORDER",
    Output => "OUTPUT",
    Paging => "PAGING",
    Parquet => "PARQUET",
    Partition => "PARTITION",
    Password => "PASSWORD",
    Per => "PER",
    Permission => "PERMISSION",
    Permissions => "PERMISSIONS",
    Primary => "PRIMARY",
    Quorum => "QUORUM",
    Rename => "RENAME",
    Replace => "REPLACE",
    Returns => "RETURNS",
    Revoke => "REVOKE",
    Role => "ROLE",
    Roles => "ROLES",
    Schema => "SCHEMA",
    Select => "SELECT",
    Serial => "SERIAL",
    Session => "SESSION",
    Set => "SET",
    Sfunc => "SFUNC",
    Show => "SHOW",
    Source => "SOURCE",
    Static => "STATIC",
    Stdin => "STDIN",
    Stdout => "STDOUT",
    Storage => "STORAGE",
    Stype => "STYPE",
    Superuser => "SUPERUSER",
    Table => "TABLE",
    Tables => "TABLES",
    Three => "THREE",
    Timestamp => "TIMESTAMP",
    To => "TO",
    Token => "TOKEN",
    Tracing => "TRACING",
    Trigger => "TRIGGER",
    Truncate => "TRUNCATE",
    Ttl => "TTL",
    Tuple => "TUPLE",
    Two => "TWO",
    Type => "TYPE",
    Types => "TYPES",
    Unlogged => "UNLOGGED",
    Unset => "UNSET",
    Update => "UPDATE",
    Use => "USE",
    User => "USER",
    Users => "USERS",
    Using => "USING",
    Values => "VALUES",
    Vector => "VECTOR",
    Version => "VERSION",
    View => "VIEW",
    Where => "WHERE",
    With => "WITH",
    Writetime => "WRITETIME",
}

lazy_static! {
    /// Карта ключевых слов по каноническому написанию
    static ref KEYWORD_MAP: HashMap<&'static str, Keyword> = Keyword::ALL
        .iter()
        .map(|keyword| (keyword.as_str(), *keyword))
        .collect();
}

impl Keyword {
    /// Ищет ключевое слово без учета регистра
    pub fn lookup(word: &str) -> Option<Keyword> {
        KEYWORD_MAP.get(word.to_ascii_uppercase().as_str()).copied()
    }

    /// Зарезервированные слова нельзя использовать как имена без кавычек
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            Keyword::Add
                | Keyword::Allow
                | Keyword::Alter
                | Keyword::And
                | Keyword::Apply
                | Keyword::Asc
                | Keyword::Authorize
                | Keyword::Batch
                | Keyword::Begin
                | Keyword::By
                | Keyword::Columnfamily
                | Keyword::Create
                | Keyword::Delete
                | Keyword::Desc
                | Keyword::Describe
                | Keyword::Drop
                | Keyword::Entries
                | Keyword::Execute
                | Keyword::From
                | Keyword::Full
                | Keyword::Grant
                | Keyword::If
                | Keyword::In
                | Keyword::Index
                | Keyword::Infinity
                | Keyword::Insert
                | Keyword::Into
                | Keyword::Keyspace
                | Keyword::Limit
                | Keyword::Modify
                | Keyword::Nan
                | Keyword::Norecursive
                | Keyword::Not
                | Keyword::Null
                | Keyword::Of
                | Keyword::On
                | Keyword::Or
                | Keyword::Order
                | Keyword::Primary
                | Keyword::Rename
                | Keyword::Replace
                | Keyword::Revoke
                | Keyword::Schema
                | Keyword::Select
                | Keyword::Set
                | Keyword::Table
                | Keyword::To
                | Keyword::Token
                | Keyword::Truncate
                | Keyword::Unlogged
                | Keyword::Update
                | Keyword::Use
                | Keyword::Using
                | Keyword::View
                | Keyword::Where
                | Keyword::With
        )
    }
}

/// Проверяет, можно ли использовать слово как идентификатор без кавычек
pub fn is_reserved_word(word: &str) -> bool {
    Keyword::lookup(word).is_some_and(|keyword| keyword.is_reserved())
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
