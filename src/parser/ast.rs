//! Абстрактное синтаксическое дерево CQL для rustcql
//!
//! Каждая инструкция разбирается в отдельный вариант закрытого перечисления
//! [`Statement`]. Все узлы полностью типизированы, сериализуемы и сравнимы.
//! Каноническое текстовое представление реализовано в модуле `display`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// === Имена ===

/// Идентификатор (имя колонки, таблицы, keyspace и т.п.)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// Имя: в нижнем регистре для имен без кавычек
    pub name: String,
    /// Было ли имя записано в двойных кавычках
    pub quoted: bool,
}

impl Identifier {
    /// Имя без кавычек приводится к нижнему регистру
    pub fn unquoted(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            quoted: false,
        }
    }

    /// Имя в кавычках сохраняет регистр
    pub fn quoted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quoted: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// Имя с необязательным keyspace: `ks.name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub keyspace: Option<Identifier>,
    pub name: Identifier,
}

impl QualifiedName {
    pub fn simple(name: Identifier) -> Self {
        Self { keyspace: None, name }
    }

    pub fn qualified(keyspace: Identifier, name: Identifier) -> Self {
        Self {
            keyspace: Some(keyspace),
            name,
        }
    }
}

// === Типы данных ===

/// Встроенные типы CQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeType {
    Ascii,
    Bigint,
    Blob,
    Boolean,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Inet,
    Int,
    Smallint,
    Text,
    Time,
    Timestamp,
    Timeuuid,
    Tinyint,
    Uuid,
    Varchar,
    Varint,
}

impl NativeType {
    pub const ALL: &'static [NativeType] = &[
        NativeType::Ascii,
        NativeType::Bigint,
        NativeType::Blob,
        NativeType::Boolean,
        NativeType::Counter,
        NativeType::Date,
        NativeType::Decimal,
        NativeType::Double,
        NativeType::Duration,
        NativeType::Float,
        NativeType::Inet,
        NativeType::Int,
        NativeType::Smallint,
        NativeType::Text,
        NativeType::Time,
        NativeType::Timestamp,
        NativeType::Timeuuid,
        NativeType::Tinyint,
        NativeType::Uuid,
        NativeType::Varchar,
        NativeType::Varint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NativeType::Ascii => "ascii",
            NativeType::Bigint => "bigint",
            NativeType::Blob => "blob",
            NativeType::Boolean => "boolean",
            NativeType::Counter => "counter",
            NativeType::Date => "date",
            NativeType::Decimal => "decimal",
            NativeType::Double => "double",
            NativeType::Duration => "duration",
            NativeType::Float => "float",
            NativeType::Inet => "inet",
            NativeType::Int => "int",
            NativeType::Smallint => "smallint",
            NativeType::Text => "text",
            NativeType::Time => "time",
            NativeType::Timestamp => "timestamp",
            NativeType::Timeuuid => "timeuuid",
            NativeType::Tinyint => "tinyint",
            NativeType::Uuid => "uuid",
            NativeType::Varchar => "varchar",
            NativeType::Varint => "varint",
        }
    }

    /// Ищет встроенный тип по имени без учета регистра
    pub fn from_name(name: &str) -> Option<NativeType> {
        NativeType::ALL
            .iter()
            .copied()
            .find(|native| native.as_str().eq_ignore_ascii_case(name))
    }
}

/// Тип данных CQL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Native(NativeType),
    List(Box<DataType>),
    Set(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Tuple(Vec<DataType>),
    Frozen(Box<DataType>),
    /// `vector<T, n>`
    Vector(Box<DataType>, u32),
    /// Пользовательский тип
    UserDefined(QualifiedName),
}

// === Значения ===

/// Константа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Constant {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Blob(Vec<u8>),
    Uuid(Uuid),
    Null,
}

/// Числа с плавающей точкой сравниваются через `total_cmp`: `NaN` равен себе,
/// а `0.0` и `-0.0` различаются, как и в тексте инструкции
impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constant::Integer(a), Constant::Integer(b)) => a == b,
            (Constant::Float(a), Constant::Float(b)) => a.total_cmp(b).is_eq(),
            (Constant::String(a), Constant::String(b)) => a == b,
            (Constant::Boolean(a), Constant::Boolean(b)) => a == b,
            (Constant::Blob(a), Constant::Blob(b)) => a == b,
            (Constant::Uuid(a), Constant::Uuid(b)) => a == b,
            (Constant::Null, Constant::Null) => true,
            _ => false,
        }
    }
}

/// Маркер привязки: `?` или `:name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindMarker {
    Anonymous,
    Named(Identifier),
}

/// Значение в выражениях DML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Constant(Constant),
    BindMarker(BindMarker),
    FunctionCall(FunctionCall),
    List(Vec<Term>),
    Set(Vec<Term>),
    Map(Vec<(Term, Term)>),
    Tuple(Vec<Term>),
    /// Литерал пользовательского типа `{field: value, ...}`
    UserType(Vec<(Identifier, Term)>),
}

/// Вызов функции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: QualifiedName,
    pub args: Vec<FunctionArg>,
}

/// Аргумент функции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FunctionArg {
    /// `COUNT(*)`
    Star,
    Column(Identifier),
    Term(Term),
}

/// Целое значение или маркер привязки (TTL, TIMESTAMP, LIMIT)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegerValue {
    Literal(i64),
    BindMarker(BindMarker),
}

// === Условия ===

/// Левая часть отношения в WHERE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationTarget {
    Column(Identifier),
    /// `(a, b) > (1, 2)`
    Tuple(Vec<Identifier>),
    /// `token(a, b) > ...`
    Token(Vec<Identifier>),
}

/// Оператор отношения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationOperator {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    Contains,
    ContainsKey,
    Like,
    IsNotNull,
}

/// Правая часть отношения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RelationValue {
    Term(Term),
    /// Список после `IN (...)`
    List(Vec<Term>),
    /// Для `IS NOT NULL`
    Absent,
}

/// Отношение `target operator value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub target: RelationTarget,
    pub operator: RelationOperator,
    pub value: RelationValue,
}

/// Условие легковесной транзакции `IF c = v`, `IF c[k] = v`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub column: Identifier,
    /// Ключ элемента коллекции для `c[k]`
    pub element: Option<Term>,
    pub operator: RelationOperator,
    pub value: RelationValue,
}

/// Клауза IF для UPDATE и DELETE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpdateCondition {
    Exists,
    Conditions(Vec<Condition>),
}

/// Опция USING
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsingOption {
    Ttl(IntegerValue),
    Timestamp(IntegerValue),
}

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Элемент ORDER BY / CLUSTERING ORDER BY
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    pub column: Identifier,
    pub direction: OrderDirection,
}

// === Опции ===

/// Значение опции в `WITH name = value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionValue {
    Constant(Constant),
    Identifier(Identifier),
    /// Карта `{'key': value, ...}` в порядке записи
    Map(IndexMap<String, Constant>),
}

/// Опции в порядке записи
pub type OptionMap = IndexMap<String, OptionValue>;

/// Опции таблицы или материализованного представления
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableOptions {
    pub options: OptionMap,
    pub clustering_order: Vec<Ordering>,
    pub compact_storage: bool,
}

impl TableOptions {
    pub fn is_empty(&self) -> bool {
        self.options.is_empty() && self.clustering_order.is_empty() && !self.compact_storage
    }
}

// === DML ===

/// Элемент списка SELECT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selector {
    Column(Identifier),
    FunctionCall(FunctionCall),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectElement {
    pub selector: Selector,
    pub alias: Option<Identifier>,
}

/// Список выборки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectClause {
    Wildcard,
    Elements(Vec<SelectElement>),
}

/// SELECT запрос
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub json: bool,
    pub distinct: bool,
    pub selection: SelectClause,
    pub from: QualifiedName,
    pub where_clause: Vec<Relation>,
    pub order_by: Vec<Ordering>,
    pub per_partition_limit: Option<IntegerValue>,
    pub limit: Option<IntegerValue>,
    pub allow_filtering: bool,
}

/// Значение DEFAULT для INSERT JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JsonDefault {
    Null,
    Unset,
}

/// Источник данных INSERT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertSource {
    Values {
        columns: Vec<Identifier>,
        values: Vec<Term>,
    },
    Json {
        /// Строка JSON или маркер привязки
        value: Term,
        default: Option<JsonDefault>,
    },
}

/// INSERT операция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub table: QualifiedName,
    pub source: InsertSource,
    pub if_not_exists: bool,
    pub using: Vec<UsingOption>,
}

/// Присваивание в UPDATE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Assignment {
    /// `c = v`
    Set { column: Identifier, value: Term },
    /// `c.field = v`
    SetField {
        column: Identifier,
        field: Identifier,
        value: Term,
    },
    /// `c[k] = v`
    SetElement {
        column: Identifier,
        key: Term,
        value: Term,
    },
    /// `c = c + v`
    Append { column: Identifier, value: Term },
    /// `c = v + c`
    Prepend { column: Identifier, value: Term },
    /// `c = c - v`
    Remove { column: Identifier, value: Term },
}

impl Assignment {
    pub fn column(&self) -> &Identifier {
        match self {
            Assignment::Set { column, .. }
            | Assignment::SetField { column, .. }
            | Assignment::SetElement { column, .. }
            | Assignment::Append { column, .. }
            | Assignment::Prepend { column, .. }
            | Assignment::Remove { column, .. } => column,
        }
    }
}

/// UPDATE операция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub table: QualifiedName,
    pub using: Vec<UsingOption>,
    pub assignments: Vec<Assignment>,
    pub where_clause: Vec<Relation>,
    pub condition: Option<UpdateCondition>,
}

/// Цель удаления: колонка или элемент коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeleteTarget {
    Column(Identifier),
    Element { column: Identifier, key: Term },
}

/// DELETE операция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub targets: Vec<DeleteTarget>,
    pub table: QualifiedName,
    pub using: Vec<UsingOption>,
    pub where_clause: Vec<Relation>,
    pub condition: Option<UpdateCondition>,
}

/// Тип пакета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchKind {
    Logged,
    Unlogged,
    Counter,
}

/// Инструкция внутри пакета
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BatchEntry {
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

/// BEGIN BATCH ... APPLY BATCH
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStatement {
    pub kind: BatchKind,
    pub using: Vec<UsingOption>,
    pub statements: Vec<BatchEntry>,
}

// === Keyspace ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseKeyspaceStatement {
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateKeyspaceStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub options: OptionMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterKeyspaceStatement {
    pub name: Identifier,
    pub options: OptionMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropKeyspaceStatement {
    pub if_exists: bool,
    pub name: Identifier,
}

// === Таблицы ===

/// Определение колонки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: Identifier,
    pub data_type: DataType,
    pub is_static: bool,
}

/// Первичный ключ: ключ партиции и кластерные колонки
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub partition_key: Vec<Identifier>,
    pub clustering_columns: Vec<Identifier>,
}

impl PrimaryKey {
    pub fn columns(&self) -> impl Iterator<Item = &Identifier> {
        self.partition_key.iter().chain(self.clustering_columns.iter())
    }
}

/// CREATE TABLE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTableStatement {
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub columns: Vec<ColumnDefinition>,
    pub primary_key: PrimaryKey,
    pub options: TableOptions,
}

/// Операции ALTER TABLE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlterTableOperation {
    AddColumns(Vec<ColumnDefinition>),
    DropColumns(Vec<Identifier>),
    DropCompactStorage,
    RenameColumns(Vec<(Identifier, Identifier)>),
    AlterColumnType { column: Identifier, data_type: DataType },
    WithOptions(TableOptions),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterTableStatement {
    pub name: QualifiedName,
    pub operation: AlterTableOperation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTableStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TruncateStatement {
    pub name: QualifiedName,
}

// === Пользовательские типы ===

/// Поле пользовательского типа или параметр функции
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: Identifier,
    pub data_type: DataType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTypeStatement {
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlterTypeOperation {
    AddField(FieldDefinition),
    RenameFields(Vec<(Identifier, Identifier)>),
    AlterFieldType { field: Identifier, data_type: DataType },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterTypeStatement {
    pub name: QualifiedName,
    pub operation: AlterTypeOperation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTypeStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

// === Индексы ===

/// Вид индексируемого значения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexTargetKind {
    Simple,
    Keys,
    Values,
    Entries,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTarget {
    pub column: Identifier,
    pub kind: IndexTargetKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexStatement {
    pub custom: bool,
    pub if_not_exists: bool,
    pub name: Option<Identifier>,
    pub table: QualifiedName,
    pub target: IndexTarget,
    /// Класс реализации для CUSTOM INDEX
    pub using: Option<String>,
    pub options: OptionMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropIndexStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

// === Материализованные представления ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMaterializedViewStatement {
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub selection: SelectClause,
    pub from: QualifiedName,
    pub where_clause: Vec<Relation>,
    pub primary_key: PrimaryKey,
    pub options: TableOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterMaterializedViewStatement {
    pub name: QualifiedName,
    pub options: TableOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropMaterializedViewStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
}

// === Функции, агрегаты, триггеры ===

/// Поведение функции при NULL аргументах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnNullInput {
    /// `CALLED ON NULL INPUT`
    Called,
    /// `RETURNS NULL ON NULL INPUT`
    ReturnsNull,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFunctionStatement {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub params: Vec<FieldDefinition>,
    pub on_null_input: OnNullInput,
    pub return_type: DataType,
    pub language: Identifier,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropFunctionStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    /// Сигнатура для перегруженных функций
    pub signature: Option<Vec<DataType>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAggregateStatement {
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub name: QualifiedName,
    pub arg_types: Vec<DataType>,
    pub state_function: Identifier,
    pub state_type: DataType,
    pub final_function: Option<Identifier>,
    pub initial_condition: Option<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropAggregateStatement {
    pub if_exists: bool,
    pub name: QualifiedName,
    pub signature: Option<Vec<DataType>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTriggerStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub table: QualifiedName,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTriggerStatement {
    pub if_exists: bool,
    pub name: Identifier,
    pub table: QualifiedName,
}

// === Роли и права ===

/// Опция роли
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoleOption {
    Password(String),
    Login(bool),
    Superuser(bool),
    Options(IndexMap<String, Constant>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRoleStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub options: Vec<RoleOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlterRoleStatement {
    pub name: Identifier,
    pub options: Vec<RoleOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropRoleStatement {
    pub if_exists: bool,
    pub name: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserStatement {
    pub if_not_exists: bool,
    pub name: Identifier,
    pub password: Option<String>,
    /// `SUPERUSER` / `NOSUPERUSER`
    pub superuser: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlterUserStatement {
    pub name: Identifier,
    pub password: Option<String>,
    pub superuser: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropUserStatement {
    pub if_exists: bool,
    pub name: Identifier,
}

/// Право доступа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    All,
    Alter,
    Authorize,
    Create,
    Describe,
    Drop,
    Execute,
    Modify,
    Select,
}

/// Защищаемый ресурс
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    AllKeyspaces,
    Keyspace(Identifier),
    Table(QualifiedName),
    AllRoles,
    Role(Identifier),
    AllFunctions,
    AllFunctionsInKeyspace(Identifier),
    Function {
        name: QualifiedName,
        arg_types: Vec<DataType>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantStatement {
    pub permission: Permission,
    pub resource: Resource,
    pub role: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeStatement {
    pub permission: Permission,
    pub resource: Resource,
    pub role: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRolesStatement {
    pub of: Option<Identifier>,
    pub norecursive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPermissionsStatement {
    pub permission: Permission,
    pub resource: Option<Resource>,
    pub of: Option<Identifier>,
    pub norecursive: bool,
}

// === Команды оболочки ===

/// Объект команды DESCRIBE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescribeTarget {
    Cluster,
    Schema,
    Keyspaces,
    /// `DESCRIBE KEYSPACE [ks]`
    Keyspace(Option<Identifier>),
    Tables,
    Table(QualifiedName),
    Types,
    Type(QualifiedName),
    Functions,
    Function(QualifiedName),
    Aggregates,
    Aggregate(QualifiedName),
    Index(QualifiedName),
    MaterializedView(QualifiedName),
    Roles,
    /// `DESCRIBE name` без указания вида объекта
    Object(QualifiedName),
}

/// Уровень согласованности
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsistencyLevel {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    LocalQuorum,
    EachQuorum,
    Serial,
    LocalSerial,
    LocalOne,
}

impl ConsistencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyLevel::Any => "ANY",
            ConsistencyLevel::One => "ONE",
            ConsistencyLevel::Two => "TWO",
            ConsistencyLevel::Three => "THREE",
            ConsistencyLevel::Quorum => "QUORUM",
            ConsistencyLevel::All => "ALL",
            ConsistencyLevel::LocalQuorum => "LOCAL_QUORUM",
            ConsistencyLevel::EachQuorum => "EACH_QUORUM",
            ConsistencyLevel::Serial => "SERIAL",
            ConsistencyLevel::LocalSerial => "LOCAL_SERIAL",
            ConsistencyLevel::LocalOne => "LOCAL_ONE",
        }
    }

    /// Допустим ли уровень для SERIAL CONSISTENCY
    pub fn is_serial(&self) -> bool {
        matches!(self, ConsistencyLevel::Serial | ConsistencyLevel::LocalSerial)
    }
}

/// Формат вывода оболочки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    Ascii,
    Table,
    Expand,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Ascii => "ASCII",
            OutputFormat::Table => "TABLE",
            OutputFormat::Expand => "EXPAND",
            OutputFormat::Json => "JSON",
        }
    }
}

/// Значение `PAGING`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagingSetting {
    /// Размер страницы, не меньше 1
    PageSize(i64),
    Off,
}

/// Объект команды SHOW
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShowTarget {
    Version,
    Host,
    Session,
}

/// Формат файла CAPTURE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureFormat {
    Text,
    Json,
    Csv,
    Parquet,
}

/// `CAPTURE [JSON | CSV | PARQUET] 'file' | CAPTURE OFF | CAPTURE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureCommand {
    /// Без аргументов: показать, куда идет запись
    Status,
    Off,
    Start { format: CaptureFormat, path: String },
}

/// Направление COPY
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyDirection {
    To,
    From,
}

/// Файл или стандартный поток (STDOUT для TO, STDIN для FROM)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyTarget {
    File(String),
    Standard,
}

/// `COPY table [(columns)] TO | FROM target [WITH options]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyStatement {
    pub table: QualifiedName,
    pub columns: Vec<Identifier>,
    pub direction: CopyDirection,
    pub target: CopyTarget,
    pub options: OptionMap,
}

// === Инструкция ===

/// Категория инструкции
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementCategory {
    Empty,
    Dml,
    Ddl,
    Dcl,
    Meta,
}

/// Разобранная инструкция CQL или команда оболочки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Пустая инструкция (одиночный `;`)
    Empty,

    // DML
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    Batch(BatchStatement),

    // Keyspace
    UseKeyspace(UseKeyspaceStatement),
    CreateKeyspace(CreateKeyspaceStatement),
    AlterKeyspace(AlterKeyspaceStatement),
    DropKeyspace(DropKeyspaceStatement),

    // Таблицы
    CreateTable(CreateTableStatement),
    AlterTable(AlterTableStatement),
    DropTable(DropTableStatement),
    Truncate(TruncateStatement),

    // Типы
    CreateType(CreateTypeStatement),
    AlterType(AlterTypeStatement),
    DropType(DropTypeStatement),

    // Индексы и представления
    CreateIndex(CreateIndexStatement),
    DropIndex(DropIndexStatement),
    CreateMaterializedView(CreateMaterializedViewStatement),
    AlterMaterializedView(AlterMaterializedViewStatement),
    DropMaterializedView(DropMaterializedViewStatement),

    // Функции, агрегаты, триггеры
    CreateFunction(CreateFunctionStatement),
    DropFunction(DropFunctionStatement),
    CreateAggregate(CreateAggregateStatement),
    DropAggregate(DropAggregateStatement),
    CreateTrigger(CreateTriggerStatement),
    DropTrigger(DropTriggerStatement),

    // Роли и права
    CreateRole(CreateRoleStatement),
    AlterRole(AlterRoleStatement),
    DropRole(DropRoleStatement),
    CreateUser(CreateUserStatement),
    AlterUser(AlterUserStatement),
    DropUser(DropUserStatement),
    Grant(GrantStatement),
    Revoke(RevokeStatement),
    ListRoles(ListRolesStatement),
    ListUsers,
    ListPermissions(ListPermissionsStatement),

    // Команды оболочки
    Describe(DescribeTarget),
    /// `CONSISTENCY [level]`; без уровня показывает текущий
    Consistency(Option<ConsistencyLevel>),
    /// `SERIAL CONSISTENCY [level]`
    SerialConsistency(Option<ConsistencyLevel>),
    /// `OUTPUT [format]`
    OutputFormat(Option<OutputFormat>),
    /// `TRACING [ON | OFF]`
    Tracing(Option<bool>),
    /// `PAGING [n | OFF]`
    Paging(Option<PagingSetting>),
    /// `AUTOFETCH [ON | OFF]`
    Autofetch(Option<bool>),
    /// `EXPAND [ON | OFF]`
    Expand(Option<bool>),
    Show(ShowTarget),
    /// `SOURCE 'file'`
    Source(String),
    Capture(CaptureCommand),
    Copy(CopyStatement),
    Help,
}

impl Statement {
    /// Категория инструкции
    pub fn category(&self) -> StatementCategory {
        match self {
            Statement::Empty => StatementCategory::Empty,
            Statement::Select(_)
            | Statement::Insert(_)
            | Statement::Update(_)
            | Statement::Delete(_)
            | Statement::Batch(_) => StatementCategory::Dml,
            Statement::CreateRole(_)
            | Statement::AlterRole(_)
            | Statement::DropRole(_)
            | Statement::CreateUser(_)
            | Statement::AlterUser(_)
            | Statement::DropUser(_)
            | Statement::Grant(_)
            | Statement::Revoke(_)
            | Statement::ListRoles(_)
            | Statement::ListUsers
            | Statement::ListPermissions(_) => StatementCategory::Dcl,
            Statement::Describe(_)
            | Statement::Consistency(_)
            | Statement::SerialConsistency(_)
            | Statement::OutputFormat(_)
            | Statement::Tracing(_)
            | Statement::Paging(_)
            | Statement::Autofetch(_)
            | Statement::Expand(_)
            | Statement::Show(_)
            | Statement::Source(_)
            | Statement::Capture(_)
            | Statement::Copy(_)
            | Statement::Help => StatementCategory::Meta,
            _ => StatementCategory::Ddl,
        }
    }

    /// Является ли инструкция командой оболочки
    pub fn is_meta_command(&self) -> bool {
        self.category() == StatementCategory::Meta
    }
}
