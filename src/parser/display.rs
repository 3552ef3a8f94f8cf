//! Каноническое текстовое представление AST
//!
//! `Display` для узлов дерева выдает CQL, который снова разбирается в равное
//! дерево. Ключевые слова пишутся в верхнем регистре, имена в кавычках
//! сохраняют кавычки, строки экранируются удвоением `'`.

use crate::parser::ast::*;
use crate::parser::keywords::is_reserved_word;
use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

/// Элементы через разделитель
fn join<T: Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Строковый литерал с экранированием
fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Имя, которое без кавычек читается иначе, берется в кавычки
fn write_name(f: &mut Formatter<'_>, name: &str) -> fmt::Result {
    let plain = name.chars().next().is_some_and(|ch| ch.is_ascii_lowercase())
        && name
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        && !is_reserved_word(name)
        && name != "true"
        && name != "false";
    if plain {
        f.write_str(name)
    } else {
        write!(f, "\"{}\"", name.replace('"', "\"\""))
    }
}

fn write_float(f: &mut Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    let text = value.to_string();
    if text.contains('.') {
        f.write_str(&text)
    } else {
        write!(f, "{}.0", text)
    }
}

fn write_constant_map(f: &mut Formatter<'_>, entries: &IndexMap<String, Constant>) -> fmt::Result {
    let items: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{}: {}", quote_string(key), value))
        .collect();
    write!(f, "{{{}}}", items.join(", "))
}

fn write_using(f: &mut Formatter<'_>, using: &[UsingOption]) -> fmt::Result {
    if !using.is_empty() {
        write!(f, " USING {}", join(using, " AND "))?;
    }
    Ok(())
}

fn write_where(f: &mut Formatter<'_>, relations: &[Relation]) -> fmt::Result {
    if !relations.is_empty() {
        write!(f, " WHERE {}", join(relations, " AND "))?;
    }
    Ok(())
}

fn write_if_not_exists(f: &mut Formatter<'_>, flag: bool) -> fmt::Result {
    if flag {
        f.write_str(" IF NOT EXISTS")?;
    }
    Ok(())
}

fn write_if_exists(f: &mut Formatter<'_>, flag: bool) -> fmt::Result {
    if flag {
        f.write_str(" IF EXISTS")?;
    }
    Ok(())
}

fn write_options(f: &mut Formatter<'_>, options: &OptionMap) -> fmt::Result {
    let mut first = true;
    for (name, value) in options {
        if !first {
            f.write_str(" AND ")?;
        }
        first = false;
        write_name(f, name)?;
        write!(f, " = {}", value)?;
    }
    Ok(())
}

// === Имена и типы ===

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.name.replace('"', "\"\""))
        } else {
            f.write_str(&self.name)
        }
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.keyspace {
            Some(keyspace) => write!(f, "{}.{}", keyspace, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Display for NativeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Native(native) => write!(f, "{}", native),
            DataType::List(inner) => write!(f, "list<{}>", inner),
            DataType::Set(inner) => write!(f, "set<{}>", inner),
            DataType::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            DataType::Tuple(items) => write!(f, "tuple<{}>", join(items, ", ")),
            DataType::Frozen(inner) => write!(f, "frozen<{}>", inner),
            DataType::Vector(inner, size) => write!(f, "vector<{}, {}>", inner, size),
            DataType::UserDefined(name) => write!(f, "{}", name),
        }
    }
}

// === Значения ===

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integer(value) => write!(f, "{}", value),
            Constant::Float(value) => write_float(f, *value),
            Constant::String(value) => f.write_str(&quote_string(value)),
            Constant::Boolean(value) => write!(f, "{}", value),
            Constant::Blob(bytes) => {
                f.write_str("0x")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Constant::Uuid(uuid) => write!(f, "{}", uuid.hyphenated()),
            Constant::Null => f.write_str("NULL"),
        }
    }
}

impl Display for BindMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BindMarker::Anonymous => f.write_str("?"),
            BindMarker::Named(name) => write!(f, ":{}", name),
        }
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(constant) => write!(f, "{}", constant),
            Term::BindMarker(marker) => write!(f, "{}", marker),
            Term::FunctionCall(call) => write!(f, "{}", call),
            Term::List(items) => write!(f, "[{}]", join(items, ", ")),
            Term::Set(items) => write!(f, "{{{}}}", join(items, ", ")),
            Term::Map(entries) => {
                let items: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
            Term::Tuple(items) => write!(f, "({})", join(items, ", ")),
            Term::UserType(fields) => {
                let items: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name, value))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, join(&self.args, ", "))
    }
}

impl Display for FunctionArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FunctionArg::Star => f.write_str("*"),
            FunctionArg::Column(column) => write!(f, "{}", column),
            FunctionArg::Term(term) => write!(f, "{}", term),
        }
    }
}

impl Display for IntegerValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IntegerValue::Literal(value) => write!(f, "{}", value),
            IntegerValue::BindMarker(marker) => write!(f, "{}", marker),
        }
    }
}

// === Условия ===

impl Display for RelationOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            RelationOperator::Eq => "=",
            RelationOperator::NotEq => "!=",
            RelationOperator::Lt => "<",
            RelationOperator::Le => "<=",
            RelationOperator::Gt => ">",
            RelationOperator::Ge => ">=",
            RelationOperator::In => "IN",
            RelationOperator::Contains => "CONTAINS",
            RelationOperator::ContainsKey => "CONTAINS KEY",
            RelationOperator::Like => "LIKE",
            RelationOperator::IsNotNull => "IS NOT NULL",
        };
        f.write_str(text)
    }
}

impl Display for RelationTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RelationTarget::Column(column) => write!(f, "{}", column),
            RelationTarget::Tuple(columns) => write!(f, "({})", join(columns, ", ")),
            RelationTarget::Token(columns) => write!(f, "token({})", join(columns, ", ")),
        }
    }
}

impl Display for RelationValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RelationValue::Term(term) => write!(f, " {}", term),
            RelationValue::List(items) => write!(f, " ({})", join(items, ", ")),
            RelationValue::Absent => Ok(()),
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}{}", self.target, self.operator, self.value)
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        if let Some(element) = &self.element {
            write!(f, "[{}]", element)?;
        }
        write!(f, " {}{}", self.operator, self.value)
    }
}

impl Display for UpdateCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UpdateCondition::Exists => f.write_str("IF EXISTS"),
            UpdateCondition::Conditions(conditions) => write!(f, "IF {}", join(conditions, " AND ")),
        }
    }
}

impl Display for UsingOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UsingOption::Ttl(value) => write!(f, "TTL {}", value),
            UsingOption::Timestamp(value) => write!(f, "TIMESTAMP {}", value),
        }
    }
}

impl Display for Ordering {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        };
        write!(f, "{} {}", self.column, direction)
    }
}

// === Опции ===

impl Display for OptionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Constant(constant) => write!(f, "{}", constant),
            OptionValue::Identifier(identifier) => write!(f, "{}", identifier),
            OptionValue::Map(entries) => write_constant_map(f, entries),
        }
    }
}

impl Display for TableOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.compact_storage {
            parts.push("COMPACT STORAGE".to_string());
        }
        if !self.clustering_order.is_empty() {
            parts.push(format!(
                "CLUSTERING ORDER BY ({})",
                join(&self.clustering_order, ", ")
            ));
        }
        f.write_str(&parts.join(" AND "))?;
        if !self.options.is_empty() {
            if !parts.is_empty() {
                f.write_str(" AND ")?;
            }
            write_options(f, &self.options)?;
        }
        Ok(())
    }
}

impl Display for PrimaryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("PRIMARY KEY (")?;
        if self.partition_key.len() == 1 {
            write!(f, "{}", self.partition_key[0])?;
        } else {
            write!(f, "({})", join(&self.partition_key, ", "))?;
        }
        for column in &self.clustering_columns {
            write!(f, ", {}", column)?;
        }
        f.write_str(")")
    }
}

impl Display for ColumnDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if self.is_static {
            f.write_str(" STATIC")?;
        }
        Ok(())
    }
}

impl Display for FieldDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

// === DML ===

impl Display for SelectElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.selector {
            Selector::Column(column) => write!(f, "{}", column)?,
            Selector::FunctionCall(call) => write!(f, "{}", call)?,
        }
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

impl Display for SelectClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SelectClause::Wildcard => f.write_str("*"),
            SelectClause::Elements(elements) => f.write_str(&join(elements, ", ")),
        }
    }
}

impl Display for SelectStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.json {
            f.write_str("JSON ")?;
        }
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{} FROM {}", self.selection, self.from)?;
        write_where(f, &self.where_clause)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", join(&self.order_by, ", "))?;
        }
        if let Some(limit) = &self.per_partition_limit {
            write!(f, " PER PARTITION LIMIT {}", limit)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {}", limit)?;
        }
        if self.allow_filtering {
            f.write_str(" ALLOW FILTERING")?;
        }
        Ok(())
    }
}

impl Display for InsertStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        match &self.source {
            InsertSource::Values { columns, values } => {
                write!(f, " ({}) VALUES ({})", join(columns, ", "), join(values, ", "))?;
            }
            InsertSource::Json { value, default } => {
                write!(f, " JSON {}", value)?;
                match default {
                    Some(JsonDefault::Null) => f.write_str(" DEFAULT NULL")?,
                    Some(JsonDefault::Unset) => f.write_str(" DEFAULT UNSET")?,
                    None => {}
                }
            }
        }
        write_if_not_exists(f, self.if_not_exists)?;
        write_using(f, &self.using)
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Set { column, value } => write!(f, "{} = {}", column, value),
            Assignment::SetField { column, field, value } => write!(f, "{}.{} = {}", column, field, value),
            Assignment::SetElement { column, key, value } => write!(f, "{}[{}] = {}", column, key, value),
            Assignment::Append { column, value } => write!(f, "{0} = {0} + {1}", column, value),
            Assignment::Prepend { column, value } => write!(f, "{0} = {1} + {0}", column, value),
            Assignment::Remove { column, value } => write!(f, "{0} = {0} - {1}", column, value),
        }
    }
}

impl Display for UpdateStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {}", self.table)?;
        write_using(f, &self.using)?;
        write!(f, " SET {}", join(&self.assignments, ", "))?;
        write_where(f, &self.where_clause)?;
        if let Some(condition) = &self.condition {
            write!(f, " {}", condition)?;
        }
        Ok(())
    }
}

impl Display for DeleteTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeleteTarget::Column(column) => write!(f, "{}", column),
            DeleteTarget::Element { column, key } => write!(f, "{}[{}]", column, key),
        }
    }
}

impl Display for DeleteStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("DELETE")?;
        if !self.targets.is_empty() {
            write!(f, " {}", join(&self.targets, ", "))?;
        }
        write!(f, " FROM {}", self.table)?;
        write_using(f, &self.using)?;
        write_where(f, &self.where_clause)?;
        if let Some(condition) = &self.condition {
            write!(f, " {}", condition)?;
        }
        Ok(())
    }
}

impl Display for BatchEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BatchEntry::Insert(statement) => write!(f, "{}", statement),
            BatchEntry::Update(statement) => write!(f, "{}", statement),
            BatchEntry::Delete(statement) => write!(f, "{}", statement),
        }
    }
}

impl Display for BatchStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("BEGIN ")?;
        match self.kind {
            BatchKind::Logged => {}
            BatchKind::Unlogged => f.write_str("UNLOGGED ")?,
            BatchKind::Counter => f.write_str("COUNTER ")?,
        }
        f.write_str("BATCH")?;
        write_using(f, &self.using)?;
        for statement in &self.statements {
            write!(f, " {};", statement)?;
        }
        f.write_str(" APPLY BATCH")
    }
}

// === DDL ===

impl Display for IndexTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            IndexTargetKind::Simple => write!(f, "{}", self.column),
            IndexTargetKind::Keys => write!(f, "KEYS({})", self.column),
            IndexTargetKind::Values => write!(f, "VALUES({})", self.column),
            IndexTargetKind::Entries => write!(f, "ENTRIES({})", self.column),
            IndexTargetKind::Full => write!(f, "FULL({})", self.column),
        }
    }
}

impl Display for AlterTableOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AlterTableOperation::AddColumns(columns) if columns.len() == 1 => write!(f, "ADD {}", columns[0]),
            AlterTableOperation::AddColumns(columns) => write!(f, "ADD ({})", join(columns, ", ")),
            AlterTableOperation::DropColumns(columns) if columns.len() == 1 => write!(f, "DROP {}", columns[0]),
            AlterTableOperation::DropColumns(columns) => write!(f, "DROP ({})", join(columns, ", ")),
            AlterTableOperation::DropCompactStorage => f.write_str("DROP COMPACT STORAGE"),
            AlterTableOperation::RenameColumns(renames) => write_renames(f, renames),
            AlterTableOperation::AlterColumnType { column, data_type } => {
                write!(f, "ALTER {} TYPE {}", column, data_type)
            }
            AlterTableOperation::WithOptions(options) => write!(f, "WITH {}", options),
        }
    }
}

fn write_renames(f: &mut Formatter<'_>, renames: &[(Identifier, Identifier)]) -> fmt::Result {
    let items: Vec<String> = renames
        .iter()
        .map(|(from, to)| format!("{} TO {}", from, to))
        .collect();
    write!(f, "RENAME {}", items.join(" AND "))
}

impl Display for AlterTypeOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AlterTypeOperation::AddField(field) => write!(f, "ADD {}", field),
            AlterTypeOperation::RenameFields(renames) => write_renames(f, renames),
            AlterTypeOperation::AlterFieldType { field, data_type } => {
                write!(f, "ALTER {} TYPE {}", field, data_type)
            }
        }
    }
}

fn write_signature(f: &mut Formatter<'_>, signature: &Option<Vec<DataType>>) -> fmt::Result {
    if let Some(types) = signature {
        write!(f, " ({})", join(types, ", "))?;
    }
    Ok(())
}

// === Права ===

impl Display for Permission {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            Permission::All => "ALL PERMISSIONS",
            Permission::Alter => "ALTER",
            Permission::Authorize => "AUTHORIZE",
            Permission::Create => "CREATE",
            Permission::Describe => "DESCRIBE",
            Permission::Drop => "DROP",
            Permission::Execute => "EXECUTE",
            Permission::Modify => "MODIFY",
            Permission::Select => "SELECT",
        };
        f.write_str(text)
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Resource::AllKeyspaces => f.write_str("ALL KEYSPACES"),
            Resource::Keyspace(name) => write!(f, "KEYSPACE {}", name),
            Resource::Table(name) => write!(f, "TABLE {}", name),
            Resource::AllRoles => f.write_str("ALL ROLES"),
            Resource::Role(name) => write!(f, "ROLE {}", name),
            Resource::AllFunctions => f.write_str("ALL FUNCTIONS"),
            Resource::AllFunctionsInKeyspace(keyspace) => write!(f, "ALL FUNCTIONS IN KEYSPACE {}", keyspace),
            Resource::Function { name, arg_types } => write!(f, "FUNCTION {}({})", name, join(arg_types, ", ")),
        }
    }
}

impl Display for RoleOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RoleOption::Password(password) => write!(f, "PASSWORD = {}", quote_string(password)),
            RoleOption::Login(value) => write!(f, "LOGIN = {}", value),
            RoleOption::Superuser(value) => write!(f, "SUPERUSER = {}", value),
            RoleOption::Options(entries) => {
                f.write_str("OPTIONS = ")?;
                write_constant_map(f, entries)
            }
        }
    }
}

fn write_user_options(f: &mut Formatter<'_>, password: &Option<String>, superuser: Option<bool>) -> fmt::Result {
    if let Some(password) = password {
        write!(f, " WITH PASSWORD {}", quote_string(password))?;
    }
    match superuser {
        Some(true) => f.write_str(" SUPERUSER"),
        Some(false) => f.write_str(" NOSUPERUSER"),
        None => Ok(()),
    }
}

fn write_list_tail(f: &mut Formatter<'_>, of: &Option<Identifier>, norecursive: bool) -> fmt::Result {
    if let Some(role) = of {
        write!(f, " OF {}", role)?;
    }
    if norecursive {
        f.write_str(" NORECURSIVE")?;
    }
    Ok(())
}

// === Команды оболочки ===

impl Display for DescribeTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DescribeTarget::Cluster => f.write_str("CLUSTER"),
            DescribeTarget::Schema => f.write_str("SCHEMA"),
            DescribeTarget::Keyspaces => f.write_str("KEYSPACES"),
            DescribeTarget::Keyspace(None) => f.write_str("KEYSPACE"),
            DescribeTarget::Keyspace(Some(name)) => write!(f, "KEYSPACE {}", name),
            DescribeTarget::Tables => f.write_str("TABLES"),
            DescribeTarget::Table(name) => write!(f, "TABLE {}", name),
            DescribeTarget::Types => f.write_str("TYPES"),
            DescribeTarget::Type(name) => write!(f, "TYPE {}", name),
            DescribeTarget::Functions => f.write_str("FUNCTIONS"),
            DescribeTarget::Function(name) => write!(f, "FUNCTION {}", name),
            DescribeTarget::Aggregates => f.write_str("AGGREGATES"),
            DescribeTarget::Aggregate(name) => write!(f, "AGGREGATE {}", name),
            DescribeTarget::Index(name) => write!(f, "INDEX {}", name),
            DescribeTarget::MaterializedView(name) => write!(f, "MATERIALIZED VIEW {}", name),
            DescribeTarget::Roles => f.write_str("ROLES"),
            DescribeTarget::Object(name) => write!(f, "{}", name),
        }
    }
}

impl Display for ConsistencyLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Команда с необязательным переключателем `ON | OFF`
fn write_toggle(f: &mut Formatter<'_>, command: &str, state: Option<bool>) -> fmt::Result {
    match state {
        Some(true) => write!(f, "{} ON", command),
        Some(false) => write!(f, "{} OFF", command),
        None => f.write_str(command),
    }
}

impl Display for ShowTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShowTarget::Version => "VERSION",
            ShowTarget::Host => "HOST",
            ShowTarget::Session => "SESSION",
        })
    }
}

impl Display for CaptureCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CaptureCommand::Status => f.write_str("CAPTURE"),
            CaptureCommand::Off => f.write_str("CAPTURE OFF"),
            CaptureCommand::Start { format, path } => {
                f.write_str("CAPTURE ")?;
                match format {
                    CaptureFormat::Text => {}
                    CaptureFormat::Json => f.write_str("JSON ")?,
                    CaptureFormat::Csv => f.write_str("CSV ")?,
                    CaptureFormat::Parquet => f.write_str("PARQUET ")?,
                }
                f.write_str(&quote_string(path))
            }
        }
    }
}

impl Display for CopyStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "COPY {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", join(&self.columns, ", "))?;
        }
        let (direction, stream) = match self.direction {
            CopyDirection::To => ("TO", "STDOUT"),
            CopyDirection::From => ("FROM", "STDIN"),
        };
        match &self.target {
            CopyTarget::File(path) => write!(f, " {} {}", direction, quote_string(path))?,
            CopyTarget::Standard => write!(f, " {} {}", direction, stream)?,
        }
        if !self.options.is_empty() {
            f.write_str(" WITH ")?;
            write_options(f, &self.options)?;
        }
        Ok(())
    }
}

// === Инструкция ===

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Empty => f.write_str(";"),

            Statement::Select(statement) => write!(f, "{}", statement),
            Statement::Insert(statement) => write!(f, "{}", statement),
            Statement::Update(statement) => write!(f, "{}", statement),
            Statement::Delete(statement) => write!(f, "{}", statement),
            Statement::Batch(statement) => write!(f, "{}", statement),

            Statement::UseKeyspace(statement) => write!(f, "USE {}", statement.name),
            Statement::CreateKeyspace(statement) => {
                f.write_str("CREATE KEYSPACE")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(f, " {} WITH ", statement.name)?;
                write_options(f, &statement.options)
            }
            Statement::AlterKeyspace(statement) => {
                write!(f, "ALTER KEYSPACE {} WITH ", statement.name)?;
                write_options(f, &statement.options)
            }
            Statement::DropKeyspace(statement) => {
                f.write_str("DROP KEYSPACE")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)
            }

            Statement::CreateTable(statement) => {
                f.write_str("CREATE TABLE")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(f, " {} ({}", statement.name, join(&statement.columns, ", "))?;
                if !statement.primary_key.partition_key.is_empty() {
                    write!(f, ", {}", statement.primary_key)?;
                }
                f.write_str(")")?;
                if !statement.options.is_empty() {
                    write!(f, " WITH {}", statement.options)?;
                }
                Ok(())
            }
            Statement::AlterTable(statement) => {
                write!(f, "ALTER TABLE {} {}", statement.name, statement.operation)
            }
            Statement::DropTable(statement) => {
                f.write_str("DROP TABLE")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)
            }
            Statement::Truncate(statement) => write!(f, "TRUNCATE {}", statement.name),

            Statement::CreateType(statement) => {
                f.write_str("CREATE TYPE")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(f, " {} ({})", statement.name, join(&statement.fields, ", "))
            }
            Statement::AlterType(statement) => {
                write!(f, "ALTER TYPE {} {}", statement.name, statement.operation)
            }
            Statement::DropType(statement) => {
                f.write_str("DROP TYPE")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)
            }

            Statement::CreateIndex(statement) => {
                f.write_str("CREATE ")?;
                if statement.custom {
                    f.write_str("CUSTOM ")?;
                }
                f.write_str("INDEX")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                if let Some(name) = &statement.name {
                    write!(f, " {}", name)?;
                }
                write!(f, " ON {} ({})", statement.table, statement.target)?;
                if let Some(class) = &statement.using {
                    write!(f, " USING {}", quote_string(class))?;
                }
                if !statement.options.is_empty() {
                    f.write_str(" WITH ")?;
                    write_options(f, &statement.options)?;
                }
                Ok(())
            }
            Statement::DropIndex(statement) => {
                f.write_str("DROP INDEX")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)
            }
            Statement::CreateMaterializedView(statement) => {
                f.write_str("CREATE MATERIALIZED VIEW")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(
                    f,
                    " {} AS SELECT {} FROM {}",
                    statement.name, statement.selection, statement.from
                )?;
                write_where(f, &statement.where_clause)?;
                write!(f, " {}", statement.primary_key)?;
                if !statement.options.is_empty() {
                    write!(f, " WITH {}", statement.options)?;
                }
                Ok(())
            }
            Statement::AlterMaterializedView(statement) => {
                write!(f, "ALTER MATERIALIZED VIEW {} WITH {}", statement.name, statement.options)
            }
            Statement::DropMaterializedView(statement) => {
                f.write_str("DROP MATERIALIZED VIEW")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)
            }

            Statement::CreateFunction(statement) => {
                f.write_str("CREATE ")?;
                if statement.or_replace {
                    f.write_str("OR REPLACE ")?;
                }
                f.write_str("FUNCTION")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(f, " {} ({}) ", statement.name, join(&statement.params, ", "))?;
                match statement.on_null_input {
                    OnNullInput::Called => f.write_str("CALLED")?,
                    OnNullInput::ReturnsNull => f.write_str("RETURNS NULL")?,
                }
                write!(
                    f,
                    " ON NULL INPUT RETURNS {} LANGUAGE {} AS ",
                    statement.return_type, statement.language
                )?;
                if statement.body.contains("$$") {
                    f.write_str(&quote_string(&statement.body))
                } else {
                    write!(f, "$${}$$", statement.body)
                }
            }
            Statement::DropFunction(statement) => {
                f.write_str("DROP FUNCTION")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)?;
                write_signature(f, &statement.signature)
            }
            Statement::CreateAggregate(statement) => {
                f.write_str("CREATE ")?;
                if statement.or_replace {
                    f.write_str("OR REPLACE ")?;
                }
                f.write_str("AGGREGATE")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(
                    f,
                    " {} ({}) SFUNC {} STYPE {}",
                    statement.name,
                    join(&statement.arg_types, ", "),
                    statement.state_function,
                    statement.state_type
                )?;
                if let Some(final_function) = &statement.final_function {
                    write!(f, " FINALFUNC {}", final_function)?;
                }
                if let Some(initial_condition) = &statement.initial_condition {
                    write!(f, " INITCOND {}", initial_condition)?;
                }
                Ok(())
            }
            Statement::DropAggregate(statement) => {
                f.write_str("DROP AGGREGATE")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)?;
                write_signature(f, &statement.signature)
            }
            Statement::CreateTrigger(statement) => {
                f.write_str("CREATE TRIGGER")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(
                    f,
                    " {} ON {} USING {}",
                    statement.name,
                    statement.table,
                    quote_string(&statement.class)
                )
            }
            Statement::DropTrigger(statement) => {
                f.write_str("DROP TRIGGER")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {} ON {}", statement.name, statement.table)
            }

            Statement::CreateRole(statement) => {
                f.write_str("CREATE ROLE")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(f, " {}", statement.name)?;
                if !statement.options.is_empty() {
                    write!(f, " WITH {}", join(&statement.options, " AND "))?;
                }
                Ok(())
            }
            Statement::AlterRole(statement) => {
                write!(f, "ALTER ROLE {} WITH {}", statement.name, join(&statement.options, " AND "))
            }
            Statement::DropRole(statement) => {
                f.write_str("DROP ROLE")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)
            }
            Statement::CreateUser(statement) => {
                f.write_str("CREATE USER")?;
                write_if_not_exists(f, statement.if_not_exists)?;
                write!(f, " {}", statement.name)?;
                write_user_options(f, &statement.password, statement.superuser)
            }
            Statement::AlterUser(statement) => {
                write!(f, "ALTER USER {}", statement.name)?;
                write_user_options(f, &statement.password, statement.superuser)
            }
            Statement::DropUser(statement) => {
                f.write_str("DROP USER")?;
                write_if_exists(f, statement.if_exists)?;
                write!(f, " {}", statement.name)
            }
            Statement::Grant(statement) => write!(
                f,
                "GRANT {} ON {} TO {}",
                statement.permission, statement.resource, statement.role
            ),
            Statement::Revoke(statement) => write!(
                f,
                "REVOKE {} ON {} FROM {}",
                statement.permission, statement.resource, statement.role
            ),
            Statement::ListRoles(statement) => {
                f.write_str("LIST ROLES")?;
                write_list_tail(f, &statement.of, statement.norecursive)
            }
            Statement::ListUsers => f.write_str("LIST USERS"),
            Statement::ListPermissions(statement) => {
                write!(f, "LIST {}", statement.permission)?;
                if let Some(resource) = &statement.resource {
                    write!(f, " ON {}", resource)?;
                }
                write_list_tail(f, &statement.of, statement.norecursive)
            }

            Statement::Describe(target) => write!(f, "DESCRIBE {}", target),
            Statement::Consistency(level) => match level {
                Some(level) => write!(f, "CONSISTENCY {}", level),
                None => f.write_str("CONSISTENCY"),
            },
            Statement::SerialConsistency(level) => match level {
                Some(level) => write!(f, "SERIAL CONSISTENCY {}", level),
                None => f.write_str("SERIAL CONSISTENCY"),
            },
            Statement::OutputFormat(format) => match format {
                Some(format) => write!(f, "OUTPUT {}", format),
                None => f.write_str("OUTPUT"),
            },
            Statement::Tracing(state) => write_toggle(f, "TRACING", *state),
            Statement::Paging(setting) => match setting {
                Some(PagingSetting::PageSize(size)) => write!(f, "PAGING {}", size),
                Some(PagingSetting::Off) => f.write_str("PAGING OFF"),
                None => f.write_str("PAGING"),
            },
            Statement::Autofetch(state) => write_toggle(f, "AUTOFETCH", *state),
            Statement::Expand(state) => write_toggle(f, "EXPAND", *state),
            Statement::Show(target) => write!(f, "SHOW {}", target),
            Statement::Source(path) => write!(f, "SOURCE {}", quote_string(path)),
            Statement::Capture(command) => write!(f, "{}", command),
            Statement::Copy(statement) => write!(f, "{}", statement),
            Statement::Help => f.write_str("HELP"),
        }
    }
}
