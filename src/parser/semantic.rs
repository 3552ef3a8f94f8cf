//! Семантические проверки при построении AST
//!
//! Проверки отделены от правил грамматики: каждая функция получает готовый
//! (или частично собранный) узел и возвращает текст ошибки. Грамматика
//! привязывает ошибку к позиции и пропускает проверки в нестрогом режиме.

use crate::parser::ast::*;
use std::collections::HashSet;

/// Результат проверки: текст ошибки при нарушении
pub type CheckResult = Result<(), String>;

/// Первое повторяющееся имя в последовательности
fn first_duplicate<'a>(names: impl IntoIterator<Item = &'a Identifier>) -> Option<&'a Identifier> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.name.as_str()) {
            return Some(name);
        }
    }
    None
}

/// Число колонок INSERT должно совпадать с числом значений
pub fn check_insert(statement: &InsertStatement) -> CheckResult {
    if let InsertSource::Values { columns, values } = &statement.source {
        if columns.len() != values.len() {
            return Err(format!(
                "INSERT lists {} columns but {} values",
                columns.len(),
                values.len()
            ));
        }
        if let Some(name) = first_duplicate(columns) {
            return Err(format!("column '{}' appears more than once", name.name));
        }
    }
    Ok(())
}

/// Опция не может быть задана дважды
pub fn check_duplicate_option(options: &OptionMap, name: &str) -> CheckResult {
    if options.contains_key(name) {
        Err(format!("duplicate option '{}'", name))
    } else {
        Ok(())
    }
}

/// Размер страницы PAGING
pub fn check_page_size(size: i64) -> CheckResult {
    if size < 1 {
        Err("page size must be at least 1".to_string())
    } else {
        Ok(())
    }
}

/// TTL и TIMESTAMP указываются не более одного раза
pub fn check_using_option(existing: &[UsingOption], option: &UsingOption) -> CheckResult {
    let same_kind = existing
        .iter()
        .any(|current| std::mem::discriminant(current) == std::mem::discriminant(option));
    if !same_kind {
        return Ok(());
    }
    let name = match option {
        UsingOption::Ttl(_) => "TTL",
        UsingOption::Timestamp(_) => "TIMESTAMP",
    };
    Err(format!("USING {} specified more than once", name))
}

/// Определения колонок таблицы и ее первичный ключ
pub fn check_table_definition(
    columns: &[ColumnDefinition],
    primary_key: &PrimaryKey,
    key_definitions: usize,
) -> CheckResult {
    if let Some(name) = first_duplicate(columns.iter().map(|column| &column.name)) {
        return Err(format!("column '{}' is defined more than once", name.name));
    }
    match key_definitions {
        0 => return Err("table has no PRIMARY KEY".to_string()),
        1 => {}
        _ => return Err("PRIMARY KEY is defined more than once".to_string()),
    }
    check_primary_key(primary_key, |name| columns.iter().any(|column| column.name.name == name.name))?;

    for column in columns.iter().filter(|column| column.is_static) {
        if primary_key.columns().any(|key| key.name == column.name.name) {
            return Err(format!("primary key column '{}' cannot be STATIC", column.name.name));
        }
        if primary_key.clustering_columns.is_empty() {
            return Err(format!(
                "static column '{}' requires clustering columns",
                column.name.name
            ));
        }
    }
    Ok(())
}

/// Ключ партиции непуст, колонки ключа известны и не повторяются
pub fn check_primary_key(primary_key: &PrimaryKey, is_defined: impl Fn(&Identifier) -> bool) -> CheckResult {
    if primary_key.partition_key.is_empty() {
        return Err("partition key must contain at least one column".to_string());
    }
    if let Some(name) = first_duplicate(primary_key.columns()) {
        return Err(format!("column '{}' appears more than once in PRIMARY KEY", name.name));
    }
    if let Some(name) = primary_key.columns().find(|name| !is_defined(name)) {
        return Err(format!("PRIMARY KEY column '{}' is not defined", name.name));
    }
    Ok(())
}

/// Поля пользовательского типа или параметры функции не повторяются
pub fn check_fields(fields: &[FieldDefinition], what: &str) -> CheckResult {
    match first_duplicate(fields.iter().map(|field| &field.name)) {
        Some(name) => Err(format!("{} '{}' is defined more than once", what, name.name)),
        None => Ok(()),
    }
}

/// Опции роли не повторяются
pub fn check_role_options(options: &[RoleOption], option: &RoleOption) -> CheckResult {
    let same_kind = options
        .iter()
        .any(|current| std::mem::discriminant(current) == std::mem::discriminant(option));
    if !same_kind {
        return Ok(());
    }
    let name = match option {
        RoleOption::Password(_) => "PASSWORD",
        RoleOption::Login(_) => "LOGIN",
        RoleOption::Superuser(_) => "SUPERUSER",
        RoleOption::Options(_) => "OPTIONS",
    };
    Err(format!("role option {} specified more than once", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> ColumnDefinition {
        ColumnDefinition {
            name: Identifier::unquoted(name),
            data_type: DataType::Native(NativeType::Int),
            is_static: false,
        }
    }

    fn key(partition: &[&str], clustering: &[&str]) -> PrimaryKey {
        PrimaryKey {
            partition_key: partition.iter().map(|name| Identifier::unquoted(name)).collect(),
            clustering_columns: clustering.iter().map(|name| Identifier::unquoted(name)).collect(),
        }
    }

    #[test]
    fn test_table_definition_checks() {
        let columns = vec![column("a"), column("b")];
        assert!(check_table_definition(&columns, &key(&["a"], &["b"]), 1).is_ok());
        assert!(check_table_definition(&columns, &key(&["a"], &[]), 0).is_err());
        assert!(check_table_definition(&columns, &key(&["a"], &[]), 2).is_err());
        assert!(check_table_definition(&columns, &key(&["c"], &[]), 1).is_err());
        assert!(check_table_definition(&columns, &key(&["a"], &["a"]), 1).is_err());

        let duplicated = vec![column("a"), column("a")];
        assert!(check_table_definition(&duplicated, &key(&["a"], &[]), 1).is_err());
    }

    #[test]
    fn test_static_column_rules() {
        let mut columns = vec![column("a"), column("b"), column("s")];
        columns[2].is_static = true;
        assert!(check_table_definition(&columns, &key(&["a"], &["b"]), 1).is_ok());
        assert!(check_table_definition(&columns, &key(&["a"], &[]), 1).is_err());
    }

    #[test]
    fn test_using_option_duplicates() {
        let existing = vec![UsingOption::Ttl(IntegerValue::Literal(10))];
        assert!(check_using_option(&existing, &UsingOption::Timestamp(IntegerValue::Literal(1))).is_ok());
        assert!(check_using_option(&existing, &UsingOption::Ttl(IntegerValue::Literal(5))).is_err());
    }
}
